//! Test Module
//!
//! Test suite for the MindMosaic core.
//!
//! ## Test Categories
//! - `brain_tests`: keyword rules, rule precedence, sentiment fallback
//! - `recommendation_tests`: bundles, responses, music enrichment and fallback
//! - `storage_tests`: key/value backends and typed collections
//! - `integration_tests`: chat flow, tips, progress over stored history

pub mod storage_tests;
