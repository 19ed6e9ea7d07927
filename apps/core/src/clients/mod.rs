//! Optional remote collaborators: music recommendations and reverse geocoding.

pub mod nominatim;
pub mod spotify;
pub mod traits;

pub use nominatim::{location_label, NominatimClient, UNKNOWN_LOCATION};
pub use spotify::SpotifyClient;
pub use traits::{AudioTargets, MusicService, RemoteTrack, ReverseGeocoder};
