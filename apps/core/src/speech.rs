//! Speech collaborators.
//!
//! Platform speech engines live outside this crate; the companion only talks
//! to them through [`SpeechSynthesizer`] and [`SpeechRecognizer`]. The
//! terminal binary uses [`ConsoleSynthesizer`] and [`LineRecognizer`].

use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::AppError;

pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.0;

/// Voice names containing any of these are preferred, in order of appearance.
const PREFERRED_VOICE_MARKERS: [&str; 3] = ["Female", "Google", "Samantha"];

/// One request to speak.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<String>,
}

/// Text-to-speech engine. `speak` starts an utterance and returns without
/// waiting for it to finish.
pub trait SpeechSynthesizer: Send + Sync {
    fn voices(&self) -> Vec<String>;

    fn speak(&self, utterance: Utterance) -> Result<(), AppError>;
}

/// Single-utterance speech recognition.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listens for one utterance and returns its transcript, or `None` once
    /// the input has ended.
    async fn listen(&self) -> Result<Option<String>, AppError>;
}

/// First voice whose name contains a preferred marker.
pub fn preferred_voice(voices: &[String]) -> Option<&str> {
    voices
        .iter()
        .find(|name| PREFERRED_VOICE_MARKERS.iter().any(|m| name.contains(m)))
        .map(String::as_str)
}

/// Narrates meditation scripts when a synthesizer is available.
pub struct Narrator {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    advised: AtomicBool,
}

impl Narrator {
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self {
            synthesizer,
            advised: AtomicBool::new(false),
        }
    }

    pub fn silent() -> Self {
        Self::new(None)
    }

    /// Speaks `text`. Returns whether speech was started.
    pub fn narrate(&self, text: &str) -> bool {
        let Some(synth) = &self.synthesizer else {
            if !self.advised.swap(true, Ordering::Relaxed) {
                info!("Speech synthesis is not available; meditation scripts will not be narrated");
            }
            return false;
        };

        let voices = synth.voices();
        let utterance = Utterance {
            text: text.to_string(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            voice: preferred_voice(&voices).map(str::to_string),
        };

        match synth.speak(utterance) {
            Ok(()) => true,
            Err(e) => {
                warn!("Speech synthesis failed: {}", e);
                false
            }
        }
    }
}

/// Writes utterances to stdout, for terminal sessions.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn voices(&self) -> Vec<String> {
        vec!["Console".to_string()]
    }

    fn speak(&self, utterance: Utterance) -> Result<(), AppError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "\n🔊 {}\n", utterance.text)?;
        Ok(())
    }
}

/// Takes each typed line as an utterance, for terminal sessions.
pub struct LineRecognizer<R> {
    lines: Mutex<Lines<R>>,
}

impl<R: AsyncBufRead + Unpin> LineRecognizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }
}

impl LineRecognizer<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn listen(&self) -> Result<Option<String>, AppError> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }
}
