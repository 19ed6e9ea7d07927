//! The chat companion.
//!
//! [`Companion`] turns one user message into one bot reply and can be called
//! concurrently; [`ChatSession`] owns the append-only message log of a single
//! conversation and narrates replies.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::brain::{MoodClassifier, MoodReading};
use crate::error::AppError;
use crate::models::{Message, Mood, MoodRecord, RecommendationBundle};
use crate::recommendations::{
    follow_up_questions, generate_response, journal_prompt, RecommendationResolver,
    TROUBLE_MESSAGE, WELCOME_MESSAGE,
};
use crate::speech::Narrator;
use crate::storage::WellnessRepository;

/// Follow-up questions attached to each bot reply.
const FOLLOW_UPS_PER_REPLY: usize = 1;

/// Everything produced for one user message.
#[derive(Debug, Clone)]
pub struct Reply {
    pub reading: MoodReading,
    pub bundle: RecommendationBundle,
    pub message: Message,
}

impl Reply {
    pub fn mood(&self) -> Mood {
        self.reading.mood
    }
}

pub struct Companion {
    classifier: MoodClassifier,
    resolver: RecommendationResolver,
    repo: WellnessRepository,
    user_name: Option<String>,
}

impl Companion {
    pub fn new(
        resolver: RecommendationResolver,
        repo: WellnessRepository,
        user_name: Option<String>,
    ) -> Self {
        Self {
            classifier: MoodClassifier::new(),
            resolver,
            repo,
            user_name,
        }
    }

    pub fn repository(&self) -> &WellnessRepository {
        &self.repo
    }

    /// Classify, record the mood, resolve and enrich the bundle, and compose the reply.
    #[instrument(skip(self, text))]
    pub async fn respond(&self, text: &str) -> Result<Reply, AppError> {
        let reading = self.classifier.classify(text);
        let mood = reading.mood;
        debug!("Classified mood {} from {:?}", mood, reading.evidence);

        self.repo.append_mood(MoodRecord::now(mood)).await?;

        let bundle = self.resolver.resolve(mood).await;
        let message = Message::bot(generate_response(mood, self.user_name.as_deref()))
            .with_audio(bundle.meditation_script.clone())
            .with_follow_ups(follow_up_questions(mood, FOLLOW_UPS_PER_REPLY));

        info!("Replying to {} message", mood);
        Ok(Reply {
            reading,
            bundle,
            message,
        })
    }
}

/// One conversation with the companion.
pub struct ChatSession {
    companion: Arc<Companion>,
    narrator: Narrator,
    messages: Vec<Message>,
    mood: Mood,
    bundle: Option<RecommendationBundle>,
}

impl ChatSession {
    /// Starts a conversation with the welcome message.
    pub fn new(companion: Arc<Companion>, narrator: Narrator) -> Self {
        Self {
            companion,
            narrator,
            messages: vec![Message::bot(WELCOME_MESSAGE)],
            mood: Mood::Unknown,
            bundle: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn current_mood(&self) -> Mood {
        self.mood
    }

    pub fn current_bundle(&self) -> Option<&RecommendationBundle> {
        self.bundle.as_ref()
    }

    /// Prompt offered when the user opens the journal.
    pub fn journal_prompt(&self) -> &'static str {
        journal_prompt(self.mood)
    }

    /// Sends a user message and returns the bot reply. Blank input is ignored.
    ///
    /// Failures never end the session: the reply becomes an apology instead.
    pub async fn send(&mut self, text: &str) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(Message::user(text));

        let reply = match self.companion.respond(text).await {
            Ok(reply) => {
                self.mood = reply.mood();
                self.bundle = Some(reply.bundle);
                reply.message
            }
            Err(e) => {
                error!("Error processing message: {}", e);
                Message::bot(TROUBLE_MESSAGE)
            }
        };

        if let Some(script) = &reply.audio {
            self.narrator.narrate(script);
        }

        self.messages.push(reply);
        self.messages.last()
    }
}
