//! Conversational text: empathetic replies, follow-up questions, journal prompts.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Mood;

pub const WELCOME_MESSAGE: &str =
    "Hi there! I'm your MindMosaic companion. How have you been feeling lately?";

pub const TROUBLE_MESSAGE: &str =
    "I'm having trouble understanding right now. Could you try again?";

const DEFAULT_FOLLOW_UP: &str = "How are you feeling about that?";

/// One fixed empathetic sentence per mood, optionally addressed by name.
pub fn generate_response(mood: Mood, name: Option<&str>) -> String {
    let greeting = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{}, I", name),
        None => "I".to_string(),
    };

    match mood {
        Mood::Happy => format!("{greeting} sense you're feeling happy today! That's wonderful. It's important to savor these positive moments."),
        Mood::Sad => format!("{greeting} sense you're feeling sad. I'm here for you. Remember that it's okay to not feel okay sometimes."),
        Mood::Angry => format!("{greeting} sense you're feeling frustrated or angry. Taking a moment to breathe can really help when emotions are intense."),
        Mood::Anxious => format!("{greeting} sense you're feeling anxious. Let's slow things down together, one breath at a time."),
        Mood::Stressed => format!("{greeting} sense you're feeling stressed. It's okay to pause; you don't have to carry everything at once."),
        Mood::Calm => format!("{greeting} sense you're feeling calm. That's a lovely place to be, so let's take a moment to appreciate it."),
        Mood::Neutral => format!("{greeting} sense you're feeling okay today. Sometimes a neutral state is a great foundation for mindfulness."),
        Mood::Unknown => format!("{greeting}'d like to understand how you're feeling better. Could you tell me more about your day?"),
    }
}

fn follow_up_pool(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "What's contributing to your happiness today?",
            "What activities make you feel this positive?",
            "How can you maintain this positive energy?",
        ],
        Mood::Sad => &[
            "What's been making you feel down lately?",
            "Is there something specific troubling you?",
            "Have you talked to anyone about how you're feeling?",
        ],
        Mood::Angry => &[
            "What's triggering your frustration?",
            "Is there a way to address what's bothering you?",
            "What usually helps you calm down when you feel this way?",
        ],
        Mood::Anxious => &[
            "What's causing you to feel anxious right now?",
            "Are you worried about something specific?",
            "What techniques have helped with your anxiety before?",
        ],
        Mood::Stressed => &[
            "What's been stressing you out?",
            "How are you managing your stress levels?",
            "Is there anything you could delegate or let go of?",
        ],
        Mood::Calm => &[
            "What's helping you feel centered today?",
            "What practices keep you feeling balanced?",
            "How can you bring more of this calm into other areas of your life?",
        ],
        Mood::Neutral => &[
            "How has your day been going so far?",
            "Is there anything you're looking forward to?",
            "What would make today more meaningful for you?",
        ],
        Mood::Unknown => &[],
    }
}

/// Up to `count` distinct follow-up questions for a mood, in random order.
pub fn follow_up_questions(mood: Mood, count: usize) -> Vec<String> {
    follow_up_questions_with(mood, count, &mut rand::thread_rng())
}

pub fn follow_up_questions_with<R: Rng + ?Sized>(
    mood: Mood,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let pool = follow_up_pool(mood);
    if pool.is_empty() {
        return vec![DEFAULT_FOLLOW_UP.to_string()];
    }

    let mut shuffled: Vec<&str> = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled
        .into_iter()
        .take(count.min(pool.len()))
        .map(str::to_string)
        .collect()
}

fn journal_prompt_pool(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "What made you smile today?",
            "What are you grateful for right now?",
            "How can you extend this positive feeling to tomorrow?",
        ],
        Mood::Sad => &[
            "What emotions are present for you right now?",
            "What would offer you comfort in this moment?",
            "What's one small step you could take toward feeling better?",
        ],
        Mood::Angry => &[
            "What triggered this feeling?",
            "What needs of yours aren't being met?",
            "What would help you feel more at peace right now?",
        ],
        Mood::Neutral => &[
            "What are you looking forward to today or tomorrow?",
            "What's something you'd like to explore or learn about?",
            "How would you describe your energy levels right now?",
        ],
        Mood::Anxious => &[
            "What specifically is causing your anxiety right now?",
            "What has helped calm your anxiety in the past?",
            "What would help you feel more grounded in this moment?",
        ],
        Mood::Stressed => &[
            "What pressures are you feeling right now?",
            "What boundaries might you need to set?",
            "What small action could help reduce your stress level?",
        ],
        Mood::Calm => &[
            "What contributed to this sense of calm?",
            "How can you bring more of this feeling into your daily life?",
            "What are you appreciating about this peaceful moment?",
        ],
        Mood::Unknown => &[
            "How are you feeling right now?",
            "What's on your mind today?",
            "What would make today meaningful for you?",
        ],
    }
}

/// A random journaling prompt for a mood.
pub fn journal_prompt(mood: Mood) -> &'static str {
    journal_prompt_pool(mood)
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("How are you feeling right now?")
}

/// Hotline notice for moods where the user may need outside help.
pub fn emergency_notice(mood: Mood) -> Option<String> {
    let lead = match mood {
        Mood::Sad => "It's okay to not feel okay. If you're struggling, please consider reaching out for support.",
        Mood::Anxious => "Anxiety can be overwhelming. Professional support is available when you need it.",
        Mood::Stressed => "Chronic stress can affect your wellbeing. Don't hesitate to seek help if you need it.",
        _ => return None,
    };

    Some(format!(
        "{lead}\nNational Suicide Prevention Lifeline: 1-800-273-8255\nCrisis Text Line: Text HOME to 741741\nThese services are available 24/7 and are free and confidential."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_response_with_name() {
        let text = generate_response(Mood::Sad, Some("Ana"));
        assert!(text.starts_with("Ana, I sense you're feeling sad."));
    }

    #[test]
    fn test_unknown_response_asks_for_more() {
        let text = generate_response(Mood::Unknown, None);
        assert_eq!(
            text,
            "I'd like to understand how you're feeling better. Could you tell me more about your day?"
        );
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let text = generate_response(Mood::Calm, Some("   "));
        assert!(text.starts_with("I sense"));
    }

    #[test]
    fn test_follow_up_questions_are_distinct_and_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = follow_up_questions_with(Mood::Anxious, 10, &mut rng);
        assert_eq!(questions.len(), 3);
        let mut deduped = questions.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn test_unknown_mood_gets_default_follow_up() {
        assert_eq!(
            follow_up_questions(Mood::Unknown, 2),
            vec!["How are you feeling about that?".to_string()]
        );
    }

    #[test]
    fn test_journal_prompt_belongs_to_mood() {
        for mood in Mood::ALL {
            let prompt = journal_prompt(mood);
            assert!(journal_prompt_pool(mood).contains(&prompt));
        }
    }

    #[test]
    fn test_emergency_notice_only_for_vulnerable_moods() {
        assert!(emergency_notice(Mood::Sad).is_some());
        assert!(emergency_notice(Mood::Anxious).is_some());
        assert!(emergency_notice(Mood::Stressed).is_some());
        assert!(emergency_notice(Mood::Happy).is_none());
        assert!(emergency_notice(Mood::Angry).is_none());
    }
}
