//! Editorial content: one bundle per mood.

use crate::models::{Mood, Recommendation, RecommendationBundle, RecommendationKind};

struct Item {
    title: &'static str,
    description: &'static str,
}

struct BundleTemplate {
    music: Item,
    movie: Item,
    book: Item,
    destination: Item,
    mindful_activity: &'static str,
    emergency_support: Option<&'static str>,
    meditation_script: &'static str,
}

const GROUNDING_ACTIVITY: &str = "Try the 5-4-3-2-1 grounding technique: Name 5 things you can see, 4 things you can touch, 3 things you can hear, 2 things you can smell, and 1 thing you can taste. This can help bring you back to the present moment.";

const HAPPY: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Walking on Sunshine by Katrina and The Waves",
        description: "An upbeat classic to amplify your positive mood",
    },
    movie: Item {
        title: "La La Land",
        description: "A colorful musical celebration of joy and dreams",
    },
    book: Item {
        title: "The Alchemist by Paulo Coelho",
        description: "An inspiring tale about following your dreams",
    },
    destination: Item {
        title: "Local Park or Garden",
        description: "Enjoy the sunshine and natural beauty around you",
    },
    mindful_activity: "Try a gratitude journal: Write down 3 things you're grateful for today. This can help maintain your positive momentum.",
    emergency_support: None,
    meditation_script: "Welcome to your happiness meditation. Find a comfortable position and gently close your eyes. Take a deep breath in... and slowly exhale. Notice the joy that's present within you right now. With each breath, let that joy expand through your entire body. Imagine a warm, golden light filling your chest and spreading to your limbs. This is your natural state of happiness. As you breathe, silently repeat to yourself: 'I welcome joy, I am grateful.' Take a moment to recall something that brought you happiness today, no matter how small. Feel that moment again. When you're ready, gently open your eyes, carrying this feeling of joy with you.",
};

const SAD: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Clair de Lune by Claude Debussy",
        description: "A gentle, soothing piano piece to comfort you",
    },
    movie: Item {
        title: "Inside Out",
        description: "A thoughtful exploration of emotions and their importance",
    },
    book: Item {
        title: "The Little Prince by Antoine de Saint-Exupéry",
        description: "A heartwarming story with profound insights",
    },
    destination: Item {
        title: "Cozy Local Café",
        description: "A warm environment to enjoy a soothing cup of tea",
    },
    mindful_activity: "Try a 5-minute deep breathing exercise: Inhale for 4 seconds, hold for 2, and exhale for 6. This can help calm your nervous system and create space for healing.",
    emergency_support: Some("If you're feeling overwhelmed, consider reaching out to 1-800-273-8255 (US National Suicide Prevention Lifeline). Remember that it's okay to ask for help."),
    meditation_script: "Welcome to your compassion meditation. Find a comfortable position and let your eyes gently close. Take a slow breath in... and release it fully. Place a hand over your heart and feel its steady rhythm. Acknowledge any sadness you're experiencing without judgment. All emotions are valid messengers. As you breathe, imagine each exhale carrying away a small piece of heaviness. With each inhale, visualize yourself surrounded by a soft, blue healing light. Say to yourself gently: 'May I be kind to myself in this moment.' Remember that this feeling, like all feelings, will eventually pass. You are not alone in experiencing sadness. When you're ready, slowly open your eyes, knowing you've given yourself this moment of care.",
};

const ANGRY: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Weightless by Marconi Union",
        description: "Scientifically designed to reduce stress and anxiety",
    },
    movie: Item {
        title: "The Secret Life of Walter Mitty",
        description: "An uplifting adventure about escaping daily frustrations",
    },
    book: Item {
        title: "Practicing Peace in Times of War by Pema Chödrön",
        description: "Insights on transforming anger into understanding",
    },
    destination: Item {
        title: "Local Nature Trail",
        description: "A quiet place to walk and process your thoughts",
    },
    mindful_activity: GROUNDING_ACTIVITY,
    emergency_support: Some("If you're feeling overwhelmed by anger, consider stepping away from the situation temporarily or calling a trusted friend. For immediate support, text HOME to 741741 to reach the Crisis Text Line."),
    meditation_script: "Welcome to your calming meditation. Find a position where you feel stable and grounded. Take a deep breath in... and exhale completely. Notice any tension you might be holding, particularly in your jaw, shoulders, or hands. With each exhale, release that tension. Visualize a peaceful scene, perhaps waves gently meeting the shore. As thoughts arise, acknowledge them without judgment, then return to your breath. Place your awareness on your feet or sitting bones, feeling the solid support beneath you. Say to yourself: 'I am safe, I am grounded.' Continue breathing deeply, allowing your heart rate to slow. When ready, gently open your eyes, carrying this sense of calm with you.",
};

const ANXIOUS: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Weightless by Marconi Union",
        description: "A calming track scientifically designed to reduce anxiety",
    },
    movie: Item {
        title: "Paddington 2",
        description: "A gentle, reassuring story full of kindness",
    },
    book: Item {
        title: "The Power of Now by Eckhart Tolle",
        description: "A guide to stepping out of worry and into the present",
    },
    destination: Item {
        title: "Quiet Botanical Garden",
        description: "Slow paths and green spaces to settle a racing mind",
    },
    mindful_activity: GROUNDING_ACTIVITY,
    emergency_support: Some("Anxiety can be overwhelming. If it becomes too much, text HOME to 741741 to reach the Crisis Text Line, or call 1-800-273-8255. You don't have to face it alone."),
    meditation_script: "Welcome to your grounding meditation. Sit somewhere you feel supported and let your feet rest flat on the floor. Breathe in slowly for a count of four... and out for a count of six. Feel the weight of your body held by the chair and the ground. If worries appear, picture them as clouds drifting across the sky. You can notice them and let them pass. Now name, silently, five things you can see, four things you can feel, three things you can hear. With every exhale, let your shoulders soften a little more. Say to yourself: 'Right now, in this moment, I am okay.' When you're ready, open your eyes and bring this steadiness with you.",
};

const STRESSED: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Horizon Variations by Max Richter",
        description: "Minimalist composition to reduce stress levels",
    },
    movie: Item {
        title: "My Neighbor Totoro",
        description: "A slow, gentle film that invites you to breathe",
    },
    book: Item {
        title: "Burnout by Emily Nagoski and Amelia Nagoski",
        description: "Practical ways to complete the stress cycle",
    },
    destination: Item {
        title: "Quiet Riverside Walk",
        description: "Moving water and open air to loosen tension",
    },
    mindful_activity: "Try box breathing: Inhale for 4 seconds, hold for 4, exhale for 4, and hold for 4 again. Repeat four rounds. This can help your body shift out of stress mode.",
    emergency_support: Some("Chronic stress can affect your wellbeing. If you're struggling, reach out to someone you trust, or text HOME to 741741 to reach the Crisis Text Line."),
    meditation_script: "Welcome to your stress relief meditation. Settle into a comfortable position and let your eyes close. Take a deep breath in through your nose... and let it out through your mouth with a sigh. Scan your body from the top of your head down to your toes, noticing where you hold pressure. Breathe into each of those places and imagine them loosening like a knot coming undone. You don't have to solve everything right now. For these few minutes, your only task is to breathe. Say to yourself: 'One thing at a time. I am doing enough.' When you're ready, gently open your eyes and return at your own pace.",
};

const CALM: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Experience by Ludovico Einaudi",
        description: "Serene piano composition to enhance your peaceful state",
    },
    movie: Item {
        title: "Paterson",
        description: "A quiet film about finding poetry in everyday routines",
    },
    book: Item {
        title: "Wherever You Go, There You Are by Jon Kabat-Zinn",
        description: "Short reflections to deepen everyday mindfulness",
    },
    destination: Item {
        title: "Lakeside at Sunset",
        description: "Still water and soft light to savor your calm",
    },
    mindful_activity: "Try a slow body scan: Starting at your toes, move your attention upward, noticing each area without trying to change anything. This can help you anchor this sense of calm.",
    emergency_support: None,
    meditation_script: "Welcome to your peaceful presence meditation. Rest in a comfortable position and let your eyes close softly. Breathe naturally and notice the calm that is already here. Feel the gentle rise and fall of your breath, like a tide. Let this stillness spread from your chest into your arms and legs. There is nothing to do and nowhere to be. Silently repeat: 'I am at ease, I am present.' Take a few more breaths in this quiet space. When you're ready, open your eyes, keeping this calm close to you.",
};

const NEUTRAL: BundleTemplate = BundleTemplate {
    music: Item {
        title: "Gymnopédie No.1 by Erik Satie",
        description: "A peaceful, contemplative piano piece to inspire reflection",
    },
    movie: Item {
        title: "Soul",
        description: "A beautiful exploration of purpose and appreciation for life",
    },
    book: Item {
        title: "Essentialism by Greg McKeown",
        description: "Insights on focusing on what truly matters",
    },
    destination: Item {
        title: "Local Bookstore or Library",
        description: "A quiet place to discover new ideas and perspectives",
    },
    mindful_activity: "Try a mindful observation exercise: Choose an object and spend 2 minutes examining it as if seeing it for the first time. Notice its colors, textures, and details. This can help cultivate present-moment awareness.",
    emergency_support: None,
    meditation_script: "Welcome to your mindfulness meditation. Find a comfortable seated position and allow your eyes to softly close. Begin with three deep breaths... in through your nose... and out through your mouth. Now let your breathing return to its natural rhythm. Bring your attention to the sensation of your breath, perhaps at your nostrils, chest, or abdomen. When your mind wanders, gently guide it back to your breath without judgment. Each moment is an opportunity to begin again. Notice the quality of your awareness right now, not trying to change anything, just observing. As you continue breathing, silently note 'in' with each inhale and 'out' with each exhale. When you're ready, slowly open your eyes, carrying this awareness into the rest of your day.",
};

fn template_for(mood: Mood) -> &'static BundleTemplate {
    match mood {
        Mood::Happy => &HAPPY,
        Mood::Sad => &SAD,
        Mood::Angry => &ANGRY,
        Mood::Anxious => &ANXIOUS,
        Mood::Stressed => &STRESSED,
        Mood::Calm => &CALM,
        Mood::Neutral | Mood::Unknown => &NEUTRAL,
    }
}

impl Item {
    fn to_recommendation(&self, kind: RecommendationKind) -> Recommendation {
        Recommendation {
            kind,
            title: self.title.to_string(),
            description: self.description.to_string(),
            spotify_id: None,
        }
    }
}

/// Static bundle for a mood. Moods without their own entry use the neutral bundle.
pub fn bundle_for(mood: Mood) -> RecommendationBundle {
    let t = template_for(mood);
    RecommendationBundle {
        music: t.music.to_recommendation(RecommendationKind::Music),
        movie: t.movie.to_recommendation(RecommendationKind::Movie),
        book: t.book.to_recommendation(RecommendationKind::Book),
        destination: t.destination.to_recommendation(RecommendationKind::Destination),
        mindful_activity: t.mindful_activity.to_string(),
        emergency_support: t.emergency_support.map(str::to_string),
        meditation_script: t.meditation_script.to_string(),
    }
}
