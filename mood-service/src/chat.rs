//! Canned chat replies selected by keyword.
//!
//! [`TOPIC_RULES`] is checked in order against the lower-cased message and the
//! first rule with a contained keyword decides the reply. Some replies name a
//! movie from the current recommendations (the first one carrying one of the
//! rule's genres) and fall back to a fixed sentence when none qualifies.
//! Messages that match no rule get one of [`GENERIC_REPLIES`], chosen
//! uniformly through the injected [`RandomSource`].

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::{
    models::Movie,
    random::{RandomSource, ThreadRandom},
};

/// Placeholder replaced by the chosen movie's title
pub const TITLE_PLACEHOLDER: &str = "{title}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Family,
    Streaming,
    Comedy,
    Emotional,
    MoreOptions,
    Gratitude,
}

#[derive(Debug, Clone, Copy)]
pub enum ReplyTemplate {
    Fixed(&'static str),
    /// Names the first recommendation tagged with any of `genres`
    NameFirstTagged {
        genres: &'static [&'static str],
        found: &'static str,
        otherwise: &'static str,
    },
}

impl ReplyTemplate {
    pub fn render(&self, recommendations: &[Movie]) -> String {
        match self {
            ReplyTemplate::Fixed(text) => text.to_string(),
            ReplyTemplate::NameFirstTagged {
                genres,
                found,
                otherwise,
            } => match recommendations.iter().find(|movie| movie.has_any_genre(genres)) {
                Some(movie) => found.replace(TITLE_PLACEHOLDER, &movie.title),
                None => otherwise.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
    pub reply: ReplyTemplate,
}

pub const FAMILY_FOUND_REPLY: &str = "Great question! From your recommendations, \"{title}\" is perfect for kids and families. It's rated highly and has wholesome content that both kids and adults will enjoy. The other movies might be better suited for older audiences. 👨‍👩‍👧‍👦";
pub const FAMILY_DISCLAIMER_REPLY: &str = "Most of these movies are suitable for older teens and adults, but I'd recommend checking the specific ratings to be sure they match what you're comfortable with for younger viewers. 🎬";
pub const STREAMING_REPLY: &str = "That's a great question! Availability changes often, but you can typically find these movies on various streaming platforms like Netflix, Amazon Prime, Disney+, or Hulu. I'd recommend checking JustWatch or your streaming service's search to see what's currently available in your region. 📺";
pub const COMEDY_FOUND_REPLY: &str = "If you're looking for laughs, \"{title}\" is your best bet from these recommendations! It's got great comedic moments while still fitting your current mood. The humor is clever and heartwarming. 😄";
pub const COMEDY_LIGHTER_REPLY: &str = "While these movies weren't specifically chosen for comedy, they each have their own charm and lighter moments that should lift your spirits in different ways! 😊";
pub const EMOTIONAL_REPLY: &str = "I understand you might be looking for something emotionally resonant. These movies were chosen to match your mood - some might make you feel understood, others might help lift you up. Sometimes a good cry can be really healing, and these films handle emotions with care and wisdom. 💙";
pub const MORE_OPTIONS_REPLY: &str = "I'd love to suggest more movies! If you tell me what specific elements you're looking for (maybe a different genre, time period, or emotional tone), I can tailor new recommendations. Or feel free to share how your mood has shifted - I'm here to help you find exactly what you need right now. ✨";
pub const GRATITUDE_REPLY: &str = "You're so welcome! I'm thrilled I could help you find something that feels right for how you're feeling. Movies have this amazing power to meet us exactly where we are emotionally. Enjoy your viewing, and feel free to come back anytime you need new recommendations! 🌟";

/// Substituted when producing a reply fails
pub const APOLOGY_REPLY: &str = "I'm sorry, I had trouble processing that. Could you try asking in a different way? I'm here to help! 😊";

pub const TOPIC_RULES: [TopicRule; 6] = [
    TopicRule {
        topic: Topic::Family,
        keywords: &["kid", "child", "family"],
        reply: ReplyTemplate::NameFirstTagged {
            genres: &["Family", "Animation"],
            found: FAMILY_FOUND_REPLY,
            otherwise: FAMILY_DISCLAIMER_REPLY,
        },
    },
    TopicRule {
        topic: Topic::Streaming,
        keywords: &["netflix", "streaming", "watch", "where"],
        reply: ReplyTemplate::Fixed(STREAMING_REPLY),
    },
    TopicRule {
        topic: Topic::Comedy,
        keywords: &["comedy", "funny", "laugh"],
        reply: ReplyTemplate::NameFirstTagged {
            genres: &["Comedy"],
            found: COMEDY_FOUND_REPLY,
            otherwise: COMEDY_LIGHTER_REPLY,
        },
    },
    TopicRule {
        topic: Topic::Emotional,
        keywords: &["sad", "cry", "emotional"],
        reply: ReplyTemplate::Fixed(EMOTIONAL_REPLY),
    },
    TopicRule {
        topic: Topic::MoreOptions,
        keywords: &["more", "other", "different"],
        reply: ReplyTemplate::Fixed(MORE_OPTIONS_REPLY),
    },
    TopicRule {
        topic: Topic::Gratitude,
        keywords: &["thank", "great", "perfect"],
        reply: ReplyTemplate::Fixed(GRATITUDE_REPLY),
    },
];

pub const GENERIC_REPLIES: [&str; 3] = [
    "That's a thoughtful question! These movies were carefully chosen to match your emotional needs right now. Each one offers something special - whether it's comfort, inspiration, or just a good story to get lost in. What specifically interests you most about them? 🎭",
    "I love that you're curious about these recommendations! Movies can be such personal experiences, and I tried to pick ones that would resonate with how you're feeling. Is there a particular aspect of any of these films you'd like to know more about? 🎬",
    "Great question! I'm here to help you make the perfect choice for your movie night. These recommendations were tailored specifically for your current mood, so each one should offer something meaningful for you right now. What would help you decide? 🍿",
];

/// Picks canned replies for chat messages
#[derive(Clone)]
pub struct ChatResponder {
    random: Arc<dyn RandomSource>,
}

impl ChatResponder {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// First topic whose keyword appears in `message`
    pub fn classify(&self, message: &str) -> Option<&'static TopicRule> {
        let message = message.to_lowercase();
        TOPIC_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| message.contains(keyword)))
    }

    /// Reply to `message` given the movies currently recommended. Never empty.
    pub fn respond(&self, message: &str, recommendations: &[Movie]) -> String {
        match self.classify(message) {
            Some(rule) => {
                debug!(topic = ?rule.topic, "Chat topic matched");
                rule.reply.render(recommendations)
            }
            None => {
                let index = self.random.index(GENERIC_REPLIES.len());
                debug!(index, "No chat topic matched, using generic reply");
                GENERIC_REPLIES[index].to_string()
            }
        }
    }
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}
