//! Activity type vocabulary and case-insensitive classification

use std::fmt;

/// Known activity type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Message,
    ContactRelationUpdate,
    ConversationUpdate,
    DeleteUserData,
    Typing,
    Ping,
    EndOfConversation,
    Event,
    InstallationUpdate,
    Invoke,
    MessageDelete,
    MessageReaction,
    MessageUpdate,
    Suggestion,
}

impl ActivityType {
    /// Every known tag, in classification order
    pub const ALL: [ActivityType; 14] = [
        ActivityType::Message,
        ActivityType::ContactRelationUpdate,
        ActivityType::ConversationUpdate,
        ActivityType::DeleteUserData,
        ActivityType::Typing,
        ActivityType::Ping,
        ActivityType::EndOfConversation,
        ActivityType::Event,
        ActivityType::InstallationUpdate,
        ActivityType::Invoke,
        ActivityType::MessageDelete,
        ActivityType::MessageReaction,
        ActivityType::MessageUpdate,
        ActivityType::Suggestion,
    ];

    /// Canonical wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Message => "message",
            ActivityType::ContactRelationUpdate => "contactRelationUpdate",
            ActivityType::ConversationUpdate => "conversationUpdate",
            ActivityType::DeleteUserData => "deleteUserData",
            ActivityType::Typing => "typing",
            ActivityType::Ping => "ping",
            ActivityType::EndOfConversation => "endOfConversation",
            ActivityType::Event => "event",
            ActivityType::InstallationUpdate => "installationUpdate",
            ActivityType::Invoke => "invoke",
            ActivityType::MessageDelete => "messageDelete",
            ActivityType::MessageReaction => "messageReaction",
            ActivityType::MessageUpdate => "messageUpdate",
            ActivityType::Suggestion => "suggestion",
        }
    }

    /// Look up a tag ignoring case. Subtype suffixes are not stripped here.
    pub fn parse(raw: &str) -> Option<ActivityType> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw type tag.
///
/// Known tags come back in canonical casing. Anything else keeps its text with
/// only the first character lower-cased, so unknown tags still round-trip.
pub fn normalize_type(raw: &str) -> String {
    if let Some(known) = ActivityType::parse(raw) {
        return known.as_str().to_string();
    }

    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Primary segment of a type tag (channels may append `/subtype`)
pub fn primary_segment(raw: &str) -> &str {
    raw.split('/').next().unwrap_or(raw)
}

/// True if the primary segment of `raw` equals `variant`, ignoring case
pub fn matches_variant(raw: &str, variant: ActivityType) -> bool {
    primary_segment(raw).eq_ignore_ascii_case(variant.as_str())
}
