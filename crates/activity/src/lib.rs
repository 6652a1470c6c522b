//! Activity envelope model for conversational agents
//!
//! This crate contains:
//! - The `Activity` superset type with a lossless extension bag
//! - Case-insensitive type tag classification
//! - Borrowed per-variant views (`as_message_activity`, ...)
//! - Reply derivation, mention extraction and typed channel data

pub mod activity;
pub mod channel_data;
pub mod error;
pub mod mention;
pub mod reply;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use activity::{
    Activity, Attachment, ChannelAccount, ConversationAccount, Entity, ExtensionData,
    MessageReaction, CONTENT_TYPE,
};
pub use error::ActivityError;
pub use mention::Mention;
pub use types::{matches_variant, normalize_type, ActivityType};
pub use views::{
    ContactRelationUpdateActivity, ConversationUpdateActivity, EndOfConversationActivity,
    EventActivity, InstallationUpdateActivity, InvokeActivity, MessageActivity,
    MessageDeleteActivity, MessageReactionActivity, MessageUpdateActivity, PingActivity,
    SuggestionActivity, TypingActivity,
};
