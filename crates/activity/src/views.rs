//! Variant views over an [`Activity`]
//!
//! Each view borrows the same activity and exposes only what that kind of
//! activity carries. `Activity::as_*` hands one out when the type tag matches
//! and `None` otherwise.

use crate::activity::{
    Activity, Attachment, ChannelAccount, ConversationAccount, Entity, ExtensionData,
    MessageReaction,
};
use crate::error::ActivityError;
use crate::mention::Mention;
use crate::types::ActivityType;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

macro_rules! activity_view {
    ($(#[$meta:meta])* $view:ident, $kind:expr, $as_fn:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $view<'a> {
            activity: &'a Activity,
        }

        impl<'a> $view<'a> {
            /// The kind this view narrows to
            pub const KIND: ActivityType = $kind;

            /// The underlying activity
            pub fn activity(&self) -> &'a Activity {
                self.activity
            }

            pub fn activity_type(&self) -> &'a str {
                &self.activity.activity_type
            }

            pub fn id(&self) -> Option<&'a str> {
                self.activity.id.as_deref()
            }

            pub fn timestamp(&self) -> Option<DateTime<Utc>> {
                self.activity.timestamp
            }

            pub fn local_timestamp(&self) -> Option<DateTime<FixedOffset>> {
                self.activity.local_timestamp
            }

            pub fn locale(&self) -> Option<&'a str> {
                self.activity.locale.as_deref()
            }

            pub fn service_url(&self) -> Option<&'a str> {
                self.activity.service_url.as_deref()
            }

            pub fn channel_id(&self) -> Option<&'a str> {
                self.activity.channel_id.as_deref()
            }

            pub fn from(&self) -> Option<&'a ChannelAccount> {
                self.activity.from.as_ref()
            }

            pub fn recipient(&self) -> Option<&'a ChannelAccount> {
                self.activity.recipient.as_ref()
            }

            pub fn conversation(&self) -> Option<&'a ConversationAccount> {
                self.activity.conversation.as_ref()
            }

            pub fn reply_to_id(&self) -> Option<&'a str> {
                self.activity.reply_to_id.as_deref()
            }

            pub fn channel_data(&self) -> Option<&'a Value> {
                self.activity.channel_data.as_ref()
            }

            pub fn entities(&self) -> &'a [Entity] {
                &self.activity.entities
            }

            pub fn properties(&self) -> &'a ExtensionData {
                &self.activity.properties
            }
        }

        impl Activity {
            #[doc = concat!("View as `", stringify!($view), "` if the type tag matches")]
            pub fn $as_fn(&self) -> Option<$view<'_>> {
                self.is_activity($kind).then_some($view { activity: self })
            }
        }
    };
}

// Message-like views share content accessors.
macro_rules! message_content {
    ($view:ident) => {
        impl<'a> $view<'a> {
            pub fn text(&self) -> Option<&'a str> {
                self.activity.text.as_deref()
            }

            pub fn summary(&self) -> Option<&'a str> {
                self.activity.summary.as_deref()
            }

            pub fn text_format(&self) -> Option<&'a str> {
                self.activity.text_format.as_deref()
            }

            pub fn attachment_layout(&self) -> Option<&'a str> {
                self.activity.attachment_layout.as_deref()
            }

            pub fn attachments(&self) -> &'a [Attachment] {
                &self.activity.attachments
            }

            pub fn speak(&self) -> Option<&'a str> {
                self.activity.speak.as_deref()
            }

            pub fn input_hint(&self) -> Option<&'a str> {
                self.activity.input_hint.as_deref()
            }

            pub fn value(&self) -> Option<&'a Value> {
                self.activity.value.as_ref()
            }

            pub fn has_content(&self) -> bool {
                self.activity.has_content()
            }

            pub fn mentions(&self) -> Result<Vec<Mention>, ActivityError> {
                self.activity.get_mentions()
            }

            pub fn mentions_id(&self, id: &str) -> Result<bool, ActivityError> {
                self.activity.mentions_id(id)
            }

            pub fn mentions_recipient(&self) -> Result<bool, ActivityError> {
                self.activity.mentions_recipient()
            }
        }
    };
}

// Operation views share name/value/relatesTo.
macro_rules! operation_content {
    ($view:ident) => {
        impl<'a> $view<'a> {
            pub fn name(&self) -> Option<&'a str> {
                self.activity.name.as_deref()
            }

            pub fn value(&self) -> Option<&'a Value> {
                self.activity.value.as_ref()
            }

            pub fn relates_to(&self) -> Option<&'a Value> {
                self.activity.relates_to.as_ref()
            }
        }
    };
}

macro_rules! membership_action {
    ($view:ident) => {
        impl<'a> $view<'a> {
            /// "add" or "remove"
            pub fn action(&self) -> Option<&'a str> {
                self.activity.action.as_deref()
            }
        }
    };
}

activity_view!(
    /// A user-visible message
    MessageActivity,
    ActivityType::Message,
    as_message_activity
);
message_content!(MessageActivity);

activity_view!(
    /// Edit of a previously sent message
    MessageUpdateActivity,
    ActivityType::MessageUpdate,
    as_message_update_activity
);
message_content!(MessageUpdateActivity);

activity_view!(
    /// Suggested message shown privately to one participant
    SuggestionActivity,
    ActivityType::Suggestion,
    as_suggestion_activity
);
message_content!(SuggestionActivity);

activity_view!(
    /// Deletion of a previously sent message
    MessageDeleteActivity,
    ActivityType::MessageDelete,
    as_message_delete_activity
);

activity_view!(
    /// Reactions added to or removed from a message
    MessageReactionActivity,
    ActivityType::MessageReaction,
    as_message_reaction_activity
);

impl<'a> MessageReactionActivity<'a> {
    pub fn reactions_added(&self) -> &'a [MessageReaction] {
        &self.activity.reactions_added
    }

    pub fn reactions_removed(&self) -> &'a [MessageReaction] {
        &self.activity.reactions_removed
    }
}

activity_view!(
    /// The bot was added to or removed from a contact list
    ContactRelationUpdateActivity,
    ActivityType::ContactRelationUpdate,
    as_contact_relation_update_activity
);
membership_action!(ContactRelationUpdateActivity);

activity_view!(
    /// The bot was installed into or removed from a team or tenant
    InstallationUpdateActivity,
    ActivityType::InstallationUpdate,
    as_installation_update_activity
);
membership_action!(InstallationUpdateActivity);

activity_view!(
    /// Membership or metadata of a conversation changed
    ConversationUpdateActivity,
    ActivityType::ConversationUpdate,
    as_conversation_update_activity
);

impl<'a> ConversationUpdateActivity<'a> {
    pub fn members_added(&self) -> &'a [ChannelAccount] {
        &self.activity.members_added
    }

    pub fn members_removed(&self) -> &'a [ChannelAccount] {
        &self.activity.members_removed
    }

    pub fn topic_name(&self) -> Option<&'a str> {
        self.activity.topic_name.as_deref()
    }

    pub fn history_disclosed(&self) -> Option<bool> {
        self.activity.history_disclosed
    }
}

activity_view!(
    /// A participant is typing
    TypingActivity,
    ActivityType::Typing,
    as_typing_activity
);

activity_view!(
    /// Liveness probe
    PingActivity,
    ActivityType::Ping,
    as_ping_activity
);

activity_view!(
    /// The conversation has ended
    EndOfConversationActivity,
    ActivityType::EndOfConversation,
    as_end_of_conversation_activity
);

impl<'a> EndOfConversationActivity<'a> {
    /// Reason the conversation ended
    pub fn code(&self) -> Option<&'a str> {
        self.activity.code.as_deref()
    }

    pub fn text(&self) -> Option<&'a str> {
        self.activity.text.as_deref()
    }
}

activity_view!(
    /// Asynchronous named event
    EventActivity,
    ActivityType::Event,
    as_event_activity
);
operation_content!(EventActivity);

activity_view!(
    /// Synchronous named operation expecting a response
    InvokeActivity,
    ActivityType::Invoke,
    as_invoke_activity
);
operation_content!(InvokeActivity);
