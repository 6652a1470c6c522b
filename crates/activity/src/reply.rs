//! Reply construction and content checks

use crate::activity::{Activity, ChannelAccount, ConversationAccount};
use crate::error::ActivityError;
use crate::types::ActivityType;
use chrono::Utc;

impl Activity {
    /// Build a message that routes back to the sender of this activity.
    ///
    /// `from` and `recipient` are swapped, the channel and service endpoint
    /// are carried over, and `reply_to_id` points at this activity. Fails if
    /// this activity has no `from`, `recipient` or `conversation`.
    pub fn create_reply(
        &self,
        text: Option<&str>,
        locale: Option<&str>,
    ) -> Result<Activity, ActivityError> {
        let from = self
            .from
            .as_ref()
            .ok_or(ActivityError::MissingRouting("from"))?;
        let recipient = self
            .recipient
            .as_ref()
            .ok_or(ActivityError::MissingRouting("recipient"))?;
        let conversation = self
            .conversation
            .as_ref()
            .ok_or(ActivityError::MissingRouting("conversation"))?;

        let mut reply = Activity::new(ActivityType::Message);
        reply.timestamp = Some(Utc::now());
        reply.from = Some(ChannelAccount {
            id: recipient.id.clone(),
            name: recipient.name.clone(),
        });
        reply.recipient = Some(ChannelAccount {
            id: from.id.clone(),
            name: from.name.clone(),
        });
        reply.reply_to_id = self.id.clone();
        reply.service_url = self.service_url.clone();
        reply.channel_id = self.channel_id.clone();
        reply.conversation = Some(ConversationAccount {
            id: conversation.id.clone(),
            name: conversation.name.clone(),
            is_group: conversation.is_group,
        });
        reply.text = Some(text.unwrap_or_default().to_string());
        reply.locale = locale
            .map(str::to_string)
            .or_else(|| self.locale.clone());
        Ok(reply)
    }

    /// True if there is anything worth sending
    pub fn has_content(&self) -> bool {
        let non_blank = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.trim().is_empty());

        non_blank(&self.text)
            || non_blank(&self.summary)
            || !self.attachments.is_empty()
            || self.channel_data.is_some()
    }
}
