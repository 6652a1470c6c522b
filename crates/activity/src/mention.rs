//! Mention entities and mention text handling

use crate::activity::{Activity, ChannelAccount, Entity};
use crate::error::ActivityError;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Entity type tag for mentions
pub const MENTION_ENTITY: &str = "mention";

/// An account referenced in a message's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Account being mentioned
    pub mentioned: ChannelAccount,
    /// Literal span in the message text, e.g. "@bob"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Mention {
    pub fn new(mentioned: ChannelAccount, text: impl Into<String>) -> Self {
        Self {
            mentioned,
            text: Some(text.into()),
        }
    }

    /// Wrap as an entity for an activity's entity list
    pub fn to_entity(&self) -> Result<Entity, ActivityError> {
        let value = serde_json::to_value(self).map_err(ActivityError::Encode)?;
        let properties = match value {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Ok(Entity {
            entity_type: Some(MENTION_ENTITY.to_string()),
            properties,
        })
    }

    fn is_for(&self, id: &str) -> bool {
        self.mentioned.id.as_deref() == Some(id)
    }
}

impl Activity {
    /// Mentions declared in this activity's entities.
    ///
    /// A mention entity that does not decode is an error rather than skipped.
    pub fn get_mentions(&self) -> Result<Vec<Mention>, ActivityError> {
        self.entities
            .iter()
            .filter(|entity| entity.is_type(MENTION_ENTITY))
            .map(|entity| {
                serde_json::from_value::<Mention>(serde_json::Value::Object(
                    entity.properties.clone(),
                ))
                .map_err(ActivityError::Mention)
            })
            .collect()
    }

    /// True if any mention points at account `id`
    pub fn mentions_id(&self, id: &str) -> Result<bool, ActivityError> {
        Ok(self.get_mentions()?.iter().any(|m| m.is_for(id)))
    }

    /// True if any mention points at this activity's recipient
    pub fn mentions_recipient(&self) -> Result<bool, ActivityError> {
        let id = self.recipient_id()?;
        self.mentions_id(&id)
    }

    /// Strip the text of every mention of `id` from `text`.
    ///
    /// Each mention removes the first case-insensitive occurrence of its
    /// literal span. Returns the updated text.
    pub fn remove_mention_text(&mut self, id: &str) -> Result<String, ActivityError> {
        let mentions = self.get_mentions()?;

        let Some(text) = self.text.as_mut() else {
            return Ok(String::new());
        };

        for mention in mentions.iter().filter(|m| m.is_for(id)) {
            let Some(span) = mention.text.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            let matcher = RegexBuilder::new(&regex::escape(span))
                .case_insensitive(true)
                .build()?;
            let stripped = matcher.replacen(text.as_str(), 1, "").into_owned();
            if stripped.len() != text.len() {
                debug!("Removed mention {:?} of {}", span, id);
            }
            *text = stripped;
        }

        Ok(text.clone())
    }

    /// Strip mentions of this activity's recipient from `text`
    pub fn remove_recipient_mention(&mut self) -> Result<String, ActivityError> {
        let id = self.recipient_id()?;
        self.remove_mention_text(&id)
    }

    fn recipient_id(&self) -> Result<String, ActivityError> {
        self.recipient
            .as_ref()
            .and_then(|r| r.id.clone())
            .ok_or(ActivityError::MissingRouting("recipient"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityType;
    use serde_json::json;

    fn message(text: &str, entities: serde_json::Value) -> Activity {
        serde_json::from_value(json!({
            "type": "message",
            "text": text,
            "recipient": {"id": "bot1"},
            "entities": entities
        }))
        .unwrap()
    }

    #[test]
    fn test_get_mentions_and_remove() {
        let mut activity = message(
            "hello @bob",
            json!([{"type": "mention", "mentioned": {"id": "u1"}, "text": "@bob"}]),
        );

        let mentions = activity.get_mentions().unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].mentioned.id.as_deref(), Some("u1"));

        assert_eq!(activity.remove_mention_text("u1").unwrap(), "hello ");
        assert_eq!(activity.text.as_deref(), Some("hello "));
    }

    #[test]
    fn test_mentions_ignore_other_entities() {
        let activity = message(
            "hi",
            json!([
                {"type": "clientInfo", "locale": "en-US"},
                {"type": "MENTION", "mentioned": {"id": "u2"}, "text": "@sam"}
            ]),
        );
        let mentions = activity.get_mentions().unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].text.as_deref(), Some("@sam"));
        assert!(Activity::new(ActivityType::Message)
            .get_mentions()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_malformed_mention_is_an_error() {
        let activity = message("hi", json!([{"type": "mention", "mentioned": "u1"}]));
        assert!(matches!(
            activity.get_mentions(),
            Err(ActivityError::Mention(_))
        ));
    }

    #[test]
    fn test_mentions_recipient() {
        let activity = message(
            "@Helper do it",
            json!([{"type": "mention", "mentioned": {"id": "bot1"}, "text": "@Helper"}]),
        );
        assert!(activity.mentions_recipient().unwrap());
        assert!(activity.mentions_id("bot1").unwrap());
        assert!(!activity.mentions_id("u1").unwrap());

        let other = message(
            "@bob hi",
            json!([{"type": "mention", "mentioned": {"id": "u1"}, "text": "@bob"}]),
        );
        assert!(!other.mentions_recipient().unwrap());

        let mut no_recipient = other.clone();
        no_recipient.recipient = None;
        assert!(matches!(
            no_recipient.mentions_recipient(),
            Err(ActivityError::MissingRouting("recipient"))
        ));
    }

    #[test]
    fn test_remove_is_case_insensitive_and_literal() {
        let mut activity = message(
            "ping <AT>Bot (v2)*</AT> now",
            json!([{"type": "mention", "mentioned": {"id": "bot1"}, "text": "<at>bot (v2)*</at>"}]),
        );
        assert_eq!(activity.remove_recipient_mention().unwrap(), "ping  now");
    }

    #[test]
    fn test_each_mention_removes_one_occurrence() {
        let mut activity = message(
            "@bob and @bob and @bob",
            json!([
                {"type": "mention", "mentioned": {"id": "u1"}, "text": "@bob"},
                {"type": "mention", "mentioned": {"id": "u1"}, "text": "@bob"}
            ]),
        );
        assert_eq!(activity.remove_mention_text("u1").unwrap(), " and  and @bob");
    }

    #[test]
    fn test_remove_leaves_other_ids_and_missing_text() {
        let mut activity = message(
            "@bob @sam",
            json!([
                {"type": "mention", "mentioned": {"id": "u1"}, "text": "@bob"},
                {"type": "mention", "mentioned": {"id": "u2"}}
            ]),
        );
        assert_eq!(activity.remove_mention_text("u2").unwrap(), "@bob @sam");

        let mut empty = Activity::new(ActivityType::Message);
        assert_eq!(empty.remove_mention_text("u1").unwrap(), "");
        assert_eq!(empty.text, None);
    }

    #[test]
    fn test_mention_to_entity() {
        let mention = Mention::new(ChannelAccount::new("u1").with_name("Bob"), "@Bob");
        let mut activity = Activity::new(ActivityType::Message);
        activity.entities.push(mention.to_entity().unwrap());

        assert_eq!(activity.get_mentions().unwrap(), vec![mention]);
    }
}
