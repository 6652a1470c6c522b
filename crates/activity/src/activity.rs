//! Activity envelope - the superset wire type for every conversational event

use crate::error::ActivityError;
use crate::types::{matches_variant, normalize_type, ActivityType};
use chrono::{DateTime, FixedOffset, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

/// Media type for an activity carried over HTTP
pub const CONTENT_TYPE: &str = "application/vnd.microsoft.activity";

/// Wire names of every named attribute on [`Activity`].
///
/// Extension bag entries under these keys are never emitted.
pub const NAMED_FIELDS: &[&str] = &[
    "type",
    "id",
    "timestamp",
    "localTimestamp",
    "serviceUrl",
    "channelId",
    "from",
    "recipient",
    "conversation",
    "replyToId",
    "locale",
    "text",
    "summary",
    "textFormat",
    "attachmentLayout",
    "speak",
    "inputHint",
    "action",
    "topicName",
    "historyDisclosed",
    "name",
    "value",
    "relatesTo",
    "code",
    "attachments",
    "entities",
    "membersAdded",
    "membersRemoved",
    "reactionsAdded",
    "reactionsRemoved",
    "channelData",
];

/// One protocol message of any kind.
///
/// Holds every field any variant may carry. Fields the model does not name
/// are kept in `properties` and written back out on encode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Type tag, see [`ActivityType`]
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Sent time, UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Sent time in the sender's local offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_timestamp: Option<DateTime<FixedOffset>>,
    /// Endpoint replies must be posted back to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    // Content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// "markdown", "plain" or "xml"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,
    /// "list" or "carousel"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_layout: Option<String>,
    /// Spoken form of the text (SSML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_hint: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachments: Vec<Attachment>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub entities: Vec<Entity>,
    /// Channel-specific payload, opaque to this crate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<Value>,

    // Variant-specific
    /// "add" or "remove" on contactRelationUpdate / installationUpdate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_disclosed: Option<bool>,
    /// Event or invoke operation name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<Value>,
    /// endOfConversation reason code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub members_added: Vec<ChannelAccount>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub members_removed: Vec<ChannelAccount>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reactions_added: Vec<MessageReaction>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reactions_removed: Vec<MessageReaction>,

    /// Every top-level field not named above
    #[serde(flatten)]
    pub properties: ExtensionData,
}

impl Activity {
    /// Empty activity of the given kind
    pub fn new(activity_type: ActivityType) -> Self {
        Self {
            activity_type: activity_type.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Decode an activity from JSON text
    pub fn from_json(json: &str) -> Result<Self, ActivityError> {
        serde_json::from_str(json).map_err(ActivityError::Decode)
    }

    /// Decode an activity from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ActivityError> {
        serde_json::from_slice(bytes).map_err(ActivityError::Decode)
    }

    /// Encode to compact JSON text
    pub fn to_json(&self) -> Result<String, ActivityError> {
        serde_json::to_string(self).map_err(ActivityError::Encode)
    }

    /// Encode to a JSON value
    pub fn to_value(&self) -> Result<Value, ActivityError> {
        serde_json::to_value(self).map_err(ActivityError::Encode)
    }

    /// Type tag in normalized form
    pub fn normalized_type(&self) -> String {
        normalize_type(&self.activity_type)
    }

    /// True if this activity's primary type segment is `activity_type`
    pub fn is_activity(&self, activity_type: ActivityType) -> bool {
        matches_variant(&self.activity_type, activity_type)
    }
}

/// Sender, recipient or member of a conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    /// Channel-scoped identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Conversation an activity belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// More than two participants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
}

/// File, card or media attached to an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// MIME type of the content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    /// Inline content, e.g. a card body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Typed, open metadata object attached to an activity (mention, place, ...)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entity {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Remaining entity fields
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Serialize for Entity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // the declared type owns the "type" key
        let mut map = serializer.serialize_map(None)?;
        if let Some(entity_type) = &self.entity_type {
            map.serialize_entry("type", entity_type)?;
        }
        for (key, value) in self.properties.iter() {
            if key != "type" {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl Entity {
    /// True if the declared entity type equals `entity_type`, ignoring case
    pub fn is_type(&self, entity_type: &str) -> bool {
        self.entity_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(entity_type))
    }
}

/// Reaction marker on messageReaction activities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReaction {
    /// Reaction kind, e.g. "like"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
}

/// Extension bag for top-level fields the model does not name
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ExtensionData(Map<String, Value>);

impl ExtensionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ExtensionData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Deref for ExtensionData {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ExtensionData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Serialize for ExtensionData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // named attributes own their keys
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.0.iter() {
            if !NAMED_FIELDS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
