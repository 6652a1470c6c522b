//! Typed access to channel-specific data

use crate::activity::Activity;
use crate::error::ActivityError;
use serde::de::DeserializeOwned;
use tracing::debug;

impl Activity {
    /// Coerce `channel_data` into `T`.
    ///
    /// `Ok(None)` when there is no channel data; an error when it does not fit
    /// the requested shape.
    pub fn get_channel_data<T>(&self) -> Result<Option<T>, ActivityError>
    where
        T: DeserializeOwned,
    {
        self.channel_data
            .as_ref()
            .map(|data| T::deserialize(data).map_err(ActivityError::ChannelData))
            .transpose()
    }

    /// Like [`Activity::get_channel_data`], but `None` on absence or mismatch
    pub fn try_get_channel_data<T>(&self) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.get_channel_data() {
            Ok(data) => data,
            Err(e) => {
                debug!("Channel data not coercible: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityType;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct TeamsChannelData {
        tenant: Tenant,
        #[serde(default)]
        event_type: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tenant {
        id: String,
    }

    fn with_channel_data(data: Value) -> Activity {
        let mut activity = Activity::new(ActivityType::Message);
        activity.channel_data = Some(data);
        activity
    }

    #[test]
    fn test_get_channel_data_typed() {
        let activity = with_channel_data(json!({
            "tenant": {"id": "t1"},
            "eventType": "teamMemberAdded",
            "other": true
        }));

        let data: TeamsChannelData = activity.get_channel_data().unwrap().unwrap();
        assert_eq!(data.tenant.id, "t1");
        assert_eq!(data.event_type.as_deref(), Some("teamMemberAdded"));
    }

    #[test]
    fn test_get_channel_data_as_value_is_unchanged() {
        let raw = json!({"anything": [1, "two"]});
        let activity = with_channel_data(raw.clone());
        assert_eq!(activity.get_channel_data::<Value>().unwrap(), Some(raw));
    }

    #[test]
    fn test_absent_channel_data() {
        let activity = Activity::new(ActivityType::Message);
        assert!(activity
            .get_channel_data::<TeamsChannelData>()
            .unwrap()
            .is_none());
        assert!(activity.try_get_channel_data::<TeamsChannelData>().is_none());
    }

    #[test]
    fn test_mismatched_channel_data() {
        let activity = with_channel_data(json!({"tenant": "not-an-object"}));
        assert!(matches!(
            activity.get_channel_data::<TeamsChannelData>(),
            Err(ActivityError::ChannelData(_))
        ));
        assert!(activity.try_get_channel_data::<TeamsChannelData>().is_none());
    }
}
