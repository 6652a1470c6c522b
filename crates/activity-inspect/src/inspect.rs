//! Per-activity inspection and reply derivation

use activity::{Activity, ActivityError, ActivityType};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

/// What to do with each inbound activity
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    pub reply_text: Option<String>,
    pub reply_locale: Option<String>,
    pub strip_recipient_mention: bool,
}

/// Outcome of inspecting one activity
#[derive(Debug)]
pub struct Report {
    pub normalized_type: String,
    /// Variant whose view matched, if any
    pub variant: Option<ActivityType>,
    pub mentions: usize,
    pub mentions_recipient: bool,
    pub has_content: bool,
    pub reply: Option<Activity>,
}

/// Counters for one run over an input stream
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: u64,
    pub replies: u64,
    pub skipped: u64,
}

/// Variant view matching this activity's tag
pub fn matched_variant(activity: &Activity) -> Option<ActivityType> {
    ActivityType::ALL
        .into_iter()
        .filter(|t| *t != ActivityType::DeleteUserData)
        .find(|t| activity.is_activity(*t))
}

/// Message, messageUpdate or suggestion
fn is_message_like(activity: &Activity) -> bool {
    activity.as_message_activity().is_some()
        || activity.as_message_update_activity().is_some()
        || activity.as_suggestion_activity().is_some()
}

/// Classify `activity`, optionally strip recipient mentions, and derive a reply
pub fn inspect(
    activity: &mut Activity,
    options: &InspectOptions,
) -> Result<Report, ActivityError> {
    let normalized_type = activity.normalized_type();
    let variant = matched_variant(activity);

    let mut mentions = 0;
    let mut mentions_recipient = false;
    if is_message_like(activity) {
        mentions = activity.get_mentions()?.len();
        let has_recipient = activity
            .recipient
            .as_ref()
            .is_some_and(|r| r.id.is_some());
        mentions_recipient = has_recipient && activity.mentions_recipient()?;
    }

    if options.strip_recipient_mention && mentions_recipient {
        let text = activity.remove_recipient_mention()?;
        debug!("Stripped recipient mention, text now {:?}", text);
    }

    let has_content = activity.has_content();

    let reply = match (&options.reply_text, activity.as_message_activity()) {
        (Some(text), Some(_)) => Some(activity.create_reply(
            Some(text.as_str()),
            options.reply_locale.as_deref(),
        )?),
        _ => None,
    };

    Ok(Report {
        normalized_type,
        variant,
        mentions,
        mentions_recipient,
        has_content,
        reply,
    })
}

/// Inspect every JSON line of `input`, writing replies to `output`.
///
/// Lines that are not valid activities (including invalid UTF-8) are logged
/// and skipped. Only I/O failures end the run.
pub async fn run<R, W>(
    input: R,
    output: &mut W,
    options: &InspectOptions,
) -> anyhow::Result<Summary>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).split(b'\n');
    let mut summary = Summary::default();

    while let Some(line) = lines.next_segment().await? {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let mut activity = match Activity::from_slice(&line) {
            Ok(a) => a,
            Err(e) => {
                warn!("Failed to parse activity: {}", e);
                summary.skipped += 1;
                continue;
            }
        };

        let report = match inspect(&mut activity, options) {
            Ok(r) => r,
            Err(e) => {
                error!(
                    "Failed to inspect activity {}: {}",
                    activity.id.as_deref().unwrap_or("-"),
                    e
                );
                summary.skipped += 1;
                continue;
            }
        };
        summary.processed += 1;

        info!(
            "Activity: id={}, type={}, variant={}, mentions={}, mentions_recipient={}, has_content={}",
            activity.id.as_deref().unwrap_or("-"),
            report.normalized_type,
            report.variant.map(|v| v.as_str()).unwrap_or("none"),
            report.mentions,
            report.mentions_recipient,
            report.has_content
        );

        if let Some(reply) = report.reply {
            let json_line = reply.to_json()?;
            output.write_all(json_line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            summary.replies += 1;
        }
    }

    output.flush().await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn message() -> Activity {
        serde_json::from_value(json!({
            "type": "Message",
            "id": "m1",
            "serviceUrl": "https://x",
            "channelId": "test",
            "from": {"id": "u1"},
            "recipient": {"id": "bot1"},
            "conversation": {"id": "c1"},
            "text": "@Helper status please",
            "entities": [{"type": "mention", "mentioned": {"id": "bot1"}, "text": "@Helper"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_inspect_message_with_reply() {
        let mut activity = message();
        let options = InspectOptions {
            reply_text: Some("on it".to_string()),
            reply_locale: None,
            strip_recipient_mention: true,
        };

        let report = inspect(&mut activity, &options).unwrap();

        assert_eq!(report.normalized_type, "message");
        assert_eq!(report.variant, Some(ActivityType::Message));
        assert_eq!(report.mentions, 1);
        assert!(report.mentions_recipient);
        assert!(report.has_content);
        assert_eq!(activity.text.as_deref(), Some(" status please"));

        let reply = report.reply.unwrap();
        assert_eq!(reply.reply_to_id.as_deref(), Some("m1"));
        assert_eq!(reply.recipient.unwrap().id.as_deref(), Some("u1"));
        assert_eq!(reply.text.as_deref(), Some("on it"));
    }

    #[test]
    fn test_inspect_non_message_has_no_reply() {
        let mut activity: Activity = serde_json::from_value(json!({
            "type": "Typing",
            "from": {"id": "u1"}
        }))
        .unwrap();
        let options = InspectOptions {
            reply_text: Some("hi".to_string()),
            ..InspectOptions::default()
        };

        let report = inspect(&mut activity, &options).unwrap();
        assert_eq!(report.normalized_type, "typing");
        assert_eq!(report.variant, Some(ActivityType::Typing));
        assert!(!report.has_content);
        assert!(report.reply.is_none());
    }

    #[test]
    fn test_inspect_unknown_type() {
        let mut activity: Activity =
            serde_json::from_value(json!({"type": "CustomFooBar"})).unwrap();
        let report = inspect(&mut activity, &InspectOptions::default()).unwrap();
        assert_eq!(report.normalized_type, "customFooBar");
        assert_eq!(report.variant, None);
    }

    #[test]
    fn test_inspect_reply_needs_routing() {
        let mut activity = message();
        activity.conversation = None;
        let options = InspectOptions {
            reply_text: Some("hi".to_string()),
            ..InspectOptions::default()
        };
        assert!(matches!(
            inspect(&mut activity, &options),
            Err(ActivityError::MissingRouting("conversation"))
        ));
    }

    #[test]
    fn test_inspect_counts_mentions_on_message_update() {
        let mut activity = message();
        activity.activity_type = "messageUpdate".to_string();
        let options = InspectOptions {
            reply_text: Some("hi".to_string()),
            strip_recipient_mention: true,
            ..InspectOptions::default()
        };

        let report = inspect(&mut activity, &options).unwrap();
        assert_eq!(report.variant, Some(ActivityType::MessageUpdate));
        assert_eq!(report.mentions, 1);
        assert!(report.mentions_recipient);
        assert_eq!(activity.text.as_deref(), Some(" status please"));
        // replies are only derived for plain messages
        assert!(report.reply.is_none());
    }

    #[tokio::test]
    async fn test_run_skips_undecodable_lines() {
        let mut input = Vec::new();
        input.extend_from_slice(br#"{"type":"message","id":"a","from":{"id":"u1"},"recipient":{"id":"bot1"},"conversation":{"id":"c1"}}"#);
        input.extend_from_slice(b"\n\xff\xfe\n\nnot json\n");
        input.extend_from_slice(br#"{"type":"message","id":"z","from":{"id":"u2"},"recipient":{"id":"bot1"},"conversation":{"id":"c1"}}"#);
        input.extend_from_slice(b"\n");

        let options = InspectOptions {
            reply_text: Some("ack".to_string()),
            ..InspectOptions::default()
        };
        let mut output = Vec::new();
        let summary = run(input.as_slice(), &mut output, &options).await.unwrap();

        assert_eq!(
            summary,
            Summary {
                processed: 2,
                replies: 2,
                skipped: 2,
            }
        );

        let replies: Vec<Activity> = output
            .split(|b| *b == b'\n')
            .filter(|l| !l.is_empty())
            .map(|l| Activity::from_slice(l).unwrap())
            .collect();
        let reply_to: Vec<_> = replies.iter().map(|r| r.reply_to_id.as_deref()).collect();
        assert_eq!(reply_to, vec![Some("a"), Some("z")]);
    }
}
