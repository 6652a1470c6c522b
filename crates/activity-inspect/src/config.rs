//! Inspect configuration

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "activity-inspect")]
#[command(about = "Activity Inspect - Classifies activities and derives replies from JSON Lines")]
pub struct InspectConfig {
    /// Input file of JSON Lines activities ("-" for stdin)
    #[arg(long, env = "ACTIVITY_INPUT", default_value = "-")]
    pub input: String,

    /// Output file for reply activities ("-" for stdout)
    #[arg(long, env = "ACTIVITY_OUTPUT", default_value = "-")]
    pub output: String,

    /// Append to an existing output file instead of truncating it
    #[arg(long, env = "ACTIVITY_APPEND", default_value = "false")]
    pub append: bool,

    /// Text of the reply written for each message activity (no replies if unset)
    #[arg(long, env = "ACTIVITY_REPLY_TEXT")]
    pub reply_text: Option<String>,

    /// Reply locale (defaults to the inbound activity's locale)
    #[arg(long, env = "ACTIVITY_REPLY_LOCALE")]
    pub reply_locale: Option<String>,

    /// Remove mentions of the recipient from message text before inspecting
    #[arg(long, env = "ACTIVITY_STRIP_RECIPIENT_MENTION", default_value = "false")]
    pub strip_recipient_mention: bool,

    /// Log filter, e.g. "info" or "activity=debug"
    #[arg(long, env = "ACTIVITY_LOG", default_value = "info")]
    pub log_level: String,
}
