//! Activity Inspect - Classifies activities and writes replies
//!
//! Reads JSON Lines activities, logs how each one classifies, and writes one
//! routed reply per message activity when reply text is configured.

mod config;
mod inspect;

use activity::CONTENT_TYPE;
use clap::Parser;
use config::InspectConfig;
use inspect::InspectOptions;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = InspectConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Activity inspect starting");
    info!("  Input: {}", config.input);
    info!("  Output: {}", config.output);
    info!("  Append mode: {}", config.append);
    info!("  Reply text: {:?}", config.reply_text);
    info!("  Reply locale: {:?}", config.reply_locale);
    info!("  Strip recipient mention: {}", config.strip_recipient_mention);
    info!("  Reply content type: {}", CONTENT_TYPE);

    let input: Box<dyn AsyncRead + Unpin> = if config.input == "-" {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(tokio::fs::File::open(&config.input).await?)
    };

    let mut output: Box<dyn AsyncWrite + Unpin> = if config.output == "-" {
        Box::new(tokio::io::stdout())
    } else {
        Box::new(
            OpenOptions::new()
                .create(true)
                .write(true)
                .append(config.append)
                .truncate(!config.append)
                .open(&config.output)
                .await?,
        )
    };

    let options = InspectOptions {
        reply_text: config.reply_text.clone(),
        reply_locale: config.reply_locale.clone(),
        strip_recipient_mention: config.strip_recipient_mention,
    };

    let summary = inspect::run(input, &mut output, &options).await?;

    info!(
        "Done: processed={}, replies={}, skipped={}",
        summary.processed, summary.replies, summary.skipped
    );

    Ok(())
}
