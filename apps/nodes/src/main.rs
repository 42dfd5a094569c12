use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console_core::{
    render::{render_table, render_text_table},
    DisplayZone, HttpClusterClient, NodeListView,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

/// Prints the cluster's nodes as reported by the registry admin API.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8221")]
    api_url: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Show creation times in UTC instead of the local timezone.
    #[arg(long)]
    utc: bool,
    #[arg(long, default_value_t = 5_000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let client =
        HttpClusterClient::with_timeout(&args.api_url, Duration::from_millis(args.timeout_ms))?;
    let zone = if args.utc {
        DisplayZone::Utc
    } else {
        DisplayZone::Local
    };
    let view = NodeListView::with_display_zone(Arc::new(client), zone);

    view.mount();
    view.settle().await;
    let nodes = view.current();
    debug!(count = nodes.len(), "rendering nodes");

    match args.format {
        OutputFormat::Text => print!("{}", render_text_table(&nodes, zone)),
        OutputFormat::Html => print!("{}", render_table(&nodes, zone)),
    }

    view.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = Args::try_parse_from(["nodes"]).expect("args");
        assert_eq!(args.api_url, "http://127.0.0.1:8221");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.utc);
        assert_eq!(args.timeout_ms, 5_000);
    }

    #[test]
    fn parses_html_format_and_utc() {
        let args = Args::try_parse_from([
            "nodes",
            "--api-url",
            "http://registry:8221",
            "--format",
            "html",
            "--utc",
        ])
        .expect("args");
        assert_eq!(args.api_url, "http://registry:8221");
        assert_eq!(args.format, OutputFormat::Html);
        assert!(args.utc);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["nodes", "--format", "xml"]).is_err());
    }
}
