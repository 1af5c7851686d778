use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use swingcoach_core::{
    AnalysisController, AnalysisState, HttpRequester, ProviderConfig, format_report_readable,
    format_size,
    provider::{
        API_KEY_ENV_VAR, DEFAULT_API_URL, DEFAULT_API_VERSION, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    },
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::selection::asset_from_path;

mod selection;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "swingcoach")]
#[command(about = "Analyze a golf swing video and get an AI-powered coaching report")]
struct Cli {
    /// Path to the swing video
    video: PathBuf,

    /// Declared media type (e.g. "video/mp4"). Guessed from the extension when omitted.
    #[arg(short = 't', long)]
    media_type: Option<String>,

    /// Analysis provider endpoint
    #[arg(long, env = "SWINGCOACH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Model identifier sent with the request
    #[arg(short, long, env = "SWINGCOACH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum output size of the reply
    #[arg(long, env = "SWINGCOACH_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// API key forwarded to the provider
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    api_key: Option<String>,

    /// Print the report as JSON instead of readable text
    #[arg(long)]
    json: bool,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: None,
        }
        .with_api_key(self.api_key.clone())
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.provider_config();
    if !config.has_api_key() {
        warn!(
            "{} is not set; the provider will most likely reject the request",
            API_KEY_ENV_VAR
        );
    }
    let model = config.model.clone();

    eprintln!(
        "\n{}  {}\n",
        style("swingcoach").green().bold(),
        style("AI Golf Coach").dim()
    );

    let controller = AnalysisController::new(Arc::new(HttpRequester::new(config)));

    let asset = asset_from_path(&cli.video, cli.media_type.as_deref()).await?;
    let (name, size, media_type) = (asset.name.clone(), asset.size, asset.media_type.clone());
    if let Err(e) = controller.select_file(asset) {
        fail(&format!("{e}. Please select a valid video file"));
    }
    eprintln!(
        "{} Selected: {} {}",
        style("✓").green().bold(),
        name,
        style(format!("[{}, {}]", media_type, format_size(size))).dim()
    );
    eprintln!("{}", style("─".repeat(60)).dim());

    let started = Instant::now();
    let spinner = create_spinner(&format!("Analyzing swing with {}...", model));
    controller.request_analysis().await;

    match controller.state() {
        AnalysisState::Succeeded(report) => {
            spinner.finish_with_message(format!(
                "{} Analysis complete {}",
                style("✓").green().bold(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            ));
            eprintln!("{}", style("─".repeat(60)).dim());

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", format_report_readable(&report));
            }
            Ok(())
        }
        AnalysisState::Failed(message) => {
            spinner.finish_and_clear();
            fail(&message)
        }
        other => {
            spinner.finish_and_clear();
            anyhow::bail!("analysis ended in unexpected state: {}", other.name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_switch_to_minutes() {
        assert_eq!(format_duration(Duration::from_millis(4200)), "4.2s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn flags_map_onto_provider_config() {
        let cli = Cli::try_parse_from([
            "swingcoach",
            "swing.mp4",
            "--api-url",
            "http://localhost:9000/v1/messages",
            "--model",
            "test-model",
            "--max-tokens",
            "512",
            "--api-key",
            "sk-test",
            "--json",
        ])
        .unwrap();

        let config = cli.provider_config();
        assert_eq!(config.api_url, "http://localhost:9000/v1/messages");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert!(cli.json);
        assert_eq!(cli.video, PathBuf::from("swing.mp4"));
    }

    #[test]
    fn video_path_is_required() {
        assert!(Cli::try_parse_from(["swingcoach"]).is_err());
    }

    #[test]
    fn media_type_override_is_optional() {
        let cli = Cli::try_parse_from(["swingcoach", "clip", "-t", "video/webm"]).unwrap();
        assert_eq!(cli.media_type.as_deref(), Some("video/webm"));
    }
}
