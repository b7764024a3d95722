use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use clipgrade_core::{Config, Dashboard, ServiceClient, Tab, section_headings};

mod render;
mod session;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for Tab enum (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliTab {
    Evaluations,
    Feedback,
}

impl From<CliTab> for Tab {
    fn from(cli: CliTab) -> Self {
        match cli {
            CliTab::Evaluations => Tab::Evaluations,
            CliTab::Feedback => Tab::Feedback,
        }
    }
}

#[derive(Parser)]
#[command(name = "clipgrade")]
#[command(about = "Submit videos for analysis and browse evaluation scores and feedback")]
struct Cli {
    /// Analysis service address (default http://localhost:8000)
    #[arg(long, env = "CLIPGRADE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Config file. Defaults to <config dir>/clipgrade/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every stored evaluation grouped by video
    Evaluations,

    /// Show the executive summary of the feedback for a video
    Feedback {
        /// Video URL
        url: String,
    },

    /// Submit a video for analysis, then show the refreshed dashboard
    Analyze {
        /// Video URL
        url: String,

        /// Tab to show once analysis finishes
        #[arg(short, long)]
        tab: Option<CliTab>,
    },

    /// Interactive dashboard session on stdin
    Dashboard,

    /// List the section headings present in a video's feedback report
    Sections {
        /// Video URL
        url: String,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref())
        .and_then(|config| config.with_overrides(cli.base_url, cli.timeout_secs))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_filter);
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let client = ServiceClient::new(&config)?;
    let dashboard = Dashboard::new(Arc::new(client), config.default_tab);

    match cli.command {
        Command::Evaluations => {
            let spinner = create_spinner("Fetching evaluations...");
            dashboard.mount().await;
            spinner.finish_and_clear();

            dashboard.select_tab(Tab::Evaluations).await;
            println!("{}", render::dashboard(&dashboard.snapshot().await));
        }
        Command::Feedback { url } => {
            let spinner = create_spinner("Fetching feedback...");
            dashboard.open_feedback(&url).await;
            spinner.finish_and_clear();

            dashboard.select_tab(Tab::Feedback).await;
            println!("{}", render::dashboard(&dashboard.snapshot().await));
        }
        Command::Analyze { url, tab } => {
            dashboard.mount().await;

            let started = Instant::now();
            let spinner = create_spinner(&format!("Analyzing {}...", url));
            dashboard.submit_url(url).await;
            spinner.finish_with_message(format!(
                "{} Analysis requested {}",
                style("✓").green().bold(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            ));

            if let Some(tab) = tab {
                dashboard.select_tab(tab.into()).await;
            }
            println!("{}", render::dashboard(&dashboard.snapshot().await));
        }
        Command::Dashboard => session::run(dashboard).await?,
        Command::Sections { url } => {
            dashboard.open_feedback(&url).await;
            let state = dashboard.snapshot().await;

            let headings = state
                .feedback()
                .map(|feedback| section_headings(&feedback.feedback))
                .unwrap_or_default();

            if headings.is_empty() {
                println!("{}", style("No sections found.").dim());
            }
            for heading in headings {
                println!("{} {}", style("•").cyan(), heading);
            }
        }
    }

    Ok(())
}
