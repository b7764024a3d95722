use anyhow::Result;
use clipgrade_core::{Dashboard, Tab};
use console::style;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::debug;

use crate::render;

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Submit(String),
    Open(String),
    Tab(Tab),
    Toggle,
    Refresh,
    Show,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return SessionCommand::Empty;
        }

        let Some(command) = line.strip_prefix(':') else {
            return SessionCommand::Submit(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "tab" => match Tab::parse(arg) {
                Some(tab) => SessionCommand::Tab(tab),
                None => SessionCommand::Unknown(line.to_string()),
            },
            "open" if !arg.is_empty() => SessionCommand::Open(arg.to_string()),
            "toggle" => SessionCommand::Toggle,
            "refresh" | "r" => SessionCommand::Refresh,
            "show" | "s" => SessionCommand::Show,
            "help" | "h" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            _ => SessionCommand::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
  <link>          submit a video link for analysis
  :open <link>    show stored feedback for a link
  :tab <name>     switch to `evaluations` or `feedback`
  :toggle         switch to the other tab
  :refresh        re-fetch evaluations and active feedback
  :show           redraw the dashboard
  :quit           leave the session";

async fn redraw(dashboard: &Dashboard) {
    println!("{}", render::dashboard(&dashboard.snapshot().await));
}

/// Interactive dashboard on stdin. Each submitted link runs as its own task,
/// so a new link may be entered while earlier ones are still in flight.
pub async fn run(dashboard: Dashboard) -> Result<()> {
    dashboard.mount().await;
    redraw(&dashboard).await;
    println!("{}", style("Type a link to analyze, :help for commands.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        match SessionCommand::parse(&line) {
            SessionCommand::Empty => {}
            SessionCommand::Submit(url) => {
                println!("{} Analyzing {}...", style("→").cyan(), style(&url).dim());
                let dashboard = dashboard.clone();
                in_flight.spawn(async move {
                    dashboard.submit_url(url).await;
                    redraw(&dashboard).await;
                });
            }
            SessionCommand::Open(url) => {
                dashboard.open_feedback(&url).await;
                dashboard.select_tab(Tab::Feedback).await;
                redraw(&dashboard).await;
            }
            SessionCommand::Tab(tab) => {
                dashboard.select_tab(tab).await;
                redraw(&dashboard).await;
            }
            SessionCommand::Toggle => {
                dashboard.toggle_tab().await;
                redraw(&dashboard).await;
            }
            SessionCommand::Refresh => {
                dashboard.refresh().await;
                redraw(&dashboard).await;
            }
            SessionCommand::Show => redraw(&dashboard).await,
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => {
                in_flight.abort_all();
                return Ok(());
            }
            SessionCommand::Unknown(input) => {
                println!("{} unknown command {}", style("?").yellow(), input);
            }
        }

        while let Some(finished) = in_flight.try_join_next() {
            if let Err(e) = finished {
                debug!(error = %e, "submit task ended abnormally");
            }
        }
    }

    // stdin closed: let pending submits land before the session ends
    while in_flight.join_next().await.is_some() {}
    Ok(())
}
