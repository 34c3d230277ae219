use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::auth::Token;
use crate::grid::ContributionGrid;
use crate::providers::github::{
    FetchOptions, GitHubProvider, DEFAULT_API_URL, DEFAULT_CALENDAR_RANGE,
    DEFAULT_CONTRIBUTIONS_URL, DEFAULT_PER_PAGE,
};
use crate::snapshot::{DashboardSnapshot, ErrorPayload};

#[derive(Parser)]
#[command(name = "ghdash")]
#[command(author, version, about = "GitHub activity dashboard snapshot builder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a user's GitHub data and print the dashboard snapshot
    Snapshot {
        /// GitHub login to build the dashboard for
        #[arg(short, long, env = "GITHUB_USER")]
        user: String,

        /// GitHub API token (optional, raises the rate limit)
        #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitHub REST API base URL
        #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Contribution calendar API base URL
        #[arg(long, env = "CONTRIBUTIONS_API_URL", default_value = DEFAULT_CONTRIBUTIONS_URL)]
        contributions_url: String,

        /// Calendar range passed to the contributions API (`last`, `all` or a year).
        /// `last` has no per-year totals, so the yearly commit count stays 0
        /// unless this is `all` or the current year.
        #[arg(long, default_value = DEFAULT_CALENDAR_RANGE)]
        calendar_range: String,

        /// Repositories requested per page
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },

    /// Build the week-aligned contribution grid from a snapshot
    Grid {
        /// Snapshot JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<ExitCode> {
        match &self.command {
            Commands::Snapshot {
                user,
                token,
                api_url,
                contributions_url,
                calendar_range,
                per_page,
            } => {
                info!("Building dashboard snapshot for user: {user}");

                let options = FetchOptions {
                    per_page: *per_page,
                    calendar_range: calendar_range.clone(),
                };
                let token = token.as_deref().and_then(Token::non_empty);
                let provider =
                    GitHubProvider::new(api_url, contributions_url, user.clone(), token, options)?;

                match provider.collect_snapshot().await {
                    Ok(snapshot) => {
                        self.emit(&snapshot)?;
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(e) => {
                        error!("Snapshot build failed: {e}");
                        self.emit(&ErrorPayload::fetch_failure())?;
                        Ok(ExitCode::FAILURE)
                    }
                }
            }
            Commands::Grid { input } => {
                let text = match input {
                    Some(path) => std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    None => std::io::read_to_string(std::io::stdin())?,
                };

                let snapshot: DashboardSnapshot =
                    serde_json::from_str(&text).context("Input is not a dashboard snapshot")?;
                let grid = ContributionGrid::from_days(&snapshot.contributions);
                info!("Built contribution grid with {} weeks", grid.weeks.len());

                self.emit(&grid)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let json_output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}
