#![forbid(unsafe_code)]

//! Newsfeed CLI
//!
//! Fetches headlines and messages from the selected environment and prints
//! them, or creates a user.

mod feed;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fetch_core::{Environment, EnvironmentKind, FetchClient, NewUser, RetryPolicy, CREATE_USER};

/// Newsfeed command-line interface
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend to talk to: production or testing
    #[arg(long = "env", env = "NEWSFEED_ENV", default_value_t = EnvironmentKind::Production)]
    environment: EnvironmentKind,

    /// Override the environment's base URL (e.g. a local mock server)
    #[arg(long, env = "NEWSFEED_BASE_URL")]
    base_url: Option<String>,

    /// Attempts per request, including the first
    #[arg(long, env = "NEWSFEED_ATTEMPTS", default_value_t = 5)]
    attempts: u32,

    /// Pause between attempts, in milliseconds
    #[arg(long, env = "NEWSFEED_RETRY_DELAY_MS", default_value_t = 1000)]
    retry_delay_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show headlines and messages (the default)
    Feed,
    /// Create a user and print the server's record of it
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        job: String,
    },
}

impl Args {
    fn environment(&self) -> Result<Environment> {
        let environment = self.environment.environment();
        match &self.base_url {
            Some(base_url) => environment
                .with_base_url(base_url)
                .with_context(|| format!("invalid --base-url {base_url:?}")),
            None => Ok(environment),
        }
    }

    fn retry_policy(&self) -> Result<RetryPolicy> {
        Ok(RetryPolicy::new(self.attempts)?.with_delay(Duration::from_millis(self.retry_delay_ms)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let environment = args.environment()?;
    let policy = args.retry_policy()?;
    tracing::info!(
        environment = environment.name(),
        base_url = %environment.base_url(),
        attempts = policy.attempts(),
        "starting"
    );
    let client = FetchClient::new(environment)?;

    match args.command.unwrap_or(Command::Feed) {
        Command::Feed => {
            let feed = feed::fetch_feed(&client, policy)
                .await
                .context("failed to load the feed")?;
            feed::render(&feed, &mut std::io::stdout().lock())?;
        }
        Command::CreateUser { name, job } => {
            let user = client
                .send_with_retry(&CREATE_USER, &NewUser { name, job }, policy)
                .await
                .context("failed to create user")?;
            println!(
                "created {} ({}) with id {} at {}",
                user.name, user.job, user.id, user.created_at
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_production_feed() {
        let args = Args::try_parse_from(["newsfeed"]).unwrap();
        assert_eq!(args.environment, EnvironmentKind::Production);
        assert_eq!(args.attempts, 5);
        assert_eq!(args.retry_delay_ms, 1000);
        assert!(args.command.is_none());
    }

    #[test]
    fn base_url_override_keeps_environment_settings() {
        let args = Args::try_parse_from([
            "newsfeed",
            "--env",
            "test",
            "--base-url",
            "http://127.0.0.1:3000/",
        ])
        .unwrap();
        let env = args.environment().unwrap();
        assert_eq!(env.name(), "Testing");
        assert_eq!(env.base_url().as_str(), "http://127.0.0.1:3000/");
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!(Args::try_parse_from(["newsfeed", "--env", "staging"]).is_err());
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let args = Args::try_parse_from(["newsfeed", "--attempts", "0"]).unwrap();
        assert!(args.retry_policy().is_err());
    }

    #[test]
    fn create_user_takes_name_and_job() {
        let args = Args::try_parse_from([
            "newsfeed",
            "create-user",
            "--name",
            "Taylor",
            "--job",
            "Engineer",
        ])
        .unwrap();
        match args.command {
            Some(Command::CreateUser { name, job }) => {
                assert_eq!(name, "Taylor");
                assert_eq!(job, "Engineer");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
