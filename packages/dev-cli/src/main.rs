//! Developer CLI for exercising the post-creation flows against a live or
//! local Spotlist API.
//!
//! Requires `SPOTLIST_API_TOKEN` (and optionally `SPOTLIST_API_BASE_URL`)
//! in the environment or a `.env` file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use posts_client::{
    CommunityPostOutcome, CommunityPostRequest, HttpSpotlistApi, ListPostRequest, PostFlow,
    ReviewPostRequest, Validate,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spotlist-dev", about = "Drive the Spotlist post-creation flows")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a community post over a set of spots
    Community {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        user_id: i64,
        /// Spot ids, in the order they should appear on the hidden list
        #[arg(long = "spot", required = true)]
        spot_ids: Vec<i64>,
    },
    /// Create a review post for a single spot
    Review {
        #[arg(long)]
        description: String,
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        spot_id: i64,
        #[arg(long)]
        rating: f64,
    },
    /// Create a post referencing an existing public list
    ListPost {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        list_id: i64,
    },
}

/// Print validation errors, returning true when the request is unusable.
fn report_validation<R: Validate>(request: &R) -> bool {
    let errors = request.validate();
    for error in &errors {
        eprintln!("{} {}", "invalid:".bright_red(), error);
    }
    !errors.is_empty()
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let api = HttpSpotlistApi::from_env().context("SPOTLIST_API_TOKEN must be set")?;
    let flow = PostFlow::new(api);

    match cli.command {
        Command::Community {
            title,
            description,
            user_id,
            spot_ids,
        } => {
            let request = CommunityPostRequest {
                title,
                description,
                user_id,
                spot_ids,
            };
            if report_validation(&request) {
                return Ok(());
            }

            println!("{}", request.summary());
            let outcome = flow.create_community_post(&request).await;
            match &outcome {
                CommunityPostOutcome::Posted(_) => {
                    println!("{} {}", "ok:".bright_green(), outcome);
                }
                _ => {
                    eprintln!("{} {}", "failed:".bright_red(), outcome);
                }
            }
        }
        Command::Review {
            description,
            user_id,
            spot_id,
            rating,
        } => {
            // The form path is fail-fast on rating and ids.
            let request = ReviewPostRequest::from_form(&description, user_id, spot_id, rating)
                .context("review form input rejected")?;
            if report_validation(&request) {
                return Ok(());
            }

            println!("{}", request.summary());
            let response = flow.create_review_post(&request).await;
            print_envelope(response.success, response.error, response.data.map(|d| d.post_id));
        }
        Command::ListPost {
            title,
            description,
            user_id,
            list_id,
        } => {
            let request = ListPostRequest {
                title,
                description,
                user_id,
                list_id,
            };
            if report_validation(&request) {
                return Ok(());
            }

            println!("{}", request.summary());
            let response = flow.create_list_post(&request).await;
            print_envelope(response.success, response.error, response.data.map(|d| d.post_id));
        }
    }

    Ok(())
}

fn print_envelope(success: bool, error: Option<String>, post_id: Option<i64>) {
    if success {
        match post_id {
            Some(id) => println!("{} post {}", "created:".bright_green(), id),
            None => println!("{}", "created".bright_green()),
        }
    } else {
        let message = error.unwrap_or_else(|| "unknown error".to_string());
        eprintln!("{} {}", "failed:".bright_red(), message);
    }
}
