use std::{io, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use similar_movies::{
    api::{create_router, AppState},
    config::Config,
    models::{ApiKey, MovieQuery},
    services::{completion::ChatCompletionsClient, providers::OmdbProvider, Recommender},
    session::{render_outcome, Session},
};

/// Similar Movie Recommendation Assistant
#[derive(Parser)]
#[command(name = "similar-movies")]
#[command(about = "Finds movies similar to a given title and year using a language model", long_about = None)]
struct Cli {
    /// Completion model identifier (overrides COMPLETION_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Session,

    /// Look up one movie and print recommendations
    Ask {
        /// Movie title
        #[arg(long)]
        title: String,

        /// Release year
        #[arg(long)]
        year: i32,
    },

    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Some(Commands::Serve));

    // Terminal modes stay quiet so log lines don't interleave with prompts
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if serving { "info" } else { "warn" })
            }),
        )
        .init();

    let config = Config::from_env()?;
    let recommender = build_recommender(&config, cli.model)?;
    let credential = config.completion_api_key.as_deref().and_then(ApiKey::new);

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let input = BufReader::new(tokio::io::stdin());
            Session::new(input, io::stdout(), recommender, credential)
                .run()
                .await
                .context("Terminal session failed")?;
        }
        Commands::Ask { title, year } => {
            let credential = credential
                .context("COMPLETION_API_KEY must be set for one-shot lookups")?;
            let outcome = match MovieQuery::new(&title, year) {
                Ok(query) => recommender.recommend(&query, &credential).await,
                Err(e) => Err(e),
            };

            render_outcome(&mut io::stdout(), &outcome)?;
            if outcome.is_err() {
                std::process::exit(1);
            }
        }
        Commands::Serve => serve(&config, recommender, credential).await?,
    }

    Ok(())
}

fn build_recommender(config: &Config, model: Option<String>) -> Result<Recommender> {
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let provider = OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.omdb_plot,
        timeout,
    )?;
    let completion = ChatCompletionsClient::new(config.completion_api_url.clone(), timeout)?;

    Ok(Recommender::new(
        Arc::new(provider),
        Arc::new(completion),
        model.unwrap_or_else(|| config.completion_model.clone()),
    ))
}

async fn serve(config: &Config, recommender: Recommender, credential: Option<ApiKey>) -> Result<()> {
    if credential.is_none() {
        tracing::warn!("COMPLETION_API_KEY not set; requests must send x-completion-key");
    }

    let app = create_router(AppState::new(recommender, credential));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
