//! Command-line front end for the occurrence backend.

#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ocorrencias_application::{
    AuditLogQuery, AuditLogService, ColumnOrdering, KanbanBoardService, MAX_AUDIT_PAGE_SIZE,
};
use ocorrencias_core::{AppError, AppResult};
use ocorrencias_domain::AuditTargetType;
use ocorrencias_infrastructure::{
    HttpApiClient, InMemoryReferenceDataCache, StaticCredentialProvider,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "ocorrencias")]
#[command(about = "Audit log and kanban board views over the occurrence backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print enriched audit log pages
    Audit {
        /// Entries per page
        #[arg(long, default_value_t = MAX_AUDIT_PAGE_SIZE)]
        limit: usize,

        /// Entries skipped before the page
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Consecutive pages to load, sharing cached reference data
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Only entries with this action, e.g. update_status
        #[arg(long)]
        action: Option<String>,

        /// Only entries performed by this user
        #[arg(long)]
        actor_id: Option<i64>,

        /// Only entries targeting this type, e.g. ocorrencia
        #[arg(long, value_parser = parse_target_type)]
        target_type: Option<AuditTargetType>,
    },
    /// Print the kanban board columns
    Board {
        /// Only occurrences in this workflow
        #[arg(long)]
        workflow_id: Option<i64>,

        /// Order columns by the configured status position
        #[arg(long)]
        status_order: bool,
    },
    /// Move an occurrence to the status behind a column
    Move {
        /// Occurrence to move
        #[arg(long)]
        occurrence_id: i64,

        /// Target column id, e.g. em-andamento
        #[arg(long)]
        column: String,
    },
    /// Mark a subtask done or pending
    Subtask {
        /// Occurrence owning the subtask
        #[arg(long)]
        occurrence_id: i64,

        /// Subtask to update
        #[arg(long)]
        subtask_id: i64,

        /// New completion state
        #[arg(long, action = clap::ArgAction::Set)]
        done: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let api_client = Arc::new(build_api_client(&config)?);

    info!(
        api_base_url = %config.api_base_url,
        authenticated = config.api_token.is_some(),
        reference_cache_ttl_seconds = config.reference_cache_ttl_seconds,
        "ocorrencias cli started"
    );

    match cli.command {
        Command::Audit {
            limit,
            offset,
            pages,
            action,
            actor_id,
            target_type,
        } => {
            let mut service = AuditLogService::new(api_client.clone(), api_client);
            if config.reference_cache_ttl_seconds > 0 {
                service = service.with_reference_cache(
                    Arc::new(InMemoryReferenceDataCache::new()),
                    config.reference_cache_ttl_seconds,
                );
            }

            let query = AuditLogQuery {
                limit,
                offset,
                action,
                actor_id,
                target_type,
            };
            let entries = service.load_enriched_pages(query, pages).await?;
            info!(
                entry_count = entries.len(),
                system_action_count = entries
                    .iter()
                    .filter(|entry| entry.is_system_action())
                    .count(),
                "audit log loaded"
            );
            print_json(&entries)
        }
        Command::Board {
            workflow_id,
            status_order,
        } => {
            let ordering = if status_order {
                ColumnOrdering::StatusOrder
            } else {
                ColumnOrdering::FirstSeen
            };
            let service = KanbanBoardService::new(api_client.clone(), api_client)
                .with_column_ordering(ordering);

            let columns = service.load_board(workflow_id).await?;
            print_json(&columns)
        }
        Command::Move {
            occurrence_id,
            column,
        } => {
            let service = KanbanBoardService::new(api_client.clone(), api_client);
            let occurrence = service.move_card(occurrence_id, column.as_str()).await?;
            print_json(&occurrence)
        }
        Command::Subtask {
            occurrence_id,
            subtask_id,
            done,
        } => {
            let service = KanbanBoardService::new(api_client.clone(), api_client);
            let occurrence = service
                .set_subtask_done(occurrence_id, subtask_id, done)
                .await?;
            print_json(&occurrence)
        }
    }
}

fn build_api_client(config: &CliConfig) -> AppResult<HttpApiClient> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    HttpApiClient::new(
        http_client,
        config.api_base_url.as_str(),
        Arc::new(StaticCredentialProvider::new(config.api_token.clone())),
    )
}

fn parse_target_type(value: &str) -> Result<AuditTargetType, String> {
    value.parse::<AuditTargetType>().map_err(|error| error.to_string())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to render output: {error}")))?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
