#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "app")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "app")]
pub mod services;

#[cfg(feature = "app")]
use std::time::Duration;

#[cfg(feature = "app")]
use crate::db::{ConnectionOptions, establish_connection_pool, run_migrations};
#[cfg(feature = "app")]
use crate::dto::tickets::TicketListQuery;
#[cfg(feature = "app")]
use crate::models::config::AppConfig;
#[cfg(feature = "app")]
use crate::repository::DieselRepository;
#[cfg(feature = "app")]
use crate::services::opportunity::load_board;
#[cfg(feature = "app")]
use crate::services::pipeline::probability_color_for;
#[cfg(feature = "app")]
use crate::services::tickets::load_tickets;

/// Opens the store, applies migrations and logs the board and ticket overview.
#[cfg(feature = "app")]
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let options =
        ConnectionOptions::default().with_busy_timeout(Duration::from_millis(config.busy_timeout_ms));
    let pool = establish_connection_pool(&config.database_url, options).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let repo = DieselRepository::new(pool);

    let board_repo = repo.clone();
    let board = tokio::task::spawn_blocking(move || load_board(&board_repo))
        .await
        .map_err(std::io::Error::other)?
        .map_err(|e| std::io::Error::other(format!("Failed to load the board: {e}")))?;

    for column in &board.columns {
        log::info!(
            "{}: {} opportunities, {:.2} total",
            column.stage.label,
            column.opportunities.len(),
            column.total
        );
    }
    log::info!(
        "Pipeline {:.2}, weighted {:.2}, average probability {:.1}% ({})",
        board.summary.pipeline_value,
        board.summary.weighted_value,
        board.summary.average_probability,
        probability_color_for(board.summary.average_probability.round() as u8).as_str()
    );

    let tickets = tokio::task::spawn_blocking(move || load_tickets(&repo, TicketListQuery::default()))
        .await
        .map_err(std::io::Error::other)?
        .map_err(|e| std::io::Error::other(format!("Failed to load tickets: {e}")))?;

    log::info!(
        "Tickets: {} total, {} open, {} resolved, {} urgent",
        tickets.stats.total,
        tickets.stats.open,
        tickets.stats.resolved,
        tickets.stats.urgent
    );
    log::debug!("Settle delay for board moves: {}ms", config.settle_delay_ms);

    Ok(())
}
