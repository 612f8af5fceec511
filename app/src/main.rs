//! Progress Tracker
//!
//! Headless run of both screens against the hosted backend: loads the
//! dashboard and the report history for the configured user and logs what
//! the UI would render.
//!
//! ## Architecture
//!
//! - Screens: local state and view models
//! - Services: submission pipeline and history computation
//! - Repositories: path layout in the structured database
//! - Adapters: REST, filesystem and in-memory port implementations

use anyhow::Result;
use progress_tracker_app::adapters::ScriptedPicker;
use progress_tracker_app::screens::{HomeScreen, ReportScreen};
use progress_tracker_app::services::{DashboardService, ReportService};
use progress_tracker_app::{config, state::Backend};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        database = %config.backend.database_url,
        "Starting Progress Tracker"
    );

    if config.auth.id_token.is_none() {
        warn!("No ID token configured (PT__AUTH__ID_TOKEN); screens will ask for sign-in");
    }

    let backend = Backend::connect(config)?;

    // Home dashboard
    let mut home = HomeScreen::new(
        DashboardService::new(&backend),
        backend.config().dashboard.weight_unit,
    );
    match home.load().await {
        Ok(()) => match home.view() {
            Some(view) => info!(
                photo = view.progress_photo_url.as_deref().unwrap_or("-"),
                target = view.target_weight_line.as_deref().unwrap_or("-"),
                "{}",
                view.weight_line
            ),
            None => info!("No profile snapshot yet"),
        },
        Err(err) => error!(code = err.code(), "{}", err.inline_message()),
    }

    // Report history (no picker on a headless run)
    let reports = ReportScreen::mount(
        ReportService::new(&backend),
        Arc::new(ScriptedPicker::new()),
        backend.config().reports.weight_unit,
    )
    .await;

    if let Some(message) = reports.snapshot().await.message {
        error!(code = %message.code, "{}", message.text);
    }

    let items = reports.history_items().await;
    info!(count = items.len(), "Report history loaded");
    for item in items {
        info!(
            date = %item.date,
            weight = %item.weight,
            last_weight = item.last_weight.as_deref().unwrap_or("-"),
            change = item.percentage_change.as_deref().unwrap_or("-"),
            images = item.images.len(),
            fields = ?item.custom_fields,
            "Report"
        );
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "progress_tracker_app=info,progress_tracker=info".into()
        } else {
            "progress_tracker_app=debug,progress_tracker=debug,reqwest=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
