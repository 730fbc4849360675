//! Periodic sweep: notify recruiters about new candidates for their saved
//! searches. Meant to run from cron.

use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use jobmatch::config::Settings;
use jobmatch::services::{Notifier, PostgresClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let settings = Settings::load().inspect_err(|e| eprintln!("Configuration error: {}", e))?;

    jobmatch::logging::init(&settings.logging);

    let run_id = Uuid::new_v4();
    info!("Checking saved searches for new matches (run {})", run_id);

    let postgres = PostgresClient::from_settings(&settings.database)
        .await
        .inspect_err(|e| error!("Failed to connect to PostgreSQL: {}", e))?;

    let notifier = Notifier::new(Arc::new(postgres), settings.notifications.cooldown());

    let report = notifier
        .run_batch()
        .await
        .inspect_err(|e| error!("Run {} failed: {}", run_id, e))?;

    for entry in &report.notified {
        info!(
            "Created notification for \"{}\": {} new matches",
            entry.name, entry.new_matches
        );
    }

    if report.notifications_created() == 0 {
        warn!(
            "No new matches found for any saved searches ({} checked)",
            report.searches_checked
        );
    } else {
        info!(
            "Run {} created {} notifications across {} saved searches",
            run_id,
            report.notifications_created(),
            report.searches_checked
        );
    }

    Ok(())
}
