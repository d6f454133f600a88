// UI layer: the demo flows the CLI runs against the API, printed to the
// terminal. Network calls are wrapped in an `indicatif` spinner; status
// markers are colored with `crossterm`.

use crate::api::ApiClient;
use crate::error::{ApiError, ConfigError, ImportError};
use crate::import::{self, ImportOutcome};
use crate::model::{HealthStatus, Movement, MovementKind, MovementQuery, NewMovement};
use anyhow::{Context, Result};
use chrono::Local;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const RECENT_LIMIT: u32 = 10;
const RECENT_SHOWN: usize = 5;

/// Spinner shown while a request is in flight. Call `finish_and_clear`
/// before printing results.
fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("   {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn banner() {
    let rule = "=".repeat(50);
    println!("{rule}");
    println!("🚀 Gestor App - API test");
    println!("{rule}");
}

/// Tell the user which values still need editing.
pub fn config_warning(err: &ConfigError) {
    println!("\n{}", format!("⚠️  Configure BASE_URL and API_TOKEN before running ({err})").yellow());
    println!("   1. Set BASE_URL to your deployment URL (or export GESTOR_API_URL)");
    println!("   2. Create a token in: Settings > API & Developers");
    println!("   3. Paste it into API_TOKEN (or export GESTOR_API_TOKEN)");
}

/// Lines printed for a health response; absent fields read "unknown".
pub fn health_lines(health: &HealthStatus) -> [String; 2] {
    [
        format!("   Status: {}", health.status_label()),
        format!("   Version: {}", health.version_label()),
    ]
}

/// Run the health check and print its result. Errors are returned
/// untouched so the caller can tell a connection failure apart.
pub fn show_health(api: &ApiClient) -> Result<HealthStatus, ApiError> {
    println!("\n🏥 Checking API...");
    let pb = spinner("Contacting API...");
    let res = api.health_check();
    pb.finish_and_clear();
    let health = res?;
    for line in health_lines(&health) {
        println!("{line}");
    }
    Ok(health)
}

/// Message for a failed health check: unreachable server vs bad response.
pub fn health_failure(err: &ApiError) -> String {
    if err.is_connection() {
        format!("   ❌ Error connecting: {err}")
    } else {
        format!("   ❌ Health check failed: {err}")
    }
}

pub fn movement_line(mov: &Movement) -> String {
    format!(
        "   - {}: {} -> {}€",
        mov.date,
        mov.description.as_deref().unwrap_or(""),
        mov.amount
    )
}

/// Print the latest expenses: totals plus the first few rows.
pub fn list_recent_expenses(api: &ApiClient) -> Result<()> {
    println!("\n📋 Fetching the last {RECENT_LIMIT} expenses...");
    let query = MovementQuery::new(RECENT_LIMIT, 0).kind(MovementKind::Expense);
    let pb = spinner("Loading movements...");
    let res = api.get_movements(&query);
    pb.finish_and_clear();
    let page = res.context("Listing movements")?;

    println!("   Total in database: {}", page.total);
    println!("   Returned: {}", page.count);
    for mov in page.data.iter().take(RECENT_SHOWN) {
        println!("{}", movement_line(mov));
    }
    Ok(())
}

/// Create one sample expense dated today on `account_id`.
pub fn create_sample_expense(api: &ApiClient, account_id: &str) -> Result<()> {
    println!("\n💸 Creating sample expense...");
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let movement = NewMovement::new(MovementKind::Expense, 25.50, today, account_id)
        .with_description("Test from Rust API client")
        .with_provider("Script Test");

    let pb = spinner("Creating...");
    let res = api.create_movement(&movement);
    pb.finish_and_clear();
    let resp = res.context("Creating sample expense")?;

    if resp.success {
        println!(
            "   {} ID: {}",
            "✅ Created!".green(),
            resp.first_id().unwrap_or("unknown")
        );
    } else {
        println!("   {} {:?}", "❌ Error:".red(), resp);
    }
    Ok(())
}

/// Import expenses from `path` (CSV or Excel) into `account_id`. A missing
/// reader for the file type is reported and skipped, not propagated.
pub fn import_from_file(api: &ApiClient, account_id: &str, path: &Path) -> Result<()> {
    let reader = match import::reader_for_path(path) {
        Ok(reader) => reader,
        Err(ImportError::ReaderUnavailable(kind)) => {
            println!(
                "{}",
                format!("❌ Cannot import {kind} files: reader not available in this build").red()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n📊 Importing from {}...", path.display());
    let pb = spinner("Uploading...");
    let res = import::import_file(api, reader.as_ref(), path, account_id);
    pb.finish_and_clear();

    match res.with_context(|| format!("Importing {}", path.display()))? {
        ImportOutcome::Imported(resp) => {
            println!("   {} {} movements", "✅ Imported:".green(), resp.created)
        }
        ImportOutcome::NothingToImport => {
            println!("   {}", "⚠️ No valid movements found".yellow())
        }
    }
    Ok(())
}
