// Entrypoint for the API demo.
// - Validates the configuration before touching the network.
// - Runs the health check, then lists recent expenses.
// - The create/import examples only run when explicitly requested through
//   `GESTOR_ACCOUNT_ID` (and `GESTOR_IMPORT_FILE` for the import).

use anyhow::Context;
use gestor_api_cli::{logging, ui, ApiClient, Config};
use std::path::PathBuf;
use std::process;

const ACCOUNT_ENV: &str = "GESTOR_ACCOUNT_ID";
const IMPORT_ENV: &str = "GESTOR_IMPORT_FILE";

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    ui::banner();

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        ui::config_warning(&e);
        process::exit(1);
    }

    let api = ApiClient::new(&config).context("Failed to build API client")?;

    if let Err(e) = ui::show_health(&api) {
        println!("{}", ui::health_failure(&e));
        process::exit(1);
    }

    ui::list_recent_expenses(&api)?;

    // Creating movements needs a real account UUID from the app.
    if let Ok(account_id) = std::env::var(ACCOUNT_ENV) {
        ui::create_sample_expense(&api, &account_id)?;

        if let Ok(path) = std::env::var(IMPORT_ENV) {
            ui::import_from_file(&api, &account_id, &PathBuf::from(path))?;
        }
    }

    println!("\n✅ Test complete!");
    Ok(())
}
