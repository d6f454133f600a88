// Library root
// ------------
// Client library for the Gestor movements API plus the demo flows the
// CLI binary (`main.rs`) runs.
//
// Module responsibilities:
// - `api`: blocking HTTP client for `/api/v1` (list, create, bulk create,
//   health check).
// - `model`: request/response types exchanged with the API.
// - `config`: base URL and token, with placeholder detection.
// - `error`: error types returned by the library.
// - `import`: spreadsheet rows -> bulk movement payloads.
// - `ui`: terminal output for the demo flows.
// - `logging`: tracing subscriber setup.
pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod model;
pub mod ui;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, ConfigError, ImportError};
pub use model::{
    CreateResponse, HealthStatus, Movement, MovementKind, MovementPage, MovementQuery, NewMovement,
};
