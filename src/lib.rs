//! Scorebook: cricket statistics administration backend.
//!
//! Entity CRUD, canned read queries with a SQL display panel, routine
//! simulators, an append-only audit log, and a live feed of trigger-derived
//! match results, all over one shared PostgreSQL pool.

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::AppError;
pub use render::TableView;
pub use routes::{api_routes, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema};
