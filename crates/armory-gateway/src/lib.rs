//! HTTP adapter for the Armory item catalog.
//!
//! Maps REST verbs on `/api/v1/item` onto [`ItemCatalog`](armory_core::ItemCatalog)
//! calls and catalog outcomes back onto status codes. Request shape
//! validation happens here and never reaches the catalog.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
