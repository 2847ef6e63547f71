pub mod api;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod params;
pub mod state;

pub use api::create_router;
pub use docs::ApiDoc;
pub use error::{ApiError, Result};
pub use state::AppState;
