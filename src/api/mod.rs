//! API layer - HTTP endpoints and middleware

pub mod admin;
pub mod analyze;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;
pub mod video;

pub use router::{create_router, cors_layer};
pub use state::{AnalysisServiceTrait, AppState};
