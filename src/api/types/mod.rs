//! Request, response and error types for the HTTP API

pub mod analysis;
pub mod error;
pub mod json;

pub use analysis::{AnalyzeVideoBody, BatchCommentsRequest, RootResponse, TextRequest, VideoQuery};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
