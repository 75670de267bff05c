//! Infrastructure layer - Artifact files, video extraction and service wiring

pub mod artifacts;
pub mod logging;
pub mod observability;
pub mod services;
pub mod video;
