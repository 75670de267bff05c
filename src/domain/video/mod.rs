//! Video metadata domain

mod entity;
mod extractor;

pub use entity::VideoInfo;
pub use extractor::VideoExtractor;

#[cfg(test)]
pub use extractor::MockVideoExtractor;
