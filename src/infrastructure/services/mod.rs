//! Infrastructure services

mod analysis_service;

pub use analysis_service::{
    AnalysisLimits, AnalysisService, AnalyzeVideoRequest, CommentsAnalysis, ContentAnalysis,
    TextSentiment, VideoAnalysis, COMMENTS_ANALYZED, NO_COMMENTS,
};
