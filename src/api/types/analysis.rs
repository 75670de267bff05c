//! Request bodies for the analysis endpoints

use serde::{Deserialize, Serialize};

use crate::infrastructure::services::AnalyzeVideoRequest;

/// POST /analyze/comments/batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCommentsRequest {
    pub comments: Vec<String>,
}

/// POST /analyze/video
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeVideoBody {
    pub video_url: String,
    #[serde(default)]
    pub analyze_comments: Option<bool>,
    #[serde(default)]
    pub max_comments: Option<i64>,
}

impl AnalyzeVideoBody {
    pub const DEFAULT_MAX_COMMENTS: usize = 100;

    /// Applies defaults; negative counts collapse to 0
    pub fn into_request(self) -> AnalyzeVideoRequest {
        let max_comments = self
            .max_comments
            .map(|n| usize::try_from(n).unwrap_or(0))
            .unwrap_or(Self::DEFAULT_MAX_COMMENTS);

        AnalyzeVideoRequest {
            video_url: self.video_url,
            analyze_comments: self.analyze_comments.unwrap_or(false),
            max_comments,
        }
    }
}

/// POST /analyze/text
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// GET /youtube
#[derive(Debug, Clone, Deserialize)]
pub struct VideoQuery {
    pub url: String,
}

/// GET /
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_body_defaults() {
        let body: AnalyzeVideoBody =
            serde_json::from_str(r#"{"video_url": "https://youtu.be/abc"}"#).unwrap();
        let request = body.into_request();

        assert!(!request.analyze_comments);
        assert_eq!(request.max_comments, 100);
    }

    #[test]
    fn test_video_body_explicit_null_uses_defaults() {
        let body: AnalyzeVideoBody = serde_json::from_str(
            r#"{"video_url": "https://youtu.be/abc", "analyze_comments": null, "max_comments": null}"#,
        )
        .unwrap();
        let request = body.into_request();

        assert!(!request.analyze_comments);
        assert_eq!(request.max_comments, 100);
    }

    #[test]
    fn test_negative_max_comments_becomes_zero() {
        let body: AnalyzeVideoBody = serde_json::from_str(
            r#"{"video_url": "https://youtu.be/abc", "analyze_comments": true, "max_comments": -5}"#,
        )
        .unwrap();

        assert_eq!(body.into_request().max_comments, 0);
    }

    #[test]
    fn test_batch_request_requires_comments() {
        assert!(serde_json::from_str::<BatchCommentsRequest>("{}").is_err());
    }
}
