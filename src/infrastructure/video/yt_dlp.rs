//! yt-dlp backed video extractor

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::VideoConfig;
use crate::domain::{DomainError, VideoExtractor, VideoInfo};
use crate::infrastructure::observability::record_video_extraction;

/// Runs `yt-dlp` as a child process and parses its JSON info document
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    program: String,
    timeout: Duration,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &VideoConfig) -> Self {
        Self::new(config.extractor_path.clone(), config.timeout())
    }

    fn args(url: &str, max_comments: Option<usize>) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            "--quiet".to_string(),
        ];

        if let Some(max) = max_comments {
            args.push("--write-comments".to_string());
            args.push("--extractor-args".to_string());
            args.push(format!("youtube:max_comments={}", max));
        }

        // ends option parsing so a URL can never be read as a flag
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    async fn run(&self, url: &str, max_comments: Option<usize>) -> Result<VideoInfo, DomainError> {
        let child = Command::new(&self.program)
            .args(Self::args(url, max_comments))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::extraction(format!("failed to start {}: {}", self.program, e))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                DomainError::extraction(format!(
                    "extraction timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| DomainError::extraction(format!("extractor I/O failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::extraction(
                stderr
                    .lines()
                    .rev()
                    .find(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("extractor exited with {}", output.status)),
            ));
        }

        let info: serde_json::Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            DomainError::extraction(format!("extractor returned invalid JSON: {}", e))
        })?;

        Ok(VideoInfo::from_info_json(&info))
    }
}

#[async_trait]
impl VideoExtractor for YtDlpExtractor {
    async fn extract(
        &self,
        url: &str,
        max_comments: Option<usize>,
    ) -> Result<VideoInfo, DomainError> {
        let start = Instant::now();
        let result = self.run(url, max_comments).await;

        record_video_extraction(self.extractor_name(), result.is_ok());

        match &result {
            Ok(info) => debug!(
                url = %url,
                comments = info.comments.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Video extracted"
            ),
            Err(e) => warn!(url = %url, error = %e, "Video extraction failed"),
        }

        result
    }

    fn extractor_name(&self) -> &'static str {
        "yt-dlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_without_comments() {
        let args = YtDlpExtractor::args("https://youtu.be/abc", None);

        assert!(args.contains(&"--dump-single-json".to_string()));
        assert!(!args.contains(&"--write-comments".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_args_with_comment_limit() {
        let args = YtDlpExtractor::args("https://youtu.be/abc", Some(50));

        assert!(args.contains(&"--write-comments".to_string()));
        assert!(args.contains(&"youtube:max_comments=50".to_string()));
        let separator = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(separator, args.len() - 2);
    }

    #[tokio::test]
    async fn test_missing_program_is_extraction_error() {
        let extractor = YtDlpExtractor::new(
            "definitely-not-an-installed-extractor",
            Duration::from_secs(5),
        );

        let err = extractor
            .extract("https://youtu.be/abc", None)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Extraction { .. }));
    }
}
