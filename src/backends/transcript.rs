use async_trait::async_trait;

use crate::error::{Result, VidchatError};
use crate::ports::TranscriptSource;

/// Collapse whitespace runs in raw timed text into single spaces. Caption
/// tracks arrive as short fragments separated by newlines and padding;
/// the chunker wants one continuous text.
pub fn normalize_transcript(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Transcript source that reads a plain-text transcript from a local
/// file, treating the "video id" as a path. Stands in for a captioning
/// API during offline use; the error mapping mirrors the taxonomy a real
/// captioning client would produce.
pub struct FileTranscript;

#[async_trait]
impl TranscriptSource for FileTranscript {
    async fn fetch_transcript(&self, video_id: &str) -> Result<String> {
        let raw = tokio::fs::read_to_string(video_id).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VidchatError::VideoUnavailable(video_id.to_string())
            } else {
                VidchatError::TranscriptFetch(e.to_string())
            }
        })?;

        let text = normalize_transcript(&raw);
        if text.is_empty() {
            return Err(VidchatError::NoCaptionsAvailable(video_id.to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_transcript("  hello \n\n world\t again  "),
            "hello world again"
        );
        assert_eq!(normalize_transcript("\n \t "), "");
    }

    #[tokio::test]
    async fn test_missing_file_maps_to_video_unavailable() {
        let err = FileTranscript
            .fetch_transcript("/no/such/transcript.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, VidchatError::VideoUnavailable(_)));
    }

    #[tokio::test]
    async fn test_blank_file_maps_to_no_captions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   \n\t  ").unwrap();

        let err = FileTranscript
            .fetch_transcript(file.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, VidchatError::NoCaptionsAvailable(_)));
    }

    #[tokio::test]
    async fn test_reads_and_normalizes_transcript() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the sky\nis blue\n\nwater is   wet").unwrap();

        let text = FileTranscript
            .fetch_transcript(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(text, "the sky is blue water is wet");
    }
}
