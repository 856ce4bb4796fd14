use async_trait::async_trait;

use crate::error::Result;

/// Supplies the plain transcript text for a video. Failures map onto the
/// crate taxonomy: `NoCaptionsAvailable`, `TranscriptAccessBlocked`,
/// `VideoUnavailable`, or `TranscriptFetch` for anything else.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<String>;
}
