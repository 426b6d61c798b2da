//! Rendered videos waiting in the upload queue.

use serde::{Deserialize, Serialize};

/// Bucket prefix rendered videos are uploaded under.
pub const VIDEO_QUEUE_PREFIX: &str = "queue/";

/// One queued video object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// Object name, including the queue prefix
    pub name: String,
    /// Public URL of the object
    pub url: String,
    /// Size in bytes as reported by the bucket
    pub size: String,
    /// Last update time as reported by the bucket
    pub updated: String,
}

impl VideoEntry {
    /// Whether an object name denotes a rendered video.
    pub fn is_video_name(name: &str) -> bool {
        name.ends_with(".mp4")
    }
}
