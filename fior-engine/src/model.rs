//! Playlist data model
//!
//! Item and record shapes mirror the ranyou server's playlist tables.
//! The engine treats playlist data as immutable input owned by the fetch
//! collaborator; evaluation clones item lists and never writes back.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One playlist entry (a video) with descriptive and temporal metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
    pub description: String,
    /// User-attached note, empty when unset
    pub note: String,
    /// Position within the playlist as stored upstream. Distinct from the
    /// synthetic `index` key, which tracks the current evaluation sequence.
    pub position: i64,
    pub channel_title: String,
    pub channel_id: String,
    /// ISO-8601 duration string as reported by the video API (e.g. "PT3M10S")
    pub duration: String,
    pub added_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

impl PartialEq for PlaylistItem {
    fn eq(&self, other: &Self) -> bool {
        self.video_id.eq(&other.video_id)
    }
}

impl Eq for PlaylistItem {}

impl Hash for PlaylistItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.video_id.hash(state);
    }
}

/// Playlist-level metadata accompanying a fetched item list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub playlist_id: String,
    pub published_at: DateTime<Utc>,
    pub channel_id: String,
    pub channel_title: String,
    pub title: String,
    pub description: String,
    pub privacy_status: String,
    pub thumbnail: Option<String>,
    pub playlist_length: i64,
}

/// Already-materialized input to evaluation: playlist id -> metadata plus
/// the playlist's items in their fetched order.
pub type PlaylistData = HashMap<String, (PlaylistRecord, Vec<PlaylistItem>)>;
