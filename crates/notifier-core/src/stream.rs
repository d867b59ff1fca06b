//! Live-stream records as returned by the `/streams` endpoint.
//!
//! The wire structs mirror the JSON exactly and tolerate `null` or missing
//! fields; [`StreamRecord`] is the flattened snapshot the rest of the crate
//! works with.

use serde::{Deserialize, Deserializer};

/// One live channel, as seen by a single poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamRecord {
    pub game: String,
    pub viewer_count: u64,
    pub is_mature: bool,
    pub status: String,
    pub broadcaster_language: String,
    pub display_name: String,
    pub url: String,
    pub follower_count: u64,
}

impl StreamRecord {
    /// Name used for watch-list and online-set membership.
    pub fn channel_key(&self) -> String {
        self.display_name.to_lowercase()
    }
}

// ── Wire format ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StreamsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub streams: Vec<StreamEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub game: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub viewers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel: ChannelEntry,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mature: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub broadcaster_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<StreamEntry> for StreamRecord {
    fn from(entry: StreamEntry) -> Self {
        let channel = entry.channel;
        Self {
            game: entry.game,
            viewer_count: entry.viewers,
            is_mature: channel.mature,
            status: channel.status,
            broadcaster_language: channel.broadcaster_language,
            display_name: channel.display_name,
            url: channel.url,
            follower_count: channel.followers,
        }
    }
}

impl StreamsResponse {
    pub fn into_records(self) -> Vec<StreamRecord> {
        self.streams.into_iter().map(StreamRecord::from).collect()
    }
}

/// Parse a raw `/streams` body.
pub fn parse_streams(body: &str) -> crate::Result<Vec<StreamRecord>> {
    let response: StreamsResponse = serde_json::from_str(body)?;
    Ok(response.into_records())
}

/// Lowercased display names of every live record, in response order.
pub fn online_names(records: &[StreamRecord]) -> Vec<String> {
    records
        .iter()
        .map(StreamRecord::channel_key)
        .filter(|name| !name.is_empty())
        .collect()
}
