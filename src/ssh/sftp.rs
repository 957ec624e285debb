//! SFTP directory entries and their rendering

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// `S_IFDIR` bit in an SFTP permissions/mode value
pub const DIRECTORY_MODE_BIT: u32 = 0x4000;

/// A raw directory entry as reported by the remote SFTP server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteEntry {
    pub filename: String,
    /// Permissions/mode bits, if the server sent them
    pub mode: Option<u32>,
    pub size: Option<u64>,
    /// Modification time in seconds since the Unix epoch
    pub mtime: Option<u64>,
}

/// One entry of the `list` tool's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub filename: String,
    pub is_directory: bool,
    pub size: u64,
    pub modify_time: String,
}

impl From<RemoteEntry> for ListingEntry {
    fn from(entry: RemoteEntry) -> Self {
        Self {
            is_directory: entry.mode.is_some_and(is_directory_mode),
            size: entry.size.unwrap_or(0),
            modify_time: iso_timestamp(entry.mtime.unwrap_or(0)),
            filename: entry.filename,
        }
    }
}

/// True when the directory bit is set in `mode`
pub fn is_directory_mode(mode: u32) -> bool {
    mode & DIRECTORY_MODE_BIT == DIRECTORY_MODE_BIT
}

/// Render seconds since the epoch as an ISO-8601 UTC string with millisecond
/// precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(secs: u64) -> String {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Turn raw entries into the listing shape: skips `.` and `..`, sorts by name
pub fn to_listing(entries: Vec<RemoteEntry>) -> Vec<ListingEntry> {
    let mut listing: Vec<ListingEntry> = entries
        .into_iter()
        .filter(|e| e.filename != "." && e.filename != "..")
        .map(ListingEntry::from)
        .collect();
    listing.sort_by(|a, b| a.filename.cmp(&b.filename));
    listing
}
