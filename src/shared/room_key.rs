/**
 * Room Key Codec
 *
 * A room is identified by the workspace it belongs to and the calendar day
 * it covers. Both are packed into a single string key of the form
 * `{workspace_id}-{YYYY-MM-DD}` which is what the room registry indexes by.
 *
 * # Reference Timezone
 *
 * Calendar days are always computed in UTC+9, independent of the client's
 * or the server's local time, so two clients in different timezones land in
 * the same room for "today".
 *
 * # Malformed Keys
 *
 * Workspace ids may themselves contain `-`, so the date is always read from
 * the last ten characters of the key. A key that does not end in
 * `-YYYY-MM-DD` with a real calendar date, or that has nothing in front of
 * the date, is malformed. Decoding reports this as an error and never panics.
 */

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Offset of the reference timezone from UTC, in seconds
pub const REFERENCE_OFFSET_SECS: i32 = 9 * 3600;

/// Date format used in room keys and archive queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_SUFFIX_LEN: usize = 10;

/// The fixed UTC+9 offset used for calendar-day boundaries
pub fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).expect("UTC+9 is within chrono's offset range")
}

/// Calendar day of `instant` in the reference timezone
pub fn reference_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&reference_offset()).date_naive()
}

/// The day before the reference-timezone calendar day of `instant`
pub fn reference_yesterday<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    let today = reference_date(instant);
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Whether `date` survives an encode/decode round trip
///
/// Keys carry a four-digit year. chrono writes years past 9999 with a `+`
/// and negative years with a `-` sign, and neither decodes back.
pub fn is_key_date(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Identity of one collaborative room: a workspace and a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey {
    workspace_id: String,
    date: NaiveDate,
}

impl RoomKey {
    /// Key for a workspace on an already-normalized calendar day
    pub fn new(workspace_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            date,
        }
    }

    /// Key for the reference-timezone day containing `instant`
    ///
    /// The time of day is discarded, so every instant between 00:00 and
    /// 23:59:59 UTC+9 maps to the same key.
    pub fn for_instant<Tz: TimeZone>(workspace_id: impl Into<String>, instant: &DateTime<Tz>) -> Self {
        Self::new(workspace_id, reference_date(instant))
    }

    /// Key for the workspace's room of the current day
    pub fn today(workspace_id: impl Into<String>) -> Self {
        Self::for_instant(workspace_id, &Utc::now())
    }

    /// Decode a registry key back into its workspace and date
    pub fn parse(key: &str) -> Result<Self, SharedError> {
        split_key(key)
            .map(|(workspace_id, date)| Self::new(workspace_id, date))
            .ok_or_else(|| SharedError::malformed_key(key))
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The `YYYY-MM-DD` part of the key
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// The registry key string
    ///
    /// Only round-trips through [`RoomKey::parse`] when [`is_key_date`]
    /// holds for the date.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.workspace_id, self.date.format(DATE_FORMAT))
    }
}

impl FromStr for RoomKey {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Encode a workspace and day into a registry key
///
/// Dates outside years 0000 to 9999 produce keys that [`decode`] rejects or
/// misreads; check [`is_key_date`] first for dates that come from callers.
pub fn encode(workspace_id: &str, date: NaiveDate) -> String {
    RoomKey::new(workspace_id, date).encode()
}

/// Decode a registry key into `(workspace_id, "YYYY-MM-DD")`
pub fn decode(key: &str) -> Result<(String, String), SharedError> {
    let room = RoomKey::parse(key)?;
    let date = room.date_string();
    Ok((room.workspace_id, date))
}

fn split_key(key: &str) -> Option<(&str, NaiveDate)> {
    if key.len() <= DATE_SUFFIX_LEN {
        return None;
    }
    let split = key.len() - DATE_SUFFIX_LEN;
    // A multi-byte character straddling the split means the tail isn't ASCII
    if !key.is_char_boundary(split) {
        return None;
    }
    let (head, suffix) = key.split_at(split);
    let workspace_id = head.strip_suffix('-')?;
    if workspace_id.is_empty() {
        return None;
    }

    let well_shaped = suffix.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_shaped {
        return None;
    }

    NaiveDate::parse_from_str(suffix, DATE_FORMAT)
        .ok()
        .map(|date| (workspace_id, date))
}
