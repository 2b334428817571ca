use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const WISHES_SLOT_KEY: &str = "digital-wishbook-wishes";
pub const VISITOR_ID_SLOT_KEY: &str = "birthday_visitor_id";
pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_MESSAGE_CHARS: usize = 500;
pub const PHOTO_MAX_BYTES: u64 = 10 * 1024 * 1024;
pub const VIDEO_MAX_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishId(String);

impl WishId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(platform_host::new_record_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WishId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WishId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Photo,
    Video,
    Voice,
}

impl AttachmentKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Voice => "voice",
        }
    }

    /// Inclusive size ceiling for picked files. Voice notes are not size-limited.
    pub fn max_bytes(self) -> Option<u64> {
        match self {
            Self::Photo => Some(PHOTO_MAX_BYTES),
            Self::Video => Some(VIDEO_MAX_BYTES),
            Self::Voice => None,
        }
    }

    /// `accept` filter used when picking a file of this kind.
    pub fn accept(self) -> &'static str {
        match self {
            Self::Photo => "image/*",
            Self::Video => "video/*",
            Self::Voice => "audio/*",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Photo,
    Video,
    Voice,
    Multiple,
}

impl MediaKind {
    /// Aggregate kind of a record: `Text` with no media, the single item's kind with one,
    /// `Multiple` otherwise.
    pub fn derive(items: &[MediaItem]) -> Self {
        match items {
            [] => Self::Text,
            [only] => only.kind.into(),
            _ => Self::Multiple,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::Multiple => "multiple",
        }
    }
}

impl From<AttachmentKind> for MediaKind {
    fn from(kind: AttachmentKind) -> Self {
        match kind {
            AttachmentKind::Photo => Self::Photo,
            AttachmentKind::Video => Self::Video,
            AttachmentKind::Voice => Self::Voice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// Self-contained `data:` reference.
    pub url: String,
}

/// A persisted wish.
///
/// The serialized field names match the layout browsers already hold under
/// [`WISHES_SLOT_KEY`]; `media_type` and `media_urls` may be `null` there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishRecord {
    pub id: WishId,
    pub sender_name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "media_type", default = "text_kind", deserialize_with = "nullable_kind")]
    pub media_kind: MediaKind,
    #[serde(
        rename = "media_urls",
        default,
        serialize_with = "empty_as_null",
        deserialize_with = "null_as_empty"
    )]
    pub media_items: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
}

impl WishRecord {
    /// Builds a record with its kind derived from `media_items`.
    pub fn new(
        id: WishId,
        sender_name: impl Into<String>,
        message: Option<String>,
        media_items: Vec<MediaItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let media_kind = MediaKind::derive(&media_items);
        Self {
            id,
            sender_name: sender_name.into(),
            message,
            media_kind,
            media_items,
            created_at,
        }
    }

    /// Recomputes `media_kind` from the stored items.
    pub fn normalize(mut self) -> Self {
        self.media_kind = MediaKind::derive(&self.media_items);
        self
    }

    /// Replaces the editable fields. The name is trimmed; a blank message becomes `None`.
    pub fn apply_edit(&mut self, sender_name: &str, message: &str) {
        self.sender_name = sender_name.trim().to_string();
        self.message = normalize_message(message);
    }

    /// Uppercased first character of the sender name, for the avatar badge.
    pub fn initial(&self) -> String {
        self.sender_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Creation date as `Mon D`, for example `Mar 7`.
    pub fn short_date(&self) -> String {
        self.created_at.format("%b %-d").to_string()
    }
}

/// Trims a message, mapping blank input to `None`.
pub fn normalize_message(message: &str) -> Option<String> {
    let trimmed = message.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Truncates `value` to at most `limit` characters.
pub fn clamp_chars(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

fn text_kind() -> MediaKind {
    MediaKind::Text
}

fn nullable_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MediaKind, D::Error> {
    Ok(Option::<MediaKind>::deserialize(deserializer)?.unwrap_or(MediaKind::Text))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<MediaItem>, D::Error> {
    Ok(Option::<Vec<MediaItem>>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_null<S: Serializer>(items: &[MediaItem], serializer: S) -> Result<S::Ok, S::Error> {
    if items.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(items)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn item(kind: AttachmentKind) -> MediaItem {
        MediaItem {
            kind,
            url: format!("data:{kind}/x;base64,AA=="),
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().expect("timestamp")
    }

    #[test]
    fn media_kind_follows_item_count() {
        assert_eq!(MediaKind::derive(&[]), MediaKind::Text);
        assert_eq!(
            MediaKind::derive(&[item(AttachmentKind::Voice)]),
            MediaKind::Voice
        );
        assert_eq!(
            MediaKind::derive(&[item(AttachmentKind::Photo), item(AttachmentKind::Photo)]),
            MediaKind::Multiple
        );
    }

    #[test]
    fn text_record_serializes_with_null_media() {
        let record = WishRecord::new(
            WishId::from("a"),
            "Ana",
            Some("hi".into()),
            Vec::new(),
            at(1_700_000_000_123),
        );
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": "a",
                "sender_name": "Ana",
                "message": "hi",
                "media_type": "text",
                "media_urls": null,
                "created_at": "2023-11-14T22:13:20.123Z",
            })
        );
    }

    #[test]
    fn legacy_null_media_type_is_accepted_and_normalized() {
        let raw = json!({
            "id": "b",
            "sender_name": "Ben",
            "message": null,
            "media_type": null,
            "media_urls": [{"type": "photo", "url": "data:image/png;base64,AA=="}],
            "created_at": "2024-03-07T10:00:00.000Z",
        });
        let record: WishRecord = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(record.media_kind, MediaKind::Text);
        let record = record.normalize();
        assert_eq!(record.media_kind, MediaKind::Photo);
        assert_eq!(record.short_date(), "Mar 7");
    }

    #[test]
    fn round_trip_preserves_millisecond_timestamp() {
        let record = WishRecord::new(
            WishId::generate(),
            "Cy",
            None,
            vec![item(AttachmentKind::Photo), item(AttachmentKind::Video)],
            at(1_700_000_000_001),
        );
        let raw = serde_json::to_string(&record).expect("serialize");
        let back: WishRecord = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn edit_trims_and_blanks_message() {
        let mut record = WishRecord::new(
            WishId::from("c"),
            "Old",
            Some("old".into()),
            Vec::new(),
            at(0),
        );
        record.apply_edit("  New  ", "   ");
        assert_eq!(record.sender_name, "New");
        assert_eq!(record.message, None);
    }

    #[test]
    fn initial_uppercases_first_char() {
        let record = WishRecord::new(WishId::from("d"), "ésa", None, Vec::new(), at(0));
        assert_eq!(record.initial(), "É");
        assert_eq!(clamp_chars("ééé", 2), "éé");
    }
}
