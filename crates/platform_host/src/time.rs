//! Time and identifier helpers shared across host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SubsecRound, Utc};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns the current UTC time truncated to millisecond precision.
///
/// Millisecond precision keeps the value stable through an ISO-8601 round trip.
pub fn utc_now_ms() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Generates a fresh random identifier for a persisted record.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generates a visitor identifier of the form `<unix-ms>-<13 random base36 chars>`.
pub fn new_visitor_id() -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let suffix: String = uuid::Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(13)
        .map(|byte| ALPHABET[usize::from(*byte) % ALPHABET.len()] as char)
        .collect();
    format!("{}-{suffix}", unix_time_ms_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_now_has_no_sub_millisecond_component() {
        let now = utc_now_ms();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn record_ids_are_unique_uuids() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn visitor_id_has_timestamp_and_base36_suffix() {
        let id = new_visitor_id();
        let (millis, suffix) = id.split_once('-').expect("separator");
        assert!(millis.parse::<u64>().is_ok());
        assert_eq!(suffix.len(), 13);
        assert!(suffix
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
    }
}
