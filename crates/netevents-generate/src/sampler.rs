//! Field samplers used by the synthesizer.

use chrono::{DateTime, NaiveDate, Utc};
use netevents_core::{EARLIEST_YEAR, EventType, LATEST_YEAR, TYPE_ROLL_RANGE, type_for_roll};
use rand::Rng;

/// Alphabet for free-text tokens.
pub const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn sample_event_type<R: Rng + ?Sized>(rng: &mut R) -> EventType {
    type_for_roll(rng.random_range(0..TYPE_ROLL_RANGE))
}

/// Random version 4 UUID built from the caller's RNG, so refs are
/// reproducible for a fixed seed.
pub fn sample_ref<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}

/// Alphanumeric token with a length drawn uniformly from `min_len..=max_len`.
pub fn sample_token<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> String {
    let len = rng.random_range(min_len..=max_len.max(min_len));
    let mut token = String::with_capacity(len);
    for _ in 0..len {
        token.push(char::from(ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())]));
    }
    token
}

/// Timestamp with independently drawn components inside the historical
/// window. Days are drawn from `1..max_day_of_month`, which skips the tail of
/// longer months.
pub fn sample_occurred_at<R: Rng + ?Sized>(rng: &mut R, max_day_of_month: u32) -> DateTime<Utc> {
    let year = rng.random_range(EARLIEST_YEAR..=LATEST_YEAR);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..max_day_of_month);
    let hour = rng.random_range(0..24);
    let minute = rng.random_range(0..60);
    let second = rng.random_range(0..60);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .unwrap_or_default()
        .and_utc()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn tokens_respect_bounds_and_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2000 {
            let token = sample_token(&mut rng, 1, 40);
            assert!((1..=40).contains(&token.len()), "{token}");
            assert!(token.bytes().all(|b| ALPHANUMERIC.contains(&b)), "{token}");
        }
    }

    #[test]
    fn empty_tokens_are_possible_when_allowed() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let saw_empty = (0..5000).any(|_| sample_token(&mut rng, 0, 40).is_empty());
        assert!(saw_empty);
    }

    #[test]
    fn refs_are_v4_uuids() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let value = sample_ref(&mut rng);
        let parsed = uuid::Uuid::parse_str(&value).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn timestamps_stay_inside_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (start, end) = netevents_core::occurrence_window();
        for _ in 0..5000 {
            let ts = sample_occurred_at(&mut rng, 28);
            assert!(ts >= start && ts < end, "{ts}");
            assert!(chrono::Datelike::day(&ts) <= 27);
        }
    }
}
