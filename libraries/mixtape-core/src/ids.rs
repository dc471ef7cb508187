//! Identifier generation.
//!
//! Ids are random UUID v4 strings drawn from the OS random source. When that
//! source is unavailable, a timestamp + pseudo-random composite is used instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new opaque identifier.
///
/// Unique with overwhelming probability across processes and devices.
pub fn generate() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(err) => {
            tracing::debug!(error = %err, "OS random source unavailable, using fallback id");
            fallback_id()
        }
    }
}

/// `{millis}-{hex}` composite used without a cryptographic random source.
fn fallback_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = splitmix64(u64::from(now.subsec_nanos()) ^ count.rotate_left(32) ^ stack_entropy());
    format!("{}-{:016x}{:x}", now.as_millis(), suffix, count)
}

// Address of a local varies between runs under ASLR.
fn stack_entropy() -> u64 {
    let marker = 0u8;
    std::ptr::addr_of!(marker) as u64
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Check whether a value is a well-formed UUID (as produced by the primary path).
pub fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_uuids() {
        let id = generate();
        assert!(is_uuid(&id), "expected uuid, got {}", id);
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn fallback_ids_never_collide_in_process() {
        let ids: HashSet<String> = (0..1000).map(|_| fallback_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn fallback_id_starts_with_timestamp() {
        let id = fallback_id();
        let (millis, rest) = id.split_once('-').expect("composite id");
        assert!(millis.parse::<u128>().is_ok());
        assert!(rest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
