//! Time-sortable user identifiers (ULID: 48-bit millisecond timestamp + 80 random bits).

use crate::error::IdError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use ulid::Ulid;

const MAX_TIMESTAMP_MS: u128 = (1 << 48) - 1;

const RANDOM_MASK: u128 = (1 << 80) - 1;

/// Mixed into the seed so requests landing on the same nanosecond still diverge.
static SEED_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate an identifier for the current wall-clock time.
pub fn generate() -> Result<Ulid, IdError> {
    generate_at(SystemTime::now())
}

/// Generate an identifier stamped with `now`. The random part comes from a
/// generator seeded from the nanosecond clock at the time of the call.
pub fn generate_at(now: SystemTime) -> Result<Ulid, IdError> {
    let ms = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| IdError::ClockBeforeEpoch)?
        .as_millis();
    if ms > MAX_TIMESTAMP_MS {
        return Err(IdError::TimestampOverflow(ms));
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| IdError::ClockBeforeEpoch)?
        .as_nanos() as u64;
    let seq = SEED_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut rng = StdRng::seed_from_u64(nanos ^ seq.rotate_left(32));
    let random = rng.gen::<u128>() & RANDOM_MASK;

    Ok(Ulid::from_parts(ms as u64, random))
}
