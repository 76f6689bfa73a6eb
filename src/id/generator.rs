//! Identifier generators
//!
//! Construction of a packet draws its id from an `IdGenerator`. The
//! process-wide default is `RandomIdGenerator`; tests inject a seeded or
//! sequential generator to make ids reproducible.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

/// Source of fresh packet identifiers
///
/// Implementations must be safe to share across threads and must not hand
/// out the same id twice within the life of the process.
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier
    fn next_id(&self) -> Uuid;
}

/// Random version 4 UUIDs from the operating system's entropy source
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Reproducible version 4 UUIDs drawn from a seeded ChaCha8 stream
///
/// Two generators built from the same seed yield the same sequence.
pub struct SeededIdGenerator {
    /// Shared across threads, so every `next_id` takes the lock
    rng: Mutex<ChaCha8Rng>,
}

impl SeededIdGenerator {
    /// Create a generator from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for SeededIdGenerator {
    fn next_id(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.lock().fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Counter-based ids: `00000000-0000-0000-0000-000000000001`, then `...002`
///
/// The counter occupies the low 64 bits, so ids stay readable in test
/// output and their shortened forms stay distinct for the first 2^48 ids.
/// The counter never wraps: once it reaches `u64::MAX` every further id is
/// a random version 4 UUID.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start counting at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(n) => Uuid::from_u64_pair(0, n),
            Err(_) => {
                tracing::warn!("sequential id counter exhausted, using random ids");
                Uuid::new_v4()
            }
        }
    }
}
