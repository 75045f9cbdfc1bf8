//! Clock-bound unique identifier generation.
//!
//! The pure construction lives in
//! [`unique_string_from`](crate::domain::text::unique_string_from); this
//! wrapper binds it to a [`Clock`] and a random salt so call sites get a
//! fresh identifier per call.

use crate::application::ports::Clock;
use crate::domain::text::unique_string_from;
use rand::Rng;
use std::sync::Arc;

/// Salt range: five to six decimal digits, so identifiers stay uniform in
/// length for a given timestamp era.
const SALT_RANGE: std::ops::Range<u32> = 65_536..131_072;

/// Generates compact unique identifiers against an injected clock.
///
/// Identifiers combine the clock's current epoch milliseconds with a random
/// salt, rendered base 32. Calls at distinct milliseconds are guaranteed
/// distinct; calls within the same millisecond differ unless the salts
/// collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
}

impl IdGenerator {
    /// Create a generator reading time through `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Produce the next identifier.
    pub fn next_id(&self) -> String {
        let millis = self.clock.wall().timestamp_millis();
        let salt = rand::thread_rng().gen_range(SALT_RANGE);
        unique_string_from(millis, salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::MockClock;
    use chrono::{Local, TimeZone};
    use std::time::{Duration, Instant};

    fn generator_at(wall: chrono::DateTime<Local>) -> (IdGenerator, MockClock) {
        let clock = MockClock::new(Instant::now(), wall);
        (IdGenerator::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_ids_use_base32_alphabet() {
        let wall = Local
            .with_ymd_and_hms(2024, 3, 7, 12, 0, 0)
            .single()
            .expect("unambiguous");
        let (generator, _clock) = generator_at(wall);

        let id = generator.next_id();
        assert!(!id.is_empty());
        assert!(id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'v').contains(&b)));
    }

    #[test]
    fn test_ids_differ_across_milliseconds() {
        let wall = Local
            .with_ymd_and_hms(2024, 3, 7, 12, 0, 0)
            .single()
            .expect("unambiguous");
        let (generator, clock) = generator_at(wall);

        let first = generator.next_id();
        clock.advance(Duration::from_millis(1));
        let second = generator.next_id();
        assert_ne!(first, second);
    }
}
