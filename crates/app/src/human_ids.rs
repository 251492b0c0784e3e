//! Human-readable booking and payment identifiers.
//!
//! Identifiers carry a cosmetic per-year sequence so staff can read them
//! aloud. Uniqueness is enforced by the database, not by the sequence.

use jiff::{Timestamp, tz::TimeZone};
use rand::Rng;

const RANDOM_SUFFIX_LEN: usize = 6;

/// Kind of record a human id is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanIdKind {
    /// `HH2026-0001-12345678`
    Booking,

    /// `PAY2026000001-12345678`
    Payment,
}

impl HumanIdKind {
    /// Prefix shared by every id of this kind issued in `year`.
    ///
    /// The per-year sequence is the number of existing ids starting with it.
    #[must_use]
    pub fn year_prefix(self, year: i16) -> String {
        match self {
            Self::Booking => format!("HH{year}-"),
            Self::Payment => format!("PAY{year}"),
        }
    }

    /// Id built from a count-based sequence and the last eight digits of the clock.
    #[must_use]
    pub fn sequenced(self, sequence: u64, now: Timestamp) -> String {
        let year = year_of(now);
        let suffix = clock_suffix(now);

        match self {
            Self::Booking => format!("HH{year}-{sequence:04}-{suffix}"),
            Self::Payment => format!("PAY{year}{sequence:06}-{suffix}"),
        }
    }

    /// Id built from the full epoch milliseconds and a random base36 tail.
    #[must_use]
    pub fn fallback<R: Rng + ?Sized>(self, now: Timestamp, rng: &mut R) -> String {
        let year = year_of(now);
        let millis = now.as_millisecond();
        let random = random_base36(rng);

        match self {
            Self::Booking => format!("HH{year}-{millis}-{random}"),
            Self::Payment => format!("PAY{year}{millis}-{random}"),
        }
    }

    /// Generate an id, preferring the sequenced form when a count is known.
    #[must_use]
    pub fn generate(self, existing_this_year: Option<u64>, now: Timestamp) -> String {
        match existing_this_year.and_then(|count| count.checked_add(1)) {
            Some(sequence) => self.sequenced(sequence, now),
            None => self.fallback(now, &mut rand::thread_rng()),
        }
    }
}

/// Calendar year of `now` in UTC.
#[must_use]
pub fn year_of(now: Timestamp) -> i16 {
    now.to_zoned(TimeZone::UTC).year()
}

fn clock_suffix(now: Timestamp) -> String {
    format!("{:08}", now.as_millisecond().rem_euclid(100_000_000))
}

fn random_base36<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| {
            char::from_digit(rng.gen_range(0..36), 36)
                .map_or('0', |digit| digit.to_ascii_uppercase())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use rustc_hash::FxHashSet;
    use testresult::TestResult;

    use super::*;

    fn is_booking_shaped(id: &str) -> bool {
        let Some(rest) = id.strip_prefix("HH") else {
            return false;
        };

        let parts: Vec<&str> = rest.split('-').collect();

        parts.len() == 3
            && parts.first().is_some_and(|year| {
                year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())
            })
            && parts.iter().all(|part| !part.is_empty())
    }

    #[test]
    fn booking_sequenced_format() -> TestResult {
        let now: Timestamp = "2026-03-14T09:26:53.589Z".parse()?;

        let id = HumanIdKind::Booking.sequenced(7, now);

        assert_eq!(id, format!("HH2026-0007-{:08}", now.as_millisecond() % 100_000_000));
        assert!(is_booking_shaped(&id), "unexpected booking id shape: {id}");

        Ok(())
    }

    #[test]
    fn booking_sequence_grows_past_four_digits() -> TestResult {
        let now: Timestamp = "2026-03-14T09:26:53Z".parse()?;

        let id = HumanIdKind::Booking.sequenced(12_345, now);

        assert!(id.starts_with("HH2026-12345-"), "unexpected id: {id}");

        Ok(())
    }

    #[test]
    fn payment_sequenced_format() -> TestResult {
        let now: Timestamp = "2026-12-31T23:59:59.999Z".parse()?;

        let id = HumanIdKind::Payment.sequenced(42, now);

        assert_eq!(id, format!("PAY2026000042-{:08}", now.as_millisecond() % 100_000_000));

        Ok(())
    }

    #[test]
    fn clock_suffix_is_zero_padded() -> TestResult {
        let now = Timestamp::from_millisecond(1_700_000_000_123)?;

        assert_eq!(clock_suffix(now), "00000123");

        Ok(())
    }

    #[test]
    fn booking_fallback_uses_epoch_millis_and_random_tail() -> TestResult {
        let now: Timestamp = "2026-06-01T00:00:00Z".parse()?;
        let mut rng = StdRng::seed_from_u64(7);

        let id = HumanIdKind::Booking.fallback(now, &mut rng);
        let expected_prefix = format!("HH2026-{}-", now.as_millisecond());

        let tail = id.strip_prefix(&expected_prefix).unwrap_or_default();

        assert_eq!(tail.len(), RANDOM_SUFFIX_LEN, "unexpected id: {id}");
        assert!(
            tail.chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
            "tail must be upper-case base36: {id}"
        );
        assert!(is_booking_shaped(&id), "unexpected booking id shape: {id}");

        Ok(())
    }

    #[test]
    fn payment_fallback_format() -> TestResult {
        let now: Timestamp = "2026-06-01T00:00:00Z".parse()?;
        let mut rng = StdRng::seed_from_u64(11);

        let id = HumanIdKind::Payment.fallback(now, &mut rng);

        assert!(
            id.starts_with(&format!("PAY2026{}-", now.as_millisecond())),
            "unexpected id: {id}"
        );

        Ok(())
    }

    #[test]
    fn generate_without_count_falls_back() -> TestResult {
        let now: Timestamp = "2026-06-01T00:00:00Z".parse()?;

        let id = HumanIdKind::Booking.generate(None, now);

        assert!(
            id.starts_with(&format!("HH2026-{}-", now.as_millisecond())),
            "unexpected id: {id}"
        );

        Ok(())
    }

    #[test]
    fn year_prefix_matches_generated_ids() -> TestResult {
        let now: Timestamp = "2026-06-01T00:00:00Z".parse()?;

        for kind in [HumanIdKind::Booking, HumanIdKind::Payment] {
            let prefix = kind.year_prefix(year_of(now));

            assert!(kind.generate(Some(0), now).starts_with(&prefix));
            assert!(kind.generate(None, now).starts_with(&prefix));
        }

        Ok(())
    }

    #[test]
    fn rapid_fallback_ids_do_not_collide() {
        let now = Timestamp::now();
        let mut rng = StdRng::seed_from_u64(2026);
        let mut seen = FxHashSet::default();

        for _ in 0..1_000 {
            let id = HumanIdKind::Booking.fallback(now, &mut rng);

            assert!(is_booking_shaped(&id), "unexpected booking id shape: {id}");
            assert!(seen.insert(id), "duplicate booking id generated");
        }
    }
}
