//! Publication date sampling.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;

/// Uniformly sample an instant in `[now - lookback, now]` and truncate it to
/// a calendar date.
///
/// The result is never after `now`'s date and never before the lower bound's
/// date. A zero or negative lookback collapses to `now`'s date.
pub fn random_date<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    lookback: Duration,
) -> NaiveDate {
    let span = lookback.num_seconds();
    if span <= 0 {
        return now.date_naive();
    }
    let back = rng.random_range(0..=span);
    (now - Duration::seconds(back)).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sampled_dates_stay_inside_the_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();
        let lookback = Duration::days(365 * 10);
        let lower = (now - lookback).date_naive();
        let upper = now.date_naive();

        for _ in 0..10_000 {
            let d = random_date(&mut rng, now, lookback);
            assert!(d >= lower, "{d} before lower bound {lower}");
            assert!(d <= upper, "{d} after today {upper}");
        }
    }

    #[test]
    fn zero_lookback_is_today() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        assert_eq!(random_date(&mut rng, now, Duration::zero()), now.date_naive());
    }

    #[test]
    fn samples_cover_more_than_one_day() {
        // A uniform draw over ten years that always lands on the same date
        // would mean the sampling is broken.
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        let lookback = Duration::days(365 * 10);
        let first = random_date(&mut rng, now, lookback);
        let distinct = (0..1000)
            .map(|_| random_date(&mut rng, now, lookback))
            .any(|d| d != first);
        assert!(distinct);
    }
}
