// Live updater - Keeps the macro series current without regenerating history
use crate::application::series_generator::SeriesGenerator;
use crate::domain::observations::MacroObservation;
use crate::domain::series::Series;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct LiveUpdater {
    generator: SeriesGenerator,
    threshold: Duration,
}

impl LiveUpdater {
    pub fn new(generator: SeriesGenerator, threshold_days: i64) -> Self {
        Self {
            generator,
            threshold: Duration::days(threshold_days.max(1)),
        }
    }

    /// Appends at most one observation dated `last + threshold` when the last
    /// one is older than the threshold at `now`. Rows are taken as midnight UTC.
    /// Returns whether a row was added.
    pub fn update<R: Rng + ?Sized>(
        &self,
        series: &mut Series<MacroObservation>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> bool {
        let Some(last) = series.last() else {
            return false;
        };
        if now - last.date.and_time(NaiveTime::MIN).and_utc() <= self.threshold {
            return false;
        }

        let jitter = self.generator.config().macro_economy.live_growth_jitter.abs();
        let growth = last.gdp_growth + rng.gen_range(-jitter..=jitter);
        let gdp = last.gdp_monthly * (1.0 + growth / 100.0);
        let date = last.date + self.threshold;

        let observation = self.generator.macro_observation(date, gdp, growth, rng);
        match series.push(observation) {
            Ok(()) => {
                tracing::debug!("Appended live macro observation for {}", date);
                true
            }
            Err(e) => {
                tracing::warn!("Live macro observation rejected: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::GeneratorConfig;
    use chrono::{NaiveDate, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn setup() -> (LiveUpdater, Series<MacroObservation>, StdRng) {
        let generator = SeriesGenerator::new(GeneratorConfig {
            start: Some(ymd(2024, 1, 1)),
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(11);
        // Last observation: 2025-12-01
        let series = generator.macro_series(ymd(2026, 1, 1), &mut rng);
        (LiveUpdater::new(generator, 30), series, rng)
    }

    #[test]
    fn test_no_append_within_window() {
        let (updater, mut series, mut rng) = setup();
        let before = series.len();

        assert!(!updater.update(&mut series, at(2025, 12, 20), &mut rng));
        assert!(!updater.update(&mut series, at(2025, 12, 31), &mut rng));
        assert_eq!(series.len(), before);
    }

    #[test]
    fn test_exactly_thirty_days_is_not_enough() {
        let (updater, mut series, mut rng) = setup();
        let before = series.len();

        assert!(!updater.update(&mut series, at(2025, 12, 31), &mut rng));
        assert!(updater.update(&mut series, at(2026, 1, 1), &mut rng));
        assert_eq!(series.len(), before + 1);
    }

    #[test]
    fn test_threshold_measured_in_time_not_whole_days() {
        let (updater, mut series, mut rng) = setup();
        let before = series.len();

        // Last row 2025-12-01; thirty days and one second later
        let just_past = at(2025, 12, 31) + Duration::seconds(1);
        assert!(updater.update(&mut series, just_past, &mut rng));
        assert_eq!(series.len(), before + 1);
        assert_eq!(series.last().unwrap().date, ymd(2025, 12, 31));

        let half_day_later = Utc.with_ymd_and_hms(2026, 1, 30, 12, 0, 0).unwrap();
        assert!(updater.update(&mut series, half_day_later, &mut rng));
        assert_eq!(series.last().unwrap().date, ymd(2026, 1, 30));
    }

    #[test]
    fn test_appends_one_row_thirty_days_after_last() {
        let (updater, mut series, mut rng) = setup();
        let before = series.len();
        let last = series.last().unwrap().clone();

        // Months behind: still only one row per call.
        assert!(updater.update(&mut series, at(2026, 6, 1), &mut rng));
        assert_eq!(series.len(), before + 1);

        let appended = series.last().unwrap();
        assert_eq!(appended.date, ymd(2025, 12, 31));
        assert!((appended.gdp_growth - last.gdp_growth).abs() <= 0.1 + 1e-12);
        let expected_gdp = last.gdp_monthly * (1.0 + appended.gdp_growth / 100.0);
        assert!((appended.gdp_monthly - expected_gdp).abs() < 1e-9);
        assert!((18.0..=24.0).contains(&appended.unemployment_rate));
        assert!((1.5..=4.0).contains(&appended.inflation));
    }

    #[test]
    fn test_repeated_calls_catch_up_one_at_a_time() {
        let (updater, mut series, mut rng) = setup();
        let before = series.len();
        let today = at(2026, 3, 15);

        let mut appended = 0;
        while updater.update(&mut series, today, &mut rng) {
            appended += 1;
        }
        // 2025-12-31, 2026-01-30, 2026-03-01 (then 14 days old)
        assert_eq!(appended, 3);
        assert_eq!(series.len(), before + 3);
        assert_eq!(series.last().unwrap().date, ymd(2026, 3, 1));
        assert!(!updater.update(&mut series, today, &mut rng));
    }

    #[test]
    fn test_empty_series_is_left_alone() {
        let (updater, _, mut rng) = setup();
        let mut empty = Series::new(crate::domain::series::Cadence::Monthly);
        assert!(!updater.update(&mut empty, at(2026, 1, 1), &mut rng));
        assert!(empty.is_empty());
    }
}
