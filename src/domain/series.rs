// Time series domain model
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// A single timestamped row of domain-specific fields.
pub trait Observation: Clone + Serialize + Send + Sync {
    fn date(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cadence {
    Monthly,
    Yearly,
}

impl Cadence {
    pub fn next(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Cadence::Monthly => date.checked_add_months(Months::new(1)),
            Cadence::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    /// First timestamp of this cadence at or after `date`.
    pub fn align(self, date: NaiveDate) -> NaiveDate {
        let aligned = match self {
            Cadence::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            Cadence::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
        .unwrap_or(date);

        if aligned < date {
            self.next(aligned).unwrap_or(aligned)
        } else {
            aligned
        }
    }

    /// Timestamps `d` with `start <= d < end`, stepping by this cadence.
    pub fn timestamps(self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = self.align(start);
        while current < end {
            dates.push(current);
            match self.next(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        dates
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("observation dated {new} does not follow last observation {last}")]
    OutOfOrder { last: NaiveDate, new: NaiveDate },
}

#[derive(Debug, Clone, Serialize)]
pub struct Series<T> {
    cadence: Cadence,
    observations: Vec<T>,
}

impl<T: Observation> Series<T> {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            observations: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn push(&mut self, observation: T) -> Result<(), SeriesError> {
        if let Some(last) = self.observations.last() {
            if observation.date() <= last.date() {
                return Err(SeriesError::OutOfOrder {
                    last: last.date(),
                    new: observation.date(),
                });
            }
        }
        self.observations.push(observation);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.observations.last()
    }

    /// Last observation and the one before it, if both exist.
    pub fn last_two(&self) -> Option<(&T, &T)> {
        match self.observations.as_slice() {
            [.., previous, last] => Some((previous, last)),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.observations.iter()
    }

    /// Observations dated within `[from, to]`.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &T> {
        self.iter()
            .filter(move |o| o.date() >= from && o.date() <= to)
    }

    /// True when every consecutive pair is exactly one cadence step apart.
    #[cfg(test)]
    pub fn is_evenly_spaced(&self) -> bool {
        self.observations
            .windows(2)
            .all(|pair| self.cadence.next(pair[0].date()) == Some(pair[1].date()))
    }
}

impl<T: Observation> FromIterator<T> for Series<T>
where
    T: HasCadence,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut series = Series::new(T::CADENCE);
        for observation in iter {
            // Generated rows come from a strictly increasing date list.
            let _ = series.push(observation);
        }
        series
    }
}

/// Cadence tied to an observation type.
pub trait HasCadence {
    const CADENCE: Cadence;
}

/// Converts a date to epoch milliseconds (UTC midnight), the time axis used by charts.
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct Row(NaiveDate);

    impl Observation for Row {
        fn date(&self) -> NaiveDate {
            self.0
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_timestamps_are_half_open() {
        let dates = Cadence::Monthly.timestamps(ymd(2024, 1, 1), ymd(2026, 1, 1));
        assert_eq!(dates.len(), 24);
        assert_eq!(dates.first(), Some(&ymd(2024, 1, 1)));
        assert_eq!(dates.last(), Some(&ymd(2025, 12, 1)));
    }

    #[test]
    fn test_monthly_timestamps_include_current_month() {
        let dates = Cadence::Monthly.timestamps(ymd(2026, 8, 1), ymd(2026, 10, 17));
        assert_eq!(dates, vec![ymd(2026, 8, 1), ymd(2026, 9, 1), ymd(2026, 10, 1)]);
    }

    #[test]
    fn test_align_moves_mid_month_start_forward() {
        assert_eq!(Cadence::Monthly.align(ymd(2024, 3, 15)), ymd(2024, 4, 1));
        assert_eq!(Cadence::Yearly.align(ymd(2024, 1, 1)), ymd(2024, 1, 1));
        assert_eq!(Cadence::Yearly.align(ymd(2024, 2, 1)), ymd(2025, 1, 1));
    }

    #[test]
    fn test_push_rejects_non_increasing_dates() {
        let mut series = Series::new(Cadence::Monthly);
        series.push(Row(ymd(2024, 2, 1))).unwrap();

        let err = series.push(Row(ymd(2024, 2, 1))).unwrap_err();
        assert_eq!(
            err,
            SeriesError::OutOfOrder {
                last: ymd(2024, 2, 1),
                new: ymd(2024, 2, 1)
            }
        );
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_evenly_spaced_detects_gaps() {
        let mut series = Series::new(Cadence::Monthly);
        series.push(Row(ymd(2024, 1, 1))).unwrap();
        series.push(Row(ymd(2024, 2, 1))).unwrap();
        assert!(series.is_evenly_spaced());

        series.push(Row(ymd(2024, 4, 1))).unwrap();
        assert!(!series.is_evenly_spaced());
    }

    #[test]
    fn test_between_is_inclusive() {
        let mut series = Series::new(Cadence::Monthly);
        for month in 1..=6 {
            series.push(Row(ymd(2024, month, 1))).unwrap();
        }
        let picked: Vec<_> = series.between(ymd(2024, 2, 1), ymd(2024, 4, 1)).collect();
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_date_to_millis_epoch() {
        assert_eq!(date_to_millis(ymd(1970, 1, 2)), 86_400_000);
    }
}
