// ABOUTME: Age-at-measurement arithmetic for growth table lookups
// ABOUTME: Derives exact age in days and fractional months from dates or direct input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Mean month length used to convert between days and months (365.25 / 12)
///
/// The single conversion rule applied everywhere: the age-keyed reference
/// tables are tabulated in months, callers often supply dates.
pub const DAYS_PER_MONTH: f64 = 30.4375;

/// Exact age at the moment of measurement
///
/// Constructed once per evaluation; both representations are kept so the
/// caller-facing result can report days while table lookups use months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeAtMeasurement {
    /// Whole days lived at measurement
    pub days: i64,
    /// Fractional months (days / 30.4375)
    pub months: f64,
}

impl AgeAtMeasurement {
    /// Age from date of birth and date of measurement
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMeasurement`] when the measurement date
    /// precedes the birth date.
    pub fn from_dates(date_of_birth: NaiveDate, date_of_measurement: NaiveDate) -> EngineResult<Self> {
        let days = (date_of_measurement - date_of_birth).num_days();
        if days < 0 {
            return Err(EngineError::InvalidMeasurement {
                field: "date_of_measurement",
                reason: format!(
                    "measurement date {date_of_measurement} precedes birth date {date_of_birth}"
                ),
            });
        }
        #[allow(clippy::cast_precision_loss)]
        let months = days as f64 / DAYS_PER_MONTH;
        Ok(Self { days, months })
    }

    /// Age from fractional months supplied directly
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMeasurement`] for negative or
    /// non-finite ages.
    pub fn from_months(months: f64) -> EngineResult<Self> {
        if !months.is_finite() || months < 0.0 {
            return Err(EngineError::InvalidMeasurement {
                field: "age_months",
                reason: format!("age must be a non-negative finite number of months, got {months}"),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let days = (months * DAYS_PER_MONTH) as i64;
        Ok(Self { days, months })
    }

    /// Human-readable age, "2 tahun 3 bulan" style
    #[must_use]
    pub fn display_id(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = self.months.floor() as u32;
        let years = whole / 12;
        let months = whole % 12;
        match (years, months) {
            (0, m) => format!("{m} bulan"),
            (y, 0) => format!("{y} tahun"),
            (y, m) => format!("{y} tahun {m} bulan"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_from_dates_uses_mean_month_length() {
        let age =
            AgeAtMeasurement::from_dates(date(2023, 1, 15), date(2025, 1, 15)).unwrap();
        assert_eq!(age.days, 731);
        assert!((age.months - 731.0 / 30.4375).abs() < 1e-12);
    }

    #[test]
    fn measurement_before_birth_is_rejected() {
        let err =
            AgeAtMeasurement::from_dates(date(2024, 6, 1), date(2024, 5, 1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidMeasurement { .. }));
    }

    #[test]
    fn negative_and_nan_months_are_rejected() {
        assert!(AgeAtMeasurement::from_months(-0.1).is_err());
        assert!(AgeAtMeasurement::from_months(f64::NAN).is_err());
        assert!(AgeAtMeasurement::from_months(0.0).is_ok());
    }

    #[test]
    fn indonesian_age_text() {
        assert_eq!(AgeAtMeasurement::from_months(8.6).unwrap().display_id(), "8 bulan");
        assert_eq!(
            AgeAtMeasurement::from_months(27.2).unwrap().display_id(),
            "2 tahun 3 bulan"
        );
        assert_eq!(AgeAtMeasurement::from_months(24.0).unwrap().display_id(), "2 tahun");
    }
}
