// ABOUTME: Reference growth curves rendered from the parameter tables
// ABOUTME: Inverts the z-score transform at standard z-lines for charting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

//! Reference curves for growth charts.
//!
//! A growth chart draws one curve per z-line (−3 through +3) across the
//! table's full key domain. Each curve point is the raw measurement value a
//! child sitting exactly on that z-line would have, obtained by inverting
//! the table's transform at every tabulated row. The z-lines are
//! independent, so they render in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use anthro_core::errors::{EngineError, EngineResult};
use anthro_core::models::{Indicator, Sex, Standard, TableKind};
use anthro_reference::ReferenceStore;

use crate::transform::from_zscore;

/// The z-lines a standard growth chart draws
pub const STANDARD_ZLINES: [f64; 7] = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];

/// One point of a reference curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Table key (age in months, or length/height in centimeters)
    pub key: f64,
    /// Raw measurement value on the z-line at this key
    pub value: f64,
}

/// A full reference curve along one z-line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZlineCurve {
    /// The z-line this curve traces
    pub zline: f64,
    /// Curve points, ascending by key
    pub points: Vec<CurvePoint>,
}

/// Render the reference curves of one table at the given z-lines
///
/// # Errors
///
/// [`EngineError::InvalidParameters`] when the series is missing or a
/// z-line falls outside a row's Box-Cox support.
pub fn reference_curves(
    store: &ReferenceStore,
    standard: Standard,
    table: TableKind,
    sex: Sex,
    zlines: &[f64],
) -> EngineResult<Vec<ZlineCurve>> {
    let indicator = indicator_for(table);
    let rows = store
        .points(standard, table, sex)
        .map_err(|_| EngineError::InvalidParameters {
            indicator,
            reason: "reference series unavailable",
        })?;

    zlines
        .par_iter()
        .map(|&zline| {
            let points = rows
                .iter()
                .map(|row| {
                    from_zscore(indicator, zline, &row.params).map(|value| CurvePoint {
                        key: row.key,
                        value,
                    })
                })
                .collect::<EngineResult<Vec<CurvePoint>>>()?;
            Ok(ZlineCurve { zline, points })
        })
        .collect()
}

/// The indicator a table's curves report under
const fn indicator_for(table: TableKind) -> Indicator {
    match table {
        TableKind::WeightForAge => Indicator::WeightForAge,
        TableKind::LengthHeightForAge => Indicator::HeightForAge,
        TableKind::BmiForAge => Indicator::BmiForAge,
        TableKind::HeadCircumferenceForAge => Indicator::HeadCircumferenceForAge,
        TableKind::WeightForLength | TableKind::WeightForHeight => Indicator::WeightForHeight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ReferenceStore {
        ReferenceStore::embedded().unwrap()
    }

    #[test]
    fn curves_cover_every_tabulated_key_in_order() {
        let store = store();
        let curves = reference_curves(
            &store,
            Standard::Who,
            TableKind::WeightForAge,
            Sex::Male,
            &STANDARD_ZLINES,
        )
        .unwrap();
        assert_eq!(curves.len(), STANDARD_ZLINES.len());
        let rows = store
            .points(Standard::Who, TableKind::WeightForAge, Sex::Male)
            .unwrap();
        for curve in &curves {
            assert_eq!(curve.points.len(), rows.len());
            for window in curve.points.windows(2) {
                assert!(window[0].key < window[1].key);
            }
        }
    }

    #[test]
    fn zlines_are_vertically_ordered_at_every_key() {
        let store = store();
        let curves = reference_curves(
            &store,
            Standard::Permenkes,
            TableKind::LengthHeightForAge,
            Sex::Female,
            &STANDARD_ZLINES,
        )
        .unwrap();
        let n = curves[0].points.len();
        for i in 0..n {
            for pair in curves.windows(2) {
                assert!(
                    pair[0].points[i].value < pair[1].points[i].value,
                    "z-line {} must lie below z-line {} at key {}",
                    pair[0].zline,
                    pair[1].zline,
                    pair[0].points[i].key
                );
            }
        }
    }

    #[test]
    fn zero_line_traces_the_median() {
        let store = store();
        let curves = reference_curves(
            &store,
            Standard::Who,
            TableKind::BmiForAge,
            Sex::Male,
            &[0.0],
        )
        .unwrap();
        let rows = store
            .points(Standard::Who, TableKind::BmiForAge, Sex::Male)
            .unwrap();
        for (point, row) in curves[0].points.iter().zip(rows) {
            assert!((point.value - row.params.median()).abs() < 1e-9);
        }
    }
}
