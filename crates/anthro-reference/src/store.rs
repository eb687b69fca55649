// ABOUTME: Read-only reference store with validated load and bracketing lookup
// ABOUTME: Embedded WHO/Permenkes tables, strict monotonicity checks, no extrapolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

use std::collections::HashMap;

use tracing::{debug, info};

use anthro_core::models::{Sex, Standard, TableKind};

use crate::document::{row_to_point, sex_from_key, Parameters, ReferencePoint, TableDocument};
use crate::error::{DatasetError, DatasetResult};

/// Key-match tolerance for treating a query as landing exactly on a row
const EXACT_KEY_EPSILON: f64 = 1e-9;

/// Embedded reference documents compiled into the crate
///
/// One JSON document per (standard, table), both sexes inside. The WHO
/// documents carry LMS rows; the Permenkes documents carry median ± SD rows
/// as published in Permenkes 2/2020.
const EMBEDDED_DOCUMENTS: [(&str, &str); 12] = [
    (
        "who_weight_for_age",
        include_str!("../data/who_weight_for_age.json"),
    ),
    (
        "who_length_height_for_age",
        include_str!("../data/who_length_height_for_age.json"),
    ),
    (
        "who_bmi_for_age",
        include_str!("../data/who_bmi_for_age.json"),
    ),
    (
        "who_head_circumference_for_age",
        include_str!("../data/who_head_circumference_for_age.json"),
    ),
    (
        "who_weight_for_length",
        include_str!("../data/who_weight_for_length.json"),
    ),
    (
        "who_weight_for_height",
        include_str!("../data/who_weight_for_height.json"),
    ),
    (
        "permenkes_weight_for_age",
        include_str!("../data/permenkes_weight_for_age.json"),
    ),
    (
        "permenkes_length_height_for_age",
        include_str!("../data/permenkes_length_height_for_age.json"),
    ),
    (
        "permenkes_bmi_for_age",
        include_str!("../data/permenkes_bmi_for_age.json"),
    ),
    (
        "permenkes_head_circumference_for_age",
        include_str!("../data/permenkes_head_circumference_for_age.json"),
    ),
    (
        "permenkes_weight_for_length",
        include_str!("../data/permenkes_weight_for_length.json"),
    ),
    (
        "permenkes_weight_for_height",
        include_str!("../data/permenkes_weight_for_height.json"),
    ),
];

/// Result of a bracketing lookup
#[derive(Debug, Clone, Copy)]
pub enum Bracket<'a> {
    /// The query key landed exactly on a tabulated row
    Exact(&'a ReferencePoint),
    /// The query key falls strictly between these two adjacent rows
    Between(&'a ReferencePoint, &'a ReferencePoint),
}

/// Immutable store of growth reference tables
///
/// Built once at startup, then shared read-only across arbitrarily many
/// concurrent evaluations; lookups never lock and never mutate.
#[derive(Debug)]
pub struct ReferenceStore {
    tables: HashMap<(Standard, TableKind, Sex), Vec<ReferencePoint>>,
}

impl ReferenceStore {
    /// Build the store from the embedded reference documents
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any embedded document is malformed or a
    /// standard is incomplete — a broken dataset must stop the process at
    /// startup, not serve partial answers.
    pub fn embedded() -> DatasetResult<Self> {
        Self::from_documents(&EMBEDDED_DOCUMENTS)
    }

    /// Build the store from caller-supplied `(name, json)` documents
    ///
    /// Every standard that appears must be complete: all six tables, both
    /// sexes, strictly increasing keys, non-degenerate parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] describing the first validation failure.
    pub fn from_documents(documents: &[(&str, &str)]) -> DatasetResult<Self> {
        let mut tables: HashMap<(Standard, TableKind, Sex), Vec<ReferencePoint>> = HashMap::new();

        for (name, json) in documents {
            let doc = TableDocument::parse(name, json)?;
            let standard = doc.standard(name)?;
            let table = doc.table_kind(name)?;
            let model = doc.model(name)?;
            if doc.key_unit != table.key_unit() {
                return Err(DatasetError::KeyUnitMismatch {
                    name: (*name).to_owned(),
                    table,
                    expected: table.key_unit(),
                    key_unit: doc.key_unit.clone(),
                });
            }

            for (sex_key, rows) in &doc.sexes {
                let sex = sex_from_key(name, sex_key)?;
                let points: Vec<ReferencePoint> = rows
                    .iter()
                    .map(|row| row_to_point(model, *row))
                    .collect();
                validate_series(standard, table, sex, &points)?;
                debug!(
                    standard = standard.code(),
                    table = table.name(),
                    sex = sex.code(),
                    rows = points.len(),
                    "loaded reference series"
                );
                tables.insert((standard, table, sex), points);
            }
        }

        // A standard is served whole or not at all.
        for standard in [Standard::Who, Standard::Permenkes] {
            let present = tables.keys().any(|(s, _, _)| *s == standard);
            if !present {
                continue;
            }
            for table in TableKind::ALL {
                for sex in [Sex::Male, Sex::Female] {
                    if !tables.contains_key(&(standard, table, sex)) {
                        return Err(DatasetError::MissingTable {
                            standard,
                            table,
                            sex,
                        });
                    }
                }
            }
        }

        let total_rows: usize = tables.values().map(Vec::len).sum();
        info!(
            series = tables.len(),
            rows = total_rows,
            "reference dataset loaded"
        );
        Ok(Self { tables })
    }

    /// The two rows straddling `key`, or the exact row when `key` lands on one
    ///
    /// # Errors
    ///
    /// [`DatasetError::KeyOutOfRange`] when `key` is below the table minimum
    /// or above its maximum — the store never extrapolates. A single-row
    /// table answers only its exact key.
    pub fn bracketing(
        &self,
        standard: Standard,
        table: TableKind,
        sex: Sex,
        key: f64,
    ) -> DatasetResult<Bracket<'_>> {
        let rows = self.series(standard, table, sex)?;
        // validate_series guarantees at least one row
        let min = rows[0].key;
        let max = rows[rows.len() - 1].key;
        if !key.is_finite() || key < min - EXACT_KEY_EPSILON || key > max + EXACT_KEY_EPSILON {
            return Err(DatasetError::KeyOutOfRange {
                standard,
                table,
                sex,
                key,
                min,
                max,
            });
        }

        let upper = rows.partition_point(|p| p.key < key - EXACT_KEY_EPSILON);
        if upper < rows.len() && (rows[upper].key - key).abs() <= EXACT_KEY_EPSILON {
            return Ok(Bracket::Exact(&rows[upper]));
        }
        if upper == 0 || upper >= rows.len() {
            // Inside tolerance of an endpoint but not matching it exactly;
            // only possible on a degenerate one-row table.
            return Err(DatasetError::KeyOutOfRange {
                standard,
                table,
                sex,
                key,
                min,
                max,
            });
        }
        Ok(Bracket::Between(&rows[upper - 1], &rows[upper]))
    }

    /// Tabulated `[min, max]` key domain of a series
    ///
    /// # Errors
    ///
    /// [`DatasetError::MissingTable`] when the series does not exist.
    pub fn domain(
        &self,
        standard: Standard,
        table: TableKind,
        sex: Sex,
    ) -> DatasetResult<(f64, f64)> {
        let rows = self.series(standard, table, sex)?;
        Ok((rows[0].key, rows[rows.len() - 1].key))
    }

    /// All tabulated points of a series, ascending by key
    ///
    /// # Errors
    ///
    /// [`DatasetError::MissingTable`] when the series does not exist.
    pub fn points(
        &self,
        standard: Standard,
        table: TableKind,
        sex: Sex,
    ) -> DatasetResult<&[ReferencePoint]> {
        self.series(standard, table, sex).map(Vec::as_slice)
    }

    fn series(
        &self,
        standard: Standard,
        table: TableKind,
        sex: Sex,
    ) -> DatasetResult<&Vec<ReferencePoint>> {
        self.tables
            .get(&(standard, table, sex))
            .ok_or(DatasetError::MissingTable {
                standard,
                table,
                sex,
            })
    }
}

fn validate_series(
    standard: Standard,
    table: TableKind,
    sex: Sex,
    points: &[ReferencePoint],
) -> DatasetResult<()> {
    if points.is_empty() {
        return Err(DatasetError::EmptyTable {
            standard,
            table,
            sex,
        });
    }
    for (index, point) in points.iter().enumerate() {
        if !point.key.is_finite() {
            return Err(DatasetError::InvalidParameterRow {
                standard,
                table,
                sex,
                key: point.key,
                reason: "non-finite key",
            });
        }
        if index > 0 && points[index - 1].key >= point.key {
            return Err(DatasetError::NonMonotonicKeys {
                standard,
                table,
                sex,
                index,
            });
        }
        validate_parameters(standard, table, sex, point)?;
    }
    Ok(())
}

fn validate_parameters(
    standard: Standard,
    table: TableKind,
    sex: Sex,
    point: &ReferencePoint,
) -> DatasetResult<()> {
    let reason = match point.params {
        Parameters::Lms { l, m, s } => {
            if !(l.is_finite() && m.is_finite() && s.is_finite()) {
                Some("non-finite LMS parameter")
            } else if m <= 0.0 {
                Some("non-positive median")
            } else if s <= 0.0 {
                Some("non-positive coefficient of variation")
            } else {
                None
            }
        }
        Parameters::SdBands {
            median,
            sd_below,
            sd_above,
        } => {
            if !(median.is_finite() && sd_below.is_finite() && sd_above.is_finite()) {
                Some("non-finite SD-band parameter")
            } else if median <= 0.0 {
                Some("non-positive median")
            } else if sd_below <= 0.0 || sd_above <= 0.0 {
                Some("non-positive SD half-width")
            } else {
                None
            }
        }
    };
    reason.map_or(Ok(()), |reason| {
        Err(DatasetError::InvalidParameterRow {
            standard,
            table,
            sex,
            key: point.key,
            reason,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ReferenceStore {
        ReferenceStore::embedded().unwrap()
    }

    #[test]
    fn embedded_dataset_loads_and_is_complete() {
        let store = store();
        for standard in [Standard::Who, Standard::Permenkes] {
            for table in TableKind::ALL {
                for sex in [Sex::Male, Sex::Female] {
                    assert!(
                        store.points(standard, table, sex).is_ok(),
                        "missing {standard}/{table}/{sex:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn age_tables_span_zero_to_sixty_months() {
        let store = store();
        let (min, max) = store
            .domain(Standard::Who, TableKind::WeightForAge, Sex::Female)
            .unwrap();
        assert_eq!(min, 0.0);
        assert_eq!(max, 60.0);
    }

    #[test]
    fn exact_key_returns_the_row() {
        let store = store();
        match store
            .bracketing(Standard::Who, TableKind::WeightForAge, Sex::Male, 24.0)
            .unwrap()
        {
            Bracket::Exact(point) => assert_eq!(point.key, 24.0),
            Bracket::Between(..) => panic!("expected exact match at a tabulated key"),
        }
    }

    #[test]
    fn between_keys_returns_adjacent_rows() {
        let store = store();
        match store
            .bracketing(Standard::Who, TableKind::WeightForAge, Sex::Male, 24.4)
            .unwrap()
        {
            Bracket::Between(lower, upper) => {
                assert_eq!(lower.key, 24.0);
                assert_eq!(upper.key, 25.0);
            }
            Bracket::Exact(_) => panic!("expected a bracketing pair"),
        }
    }

    #[test]
    fn out_of_domain_keys_are_refused() {
        let store = store();
        for key in [-0.1, 60.5, 1000.0, f64::NAN] {
            let result =
                store.bracketing(Standard::Who, TableKind::WeightForAge, Sex::Male, key);
            assert!(
                matches!(result, Err(DatasetError::KeyOutOfRange { .. })),
                "key {key} should be out of range"
            );
        }
    }

    #[test]
    fn single_row_table_answers_only_its_key() {
        let doc = r#"{"standard":"who","table":"weight_for_age","key_unit":"months",
            "model":"lms","sexes":{"male":[[12.0,0.1,9.6,0.11]],"female":[[12.0,0.1,8.9,0.12]]}}"#;
        // complete the standard with the remaining tables from the embedded set
        let mut docs: Vec<(&str, &str)> = EMBEDDED_DOCUMENTS
            .iter()
            .filter(|(name, _)| *name != "who_weight_for_age")
            .copied()
            .collect();
        docs.push(("single_row", doc));
        let store = ReferenceStore::from_documents(&docs).unwrap();

        assert!(matches!(
            store.bracketing(Standard::Who, TableKind::WeightForAge, Sex::Male, 12.0),
            Ok(Bracket::Exact(_))
        ));
        assert!(matches!(
            store.bracketing(Standard::Who, TableKind::WeightForAge, Sex::Male, 12.5),
            Err(DatasetError::KeyOutOfRange { .. })
        ));
    }

    #[test]
    fn mismatched_key_unit_fails_the_load() {
        // weight_for_length is keyed in centimeters; a months document is a
        // packaging mistake and must not load
        let doc = r#"{"standard":"who","table":"weight_for_length","key_unit":"months",
            "model":"lms","sexes":{"male":[[45.0,-0.35,2.44,0.09]],"female":[[45.0,-0.38,2.46,0.09]]}}"#;
        let err = ReferenceStore::from_documents(&[("bad_unit", doc)]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::KeyUnitMismatch {
                expected: "centimeters",
                ..
            }
        ));
    }

    #[test]
    fn non_monotonic_keys_fail_the_load() {
        let doc = r#"{"standard":"who","table":"weight_for_age","key_unit":"months",
            "model":"lms","sexes":{"male":[[0.0,0.3,3.3,0.14],[1.0,0.2,4.4,0.13],[1.0,0.2,5.5,0.12]],
            "female":[[0.0,0.3,3.2,0.14]]}}"#;
        let err = ReferenceStore::from_documents(&[("bad", doc)]).unwrap_err();
        assert!(matches!(err, DatasetError::NonMonotonicKeys { index: 2, .. }));
    }

    #[test]
    fn degenerate_parameters_fail_the_load() {
        let doc = r#"{"standard":"who","table":"weight_for_age","key_unit":"months",
            "model":"lms","sexes":{"male":[[0.0,0.3,-3.3,0.14]],"female":[[0.0,0.3,3.2,0.14]]}}"#;
        let err = ReferenceStore::from_documents(&[("bad", doc)]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidParameterRow {
                reason: "non-positive median",
                ..
            }
        ));
    }

    #[test]
    fn incomplete_standard_fails_the_load() {
        let doc = r#"{"standard":"permenkes","table":"weight_for_age","key_unit":"months",
            "model":"sd_bands","sexes":{"male":[[0.0,3.3,0.4,0.5]],"female":[[0.0,3.2,0.4,0.5]]}}"#;
        let err = ReferenceStore::from_documents(&[("partial", doc)]).unwrap_err();
        assert!(matches!(err, DatasetError::MissingTable { .. }));
    }

    #[test]
    fn missing_sex_variant_fails_the_load() {
        let mut docs: Vec<(&str, &str)> = EMBEDDED_DOCUMENTS
            .iter()
            .filter(|(name, _)| *name != "who_weight_for_age")
            .copied()
            .collect();
        let doc = r#"{"standard":"who","table":"weight_for_age","key_unit":"months",
            "model":"lms","sexes":{"male":[[0.0,0.3,3.3,0.14]]}}"#;
        docs.push(("males_only", doc));
        let err = ReferenceStore::from_documents(&docs).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingTable {
                sex: Sex::Female,
                ..
            }
        ));
    }

    #[test]
    fn garbage_json_reports_the_document_name() {
        let err = ReferenceStore::from_documents(&[("garbage", "{not json")]).unwrap_err();
        match err {
            DatasetError::Parse { name, .. } => assert_eq!(name, "garbage"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
