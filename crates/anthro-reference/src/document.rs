// ABOUTME: Reference table document schema and distribution parameter types
// ABOUTME: LMS rows (WHO) and SD-band rows (Permenkes) parsed from embedded JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use anthro_core::models::{Sex, Standard, TableKind};

use crate::error::{DatasetError, DatasetResult};

/// Which statistical model a table's rows parameterize
///
/// Kept as an explicit tag (rather than inferring from row shape) so the
/// transform applied per standard is auditable and a third standard/model
/// can be added without duck-typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModel {
    /// Box-Cox LMS rows: (L, M, S) as published by WHO
    Lms,
    /// Median ± SD rows as published by Permenkes 2/2020
    SdBands,
}

/// Distribution parameters for one tabulated point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Parameters {
    /// Box-Cox parameters (WHO)
    Lms {
        /// Skewness power (Box-Cox lambda)
        l: f64,
        /// Median of the reference distribution
        m: f64,
        /// Coefficient of variation
        s: f64,
    },
    /// Median and one-SD half-widths (Permenkes)
    SdBands {
        /// Median of the reference distribution
        median: f64,
        /// Median minus the −1 SD value
        sd_below: f64,
        /// The +1 SD value minus the median
        sd_above: f64,
    },
}

impl Parameters {
    /// Model this parameter set belongs to
    #[must_use]
    pub const fn model(&self) -> ParameterModel {
        match self {
            Self::Lms { .. } => ParameterModel::Lms,
            Self::SdBands { .. } => ParameterModel::SdBands,
        }
    }

    /// Median of the reference distribution
    #[must_use]
    pub const fn median(&self) -> f64 {
        match self {
            Self::Lms { m, .. } => *m,
            Self::SdBands { median, .. } => *median,
        }
    }

    /// Field-wise linear interpolation between two parameter sets
    ///
    /// Returns `None` when the models differ; the loader guarantees a table
    /// is homogeneous, so a `None` here means the store was bypassed.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Option<Self> {
        let mix = |a: f64, b: f64| t.mul_add(b - a, a);
        match (self, other) {
            (Self::Lms { l, m, s }, Self::Lms { l: l2, m: m2, s: s2 }) => Some(Self::Lms {
                l: mix(*l, *l2),
                m: mix(*m, *m2),
                s: mix(*s, *s2),
            }),
            (
                Self::SdBands {
                    median,
                    sd_below,
                    sd_above,
                },
                Self::SdBands {
                    median: med2,
                    sd_below: below2,
                    sd_above: above2,
                },
            ) => Some(Self::SdBands {
                median: mix(*median, *med2),
                sd_below: mix(*sd_below, *below2),
                sd_above: mix(*sd_above, *above2),
            }),
            _ => None,
        }
    }
}

/// One tabulated reference point: query key plus distribution parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Age in months, or length/height in centimeters
    pub key: f64,
    /// Distribution parameters at this key
    pub params: Parameters,
}

/// On-disk shape of one reference document (one standard, one table, both
/// sexes), rows as compact `[key, a, b, c]` arrays
#[derive(Debug, Deserialize)]
pub(crate) struct TableDocument {
    pub standard: String,
    pub table: String,
    pub key_unit: String,
    pub model: String,
    pub sexes: BTreeMap<String, Vec<[f64; 4]>>,
}

impl TableDocument {
    pub(crate) fn parse(name: &str, json: &str) -> DatasetResult<Self> {
        serde_json::from_str(json).map_err(|source| DatasetError::Parse {
            name: name.to_owned(),
            source,
        })
    }

    pub(crate) fn standard(&self, name: &str) -> DatasetResult<Standard> {
        match self.standard.as_str() {
            "who" => Ok(Standard::Who),
            "permenkes" => Ok(Standard::Permenkes),
            other => Err(DatasetError::UnknownStandard {
                name: name.to_owned(),
                standard: other.to_owned(),
            }),
        }
    }

    pub(crate) fn table_kind(&self, name: &str) -> DatasetResult<TableKind> {
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.name() == self.table)
            .ok_or_else(|| DatasetError::UnknownTable {
                name: name.to_owned(),
                table: self.table.clone(),
            })
    }

    pub(crate) fn model(&self, name: &str) -> DatasetResult<ParameterModel> {
        match self.model.as_str() {
            "lms" => Ok(ParameterModel::Lms),
            "sd_bands" => Ok(ParameterModel::SdBands),
            other => Err(DatasetError::UnknownModel {
                name: name.to_owned(),
                model: other.to_owned(),
            }),
        }
    }
}

pub(crate) fn sex_from_key(name: &str, key: &str) -> DatasetResult<Sex> {
    match key {
        "male" => Ok(Sex::Male),
        "female" => Ok(Sex::Female),
        other => Err(DatasetError::UnknownSex {
            name: name.to_owned(),
            sex: other.to_owned(),
        }),
    }
}

pub(crate) fn row_to_point(model: ParameterModel, row: [f64; 4]) -> ReferencePoint {
    let [key, a, b, c] = row;
    let params = match model {
        ParameterModel::Lms => Parameters::Lms { l: a, m: b, s: c },
        ParameterModel::SdBands => Parameters::SdBands {
            median: a,
            sd_below: b,
            sd_above: c,
        },
    };
    ReferencePoint { key, params }
}
