// ABOUTME: Domain models for the anthro growth engine
// ABOUTME: Sex, Standard, Indicator, measurement input, and composite result types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AnthroHPK

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::age::AgeAtMeasurement;

/// Biological sex, as used by the growth reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male ("Laki-laki" in the Indonesian forms)
    Male,
    /// Female ("Perempuan")
    Female,
}

impl Sex {
    /// One-letter WHO code ("M"/"F")
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// Growth reference standard selecting parameter model and cut-off bands
///
/// The two standards disagree on how parameters are tabulated (LMS rows for
/// WHO, median ± SD columns for Permenkes) and on classification cut-offs
/// (e.g. the Permenkes weight-for-age "normal" band ends at +1 SD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standard {
    /// WHO Child Growth Standards (2006), Box-Cox/LMS parameterization
    Who,
    /// Permenkes RI No. 2/2020, median ± SD tables
    Permenkes,
}

impl Standard {
    /// Short identifier used in logs and serialized results
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Who => "who",
            Self::Permenkes => "permenkes",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The five nutritional-status indicators computed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Weight-for-age (WAZ, "BB/U")
    WeightForAge,
    /// Length/height-for-age (HAZ, "PB/U" / "TB/U")
    HeightForAge,
    /// Weight-for-length/height (WHZ, "BB/PB" / "BB/TB")
    WeightForHeight,
    /// BMI-for-age (BAZ, "IMT/U")
    BmiForAge,
    /// Head-circumference-for-age (HCZ, "LK/U")
    HeadCircumferenceForAge,
}

impl Indicator {
    /// Canonical reporting order: WAZ, HAZ, WHZ, BAZ, HCZ
    pub const ALL: [Self; 5] = [
        Self::WeightForAge,
        Self::HeightForAge,
        Self::WeightForHeight,
        Self::BmiForAge,
        Self::HeadCircumferenceForAge,
    ];

    /// Conventional short code ("waz", "haz", ...)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::WeightForAge => "waz",
            Self::HeightForAge => "haz",
            Self::WeightForHeight => "whz",
            Self::BmiForAge => "baz",
            Self::HeadCircumferenceForAge => "hcz",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightForAge => f.write_str("WAZ"),
            Self::HeightForAge => f.write_str("HAZ"),
            Self::WeightForHeight => f.write_str("WHZ"),
            Self::BmiForAge => f.write_str("BAZ"),
            Self::HeadCircumferenceForAge => f.write_str("HCZ"),
        }
    }
}

/// Identity of one reference table within a standard
///
/// Distinct from [`Indicator`]: the weight-for-length/height indicator draws
/// on two tables (length-keyed below 24 months, height-keyed at or above),
/// and the age-keyed tables are shared across derived indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Weight by age in months
    WeightForAge,
    /// Recumbent length / standing height by age in months
    LengthHeightForAge,
    /// Body-mass index by age in months
    BmiForAge,
    /// Head circumference by age in months
    HeadCircumferenceForAge,
    /// Weight by recumbent length in centimeters (under 24 months)
    WeightForLength,
    /// Weight by standing height in centimeters (24 months and over)
    WeightForHeight,
}

impl TableKind {
    /// All table kinds a complete standard must provide
    pub const ALL: [Self; 6] = [
        Self::WeightForAge,
        Self::LengthHeightForAge,
        Self::BmiForAge,
        Self::HeadCircumferenceForAge,
        Self::WeightForLength,
        Self::WeightForHeight,
    ];

    /// Table name as it appears in the reference documents
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WeightForAge => "weight_for_age",
            Self::LengthHeightForAge => "length_height_for_age",
            Self::BmiForAge => "bmi_for_age",
            Self::HeadCircumferenceForAge => "head_circumference_for_age",
            Self::WeightForLength => "weight_for_length",
            Self::WeightForHeight => "weight_for_height",
        }
    }

    /// Unit of this table's lookup key, as spelled in the documents
    #[must_use]
    pub const fn key_unit(self) -> &'static str {
        match self {
            Self::WeightForLength | Self::WeightForHeight => "centimeters",
            _ => "months",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the length/height measurement was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMethod {
    /// Lying down (convention under 24 months)
    Recumbent,
    /// Standing (convention at 24 months and over)
    Standing,
}

/// One child's measurement set for a single visit
///
/// Sex and age are required; every other field is optional, and absence of a
/// field disables the indicators that depend on it rather than failing the
/// whole evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// Child's sex
    pub sex: Sex,
    /// Exact age at measurement
    pub age: AgeAtMeasurement,
    /// Body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Recumbent length or standing height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<f64>,
    /// Head circumference in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_circumference_cm: Option<f64>,
    /// Posture the length/height was measured in, when recorded
    ///
    /// When it disagrees with the age convention the engine applies the
    /// standard 0.7 cm correction before consulting the length/height tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured: Option<MeasurementMethod>,
}

impl MeasurementInput {
    /// Measurement set with only the required fields
    #[must_use]
    pub const fn new(sex: Sex, age: AgeAtMeasurement) -> Self {
        Self {
            sex,
            age,
            weight_kg: None,
            length_cm: None,
            head_circumference_cm: None,
            measured: None,
        }
    }

    /// Set body weight (kg)
    #[must_use]
    pub const fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Set recumbent length / standing height (cm)
    #[must_use]
    pub const fn with_length(mut self, length_cm: f64) -> Self {
        self.length_cm = Some(length_cm);
        self
    }

    /// Set head circumference (cm)
    #[must_use]
    pub const fn with_head_circumference(mut self, head_circumference_cm: f64) -> Self {
        self.head_circumference_cm = Some(head_circumference_cm);
        self
    }

    /// Record the measurement posture
    #[must_use]
    pub const fn with_method(mut self, method: MeasurementMethod) -> Self {
        self.measured = Some(method);
        self
    }
}

/// Nutritional-status category produced by the classifier
///
/// The variant set is the union of the category vocabularies of the two
/// standards; which variants a given (standard, indicator) pair can produce
/// is defined by that pair's cut-off bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionalStatus {
    /// Weight-for-age below −3 SD
    SeverelyUnderweight,
    /// Weight-for-age in [−3, −2)
    Underweight,
    /// Inside the standard's normal band
    Normal,
    /// Above the standard's upper normal cut without reaching overweight
    RiskOfOverweight,
    /// Height-for-age below −3 SD
    SeverelyStunted,
    /// Height-for-age in [−3, −2)
    Stunted,
    /// Height-for-age above +3 SD
    Tall,
    /// Weight-for-height below −3 SD
    SevereWasting,
    /// Weight-for-height in [−3, −2)
    Wasting,
    /// BMI-for-age below −3 SD (WHO wording)
    SevereThinness,
    /// BMI-for-age in [−3, −2) (WHO wording)
    Thinness,
    /// Above +2 SD on a weight- or BMI-based indicator
    Overweight,
    /// Above +3 SD on a weight- or BMI-based indicator
    Obesity,
    /// Head circumference in [−3, −2)
    Microcephaly,
    /// Head circumference below −3 SD
    SevereMicrocephaly,
    /// Head circumference in (+2, +3]
    Macrocephaly,
    /// Head circumference above +3 SD
    SevereMacrocephaly,
}

impl NutritionalStatus {
    /// English label (WHO interpretation wording)
    #[must_use]
    pub const fn label_en(self) -> &'static str {
        match self {
            Self::SeverelyUnderweight => "Severely underweight",
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::RiskOfOverweight => "Possible risk of overweight",
            Self::SeverelyStunted => "Severely stunted",
            Self::Stunted => "Stunted",
            Self::Tall => "Tall",
            Self::SevereWasting => "Severe wasting",
            Self::Wasting => "Wasting",
            Self::SevereThinness => "Severe thinness",
            Self::Thinness => "Thinness",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
            Self::Microcephaly => "Below normal head circumference",
            Self::SevereMicrocephaly => "Severe microcephaly",
            Self::Macrocephaly => "Above normal head circumference",
            Self::SevereMacrocephaly => "Severe macrocephaly",
        }
    }

    /// Indonesian label (Permenkes 2/2020 wording)
    #[must_use]
    pub const fn label_id(self) -> &'static str {
        match self {
            Self::SeverelyUnderweight => "Gizi buruk (BB sangat kurang)",
            Self::Underweight => "Gizi kurang",
            Self::Normal => "Normal",
            Self::RiskOfOverweight => "Risiko gizi lebih",
            Self::SeverelyStunted => "Sangat pendek (stunting berat)",
            Self::Stunted => "Pendek (stunting)",
            Self::Tall => "Tinggi",
            Self::SevereWasting => "Gizi buruk (sangat kurus)",
            Self::Wasting => "Gizi kurang (kurus)",
            Self::SevereThinness => "Sangat kurus",
            Self::Thinness => "Kurus",
            Self::Overweight => "Gizi lebih",
            Self::Obesity => "Obesitas",
            Self::Microcephaly => "Lingkar kepala di bawah normal",
            Self::SevereMicrocephaly => "Lingkar kepala sangat kecil",
            Self::Macrocephaly => "Lingkar kepala di atas normal",
            Self::SevereMacrocephaly => "Lingkar kepala sangat besar",
        }
    }

    /// Label in the standard's reporting language
    #[must_use]
    pub const fn label(self, standard: Standard) -> &'static str {
        match standard {
            Standard::Who => self.label_en(),
            Standard::Permenkes => self.label_id(),
        }
    }

    /// Whether this category warrants clinical follow-up
    #[must_use]
    pub const fn is_alert(self) -> bool {
        !matches!(self, Self::Normal | Self::Tall)
    }
}

/// Plausibility assessment of a computed z-score
///
/// WHO data-cleaning practice flags biologically implausible values rather
/// than discarding them; the engine reports the category alongside the score
/// and leaves the decision to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plausibility {
    /// Inside the audit bounds
    Plausible,
    /// Near the extreme; re-measurement recommended
    Questionable,
    /// Beyond the biologically implausible cut; almost certainly a data error
    Implausible,
}

/// A successfully computed indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorResult {
    /// Which indicator this is
    pub indicator: Indicator,
    /// Standard the z-score and category were computed under
    pub standard: Standard,
    /// Raw value fed to the transform (kg, cm, or kg/m² for BAZ)
    pub raw_value: f64,
    /// Standardized z-score
    pub zscore: f64,
    /// Percentile equivalent of the z-score (0–100)
    pub percentile: f64,
    /// Nutritional-status category under the standard's cut-offs
    pub status: NutritionalStatus,
    /// Localized category label
    pub label: String,
    /// Audit assessment of the score's plausibility
    pub plausibility: Plausibility,
}

/// Why an indicator was not attempted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// A required raw measurement was not supplied
    MissingInput {
        /// Name of the absent field
        field: String,
    },
    /// The child's age or length is outside the indicator's domain under
    /// this standard
    OutsideDomain {
        /// Human-readable domain restriction
        detail: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { field } => write!(f, "missing input '{field}'"),
            Self::OutsideDomain { detail } => write!(f, "outside domain: {detail}"),
        }
    }
}

/// Outcome of one indicator within a composite evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IndicatorOutcome {
    /// Indicator was computed and classified
    Computed {
        /// The computed result
        result: IndicatorResult,
    },
    /// Indicator was not applicable to this measurement set
    Skipped {
        /// Why it was skipped
        reason: SkipReason,
    },
    /// Indicator was applicable but the computation failed
    Failed {
        /// Structured failure description (out-of-range key, degenerate
        /// parameters, ...)
        error: String,
    },
}

impl IndicatorOutcome {
    /// The computed result, if this outcome carries one
    #[must_use]
    pub const fn result(&self) -> Option<&IndicatorResult> {
        match self {
            Self::Computed { result } => Some(result),
            _ => None,
        }
    }
}

/// One slot of the composite result, in canonical indicator order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorEntry {
    /// Which indicator this slot reports
    pub indicator: Indicator,
    /// What happened to it
    pub outcome: IndicatorOutcome,
}

/// Full evaluation of one measurement set under one standard
///
/// Always carries exactly five entries in the canonical order
/// WAZ, HAZ, WHZ, BAZ, HCZ, regardless of which were skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeResult {
    /// Standard the evaluation ran under
    pub standard: Standard,
    /// Child's sex
    pub sex: Sex,
    /// Age in fractional months used for the age-keyed lookups
    pub age_months: f64,
    /// Per-indicator outcomes, canonical order
    pub entries: Vec<IndicatorEntry>,
    /// Measurement-audit warnings (raw values outside plausible ranges)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CompositeResult {
    /// Outcome for a given indicator
    #[must_use]
    pub fn outcome(&self, indicator: Indicator) -> Option<&IndicatorOutcome> {
        self.entries
            .iter()
            .find(|e| e.indicator == indicator)
            .map(|e| &e.outcome)
    }

    /// Computed z-score for a given indicator, if any
    #[must_use]
    pub fn zscore(&self, indicator: Indicator) -> Option<f64> {
        self.outcome(indicator)
            .and_then(IndicatorOutcome::result)
            .map(|r| r.zscore)
    }

    /// Number of indicators that produced a z-score
    #[must_use]
    pub fn computed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, IndicatorOutcome::Computed { .. }))
            .count()
    }
}
