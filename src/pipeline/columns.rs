//! Column name reconciliation
//!
//! Maps heterogeneous source column labels onto canonical fields through a
//! fixed alias table. Matching is exact and case-sensitive after trimming the
//! source label. Columns without an alias are dropped from the canonical table.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::schema::CanonicalField;

/// Known source spellings, many-to-one onto canonical fields
pub const COLUMN_ALIASES: &[(&str, CanonicalField)] = &[
    // Demographics
    ("age", CanonicalField::Age),
    ("Age", CanonicalField::Age),
    ("gender", CanonicalField::Gender),
    ("Gender", CanonicalField::Gender),
    ("Choose your gender", CanonicalField::Gender),
    ("sex", CanonicalField::Gender),
    ("year", CanonicalField::YearOfStudy),
    ("Year", CanonicalField::YearOfStudy),
    ("Your current year of Study", CanonicalField::YearOfStudy),
    ("year_of_study", CanonicalField::YearOfStudy),
    ("level", CanonicalField::YearOfStudy),
    ("cgpa", CanonicalField::Cgpa),
    ("CGPA", CanonicalField::Cgpa),
    ("What is your CGPA?", CanonicalField::Cgpa),
    ("gpa", CanonicalField::Cgpa),
    ("GPA", CanonicalField::Cgpa),
    // Mental health indicators
    ("depression", CanonicalField::DepressionScore),
    ("Depression", CanonicalField::DepressionScore),
    ("depression_score", CanonicalField::DepressionScore),
    ("Depression_Score", CanonicalField::DepressionScore),
    ("Do you have Depression?", CanonicalField::DepressionScore),
    ("PHQ-9", CanonicalField::DepressionScore),
    ("phq9", CanonicalField::DepressionScore),
    ("anxiety", CanonicalField::AnxietyScore),
    ("Anxiety", CanonicalField::AnxietyScore),
    ("anxiety_score", CanonicalField::AnxietyScore),
    ("Anxiety_Score", CanonicalField::AnxietyScore),
    ("Do you have Anxiety?", CanonicalField::AnxietyScore),
    ("GAD-7", CanonicalField::AnxietyScore),
    ("gad7", CanonicalField::AnxietyScore),
    ("stress", CanonicalField::StressLevel),
    ("Stress", CanonicalField::StressLevel),
    ("stress_level", CanonicalField::StressLevel),
    ("Stress_Level", CanonicalField::StressLevel),
    ("PSS-10", CanonicalField::StressLevel),
    ("pss10", CanonicalField::StressLevel),
    ("sleep", CanonicalField::SleepQuality),
    ("sleep_quality", CanonicalField::SleepQuality),
    ("Sleep_Quality", CanonicalField::SleepQuality),
    ("Sleep Duration", CanonicalField::SleepQuality),
    ("sleep_hours", CanonicalField::SleepQuality),
    // Campus environment
    ("campus_safety", CanonicalField::CampusSafety),
    ("safety", CanonicalField::CampusSafety),
    ("social_support", CanonicalField::SocialSupport),
    ("Social_Support", CanonicalField::SocialSupport),
    ("support", CanonicalField::SocialSupport),
    ("facilities", CanonicalField::CampusFacilities),
    ("campus_facilities", CanonicalField::CampusFacilities),
    ("accommodation", CanonicalField::AccommodationSatisfaction),
    ("accommodation_satisfaction", CanonicalField::AccommodationSatisfaction),
    ("Residence_Type", CanonicalField::AccommodationSatisfaction),
    ("housing", CanonicalField::AccommodationSatisfaction),
    ("peer_relationships", CanonicalField::PeerRelationships),
    ("relationships", CanonicalField::PeerRelationships),
    ("friends", CanonicalField::PeerRelationships),
    // Academic factors
    ("academic_pressure", CanonicalField::AcademicPressure),
    ("Academic Pressure", CanonicalField::AcademicPressure),
    ("pressure", CanonicalField::AcademicPressure),
    ("workload", CanonicalField::WorkloadStress),
    ("Work Pressure", CanonicalField::WorkloadStress),
    ("workload_stress", CanonicalField::WorkloadStress),
    ("exam_anxiety", CanonicalField::ExamAnxiety),
    ("exam_stress", CanonicalField::ExamAnxiety),
    ("Do you have Panic attack?", CanonicalField::ExamAnxiety),
    ("grade_expectations", CanonicalField::GradeExpectations),
    ("expectations", CanonicalField::GradeExpectations),
    ("career_concerns", CanonicalField::CareerConcerns),
    ("career", CanonicalField::CareerConcerns),
    // Support services
    ("counseling", CanonicalField::SeeksCounseling),
    ("seeks_counseling", CanonicalField::SeeksCounseling),
    ("Counseling_Service_Use", CanonicalField::SeeksCounseling),
    (
        "Did you seek any specialist for a treatment?",
        CanonicalField::SeeksCounseling,
    ),
    ("treatment", CanonicalField::SeeksCounseling),
    ("therapy", CanonicalField::SeeksCounseling),
    ("aware_of_services", CanonicalField::AwareOfServices),
    ("awareness", CanonicalField::AwareOfServices),
];

/// Canonical field for a source column label, if it has a known alias
pub fn canonical_alias(label: &str) -> Option<CanonicalField> {
    let trimmed = label.trim();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, field)| *field)
}

/// How a source table's columns were reconciled
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Source label and the canonical field it became, in source column order
    pub renamed: Vec<(String, CanonicalField)>,
    /// Source labels with no alias (dropped)
    pub unmapped: Vec<String>,
    /// Source labels whose field was already claimed by an earlier column (dropped)
    pub collisions: Vec<(String, CanonicalField)>,
}

impl ColumnMapping {
    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.renamed.iter().map(|(_, f)| *f)
    }
}

/// Rename a source table's columns to canonical names.
///
/// Returns a frame holding only the mapped columns, in source order. When
/// several source columns alias to the same field, the first one in column
/// order wins and the rest are dropped as collisions.
pub fn reconcile_columns(df: &DataFrame, source: &str) -> Result<(DataFrame, ColumnMapping)> {
    let mut mapping = ColumnMapping::default();
    let mut columns: Vec<Column> = Vec::new();

    for col in df.get_columns() {
        let label = col.name().to_string();
        let Some(field) = canonical_alias(&label) else {
            mapping.unmapped.push(label);
            continue;
        };

        if mapping.fields().any(|claimed| claimed == field) {
            log::warn!(
                "{}: column '{}' also maps to '{}', keeping the earlier column",
                source,
                label,
                field
            );
            mapping.collisions.push((label, field));
            continue;
        }

        if label != field.name() {
            log::debug!("{}: {} -> {}", source, label, field);
        }
        let mut renamed = col.clone();
        renamed.rename(field.name().into());
        columns.push(renamed);
        mapping.renamed.push((label, field));
    }

    let frame = DataFrame::new(columns)
        .with_context(|| format!("Failed to rebuild columns for {}", source))?;

    Ok((frame, mapping))
}
