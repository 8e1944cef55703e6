//! Canonical schema for merged survey records
//!
//! Every output record carries exactly these fields, in this order. Sources may
//! supply any subset of the non-derived fields; the rest are synthesized,
//! merged, or derived further down the pipeline.

use std::fmt;

use serde::{Serialize, Serializer};

/// Lower bound of every indicator and composite score
pub const SCORE_MIN: f64 = 1.0;

/// Upper bound of every indicator and composite score
pub const SCORE_MAX: f64 = 5.0;

/// Neutral midpoint of the score scale
pub const NEUTRAL_SCORE: f64 = 3.0;

/// Storage and validation class of a canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Dense row identifier, produced only by the merger
    Identifier,
    /// Whole-number demographic rendered as an integer
    Integer,
    /// Real-valued demographic
    Real,
    /// Indicator on the 1-5 scale
    Score,
    /// Closed-set text label
    Label,
    /// Mean of a fixed group of scores, never read from a source
    Composite,
}

impl FieldKind {
    /// Whether values of this kind are stored as numbers
    pub fn is_numeric(self) -> bool {
        !matches!(self, FieldKind::Label)
    }
}

/// A field of the canonical record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    StudentId,
    Age,
    Gender,
    YearOfStudy,
    Cgpa,
    DepressionScore,
    AnxietyScore,
    StressLevel,
    SleepQuality,
    CampusSafety,
    SocialSupport,
    CampusFacilities,
    AccommodationSatisfaction,
    PeerRelationships,
    AcademicPressure,
    WorkloadStress,
    ExamAnxiety,
    GradeExpectations,
    CareerConcerns,
    SeeksCounseling,
    AwareOfServices,
    CampusEnvironmentScore,
    AcademicExpectationScore,
    MentalHealthScore,
}

impl CanonicalField {
    /// All canonical fields in output column order
    pub const ALL: [CanonicalField; 24] = [
        CanonicalField::StudentId,
        CanonicalField::Age,
        CanonicalField::Gender,
        CanonicalField::YearOfStudy,
        CanonicalField::Cgpa,
        CanonicalField::DepressionScore,
        CanonicalField::AnxietyScore,
        CanonicalField::StressLevel,
        CanonicalField::SleepQuality,
        CanonicalField::CampusSafety,
        CanonicalField::SocialSupport,
        CanonicalField::CampusFacilities,
        CanonicalField::AccommodationSatisfaction,
        CanonicalField::PeerRelationships,
        CanonicalField::AcademicPressure,
        CanonicalField::WorkloadStress,
        CanonicalField::ExamAnxiety,
        CanonicalField::GradeExpectations,
        CanonicalField::CareerConcerns,
        CanonicalField::SeeksCounseling,
        CanonicalField::AwareOfServices,
        CanonicalField::CampusEnvironmentScore,
        CanonicalField::AcademicExpectationScore,
        CanonicalField::MentalHealthScore,
    ];

    /// Indicator scores that sources report on arbitrary scales
    pub const SCORES: [CanonicalField; 14] = [
        CanonicalField::DepressionScore,
        CanonicalField::AnxietyScore,
        CanonicalField::StressLevel,
        CanonicalField::SleepQuality,
        CanonicalField::CampusSafety,
        CanonicalField::SocialSupport,
        CanonicalField::CampusFacilities,
        CanonicalField::AccommodationSatisfaction,
        CanonicalField::PeerRelationships,
        CanonicalField::AcademicPressure,
        CanonicalField::WorkloadStress,
        CanonicalField::ExamAnxiety,
        CanonicalField::GradeExpectations,
        CanonicalField::CareerConcerns,
    ];

    /// Fields a source table may supply: everything except the identifier and composites
    pub fn source_fields() -> impl Iterator<Item = CanonicalField> {
        Self::ALL
            .into_iter()
            .filter(|f| !matches!(f.kind(), FieldKind::Identifier | FieldKind::Composite))
    }

    /// Column name in the canonical table
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::StudentId => "student_id",
            CanonicalField::Age => "age",
            CanonicalField::Gender => "gender",
            CanonicalField::YearOfStudy => "year_of_study",
            CanonicalField::Cgpa => "cgpa",
            CanonicalField::DepressionScore => "depression_score",
            CanonicalField::AnxietyScore => "anxiety_score",
            CanonicalField::StressLevel => "stress_level",
            CanonicalField::SleepQuality => "sleep_quality",
            CanonicalField::CampusSafety => "campus_safety",
            CanonicalField::SocialSupport => "social_support",
            CanonicalField::CampusFacilities => "campus_facilities",
            CanonicalField::AccommodationSatisfaction => "accommodation_satisfaction",
            CanonicalField::PeerRelationships => "peer_relationships",
            CanonicalField::AcademicPressure => "academic_pressure",
            CanonicalField::WorkloadStress => "workload_stress",
            CanonicalField::ExamAnxiety => "exam_anxiety",
            CanonicalField::GradeExpectations => "grade_expectations",
            CanonicalField::CareerConcerns => "career_concerns",
            CanonicalField::SeeksCounseling => "seeks_counseling",
            CanonicalField::AwareOfServices => "aware_of_services",
            CanonicalField::CampusEnvironmentScore => "campus_environment_score",
            CanonicalField::AcademicExpectationScore => "academic_expectation_score",
            CanonicalField::MentalHealthScore => "mental_health_score",
        }
    }

    /// Look up a field by its canonical column name
    pub fn from_name(name: &str) -> Option<CanonicalField> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            CanonicalField::StudentId => FieldKind::Identifier,
            CanonicalField::Age | CanonicalField::YearOfStudy => FieldKind::Integer,
            CanonicalField::Cgpa => FieldKind::Real,
            CanonicalField::Gender
            | CanonicalField::SeeksCounseling
            | CanonicalField::AwareOfServices => FieldKind::Label,
            CanonicalField::CampusEnvironmentScore
            | CanonicalField::AcademicExpectationScore
            | CanonicalField::MentalHealthScore => FieldKind::Composite,
            _ => FieldKind::Score,
        }
    }

    /// Legal closed interval for bounded numeric fields
    pub fn domain(self) -> Option<(f64, f64)> {
        match self.kind() {
            FieldKind::Score | FieldKind::Composite => Some((SCORE_MIN, SCORE_MAX)),
            _ => match self {
                CanonicalField::Age => Some((16.0, 40.0)),
                CanonicalField::YearOfStudy => Some((1.0, 4.0)),
                CanonicalField::Cgpa => Some((0.0, 4.0)),
                _ => None,
            },
        }
    }

    /// Value used when a numeric column has no observation to impute from
    pub fn neutral_value(self) -> Option<f64> {
        match self.kind() {
            FieldKind::Score | FieldKind::Composite => Some(NEUTRAL_SCORE),
            _ => match self {
                CanonicalField::Age => Some(22.0),
                CanonicalField::YearOfStudy => Some(2.0),
                CanonicalField::Cgpa => Some(3.0),
                _ => None,
            },
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CanonicalField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Canonical column names in output order
pub fn canonical_column_names() -> Vec<&'static str> {
    CanonicalField::ALL.iter().map(|f| f.name()).collect()
}
