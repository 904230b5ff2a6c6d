//! Letter grades

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

/// Minimum score for each grade, best first. Anything lower is an F.
pub const GRADE_THRESHOLDS: [(f64, LetterGrade); 12] = [
    (95.0, LetterGrade::APlus),
    (90.0, LetterGrade::A),
    (80.0, LetterGrade::AMinus),
    (70.0, LetterGrade::BPlus),
    (60.0, LetterGrade::B),
    (50.0, LetterGrade::BMinus),
    (40.0, LetterGrade::CPlus),
    (30.0, LetterGrade::C),
    (20.0, LetterGrade::CMinus),
    (15.0, LetterGrade::DPlus),
    (10.0, LetterGrade::D),
    (5.0, LetterGrade::DMinus),
];

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Map a score to its letter grade; the first threshold met wins.
///
/// NaN falls through every threshold and grades F.
pub fn score_to_grade(score: f64) -> LetterGrade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(minimum, _)| score >= *minimum)
        .map(|(_, grade)| *grade)
        .unwrap_or(LetterGrade::F)
}
