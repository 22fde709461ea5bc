use serde::{Deserialize, Serialize};
use std::fmt;

/// Foundation sciences and management.
pub const FOUNDATION_DEPARTMENTS: &[&str] = &[
    "Physics",
    "Chemistry",
    "Mathematics",
    "Master of Business Administration",
    "Humanities and Social Science",
    "Humanities & Social Science",
    "Maths",
    "MBA",
    "HSS",
];

/// Classical engineering branches.
pub const STRUCTURAL_DEPARTMENTS: &[&str] = &[
    "Mechanical Engineering",
    "Civil Engineering",
    "Electrical & Electronics Engineering",
    "Electronics & Communication Engineering",
    "Electronics & Telecommunication Engineering",
    "ME",
    "CIV",
    "EE",
    "ECE",
    "ETE",
];

/// Computing branches.
pub const INNOVATION_DEPARTMENTS: &[&str] = &[
    "Computer Science & Engineering",
    "Computer Science and Engineering",
    "Information Science & Engineering",
    "Artificial Intelligence and Machine Learning",
    "Computer Science and Business Systems",
    "Master of Computer Applications",
    "CSE",
    "ISE",
    "AIML",
    "AI&ML",
    "CSBS",
    "MCA",
];

/// Department grouping used by the quota rules. A department that matches
/// none of the three lists is unclassified (`classify` returns `None`) and
/// participates in size and gender checks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cohort {
    Foundation,
    Structural,
    Innovation,
}

impl Cohort {
    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Foundation => "foundation",
            Cohort::Structural => "structural",
            Cohort::Innovation => "innovation",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a free-text department to its cohort. Pure and total: trims
/// whitespace, matches case-insensitively against the fixed lists above,
/// and returns `None` for anything unrecognized.
pub fn classify(department: &str) -> Option<Cohort> {
    let dept = department.trim();
    let hit = |list: &[&str]| list.iter().any(|d| d.eq_ignore_ascii_case(dept));

    if hit(FOUNDATION_DEPARTMENTS) {
        Some(Cohort::Foundation)
    } else if hit(STRUCTURAL_DEPARTMENTS) {
        Some(Cohort::Structural)
    } else if hit(INNOVATION_DEPARTMENTS) {
        Some(Cohort::Innovation)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_full_department_names() {
        assert_eq!(classify("Physics"), Some(Cohort::Foundation));
        assert_eq!(classify("Civil Engineering"), Some(Cohort::Structural));
        assert_eq!(
            classify("Computer Science & Engineering"),
            Some(Cohort::Innovation)
        );
        assert_eq!(
            classify("Computer Science and Engineering"),
            Some(Cohort::Innovation)
        );
    }

    #[test]
    fn classifies_short_forms() {
        assert_eq!(classify("MBA"), Some(Cohort::Foundation));
        assert_eq!(classify("ECE"), Some(Cohort::Structural));
        assert_eq!(classify("AIML"), Some(Cohort::Innovation));
        assert_eq!(classify("CSBS"), Some(Cohort::Innovation));
    }

    #[test]
    fn ignores_case_and_whitespace() {
        assert_eq!(classify("  physics "), Some(Cohort::Foundation));
        assert_eq!(classify("mechanical engineering"), Some(Cohort::Structural));
    }

    #[test]
    fn unknown_departments_are_unclassified() {
        assert_eq!(classify("Architecture"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("Fine Arts"), None);
    }

    #[test]
    fn classification_is_stable() {
        for dept in ["Chemistry", "ETE", "MCA", "Biotech"] {
            assert_eq!(classify(dept), classify(dept));
        }
    }
}
