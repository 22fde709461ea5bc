use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::cohort::{classify, Cohort};

/// Member gender, normalized at the profile boundary. Users with no gender
/// set are excluded from team operations until they update their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Accepts the spellings the registration form has historically sent.
    pub fn parse(raw: &str) -> Option<Gender> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Some(Gender::Male),
            "F" | "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the validator needs to know about one candidate member.
#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub name: String,
    pub department: String,
    pub gender: Option<Gender>,
}

impl MemberProfile {
    pub fn new(name: impl Into<String>, department: impl Into<String>, gender: Option<Gender>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            gender,
        }
    }
}

/// Inclusive per-cohort member count window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CohortWindow {
    pub min: usize,
    pub max: usize,
}

impl CohortWindow {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// How strictly to judge the candidate set.
///
/// `FullRoster` is the gate for team creation, where the complete proposed
/// roster is on the table. `Forming` is the gate for incremental additions
/// (invite accept, join approval, leader add): a growing team cannot yet
/// satisfy the exact size, the cohort minimums, or the gender balance, so
/// only the upper bounds and the always-applicable rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    FullRoster,
    Forming,
}

/// The parametrized rule table. One instance, one source of truth; every
/// call site validates against the same windows.
#[derive(Debug, Clone)]
pub struct CompositionRules {
    /// Total team size including the leader.
    pub capacity: usize,
    pub foundation: CohortWindow,
    pub structural: CohortWindow,
    pub innovation: CohortWindow,
    pub min_female: usize,
    pub min_male: usize,
}

impl Default for CompositionRules {
    fn default() -> Self {
        Self {
            capacity: 5,
            foundation: CohortWindow::new(1, 1),
            structural: CohortWindow::new(1, 2),
            innovation: CohortWindow::new(2, 3),
            min_female: 2,
            min_male: 2,
        }
    }
}

/// Outcome of a validation pass: every applicable rule is evaluated and
/// every violation collected, never fail-fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionVerdict {
    pub is_valid: bool,
    pub violations: Vec<String>,
}

impl CompositionRules {
    fn window(&self, cohort: Cohort) -> CohortWindow {
        match cohort {
            Cohort::Foundation => self.foundation,
            Cohort::Structural => self.structural,
            Cohort::Innovation => self.innovation,
        }
    }

    /// Validates a candidate member set against the rule table.
    ///
    /// The candidate set is the proposed final state (existing members plus
    /// any addition, minus any removal), leader included.
    pub fn validate(&self, members: &[MemberProfile], mode: ValidationMode) -> CompositionVerdict {
        let mut violations = Vec::new();

        match mode {
            ValidationMode::FullRoster => {
                if members.len() != self.capacity {
                    violations.push(format!(
                        "Team must have exactly {} members (currently {})",
                        self.capacity,
                        members.len()
                    ));
                }
            }
            ValidationMode::Forming => {
                if members.len() > self.capacity {
                    violations.push(format!(
                        "Team cannot have more than {} members (currently {})",
                        self.capacity,
                        members.len()
                    ));
                }
            }
        }

        let mut seen = HashSet::new();
        let all_distinct = members
            .iter()
            .all(|m| seen.insert(m.department.trim().to_ascii_lowercase()));
        if !all_distinct {
            violations.push("All team members must be from different departments".to_string());
        }

        let mut counts = [0usize; 3];
        for member in members {
            if let Some(cohort) = classify(&member.department) {
                counts[cohort as usize] += 1;
            }
        }
        for cohort in [Cohort::Foundation, Cohort::Structural, Cohort::Innovation] {
            let count = counts[cohort as usize];
            let window = self.window(cohort);
            if count > window.max {
                violations.push(format!(
                    "Too many {} group members ({}/{} max)",
                    cohort, count, window.max
                ));
            }
            if mode == ValidationMode::FullRoster && count < window.min {
                violations.push(format!(
                    "Team must have at least {} {} group member(s) (currently {})",
                    window.min, cohort, count
                ));
            }
        }

        let missing: Vec<&str> = members
            .iter()
            .filter(|m| m.gender.is_none())
            .map(|m| m.name.as_str())
            .collect();
        if !missing.is_empty() {
            // Balance cannot be judged with gaps in the data, so the
            // balance rule is skipped this round.
            violations.push(format!(
                "Gender information missing for: {}. Please update profiles before forming a team.",
                missing.join(", ")
            ));
        } else if mode == ValidationMode::FullRoster {
            let female = members
                .iter()
                .filter(|m| m.gender == Some(Gender::Female))
                .count();
            let male = members
                .iter()
                .filter(|m| m.gender == Some(Gender::Male))
                .count();
            if female < self.min_female {
                violations.push(format!(
                    "Team must have at least {} female members (currently {})",
                    self.min_female, female
                ));
            }
            if male < self.min_male {
                violations.push(format!(
                    "Team must have at least {} male members (currently {})",
                    self.min_male, male
                ));
            }
        }

        CompositionVerdict {
            is_valid: violations.is_empty(),
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, dept: &str, gender: Option<Gender>) -> MemberProfile {
        MemberProfile::new(name, dept, gender)
    }

    /// 1 foundation, 2 structural, 2 innovation, 2F + 3M.
    fn valid_roster() -> Vec<MemberProfile> {
        vec![
            member("Asha", "Physics", Some(Gender::Female)),
            member("Bharat", "Mechanical Engineering", Some(Gender::Male)),
            member("Chitra", "Civil Engineering", Some(Gender::Female)),
            member("Dev", "Computer Science & Engineering", Some(Gender::Male)),
            member("Esha", "Information Science & Engineering", Some(Gender::Male)),
        ]
    }

    #[test]
    fn accepts_a_balanced_full_roster() {
        let verdict = CompositionRules::default().validate(&valid_roster(), ValidationMode::FullRoster);
        assert!(verdict.is_valid, "violations: {:?}", verdict.violations);
        assert!(verdict.violations.is_empty());
    }

    #[test]
    fn rejects_wrong_size_at_full_roster() {
        let rules = CompositionRules::default();
        for n in [0, 1, 4, 6] {
            let members: Vec<_> = valid_roster().into_iter().cycle().take(n).collect();
            let verdict = rules.validate(&members, ValidationMode::FullRoster);
            assert!(!verdict.is_valid);
            assert!(
                verdict.violations.iter().any(|v| v.contains("exactly 5 members")),
                "size {} missing size violation: {:?}",
                n,
                verdict.violations
            );
        }
    }

    #[test]
    fn flags_duplicate_departments_regardless_of_other_rules() {
        let mut members = valid_roster();
        members[2].department = members[1].department.clone();
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(!verdict.is_valid);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("different departments")));
    }

    #[test]
    fn duplicate_departments_match_case_insensitively() {
        let members = vec![
            member("A", "Physics", Some(Gender::Female)),
            member("B", "physics ", Some(Gender::Male)),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::Forming);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("different departments")));
    }

    #[test]
    fn enforces_cohort_windows_at_full_roster() {
        // 2 foundation, 1 structural, 2 innovation: foundation over, fine otherwise
        let members = vec![
            member("A", "Physics", Some(Gender::Female)),
            member("B", "Chemistry", Some(Gender::Female)),
            member("C", "Civil Engineering", Some(Gender::Male)),
            member("D", "CSE", Some(Gender::Male)),
            member("E", "ISE", Some(Gender::Male)),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(!verdict.is_valid);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("Too many foundation group members (2/1 max)")));
    }

    #[test]
    fn requires_cohort_minimums_at_full_roster() {
        // No foundation member at all
        let members = vec![
            member("A", "Mechanical Engineering", Some(Gender::Female)),
            member("B", "Civil Engineering", Some(Gender::Female)),
            member("C", "CSE", Some(Gender::Male)),
            member("D", "ISE", Some(Gender::Male)),
            member("E", "MCA", Some(Gender::Male)),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(!verdict.is_valid);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("at least 1 foundation group member")));
    }

    #[test]
    fn missing_gender_suppresses_the_balance_rule() {
        let mut members = valid_roster();
        members[0].gender = None; // Asha, the only listed female besides Chitra
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(!verdict.is_valid);
        let gender_violations: Vec<_> = verdict
            .violations
            .iter()
            .filter(|v| v.contains("Gender information missing") || v.contains("female members"))
            .collect();
        assert_eq!(gender_violations.len(), 1);
        assert!(gender_violations[0].contains("Asha"));
    }

    #[test]
    fn missing_gender_violation_names_every_affected_member() {
        let mut members = valid_roster();
        members[0].gender = None;
        members[3].gender = None;
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        let v = verdict
            .violations
            .iter()
            .find(|v| v.contains("Gender information missing"))
            .expect("missing-gender violation");
        assert!(v.contains("Asha") && v.contains("Dev"));
    }

    #[test]
    fn gender_balance_enforced_both_ways() {
        let mut members = valid_roster();
        // All male
        for m in &mut members {
            m.gender = Some(Gender::Male);
        }
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("at least 2 female members (currently 0)")));

        // All female
        for m in &mut members {
            m.gender = Some(Gender::Female);
        }
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("at least 2 male members (currently 0)")));
    }

    #[test]
    fn forming_mode_allows_partial_teams() {
        // Two members, minimums unmet: fine while forming
        let members = vec![
            member("A", "Physics", Some(Gender::Female)),
            member("B", "CSE", Some(Gender::Male)),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::Forming);
        assert!(verdict.is_valid, "violations: {:?}", verdict.violations);
    }

    #[test]
    fn forming_mode_still_enforces_maxima() {
        let members = vec![
            member("A", "CSE", Some(Gender::Female)),
            member("B", "ISE", Some(Gender::Male)),
            member("C", "AIML", Some(Gender::Male)),
            member("D", "MCA", Some(Gender::Female)),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::Forming);
        assert!(!verdict.is_valid);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("Too many innovation group members (4/3 max)")));
    }

    #[test]
    fn forming_mode_rejects_overflow() {
        let mut members = valid_roster();
        members.push(member("F", "Architecture", Some(Gender::Female)));
        let verdict = CompositionRules::default().validate(&members, ValidationMode::Forming);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("cannot have more than 5 members")));
    }

    #[test]
    fn unclassified_departments_count_for_size_and_gender_only() {
        // Architecture is in no cohort; roster is otherwise 1F/1S/2I
        let members = vec![
            member("A", "Physics", Some(Gender::Female)),
            member("B", "Mechanical Engineering", Some(Gender::Female)),
            member("C", "CSE", Some(Gender::Male)),
            member("D", "ISE", Some(Gender::Male)),
            member("E", "Architecture", Some(Gender::Male)),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(verdict.is_valid, "violations: {:?}", verdict.violations);
    }

    #[test]
    fn violations_accumulate_rather_than_fail_fast() {
        // Wrong size, duplicate departments, and a missing gender at once
        let members = vec![
            member("A", "Physics", Some(Gender::Female)),
            member("B", "Physics", None),
        ];
        let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
        assert!(verdict.violations.len() >= 3, "got: {:?}", verdict.violations);
    }

    #[test]
    fn gender_parse_accepts_historic_spellings() {
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("F"), Some(Gender::Female));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
        assert_eq!(Gender::parse(""), None);
    }
}
