use serde::{Deserialize, Serialize};

use super::cohort::{classify, Cohort};
use super::rules::CohortWindow;

/// Display-side health check, softer than the mutation gate: a
/// partially-formed team can already be "eligible" here while still being
/// rejected by [`super::CompositionRules`] at full-roster time. No gender
/// rule, no size rule, just the three cohort windows.
#[derive(Debug, Clone)]
pub struct EligibilityRules {
    pub foundation: CohortWindow,
    pub structural: CohortWindow,
    pub innovation: CohortWindow,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            foundation: CohortWindow::new(1, 2),
            structural: CohortWindow::new(1, 2),
            innovation: CohortWindow::new(2, 3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortStatus {
    pub count: usize,
    pub required: bool,
    pub fulfilled: bool,
}

/// The breakdown persisted onto the team record. Field order is fixed, so
/// serializing the same membership twice yields byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDetails {
    pub foundation: CohortStatus,
    pub structural: CohortStatus,
    pub innovation: CohortStatus,
}

impl EligibilityRules {
    /// Evaluates the current member departments. Returns the overall
    /// verdict plus the per-cohort breakdown for display.
    pub fn evaluate<'a, I>(&self, departments: I) -> (bool, EligibilityDetails)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = [0usize; 3];
        for dept in departments {
            if let Some(cohort) = classify(dept) {
                counts[cohort as usize] += 1;
            }
        }

        let status = |cohort: Cohort, window: &CohortWindow| {
            let count = counts[cohort as usize];
            CohortStatus {
                count,
                required: true,
                fulfilled: count >= window.min && count <= window.max,
            }
        };

        let details = EligibilityDetails {
            foundation: status(Cohort::Foundation, &self.foundation),
            structural: status(Cohort::Structural, &self.structural),
            innovation: status(Cohort::Innovation, &self.innovation),
        };
        let is_eligible = details.foundation.fulfilled
            && details.structural.fulfilled
            && details.innovation.fulfilled;
        (is_eligible, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_mix_is_eligible() {
        let depts = [
            "Physics",
            "Mechanical Engineering",
            "Civil Engineering",
            "CSE",
            "ISE",
        ];
        let (eligible, details) = EligibilityRules::default().evaluate(depts);
        assert!(eligible);
        assert_eq!(details.foundation.count, 1);
        assert_eq!(details.structural.count, 2);
        assert_eq!(details.innovation.count, 2);
        assert!(details.foundation.fulfilled);
    }

    #[test]
    fn tolerates_two_foundation_members() {
        // Stricter gate would reject this; the health check does not
        let depts = ["Physics", "Chemistry", "Civil Engineering", "CSE", "ISE"];
        let (eligible, _) = EligibilityRules::default().evaluate(depts);
        assert!(eligible);
    }

    #[test]
    fn empty_team_is_not_eligible() {
        let (eligible, details) = EligibilityRules::default().evaluate([]);
        assert!(!eligible);
        assert_eq!(details.foundation.count, 0);
        assert!(!details.foundation.fulfilled);
    }

    #[test]
    fn too_many_innovation_members_breaks_eligibility() {
        let depts = ["CSE", "ISE", "AIML", "MCA"];
        let (eligible, details) = EligibilityRules::default().evaluate(depts);
        assert!(!eligible);
        assert_eq!(details.innovation.count, 4);
        assert!(!details.innovation.fulfilled);
    }

    #[test]
    fn evaluation_is_idempotent_down_to_the_bytes() {
        let depts = ["Physics", "ECE", "CSE", "ISE"];
        let rules = EligibilityRules::default();
        let (first_verdict, first) = rules.evaluate(depts);
        let (second_verdict, second) = rules.evaluate(depts);
        assert_eq!(first_verdict, second_verdict);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
