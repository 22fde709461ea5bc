use teamforge::composition::{CompositionRules, EligibilityRules, Gender, MemberProfile, ValidationMode};

/// The stored verdict is a pure function of the member list: recomputing
/// with no membership change yields identical JSON bytes.
#[test]
fn recompute_is_idempotent() {
    let rules = EligibilityRules::default();
    let departments = ["Physics", "ECE", "CSE", "ISE"];

    let (v1, d1) = rules.evaluate(departments);
    let (v2, d2) = rules.evaluate(departments);

    assert_eq!(v1, v2);
    assert_eq!(d1, d2);
    assert_eq!(
        serde_json::to_vec(&d1).unwrap(),
        serde_json::to_vec(&d2).unwrap()
    );
}

/// Eligibility tracks membership changes: dropping the sole foundation
/// member flips the verdict, adding one back restores it.
#[test]
fn recompute_follows_membership_changes() {
    let rules = EligibilityRules::default();

    let full = ["Physics", "ECE", "Civil Engineering", "CSE", "ISE"];
    let (eligible, _) = rules.evaluate(full);
    assert!(eligible);

    let after_leave = ["ECE", "Civil Engineering", "CSE", "ISE"];
    let (eligible, details) = rules.evaluate(after_leave);
    assert!(!eligible);
    assert_eq!(details.foundation.count, 0);
    assert!(!details.foundation.fulfilled);

    let after_rejoin = ["Chemistry", "ECE", "Civil Engineering", "CSE", "ISE"];
    let (eligible, _) = rules.evaluate(after_rejoin);
    assert!(eligible);
}

/// The display check is softer than the mutation gate: the same roster can
/// be "eligible" for the dashboard while the strict gate still rejects it.
#[test]
fn health_check_is_softer_than_the_mutation_gate() {
    let members = vec![
        MemberProfile::new("A", "Physics", Some(Gender::Male)),
        MemberProfile::new("B", "Chemistry", Some(Gender::Male)),
        MemberProfile::new("C", "Civil Engineering", Some(Gender::Male)),
        MemberProfile::new("D", "CSE", Some(Gender::Male)),
        MemberProfile::new("E", "ISE", Some(Gender::Male)),
    ];

    let (eligible, _) = EligibilityRules::default()
        .evaluate(members.iter().map(|m| m.department.as_str()));
    assert!(eligible, "two foundation members pass the health check");

    let verdict = CompositionRules::default().validate(&members, ValidationMode::FullRoster);
    assert!(!verdict.is_valid, "the strict gate still rejects it");
    assert!(verdict
        .violations
        .iter()
        .any(|v| v.contains("Too many foundation group members")));
    assert!(verdict
        .violations
        .iter()
        .any(|v| v.contains("female members")));
}

/// Unclassified departments never move the cohort needles.
#[test]
fn unclassified_departments_are_invisible_to_eligibility() {
    let rules = EligibilityRules::default();
    let with_stranger = ["Physics", "ECE", "CSE", "ISE", "Fine Arts"];
    let without = ["Physics", "ECE", "CSE", "ISE"];

    let (v1, d1) = rules.evaluate(with_stranger);
    let (v2, d2) = rules.evaluate(without);
    assert_eq!(v1, v2);
    assert_eq!(d1, d2);
}
