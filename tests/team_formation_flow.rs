use teamforge::composition::{
    CompositionRules, Gender, MemberProfile, ValidationMode,
};

fn member(name: &str, dept: &str, gender: Gender) -> MemberProfile {
    MemberProfile::new(name, dept, Some(gender))
}

/// A team is assembled one accept at a time; every step is validated in
/// `Forming` mode against the would-be member list, and the final roster
/// passes the full gate.
#[test]
fn incremental_formation_reaches_a_valid_roster() {
    let rules = CompositionRules::default();
    let roster = [
        member("Leader", "Physics", Gender::Female),
        member("First", "Mechanical Engineering", Gender::Male),
        member("Second", "Civil Engineering", Gender::Female),
        member("Third", "Computer Science & Engineering", Gender::Male),
        member("Fourth", "Information Science & Engineering", Gender::Male),
    ];

    // Each join is gated on the set as it would be after the join
    for n in 1..=roster.len() {
        let verdict = rules.validate(&roster[..n], ValidationMode::Forming);
        assert!(
            verdict.is_valid,
            "step {} unexpectedly rejected: {:?}",
            n, verdict.violations
        );
    }

    let final_verdict = rules.validate(&roster, ValidationMode::FullRoster);
    assert!(final_verdict.is_valid, "{:?}", final_verdict.violations);
}

/// Two candidates race for the last innovation seat. Whoever commits
/// second validates against a member list that already contains the
/// winner, and is rejected with the cohort violation; the roster stays at
/// the post-winner state.
#[test]
fn losing_racer_gets_the_cohort_violation() {
    let rules = CompositionRules::default();
    let mut members = vec![
        member("Leader", "Physics", Gender::Female),
        member("A", "CSE", Gender::Male),
        member("B", "ISE", Gender::Female),
    ];

    // Winner takes innovation count to the cap of 3
    members.push(member("Winner", "AIML", Gender::Male));
    let verdict = rules.validate(&members, ValidationMode::Forming);
    assert!(verdict.is_valid, "{:?}", verdict.violations);

    // Loser re-validates against the updated authoritative list
    let mut with_loser = members.clone();
    with_loser.push(member("Loser", "MCA", Gender::Male));
    let verdict = rules.validate(&with_loser, ValidationMode::Forming);
    assert!(!verdict.is_valid);
    assert!(verdict
        .violations
        .iter()
        .any(|v| v.contains("Too many innovation group members (4/3 max)")));

    // Nothing about the losing attempt changed the member list
    assert_eq!(members.len(), 4);
}

/// A candidate set one over capacity is rejected in both modes, which is
/// what a full team's accept path relies on.
#[test]
fn overfull_candidate_set_is_rejected() {
    let rules = CompositionRules::default();
    let members = vec![
        member("Leader", "Physics", Gender::Female),
        member("A", "Mechanical Engineering", Gender::Male),
        member("B", "Civil Engineering", Gender::Female),
        member("C", "CSE", Gender::Male),
        member("D", "ISE", Gender::Male),
        member("E", "Chemistry", Gender::Female),
    ];
    for mode in [ValidationMode::Forming, ValidationMode::FullRoster] {
        let verdict = rules.validate(&members, mode);
        assert!(!verdict.is_valid, "mode {:?} accepted 6 members", mode);
    }
}

/// The rule table is configuration: a bigger event with bigger teams reuses
/// the same engine with different numbers.
#[test]
fn rule_table_is_configurable() {
    let rules = CompositionRules {
        capacity: 6,
        min_female: 1,
        min_male: 1,
        ..CompositionRules::default()
    };
    let members = vec![
        member("Leader", "Physics", Gender::Female),
        member("A", "Mechanical Engineering", Gender::Male),
        member("B", "Civil Engineering", Gender::Male),
        member("C", "CSE", Gender::Male),
        member("D", "ISE", Gender::Male),
        member("E", "Architecture", Gender::Male),
    ];
    let verdict = rules.validate(&members, ValidationMode::FullRoster);
    assert!(verdict.is_valid, "{:?}", verdict.violations);
}

/// A member with no gender on file blocks the roster with exactly one
/// violation, and the balance rule stays quiet.
#[test]
fn unset_gender_blocks_with_a_single_named_violation() {
    let rules = CompositionRules::default();
    let members = vec![
        member("Leader", "Physics", Gender::Female),
        member("A", "Mechanical Engineering", Gender::Male),
        member("B", "Civil Engineering", Gender::Female),
        member("C", "CSE", Gender::Male),
        MemberProfile::new("Dana", "ISE", None),
    ];
    let verdict = rules.validate(&members, ValidationMode::FullRoster);
    assert!(!verdict.is_valid);
    assert_eq!(verdict.violations.len(), 1, "{:?}", verdict.violations);
    assert!(verdict.violations[0].contains("Dana"));
    assert!(verdict.violations[0].contains("Gender information missing"));
}
