//! Team composition engine.
//!
//! The one place that knows the hackathon's formation rules: which
//! departments belong to which cohort, what a valid roster looks like, and
//! what a "healthy" team looks like for display. Every membership-changing
//! operation goes through [`CompositionRules::validate`] before anything is
//! written.

pub mod cohort;
pub mod eligibility;
pub mod rules;

pub use cohort::{classify, Cohort};
pub use eligibility::{EligibilityDetails, EligibilityRules};
pub use rules::{
    CompositionRules, CompositionVerdict, Gender, MemberProfile, ValidationMode,
};
