use crate::composition::{Gender, MemberProfile};
use entity::user::Model as UserModel;

pub mod invitation;
pub mod postgres_service;
pub mod submission;
pub mod teams;
pub mod user;

/// What the composition engine needs to know about a user row.
pub(crate) fn profile_of(user: &UserModel) -> MemberProfile {
    MemberProfile::new(
        user.name.clone(),
        user.department.clone(),
        user.gender.as_deref().and_then(Gender::parse),
    )
}
