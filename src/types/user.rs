use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct RSendOtp {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RVerifyOtp {
    pub email: String,
    pub otp: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RRegister {
    pub username: String,
    pub password: String,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub email: String,
    pub skills: String,
    pub experience: i32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RLogin {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRes {
    pub message: String,
    pub token: String,
    pub user: UserView,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RForgotPassword {
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RResetPassword {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RUpdateProfile {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub gender: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<i32>,
}

/// What a user looks like on the wire. Never the raw entity: hashes stay
/// out, gender stays in its normalized form.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub email: String,
    pub gender: Option<String>,
    pub skills: String,
    pub experience: i32,
    pub team_id: Option<Uuid>,
}

impl From<entity::user::Model> for UserView {
    fn from(u: entity::user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            designation: u.designation,
            department: u.department,
            email: u.email,
            gender: u.gender,
            skills: u.skills,
            experience: u.experience,
            team_id: u.team_id,
        }
    }
}

/// Used by the db layer when inserting a new account.
pub struct DBUserCreate {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub email: String,
    pub skills: String,
    pub experience: i32,
}
