use actix_web::web;

pub mod auth;
pub mod health;
pub mod invitation;
pub mod submission;
pub mod team;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/auth")
            .service(auth::otp::send_otp)
            .service(auth::otp::verify_otp)
            .service(auth::otp::resend_otp)
            .service(auth::register::register)
            .service(auth::login::login)
            .service(auth::password::forgot_password)
            .service(auth::password::reset_password),
    );
    cfg.service(
        web::scope("/user")
            .service(user::profile::get_profile)
            .service(user::profile::update_profile)
            .service(user::faculty::list_faculty)
            .service(user::faculty::list_available_faculty),
    );
    cfg.service(
        web::scope("/team")
            .service(team::create::create_team)
            .service(team::get::my_team)
            .service(team::get::list_teams)
            .service(team::get::get_team)
            .service(team::eligibility::team_eligibility)
            .service(team::members::add_member)
            .service(team::members::remove_member)
            .service(team::leave::leave_team)
            .service(team::delete::delete_team)
            .service(invitation::invite::invite_user)
            .service(invitation::invite::join_team),
    );
    cfg.service(
        web::scope("/invitation")
            .service(invitation::list::list_notifications)
            .service(invitation::respond::decline_all)
            .service(invitation::respond::accept_invitation)
            .service(invitation::respond::decline_invitation),
    );
    cfg.service(
        web::scope("/submission")
            .service(submission::create::create_submission)
            .service(submission::list::team_submissions)
            .service(submission::get::get_submission),
    );
}
