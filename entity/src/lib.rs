pub mod invitation;
pub mod submission;
pub mod team;
pub mod user;

/*
 Faculty sign up with an OTP-verified email, then band together into teams
 of five for the hackathon. One leader per team and the leader counts as a
 member. Membership lives on user.team_id, so "members of team T" is just
 a filter on users. Invitations are the only way into an existing team and
 are never deleted, only moved to a terminal status.
 */
