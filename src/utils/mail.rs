use reqwest::{Client, ClientBuilder};
use std::time::Instant;
use tracing::{error, info};

use crate::config::config;
use crate::types::mail::SendEmail;

/// POSTs one message to the mail API. Callers treat this as
/// fire-and-forget: a delivery failure is logged, never propagated into
/// the state change that triggered it.
pub async fn send_email(email: SendEmail) -> Result<String, String> {
    let cfg = config();
    let api = &cfg.mail.endpoint;
    let api_key = &cfg.mail.api_key;

    let payload =
        serde_json::to_string(&email).map_err(|e| format!("serialize email failed: {e}"))?;

    let client: Client = ClientBuilder::new()
        .user_agent("teamforge/1.0 (+reqwest)")
        .tcp_nodelay(true)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| format!("build client failed: {e}"))?;

    let t0 = Instant::now();
    let res = client
        .post(api)
        .bearer_auth(api_key) // do NOT log the key
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await
        .map_err(|e| format!("send failed: {e}"))?;
    let dt = t0.elapsed();

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| format!("read body failed: {e}"))?;

    if status.is_success() {
        info!("mail sent to {:?} in {} ms", email.to, dt.as_millis());
        Ok(body)
    } else {
        error!("mail API error: HTTP {status}: {body}");
        Err(format!("mail API error: HTTP {status}: {body}"))
    }
}

pub async fn mail_otp_code(to: &str, name: Option<&str>, code: &str) -> Result<String, String> {
    let greeting = name.map(|n| format!("Hi {n},")).unwrap_or_else(|| "Hi,".to_string());
    send_email(SendEmail {
        from: config().mail.from.clone(),
        to: vec![to.to_string()],
        subject: "Your verification code".to_string(),
        text: Some(format!(
            "{greeting}\n\nYour verification code is: {code}\n\nIt expires in 5 minutes. If you didn't request this, you can ignore this email."
        )),
        ..Default::default()
    })
    .await
}

pub async fn mail_password_reset(to: &str, token: &str) -> Result<String, String> {
    let link = format!("{}/reset-password?token={token}", config().frontend_url);
    send_email(SendEmail {
        from: config().mail.from.clone(),
        to: vec![to.to_string()],
        subject: "Password reset".to_string(),
        text: Some(format!(
            "A password reset was requested for your account.\n\nReset link: {link}\n\nThe link is valid for one hour and can be used once."
        )),
        ..Default::default()
    })
    .await
}

pub async fn mail_team_invite(to: &str, team_name: &str, message: &str) -> Result<String, String> {
    send_email(SendEmail {
        from: config().mail.from.clone(),
        to: vec![to.to_string()],
        subject: format!("Invitation to join {team_name}"),
        text: Some(format!(
            "{message}\n\nLog in to accept or decline the invitation."
        )),
        ..Default::default()
    })
    .await
}

pub async fn mail_team_created(to: Vec<String>, team_name: &str) -> Result<String, String> {
    send_email(SendEmail {
        from: config().mail.from.clone(),
        to,
        subject: format!("Team {team_name} is registered"),
        text: Some(format!(
            "Your team \"{team_name}\" has been registered for the hackathon. Good luck!"
        )),
        ..Default::default()
    })
    .await
}

pub async fn mail_invitation_declined(to: &str, team_name: &str) -> Result<String, String> {
    send_email(SendEmail {
        from: config().mail.from.clone(),
        to: vec![to.to_string()],
        subject: format!("Invitation to {team_name} declined"),
        text: Some(format!(
            "Your invitation for team \"{team_name}\" was declined."
        )),
        ..Default::default()
    })
    .await
}
