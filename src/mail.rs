//! Outbound mail through an HTTP relay. The client is constructed once and
//! injected into the services that need it; delivery failures are logged and
//! reported as a boolean outcome, never retried.

use serde::Serialize;

use crate::config::MailConfig;

pub struct MailClient {
    http: reqwest::Client,
    relay_url: Option<String>,
    api_key: String,
    from_address: String,
    from_name: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html: String,
    text: String,
}

impl MailClient {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            relay_url: config.relay_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            from_name: config.from_name.clone(),
        }
    }

    /// Send a message; returns whether delivery was accepted by the relay.
    pub async fn send(&self, to: &str, subject: &str, html: String, text: String) -> bool {
        let Some(relay_url) = &self.relay_url else {
            tracing::warn!(to, subject, "Mail relay not configured, skipping send");
            return false;
        };

        let message = RelayMessage {
            from: format!("{} <{}>", self.from_name, self.from_address),
            to,
            subject,
            html,
            text,
        };

        let result = self.http
            .post(relay_url)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send().await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::error!(to, subject, status = %response.status(), "Mail relay rejected message");
                false
            }
            Err(e) => {
                tracing::error!(to, subject, error = %e, "Failed to reach mail relay");
                false
            }
        }
    }

    pub async fn send_verification(&self, to: &str, token: &str, base_url: &str) -> bool {
        let link = format!("{}/verify-email?token={}", base_url, token);
        let html = format!(
            "<h2>Welcome to Influo</h2>\
             <p>Confirm your email address to activate your account:</p>\
             <p><a href=\"{link}\">Verify email</a></p>"
        );
        let text = format!("Confirm your email address: {link}");
        self.send(to, "Verify your email", html, text).await
    }

    pub async fn send_password_reset(&self, to: &str, token: &str, base_url: &str) -> bool {
        let link = format!("{}/reset-password?token={}", base_url, token);
        let html = format!(
            "<h2>Password reset</h2>\
             <p>A password reset was requested for your account. The link is valid for one hour.</p>\
             <p><a href=\"{link}\">Reset password</a></p>"
        );
        let text = format!("Reset your password (valid for one hour): {link}");
        self.send(to, "Reset your password", html, text).await
    }
}
