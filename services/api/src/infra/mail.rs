use anyhow::Context as _;
use serde::Serialize;

use crate::domain::repository::MailerPort;
use crate::error::ApiError;

/// Outbound mail through an HTTP mail-API relay (JSON POST).
#[derive(Clone)]
pub struct HttpMailer {
    pub client: reqwest::Client,
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: String,
}

#[derive(Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl MailerPort for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), ApiError> {
        let payload = MailPayload {
            from: &self.from,
            to,
            subject,
            html: html_body,
        };
        let mut request = self.client.post(&self.api_url).json(&payload);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }
        request
            .send()
            .await
            .context("send mail request")?
            .error_for_status()
            .context("mail API rejected message")?;
        Ok(())
    }
}
