//! `send_job_email` — delivers a job-posting summary over SMTP.
//!
//! The capability input is a JSON object with `recipient_email` and
//! `job_details` keys; the model composes it, so a parse failure is
//! reported back as an observation rather than an error.

use async_trait::async_trait;
use jobscout_config::EmailConfig;
use jobscout_core::Capability;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use tracing::{info, warn};

const SUBJECT: &str = "Your Daily AI Engineering Job Postings";

pub struct EmailCapability {
    sender_address: Option<String>,
    sender_password: Option<String>,
    smtp_server: String,
    smtp_port: u16,
}

#[derive(Debug, Deserialize)]
struct EmailRequest {
    recipient_email: String,
    job_details: String,
}

impl EmailCapability {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            sender_address: config.sender_address.clone(),
            sender_password: config.sender_password.clone(),
            smtp_server: config.smtp_server.clone(),
            smtp_port: config.smtp_port,
        }
    }

    async fn send(&self, request: &EmailRequest) -> Result<(), String> {
        let sender = self
            .sender_address
            .as_deref()
            .ok_or_else(|| "EMAIL_ADDRESS not set".to_string())?;
        let password = self
            .sender_password
            .as_deref()
            .ok_or_else(|| "EMAIL_PASSWORD not set".to_string())?;

        let message = Message::builder()
            .from(sender
                .parse()
                .map_err(|e| format!("invalid sender address: {e}"))?)
            .to(request
                .recipient_email
                .parse()
                .map_err(|e| format!("invalid recipient address: {e}"))?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(compose_body(&request.job_details))
            .map_err(|e| format!("could not build message: {e}"))?;

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_server)
                .map_err(|e| format!("could not reach SMTP relay: {e}"))?
                .port(self.smtp_port)
                .credentials(Credentials::new(sender.to_string(), password.to_string()))
                .build();

        transport.send(message).await.map_err(|e| e.to_string())?;
        info!(recipient = %request.recipient_email, "Email sent");
        Ok(())
    }
}

fn compose_body(job_details: &str) -> String {
    format!(
        "Hello,\n\nHere are the new AI engineering job postings I found for you. \
         Hope these help you land that dream role!\n\n{job_details}\n\n\
         Best regards,\nYour Job Agent"
    )
}

#[async_trait]
impl Capability for EmailCapability {
    fn name(&self) -> &str {
        "send_job_email"
    }

    fn description(&self) -> &str {
        "Useful for when you need to send an email with job postings. \
         The input should be a JSON string with 'recipient_email' and a \
         formatted 'job_details' string."
    }

    async fn invoke(&self, input: &str) -> String {
        let request: EmailRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(e) => {
                return format!(
                    "Failed to send email. Error: input must be a JSON object \
                     with 'recipient_email' and 'job_details' keys ({e})."
                );
            }
        };

        match self.send(&request).await {
            Ok(()) => format!("Email successfully sent to {}.", request.recipient_email),
            Err(reason) => {
                warn!(%reason, "Email delivery failed");
                format!("Failed to send email. Error: {reason}")
            }
        }
    }
}
