//! Single end-of-run email with the workbook attached.
//!
//! Credentials come from the environment at this boundary only; the
//! scanning core never sees them. The email is sent exactly once per
//! run, after the full report is finalized.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use tracing::info;

use crate::config::Config;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug)]
pub enum ReportError {
    MissingEnv(&'static str),
    Message(String),
    Transport(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::MissingEnv(key) => write!(f, "missing environment variable {}", key),
            ReportError::Message(msg) => write!(f, "could not build email: {}", msg),
            ReportError::Transport(msg) => write!(f, "smtp transport failed: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {}

/// SMTP identity injected from the environment.
pub struct EmailEnv {
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

impl EmailEnv {
    pub fn from_env() -> Result<Self, ReportError> {
        fn require(key: &'static str) -> Result<String, ReportError> {
            std::env::var(key).map_err(|_| ReportError::MissingEnv(key))
        }
        Ok(Self {
            sender: require("EMAIL_SENDER")?,
            password: require("EMAIL_PASSWORD")?,
            recipient: require("EMAIL_RECIPIENT")?,
        })
    }
}

/// Pick the body template by whether the run found anything.
/// `{count}` in the detected template is replaced by the count.
pub fn select_body(config: &Config, opportunity_count: usize) -> String {
    if opportunity_count > 0 {
        config
            .email_body_detected
            .replace("{count}", &opportunity_count.to_string())
    } else {
        config.email_body_none.clone()
    }
}

/// Send the notification with the workbook attached.
pub async fn send_report(
    config: &Config,
    env: &EmailEnv,
    opportunity_count: usize,
    workbook_bytes: Vec<u8>,
) -> Result<(), ReportError> {
    let body = select_body(config, opportunity_count);

    let attachment_name = config
        .output_file
        .rsplit('/')
        .next()
        .unwrap_or(&config.output_file)
        .to_string();
    let content_type =
        ContentType::parse(XLSX_MIME).map_err(|e| ReportError::Message(e.to_string()))?;

    let message = Message::builder()
        .from(
            env.sender
                .parse()
                .map_err(|e| ReportError::Message(format!("sender address: {}", e)))?,
        )
        .to(env
            .recipient
            .parse()
            .map_err(|e| ReportError::Message(format!("recipient address: {}", e)))?)
        .subject(&config.email_subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body))
                .singlepart(Attachment::new(attachment_name).body(workbook_bytes, content_type)),
        )
        .map_err(|e| ReportError::Message(e.to_string()))?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_server)
        .map_err(|e| ReportError::Transport(e.to_string()))?
        .port(config.smtp_port)
        .credentials(Credentials::new(env.sender.clone(), env.password.clone()))
        .build();

    mailer
        .send(message)
        .await
        .map_err(|e| ReportError::Transport(e.to_string()))?;

    info!(recipient = %env.recipient, "notification email sent");
    Ok(())
}
