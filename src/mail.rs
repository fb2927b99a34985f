use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    config::MailConfig,
    error::{AppError, AppResult},
};

/// Outbound notification seam. Both operations are fire-and-report: a failed
/// send surfaces to the caller, nothing is retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the assigned promo code to the recipient.
    async fn send_code(&self, to: &str, code: &str) -> AppResult<()>;

    /// Relays a user-submitted message to the operator address.
    async fn send_feedback(&self, email: &str, message: &str) -> AppResult<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        let from: Mailbox = format!("PromoCoder <{}>", config.user).parse()?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_code(&self, to: &str, code: &str) -> AppResult<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject("Your promo code")
            .header(ContentType::TEXT_HTML)
            .body(format!("<b>Your promo code: {}</b>", code))?;

        self.transport.send(message).await?;
        tracing::info!("Promo code sent to {}", to);

        Ok(())
    }

    async fn send_feedback(&self, email: &str, message: &str) -> AppResult<()> {
        // Feedback lands in the operator's own mailbox.
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.from.clone())
            .subject("Website feedback")
            .header(ContentType::TEXT_HTML)
            .body(format!("<b>EMAIL: {}<br>MESSAGE: {}</b>", email, message))?;

        self.transport.send(message).await?;
        tracing::info!("Feedback relayed from {}", email);

        Ok(())
    }
}

/// In-memory mailer for tests: records every send, optionally fails.
#[derive(Debug, Default)]
pub struct MockMailer {
    pub sent: std::sync::Mutex<Vec<SentMail>>,
    pub fail: std::sync::atomic::AtomicBool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMail {
    Code { to: String, code: String },
    Feedback { email: String, message: String },
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer
            .fail
            .store(true, std::sync::atomic::Ordering::SeqCst);
        mailer
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn check_failure(&self) -> AppResult<()> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "mock mail delivery failure"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_code(&self, to: &str, code: &str) -> AppResult<()> {
        self.check_failure()?;
        self.sent.lock().unwrap().push(SentMail::Code {
            to: to.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }

    async fn send_feedback(&self, email: &str, message: &str) -> AppResult<()> {
        self.check_failure()?;
        self.sent.lock().unwrap().push(SentMail::Feedback {
            email: email.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
