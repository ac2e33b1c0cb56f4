//! SMTP delivery of the awareness email via `lettre`.
//!
//! [`AwarenessMailer`] wraps the async SMTP transport and a fixed
//! plain-text message template. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and no mailer should be constructed.

use phishtrack_db::models::victim::CreateVictim;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (connection, STARTTLS, authentication).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS submission).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "security-team@company.local";

/// Default organisation mail domain for recipient derivation.
const DEFAULT_MAIL_DOMAIN: &str = "company.local";

/// Configuration for the SMTP awareness mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Domain appended to usernames when deriving recipient addresses.
    pub mail_domain: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and every event keeps `email_sent = false`.
    ///
    /// | Variable        | Required | Default                        |
    /// |-----------------|----------|--------------------------------|
    /// | `SMTP_HOST`     | yes      | —                              |
    /// | `SMTP_PORT`     | no       | `587`                          |
    /// | `SMTP_FROM`     | no       | `security-team@company.local`  |
    /// | `MAIL_DOMAIN`   | no       | `company.local`                |
    /// | `SMTP_USER`     | no       | —                              |
    /// | `SMTP_PASSWORD` | no       | —                              |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            mail_domain: std::env::var("MAIL_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_MAIL_DOMAIN.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Recipient resolution
// ---------------------------------------------------------------------------

/// Derive a recipient address from a reported username.
///
/// Deterministic concatenation with the organisation mail domain; returns
/// `None` when the event carried no usable username.
pub fn resolve_recipient(username: Option<&str>, domain: &str) -> Option<String> {
    match username {
        Some(name) if !name.is_empty() => Some(format!("{name}@{domain}")),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// AwarenessMailer
// ---------------------------------------------------------------------------

/// Sends the fixed educational follow-up message over SMTP.
pub struct AwarenessMailer {
    config: EmailConfig,
}

impl AwarenessMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Derive the recipient address for a reported username, using the
    /// configured mail domain.
    pub fn recipient_for(&self, username: Option<&str>) -> Option<String> {
        resolve_recipient(username, &self.config.mail_domain)
    }

    /// Send the awareness message for one logged event.
    ///
    /// Any failure is returned to the caller; the ingest path logs it and
    /// carries on — the persisted event is never rolled back and no retry
    /// is ever scheduled.
    pub async fn send(&self, to_email: &str, report: &CreateVictim) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(compose_body(report))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, "Awareness email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Message template
// ---------------------------------------------------------------------------

/// Fixed subject line of the awareness message.
const SUBJECT: &str = "Результат учебной проверки на фишинг";

/// Compose the fixed plain-text body with per-event substitutions.
///
/// The content is intentionally static apart from the greeting and the
/// event details block.
fn compose_body(report: &CreateVictim) -> String {
    let greeting = report.username.as_deref().unwrap_or("Коллега");
    let timestamp = report.timestamp.as_deref().unwrap_or("N/A");
    let hostname = report.hostname.as_deref().unwrap_or("N/A");
    let workspace = report.workspace.as_deref().unwrap_or("N/A");

    format!(
        "Здравствуйте, {greeting}!

Вы приняли участие в учебной проверке осведомлённости о кибербезопасности,
которую проводит команда информационной безопасности.

РЕЗУЛЬТАТ
---------
К сожалению, вы открыли имитацию фишинговой атаки.

Время события: {timestamp}
Компьютер: {hostname}
Проект: {workspace}

ЧТО ПРОИЗОШЛО
-------------
Вы открыли проект из непроверенного источника в VS Code и подтвердили
доверие его авторам (\"Trust workspace\"). Этого достаточно, чтобы код из
.vscode/tasks.json выполнился автоматически. Такую технику реально
используют APT-группировки для компрометации разработчиков через
фальшивые предложения работы и тестовые задания.

В настоящей атаке злоумышленники могли бы похитить ключи и токены из
браузера, установить backdoor, получить доступ к исходному коду или
использовать вашу машину для дальнейших атак.

КАК ЗАЩИТИТЬСЯ
--------------
1. Проверяйте источник кода прежде чем открывать его: кто автор, есть ли
   у репозитория история и репутация, запрашивали ли вы этот код.
2. Просматривайте .vscode/tasks.json до подтверждения доверия: нет ли
   \"runOn\": \"folderOpen\" и запуска неизвестных скриптов.
3. Открывайте незнакомый код в изолированной среде: виртуальная машина,
   контейнер или песочница.
4. Относитесь скептически к слишком привлекательным предложениям:
   завышенная оплата, срочность, необычные технические задания.

Если у вас остались вопросы или вы заметили подозрительную активность,
напишите команде безопасности: security-team@company.local.

Осведомлённость — ваша первая линия защиты.

--
Команда информационной безопасности"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn resolve_recipient_concatenates_domain() {
        assert_eq!(
            resolve_recipient(Some("alice"), "company.local").as_deref(),
            Some("alice@company.local")
        );
    }

    #[test]
    fn resolve_recipient_rejects_missing_or_empty_username() {
        assert!(resolve_recipient(None, "company.local").is_none());
        assert!(resolve_recipient(Some(""), "company.local").is_none());
    }

    #[test]
    fn compose_body_substitutes_event_details() {
        let report = CreateVictim {
            username: Some("alice".to_string()),
            timestamp: Some("2026-06-01T09:30:00".to_string()),
            hostname: Some("DEV-42".to_string()),
            workspace: Some("/home/alice/offer".to_string()),
            ..CreateVictim::default()
        };

        let body = compose_body(&report);
        assert!(body.contains("Здравствуйте, alice!"));
        assert!(body.contains("2026-06-01T09:30:00"));
        assert!(body.contains("DEV-42"));
        assert!(body.contains("/home/alice/offer"));
    }

    #[test]
    fn compose_body_falls_back_for_missing_fields() {
        let body = compose_body(&CreateVictim::default());
        assert!(body.contains("Здравствуйте, Коллега!"));
        assert!(body.contains("Компьютер: N/A"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
