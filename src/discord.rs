//! Discord webhook notifications

use chrono::{DateTime, Local};
use serde::Serialize;

const BOT_USERNAME: &str = "Professeur Chen";
const BOT_AVATAR_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/5/53/Pok%C3%A9_Ball_icon.svg";

/// How a run summary is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// New pops detected
    Alert,
    /// Nothing to report
    Routine,
}

impl Severity {
    /// Discord embed color
    pub fn color(&self) -> u32 {
        match self {
            Severity::Alert => 15548997, // red
            Severity::Routine => 5763719, // green
        }
    }
}

/// The single message sent at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

/// What happened to a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No delivery target configured (or dry run)
    Skipped,
    Failed,
}

/// Delivers run summaries. Never fails past its own boundary: problems are logged
/// and reported through [`Delivery`].
pub trait Notifier {
    fn notify(&self, notification: &Notification) -> Delivery;
}

#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    pub username: String,
    pub avatar_url: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub footer: Footer,
}

#[derive(Debug, Serialize)]
pub struct Footer {
    pub text: String,
}

impl WebhookPayload {
    /// Build the webhook body, stamping the footer with the local time of `at`
    pub fn new(notification: &Notification, at: DateTime<Local>) -> Self {
        Self {
            username: BOT_USERNAME.to_string(),
            avatar_url: BOT_AVATAR_URL.to_string(),
            embeds: vec![Embed {
                title: notification.title.clone(),
                description: notification.body.clone(),
                color: notification.severity.color(),
                footer: Footer {
                    text: format!("Scan Cloud effectué à {}", at.format("%H:%M")),
                },
            }],
        }
    }
}

/// Posts notifications to a Discord webhook
pub struct DiscordNotifier {
    client: reqwest::blocking::Client,
    webhook_url: Option<String>,
}

impl DiscordNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            webhook_url,
        }
    }

    fn post(&self, url: &str, payload: &WebhookPayload) -> crate::Result<()> {
        let response = self.client.post(url).json(payload).send()?;
        if !response.status().is_success() {
            return Err(crate::WatchError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

impl Notifier for DiscordNotifier {
    fn notify(&self, notification: &Notification) -> Delivery {
        let Some(url) = self.webhook_url.as_deref() else {
            log::warn!(
                "No Discord webhook configured, not sending \"{}\"",
                notification.title
            );
            return Delivery::Skipped;
        };

        let payload = WebhookPayload::new(notification, Local::now());
        match self.post(url, &payload) {
            Ok(()) => {
                log::info!("Sent Discord notification: {}", notification.title);
                Delivery::Sent
            }
            Err(e) => {
                log::error!("Failed to send Discord notification: {}", e);
                Delivery::Failed
            }
        }
    }
}

/// Logs notifications instead of sending them
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> Delivery {
        log::info!(
            "[dry run] {:?} notification \"{}\":\n{}",
            notification.severity,
            notification.title,
            notification.body
        );
        Delivery::Skipped
    }
}

#[cfg(test)]
#[path = "discord_tests.rs"]
mod tests;
