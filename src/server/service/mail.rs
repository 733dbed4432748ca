//! Outbound mail.
//!
//! Mail is delivered by POSTing JSON to a configured webhook (a transactional mail relay).
//! Sending never blocks or fails the request that triggered it: [`MailDispatcher::dispatch`]
//! runs delivery on a background task after the triggering write has committed.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::server::{error::AppError, model::reservation::Reservation};

const DELIVERY_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutboundMail {
    pub fn password_reset(to: String, link: &Url, ttl_minutes: i64) -> Self {
        Self {
            to,
            subject: "Reset your password".to_string(),
            body: format!(
                "Someone asked to reset the password for this account.\n\n\
                 Follow this link within {} minutes to choose a new one:\n{}\n\n\
                 If this wasn't you, you can ignore this email.",
                ttl_minutes, link
            ),
        }
    }

    pub fn email_verification(to: String, link: &Url) -> Self {
        Self {
            to,
            subject: "Confirm your email address".to_string(),
            body: format!("Confirm your email address by following this link:\n{}", link),
        }
    }

    pub fn reservation_booked(to: String, reservation: &Reservation) -> Self {
        Self {
            to,
            subject: format!("Reservation #{} received", reservation.id),
            body: format!(
                "Your reservation for court {} from {} to {} is {}.\nTotal: {}",
                reservation.court_id,
                reservation.starts_at.to_rfc3339(),
                reservation.ends_at.to_rfc3339(),
                reservation.status.as_str().to_lowercase(),
                reservation.amount_total
            ),
        }
    }

    pub fn reservation_approved(to: String, reservation: &Reservation) -> Self {
        Self {
            to,
            subject: format!("Reservation #{} confirmed", reservation.id),
            body: format!(
                "The venue confirmed your reservation for court {} from {} to {}.",
                reservation.court_id,
                reservation.starts_at.to_rfc3339(),
                reservation.ends_at.to_rfc3339()
            ),
        }
    }

    pub fn reservation_cancelled(to: String, reservation: &Reservation) -> Self {
        Self {
            to,
            subject: format!("Reservation #{} cancelled", reservation.id),
            body: format!(
                "Your reservation for court {} from {} to {} was cancelled.",
                reservation.court_id,
                reservation.starts_at.to_rfc3339(),
                reservation.ends_at.to_rfc3339()
            ),
        }
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[derive(Clone)]
pub struct MailDispatcher {
    http_client: reqwest::Client,
    webhook_url: Option<Url>,
    from: String,
}

impl MailDispatcher {
    /// Creates a dispatcher. Without a webhook URL mail is logged and dropped.
    pub fn new(http_client: reqwest::Client, webhook_url: Option<Url>, from: String) -> Self {
        Self {
            http_client,
            webhook_url,
            from,
        }
    }

    /// Delivers one mail.
    pub async fn send(&self, mail: &OutboundMail) -> Result<(), AppError> {
        let Some(webhook_url) = &self.webhook_url else {
            tracing::info!(
                "Mail delivery not configured, dropping '{}' for {}",
                mail.subject,
                mail.to
            );
            return Ok(());
        };

        self.http_client
            .post(webhook_url.clone())
            .json(&WebhookPayload {
                from: &self.from,
                to: &mail.to,
                subject: &mail.subject,
                body: &mail.body,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Delivers mail on a background task, retrying with backoff.
    ///
    /// Failures are logged and never reach the caller.
    pub fn dispatch(&self, mail: OutboundMail) {
        let dispatcher = self.clone();

        tokio::spawn(async move {
            for attempt in 1..=DELIVERY_ATTEMPTS {
                match dispatcher.send(&mail).await {
                    Ok(()) => return,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to deliver '{}' to {} (attempt {}/{}): {}",
                            mail.subject,
                            mail.to,
                            attempt,
                            DELIVERY_ATTEMPTS,
                            e
                        );

                        if attempt < DELIVERY_ATTEMPTS {
                            tokio::time::sleep(Duration::from_secs(2u64.pow(attempt))).await;
                        }
                    }
                }
            }

            tracing::error!("Giving up on '{}' to {}", mail.subject, mail.to);
        });
    }
}
