//! DispatchDueGreetingsHandler - Sends every greeting whose time has come.
//!
//! Each due greeting is rendered once per opted-in customer and handed to
//! the [`NotificationSender`] on the customer's preferred channel. A
//! customer without a destination for that channel is skipped. The greeting
//! is marked sent with the number of messages actually delivered.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::notification::HolidayGreeting;
use crate::domain::profile::{ContactChannel, Profile};
use crate::ports::{
    GreetingRepository, NotificationError, NotificationSender, OutboundMessage, ProfileRepository,
};

const MAX_CONCURRENT_SENDS: usize = 8;

/// What one dispatch run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub greetings: usize,
    pub delivered: u32,
    pub skipped: u32,
    pub failed: u32,
}

pub struct DispatchDueGreetingsHandler {
    greetings: Arc<dyn GreetingRepository>,
    profiles: Arc<dyn ProfileRepository>,
    sender: Arc<dyn NotificationSender>,
}

impl DispatchDueGreetingsHandler {
    pub fn new(
        greetings: Arc<dyn GreetingRepository>,
        profiles: Arc<dyn ProfileRepository>,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            greetings,
            profiles,
            sender,
        }
    }

    pub async fn handle(&self, now: Timestamp) -> Result<DispatchReport, DomainError> {
        let due = self.greetings.find_due(&now).await?;
        let mut report = DispatchReport::default();
        if due.is_empty() {
            return Ok(report);
        }

        let recipients = self.profiles.find_marketing_recipients().await?;
        for mut greeting in due {
            let run = self.deliver(&greeting, &recipients).await?;

            greeting.mark_sent(run.delivered)?;
            self.greetings.update(&greeting).await?;

            info!(
                greeting_id = %greeting.id(),
                holiday = greeting.holiday_name(),
                delivered = run.delivered,
                skipped = run.skipped,
                failed = run.failed,
                "holiday greeting dispatched"
            );
            report.greetings += 1;
            report.delivered += run.delivered;
            report.skipped += run.skipped;
            report.failed += run.failed;
        }
        Ok(report)
    }

    /// Sends one greeting to every recipient, at most
    /// `MAX_CONCURRENT_SENDS` in flight.
    async fn deliver(&self, greeting: &HolidayGreeting, recipients: &[Profile]) -> Result<DispatchReport, DomainError> {
        let mut run = DispatchReport::default();
        let mut messages = Vec::with_capacity(recipients.len());
        for profile in recipients {
            let channel = profile.preferences().contact_channel;
            match destination_for(profile, channel) {
                Some(destination) => messages.push(OutboundMessage {
                    recipient: profile.user_id().clone(),
                    channel,
                    destination,
                    body: greeting.render_for(profile.full_name())?,
                }),
                None => run.skipped += 1,
            }
        }

        let sender = &self.sender;
        let outcomes: Vec<_> = stream::iter(messages)
            .map(|message| async move {
                let result = sender.send(&message).await;
                (message, result)
            })
            .buffer_unordered(MAX_CONCURRENT_SENDS)
            .collect()
            .await;

        for (message, result) in outcomes {
            match result {
                Ok(()) => run.delivered += 1,
                Err(NotificationError::NoDestination(_)) => run.skipped += 1,
                Err(err) => {
                    warn!(
                        greeting_id = %greeting.id(),
                        recipient = %message.recipient,
                        error = %err,
                        "greeting delivery failed"
                    );
                    run.failed += 1;
                }
            }
        }
        Ok(run)
    }
}

/// WhatsApp and SMS go to the phone number, email to the email address.
fn destination_for(profile: &Profile, channel: ContactChannel) -> Option<String> {
    match channel {
        ContactChannel::Whatsapp | ContactChannel::Sms => {
            profile.phone().map(|phone| phone.as_str().to_string())
        }
        ContactChannel::Email => {
            let email = profile.email().trim();
            (!email.is_empty()).then(|| email.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryGreetingRepository, InMemoryProfileRepository};
    use crate::adapters::notification::TracingNotificationSender;
    use crate::application::handlers::test_support::*;
    use crate::domain::notification::GreetingStatus;
    use crate::domain::profile::{Preferences, ProfileDetails};
    use chrono::Duration;

    fn profile(id: &str, name: &str, phone: Option<&str>, channel: ContactChannel, opt_in: bool) -> Profile {
        Profile::new(
            user(id),
            ProfileDetails {
                full_name: name.to_string(),
                phone: phone.map(str::to_string),
                email: format!("{}@example.sg", id),
                preferences: Preferences {
                    contact_channel: channel,
                    marketing_opt_in: opt_in,
                },
            },
        )
        .unwrap()
    }

    fn greeting_sent_an_hour_ago() -> HolidayGreeting {
        let send_at = Timestamp::now().plus_minutes(-60);
        let holiday = send_at.to_sg_local().date() + Duration::days(1);
        HolidayGreeting::new("Hari Raya Puasa", holiday, send_at, "Selamat {{holiday}}, {{first_name}}!").unwrap()
    }

    struct Fixture {
        handler: DispatchDueGreetingsHandler,
        greetings: Arc<InMemoryGreetingRepository>,
        sender: TracingNotificationSender,
    }

    async fn fixture(profiles: Vec<Profile>) -> Fixture {
        let greetings = Arc::new(InMemoryGreetingRepository::new());
        let profile_repo = Arc::new(InMemoryProfileRepository::new());
        for p in &profiles {
            profile_repo.upsert(p).await.unwrap();
        }
        let sender = TracingNotificationSender::new();
        Fixture {
            handler: DispatchDueGreetingsHandler::new(greetings.clone(), profile_repo, Arc::new(sender.clone())),
            greetings,
            sender,
        }
    }

    #[tokio::test]
    async fn sends_rendered_greeting_to_opted_in_customers() {
        let f = fixture(vec![
            profile("cust-1", "Siti Nurhaliza", Some("91234567"), ContactChannel::Whatsapp, true),
            profile("cust-2", "Tan Ah Kow", Some("98765432"), ContactChannel::Sms, false),
        ])
        .await;
        let greeting = greeting_sent_an_hour_ago();
        f.greetings.save(&greeting).await.unwrap();

        let report = f.handler.handle(Timestamp::now()).await.unwrap();

        assert_eq!(report.greetings, 1);
        assert_eq!(report.delivered, 1);
        let sent = f.sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].destination, "+6591234567");
        assert_eq!(sent[0].body, "Selamat Hari Raya Puasa, Siti!");

        let stored = f.greetings.find_by_id(greeting.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), GreetingStatus::Sent);
        assert_eq!(stored.sent_count(), 1);
    }

    #[tokio::test]
    async fn customer_without_phone_is_skipped() {
        let f = fixture(vec![profile("cust-1", "Raj Kumar", None, ContactChannel::Whatsapp, true)]).await;
        f.greetings.save(&greeting_sent_an_hour_ago()).await.unwrap();

        let report = f.handler.handle(Timestamp::now()).await.unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.delivered, 0);
        assert!(f.sender.sent().await.is_empty());
    }

    #[tokio::test]
    async fn email_channel_uses_email_address() {
        let f = fixture(vec![profile("cust-1", "Mei Ling", None, ContactChannel::Email, true)]).await;
        f.greetings.save(&greeting_sent_an_hour_ago()).await.unwrap();

        f.handler.handle(Timestamp::now()).await.unwrap();

        assert_eq!(f.sender.sent().await[0].destination, "cust-1@example.sg");
    }

    #[tokio::test]
    async fn every_recipient_is_reached_beyond_the_concurrency_limit() {
        let profiles = (0..MAX_CONCURRENT_SENDS * 3)
            .map(|i| profile(&format!("cust-{}", i), "Lim Wei", Some("91234567"), ContactChannel::Sms, true))
            .collect();
        let f = fixture(profiles).await;
        f.greetings.save(&greeting_sent_an_hour_ago()).await.unwrap();

        let report = f.handler.handle(Timestamp::now()).await.unwrap();

        assert_eq!(report.delivered as usize, MAX_CONCURRENT_SENDS * 3);
        assert_eq!(f.sender.sent().await.len(), MAX_CONCURRENT_SENDS * 3);
    }

    #[tokio::test]
    async fn greeting_is_sent_only_once() {
        let f = fixture(vec![profile("cust-1", "Siti", Some("91234567"), ContactChannel::Sms, true)]).await;
        f.greetings.save(&greeting_sent_an_hour_ago()).await.unwrap();

        f.handler.handle(Timestamp::now()).await.unwrap();
        let second = f.handler.handle(Timestamp::now()).await.unwrap();

        assert_eq!(second, DispatchReport::default());
        assert_eq!(f.sender.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn future_greeting_is_not_due() {
        let f = fixture(vec![profile("cust-1", "Siti", Some("91234567"), ContactChannel::Sms, true)]).await;
        let holiday = upcoming(chrono::Weekday::Fri);
        let later = HolidayGreeting::new("Good Friday", holiday, Timestamp::from_sg_local(holiday, hm(8, 0)), "Hi {{name}}")
            .unwrap();
        f.greetings.save(&later).await.unwrap();

        let report = f.handler.handle(Timestamp::now()).await.unwrap();
        assert_eq!(report.greetings, 0);
    }
}
