//! GreetingDispatcher - background task that sends due holiday greetings.
//!
//! Polls on a fixed interval and stops when the shutdown channel flips to
//! `true`. A failed run is logged and retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::application::handlers::notification::{DispatchDueGreetingsHandler, DispatchReport};
use crate::domain::foundation::{DomainError, Timestamp};

pub struct GreetingDispatcher {
    handler: Arc<DispatchDueGreetingsHandler>,
    poll_interval: Duration,
}

impl GreetingDispatcher {
    pub fn new(handler: Arc<DispatchDueGreetingsHandler>, poll_interval: Duration) -> Self {
        Self {
            handler,
            poll_interval,
        }
    }

    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(poll_secs = self.poll_interval.as_secs(), "greeting dispatcher started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("greeting dispatcher stopped");
                        return;
                    }
                }
                _ = interval.tick() => {
                    if let Err(err) = self.poll_once().await {
                        error!(error = %err, "greeting dispatch failed");
                    }
                }
            }
        }
    }

    pub async fn poll_once(&self) -> Result<DispatchReport, DomainError> {
        let report = self.handler.handle(Timestamp::now()).await?;
        if report.greetings > 0 {
            debug!(?report, "greeting dispatch run finished");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryGreetingRepository, InMemoryProfileRepository};
    use crate::adapters::notification::TracingNotificationSender;
    use crate::domain::notification::{GreetingStatus, HolidayGreeting};
    use crate::ports::GreetingRepository;

    #[tokio::test]
    async fn run_sends_due_greeting_then_stops_on_shutdown() {
        let greetings = Arc::new(InMemoryGreetingRepository::new());
        let send_at = Timestamp::now().plus_minutes(-5);
        let greeting = HolidayGreeting::new(
            "National Day",
            send_at.to_sg_local().date(),
            send_at,
            "Happy {{holiday}}!",
        )
        .unwrap();
        greetings.save(&greeting).await.unwrap();

        let handler = DispatchDueGreetingsHandler::new(
            greetings.clone(),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(TracingNotificationSender::new()),
        );
        let dispatcher = GreetingDispatcher::new(Arc::new(handler), Duration::from_millis(10));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move { dispatcher.run(shutdown_rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();
        task.await.unwrap();

        let stored = greetings.find_by_id(greeting.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), GreetingStatus::Sent);
        assert_eq!(stored.sent_count(), 0);
    }
}
