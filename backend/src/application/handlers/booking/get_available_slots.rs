//! GetAvailableSlotsHandler - Query handler for bookable slots on a day.
//!
//! Slots are ranked for the customer's region so that visits cluster by
//! area. Repository reads go through `with_retry`.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::{find_active_service, occupied_on};
use crate::application::retry::{with_retry, RetryPolicy};
use crate::domain::foundation::{DomainError, ServiceId, Timestamp};
use crate::domain::region::Region;
use crate::domain::scheduling::{RankedSlot, SlotGenerator, SlotOptimizer};
use crate::ports::{BookingRepository, RegionClassifier, ServiceCatalog};

#[derive(Debug, Clone)]
pub struct GetAvailableSlotsQuery {
    pub date: NaiveDate,
    pub service_id: ServiceId,
    /// Address or postal code used to pick the region.
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableSlots {
    pub date: NaiveDate,
    pub service_id: ServiceId,
    pub region: Region,
    pub remaining_capacity: usize,
    pub slots: Vec<RankedSlot>,
}

pub struct GetAvailableSlotsHandler {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceCatalog>,
    classifier: Arc<dyn RegionClassifier>,
    generator: SlotGenerator,
    optimizer: SlotOptimizer,
    retry: RetryPolicy,
}

impl GetAvailableSlotsHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceCatalog>,
        classifier: Arc<dyn RegionClassifier>,
        generator: SlotGenerator,
    ) -> Self {
        Self {
            bookings,
            services,
            classifier,
            generator,
            optimizer: SlotOptimizer::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn handle(&self, query: GetAvailableSlotsQuery) -> Result<AvailableSlots, DomainError> {
        let now = Timestamp::now().to_sg_local();
        if query.date < now.date() {
            return Err(DomainError::validation("date", "Date is in the past"));
        }

        let service = with_retry(&self.retry, || {
            find_active_service(self.services.as_ref(), &query.service_id)
        })
        .await?;
        let occupied = with_retry(&self.retry, || {
            occupied_on(self.bookings.as_ref(), query.date, None)
        })
        .await?;

        let region = query
            .location
            .as_deref()
            .map(|location| self.classifier.classify(location))
            .unwrap_or_default();
        let category = service.category();

        let available = self.generator.available(query.date, category, &occupied, now);
        let slots = self.optimizer.rank(available, region, &occupied);

        debug!(
            date = %query.date,
            service_id = %query.service_id,
            region = %region,
            offered = slots.len(),
            "computed available slots"
        );

        Ok(AvailableSlots {
            date: query.date,
            service_id: query.service_id,
            region,
            remaining_capacity: self.generator.capacity().remaining(&occupied, category.is_amc()),
            slots,
        })
    }
}
