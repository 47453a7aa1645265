//! Complementary service bookings with derived status

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Service, ServiceBooking, ServiceBookingStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceBookingView {
    pub booking: ServiceBooking,
    pub service: Service,
    pub status: ServiceBookingStatus,
}

/// Join service bookings to the catalog, most recent start first.
pub fn my_service_bookings(
    services: &[Service],
    bookings: &[ServiceBooking],
    now: DateTime<Utc>,
) -> Vec<ServiceBookingView> {
    let by_id: HashMap<&str, &Service> = services.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut rows: Vec<ServiceBookingView> = bookings
        .iter()
        .filter_map(|b| {
            by_id.get(b.service_id.as_str()).map(|service| ServiceBookingView {
                booking: b.clone(),
                service: (*service).clone(),
                status: b.status_at(now),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.booking.starts_at.cmp(&a.booking.starts_at));
    rows
}
