//! Administrative sales report

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Booking, BookingStatus, Event};

/// Booking counts for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSalesRow {
    pub event_id: String,
    pub event_name: String,
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
    pub capacity: u32,
    /// Confirmed bookings over capacity, 0.0 when capacity is unknown
    pub occupancy: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
    pub revenue: f64,
}

/// One row per event with at least one booking, best sellers first.
///
/// Revenue counts confirmed bookings only.
pub fn event_sales_report(events: &[Event], bookings: &[Booking]) -> Vec<EventSalesRow> {
    let mut by_event: HashMap<&str, Vec<&Booking>> = HashMap::new();
    for booking in bookings {
        by_event.entry(booking.event_id.as_str()).or_default().push(booking);
    }

    let mut rows: Vec<EventSalesRow> = events
        .iter()
        .filter_map(|event| {
            let bookings = by_event.get(event.id.as_str())?;
            let count = |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();
            let confirmed = count(BookingStatus::Confirmed);
            let revenue = bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Confirmed)
                .map(|b| b.price)
                .sum();
            let occupancy = if event.capacity == 0 {
                0.0
            } else {
                confirmed as f64 / event.capacity as f64
            };
            Some(EventSalesRow {
                event_id: event.id.clone(),
                event_name: event.name.clone(),
                confirmed,
                pending: count(BookingStatus::PendingPayment),
                cancelled: count(BookingStatus::Cancelled),
                capacity: event.capacity,
                occupancy,
                revenue,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.confirmed
            .cmp(&a.confirmed)
            .then_with(|| a.event_name.cmp(&b.event_name))
    });
    rows
}

pub fn report_totals(rows: &[EventSalesRow]) -> ReportTotals {
    rows.iter().fold(ReportTotals::default(), |mut acc, row| {
        acc.confirmed += row.confirmed;
        acc.pending += row.pending;
        acc.cancelled += row.cancelled;
        acc.revenue += row.revenue;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::super::events::fixtures::event;
    use super::*;

    fn booking(event_id: &str, status: BookingStatus, price: f64) -> Booking {
        Booking {
            id: format!("b-{}-{}", event_id, price),
            event_id: event_id.to_string(),
            user_id: None,
            tier: "General".into(),
            price,
            seat: None,
            status,
        }
    }

    #[test]
    fn counts_per_status() {
        let events = vec![
            event("e-1", "Rock Night", "org", 1),
            event("e-2", "Jazz Evening", "org", 2),
            event("e-3", "Empty Hall", "org", 3),
        ];
        let bookings = vec![
            booking("e-1", BookingStatus::Confirmed, 30.0),
            booking("e-1", BookingStatus::Cancelled, 30.0),
            booking("e-2", BookingStatus::Confirmed, 20.0),
            booking("e-2", BookingStatus::Confirmed, 25.0),
            booking("e-2", BookingStatus::PendingPayment, 20.0),
        ];

        let rows = event_sales_report(&events, &bookings);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event_name, "Jazz Evening");
        assert_eq!(rows[0].confirmed, 2);
        assert_eq!(rows[0].pending, 1);
        assert!((rows[0].revenue - 45.0).abs() < f64::EPSILON);
        assert!((rows[0].occupancy - 0.02).abs() < 1e-9);
        assert_eq!(rows[1].cancelled, 1);

        let totals = report_totals(&rows);
        assert_eq!(totals.confirmed, 3);
        assert!((totals.revenue - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_capacity_has_zero_occupancy() {
        let mut hall = event("e-1", "Open Air", "org", 1);
        hall.capacity = 0;
        let rows = event_sales_report(&[hall], &[booking("e-1", BookingStatus::Confirmed, 5.0)]);
        assert_eq!(rows[0].occupancy, 0.0);
        assert!(event_sales_report(&[], &[]).is_empty());
    }
}
