//! Derived view-models
//!
//! Pure projections over collections that were already fetched. Nothing here
//! touches the network: every function takes the collections, the current
//! user and a query, and returns fresh rows. Empty inputs give empty output.

mod bookings;
mod events;
mod forums;
mod reports;
mod search;
mod services;

pub use bookings::{my_bookings, BookingView};
pub use events::{browse_events, my_events, owned_event_ids};
pub use forums::{comment_threads, forums_for_event, my_forums, CommentThread};
pub use reports::{event_sales_report, report_totals, EventSalesRow, ReportTotals};
pub use search::{filter_by_text, matches_query};
pub use services::{my_service_bookings, ServiceBookingView};
