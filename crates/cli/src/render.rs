//! Plain-text rendering of records and notifications

use chrono::{DateTime, Utc};
use vivopass_client::{Notification, NotificationLevel};
use vivopass_core::model::{Event, Forum, PaymentMethod, ServiceBookingStatus, User, Venue};
use vivopass_core::views::{BookingView, CommentThread, EventSalesRow, ReportTotals, ServiceBookingView};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn notification(n: &Notification) -> String {
    let tag = match n.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
        NotificationLevel::Error => "error",
    };
    format!("[{}] {}", tag, n.message)
}

pub fn user(user: &User, expires_at: Option<DateTime<Utc>>) -> String {
    let mut lines = vec![
        format!("{} <{}>", user.full_name(), user.email),
        format!("id:    {}", user.id),
        format!("role:  {}", user.role_label()),
    ];
    if let Some(phone) = &user.phone {
        lines.push(format!("phone: {}", phone));
    }
    if let Some(at) = expires_at {
        lines.push(format!("token expires {}", at.format(TIME_FORMAT)));
    }
    lines.join("\n")
}

pub fn event(event: &Event) -> String {
    format!(
        "{:>6}  {}  {} ({} seats)",
        event.id,
        event.starts_at.format(TIME_FORMAT),
        event.name,
        event.capacity
    )
}

pub fn venue(venue: &Venue) -> String {
    format!(
        "{:>6}  {}, {} {} ({} seats)",
        venue.id, venue.name, venue.address, venue.city, venue.capacity
    )
}

pub fn forum(forum: &Forum) -> String {
    format!(
        "{:>6}  {}  {}  [event {}]",
        forum.id,
        forum.created_at.format(TIME_FORMAT),
        forum.title,
        forum.event_id
    )
}

pub fn thread(thread: &CommentThread) -> Vec<String> {
    let mut lines = Vec::with_capacity(thread.replies.len() + 1);
    let edited = |edited: bool| if edited { " (edited)" } else { "" };
    lines.push(format!(
        "#{} by {}{}: {}",
        thread.comment.id,
        thread.comment.author_id,
        edited(thread.comment.is_edited()),
        thread.comment.content
    ));
    for reply in &thread.replies {
        lines.push(format!(
            "    #{} by {}{}: {}",
            reply.id,
            reply.author_id,
            edited(reply.is_edited()),
            reply.content
        ));
    }
    lines
}

pub fn booking(view: &BookingView) -> String {
    format!(
        "{:>6}  {}  {}  {} {}  {:.2}  {}",
        view.booking.id,
        view.event.starts_at.format(TIME_FORMAT),
        view.event.name,
        view.booking.tier,
        view.booking.seat.as_deref().unwrap_or("-"),
        view.booking.price,
        view.booking.status.label()
    )
}

pub fn service(view: &ServiceBookingView) -> String {
    let status = match view.status {
        ServiceBookingStatus::Upcoming => "upcoming",
        ServiceBookingStatus::Active => "active",
        ServiceBookingStatus::Finished => "finished",
    };
    format!(
        "{:>6}  {}  {} -> {}  {}",
        view.booking.id,
        view.service.name,
        view.booking.starts_at.format(TIME_FORMAT),
        view.booking.ends_at.format(TIME_FORMAT),
        status
    )
}

pub fn payment_method(method: &PaymentMethod) -> String {
    format!(
        "{:>6}  {} **** {}  {}  exp {}",
        method.id,
        method.kind,
        method.last_four.as_deref().unwrap_or("????"),
        method.holder,
        method.expiry.as_deref().unwrap_or("--/--")
    )
}

pub fn report(rows: &[EventSalesRow], totals: &ReportTotals) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<30} {:>9} {:>7} {:>9} {:>9} {:>10}",
        "event", "confirmed", "pending", "cancelled", "occupancy", "revenue"
    )];
    for row in rows {
        lines.push(format!(
            "{:<30} {:>9} {:>7} {:>9} {:>8.1}% {:>10.2}",
            truncate(&row.event_name, 30),
            row.confirmed,
            row.pending,
            row.cancelled,
            row.occupancy * 100.0,
            row.revenue
        ));
    }
    lines.push(format!(
        "{:<30} {:>9} {:>7} {:>9} {:>9} {:>10.2}",
        "total", totals.confirmed, totals.pending, totals.cancelled, "", totals.revenue
    ));
    lines
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
