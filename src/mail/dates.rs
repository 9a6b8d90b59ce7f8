use chrono::{DateTime, Local};

use super::message::Message;

/// Append an `X-Date` header: the message's `Date` rendered in the local
/// timezone, RFC 2822 style. Messages without a parseable `Date` are left
/// alone.
pub fn add_local_date(message: &mut Message) {
    let Some(date) = message.get("Date") else {
        return;
    };
    let parsed = match DateTime::parse_from_rfc2822(date.trim()) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::debug!("skipping unparseable Date header {date:?}: {err}");
            return;
        }
    };
    let local = parsed.with_timezone(&Local);
    message.add_header("X-Date", &local.to_rfc2822());
}
