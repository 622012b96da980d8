// src/views/mod.rs

//! View-models returned to the screens, plus the peso/date formatting both
//! the table and card presentations share.

pub mod orders;
pub mod products;

use chrono::{DateTime, NaiveDate, Utc};

/// Philippine-peso rendering of a centavo amount: `₱1,234.50`.
pub fn format_peso(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let cents = cents.abs();
  let whole = cents / 100;
  let frac = cents % 100;

  let digits = whole.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    let remaining = digits.len() - i;
    if i > 0 && remaining % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  format!("{}₱{}.{:02}", sign, grouped, frac)
}

/// Creation-timestamp rendering used by the lists: `Aug 20, 2025, 02:30 PM`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
  ts.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Short delivery-date rendering for list rows; `Not set` when absent.
pub fn format_delivery_date(date: Option<NaiveDate>) -> String {
  match date {
    Some(d) => d.format("%Y-%m-%d").to_string(),
    None => "Not set".to_string(),
  }
}

/// Long delivery-date rendering for the details view:
/// `Wednesday, August 20, 2025`.
pub fn format_delivery_date_long(date: Option<NaiveDate>) -> String {
  match date {
    Some(d) => d.format("%A, %B %-d, %Y").to_string(),
    None => "Not specified".to_string(),
  }
}
