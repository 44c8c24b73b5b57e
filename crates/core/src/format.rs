//! Display helpers for dates, times and prices.

use chrono::{NaiveDate, NaiveDateTime};

/// "Sunday, June 1, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "9:05 AM"
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// "₱1,500" or "₱1,234.5"; whole amounts drop the decimals.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}₱{grouped}"),
        f if f % 10 == 0 => format!("{sign}₱{grouped}.{}", f / 10),
        f => format!("{sign}₱{grouped}.{f:02}"),
    }
}
