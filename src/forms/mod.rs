// src/forms/mod.rs

//! Editor state for the two entity forms. A form owns raw input values,
//! validates them, and assembles the draft handed to the repositories.

pub mod order;
pub mod product;

pub use order::{LineItemRow, OrderForm};
pub use product::ProductForm;

/// Parse a money input such as "25", "25.5" or "25.50" into centavos.
/// Rejects negatives, non-numeric text, and more than two fraction digits.
pub fn parse_price_cents(input: &str) -> Option<i64> {
  let s = input.trim();
  if s.is_empty() {
    return None;
  }
  let (whole, frac) = match s.split_once('.') {
    Some((w, f)) => (w, f),
    None => (s, ""),
  };
  if whole.is_empty() && frac.is_empty() {
    return None;
  }
  if whole.len() > 12 || !whole.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  let whole_val: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
  let frac_val: i64 = match frac.len() {
    0 => 0,
    1 => frac.parse::<i64>().ok()? * 10,
    _ => frac.parse::<i64>().ok()?,
  };
  Some(whole_val * 100 + frac_val)
}

#[cfg(test)]
mod tests {
  use super::parse_price_cents;

  #[test]
  fn parses_common_amounts() {
    assert_eq!(parse_price_cents("25"), Some(2500));
    assert_eq!(parse_price_cents("25.5"), Some(2550));
    assert_eq!(parse_price_cents("25.50"), Some(2550));
    assert_eq!(parse_price_cents(" 180.00 "), Some(18000));
    assert_eq!(parse_price_cents(".50"), Some(50));
    assert_eq!(parse_price_cents("0"), Some(0));
  }

  #[test]
  fn rejects_invalid_amounts() {
    assert_eq!(parse_price_cents(""), None);
    assert_eq!(parse_price_cents("."), None);
    assert_eq!(parse_price_cents("-5"), None);
    assert_eq!(parse_price_cents("12.345"), None);
    assert_eq!(parse_price_cents("abc"), None);
    assert_eq!(parse_price_cents("12,50"), None);
  }
}
