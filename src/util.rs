//! Small utility helpers used across modules.

use serde_json::Value;

/// Lenient integer parsing for request fields that may arrive as numbers or strings.
/// Strings are read up to the first non-digit ("12abc" -> 12); numbers are truncated (10.7 -> 10).
/// Returns None when no leading integer can be found.
pub fn parse_leading_int(v: &Value) -> Option<i64> {
  match v {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
    Value::String(s) => {
      let s = s.trim_start();
      let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => (-1, r),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
      };
      let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
      if digits.is_empty() {
        return None;
      }
      // Saturate like the JSON number path does.
      Some(digits.parse::<i64>().map(|n| sign * n).unwrap_or(if sign < 0 { i64::MIN } else { i64::MAX }))
    }
    _ => None,
  }
}

/// JS-style truthiness for "was this field supplied at all" checks.
pub fn is_blank(v: Option<&Value>) -> bool {
  match v {
    None | Some(Value::Null) => true,
    Some(Value::Bool(b)) => !b,
    Some(Value::String(s)) => s.is_empty(),
    Some(Value::Number(n)) => n.as_f64() == Some(0.0),
    _ => false,
  }
}

/// Log-safe truncation for user-supplied strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}
