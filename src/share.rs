//! Shareable result links and card naming.
//!
//! A chart is addressed by `?date=YYYY-MM-DD&name=...`. Names are
//! percent-encoded with the same unreserved set as JavaScript's
//! `encodeURIComponent`, so links built here and in a browser agree.

use chrono::NaiveDate;

use crate::date_utils::{format_long_date, parse_date};
use crate::error::{ChartError, Result};

/// A birth date and optional display name, as carried in a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub date: NaiveDate,
    pub name: Option<String>,
}

impl ShareRequest {
    pub fn new(date: NaiveDate, name: Option<String>) -> Self {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Self { date, name }
    }

    /// Query string without the leading `?`.
    pub fn to_query(&self) -> String {
        let mut query = format!("date={}", self.date.format("%Y-%m-%d"));
        if let Some(name) = &self.name {
            query.push_str("&name=");
            query.push_str(&encode_component(name));
        }
        query
    }

    /// Full result link under `origin`, e.g. `https://host/result?date=...`.
    pub fn result_url(&self, origin: &str) -> String {
        format!("{}/result?{}", origin.trim_end_matches('/'), self.to_query())
    }

    /// Page heading: "Ana's Lunar Birth Chart" or "Your Lunar Birth Chart".
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => format!("{name}'s Lunar Birth Chart"),
            None => "Your Lunar Birth Chart".to_string(),
        }
    }

    pub fn display_date(&self) -> String {
        format_long_date(self.date)
    }
}

/// Parse a query string (with or without the leading `?`).
pub fn parse_query(query: &str) -> Result<ShareRequest> {
    let mut date = None;
    let mut name = None;

    for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "date" => date = Some(parse_date(&decode_component(value))?),
            "name" => name = Some(decode_component(value)),
            _ => {}
        }
    }

    let date = date.ok_or(ChartError::MissingQueryParam("date"))?;
    Ok(ShareRequest::new(date, name))
}

/// File name for a downloaded chart card.
pub fn card_file_name(date: NaiveDate) -> String {
    format!("lunar-aura-{}.png", date.format("%Y-%m-%d"))
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte)
}

/// Percent-encode everything outside the `encodeURIComponent` unreserved set.
pub fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Reverse of [`encode_component`]; also treats `+` as a space.
/// Malformed escapes are kept verbatim.
pub fn decode_component(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => match bytes.get(i + 1..i + 3).and_then(|hex| hex_pair(hex[0], hex[1])) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let digit = |b: u8| (b as char).to_digit(16);
    Some((digit(high)? * 16 + digit(low)?) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_result_url() {
        let request = ShareRequest::new(date(1990, 3, 21), Some("Ana María".into()));
        assert_eq!(request.to_query(), "date=1990-03-21&name=Ana%20Mar%C3%ADa");
        assert_eq!(
            request.result_url("https://example.com/"),
            "https://example.com/result?date=1990-03-21&name=Ana%20Mar%C3%ADa"
        );
        let anonymous = ShareRequest::new(date(1990, 3, 21), None);
        assert_eq!(anonymous.to_query(), "date=1990-03-21");
    }

    #[test]
    fn names_round_trip() {
        for name in ["O'Brien", "Zoë & Sam", "李雷", "a+b=c?"] {
            let request = ShareRequest::new(date(2001, 9, 9), Some(name.into()));
            let parsed = parse_query(&format!("?{}", request.to_query())).unwrap();
            assert_eq!(parsed, request, "{name}");
        }
    }

    #[test]
    fn query_requires_a_valid_date() {
        assert_eq!(
            parse_query("name=Ana"),
            Err(ChartError::MissingQueryParam("date"))
        );
        assert!(matches!(parse_query("date=1990-13-01"), Err(ChartError::InvalidDate(_))));
        let parsed = parse_query("date=1990-03-21&utm_source=x&name=").unwrap();
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn titles_and_card_names() {
        let named = ShareRequest::new(date(1990, 3, 21), Some("Ana".into()));
        assert_eq!(named.title(), "Ana's Lunar Birth Chart");
        assert_eq!(named.display_date(), "March 21, 1990");
        assert_eq!(ShareRequest::new(date(1990, 3, 21), None).title(), "Your Lunar Birth Chart");
        assert_eq!(card_file_name(date(1990, 3, 21)), "lunar-aura-1990-03-21.png");
    }

    #[test]
    fn malformed_escapes_are_kept() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("a%2"), "a%2");
    }
}
