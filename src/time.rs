//! Time related utils.

use crate::{Error, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};

/// The UTC instant every derived value of one signing call is taken from.
pub type DateTime = chrono::DateTime<Utc>;

/// Capture the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time as the SigV4 date stamp: `20130524`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format a time as the SigV4 amz-date: `20130524T000000Z`.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse an amz-date formatted string back into a time.
///
/// Mostly useful for pinning a fixed signing time in tests.
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ")
        .map_err(|e| Error::request_invalid(format!("invalid amz-date: {s}")).with_source(e))?;
    Ok(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_formats_share_the_instant() {
        let t = parse_iso8601("20130524T000000Z").unwrap();
        let amz_date = format_iso8601(t);
        let date_stamp = format_date(t);

        assert_eq!(amz_date, "20130524T000000Z");
        assert_eq!(date_stamp, "20130524");
        assert_eq!(date_stamp, amz_date[..8]);
    }

    #[test]
    fn test_parse_iso8601_rejects_garbage() {
        assert!(parse_iso8601("2013-05-24 00:00:00").is_err());
    }
}
