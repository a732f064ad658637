//! Timestamp normalization.

use chrono::DateTime;

/// Seconds since the Unix epoch for an RFC 3339 timestamp or a string of
/// decimal seconds. Returns `None` for anything else.
///
/// ```
/// use courier_transform::unix_seconds;
///
/// assert_eq!(unix_seconds("2021-06-01T12:00:00Z"), Some(1_622_548_800));
/// assert_eq!(unix_seconds("1622548800"), Some(1_622_548_800));
/// assert_eq!(unix_seconds("yesterday"), None);
/// ```
#[must_use]
pub fn unix_seconds(value: &str) -> Option<i64> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp())
        .ok()
        .or_else(|| value.parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1970-01-01T00:00:00Z", Some(0))]
    #[case("2021-06-01T14:00:00+02:00", Some(1_622_548_800))]
    #[case(" 2021-06-01T12:00:00.750Z ", Some(1_622_548_800))]
    #[case("42", Some(42))]
    #[case("", None)]
    #[case("2021-06-01", None)]
    fn parses(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(unix_seconds(input), expected);
    }
}
