//! Wire dates.
//!
//! Dates travel as strings. Birth dates are full calendar dates
//! (`YYYY-MM-DD`). Debut and disband dates may be partial: an unknown month
//! or day is written as `00`, so `2003-00-00` means "some time in 2003".

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::CoreError;

static FULL_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\s*-\s*(\d{2})\s*-\s*(\d{2})").expect("valid regex"));

static PARTIAL_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})(?:\s*-\s*(\d{2})(?:\s*-\s*(\d{2}))?)?").expect("valid regex")
});

static WIRE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"));

/// Pull a wire date out of free text such as `"1986-03-22 (age 37)"`.
///
/// With `full` the text must contain year, month and day. Otherwise missing
/// parts are filled with `00`: `"2003"` becomes `"2003-00-00"`.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` when no date of the required precision
/// is found.
pub fn extract_date(raw: &str, full: bool) -> Result<String, CoreError> {
    let re = if full { &FULL_DATE_RE } else { &PARTIAL_DATE_RE };
    let caps = re.captures(raw).ok_or_else(|| CoreError::InvalidDate {
        value: raw.to_string(),
        reason: if full {
            "expected YYYY-MM-DD".to_string()
        } else {
            "expected YYYY[-MM[-DD]]".to_string()
        },
    })?;
    let year = &caps[1];
    let month = caps.get(2).map_or("00", |m| m.as_str());
    let day = caps.get(3).map_or("00", |m| m.as_str());
    Ok(format!("{year}-{month}-{day}"))
}

/// Parse a strict full date.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if `s` is not exactly `YYYY-MM-DD` or does
/// not name a real calendar day.
pub fn parse_full_date(s: &str) -> Result<NaiveDate, CoreError> {
    let date: PartialDate = s.parse()?;
    date.to_naive_date().ok_or_else(|| CoreError::InvalidDate {
        value: s.to_string(),
        reason: "month and day must be known".to_string(),
    })
}

/// A date whose month and day may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartialDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    /// Calendar date, when month and day are both known.
    #[must_use]
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month?, self.day?)
    }
}

impl FromStr for PartialDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidDate {
            value: s.to_string(),
            reason: reason.to_string(),
        };
        let caps = WIRE_DATE_RE
            .captures(s)
            .ok_or_else(|| invalid("expected YYYY-MM-DD"))?;
        let year: i32 = caps[1].parse().map_err(|_| invalid("bad year"))?;
        let month: u32 = caps[2].parse().map_err(|_| invalid("bad month"))?;
        let day: u32 = caps[3].parse().map_err(|_| invalid("bad day"))?;

        if month > 12 {
            return Err(invalid("month out of range"));
        }
        if month == 0 && day != 0 {
            return Err(invalid("day given without month"));
        }
        let date = Self {
            year,
            month: (month != 0).then_some(month),
            day: (day != 0).then_some(day),
        };
        if date.month.is_some() && date.day.is_some() && date.to_naive_date().is_none() {
            return Err(invalid("no such calendar day"));
        }
        Ok(date)
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year,
            self.month.unwrap_or(0),
            self.day.unwrap_or(0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn extract_full_date() {
        assert_eq!(extract_date("2003-01-09", true).unwrap(), "2003-01-09");
        assert_eq!(
            extract_date("1986-03-22 (age 37) ▲ ▼", true).unwrap(),
            "1986-03-22"
        );
    }

    #[rstest]
    #[case("2023")]
    #[case("2023-01")]
    #[case("unknown")]
    fn extract_full_date_rejects_partial(#[case] raw: &str) {
        assert!(matches!(
            extract_date(raw, true),
            Err(CoreError::InvalidDate { .. })
        ));
    }

    #[rstest]
    #[case("2003", "2003-00-00")]
    #[case("2003-01", "2003-01-00")]
    #[case("2008-04-15 (15 years and 6 months ago)", "2008-04-15")]
    fn extract_partial_date(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(extract_date(raw, false).unwrap(), expected);
    }

    #[test]
    fn partial_date_roundtrips_through_display() {
        for s in ["2003-00-00", "2003-01-00", "2003-01-09"] {
            let date: PartialDate = s.parse().unwrap();
            assert_eq!(date.to_string(), s);
        }
    }

    #[rstest]
    #[case("2003-13-01")]
    #[case("2003-02-30")]
    #[case("2003-00-05")]
    #[case("03-01-01")]
    #[case("2003-1-1")]
    #[case("2003-01-45")]
    fn partial_date_rejects(#[case] s: &str) {
        assert!(s.parse::<PartialDate>().is_err(), "{s} should be rejected");
    }

    #[test]
    fn full_date_requires_known_day() {
        assert!(parse_full_date("2000-01-01").is_ok());
        assert!(parse_full_date("2000-01-00").is_err());
        assert!(parse_full_date("2000-00-00").is_err());
    }
}
