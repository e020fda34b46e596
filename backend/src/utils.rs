use chrono::{
    DateTime,
    Datelike,
    Month,
    NaiveDate,
    Utc,
};
use chrono_tz::Europe::London;

use anyhow::{anyhow, Result};

/// Pure
///
/// Formats a date the way it is read out to the user, e.g. "Wednesday 25 December 2024"
#[must_use] pub fn format_spoken_date(date: &NaiveDate) -> String {
    date.format("%A %-d %B %Y").to_string()
}

/// Pure
///
/// # Errors
/// Returns an error if the string cannot be parsed as a date
pub fn parse_date(date_string: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date_string.trim(), "%F")?)
}

/// Impure (reads system clock)
///
/// The current date in the UK, whatever timezone the host runs in
#[must_use] pub fn today_date() -> NaiveDate {
    uk_date(Utc::now())
}

/// Pure
///
/// The UK calendar date at `instant`, following British Summer Time
#[must_use] pub fn uk_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&London).date_naive()
}

/// A calendar month of a specific year
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct YearMonth {
    pub year:  i32,
    pub month: Month,
}

impl YearMonth {
    #[must_use] pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    #[must_use] pub fn of(date: &NaiveDate) -> Self {
        // month() is always within 1..=12
        let month = Month::try_from(u8::try_from(date.month()).unwrap_or(1)).unwrap_or(Month::January);
        Self::new(date.year(), month)
    }

    #[must_use] pub fn contains(&self, date: &NaiveDate) -> bool {
        *self == Self::of(date)
    }

    /// Pure
    ///
    /// e.g. "December 2024"
    #[must_use] pub fn spoken(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }
}

/// Pure
///
/// Accepts the shapes a month slot arrives in: `YYYY-MM`, a full `YYYY-MM-DD` date, or an English
/// month name (or its three letter abbreviation), in which case the year comes from `year`, falling
/// back to `default_year`
///
/// # Errors
/// Returns an error if no valid calendar month can be made from the inputs
pub fn parse_year_month(month_string: &str, year: Option<&str>, default_year: i32) -> Result<YearMonth> {
    let month_string = month_string.trim();

    if let Ok(date) = parse_date(month_string) {
        return Ok(YearMonth::of(&date));
    }

    if let Ok(date) = NaiveDate::parse_from_str(&format!("{month_string}-01"), "%F") {
        return Ok(YearMonth::of(&date));
    }

    let month = month_string.parse::<Month>()
        .map_err(|_| anyhow!("`{month_string}` is not a month"))?;

    let year = match year.map(str::trim).filter(|y| !y.is_empty()) {
        Some(y) => y.parse::<i32>()?,
        None => default_year,
    };

    // Reject years chrono cannot represent
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .ok_or_else(|| anyhow!("{year} is out of range"))?;

    Ok(YearMonth::new(year, month))
}

#[allow(clippy::zero_prefixed_literal)]
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2024-12-25 ").unwrap(), NaiveDate::from_ymd_opt(2024,12,25).unwrap());
    }

    #[test]
    fn test_uk_date_follows_summer_time() {
        // 23:30 UTC is already the next day in London during BST
        let summer = DateTime::parse_from_rfc3339("2024-07-01T23:30:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(uk_date(summer), NaiveDate::from_ymd_opt(2024,07,02).unwrap());

        let winter = DateTime::parse_from_rfc3339("2024-12-01T23:30:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(uk_date(winter), NaiveDate::from_ymd_opt(2024,12,01).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_nonsense() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-W52").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_format_spoken_date() {
        let d = NaiveDate::from_ymd_opt(2024,12,25).unwrap();
        assert_eq!(format_spoken_date(&d), "Wednesday 25 December 2024");
    }

    #[test]
    fn test_parse_year_month_shapes() {
        let december = YearMonth::new(2024, Month::December);

        assert_eq!(parse_year_month("2024-12", None, 1999).unwrap(), december);
        assert_eq!(parse_year_month("2024-12-25", None, 1999).unwrap(), december);
        assert_eq!(parse_year_month("December", Some("2024"), 1999).unwrap(), december);
        assert_eq!(parse_year_month("dec", None, 2024).unwrap(), december);
    }

    #[test]
    fn test_parse_year_month_rejects_invalid() {
        assert!(parse_year_month("2024-13", None, 2024).is_err());
        assert!(parse_year_month("Smarch", None, 2024).is_err());
        assert!(parse_year_month("December", Some("next year"), 2024).is_err());
        assert!(parse_year_month("", None, 2024).is_err());
    }

    #[test]
    fn test_year_month_contains() {
        let december = YearMonth::new(2024, Month::December);

        assert!(december.contains(&NaiveDate::from_ymd_opt(2024,12,01).unwrap()));
        assert!(!december.contains(&NaiveDate::from_ymd_opt(2023,12,25).unwrap()));
        assert_eq!(december.spoken(), "December 2024");
    }
}
