use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Calendar day as typed by the user, before it is combined with a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl ExtractedDate {
    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Local wall-clock time, never adjusted for timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTime {
    pub hour: u32,
    pub minute: u32,
}

impl ExtractedTime {
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

static NUMERIC_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b").expect("Invalid regex")
});

static TEXTUAL_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s+de\s+(\p{L}+)(?:\s+de\s+(\d{4}))?").expect("Invalid regex")
});

static DAY_AFTER_TOMORROW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdepois\s+de\s+amanh[ãa]\b").expect("Invalid regex")
});
static TOMORROW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bamanh[ãa]\b").expect("Invalid regex"));
static TODAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhoje\b").expect("Invalid regex"));

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:às|as|das|hora|horário|horario)\s*:?\s*(\d{1,2})(?:[:h](\d{2}))?")
        .expect("Invalid regex")
});

static DAY_OF_MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdia\s+(\d{1,2})(/)?").expect("Invalid regex"));

pub fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

/// Finds a calendar date in `text`.
///
/// `dd/mm[/yyyy]` wins over `dd de <mês>[ de yyyy]`, which wins over the
/// relative words (hoje, amanhã, depois de amanhã). A missing year is the
/// year of `today`. Dates that do not exist on the calendar are rejected.
pub fn parse_date(text: &str, today: NaiveDate) -> Option<ExtractedDate> {
    if let Some(caps) = NUMERIC_DATE_PATTERN.captures(text) {
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year = match caps.get(3) {
            Some(y) => expand_year(y.as_str())?,
            None => today.year(),
        };
        return validated(day, month, year);
    }

    for caps in TEXTUAL_DATE_PATTERN.captures_iter(text) {
        let Some(month) = caps.get(2).and_then(|m| month_from_name(m.as_str())) else {
            continue;
        };
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let year = match caps.get(3) {
            Some(y) => y.as_str().parse().ok()?,
            None => today.year(),
        };
        return validated(day, month, year);
    }

    parse_relative_date(text, today)
}

fn parse_relative_date(text: &str, today: NaiveDate) -> Option<ExtractedDate> {
    let offset = if DAY_AFTER_TOMORROW_PATTERN.is_match(text) {
        2
    } else if TOMORROW_PATTERN.is_match(text) {
        1
    } else if TODAY_PATTERN.is_match(text) {
        0
    } else {
        return None;
    };

    today
        .checked_add_days(Days::new(offset))
        .map(ExtractedDate::from_naive)
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    if raw.len() == 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

fn validated(day: u32, month: u32, year: i32) -> Option<ExtractedDate> {
    let date = ExtractedDate { day, month, year };
    date.to_naive_date().map(|_| date)
}

/// Finds a time anchored on "às/as/das/hora/horário"; the minute defaults to 00.
pub fn parse_time(text: &str) -> Option<ExtractedTime> {
    let caps = TIME_PATTERN.captures(text)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    if hour > 23 || minute > 59 {
        return None;
    }

    Some(ExtractedTime { hour, minute })
}

/// Bare "dia 15" with no month, as used by the short delete command
pub fn parse_day_of_month(text: &str) -> Option<u32> {
    let caps = DAY_OF_MONTH_PATTERN.captures(text)?;
    if caps.get(2).is_some() {
        return None;
    }
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_numeric_date_defaults_to_current_year() {
        let date = parse_date("no dia 15/05", today()).unwrap();
        assert_eq!(date, ExtractedDate { day: 15, month: 5, year: 2026 });
    }

    #[test]
    fn test_numeric_date_with_year() {
        let other_today = NaiveDate::from_ymd_opt(2031, 1, 1).unwrap();
        let date = parse_date("15/05/2026", other_today).unwrap();
        assert_eq!(date.year, 2026);
        assert_eq!(date.month, 5);
        assert_eq!(date.day, 15);

        let short = parse_date("dia 01/02/27", today()).unwrap();
        assert_eq!(short.year, 2027);
    }

    #[test]
    fn test_textual_date() {
        let date = parse_date("dia 20 de junho", today()).unwrap();
        assert_eq!(date, ExtractedDate { day: 20, month: 6, year: 2026 });

        let date = parse_date("em 5 de Março de 2027", today()).unwrap();
        assert_eq!(date, ExtractedDate { day: 5, month: 3, year: 2027 });
    }

    #[test]
    fn test_unknown_month_yields_no_date() {
        assert!(parse_date("dia 20 de juno", today()).is_none());
        assert_eq!(month_from_name("marco"), Some(3));
        assert_eq!(month_from_name("Dezembro"), Some(12));
        assert!(month_from_name("december").is_none());
    }

    #[test]
    fn test_impossible_dates_are_rejected() {
        assert!(parse_date("31/02", today()).is_none());
        assert!(parse_date("10/13/2026", today()).is_none());
        assert!(parse_date("30 de fevereiro", today()).is_none());
    }

    #[test]
    fn test_relative_dates() {
        assert_eq!(
            parse_date("hoje às 10", today()),
            Some(ExtractedDate { day: 10, month: 3, year: 2026 })
        );
        assert_eq!(
            parse_date("amanhã às 10", today()),
            Some(ExtractedDate { day: 11, month: 3, year: 2026 })
        );
        assert_eq!(
            parse_date("depois de amanhã", today()),
            Some(ExtractedDate { day: 12, month: 3, year: 2026 })
        );
        // explicit dates win over relative words
        assert_eq!(parse_date("amanhã, 20/06", today()).unwrap().day, 20);
    }

    #[test]
    fn test_relative_date_crosses_year() {
        let new_year_eve = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let date = parse_date("amanha", new_year_eve).unwrap();
        assert_eq!(date, ExtractedDate { day: 1, month: 1, year: 2027 });
    }

    #[test]
    fn test_time_defaults_minute() {
        assert_eq!(parse_time("às 14"), Some(ExtractedTime { hour: 14, minute: 0 }));
        assert_eq!(parse_time("às 14:30"), Some(ExtractedTime { hour: 14, minute: 30 }));
    }

    #[test]
    fn test_time_variants() {
        assert_eq!(parse_time("as 9h"), Some(ExtractedTime { hour: 9, minute: 0 }));
        assert_eq!(parse_time("às 14h30"), Some(ExtractedTime { hour: 14, minute: 30 }));
        assert_eq!(parse_time("horário: 08:15"), Some(ExtractedTime { hour: 8, minute: 15 }));
        assert_eq!(parse_time("das 14h às 16h"), Some(ExtractedTime { hour: 14, minute: 0 }));
    }

    #[test]
    fn test_time_requires_anchor_and_valid_range() {
        assert!(parse_time("dia 20/06").is_none());
        assert!(parse_time("14:30").is_none());
        assert!(parse_time("às 25:00").is_none());
        assert!(parse_time("às 10:75").is_none());
    }

    #[test]
    fn test_day_of_month() {
        assert_eq!(parse_day_of_month("do dia 15"), Some(15));
        assert_eq!(parse_day_of_month("do dia 15/06"), None);
        assert_eq!(parse_day_of_month("dia 40"), None);
        assert_eq!(parse_day_of_month("sem dia"), None);
    }
}
