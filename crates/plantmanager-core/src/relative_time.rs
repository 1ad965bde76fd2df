//! Human-readable distance between two instants.
//!
//! Buckets follow the thresholds of date-fns `formatDistance` (without a
//! suffix), which is what users of the mobile app are used to reading.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Display language for user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
        }
    }

    /// The "don't forget to water" banner shown for the next due plant.
    pub fn watering_reminder(self, plant_name: &str, distance: &str) -> String {
        match self {
            Self::PtBr => format!("Não esqueça de regar a {plant_name} à {distance}."),
            Self::EnUs => format!("Don't forget to water the {plant_name} in {distance}."),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en-us" | "en" => Ok(Self::EnUs),
            other => Err(Error::InvalidInput(format!("unsupported locale '{other}'"))),
        }
    }
}

/// A distance bucket with its count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    LessThanXMinutes(i64),
    XMinutes(i64),
    AboutXHours(i64),
    XDays(i64),
    AboutXMonths(i64),
    XMonths(i64),
    AboutXYears(i64),
    OverXYears(i64),
    AlmostXYears(i64),
}

impl Distance {
    /// Bucket the distance between two instants; order does not matter.
    pub fn between(date: DateTime<Utc>, base: DateTime<Utc>) -> Self {
        let (earlier, later) = if date <= base {
            (date, base)
        } else {
            (base, date)
        };
        let seconds = (later - earlier).num_seconds();
        let minutes = round_div(seconds, 60);

        if minutes < 2 {
            if minutes == 0 {
                Self::LessThanXMinutes(1)
            } else {
                Self::XMinutes(minutes)
            }
        } else if minutes < 45 {
            Self::XMinutes(minutes)
        } else if minutes < 90 {
            Self::AboutXHours(1)
        } else if minutes < MINUTES_IN_DAY {
            Self::AboutXHours(round_div(minutes, 60))
        } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
            Self::XDays(1)
        } else if minutes < MINUTES_IN_MONTH {
            Self::XDays(round_div(minutes, MINUTES_IN_DAY))
        } else if minutes < MINUTES_IN_TWO_MONTHS {
            Self::AboutXMonths(round_div(minutes, MINUTES_IN_MONTH))
        } else {
            let months = months_between(earlier, later);
            if months < 12 {
                Self::XMonths(round_div(minutes, MINUTES_IN_MONTH))
            } else {
                let remainder = months % 12;
                let years = months / 12;
                if remainder < 3 {
                    Self::AboutXYears(years)
                } else if remainder < 9 {
                    Self::OverXYears(years)
                } else {
                    Self::AlmostXYears(years + 1)
                }
            }
        }
    }

    pub fn render(self, locale: Locale) -> String {
        match locale {
            Locale::PtBr => self.render_pt_br(),
            Locale::EnUs => self.render_en_us(),
        }
    }

    fn render_pt_br(self) -> String {
        match self {
            Self::LessThanXMinutes(1) => "menos de um minuto".to_string(),
            Self::LessThanXMinutes(n) => format!("menos de {n} minutos"),
            Self::XMinutes(1) => "1 minuto".to_string(),
            Self::XMinutes(n) => format!("{n} minutos"),
            Self::AboutXHours(1) => "cerca de 1 hora".to_string(),
            Self::AboutXHours(n) => format!("cerca de {n} horas"),
            Self::XDays(1) => "1 dia".to_string(),
            Self::XDays(n) => format!("{n} dias"),
            Self::AboutXMonths(1) => "cerca de 1 mês".to_string(),
            Self::AboutXMonths(n) => format!("cerca de {n} meses"),
            Self::XMonths(1) => "1 mês".to_string(),
            Self::XMonths(n) => format!("{n} meses"),
            Self::AboutXYears(1) => "cerca de 1 ano".to_string(),
            Self::AboutXYears(n) => format!("cerca de {n} anos"),
            Self::OverXYears(1) => "mais de 1 ano".to_string(),
            Self::OverXYears(n) => format!("mais de {n} anos"),
            Self::AlmostXYears(1) => "quase 1 ano".to_string(),
            Self::AlmostXYears(n) => format!("quase {n} anos"),
        }
    }

    fn render_en_us(self) -> String {
        match self {
            Self::LessThanXMinutes(1) => "less than a minute".to_string(),
            Self::LessThanXMinutes(n) => format!("less than {n} minutes"),
            Self::XMinutes(1) => "1 minute".to_string(),
            Self::XMinutes(n) => format!("{n} minutes"),
            Self::AboutXHours(1) => "about 1 hour".to_string(),
            Self::AboutXHours(n) => format!("about {n} hours"),
            Self::XDays(1) => "1 day".to_string(),
            Self::XDays(n) => format!("{n} days"),
            Self::AboutXMonths(1) => "about 1 month".to_string(),
            Self::AboutXMonths(n) => format!("about {n} months"),
            Self::XMonths(1) => "1 month".to_string(),
            Self::XMonths(n) => format!("{n} months"),
            Self::AboutXYears(1) => "about 1 year".to_string(),
            Self::AboutXYears(n) => format!("about {n} years"),
            Self::OverXYears(1) => "over 1 year".to_string(),
            Self::OverXYears(n) => format!("over {n} years"),
            Self::AlmostXYears(1) => "almost 1 year".to_string(),
            Self::AlmostXYears(n) => format!("almost {n} years"),
        }
    }
}

/// Format the distance between `date` and `base` for display.
pub fn format_distance(date: DateTime<Utc>, base: DateTime<Utc>, locale: Locale) -> String {
    Distance::between(date, base).render(locale)
}

/// Integer division rounding half up; both operands are non-negative.
const fn round_div(value: i64, divisor: i64) -> i64 {
    (2 * value + divisor) / (2 * divisor)
}

/// Whole calendar months from `earlier` to `later`.
fn months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let calendar_months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month())
        - i64::from(earlier.month());

    let later_in_month = (later.day(), later.num_seconds_from_midnight());
    let earlier_in_month = (earlier.day(), earlier.num_seconds_from_midnight());
    if calendar_months > 0 && later_in_month < earlier_in_month {
        calendar_months - 1
    } else {
        calendar_months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn pt(offset: Duration) -> String {
        format_distance(base() + offset, base(), Locale::PtBr)
    }

    #[test]
    fn minutes_buckets() {
        assert_eq!(pt(Duration::seconds(20)), "menos de um minuto");
        assert_eq!(pt(Duration::seconds(50)), "1 minuto");
        assert_eq!(pt(Duration::minutes(30)), "30 minutos");
    }

    #[test]
    fn hour_buckets() {
        assert_eq!(pt(Duration::minutes(60)), "cerca de 1 hora");
        assert_eq!(pt(Duration::minutes(150)), "cerca de 3 horas");
        assert_eq!(pt(Duration::hours(23)), "cerca de 23 horas");
    }

    #[test]
    fn day_buckets() {
        assert_eq!(pt(Duration::hours(30)), "1 dia");
        assert_eq!(pt(Duration::days(3)), "3 dias");
        assert_eq!(pt(Duration::days(29)), "29 dias");
    }

    #[test]
    fn month_and_year_buckets() {
        assert_eq!(pt(Duration::days(45)), "cerca de 2 meses");
        assert_eq!(pt(Duration::days(120)), "4 meses");
        assert_eq!(pt(Duration::days(366)), "cerca de 1 ano");
        assert_eq!(pt(Duration::days(365 + 180)), "mais de 1 ano");
        assert_eq!(pt(Duration::days(365 + 300)), "quase 2 anos");
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(pt(Duration::hours(-5)), pt(Duration::hours(5)));
    }

    #[test]
    fn english_rendering() {
        let text = format_distance(base() + Duration::days(2), base(), Locale::EnUs);
        assert_eq!(text, "2 days");
    }

    #[test]
    fn locale_parse_accepts_common_tags() {
        assert_eq!("pt_BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("fr-FR".parse::<Locale>().is_err());
    }

    #[test]
    fn reminder_banner_text() {
        assert_eq!(
            Locale::PtBr.watering_reminder("Aningapara", "3 dias"),
            "Não esqueça de regar a Aningapara à 3 dias."
        );
    }
}
