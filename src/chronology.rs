//! Calendar alignment for a simulated year.
//!
//! Maps every calendar day of the target year to its weekday index
//! (Monday = 0 ... Sunday = 6) and to the day-type whose statistics apply.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day categories with their own occupancy statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::Sunday];

    /// Day-type of a weekday index (Monday = 0).
    pub fn from_weekday_index(index: u8) -> Self {
        match index % 7 {
            5 => DayType::Saturday,
            6 => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How many days a non-leap year is given.
///
/// `Legacy` reproduces the 355-day non-leap year of older output files and
/// exists only for comparing against them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCountRule {
    #[default]
    Calendar,
    Legacy,
}

impl DayCountRule {
    pub fn day_count(&self, leap: bool) -> usize {
        match (leap, self) {
            (true, _) => 366,
            (false, DayCountRule::Calendar) => 365,
            (false, DayCountRule::Legacy) => 355,
        }
    }
}

/// Day-of-week alignment of one simulated year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronology {
    pub year: i32,
    /// Weekday index of every simulated day, starting at January 1.
    pub day_of_week: Vec<u8>,
    pub day_count: usize,
}

impl Chronology {
    /// Build the chronology of `year`. Returns `None` for years chrono cannot represent.
    pub fn build(year: i32, rule: DayCountRule) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
        let day_count = rule.day_count(leap);
        let first_weekday = first.weekday().num_days_from_monday() as usize;

        let day_of_week = (0..7u8)
            .cycle()
            .skip(first_weekday)
            .take(day_count)
            .collect();

        Some(Self { year, day_of_week, day_count })
    }

    /// Weekday index of January 1.
    pub fn first_weekday(&self) -> u8 {
        self.day_of_week.first().copied().unwrap_or(0)
    }

    /// Day-type of the given day of the year (0-based).
    pub fn day_type(&self, day: usize) -> Option<DayType> {
        self.day_of_week.get(day).map(|&d| DayType::from_weekday_index(d))
    }

    /// Number of days of each type in the simulated year.
    pub fn day_type_counts(&self) -> [(DayType, usize); 3] {
        let mut counts = [0usize; 3];
        for &d in &self.day_of_week {
            counts[DayType::from_weekday_index(d) as usize] += 1;
        }
        [
            (DayType::Weekday, counts[0]),
            (DayType::Saturday, counts[1]),
            (DayType::Sunday, counts[2]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year_day_count() {
        let chrono = Chronology::build(2016, DayCountRule::Calendar).unwrap();
        assert_eq!(chrono.day_count, 366);
        assert_eq!(chrono.day_of_week.len(), 366);
    }

    #[test]
    fn test_common_year_day_count() {
        let chrono = Chronology::build(2013, DayCountRule::Calendar).unwrap();
        assert_eq!(chrono.day_count, 365);
        assert_eq!(chrono.day_of_week.len(), 365);
    }

    #[test]
    fn test_legacy_rule_keeps_short_year() {
        let legacy = Chronology::build(2013, DayCountRule::Legacy).unwrap();
        assert_eq!(legacy.day_count, 355);
        let leap = Chronology::build(2016, DayCountRule::Legacy).unwrap();
        assert_eq!(leap.day_count, 366);
    }

    #[test]
    fn test_first_weekday() {
        // 1 January 2013 was a Tuesday, 2016 a Friday
        assert_eq!(Chronology::build(2013, DayCountRule::Calendar).unwrap().first_weekday(), 1);
        assert_eq!(Chronology::build(2016, DayCountRule::Calendar).unwrap().first_weekday(), 4);
    }

    #[test]
    fn test_weekdays_cycle() {
        let chrono = Chronology::build(2016, DayCountRule::Calendar).unwrap();
        assert_eq!(&chrono.day_of_week[..5], &[4, 5, 6, 0, 1]);
        for pair in chrono.day_of_week.windows(2) {
            assert_eq!(pair[1], (pair[0] + 1) % 7);
        }
        assert_eq!(chrono.day_type(1), Some(DayType::Saturday));
        assert_eq!(chrono.day_type(2), Some(DayType::Sunday));
        assert_eq!(chrono.day_type(366), None);
    }

    #[test]
    fn test_day_type_counts() {
        // 2013 starts and ends on a Tuesday: 53 Tuesdays, 52 of every other day
        let chrono = Chronology::build(2013, DayCountRule::Calendar).unwrap();
        let counts = chrono.day_type_counts();
        assert_eq!(counts[0], (DayType::Weekday, 261));
        assert_eq!(counts[1], (DayType::Saturday, 52));
        assert_eq!(counts[2], (DayType::Sunday, 52));
    }
}
