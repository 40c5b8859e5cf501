use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::ops::{Add, Sub};

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let first = MonthIndex::new(*month, year);
    match (first.first_day(), (first + 1).first_day()) {
        (Some(begin), Some(end)) => end.signed_duration_since(begin).num_days() as u32,
        // December of the last representable year
        _ => 31,
    }
}

/// Number of cells before the 1st in a week row starting on Monday.
pub fn first_weekday_offset(month: &Month, year: i32) -> u32 {
    MonthIndex::new(*month, year)
        .first_day()
        .map(|date| date.weekday().num_days_from_monday())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.index.number_from_month(), 1)
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month() == self.index.number_from_month()
    }

    fn months_since_epoch(&self) -> i64 {
        self.year as i64 * 12 + self.index.number_from_month() as i64 - 1
    }

    fn from_months_since_epoch(months: i64) -> Self {
        let year = months.div_euclid(12);
        let month0 = months.rem_euclid(12) as u32;

        MonthIndex {
            index: Month::from_u32(month0 + 1).unwrap_or(Month::January),
            year: year as i32,
        }
    }

    /// Shifts by `months`, backwards if negative.
    pub fn offset(&self, months: i64) -> Self {
        Self::from_months_since_epoch(self.months_since_epoch() + months)
    }

    /// Months from `self` up to `other`, negative if `other` lies before.
    pub fn distance_to(&self, other: &MonthIndex) -> i64 {
        other.months_since_epoch() - self.months_since_epoch()
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(
            Month::from_u32(m.month()).unwrap_or(Month::January),
            m.year(),
        )
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        self.offset(rhs as i64)
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        self.offset(-(rhs as i64))
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.months_since_epoch().cmp(&other.months_since_epoch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_of_month(&Month::January, 2024), 31);
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
        assert_eq!(days_of_month(&Month::April, 2024), 30);
        assert_eq!(days_of_month(&Month::December, 2024), 31);
    }

    #[test]
    fn weekday_offsets() {
        // 1st of January 2024 is a Monday
        assert_eq!(first_weekday_offset(&Month::January, 2024), 0);
        // 1st of September 2024 is a Sunday
        assert_eq!(first_weekday_offset(&Month::September, 2024), 6);
        // 1st of March 2024 is a Friday
        assert_eq!(first_weekday_offset(&Month::March, 2024), 4);
    }

    #[test]
    fn add_wraps_years() {
        let nov = MonthIndex::new(Month::November, 2023);
        assert_eq!(nov + 1, MonthIndex::new(Month::December, 2023));
        assert_eq!(nov + 2, MonthIndex::new(Month::January, 2024));
        assert_eq!(nov + 25, MonthIndex::new(Month::December, 2025));
    }

    #[test]
    fn sub_wraps_years() {
        let feb = MonthIndex::new(Month::February, 2024);
        assert_eq!(feb - 1, MonthIndex::new(Month::January, 2024));
        assert_eq!(feb - 2, MonthIndex::new(Month::December, 2023));
        assert_eq!(feb - 14, MonthIndex::new(Month::December, 2022));
    }

    #[test]
    fn ordering_and_distance() {
        let dec = MonthIndex::new(Month::December, 2023);
        let jan = MonthIndex::new(Month::January, 2024);
        assert!(dec < jan);
        assert_eq!(dec.distance_to(&jan), 1);
        assert_eq!(jan.distance_to(&dec), -1);
        assert_eq!(jan.offset(-1), dec);
        assert_eq!(dec.offset(13), jan + 12);
    }

    #[test]
    fn from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let idx = MonthIndex::from(date);
        assert_eq!(idx, MonthIndex::new(Month::March, 2024));
        assert!(idx.contains(&date));
        assert!(!(idx + 1).contains(&date));
    }
}
