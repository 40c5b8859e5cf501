//! Selection state of the date picker.
//!
//! [`Picker`] owns the mode and the selection. Every view on it (day count,
//! formatted range, highlights) is computed from the current state when it is
//! asked for; nothing derived is stored.

mod format;
mod selection;

pub use format::{fits_date_format, format_date, parse_date, DATE_FORMAT};
pub use selection::{Mode, Selection};

use chrono::{Local, NaiveDate};

use crate::error::{Error, ErrorKind, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picker {
    mode: Mode,
    selection: Selection,
    min_date: NaiveDate,
}

impl Picker {
    pub fn new(min_date: NaiveDate) -> Self {
        Picker {
            mode: Mode::Single,
            selection: Selection::Empty,
            min_date,
        }
    }

    /// A picker whose floor is the local date at construction.
    pub fn from_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.set_mode(mode);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Switches mode and drops whatever was selected, even if `mode` is the
    /// current one.
    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("Switching selection mode to {}", mode);
        self.mode = mode;
        self.selection = mode.empty_selection();
    }

    /// Inclusive number of days spanned by the selection.
    ///
    /// Single mode always reports one day, as does an incomplete range.
    pub fn day_count(&self) -> i64 {
        match (self.mode, self.selection) {
            (
                Mode::Range,
                Selection::Range {
                    start: Some(start),
                    end: Some(end),
                },
            ) => end.signed_duration_since(start).num_days().abs() + 1,
            _ => 1,
        }
    }

    pub fn increment_end(&mut self) -> bool {
        if self.mode != Mode::Range {
            return false;
        }

        if let Selection::Range {
            start: Some(_),
            end: Some(ref mut end),
        } = self.selection
        {
            if let Some(next) = end.succ_opt().filter(|next| fits_date_format(*next)) {
                *end = next;
                return true;
            }
        }

        false
    }

    /// Moves the end back by one day unless the range is a single day.
    pub fn decrement_end(&mut self) -> bool {
        if self.mode != Mode::Range || self.day_count() <= 1 {
            return false;
        }

        if let Selection::Range {
            end: Some(ref mut end),
            ..
        } = self.selection
        {
            if let Some(prev) = end.pred_opt() {
                *end = prev;
                return true;
            }
        }

        false
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Applies a date picked on the calendar.
    ///
    /// Dates before the floor or past 31/12/9999 are refused. In range mode the first pick sets
    /// the start and the second one the end; a second pick earlier than the
    /// start restarts the range there.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        if !self.is_selectable(date) {
            log::debug!("Refusing {} (floor {})", date, self.min_date);
            return false;
        }

        self.selection = match (self.mode, self.selection) {
            (Mode::Single, _) => Selection::Single(date),
            (
                Mode::Range,
                Selection::Range {
                    start: Some(start),
                    end: None,
                },
            ) if date >= start => Selection::range(start, date),
            (Mode::Range, _) => Selection::Range {
                start: Some(date),
                end: None,
            },
        };

        true
    }

    /// Replaces the selection wholesale, as a bound widget would.
    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        if !selection.fits(self.mode) {
            return Err(Error::new(
                ErrorKind::InvalidSelection,
                &format!("{:?} cannot be held in {} mode", selection, self.mode),
            ));
        }

        if let Some(date) = selection.dates().find(|date| !fits_date_format(*date)) {
            return Err(Error::new(
                ErrorKind::InvalidSelection,
                &format!("{} does not fit dd/mm/yyyy", date),
            ));
        }

        if let Some(date) = selection.dates().find(|date| *date < self.min_date) {
            return Err(Error::new(
                ErrorKind::InvalidSelection,
                &format!(
                    "{} lies before {}",
                    format_date(Some(date)),
                    format_date(Some(self.min_date))
                ),
            ));
        }

        if let Selection::Range {
            start: Some(start),
            end: Some(end),
        } = selection
        {
            if end < start {
                return Err(Error::new(
                    ErrorKind::InvalidSelection,
                    "range ends before it starts",
                ));
            }
        }

        self.selection = selection;
        Ok(())
    }

    pub fn formatted_range(&self) -> String {
        match (self.mode, self.selection) {
            (Mode::Single, Selection::Single(date)) => {
                let date = format_date(Some(date));
                format!("{}-{}", date, date)
            }
            (
                Mode::Range,
                Selection::Range {
                    start: Some(start),
                    end: Some(end),
                },
            ) => format!("{}-{}", format_date(Some(start)), format_date(Some(end))),
            _ => String::new(),
        }
    }

    /// The single date or either endpoint of a range.
    pub fn is_endpoint(&self, date: NaiveDate) -> bool {
        self.selection.dates().any(|selected| selected == date)
    }

    /// Whether `date` lies within a complete range, endpoints included.
    pub fn in_range(&self, date: NaiveDate) -> bool {
        match self.selection {
            Selection::Range {
                start: Some(start),
                end: Some(end),
            } => start <= date && date <= end,
            _ => false,
        }
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.min_date && fits_date_format(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january_range() -> Picker {
        let mut picker = Picker::new(date(2023, 12, 1)).with_mode(Mode::Range);
        picker
            .set_selection(Selection::range(date(2024, 1, 1), date(2024, 1, 5)))
            .unwrap();
        picker
    }

    #[test]
    fn starts_single_and_empty() {
        let picker = Picker::new(date(2024, 1, 1));
        assert_eq!(picker.mode(), Mode::Single);
        assert_eq!(picker.selection(), &Selection::Empty);
        assert_eq!(picker.formatted_range(), "");
    }

    #[test]
    fn set_mode_resets_selection() {
        let mut picker = january_range();

        picker.set_mode(Mode::Single);
        assert_eq!(picker.selection(), &Selection::Empty);

        picker.select(date(2024, 2, 1));
        picker.set_mode(Mode::Range);
        assert_eq!(picker.selection(), &Selection::empty_range());

        picker.select(date(2024, 2, 1));
        picker.set_mode(Mode::Range);
        assert_eq!(picker.selection(), &Selection::empty_range());
    }

    #[test]
    fn day_count_of_range_is_inclusive() {
        assert_eq!(january_range().day_count(), 5);
    }

    #[test]
    fn day_count_across_month_and_leap_day() {
        let mut picker = Picker::new(date(2024, 1, 1)).with_mode(Mode::Range);
        picker.select(date(2024, 2, 27));
        picker.select(date(2024, 3, 2));
        assert_eq!(picker.day_count(), 5);
    }

    #[test]
    fn day_count_falls_back_to_one() {
        let mut picker = Picker::new(date(2024, 1, 1));
        assert_eq!(picker.day_count(), 1);

        picker.select(date(2024, 1, 10));
        assert_eq!(picker.day_count(), 1);

        picker.set_mode(Mode::Range);
        assert_eq!(picker.day_count(), 1);

        picker.select(date(2024, 1, 10));
        assert_eq!(picker.day_count(), 1);
    }

    #[test]
    fn increment_extends_end() {
        let mut picker = january_range();
        assert!(picker.increment_end());
        assert_eq!(picker.selection().end(), Some(date(2024, 1, 6)));
        assert_eq!(picker.day_count(), 6);
    }

    #[test]
    fn increment_needs_complete_range() {
        let mut picker = Picker::new(date(2024, 1, 1)).with_mode(Mode::Range);
        assert!(!picker.increment_end());

        picker.select(date(2024, 1, 3));
        let before = picker.clone();
        assert!(!picker.increment_end());
        assert_eq!(picker, before);
    }

    #[test]
    fn increment_ignored_in_single_mode() {
        let mut picker = Picker::new(date(2024, 1, 1));
        picker.select(date(2024, 1, 3));
        assert!(!picker.increment_end());
        assert_eq!(picker.selection(), &Selection::Single(date(2024, 1, 3)));
    }

    #[test]
    fn decrement_stops_at_start() {
        let mut picker = january_range();

        let mut applied = 0;
        for _ in 0..10 {
            if picker.decrement_end() {
                applied += 1;
            }
        }

        assert_eq!(applied, 4);
        assert_eq!(picker.day_count(), 1);
        assert_eq!(picker.selection().start(), picker.selection().end());
    }

    #[test]
    fn decrement_ignored_in_single_mode() {
        let mut picker = Picker::new(date(2024, 1, 1));
        picker.select(date(2024, 1, 3));
        assert!(!picker.decrement_end());
    }

    #[test]
    fn clear_empties_any_selection() {
        let mut picker = january_range();
        picker.clear();
        assert_eq!(picker.selection(), &Selection::Empty);
        assert_eq!(picker.mode(), Mode::Range);

        let mut picker = Picker::new(date(2024, 1, 1));
        picker.select(date(2024, 1, 2));
        picker.clear();
        assert_eq!(picker.selection(), &Selection::Empty);

        picker.clear();
        assert_eq!(picker.selection(), &Selection::Empty);
    }

    #[test]
    fn cleared_range_can_be_picked_again() {
        let mut picker = january_range();
        picker.clear();
        picker.select(date(2024, 1, 8));
        picker.select(date(2024, 1, 9));
        assert_eq!(picker.formatted_range(), "08/01/2024-09/01/2024");
    }

    #[test]
    fn formatted_single_repeats_date() {
        let mut picker = Picker::new(date(2024, 1, 1));
        picker.select(date(2024, 3, 10));
        assert_eq!(picker.formatted_range(), "10/03/2024-10/03/2024");
    }

    #[test]
    fn formatted_range() {
        assert_eq!(january_range().formatted_range(), "01/01/2024-05/01/2024");
    }

    #[test]
    fn formatted_empty_in_both_modes() {
        let mut picker = Picker::new(date(2024, 1, 1));
        assert_eq!(picker.formatted_range(), "");

        picker.set_mode(Mode::Range);
        assert_eq!(picker.formatted_range(), "");

        picker.select(date(2024, 1, 2));
        assert_eq!(picker.formatted_range(), "");
    }

    #[test]
    fn select_refuses_dates_before_floor() {
        let mut picker = Picker::new(date(2024, 1, 10));
        assert!(!picker.select(date(2024, 1, 9)));
        assert_eq!(picker.selection(), &Selection::Empty);

        assert!(picker.select(date(2024, 1, 10)));
        assert_eq!(picker.selection(), &Selection::Single(date(2024, 1, 10)));
    }

    #[test]
    fn single_pick_replaces_previous() {
        let mut picker = Picker::new(date(2024, 1, 1));
        picker.select(date(2024, 1, 2));
        picker.select(date(2024, 1, 7));
        assert_eq!(picker.selection(), &Selection::Single(date(2024, 1, 7)));
    }

    #[test]
    fn range_picks_walk_the_state_machine() {
        let mut picker = Picker::new(date(2024, 1, 1)).with_mode(Mode::Range);

        picker.select(date(2024, 1, 5));
        assert_eq!(
            picker.selection(),
            &Selection::Range {
                start: Some(date(2024, 1, 5)),
                end: None
            }
        );

        // earlier second pick restarts
        picker.select(date(2024, 1, 3));
        assert_eq!(picker.selection().start(), Some(date(2024, 1, 3)));
        assert_eq!(picker.selection().end(), None);

        picker.select(date(2024, 1, 3));
        assert_eq!(
            picker.selection(),
            &Selection::range(date(2024, 1, 3), date(2024, 1, 3))
        );

        // a complete range starts over
        picker.select(date(2024, 1, 20));
        assert_eq!(picker.selection().start(), Some(date(2024, 1, 20)));
        assert_eq!(picker.selection().end(), None);
    }

    #[test]
    fn set_selection_rejects_wrong_mode() {
        let mut picker = Picker::new(date(2024, 1, 1));
        let err = picker
            .set_selection(Selection::range(date(2024, 1, 2), date(2024, 1, 3)))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSelection));
        assert_eq!(picker.selection(), &Selection::Empty);
    }

    #[test]
    fn set_selection_rejects_reversed_or_early_ranges() {
        let mut picker = Picker::new(date(2024, 1, 1)).with_mode(Mode::Range);

        assert!(picker
            .set_selection(Selection::range(date(2024, 1, 5), date(2024, 1, 2)))
            .is_err());
        assert!(picker
            .set_selection(Selection::range(date(2023, 12, 31), date(2024, 1, 2)))
            .is_err());
        assert_eq!(picker.selection(), &Selection::empty_range());
    }

    #[test]
    fn stops_at_last_four_digit_year() {
        let last = date(9999, 12, 31);
        let mut picker = Picker::new(date(2024, 1, 1)).with_mode(Mode::Range);
        picker
            .set_selection(Selection::range(date(9999, 12, 30), last))
            .unwrap();

        assert!(!picker.increment_end());
        assert_eq!(picker.selection().end(), Some(last));
        assert_eq!(picker.formatted_range(), "30/12/9999-31/12/9999");

        let err = picker
            .set_selection(Selection::range(last, last.succ_opt().unwrap()))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSelection));

        picker.clear();
        assert!(!picker.select(last.succ_opt().unwrap()));
        assert!(picker.selection().is_empty());
    }

    #[test]
    fn highlights() {
        let picker = january_range();

        assert!(picker.is_endpoint(date(2024, 1, 1)));
        assert!(picker.is_endpoint(date(2024, 1, 5)));
        assert!(!picker.is_endpoint(date(2024, 1, 3)));

        assert!(picker.in_range(date(2024, 1, 3)));
        assert!(picker.in_range(date(2024, 1, 5)));
        assert!(!picker.in_range(date(2024, 1, 6)));

        assert!(!picker.is_selectable(date(2023, 11, 30)));
        assert!(picker.is_selectable(date(2023, 12, 1)));
    }
}
