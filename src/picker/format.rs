use chrono::{Datelike, NaiveDate};

use crate::error::{Error, ErrorKind, Result};

/// `dd/mm/yyyy`, zero padded.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Whether `date` prints as exactly `dd/mm/yyyy`. chrono writes years past
/// 9999 with a sign (`+10000`).
pub fn fits_date_format(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // chrono accepts unpadded fields, the display format does not
    if !has_display_shape(s) {
        return Err(Error::new(
            ErrorKind::DateParse,
            &format!("'{}' does not match dd/mm/yyyy", s),
        ));
    }

    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

fn has_display_shape(s: &str) -> bool {
    s.len() == 10
        && s.char_indices().all(|(idx, c)| match idx {
            2 | 5 => c == '/',
            _ => c.is_ascii_digit(),
        })
}
