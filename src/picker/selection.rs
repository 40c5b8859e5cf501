use chrono::NaiveDate;
use serde_with::DeserializeFromStr;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Whether the picker accepts one date or a start/end pair.
#[derive(Clone, Copy, Debug, Default, DeserializeFromStr, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Single,
    Range,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Range => "range",
        }
    }

    /// The selection a freshly entered mode starts with.
    pub fn empty_selection(&self) -> Selection {
        match self {
            Mode::Single => Selection::Empty,
            Mode::Range => Selection::empty_range(),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Mode::Single),
            "range" => Ok(Mode::Range),
            _ => Err(Error::new(
                ErrorKind::ModeParse,
                &format!("'{}' is neither 'single' nor 'range'", s),
            )),
        }
    }
}

/// The currently chosen date or date range.
///
/// Either endpoint of a range may be unset while the user is still picking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Empty,
    Single(NaiveDate),
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Empty
    }
}

impl Selection {
    pub fn empty_range() -> Self {
        Selection::Range {
            start: None,
            end: None,
        }
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Selection::Range {
            start: Some(start),
            end: Some(end),
        }
    }

    /// True for `Empty` and for a range without any endpoint.
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Selection::Empty
                | Selection::Range {
                    start: None,
                    end: None
                }
        )
    }

    pub fn is_complete_range(&self) -> bool {
        matches!(
            self,
            Selection::Range {
                start: Some(_),
                end: Some(_)
            }
        )
    }

    /// Whether this selection may be held while the picker is in `mode`.
    pub fn fits(&self, mode: Mode) -> bool {
        match (self, mode) {
            (Selection::Empty, _) => true,
            (Selection::Single(_), Mode::Single) => true,
            (Selection::Range { .. }, Mode::Range) => true,
            _ => false,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            Selection::Empty => None,
            Selection::Single(date) => Some(date),
            Selection::Range { start, .. } => start,
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            Selection::Empty => None,
            Selection::Single(date) => Some(date),
            Selection::Range { end, .. } => end,
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let (first, second) = match *self {
            Selection::Empty => (None, None),
            Selection::Single(date) => (Some(date), None),
            Selection::Range { start, end } => (start, end),
        };
        first.into_iter().chain(second)
    }
}
