use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::calendar::MonthIndex;
use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::picker::{Mode, Picker};

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub today_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub endpoint_day_style: StyleModifier,
    pub range_day_style: StyleModifier,
    pub disabled_day_style: StyleModifier,
    pub month_header_style: StyleModifier,
    pub weekday_header_style: StyleModifier,
    pub active_control_style: StyleModifier,
    pub error_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            focus_day_style: StyleModifier::default().invert(true),
            today_day_style: StyleModifier::default().bold(true),
            today_day_char: Some('*'),
            endpoint_day_style: StyleModifier::default().bg_color(Color::Blue),
            range_day_style: StyleModifier::default().fg_color(Color::Cyan),
            disabled_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            weekday_header_style: StyleModifier::default().bold(true),
            active_control_style: StyleModifier::default().fg_color(Color::Green),
            error_style: StyleModifier::default().fg_color(Color::LightRed),
        }
    }
}

pub struct Context {
    picker: Picker,
    cursor: NaiveDate,
    now: DateTime<Local>,
    first_month: MonthIndex,
    months: usize,
    scrolloff: u32,
    command_line: PromptLine,
    pub theme: Theme,
    pub mode: InputMode,
    pub last_error_message: Option<String>,
    pub quit: bool,
}

impl Context {
    pub fn new(config: &Config, picker: Picker) -> Self {
        Self::with_now(config, picker, Local::now())
    }

    pub fn with_now(config: &Config, picker: Picker, now: DateTime<Local>) -> Self {
        // start on the floor so the cursor never opens on a refused day
        let cursor = std::cmp::max(now.date_naive(), picker.min_date());
        let months = config.months.max(1);

        let mut context = Context {
            picker,
            cursor,
            now,
            first_month: MonthIndex::from(cursor),
            months,
            scrolloff: config.scrolloff,
            command_line: PromptLine::with_prompt(":".to_owned()),
            theme: Theme::default(),
            mode: InputMode::Normal,
            last_error_message: None,
            quit: false,
        };
        context.first_month = MonthIndex::from(cursor).offset(-context.effective_scrolloff());
        context
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut Picker {
        &mut self.picker
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn first_month(&self) -> MonthIndex {
        self.first_month
    }

    pub fn months(&self) -> usize {
        self.months
    }

    pub fn command_line(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn command_line_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }

    pub fn move_cursor(&mut self, by: Duration) {
        if let Some(cursor) = self.cursor.checked_add_signed(by) {
            self.goto(cursor);
        }
    }

    pub fn goto(&mut self, date: NaiveDate) {
        self.cursor = date;
        self.scroll_to_cursor();
    }

    pub fn goto_today(&mut self) {
        self.goto(self.today());
    }

    /// Feeds the cursor date into the picker.
    /// Picks the date under the cursor. Refusals are left to the caller to
    /// report.
    pub fn pick_cursor(&mut self) -> Result<()> {
        if self.picker.select(self.cursor) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::InvalidSelection,
                &format!(
                    "{} cannot be picked",
                    crate::picker::format_date(Some(self.cursor))
                ),
            ))
        }
    }

    pub fn set_selection_mode(&mut self, mode: Mode) {
        self.picker.set_mode(mode);
    }

    pub fn report_error(&mut self, message: String) {
        log::warn!("{}", message);
        self.last_error_message = Some(message);
    }

    fn effective_scrolloff(&self) -> i64 {
        (self.scrolloff as i64).min((self.months as i64 - 1) / 2)
    }

    fn scroll_to_cursor(&mut self) {
        let last = self.months as i64 - 1;
        let scrolloff = self.effective_scrolloff();
        let distance = self.first_month.distance_to(&MonthIndex::from(self.cursor));

        if distance < scrolloff {
            self.first_month = self.first_month.offset(distance - scrolloff);
        } else if distance > last - scrolloff {
            self.first_month = self.first_month.offset(distance - (last - scrolloff));
        }
    }
}
