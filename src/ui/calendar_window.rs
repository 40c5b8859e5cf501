use chrono::NaiveDate;
use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use super::{Context, Theme};
use crate::calendar::{days_of_month, first_weekday_offset, MonthIndex};

struct DayCell<'a> {
    date: NaiveDate,
    context: &'a Context,
}

impl<'a> DayCell<'a> {
    const CELL_HEIGHT: usize = 1;
    const CELL_WIDTH: usize = 4;

    fn new(date: NaiveDate, context: &'a Context) -> Self {
        DayCell { date, context }
    }

    fn is_today(&self) -> bool {
        self.date == self.context.today()
    }

    /// Style modifiers in the order they have to be applied.
    fn styles(&self, theme: &Theme) -> Vec<StyleModifier> {
        let picker = self.context.picker();
        let mut styles = vec![theme.day_style];

        if !picker.is_selectable(self.date) {
            styles.push(theme.disabled_day_style);
        }
        if picker.in_range(self.date) {
            styles.push(theme.range_day_style);
        }
        if picker.is_endpoint(self.date) {
            styles.push(theme.endpoint_day_style);
        }
        if self.is_today() {
            styles.push(theme.today_day_style);
        }
        if self.date == self.context.cursor() {
            styles.push(theme.focus_day_style);
        }

        styles
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use chrono::Datelike;

        let arg_today = if self.is_today() {
            self.context.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, " {}{:>2}", arg_today, self.date.day())
    }
}

pub struct MonthPane<'a> {
    index: MonthIndex,
    num_days: u32,
    offset: u32,
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    const COLUMNS: usize = 7;
    const ROWS: usize = 6;
    const HEADER_ROWS: usize = 2;

    const HEADER: &'static [&'static str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    pub fn new(index: MonthIndex, context: &'a Context) -> Self {
        MonthPane {
            index,
            num_days: days_of_month(&index.month(), index.year()),
            offset: first_weekday_offset(&index.month(), index.year()),
            context,
        }
    }

    fn width() -> usize {
        Self::COLUMNS * DayCell::CELL_WIDTH
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::width()),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::ROWS * DayCell::CELL_HEIGHT),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;

        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(theme.month_header_style);

        let title = format!("{} {}", self.index.month().name(), self.index.year());
        if let Err(err) = writeln!(&mut cursor, "{:^width$}", title, width = Self::width()) {
            log::warn!("Error while writing month title: {}", err);
        }

        cursor.set_style_modifier(theme.weekday_header_style);
        for &head in Self::HEADER {
            let _ = write!(&mut cursor, "{:>width$}", head, width = DayCell::CELL_WIDTH);
        }
        let _ = writeln!(&mut cursor);

        cursor.set_style_modifier(theme.day_style);
        cursor.move_by(
            ColDiff::new((DayCell::CELL_WIDTH * self.offset as usize) as i32),
            RowDiff::new(0),
        );

        let days = (1..=self.num_days).filter_map(|day| {
            NaiveDate::from_ymd_opt(self.index.year(), self.index.month().number_from_month(), day)
        });

        for (idx, date) in days.enumerate() {
            let cell = DayCell::new(date, self.context);

            cursor.set_style_modifier(StyleModifier::default());
            for style in cell.styles(theme) {
                cursor.apply_style_modifier(style);
            }

            if let Err(err) = write!(&mut cursor, "{}", cell) {
                log::warn!("Error while writing day {}: {}", date, err);
            }

            if (self.offset as usize + idx + 1) % Self::COLUMNS == 0 {
                cursor.set_style_modifier(StyleModifier::default());
                let _ = writeln!(&mut cursor);
            }
        }
    }
}

/// The month grid: `months` consecutive panes starting at the context's
/// first visible month.
pub struct CalendarWindow<'a> {
    context: &'a Context,
}

impl<'a> CalendarWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        CalendarWindow { context }
    }

    fn panes(&self) -> impl Iterator<Item = MonthPane<'a>> + 'a {
        let context = self.context;
        let first = context.first_month();
        (0..context.months()).map(move |i| MonthPane::new(first + i as u32, context))
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        let mut layout = VLayout::new();
        for pane in self.panes() {
            layout = layout.widget(pane);
        }
        layout.space_demand()
    }

    fn draw(&self, window: Window, hints: RenderingHints) {
        let mut layout = VLayout::new();
        for pane in self.panes() {
            layout = layout.widget(pane);
        }
        layout.draw(window, hints);
    }
}
