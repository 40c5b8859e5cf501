use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use super::Context;
use crate::picker::{Mode, Picker};

const BUTTONS: &[(&str, char)] = &[("-", '-'), ("clear", 'x'), ("+", '+')];

fn radio(mode: Mode, active: Mode) -> String {
    let mark = if mode == active { '*' } else { ' ' };
    format!("({}) {} [{}]", mark, mode, &mode.as_str()[..1])
}

fn summary(picker: &Picker) -> String {
    let range = picker.formatted_range();
    if range.is_empty() {
        "nothing selected".to_owned()
    } else {
        let count = picker.day_count();
        format!(
            "{} ({} day{})",
            range,
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}

/// Mode radios, the range buttons and the formatted selection.
pub struct ControlBar<'a> {
    context: &'a Context,
}

impl<'a> ControlBar<'a> {
    pub fn new(context: &'a Context) -> Self {
        ControlBar { context }
    }
}

impl Widget for ControlBar<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(40),
            height: RowDemand::exact(2),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let picker = self.context.picker();
        let active = picker.mode();

        let mut cursor = Cursor::new(&mut window);

        for mode in [Mode::Single, Mode::Range] {
            let saved_style = cursor.get_style_modifier();
            if mode == active {
                cursor.apply_style_modifier(theme.active_control_style);
            }
            let _ = write!(&mut cursor, "{}  ", radio(mode, active));
            cursor.set_style_modifier(saved_style);
        }

        // the buttons only make sense for ranges
        if active == Mode::Range {
            for (label, key) in BUTTONS {
                let _ = write!(&mut cursor, "[{}]({}) ", label, key);
            }
            let _ = write!(&mut cursor, " ");
        }

        let _ = writeln!(&mut cursor, "{}", summary(picker));

        if let Some(message) = &self.context.last_error_message {
            cursor.apply_style_modifier(theme.error_style);
            let _ = write!(&mut cursor, "{}", message);
        }
    }
}
