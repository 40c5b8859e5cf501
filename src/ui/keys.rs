use chrono::Duration;
use unsegen::input::*;

use super::context::{Context, InputMode};
use crate::picker::Mode;

/// Normal mode bindings: the mode radios, the range buttons and picking.
pub struct PickerBehaviour<'a>(pub &'a mut Context);

impl PickerBehaviour<'_> {
    fn apply(self, key: Key) -> bool {
        let context = self.0;

        match key {
            Key::Char('\n') | Key::Char(' ') => {
                if let Err(e) = context.pick_cursor() {
                    context.report_error(e.to_string());
                }
            }
            Key::Char('s') => context.set_selection_mode(Mode::Single),
            Key::Char('r') => context.set_selection_mode(Mode::Range),
            Key::Char('+') => {
                context.picker_mut().increment_end();
            }
            Key::Char('-') => {
                context.picker_mut().decrement_end();
            }
            Key::Char('x') => context.picker_mut().clear(),
            Key::Char('t') => context.goto_today(),
            Key::Char(':') => context.mode = InputMode::Command,
            Key::Char('q') => context.quit = true,
            _ => return false,
        }

        true
    }
}

impl Behavior for PickerBehaviour<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            self.0.last_error_message = None;
            if self.apply(key) {
                return None;
            }
        }
        Some(input)
    }
}

/// Moves the calendar cursor by days and weeks.
pub struct CursorBehaviour<'a>(pub &'a mut Context);

impl Navigatable for CursorBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.0.move_cursor(Duration::weeks(1));
        Ok(())
    }

    fn move_left(&mut self) -> OperationResult {
        self.0.move_cursor(Duration::days(-1));
        Ok(())
    }

    fn move_right(&mut self) -> OperationResult {
        self.0.move_cursor(Duration::days(1));
        Ok(())
    }

    fn move_up(&mut self) -> OperationResult {
        self.0.move_cursor(Duration::weeks(-1));
        Ok(())
    }
}
