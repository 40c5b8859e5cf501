pub mod app;
mod calendar_window;
mod command;
mod context;
mod controls;
mod keys;

pub use app::App;
pub use calendar_window::{CalendarWindow, MonthPane};
pub use command::CommandParser;
pub use context::{Context, InputMode, Theme};
pub use controls::ControlBar;
pub use keys::PickerBehaviour;
