use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::picker::Picker;

use super::keys::CursorBehaviour;
use super::{CalendarWindow, CommandParser, Context, ControlBar, InputMode, PickerBehaviour};

use std::io::Write;
use std::os::unix::io::AsRawFd;

use unsegen::base::{GraphemeCluster, Terminal};
use unsegen::input::{EditBehavior, Key, NavigateBehavior, ScrollBehavior};
use unsegen::widget::*;

pub struct App {
    context: Context,
}

impl App {
    pub fn new(config: &Config, picker: Picker) -> App {
        App {
            context: Context::new(config, picker),
        }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new()
            .separator(GraphemeCluster::space())
            .widget(spacer);
        if self.context.mode == InputMode::Command {
            layout = layout.widget(self.context.command_line().as_widget());
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(CalendarWindow::new(&self.context))
            .widget(ControlBar::new(&self.context))
            .widget(self.bottom_bar())
    }

    /// Runs until the user quits and hands back the formatted selection.
    ///
    /// `term` should draw on the controlling tty so that stdout stays free
    /// for the result.
    pub fn run<T: Write + AsRawFd>(
        mut self,
        dispatcher: Dispatcher,
        mut term: Terminal<T>,
    ) -> Result<String, Box<dyn std::error::Error>> {
        while !self.context.quit {
            // Draw
            {
                let root = term.create_root_window();
                self.as_widget().draw(root, RenderingHints::new());
            }
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Signal(signal) => log::debug!("Received {:?}, redrawing", signal),
                Event::Input(input) => {
                    if input.matches(Key::Esc) {
                        self.context.mode = InputMode::Normal;
                        continue;
                    }

                    match self.context.mode {
                        InputMode::Normal => {
                            input
                                .chain(
                                    NavigateBehavior::new(&mut CursorBehaviour(&mut self.context))
                                        .down_on(Key::Char('j'))
                                        .down_on(Key::Down)
                                        .up_on(Key::Char('k'))
                                        .up_on(Key::Up)
                                        .left_on(Key::Char('h'))
                                        .left_on(Key::Left)
                                        .right_on(Key::Char('l'))
                                        .right_on(Key::Right),
                                )
                                .chain(PickerBehaviour(&mut self.context))
                                .finish();
                        }
                        InputMode::Command => {
                            input
                                .chain(
                                    EditBehavior::new(self.context.command_line_mut())
                                        .delete_forwards_on(Key::Delete)
                                        .delete_backwards_on(Key::Backspace)
                                        .left_on(Key::Left)
                                        .right_on(Key::Right),
                                )
                                .chain(
                                    ScrollBehavior::new(self.context.command_line_mut())
                                        .backwards_on(Key::Up)
                                        .forwards_on(Key::Down),
                                )
                                .chain(CommandParser::new(&mut self.context))
                                .finish();
                        }
                    }
                }
            }
        }

        log::debug!("Leaving with selection {:?}", self.context.picker().selection());

        Ok(self.context.picker().formatted_range())
    }
}
