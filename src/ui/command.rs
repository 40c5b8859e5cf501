use std::str::FromStr;
use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, rest},
    error::{ErrorKind as NomErrorKind, ParseError},
    sequence::{delimited, preceded, tuple},
    Err as NomErr, IResult,
};

use super::context::{Context, InputMode};
use crate::error::{Error, ErrorKind, Result};
use crate::picker::{parse_date, Mode};

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

pub fn match_action<'c, A>(
    commands: &'c [(&'static str, A)],
) -> impl Fn(&str) -> IResult<&str, &'c A> + 'c {
    move |input| {
        let (rest, name) = alpha1(input)?;
        if let Some((_, act)) = commands.iter().find(|(n, _)| *n == name) {
            Ok((rest, act))
        } else {
            Err(NomErr::Failure(ParseError::from_error_kind(
                input,
                NomErrorKind::Tag,
            )))
        }
    }
}

/// Splits `[count]name[ argument]`.
fn parse_command(cmd: &str) -> IResult<&str, (Option<u32>, &Action, Option<&str>)> {
    all_consuming(delimited(
        space0,
        tuple((
            opt(map_res(digit1, u32::from_str)),
            match_action(COMMANDS),
            opt(preceded(space1, rest)),
        )),
        space0,
    ))(cmd)
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let (_, (count, act, arg)) = parse_command(cmd.trim()).map_err(|_| {
            Error::new(ErrorKind::CommandParse, &format!("unknown command '{}'", cmd))
        })?;

        match (act, count, arg) {
            (Action::Repeatable(a), count, None) => a(self.context, count.unwrap_or(1)),
            (Action::Arg(a), None, Some(arg)) => a(self.context, arg.trim()),
            (Action::NoArg(a), None, None) => a(self.context),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("wrong arguments for '{}'", cmd),
            )),
        }
    }

    fn report_error(&mut self, error: Error) {
        self.context.report_error(format!("{}", error));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self.context.command_line_mut().finish_line().to_owned();
                    if let Err(e) = self.run_command(&cmd) {
                        self.report_error(e);
                    } else {
                        self.context.last_error_message = None;
                        self.context.mode = InputMode::Normal;
                    }
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "single",
        Action::NoArg(|c| {
            c.set_selection_mode(Mode::Single);
            Ok(())
        }),
    ),
    (
        "range",
        Action::NoArg(|c| {
            c.set_selection_mode(Mode::Range);
            Ok(())
        }),
    ),
    (
        "mode",
        Action::Arg(|c, arg| {
            c.set_selection_mode(arg.parse()?);
            Ok(())
        }),
    ),
    (
        "inc",
        Action::Repeatable(|c, n| {
            for _ in 0..n {
                if !c.picker_mut().increment_end() {
                    break;
                }
            }
            Ok(())
        }),
    ),
    (
        "dec",
        Action::Repeatable(|c, n| {
            for _ in 0..n {
                if !c.picker_mut().decrement_end() {
                    break;
                }
            }
            Ok(())
        }),
    ),
    (
        "clear",
        Action::NoArg(|c| {
            c.picker_mut().clear();
            Ok(())
        }),
    ),
    (
        "pick",
        Action::Arg(|c, arg| {
            let date = parse_date(arg)?;
            c.goto(date);
            c.pick_cursor()
        }),
    ),
    (
        "goto",
        Action::Arg(|c, arg| {
            c.goto(parse_date(arg)?);
            Ok(())
        }),
    ),
    (
        "today",
        Action::NoArg(|c| {
            c.goto_today();
            Ok(())
        }),
    ),
    (
        "q",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
];
