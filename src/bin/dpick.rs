extern crate datepick as lib;

use chrono::{Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::events::Dispatcher;
use lib::picker::{parse_date, Mode, Picker};
use lib::ui::App;
use nix::sys::{signal, termios};
use std::io::{self, stdout, Write};
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dpick",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Pick a date or a date range in the terminal and print it as dd/mm/yyyy-dd/mm/yyyy."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "m",
        long = "mode",
        help = "selection mode to start in ('single' or 'range')"
    )]
    pub mode: Option<Mode>,

    #[structopt(
        long = "min-date",
        help = "earliest selectable date as dd/mm/yyyy (default: today)",
        parse(try_from_str = parse_date)
    )]
    pub min_date: Option<NaiveDate>,

    #[structopt(long = "no-print", help = "do not print the selection on exit")]
    pub no_print: bool,

    #[structopt(
        long = "log-file",
        help = "path to log file (default: datepick/dpick.log in the cache directory)",
        parse(from_os_str)
    )]
    pub log_file: Option<PathBuf>,
}

/// Writes the picked range to `out`, which carries nothing else.
fn print_selection<W: Write>(out: &mut W, enabled: bool, selection: &str) -> io::Result<()> {
    if enabled && !selection.is_empty() {
        writeln!(out, "{}", selection)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let explicit_log = args.log_file.is_some();
    let log_file = lib::config::log_file_location(args.log_file);
    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(log_file)?)
        .append();
    if explicit_log {
        logger = logger.print_message();
    }

    let _logger = logger.start()?;

    // The UI runs on the controlling tty, stdout only gets the result
    let tty = termion::get_tty()?;
    let tty_fd = tty.as_raw_fd();
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(tty_fd)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        if let Ok(mut tty) = termion::get_tty() {
            let _ = write!(tty, "{}{}", termion::screen::ToMainScreen, termion::cursor::Show);
        }

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(tty_fd, termios::SetArg::TCSANOW, &attr);
        }

        eprintln!("dpick ran into a fatal error!");
        eprintln!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    let min_date = args
        .min_date
        .or(config.min_date)
        .unwrap_or_else(|| Local::now().date_naive());
    let picker = Picker::new(min_date).with_mode(config.mode);

    // Must be blocked before the dispatcher spawns its threads
    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);
    signals_to_wait.thread_block()?;

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait, tty.try_clone()?);

    // Setup unsegen terminal
    let term = Terminal::new(tty)?;

    let app = App::new(&config, picker);
    let selection = app.run(dispatcher, term)?;

    print_selection(
        &mut stdout().lock(),
        config.print_on_exit && !args.no_print,
        &selection,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(enabled: bool, selection: &str) -> String {
        let mut out = Vec::new();
        print_selection(&mut out, enabled, selection).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_only_the_range() {
        assert_eq!(
            printed(true, "01/01/2024-05/01/2024"),
            "01/01/2024-05/01/2024\n"
        );
    }

    #[test]
    fn prints_nothing_when_empty_or_disabled() {
        assert_eq!(printed(true, ""), "");
        assert_eq!(printed(false, "01/01/2024-01/01/2024"), "");
    }
}
