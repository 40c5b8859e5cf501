use std::io::Read;
use std::sync::mpsc;
use std::thread;

use nix::sys::signal::{SigSet, Signal};
use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    Update,
    Signal(Signal),
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
    _signal_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    /// `signals` have to be blocked in every thread (see
    /// [`SigSet::thread_block`]) before this is called, otherwise they are
    /// delivered to their default handlers instead of the dispatcher.
    ///
    /// Keys are read from `input`, normally the controlling tty.
    pub fn from_config<R>(config: &Config, signals: SigSet, input: R) -> Dispatcher
    where
        R: Read + Send + 'static,
    {
        let tick_rate = config.tick_rate();
        let (tx, rx) = mpsc::channel();

        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                for evt in Input::read_all(input) {
                    match evt {
                        Ok(key) => {
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                        }
                        Err(err) => log::warn!("Unable to read input: {}", err),
                    }
                }
            })
        };

        let update_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };

        let signal_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                match signals.wait() {
                    Ok(signal) => {
                        if tx.send(Event::Signal(signal)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        log::error!("Waiting for signals failed: {}", err);
                        return;
                    }
                }
            })
        };

        Dispatcher {
            rx,
            tx,
            _input_handle: input_handle,
            _update_handle: update_handle,
            _signal_handle: signal_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn event_sink(&self) -> &mpsc::Sender<Event> {
        &self.tx
    }
}
