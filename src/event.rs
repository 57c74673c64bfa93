use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::input::KeyInput;

pub enum AppEvent {
    /// One logical key press; Release and Repeat are filtered at this
    /// boundary so the dispatch chain sees each physical press once.
    Input(KeyInput),
    Tick,
    Resize,
}

pub struct EventPump {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventPump {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if let Some(input) = KeyInput::from_crossterm(&key) {
                                if tx.send(AppEvent::Input(input)).is_err() {
                                    return;
                                }
                            }
                        }
                        Ok(Event::Resize(_, _)) => {
                            if tx.send(AppEvent::Resize).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
