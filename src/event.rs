use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub enum HostEvent {
    /// One submitted line from stdin, newline stripped.
    Line(String),
    Tick,
    Eof,
}

/// Multiplexes a stdin reader thread and a ticker thread onto one channel,
/// so the host loop sees a single serial event stream.
pub struct EventHandler {
    rx: mpsc::Receiver<HostEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let ticker_tx = tx.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(tick_rate);
                if ticker_tx.send(HostEvent::Tick).is_err() {
                    return;
                }
            }
        });

        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(HostEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = tx.send(HostEvent::Eof);
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<HostEvent> {
        Ok(self.rx.recv()?)
    }
}
