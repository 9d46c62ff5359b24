//! Dashboard inbox: terminal input and network completions on one channel.
//!
//! A background task forwards crossterm events; network tasks send their
//! results through a cloned [`EventSender`].

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::classify::ErrorKind;
use crate::models::DeviceState;

pub type EventSender = mpsc::UnboundedSender<Event>;

/// Why a network call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Read,
    Write,
}

/// Completion of one network call for the light at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkResult {
    pub index: usize,
    pub purpose: Purpose,
    pub result: Result<DeviceState, ErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Network(NetworkResult),
    /// The terminal stopped delivering input; the dashboard cannot go on.
    InputClosed,
}

pub struct EventReader {
    tx: EventSender,
    rx: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl EventReader {
    /// Spawn the terminal reader. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let terminal_tx = tx.clone();
        let task = tokio::spawn(async move {
            let mut stream = EventStream::new();
            loop {
                let event = match stream.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        warn!(error = %err, "terminal input failed");
                        let _ = terminal_tx.send(Event::InputClosed);
                        break;
                    }
                    None => {
                        let _ = terminal_tx.send(Event::InputClosed);
                        break;
                    }
                };
                if terminal_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { tx, rx, task }
    }

    /// Handle for tasks that report back into the inbox.
    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }

    /// Next event, in arrival order.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.task.abort();
    }
}
