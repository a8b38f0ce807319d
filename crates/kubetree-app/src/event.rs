use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Merges terminal input and periodic ticks into one channel for the app loop.
///
/// Input is read on a dedicated thread that owns `poll`/`read` for the whole
/// session, so an event that has been read is always delivered.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self::with_input(tick_rate, terminal_event)
    }

    fn with_input<F>(tick_rate: Duration, next_event: F) -> Self
    where
        F: FnMut(Duration) -> io::Result<Option<Event>> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        let input_tx = tx.clone();
        std::thread::spawn(move || read_input(input_tx, next_event));

        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(tick_rate);
            loop {
                ticks.tick().await;
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> anyhow::Result<AppEvent> {
        self.rx.recv().await.ok_or_else(|| anyhow::anyhow!("Event channel closed"))
    }
}

fn terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

// Runs until the receiver is dropped or the input source fails.
fn read_input<F>(tx: mpsc::UnboundedSender<AppEvent>, mut next_event: F)
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        let event = match next_event(INPUT_POLL) {
            Ok(Some(Event::Key(key))) => AppEvent::Key(key),
            Ok(Some(Event::Resize(_, _))) => AppEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("terminal input unavailable: {e}");
                break;
            }
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}
