//! Terminal event subscription.
//!
//! Wraps crossterm events into a simpler enum and reads them on a blocking
//! task that forwards them over a channel, so the main loop stays
//! non-blocking.  The reader lives exactly as long as its
//! [`EventSubscription`]: dropping the subscription stops it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// No input within one frame.
    Tick,
}

/// Live subscription to terminal input.
pub struct EventSubscription {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    stop: Arc<AtomicBool>,
}

impl EventSubscription {
    /// Start reading terminal events.  A `Tick` is sent whenever nothing
    /// arrives within `tick_rate`.
    pub fn spawn(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        let reader_stop = Arc::clone(&stop);

        tokio::task::spawn_blocking(move || {
            while !reader_stop.load(Ordering::Relaxed) {
                let has_event = event::poll(tick_rate).unwrap_or(false);
                let app_event = if has_event {
                    match event::read() {
                        Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                        Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                        Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                        _ => continue,
                    }
                } else {
                    AppEvent::Tick
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
            tracing::debug!("event reader stopped");
        });

        Self { rx, stop }
    }

    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Everything already queued, without waiting.
    pub fn try_recv(&mut self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.rx.close();
    }
}
