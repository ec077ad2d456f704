//! Throttled viewport signal.
//!
//! Raw scroll/resize notifications are coalesced: the first notification of
//! a burst arms a deadline `window` later, further notifications inside the
//! window are absorbed, and the scroll position is sampled only when the
//! host polls past the deadline.  The host owns the clock, so the throttle
//! is a plain value the event loop can wait on (`next_deadline`).

use std::time::{Duration, Instant};

/// Vertical scroll direction derived from consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    None,
    Up,
    Down,
}

/// Snapshot produced on every emitted tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_y: f64,
    pub last_scroll_y: f64,
    pub direction: ScrollDirection,
    /// Extra sticky offset below the primary header: the expanded value
    /// while the category bar is shown, zero while it is tucked away.
    pub sticky_boundary_px: f64,
}

#[derive(Debug, Clone)]
pub struct ViewportSignal {
    window: Duration,
    expanded_offset: f64,
    /// Arrival time of the first raw event not yet emitted.
    pending_since: Option<Instant>,
    state: ViewportState,
}

impl ViewportSignal {
    /// The bar starts shown, so the boundary starts expanded.
    pub fn new(window: Duration, expanded_offset: f64, scroll_y: f64) -> Self {
        Self {
            window,
            expanded_offset,
            pending_since: None,
            state: ViewportState {
                scroll_y,
                last_scroll_y: scroll_y,
                direction: ScrollDirection::None,
                sticky_boundary_px: expanded_offset,
            },
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Record a raw scroll or resize event.
    pub fn notify(&mut self, now: Instant) {
        if self.pending_since.is_none() {
            self.pending_since = Some(now);
        }
    }

    /// When the pending burst is due for emission.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_since.map(|first| first + self.window)
    }

    /// Emit a tick if the pending burst is due.  `scroll_y` is read at the
    /// time of emission.
    pub fn poll(&mut self, now: Instant, scroll_y: f64) -> Option<ViewportState> {
        let deadline = self.next_deadline()?;
        if now < deadline {
            return None;
        }
        self.pending_since = None;
        Some(self.sample(scroll_y))
    }

    /// Take a sample immediately, bypassing the throttle.
    pub fn sample(&mut self, scroll_y: f64) -> ViewportState {
        let previous = self.state.scroll_y;
        let direction = if scroll_y < previous {
            ScrollDirection::Up
        } else if scroll_y > previous {
            ScrollDirection::Down
        } else {
            self.state.direction
        };
        let sticky_boundary_px = match direction {
            ScrollDirection::Up => self.expanded_offset,
            ScrollDirection::Down => 0.0,
            ScrollDirection::None => self.state.sticky_boundary_px,
        };
        self.state = ViewportState {
            scroll_y,
            last_scroll_y: previous,
            direction,
            sticky_boundary_px,
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(50);

    #[test]
    fn decreasing_samples_scroll_up_and_expand_boundary() {
        let mut signal = ViewportSignal::new(WINDOW, 40.0, 1000.0);
        for y in [900.0, 800.0, 700.0] {
            signal.sample(y);
        }
        let state = signal.state();
        assert_eq!(state.direction, ScrollDirection::Up);
        assert_eq!(state.sticky_boundary_px, 40.0);
        assert_eq!(state.last_scroll_y, 800.0);
    }

    #[test]
    fn increasing_samples_scroll_down_and_collapse_boundary() {
        let mut signal = ViewportSignal::new(WINDOW, 40.0, 0.0);
        for y in [10.0, 20.0, 30.0] {
            signal.sample(y);
        }
        assert_eq!(signal.state().direction, ScrollDirection::Down);
        assert_eq!(signal.state().sticky_boundary_px, 0.0);
    }

    #[test]
    fn equal_sample_keeps_previous_direction() {
        let mut signal = ViewportSignal::new(WINDOW, 40.0, 0.0);
        signal.sample(50.0);
        let state = signal.sample(50.0);
        assert_eq!(state.direction, ScrollDirection::Down);
        assert_eq!(state.sticky_boundary_px, 0.0);
    }

    #[test]
    fn burst_is_coalesced_into_one_emission_at_deadline() {
        let t0 = Instant::now();
        let mut signal = ViewportSignal::new(WINDOW, 40.0, 0.0);

        signal.notify(t0);
        signal.notify(t0 + Duration::from_millis(10));
        signal.notify(t0 + Duration::from_millis(30));
        assert_eq!(signal.next_deadline(), Some(t0 + WINDOW));

        assert!(signal.poll(t0 + Duration::from_millis(49), 10.0).is_none());
        let state = signal.poll(t0 + Duration::from_millis(66), 120.0).unwrap();
        assert_eq!(state.scroll_y, 120.0);
        assert!(signal.next_deadline().is_none());

        // Nothing new arrived: no further emissions.
        assert!(signal.poll(t0 + Duration::from_millis(200), 120.0).is_none());
    }

    #[test]
    fn at_most_one_emission_per_window() {
        let t0 = Instant::now();
        let mut signal = ViewportSignal::new(WINDOW, 40.0, 0.0);
        let mut emitted = Vec::new();
        // A raw event every 5 ms for 300 ms, polled every 5 ms.
        for ms in (0..300).step_by(5) {
            let now = t0 + Duration::from_millis(ms);
            signal.notify(now);
            if signal.poll(now, ms as f64).is_some() {
                emitted.push(ms);
            }
        }
        assert!(!emitted.is_empty());
        for pair in emitted.windows(2) {
            assert!(pair[1] - pair[0] >= 50, "emissions too close: {pair:?}");
        }
    }
}
