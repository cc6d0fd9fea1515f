//! Input scripting
//!
//! Replays the input layer's behavior on a simulation clock: held
//! accel/brake windows (level-style) and timed button presses
//! (edge-style), queried by the harness as sim time advances.

use cruisectl_core::ControlRequests;

/// A window during which a set of requests is held.
#[derive(Debug, Clone, Copy)]
struct HoldWindow {
    from_us: u64,
    until_us: u64,
    requests: ControlRequests,
}

/// A button press delivered once at a point in sim time.
#[derive(Debug, Clone, Copy)]
struct ButtonEvent {
    at_us: u64,
    requests: ControlRequests,
}

/// Timed input script for a simulation run.
#[derive(Debug, Default)]
pub struct InputScript {
    holds: Vec<HoldWindow>,
    events: Vec<ButtonEvent>,
    next_event: usize,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `requests` from `from_us` (inclusive) to `until_us` (exclusive).
    pub fn hold(mut self, from_us: u64, until_us: u64, requests: ControlRequests) -> Self {
        self.holds.push(HoldWindow {
            from_us,
            until_us,
            requests,
        });
        self
    }

    /// Press buttons once at `at_us`.
    pub fn press(mut self, at_us: u64, requests: ControlRequests) -> Self {
        self.events.push(ButtonEvent { at_us, requests });
        self.events.sort_by_key(|event| event.at_us);
        self
    }

    /// Union of all requests held at `sim_time_us`.
    pub fn held_at(&self, sim_time_us: u64) -> ControlRequests {
        self.holds
            .iter()
            .filter(|window| window.from_us <= sim_time_us && sim_time_us < window.until_us)
            .fold(ControlRequests::empty(), |acc, window| {
                acc | window.requests
            })
    }

    /// Take the button presses due at or before `sim_time_us`, each
    /// delivered exactly once, in press order.
    pub fn take_due_presses(&mut self, sim_time_us: u64) -> Vec<ControlRequests> {
        let mut due = Vec::new();
        while let Some(event) = self.events.get(self.next_event) {
            if event.at_us > sim_time_us {
                break;
            }
            due.push(event.requests);
            self.next_event += 1;
        }
        due
    }

    /// True once every scripted press has been delivered.
    pub fn presses_exhausted(&self) -> bool {
        self.next_event >= self.events.len()
    }
}
