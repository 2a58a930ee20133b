use carvis_types::Pacing;

/// Decides how long to pause after a frame is presented.
///
/// Pure millisecond arithmetic; the composer feeds it a monotonic clock.
#[derive(Debug, Clone)]
pub struct FramePacer {
    pacing: Pacing,
    interval_ms: u64,
    last_tick_ms: u64,
    has_ticked: bool,
}

impl FramePacer {
    pub fn new(pacing: Pacing, interval_ms: u64) -> Self {
        Self {
            pacing,
            interval_ms,
            last_tick_ms: 0,
            has_ticked: false,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Record a present at `now_ms` and return the pause that should follow it.
    ///
    /// - `Delay`: always the full interval.
    /// - `Cadence`: the interval minus the time spent since the previous pause
    ///   ended, so presents land at most once per interval. The first present
    ///   waits the full interval.
    pub fn pause_after_present(&mut self, now_ms: u64) -> u64 {
        let pause = match self.pacing {
            Pacing::Delay => self.interval_ms,
            Pacing::Cadence if !self.has_ticked => self.interval_ms,
            Pacing::Cadence => {
                let elapsed = now_ms.saturating_sub(self.last_tick_ms);
                self.interval_ms.saturating_sub(elapsed)
            }
        };
        self.has_ticked = true;
        self.last_tick_ms = now_ms.saturating_add(pause);
        pause
    }
}
