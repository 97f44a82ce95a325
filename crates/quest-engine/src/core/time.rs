/// Wall-clock accumulator.
/// Converts variable frame deltas (seconds) into whole milliseconds for timers,
/// carrying the sub-millisecond remainder into the next frame.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Fractional milliseconds not yet handed out.
    carry_ms: f64,
    /// Total whole milliseconds handed out so far.
    elapsed_ms: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add frame time. Returns the whole milliseconds elapsed this frame.
    /// Non-positive or non-finite deltas advance nothing.
    pub fn advance(&mut self, frame_dt: f32) -> u64 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        let total = self.carry_ms + frame_dt as f64 * 1000.0;
        let whole = total.floor();
        self.carry_ms = total - whole;
        let step = whole as u64;
        self.elapsed_ms = self.elapsed_ms.saturating_add(step);
        step
    }

    /// Total milliseconds elapsed since construction.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_milliseconds() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.25), 250);
        assert_eq!(clock.elapsed_ms(), 250);
    }

    #[test]
    fn carries_fraction() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.0625), 62); // 62.5 ms
        assert_eq!(clock.advance(0.0625), 63);
        assert_eq!(clock.elapsed_ms(), 125);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
        assert_eq!(clock.elapsed_ms(), 0);
    }

    #[test]
    fn long_frames_are_not_capped() {
        // A backgrounded tab resumes with one huge delta; timers must still see it all.
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(10.0), 10_000);
    }

    #[test]
    fn huge_deltas_saturate() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(f32::MAX), u64::MAX);
        clock.advance(f32::MAX);
        assert_eq!(clock.elapsed_ms(), u64::MAX);
    }
}
