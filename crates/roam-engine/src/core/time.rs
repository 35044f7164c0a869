/// Fixed timestep accumulator.
/// Runs the core at a steady rate regardless of display refresh rate.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Upper bound on ticks per frame after a stall.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}

/// How many core ticks a rendered frame gets.
pub enum TickMode {
    /// Exactly one tick per rendered frame; movement constants are per frame.
    PerFrame,
    /// Ticks at a fixed rate, zero or more per rendered frame.
    Fixed(FixedTimestep),
}

impl TickMode {
    pub fn from_fixed_dt(fixed_dt: Option<f32>) -> Self {
        match fixed_dt {
            Some(dt) if dt > 0.0 => TickMode::Fixed(FixedTimestep::new(dt)),
            _ => TickMode::PerFrame,
        }
    }

    /// Most ticks a single frame can run.
    pub fn max_ticks_per_frame(&self) -> u32 {
        match self {
            TickMode::PerFrame => 1,
            TickMode::Fixed(_) => FixedTimestep::MAX_STEPS,
        }
    }

    /// Number of ticks to run for a frame that took `frame_dt` seconds.
    pub fn ticks(&mut self, frame_dt: f32) -> u32 {
        match self {
            TickMode::PerFrame => 1,
            TickMode::Fixed(timestep) => timestep.accumulate(frame_dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), FixedTimestep::MAX_STEPS);
    }

    #[test]
    fn per_frame_ignores_frame_time() {
        let mut mode = TickMode::from_fixed_dt(None);
        assert_eq!(mode.ticks(0.5), 1);
        assert_eq!(mode.ticks(0.0001), 1);
    }

    #[test]
    fn non_positive_fixed_dt_falls_back_to_per_frame() {
        assert!(matches!(TickMode::from_fixed_dt(Some(0.0)), TickMode::PerFrame));
        assert!(matches!(TickMode::from_fixed_dt(Some(1.0 / 120.0)), TickMode::Fixed(_)));
    }

    #[test]
    fn max_ticks_per_frame_follows_mode() {
        assert_eq!(TickMode::from_fixed_dt(None).max_ticks_per_frame(), 1);
        assert_eq!(
            TickMode::from_fixed_dt(Some(1.0 / 60.0)).max_ticks_per_frame(),
            FixedTimestep::MAX_STEPS
        );
    }
}
