use std::time::Instant;

/// Frame clock - feeds `update(delta)` once per rendered frame
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    frames: u64,
}

impl FrameClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frames: 0,
        }
    }

    /// Seconds since the previous tick; advances the frame counter
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frames += 1;
        delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Average frame rate since creation
    pub fn average_fps(&self) -> f32 {
        let elapsed = self.elapsed();
        if elapsed > 0.0 {
            self.frames as f32 / elapsed
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
