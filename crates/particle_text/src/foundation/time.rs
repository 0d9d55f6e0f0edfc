//! Frame timing utilities

use std::time::Instant;

/// How a [`FrameTimer`] produces its delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    /// Measure wall-clock time between ticks
    Realtime,
    /// Report the same delta every tick (headless runs, tests)
    Fixed(f32),
}

/// Frame timer feeding `delta_time` into the per-frame update calls
pub struct FrameTimer {
    source: TimeSource,
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a wall-clock timer
    pub fn realtime() -> Self {
        Self::with_source(TimeSource::Realtime)
    }

    /// Create a timer that advances by `delta` seconds every tick
    pub fn fixed(delta: f32) -> Self {
        Self::with_source(TimeSource::Fixed(delta.max(0.0)))
    }

    fn with_source(source: TimeSource) -> Self {
        Self {
            source,
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame and return the new delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = match self.source {
            TimeSource::Realtime => now.duration_since(self.last_frame).as_secs_f32(),
            TimeSource::Fixed(delta) => delta,
        };
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::realtime()
    }
}
