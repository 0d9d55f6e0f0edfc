//! Formation phase state machine
//!
//! Phases only move forward: `Spawning -> Settled` for the sequential
//! variant, `Forming -> Settled` otherwise. Re-creating a point set builds a
//! fresh state instead of rewinding this one.

/// Where a point set is in its formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormationPhase {
    /// Points are still being revealed one by one
    Spawning,
    /// All points exist and the spring boost is decaying
    Forming,
    /// Steady state; only the base spring applies
    Settled,
}

/// Formation progress of one point set
#[derive(Debug, Clone, PartialEq)]
pub struct FormationState {
    phase: FormationPhase,
    elapsed_ms: f32,
    duration_ms: f32,
    spawn_progress: f32,
}

impl FormationState {
    /// Start forming all points at once
    pub fn forming(duration_ms: f32) -> Self {
        let mut state = Self {
            phase: FormationPhase::Forming,
            elapsed_ms: 0.0,
            duration_ms: duration_ms.max(0.0),
            spawn_progress: 1.0,
        };
        state.advance(0.0);
        state
    }

    /// Start revealing points one by one
    pub fn spawning() -> Self {
        Self {
            phase: FormationPhase::Spawning,
            elapsed_ms: 0.0,
            duration_ms: 0.0,
            spawn_progress: 0.0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> FormationPhase {
        self.phase
    }

    /// Time since formation started
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Configured length of the spring boost
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// True once the terminal phase is reached
    pub fn is_settled(&self) -> bool {
        self.phase == FormationPhase::Settled
    }

    /// Formation progress in `[0, 1]`, never decreasing
    pub fn progress(&self) -> f32 {
        match self.phase {
            FormationPhase::Spawning => self.spawn_progress,
            FormationPhase::Forming if self.duration_ms > 0.0 => {
                (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
            }
            FormationPhase::Forming | FormationPhase::Settled => 1.0,
        }
    }

    /// Advance the formation clock
    ///
    /// Negative deltas are ignored so a misbehaving frame clock can only
    /// delay settling.
    pub fn advance(&mut self, delta_ms: f32) {
        if delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        if self.phase == FormationPhase::Forming && self.elapsed_ms >= self.duration_ms {
            self.settle();
        }
    }

    /// Report the fraction of points revealed so far
    pub fn set_spawn_progress(&mut self, fraction: f32) {
        if self.phase == FormationPhase::Spawning {
            self.spawn_progress = self.spawn_progress.max(fraction.clamp(0.0, 1.0));
        }
    }

    /// Mark the reveal as finished
    pub fn finish_spawning(&mut self) {
        if self.phase == FormationPhase::Spawning {
            self.spawn_progress = 1.0;
            self.settle();
        }
    }

    fn settle(&mut self) {
        if self.phase != FormationPhase::Settled {
            log::debug!("Formation settled after {:.0} ms", self.elapsed_ms);
            self.phase = FormationPhase::Settled;
        }
    }
}
