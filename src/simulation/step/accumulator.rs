use crate::domain::UpdateMode;

/// Steps granted for one `advance` call
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepBudget {
    pub steps: u32,
    /// Simulated seconds per step
    pub step_length: f32,
    /// Whole steps of backlog discarded by the per-frame cap
    pub dropped: u32,
}

/// Frame time -> whole simulation steps.
///
/// Fixed mode carries the sub-step remainder into the next frame, so the
/// number of steps over any run depends only on total elapsed time.
#[derive(Clone, Debug, PartialEq)]
pub struct StepAccumulator {
    mode: UpdateMode,
    fixed_step: f32,
    max_steps: u32,
    accumulated: f32,
}

impl StepAccumulator {
    pub fn new(mode: UpdateMode, fixed_step: f32, max_steps: u32) -> Self {
        Self {
            mode,
            fixed_step,
            max_steps: max_steps.max(1),
            accumulated: 0.0,
        }
    }

    /// Leftover time not yet turned into a step
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    pub fn budget(&mut self, delta_time: f32) -> StepBudget {
        // NaN and negative frame times count as no time passing
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };

        match self.mode {
            UpdateMode::Variable => StepBudget {
                steps: u32::from(delta_time > 0.0),
                step_length: delta_time,
                dropped: 0,
            },
            UpdateMode::Fixed => {
                self.accumulated += delta_time;
                let whole = (self.accumulated / self.fixed_step).floor();
                self.accumulated -= whole * self.fixed_step;
                // Rounding can leave a hair below zero
                self.accumulated = self.accumulated.max(0.0);

                let whole = if whole >= u32::MAX as f32 { u32::MAX } else { whole as u32 };
                let steps = whole.min(self.max_steps);
                StepBudget {
                    steps,
                    step_length: self.fixed_step,
                    dropped: whole - steps,
                }
            }
        }
    }
}
