//! Play/pause/reset state machine shared by both simulators
//!
//! The driver owns the simulation. Each display frame the host calls
//! [`Driver::frame`], which integrates one step while running and tells the
//! host whether the scene needs to be redrawn.

/// A fixed-step simulation the driver can advance
pub trait Simulation {
    /// Advance by one fixed step using the current controls
    fn step(&mut self);
    /// Return all dynamic state to its initial value (controls are kept)
    fn reset(&mut self);
}

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPhase {
    /// Not integrating: initial, paused, or just reset
    #[default]
    Idle,
    /// Integrating once per frame
    Running,
}

/// Owns a simulation and its loop state
#[derive(Debug, Clone)]
pub struct Driver<S> {
    sim: S,
    phase: LoopPhase,
    /// Scene changed while idle and has not been drawn yet
    dirty: bool,
    /// Steps integrated since the last reset
    ticks: u64,
}

impl<S: Simulation> Driver<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            phase: LoopPhase::Idle,
            dirty: true,
            ticks: 0,
        }
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn play(&mut self) {
        if self.phase != LoopPhase::Running {
            log::info!("Simulation running");
            self.phase = LoopPhase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase != LoopPhase::Idle {
            log::info!("Simulation paused after {} ticks", self.ticks);
            self.phase = LoopPhase::Idle;
            self.dirty = true;
        }
    }

    /// Play/pause button
    pub fn toggle(&mut self) {
        match self.phase {
            LoopPhase::Idle => self.play(),
            LoopPhase::Running => self.pause(),
        }
    }

    /// Stop and clear dynamic state
    pub fn reset(&mut self) {
        self.phase = LoopPhase::Idle;
        self.sim.reset();
        self.ticks = 0;
        self.dirty = true;
        log::info!("Simulation reset");
    }

    /// Mutate controls or fire an action; marks the scene for redraw
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        self.dirty = true;
        f(&mut self.sim)
    }

    /// Run one display frame. Returns true when the scene should be drawn.
    pub fn frame(&mut self) -> bool {
        match self.phase {
            LoopPhase::Running => {
                self.sim.step();
                self.ticks += 1;
                self.dirty = false;
                true
            }
            LoopPhase::Idle => std::mem::take(&mut self.dirty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        steps: u32,
        knob: f64,
    }

    impl Simulation for Counter {
        fn step(&mut self) {
            self.steps += 1;
        }

        fn reset(&mut self) {
            self.steps = 0;
        }
    }

    #[test]
    fn test_idle_never_steps() {
        let mut driver = Driver::new(Counter::default());
        assert_eq!(driver.phase(), LoopPhase::Idle);

        // First frame draws the initial scene, later ones draw nothing
        assert!(driver.frame());
        for _ in 0..10 {
            assert!(!driver.frame());
        }
        assert_eq!(driver.sim().steps, 0);
    }

    #[test]
    fn test_play_pause_freezes_state() {
        let mut driver = Driver::new(Counter::default());
        driver.toggle();
        assert!(driver.is_running());
        for _ in 0..5 {
            assert!(driver.frame());
        }
        driver.toggle();
        assert_eq!(driver.phase(), LoopPhase::Idle);
        for _ in 0..5 {
            driver.frame();
        }
        assert_eq!(driver.sim().steps, 5);
        assert_eq!(driver.ticks(), 5);

        // Resuming continues from the frozen state
        driver.play();
        driver.frame();
        assert_eq!(driver.sim().steps, 6);
    }

    #[test]
    fn test_edit_while_idle_requests_one_redraw() {
        let mut driver = Driver::new(Counter::default());
        driver.frame();
        driver.edit(|c| c.knob = 3.0);
        assert!(driver.frame());
        assert!(!driver.frame());
        assert_eq!(driver.sim().knob, 3.0);
        assert_eq!(driver.sim().steps, 0);
    }

    #[test]
    fn test_reset_from_running() {
        let mut driver = Driver::new(Counter::default());
        driver.play();
        driver.frame();
        driver.frame();
        driver.reset();
        assert_eq!(driver.phase(), LoopPhase::Idle);
        assert_eq!(driver.sim().steps, 0);
        assert_eq!(driver.ticks(), 0);
        assert!(driver.frame());
        assert_eq!(driver.sim().steps, 0);
    }
}
