use std::cell::Cell;
use std::rc::Rc;

/// Monotonic seconds since the scene started.
pub trait Clock {
    fn elapsed_secs(&self) -> f64;
}

/// Wall clock backed by `instant` (performance.now() on the web).
pub struct InstantClock {
    start: instant::Instant,
}

impl InstantClock {
    pub fn start() -> Self {
        Self {
            start: instant::Instant::now(),
        }
    }
}

impl Clock for InstantClock {
    fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Virtual clock advanced by hand; clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&self) -> f64 {
        self.now.get()
    }
}

/// "Call me again next frame" primitive.
pub trait FrameScheduler {
    fn schedule_next(&mut self) -> anyhow::Result<()>;
    /// Drop any pending request; no frame may run after this returns.
    fn cancel(&mut self);
}

/// Per-frame work the driver sequences: update first, render second.
pub trait FrameTarget {
    fn update(&mut self, time: f32);
    fn render(&mut self) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// Rendering failed; the frame was dropped and the chain kept alive.
    Skipped,
    /// The loop was stopped; nothing ran and nothing was scheduled.
    Halted,
}

/// Remembers a stop that arrives before the loop exists, e.g. while the GPU
/// is still initializing. Clones share the same flag.
#[derive(Clone, Default)]
pub struct LaunchGate {
    stop_requested: Rc<Cell<bool>>,
}

impl LaunchGate {
    pub fn request_stop(&self) {
        self.stop_requested.set(true);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.get()
    }

    /// Start `driver` unless a stop came first, in which case it is stopped
    /// without ever scheduling a frame.
    pub fn launch<C: Clock, S: FrameScheduler>(
        &self,
        driver: &mut RenderLoop<C, S>,
    ) -> anyhow::Result<LoopState> {
        if self.stop_requested() {
            driver.stop();
        } else {
            driver.start()?;
        }
        Ok(driver.state())
    }
}

/// Frame chain driver. Starts `Running`; only an explicit `stop` ends it.
pub struct RenderLoop<C: Clock, S: FrameScheduler> {
    clock: C,
    scheduler: S,
    state: LoopState,
    frames_rendered: u64,
    frames_skipped: u64,
}

impl<C: Clock, S: FrameScheduler> RenderLoop<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            clock,
            scheduler,
            state: LoopState::Running,
            frames_rendered: 0,
            frames_skipped: 0,
        }
    }

    /// Request the first frame.
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.state == LoopState::Running {
            self.scheduler.schedule_next()?;
        }
        Ok(())
    }

    /// One iteration. The next frame is requested before any work, so a
    /// failing frame cannot break the chain.
    pub fn run_frame<T: FrameTarget>(&mut self, target: &mut T) -> FrameOutcome {
        if self.state == LoopState::Stopped {
            return FrameOutcome::Halted;
        }
        if let Err(e) = self.scheduler.schedule_next() {
            log::error!("[loop] could not schedule next frame: {e:?}");
        }

        let time = self.clock.elapsed_secs() as f32;
        target.update(time);
        match target.render() {
            Ok(()) => {
                self.frames_rendered += 1;
                FrameOutcome::Rendered
            }
            Err(e) => {
                self.frames_skipped += 1;
                log::warn!("[loop] frame skipped: {e:?}");
                FrameOutcome::Skipped
            }
        }
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.scheduler.cancel();
            self.state = LoopState::Stopped;
            log::info!(
                "[loop] stopped after {} frames ({} skipped)",
                self.frames_rendered,
                self.frames_skipped
            );
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
