// Frame loop tests with a virtual clock and a recording scheduler.

mod common;

use common::core::driver::{
    Clock, FrameOutcome, FrameScheduler, FrameTarget, LaunchGate, LoopState, ManualClock, RenderLoop,
};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

struct FakeScheduler {
    log: Log,
    fail: bool,
    cancelled: bool,
}

impl FrameScheduler for FakeScheduler {
    fn schedule_next(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push("schedule".into());
        if self.fail {
            anyhow::bail!("no animation frame");
        }
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancelled = true;
        self.log.borrow_mut().push("cancel".into());
    }
}

struct FakeTarget {
    log: Log,
    times: Vec<f32>,
    fail_renders: bool,
}

impl FrameTarget for FakeTarget {
    fn update(&mut self, time: f32) {
        self.times.push(time);
        self.log.borrow_mut().push("update".into());
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push("render".into());
        if self.fail_renders {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }
}

fn setup() -> (Log, ManualClock, RenderLoop<ManualClock, FakeScheduler>, FakeTarget) {
    let log: Log = Rc::default();
    let clock = ManualClock::default();
    let driver = RenderLoop::new(
        clock.clone(),
        FakeScheduler {
            log: log.clone(),
            fail: false,
            cancelled: false,
        },
    );
    let target = FakeTarget {
        log: log.clone(),
        times: Vec::new(),
        fail_renders: false,
    };
    (log, clock, driver, target)
}

#[test]
fn next_frame_is_scheduled_before_any_work() {
    let (log, _clock, mut driver, mut target) = setup();
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Rendered);
    assert_eq!(*log.borrow(), ["schedule", "update", "render"]);
}

#[test]
fn start_requests_the_first_frame() {
    let (log, _clock, mut driver, _target) = setup();
    driver.start().unwrap();
    assert_eq!(*log.borrow(), ["schedule"]);
    assert_eq!(driver.state(), LoopState::Running);
}

#[test]
fn update_receives_clock_time() {
    let (_log, clock, mut driver, mut target) = setup();
    driver.run_frame(&mut target);
    clock.advance(0.5);
    driver.run_frame(&mut target);
    clock.set(10.25);
    driver.run_frame(&mut target);
    assert_eq!(target.times, [0.0, 0.5, 10.25]);
    assert_eq!(clock.elapsed_secs(), 10.25);
}

#[test]
fn failing_render_skips_frame_but_keeps_chain() {
    let (log, _clock, mut driver, mut target) = setup();
    target.fail_renders = true;
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Skipped);
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Skipped);
    target.fail_renders = false;
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Rendered);

    assert_eq!(driver.frames_skipped(), 2);
    assert_eq!(driver.frames_rendered(), 1);
    assert_eq!(driver.state(), LoopState::Running);
    let schedules = log.borrow().iter().filter(|e| *e == "schedule").count();
    assert_eq!(schedules, 3);
}

#[test]
fn scheduler_failure_does_not_block_the_frame() {
    let (log, _clock, mut driver, mut target) = setup();
    driver.scheduler_mut().fail = true;
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Rendered);
    assert_eq!(*log.borrow(), ["schedule", "update", "render"]);
}

#[test]
fn stop_cancels_and_halts_further_frames() {
    let (log, _clock, mut driver, mut target) = setup();
    driver.run_frame(&mut target);
    driver.stop();
    assert!(driver.scheduler().cancelled);
    assert_eq!(driver.state(), LoopState::Stopped);

    log.borrow_mut().clear();
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Halted);
    assert!(log.borrow().is_empty());
    assert_eq!(target.times.len(), 1);

    // Start after stop stays stopped; a second stop is a no-op.
    driver.start().unwrap();
    driver.stop();
    assert!(log.borrow().is_empty());
}

#[test]
fn manual_clock_clones_share_time() {
    let a = ManualClock::default();
    let b = a.clone();
    a.advance(1.5);
    b.advance(0.5);
    assert_eq!(a.elapsed_secs(), 2.0);
    assert_eq!(b.elapsed_secs(), 2.0);
}

#[test]
fn stop_before_launch_never_schedules() {
    let (log, _clock, mut driver, mut target) = setup();
    let gate = LaunchGate::default();
    // Stop arrives from a clone while init is still pending.
    gate.clone().request_stop();

    assert_eq!(gate.launch(&mut driver).unwrap(), LoopState::Stopped);
    assert_eq!(driver.run_frame(&mut target), FrameOutcome::Halted);
    assert!(!log.borrow().iter().any(|e| e == "schedule"));
    assert!(target.times.is_empty());
}

#[test]
fn launch_without_stop_starts_the_chain() {
    let (log, _clock, mut driver, _target) = setup();
    let gate = LaunchGate::default();
    assert!(!gate.stop_requested());
    assert_eq!(gate.launch(&mut driver).unwrap(), LoopState::Running);
    assert_eq!(*log.borrow(), ["schedule"]);
}
