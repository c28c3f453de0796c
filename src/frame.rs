//! Animation-frame loop with an explicit stop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};

type Tick = Rc<RefCell<dyn FnMut(f64)>>;
type Pending = Rc<RefCell<Option<AnimationFrame>>>;

/// Calls `tick` once per display refresh until stopped or dropped.
///
/// The timestamp passed to `tick` is the `requestAnimationFrame` time in
/// milliseconds.
pub struct FrameLoop {
    pending: Pending,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start<F>(tick: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        let pending: Pending = Rc::new(RefCell::new(None));
        let running = Rc::new(Cell::new(true));
        let tick: Tick = Rc::new(RefCell::new(tick));
        schedule(&pending, &running, tick);
        Self { pending, running }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&self) {
        self.running.set(false);
        // Dropping the handle cancels the queued frame.
        self.pending.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule(pending: &Pending, running: &Rc<Cell<bool>>, tick: Tick) {
    let next_pending = Rc::clone(pending);
    let next_running = Rc::clone(running);
    let handle = request_animation_frame(move |timestamp| {
        if !next_running.get() {
            return;
        }
        {
            let mut tick_fn = tick.borrow_mut();
            (&mut *tick_fn)(timestamp);
        }
        if next_running.get() {
            schedule(&next_pending, &next_running, tick);
        }
    });
    *pending.borrow_mut() = Some(handle);
}

/// At most one queued frame at a time. Bursts of events between two
/// frames collapse into the first claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
    requested: u64,
}

impl FrameGate {
    /// Returns `true` when the caller should request a frame.
    pub fn claim(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.requested += 1;
        true
    }

    /// Reopens the gate once the frame has run or been cancelled.
    pub fn release(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Frames requested through this gate since it was created.
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_between_frames_requests_once() {
        let mut gate = FrameGate::default();
        let claims = (0..5).filter(|_| gate.claim()).count();
        assert_eq!(claims, 1);
        assert!(gate.is_pending());
        assert_eq!(gate.requested(), 1);
    }

    #[test]
    fn release_reopens_for_next_burst() {
        let mut gate = FrameGate::default();
        assert!(gate.claim());
        gate.release();
        assert!(!gate.is_pending());
        assert!(gate.claim());
        assert!(!gate.claim());
        assert_eq!(gate.requested(), 2);
    }
}
