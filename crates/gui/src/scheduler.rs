//! Per-frame render loops with explicit, cancelable handles.
//!
//! Every animated surface owns exactly one [`LoopHandle`]. The app ticks the
//! scheduler once per egui frame and each owner asks [`FrameScheduler::is_running`]
//! before stepping its scene. Cancelling is synchronous: once `cancel` returns,
//! the loop is gone and will never be stepped again.

use std::collections::BTreeMap;

/// Identifier of a scheduled loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoopId(u64);

/// Owning handle to a scheduled loop. Deliberately not `Clone`.
#[derive(Debug)]
pub struct LoopHandle {
    id: LoopId,
    cancelled: bool,
}

impl LoopHandle {
    pub fn id(&self) -> LoopId {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Registry of live render loops plus a global frame counter
#[derive(Debug, Default)]
pub struct FrameScheduler {
    loops: BTreeMap<LoopId, &'static str>,
    next_id: u64,
    frame: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new loop. `label` is only used for logging.
    pub fn schedule(&mut self, label: &'static str) -> LoopHandle {
        self.next_id += 1;
        let id = LoopId(self.next_id);
        self.loops.insert(id, label);
        tracing::debug!("Scheduled {label} loop {:?}", id);
        LoopHandle {
            id,
            cancelled: false,
        }
    }

    /// Stop a loop. Returns `false` if it was already stopped.
    pub fn cancel(&mut self, handle: &mut LoopHandle) -> bool {
        if handle.cancelled {
            return false;
        }
        handle.cancelled = true;
        match self.loops.remove(&handle.id) {
            Some(label) => {
                tracing::debug!("Cancelled {label} loop {:?}", handle.id);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, handle: &LoopHandle) -> bool {
        !handle.cancelled && self.loops.contains_key(&handle.id)
    }

    /// Number of loops that will be stepped on the next frame
    pub fn active_count(&self) -> usize {
        self.loops.len()
    }

    /// Advance the frame counter; returns the new frame number
    pub fn begin_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Drop every loop (window teardown)
    pub fn cancel_all(&mut self) {
        if !self.loops.is_empty() {
            tracing::debug!("Cancelling {} remaining loops", self.loops.len());
        }
        self.loops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_cancel() {
        let mut s = FrameScheduler::new();
        let mut a = s.schedule("preview");
        let b = s.schedule("background");
        assert_eq!(s.active_count(), 2);
        assert!(s.is_running(&a));

        assert!(s.cancel(&mut a));
        assert!(!s.is_running(&a));
        assert!(s.is_running(&b));
        assert_eq!(s.active_count(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut s = FrameScheduler::new();
        let mut a = s.schedule("preview");
        assert!(s.cancel(&mut a));
        assert!(!s.cancel(&mut a));
        assert!(a.is_cancelled());
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut s = FrameScheduler::new();
        let mut a = s.schedule("preview");
        let first = a.id();
        s.cancel(&mut a);
        let b = s.schedule("preview");
        assert_ne!(first, b.id());
    }

    #[test]
    fn test_cancel_all_stops_handles() {
        let mut s = FrameScheduler::new();
        let a = s.schedule("preview");
        s.cancel_all();
        assert!(!s.is_running(&a));
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn test_frame_counter() {
        let mut s = FrameScheduler::new();
        assert_eq!(s.frame(), 0);
        assert_eq!(s.begin_frame(), 1);
        assert_eq!(s.begin_frame(), 2);
    }
}
