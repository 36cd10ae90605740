//! Session-scoped deferred tasks.
//!
//! Cosmetic resets used to be bare fire-and-forget timers that could race a
//! technique switch and apply a stale visual change. Here every task carries
//! the session id of the technique activation that scheduled it; ending a
//! session cancels its tasks, and the arbiter drains due tasks once per
//! frame for the render/UI layer to act on.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Fade out the full-screen flash overlay.
    ClearFlashOverlay,
    /// Return the technique label to its resting font scale.
    ResetLabelScale,
}

#[derive(Clone, Copy, Debug)]
struct ScheduledTask {
    session: u64,
    fire_at: f64,
    kind: TaskKind,
}

#[derive(Default)]
pub struct TaskQueue {
    tasks: SmallVec<[ScheduledTask; 4]>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, session: u64, fire_at: f64, kind: TaskKind) {
        self.tasks.push(ScheduledTask {
            session,
            fire_at,
            kind,
        });
    }

    /// Drop every task belonging to `session`.
    pub fn cancel_session(&mut self, session: u64) {
        self.tasks.retain(|t| t.session != session);
    }

    /// Remove and return all tasks due at `now`, oldest first.
    pub fn drain_due(&mut self, now: f64) -> SmallVec<[TaskKind; 4]> {
        let mut due: SmallVec<[TaskKind; 4]> = SmallVec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].fire_at <= now {
                due.push(self.tasks.remove(i).kind);
            } else {
                i += 1;
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
