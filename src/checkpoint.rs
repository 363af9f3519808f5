//! Undo log for speculative parse regions.
//!
//! The grammar engine opens a region before it tries an alternative that may
//! not match. Event handlers running inside the region register compensating
//! actions for the mutations they make. When the region closes:
//!
//! - **abandoned** (the alternative did not match): every action registered in
//!   the region runs, newest first;
//! - **committed**: only *unconditional* actions run; the others move to the
//!   enclosing region, so abandoning that one still undoes them. With no
//!   enclosing region they are dropped.
//!
//! Actions are plain data. The tracker hands them back to the caller, which
//! owns whatever state they apply to.

#[derive(Debug)]
struct Cancellable<A> {
    action: A,
    unconditional: bool,
}

/// Handle to an open region. Regions close innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an open checkpoint region must be committed or abandoned"]
pub struct Checkpoint(usize);

#[derive(Debug)]
pub struct CheckpointTracker<A> {
    regions: Vec<Vec<Cancellable<A>>>,
}

impl<A> Default for CheckpointTracker<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CheckpointTracker<A> {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Number of currently open regions.
    pub fn depth(&self) -> usize {
        self.regions.len()
    }

    pub fn is_speculative(&self) -> bool {
        !self.regions.is_empty()
    }

    pub fn open(&mut self) -> Checkpoint {
        self.regions.push(Vec::new());
        Checkpoint(self.regions.len() - 1)
    }

    /// Register an action that runs only if the innermost region is abandoned.
    /// Outside any region there is nothing to undo and the action is dropped.
    pub fn add_cancellable(&mut self, action: A) {
        if let Some(region) = self.regions.last_mut() {
            region.push(Cancellable {
                action,
                unconditional: false,
            });
        }
    }

    /// Register an action that runs when the innermost region closes, however it closes.
    /// Outside any region the action is dropped.
    pub fn add_unconditional_cancellable(&mut self, action: A) {
        if let Some(region) = self.regions.last_mut() {
            region.push(Cancellable {
                action,
                unconditional: true,
            });
        }
    }

    /// Close `checkpoint` (and any region still open inside it) as matched.
    /// Returns the actions to run now, in the order to run them.
    pub fn commit(&mut self, checkpoint: Checkpoint) -> Vec<A> {
        let mut run = Vec::new();
        while self.regions.len() > checkpoint.0 {
            let Some(region) = self.regions.pop() else {
                break;
            };
            let mut deferred = Vec::new();
            for cancellable in region.into_iter().rev() {
                if cancellable.unconditional {
                    run.push(cancellable.action);
                } else {
                    deferred.push(cancellable);
                }
            }
            if let Some(parent) = self.regions.last_mut() {
                parent.extend(deferred.into_iter().rev());
            }
        }
        run
    }

    /// Close `checkpoint` (and any region still open inside it) as not matched.
    /// Returns every registered action, newest first.
    pub fn abandon(&mut self, checkpoint: Checkpoint) -> Vec<A> {
        let mut run = Vec::new();
        while self.regions.len() > checkpoint.0 {
            let Some(region) = self.regions.pop() else {
                break;
            };
            run.extend(region.into_iter().rev().map(|c| c.action));
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abandon_runs_everything_newest_first() {
        let mut tracker = CheckpointTracker::new();
        let cp = tracker.open();
        tracker.add_unconditional_cancellable("pop");
        tracker.add_cancellable("detach");
        tracker.add_cancellable("remove option");
        assert_eq!(tracker.abandon(cp), ["remove option", "detach", "pop"]);
        assert!(!tracker.is_speculative());
    }

    #[test]
    fn commit_runs_only_unconditional() {
        let mut tracker = CheckpointTracker::new();
        let cp = tracker.open();
        tracker.add_unconditional_cancellable("pop");
        tracker.add_cancellable("detach");
        assert_eq!(tracker.commit(cp), ["pop"]);
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn committed_inner_actions_move_to_parent() {
        let mut tracker = CheckpointTracker::new();
        let outer = tracker.open();
        tracker.add_cancellable("outer detach");
        let inner = tracker.open();
        tracker.add_unconditional_cancellable("inner pop");
        tracker.add_cancellable("inner detach");
        assert_eq!(tracker.commit(inner), ["inner pop"]);

        assert_eq!(tracker.abandon(outer), ["inner detach", "outer detach"]);
    }

    #[test]
    fn closing_outer_closes_forgotten_inner() {
        let mut tracker = CheckpointTracker::new();
        let outer = tracker.open();
        tracker.add_unconditional_cancellable(1);
        let _inner = tracker.open();
        tracker.add_unconditional_cancellable(2);
        assert_eq!(tracker.commit(outer), [2, 1]);
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn actions_outside_regions_are_dropped() {
        let mut tracker = CheckpointTracker::new();
        tracker.add_cancellable("lost");
        tracker.add_unconditional_cancellable("lost too");
        let cp = tracker.open();
        assert!(tracker.abandon(cp).is_empty());
    }
}
