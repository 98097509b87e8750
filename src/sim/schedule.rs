//! Delayed snowflake reactivation
//!
//! A collected flake sits out for a fixed number of ticks before coming back.
//! Rather than holding a callback over the flake, we queue its id together
//! with the generation it had when collected; the tick drains due entries and
//! looks the flake up again, so a flake that was removed or already respawned
//! is simply skipped.

/// A pending reactivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reactivation {
    pub snowflake_id: u32,
    /// Generation of the flake when it was collected
    pub generation: u32,
    pub due_tick: u64,
}

/// Pending reactivations keyed by snowflake id and fire time
#[derive(Debug, Clone, Default)]
pub struct ReactivationQueue {
    pending: Vec<Reactivation>,
}

impl ReactivationQueue {
    /// Queue a reactivation. A flake has at most one pending entry; scheduling
    /// it again replaces the old one.
    pub fn schedule(&mut self, snowflake_id: u32, generation: u32, due_tick: u64) {
        self.cancel(snowflake_id);
        self.pending.push(Reactivation {
            snowflake_id,
            generation,
            due_tick,
        });
    }

    /// Drop any pending entry for this flake
    pub fn cancel(&mut self, snowflake_id: u32) {
        self.pending.retain(|r| r.snowflake_id != snowflake_id);
    }

    /// Remove and return everything due at or before `now`, oldest first
    pub fn drain_due(&mut self, now: u64) -> Vec<Reactivation> {
        let mut due = Vec::new();
        self.pending.retain(|r| {
            if r.due_tick <= now {
                due.push(*r);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|r| (r.due_tick, r.snowflake_id));
        due
    }

    pub fn is_scheduled(&self, snowflake_id: u32) -> bool {
        self.pending.iter().any(|r| r.snowflake_id == snowflake_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
