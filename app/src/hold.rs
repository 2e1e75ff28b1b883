//! Client-side slot hold: the selected slots plus a countdown.
//!
//! The hold is purely advisory. Nothing is reserved remotely; when the
//! countdown runs out the selection simply disappears.

use crate::schedule::Slot;

/// Default countdown length in ticks (one tick per second)
pub const DEFAULT_HOLD_SECONDS: u32 = 300;

/// What a slot toggle did to the hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// First slot selected; countdown (re)started
    Started,
    /// Another slot added to a running hold
    Added,
    /// A slot removed, others remain
    Removed,
    /// The last slot removed; the countdown stops where it is
    Released,
}

/// What a timer tick did to the hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second counted down
    Counted,
    /// The countdown ran out; selection cleared
    Expired,
    /// The tick belongs to an earlier countdown
    Stale,
    /// Nothing is held
    Idle,
}

/// Ordered selection of slots with a countdown
///
/// Invariant: a non-empty selection always has a running countdown, and a
/// countdown that runs out clears the selection and resets to the full
/// duration. Every (re)start bumps `epoch`, so ticks scheduled for an earlier
/// countdown can be recognised and dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotHold {
    selected: Vec<Slot>,
    remaining: u32,
    duration: u32,
    epoch: u64,
}

impl SlotHold {
    /// Empty hold with a countdown of `duration` ticks (at least one)
    #[must_use]
    pub fn new(duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            selected: Vec::new(),
            remaining: duration,
            duration,
            epoch: 0,
        }
    }

    /// Selected slots in selection order
    #[must_use]
    pub fn selected(&self) -> &[Slot] {
        &self.selected
    }

    /// Whether `slot` is selected
    #[must_use]
    pub fn contains(&self, slot: Slot) -> bool {
        self.selected.contains(&slot)
    }

    /// Number of selected slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Ticks left on the countdown
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Full countdown length
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Current countdown generation
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Select `slot`, or deselect it when already selected
    ///
    /// Only the empty → non-empty transition restarts the countdown.
    pub fn toggle(&mut self, slot: Slot) -> Toggle {
        if let Some(position) = self.selected.iter().position(|s| *s == slot) {
            self.selected.remove(position);
            if self.selected.is_empty() {
                self.epoch = self.epoch.wrapping_add(1);
                Toggle::Released
            } else {
                Toggle::Removed
            }
        } else {
            let was_empty = self.selected.is_empty();
            self.selected.push(slot);
            if was_empty {
                self.restart();
                Toggle::Started
            } else {
                Toggle::Added
            }
        }
    }

    /// Clear the selection and reset the countdown
    pub fn reset(&mut self) {
        self.selected.clear();
        self.restart();
    }

    /// Apply one tick of the countdown scheduled under `epoch`
    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        if epoch != self.epoch {
            return TickOutcome::Stale;
        }
        if self.selected.is_empty() {
            return TickOutcome::Idle;
        }
        if self.remaining <= 1 {
            self.reset();
            return TickOutcome::Expired;
        }
        self.remaining -= 1;
        TickOutcome::Counted
    }

    /// Countdown as `MM:SS`
    #[must_use]
    pub fn countdown(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    fn restart(&mut self) {
        self.remaining = self.duration;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl Default for SlotHold {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_SECONDS)
    }
}
