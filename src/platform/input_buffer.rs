//=========================================================================
// Input Buffer
//
// Collects converted input events between two redraws, split into
// discrete and continuous queues.
//
// Responsibilities:
// - Keep discrete events (keys, buttons) in arrival order
// - Drop a discrete event identical to the one just queued
// - Keep only the latest continuous event of each kind (cursor, scroll)
// - Hand both queues over in one `drain()`
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
//
// `continuous` relies on InputEvent's equality ignoring the payload of
// continuous variants, so `replace` swaps in the newest value.
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Key repeat produces runs of identical KeyDown events; only the
    // first of a run is kept.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `(discrete, continuous)` and leaves the buffer empty, or
    // `None` when nothing was collected.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::replace(&mut self.discrete, Vec::with_capacity(64));
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn clear(&mut self) {
        self.discrete.clear();
        self.continuous.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
