//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene change requests made while a scene is ticking.
//
// A scene cannot replace itself while it is borrowed, so requests are
// queued here and applied by the scene manager once the tick returns.
//
//=========================================================================

use super::SceneKind;

//=== SceneTransition =====================================================

/// A requested change to the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneTransition {
    /// Build, start and activate a fresh scene of this kind.
    Change(SceneKind),

    /// Drop the active scene, leaving the manager uninitialized.
    Clear,

    /// No transition.
    #[default]
    Empty,
}

//=== TransitionQueue =====================================================

/// FIFO of pending scene transitions.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneTransition> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes every queued transition, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}
