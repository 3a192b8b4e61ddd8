//=========================================================================
// Scene Load Queue
//=========================================================================
//
// Queue for asynchronous scene loads.
//
// Scenes request loads here during updates and keep the returned
// `LoadHandle` to poll progress on later ticks. The scene manager drains
// this queue at tick boundaries and reports progress through the handles:
//
//   0.0  queued
//   0.9  instantiated, ready to activate
//   1.0  activated
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::SceneKey;
use crate::core::shared::AtomicF32;

//=== LoadMode ============================================================

/// How a loaded scene relates to the scenes already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Unloads every loaded scene before activating the new one.
    Single,

    /// Activates the new scene alongside the loaded ones.
    Additive,
}

//=== LoadHandle ==========================================================

/// Pollable progress of one scene load.
///
/// Cloning shares the progress value between the requester and the
/// scene manager.
#[derive(Debug, Clone)]
pub struct LoadHandle {
    progress: Arc<AtomicF32>,
}

impl LoadHandle {
    /// Creates a handle at progress `0.0`.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(AtomicF32::new(0.0)),
        }
    }

    /// Current progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        self.progress.load()
    }

    /// Returns true once progress has reached `threshold`.
    pub fn is_ready(&self, threshold: f32) -> bool {
        self.progress() >= threshold
    }

    /// Publishes a new progress value, clamped to `[0.0, 1.0]`.
    pub fn report(&self, progress: f32) {
        self.progress.store(progress.clamp(0.0, 1.0));
    }
}

impl Default for LoadHandle {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneLoader Trait ===================================================

/// Starts asynchronous scene loads.
pub trait SceneLoader<S: SceneKey> {
    /// Requests `scene` to be loaded with `mode` and returns its progress handle.
    fn load_scene(&mut self, scene: S, mode: LoadMode) -> LoadHandle;
}

//=== SceneLoadRequest ====================================================

/// A queued load together with the handle given to the requester.
#[derive(Debug, Clone)]
pub struct SceneLoadRequest<S: SceneKey> {
    pub scene: S,
    pub mode: LoadMode,
    pub handle: LoadHandle,
}

//=== SceneLoadQueue ======================================================

/// FIFO of load requests waiting for the scene manager.
pub struct SceneLoadQueue<S: SceneKey> {
    queue: VecDeque<SceneLoadRequest<S>>,
}

impl<S: SceneKey> SceneLoadQueue<S> {
    /// Creates a new empty load queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Returns an iterator over the queued requests.
    pub fn iter(&self) -> impl Iterator<Item = &SceneLoadRequest<S>> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests from the queue, leaving it empty.
    pub fn take(&mut self) -> VecDeque<SceneLoadRequest<S>> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> SceneLoader<S> for SceneLoadQueue<S> {
    fn load_scene(&mut self, scene: S, mode: LoadMode) -> LoadHandle {
        debug!(target: "scene", "Queued {:?} load of scene {:?}", mode, scene);

        let handle = LoadHandle::new();
        self.queue.push_back(SceneLoadRequest {
            scene,
            mode,
            handle: handle.clone(),
        });
        handle
    }
}

impl<S: SceneKey> Default for SceneLoadQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
