//=========================================================================
// Scene Transition Task
//=========================================================================
//
// Delayed hand-off from the welcome scene into another scene.
//
// Stages:
//   Delay(real time) ──elapsed──> Loading(handle) ──progress ≥ ready──> Complete
//
// The delay counts real time so a paused simulation does not hold the
// transition back. The load is requested in `Single` mode, which unloads
// the welcome scene (and with it the controller owning this task) once
// the target activates.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::scene::{LoadHandle, LoadMode, SceneKey, SceneLoader};
use crate::core::sequence::{RealTimeDelay, Step};

//=== TransitionTask ======================================================

enum Stage {
    Delay(RealTimeDelay),
    Loading(LoadHandle),
    Complete,
}

pub struct TransitionTask<S: SceneKey> {
    target: S,
    ready_progress: f32,
    stage: Stage,
}

impl<S: SceneKey> TransitionTask<S> {
    pub fn new(target: S, delay: Duration, ready_progress: f32) -> Self {
        Self {
            target,
            ready_progress,
            stage: Stage::Delay(RealTimeDelay::new(delay)),
        }
    }

    pub fn target(&self) -> S {
        self.target
    }

    /// The load handle, once the delay has elapsed.
    pub fn load_handle(&self) -> Option<&LoadHandle> {
        match &self.stage {
            Stage::Loading(handle) => Some(handle),
            _ => None,
        }
    }

    /// Advances the transition by one tick of `real_delta`.
    pub fn step(&mut self, real_delta: Duration, loader: &mut dyn SceneLoader<S>) -> Step {
        if let Stage::Delay(delay) = &mut self.stage {
            if delay.tick(real_delta) == Step::Pending {
                return Step::Pending;
            }

            debug!(target: "welcome", "Transition delay elapsed, loading {:?}", self.target);
            self.stage = Stage::Loading(loader.load_scene(self.target, LoadMode::Single));
        }

        let progress = match &self.stage {
            Stage::Loading(handle) => handle.progress(),
            _ => return Step::Complete,
        };

        if progress < self.ready_progress {
            trace!(target: "welcome", "Loading {:?}: {:.2}", self.target, progress);
            return Step::Pending;
        }

        debug!(target: "welcome", "Scene {:?} ready to activate", self.target);
        self.stage = Stage::Complete;
        Step::Complete
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneLoadQueue;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Generation,
    }

    impl SceneKey for TestScene {}

    const FRAME: Duration = Duration::from_millis(100);

    fn task() -> TransitionTask<TestScene> {
        TransitionTask::new(TestScene::Generation, Duration::from_millis(320), 0.9)
    }

    #[test]
    fn load_is_requested_only_after_delay() {
        let mut loads = SceneLoadQueue::new();
        let mut task = task();

        for _ in 0..3 {
            assert_eq!(task.step(FRAME, &mut loads), Step::Pending);
            assert!(loads.is_empty());
        }

        assert_eq!(task.step(FRAME, &mut loads), Step::Pending);
        let request = loads.iter().next().unwrap();
        assert_eq!(request.scene, TestScene::Generation);
        assert_eq!(request.mode, LoadMode::Single);
        assert!(task.load_handle().is_some());
    }

    #[test]
    fn completes_when_progress_reaches_ready() {
        let mut loads = SceneLoadQueue::new();
        let mut task = task();
        task.step(Duration::from_secs(1), &mut loads);

        let handle = task.load_handle().unwrap().clone();
        handle.report(0.5);
        assert_eq!(task.step(FRAME, &mut loads), Step::Pending);

        handle.report(0.9);
        assert_eq!(task.step(FRAME, &mut loads), Step::Complete);
        assert_eq!(task.step(FRAME, &mut loads), Step::Complete);
        assert_eq!(loads.len(), 1, "load is requested exactly once");
    }

    #[test]
    fn already_ready_load_completes_on_same_tick() {
        struct InstantLoader;

        impl SceneLoader<TestScene> for InstantLoader {
            fn load_scene(&mut self, _scene: TestScene, _mode: LoadMode) -> LoadHandle {
                let handle = LoadHandle::new();
                handle.report(1.0);
                handle
            }
        }

        let mut task = TransitionTask::new(TestScene::Generation, Duration::ZERO, 0.9);
        assert_eq!(task.step(Duration::ZERO, &mut InstantLoader), Step::Complete);
        assert_eq!(task.target(), TestScene::Generation);
    }
}
