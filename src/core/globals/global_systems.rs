//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that manage scenes and coordinate game logic.
// Systems operate on GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// Holds systems that process data and coordinate engine behavior.
/// These systems operate on the shared GlobalContext during engine updates.
///
/// # Available Systems
///
/// - `scene_manager`: Scene registration, loading, and lifecycle
pub struct GlobalSystems<S: SceneKey> {
    /// The scene manager for scene lifecycle and asynchronous loads.
    ///
    /// Processes the scene load queue from GlobalContext.
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey> GlobalSystems<S> {
    /// Creates a new systems container with default-initialized systems.
    ///
    /// This is typically called internally by the engine. Users should access
    /// systems via [`crate::Engine::init`] instead.
    pub fn new() -> Self {
        Self {
            scene_manager: SceneManager::new(),
        }
    }

    /// Enters the initial scene.
    pub fn start(&mut self, context: &mut GlobalContext<S>) {
        self.scene_manager.start(context);
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all engine systems for the current frame.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Clock**: Records the real time covered by this tick
    /// 2. **Scene Update**: Updates all loaded scenes with current context
    /// 3. **Load Processing**: Advances queued scene loads
    pub fn update(&mut self, context: &mut GlobalContext<S>, real_delta: Duration) {
        // 1. Advance frame time
        context.clock.advance(real_delta);

        // 2. Update loaded scenes (can queue loads and quit requests)
        self.scene_manager.update(context);

        // 3. Process scene loads
        self.scene_manager.process_loads(context);
    }
}

impl<S: SceneKey> Default for GlobalSystems<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Scene;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Title,
    }

    impl SceneKey for TestScene {}

    struct QuitAfter {
        ticks: u32,
    }

    impl Scene<TestScene> for QuitAfter {
        fn update(&mut self, context: &mut GlobalContext<TestScene>) {
            self.ticks = self.ticks.saturating_sub(1);
            if self.ticks == 0 {
                context.request_quit();
            }
        }
    }

    #[test]
    fn update_advances_clock_and_scenes() {
        let mut systems = GlobalSystems::new();
        systems
            .scene_manager
            .register_default(TestScene::Title, || QuitAfter { ticks: 2 });
        let mut context = GlobalContext::new();
        systems.start(&mut context);

        systems.update(&mut context, Duration::from_millis(16));
        assert!(!context.quit_requested());
        assert_eq!(context.clock.frame(), 1);

        systems.update(&mut context, Duration::from_millis(16));
        assert!(context.quit_requested());
        assert_eq!(context.clock.real_elapsed(), Duration::from_millis(32));
    }
}
