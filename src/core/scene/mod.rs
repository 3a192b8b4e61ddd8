//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and asynchronous scene loading.
//
// Architecture:
//   SceneManager
//     ├─ factories: HashMap<S, SceneFactory>
//     ├─ loaded:    Vec<(S, Box<dyn Scene>)>
//     └─ pending:   VecDeque<PendingLoad>
//
// Flow:
//   update()        → Scene::update() for every loaded scene
//   process_loads() → drain SceneLoadQueue → instantiate → activate
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod load_queue;
mod scene_manager;

//=== Public API ==========================================================

pub use load_queue::{LoadHandle, LoadMode, SceneLoadQueue, SceneLoadRequest, SceneLoader};
pub use scene_manager::SceneManager;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys identify scene factories in the SceneManager.
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// A fresh instance is created from the registered factory every time
/// the scene is loaded, and dropped when it is unloaded.
///
/// # Minimal Implementation
///
/// Only `update()` is required. Lifecycle hooks have default empty implementations:
///
/// ```rust
/// # use aetheric_frontend::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct MyScene;
///
/// impl Scene<GameScene> for MyScene {
///     fn update(&mut self, context: &mut GlobalContext<GameScene>) {
///         // Only this method is required
///     }
/// }
/// ```
pub trait Scene<S: SceneKey>: Send {
    /// Called when the scene is activated.
    fn on_enter(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called right before the scene is unloaded.
    fn on_exit(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called every tick while the scene is loaded.
    fn update(&mut self, context: &mut GlobalContext<S>);
}
