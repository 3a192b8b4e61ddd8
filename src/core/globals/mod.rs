//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic components) from context (shared data).
//
// Architecture:
//   GlobalSystems: SceneManager (owned by orchestrator)
//   GlobalContext: FrameClock + Localizer + SceneLoadQueue (passed to scenes)
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use global_systems::GlobalSystems;
