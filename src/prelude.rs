//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_frontend::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Time and sequencing
pub use crate::core::clock::{FrameClock, TimeScale};
pub use crate::core::sequence::{RealTimeDelay, Step};

// Localization
pub use crate::core::localization::{format_text, Locale, LocaleTable, Localizer};

// Scene system
pub use crate::core::scene::{LoadHandle, LoadMode, Scene, SceneKey, SceneLoader, SceneManager};

// Screen system
pub use crate::core::screen::{Screen, ScreenCoordinator, ScreenError, ScreenKey, ScreenRegistry};

// Welcome flow
pub use crate::welcome::{
    WelcomeCommand, WelcomeConfig, WelcomeFlowController, WelcomeScene, WelcomeView,
};
