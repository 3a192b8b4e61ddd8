//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - clock: Real and scaled frame time, shared time scale
// - localization: Process-wide locale and string tables
// - scene_loads: Request queue for asynchronous scene loads
// - quit flag: Set by scenes to end the application
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::clock::FrameClock;
use crate::core::localization::{LocaleTable, Localizer};
use crate::core::scene::{SceneKey, SceneLoadQueue};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` during their lifecycle methods.
/// This separates scene-accessible data from internal engine systems.
pub struct GlobalContext<S: SceneKey> {
    /// Frame timing and the shared simulation time scale.
    pub clock: FrameClock,

    /// Locale selection and text lookup for all user-facing strings.
    pub localization: Box<dyn Localizer>,

    /// Queue for scene loads.
    ///
    /// Scenes request loads here during updates. The scene manager
    /// processes this queue at tick boundaries.
    pub scene_loads: SceneLoadQueue<S>,

    quit_requested: bool,
}

impl<S: SceneKey> GlobalContext<S> {
    /// Creates a new context with an empty locale table.
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            localization: Box::new(LocaleTable::new()),
            scene_loads: SceneLoadQueue::new(),
            quit_requested: false,
        }
    }

    /// Replaces the localization backend.
    pub fn set_localization<L>(&mut self, localizer: L)
    where
        L: Localizer + 'static,
    {
        self.localization = Box::new(localizer);
    }

    /// Asks the engine to shut down at the end of the current tick.
    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            info!(target: "core", "Quit requested");
        }
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl<S: SceneKey> Default for GlobalContext<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
