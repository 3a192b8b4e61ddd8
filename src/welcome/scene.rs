//=========================================================================
// Welcome Scene
//=========================================================================
//
// Scene wrapper tying the welcome flow to the engine.
//
// Owns:
//   ScreenCoordinator ──references──> ScreenRegistry (title, options, ...)
//   WelcomeFlowController
//   Receiver<WelcomeCommand> <──── UI layer holds the Sender
//
// Tick order:
//   coordinator.on_tick() → controller.update() → drain commands
//
// Commands are handled after the controller update, so a transition
// launched by a command starts counting its delay on the next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, error};

//=== Internal Dependencies ===============================================

use super::controller::{WelcomeCommand, WelcomeFlowController};
use crate::core::globals::GlobalContext;
use crate::core::scene::{Scene, SceneKey};
use crate::core::screen::{ScreenCoordinator, ScreenError, ScreenKey, ScreenRegistry};

//=== Command Channel =====================================================

/// Creates the channel carrying UI commands into a [`WelcomeScene`].
///
/// The receiver may be cloned into every scene instance a factory builds.
pub fn command_channel() -> (Sender<WelcomeCommand>, Receiver<WelcomeCommand>) {
    unbounded()
}

//=== WelcomeScene ========================================================

pub struct WelcomeScene<S: SceneKey, K: ScreenKey> {
    coordinator: ScreenCoordinator<K>,
    screens: ScreenRegistry<K>,
    controller: WelcomeFlowController<S>,
    commands: Receiver<WelcomeCommand>,
}

impl<S: SceneKey, K: ScreenKey> WelcomeScene<S, K> {
    pub fn new(
        coordinator: ScreenCoordinator<K>,
        screens: ScreenRegistry<K>,
        controller: WelcomeFlowController<S>,
        commands: Receiver<WelcomeCommand>,
    ) -> Self {
        Self {
            coordinator,
            screens,
            controller,
            commands,
        }
    }

    /// Switches the active screen of this scene.
    pub fn set_active_screen(&mut self, key: K) -> Result<(), ScreenError> {
        self.coordinator.set_active_screen(key, &mut self.screens)
    }

    pub fn coordinator(&self) -> &ScreenCoordinator<K> {
        &self.coordinator
    }

    pub fn screens(&self) -> &ScreenRegistry<K> {
        &self.screens
    }

    pub fn screens_mut(&mut self) -> &mut ScreenRegistry<K> {
        &mut self.screens
    }

    pub fn controller(&self) -> &WelcomeFlowController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut WelcomeFlowController<S> {
        &mut self.controller
    }
}

impl<S: SceneKey, K: ScreenKey> Scene<S> for WelcomeScene<S, K> {
    /// # Panics
    ///
    /// Panics if the initial screen is not registered.
    fn on_enter(&mut self, _context: &mut GlobalContext<S>) {
        if let Err(e) = self.coordinator.start(&mut self.screens) {
            error!(target: "welcome", "Welcome screens are miswired: {}", e);
            panic!("Failed to start welcome screens: {}", e);
        }

        self.controller.start();
    }

    fn on_exit(&mut self, _context: &mut GlobalContext<S>) {
        debug!(
            target: "welcome",
            "Leaving welcome scene with {} transition(s) in flight",
            self.controller.transitions_in_flight()
        );
    }

    fn update(&mut self, context: &mut GlobalContext<S>) {
        self.coordinator.on_tick(&mut self.screens);
        self.controller.update(context);

        for command in self.commands.try_iter() {
            self.controller.handle(command, context);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
