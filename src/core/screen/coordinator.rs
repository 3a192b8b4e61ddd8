//=========================================================================
// Screen Coordinator
//=========================================================================
//
// Single-active-screen state machine.
//
// States:
//   Uninitialized ──start() with initial screen──> ScreenActive(S0)
//   ScreenActive(Sa) ──set_active_screen(Sb)──> ScreenActive(Sb)   (Sb may equal Sa)
//
// Activation order is fixed:
//   hide old → reassign → derive pause / movement flags → show new
//
// The pause flag drives the shared TimeScale, so activating a pausing
// screen freezes simulated time for every system reading the clock.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::type_name;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenError, ScreenKey, ScreenRegistry};
use crate::core::clock::TimeScale;

//=== ScreenCoordinator ===================================================

/// Owns the active-screen relation, the pause state, and the
/// movement-input flag of one scene.
///
/// The pause and movement flags are only ever written by activation, and
/// always mirror what the active screen reported when it became active.
pub struct ScreenCoordinator<K: ScreenKey> {
    initial_screen: Option<K>,
    active_screen: Option<K>,
    is_paused: bool,
    allows_movement_input: bool,
    time_scale: TimeScale,
}

impl<K: ScreenKey> ScreenCoordinator<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a coordinator with no active screen.
    ///
    /// Until a screen is activated the coordinator reports paused with
    /// movement input disallowed, and does not touch `time_scale`.
    pub fn new(time_scale: TimeScale) -> Self {
        Self {
            initial_screen: None,
            active_screen: None,
            is_paused: true,
            allows_movement_input: false,
            time_scale,
        }
    }

    /// Configures the screen activated by [`ScreenCoordinator::start`].
    pub fn with_initial_screen(mut self, key: K) -> Self {
        self.initial_screen = Some(key);
        self
    }

    /// Activates the configured initial screen, if any.
    ///
    /// Without an initial screen the coordinator stays uninitialized and
    /// ticks are no-ops until something is activated.
    pub fn start(&mut self, screens: &mut ScreenRegistry<K>) -> Result<(), ScreenError> {
        match self.initial_screen {
            Some(initial) => {
                debug!(target: "screen", "Starting with initial screen {:?}", initial);
                self.set_active_screen(initial, screens)
            }
            None => {
                debug!(target: "screen", "No initial screen configured");
                Ok(())
            }
        }
    }

    //--- Activation -------------------------------------------------------

    /// Makes `next` the active screen.
    ///
    /// Re-activating the screen that is already active runs the full
    /// hide/derive/show sequence again.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotRegistered`] if `next` is not in
    /// `screens`. The coordinator is left unchanged in that case.
    pub fn set_active_screen(
        &mut self,
        next: K,
        screens: &mut ScreenRegistry<K>,
    ) -> Result<(), ScreenError> {
        if !screens.contains(next) {
            return Err(ScreenError::NotRegistered(format!("{:?}", next)));
        }

        if let Some(current) = self.active_screen {
            match screens.get_mut(current) {
                Some(screen) => screen.on_hide(self),
                None => trace!(target: "screen", "Active screen {:?} is gone, skipping hide", current),
            }
        }

        debug!(target: "screen", "Activating screen {:?}", next);
        self.active_screen = Some(next);

        let screen = screens
            .get_mut(next)
            .ok_or_else(|| ScreenError::NotRegistered(format!("{:?}", next)))?;

        self.set_paused(screen.requires_pause());
        self.allows_movement_input = screen.allows_movement_input();

        screen.on_show(self);
        Ok(())
    }

    /// Activates the first live screen of concrete type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::TypeNotFound`] if no screen of type `T` is
    /// registered.
    pub fn set_active_screen_by_type<T>(
        &mut self,
        screens: &mut ScreenRegistry<K>,
    ) -> Result<(), ScreenError>
    where
        T: Screen<K> + 'static,
    {
        let key = screens
            .find_by_type::<T>()
            .ok_or(ScreenError::TypeNotFound(type_name::<T>()))?;

        self.set_active_screen(key, screens)
    }

    //--- Update Loop ------------------------------------------------------

    /// Forwards the per-frame update to the active screen.
    pub fn on_tick(&mut self, screens: &mut ScreenRegistry<K>) {
        let Some(active) = self.active_screen else {
            return;
        };

        if let Some(screen) = screens.get_mut(active) {
            screen.on_update(self);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active_screen(&self) -> Option<K> {
        self.active_screen
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Advisory flag for input handlers.
    pub fn allows_movement_input(&self) -> bool {
        self.allows_movement_input
    }

    //--- Internal Helpers -------------------------------------------------

    fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        self.time_scale.set(if paused { 0.0 } else { 1.0 });
    }
}

//=========================================================================
// Tests
//=========================================================================
