//=========================================================================
// Screen System
//=========================================================================
//
// Tracks which UI surface is active within a scene.
//
// Architecture:
//   ScreenRegistry (owns screens)
//     └─ entries: Vec<(K, TypeId, Box<dyn Screen<K>>)>
//
//   ScreenCoordinator (references one screen by key)
//     ├─ active_screen: Option<K>
//     ├─ is_paused ──────────> TimeScale (0.0 / 1.0)
//     └─ allows_movement_input
//
// Flow:
//   set_active_screen(next) → old.on_hide() → derive flags → next.on_show()
//   on_tick()               → active.on_update()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

//=== Module Declarations =================================================

mod coordinator;
mod registry;

//=== Public API ==========================================================

pub use coordinator::ScreenCoordinator;
pub use registry::ScreenRegistry;

//=== Screen Key Trait ====================================================

/// Marker trait for screen identifiers.
///
/// Typically implemented by a scene-specific enum.
pub trait ScreenKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Screen Trait ========================================================

/// A UI surface that can be the single active screen of a coordinator.
///
/// Every screen declares whether it pauses the simulation and whether it
/// accepts movement input. Lifecycle hooks receive the coordinator so the
/// screen can inspect its state while being shown, hidden, or updated.
///
/// # Minimal Implementation
///
/// ```rust
/// # use aetheric_frontend::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum MenuScreen { Title }
/// # impl ScreenKey for MenuScreen {}
/// struct TitleScreen;
///
/// impl Screen<MenuScreen> for TitleScreen {
///     fn requires_pause(&self) -> bool { true }
///     fn allows_movement_input(&self) -> bool { false }
/// }
/// ```
pub trait Screen<K: ScreenKey>: Send {
    /// Called after this screen became the active one.
    fn on_show(&mut self, _coordinator: &ScreenCoordinator<K>) {}

    /// Called before another screen (or this one again) is activated.
    fn on_hide(&mut self, _coordinator: &ScreenCoordinator<K>) {}

    /// Called every tick while this screen is active.
    fn on_update(&mut self, _coordinator: &ScreenCoordinator<K>) {}

    /// Whether simulated time must be frozen while this screen is active.
    fn requires_pause(&self) -> bool;

    /// Whether movement input should be accepted while this screen is active.
    fn allows_movement_input(&self) -> bool;
}

/// A screen shared as `Arc<Mutex<_>>` can be registered while another
/// owner (such as the welcome flow's enter-game signal) keeps a handle.
impl<K: ScreenKey, T: Screen<K>> Screen<K> for Arc<Mutex<T>> {
    fn on_show(&mut self, coordinator: &ScreenCoordinator<K>) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_show(coordinator);
    }

    fn on_hide(&mut self, coordinator: &ScreenCoordinator<K>) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_hide(coordinator);
    }

    fn on_update(&mut self, coordinator: &ScreenCoordinator<K>) {
        self.lock().unwrap_or_else(PoisonError::into_inner).on_update(coordinator);
    }

    fn requires_pause(&self) -> bool {
        self.lock().unwrap_or_else(PoisonError::into_inner).requires_pause()
    }

    fn allows_movement_input(&self) -> bool {
        self.lock().unwrap_or_else(PoisonError::into_inner).allows_movement_input()
    }
}

//=== ScreenError =========================================================

/// Screen lookup failures.
///
/// These indicate wiring bugs (a screen that was never registered), not
/// runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// No screen is registered under the given key.
    NotRegistered(String),

    /// No registered screen has the requested concrete type.
    TypeNotFound(&'static str),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered(key) => write!(f, "Screen {} is not registered", key),
            Self::TypeNotFound(type_name) => {
                write!(f, "No live screen of type {} was found", type_name)
            }
        }
    }
}

impl std::error::Error for ScreenError {}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScreen {
        Inventory,
    }

    impl ScreenKey for TestScreen {}

    #[derive(Default)]
    struct InventoryScreen {
        shown: u32,
    }

    impl Screen<TestScreen> for InventoryScreen {
        fn on_show(&mut self, _coordinator: &ScreenCoordinator<TestScreen>) {
            self.shown += 1;
        }

        fn requires_pause(&self) -> bool {
            true
        }

        fn allows_movement_input(&self) -> bool {
            false
        }
    }

    #[test]
    fn shared_screen_handle_drives_the_inner_screen() {
        use crate::core::clock::TimeScale;

        let inner = Arc::new(Mutex::new(InventoryScreen::default()));
        let mut screens = ScreenRegistry::new();
        screens.register(TestScreen::Inventory, Arc::clone(&inner));

        let mut coordinator = ScreenCoordinator::new(TimeScale::new());
        coordinator
            .set_active_screen(TestScreen::Inventory, &mut screens)
            .unwrap();

        assert_eq!(inner.lock().unwrap().shown, 1);
        assert!(coordinator.is_paused());
        assert!(!coordinator.allows_movement_input());
    }

    #[test]
    fn screen_error_display_names_the_key() {
        let err = ScreenError::NotRegistered("Pause".to_string());
        assert_eq!(err.to_string(), "Screen Pause is not registered");
    }

    #[test]
    fn screen_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ScreenError>();
    }
}
