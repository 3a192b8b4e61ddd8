//=========================================================================
// Screen Registry
//=========================================================================
//
// Owns the screens of a scene.
//
// The coordinator never owns screens; it stores the key of the active
// one and looks it up here whenever it needs to call into it. Removing a
// screen from the registry leaves that key dangling, and the coordinator
// treats a dangling key as "nothing to call".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenKey};

//=== ScreenEntry =========================================================

struct ScreenEntry<K: ScreenKey> {
    key: K,
    type_id: TypeId,
    screen: Box<dyn Screen<K>>,
}

//=== ScreenRegistry ======================================================

/// Ordered collection of the live screens in a scene.
///
/// Registration order is preserved so [`ScreenRegistry::find_by_type`]
/// is deterministic.
pub struct ScreenRegistry<K: ScreenKey> {
    entries: Vec<ScreenEntry<K>>,
}

impl<K: ScreenKey> ScreenRegistry<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a screen under `key`.
    ///
    /// A screen already registered under the same key is replaced in place.
    pub fn register<T>(&mut self, key: K, screen: T)
    where
        T: Screen<K> + 'static,
    {
        let entry = ScreenEntry {
            key,
            type_id: TypeId::of::<T>(),
            screen: Box::new(screen),
        };

        match self.position(key) {
            Some(pos) => {
                warn!(target: "screen", "Screen {:?} was already registered and has been replaced", key);
                self.entries[pos] = entry;
            }
            None => {
                debug!(target: "screen", "Registered screen {:?} ({})", key, type_name::<T>());
                self.entries.push(entry);
            }
        }
    }

    /// Removes and returns the screen registered under `key`.
    pub fn remove(&mut self, key: K) -> Option<Box<dyn Screen<K>>> {
        let pos = self.position(key)?;
        debug!(target: "screen", "Removed screen {:?}", key);
        Some(self.entries.remove(pos).screen)
    }

    //--- Lookup -----------------------------------------------------------

    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: K) -> Option<&dyn Screen<K>> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.screen.as_ref())
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut (dyn Screen<K> + 'static)> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| entry.screen.as_mut())
    }

    /// Returns the key of the first registered screen of concrete type `T`.
    pub fn find_by_type<T>(&self) -> Option<K>
    where
        T: Screen<K> + 'static,
    {
        let wanted = TypeId::of::<T>();
        self.entries
            .iter()
            .find(|entry| entry.type_id == wanted)
            .map(|entry| entry.key)
    }

    /// Returns the registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn position(&self, key: K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }
}

impl<K: ScreenKey> Default for ScreenRegistry<K> {
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

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScreen {
        Title,
        Options,
        Hud,
    }

    impl ScreenKey for TestScreen {}

    struct MenuScreen {
        pauses: bool,
    }

    impl Screen<TestScreen> for MenuScreen {
        fn requires_pause(&self) -> bool {
            self.pauses
        }

        fn allows_movement_input(&self) -> bool {
            false
        }
    }

    struct HudScreen;

    impl Screen<TestScreen> for HudScreen {
        fn requires_pause(&self) -> bool {
            false
        }

        fn allows_movement_input(&self) -> bool {
            true
        }
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ScreenRegistry::<TestScreen>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ScreenRegistry::new();
        registry.register(TestScreen::Title, MenuScreen { pauses: true });
        registry.register(TestScreen::Hud, HudScreen);

        assert!(registry.contains(TestScreen::Title));
        assert!(!registry.contains(TestScreen::Options));
        assert!(registry.get(TestScreen::Title).unwrap().requires_pause());
        assert!(registry.get(TestScreen::Hud).unwrap().allows_movement_input());
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec![TestScreen::Title, TestScreen::Hud]
        );
    }

    #[test]
    fn register_same_key_replaces_in_place() {
        let mut registry = ScreenRegistry::new();
        registry.register(TestScreen::Title, MenuScreen { pauses: true });
        registry.register(TestScreen::Hud, HudScreen);
        registry.register(TestScreen::Title, MenuScreen { pauses: false });

        assert_eq!(registry.len(), 2);
        assert!(!registry.get(TestScreen::Title).unwrap().requires_pause());
        assert_eq!(registry.keys().next(), Some(TestScreen::Title));
    }

    #[test]
    fn find_by_type_returns_first_registered_instance() {
        let mut registry = ScreenRegistry::new();
        registry.register(TestScreen::Hud, HudScreen);
        registry.register(TestScreen::Options, MenuScreen { pauses: true });
        registry.register(TestScreen::Title, MenuScreen { pauses: false });

        assert_eq!(registry.find_by_type::<MenuScreen>(), Some(TestScreen::Options));
        assert_eq!(registry.find_by_type::<HudScreen>(), Some(TestScreen::Hud));
    }

    #[test]
    fn find_by_type_misses_unregistered_type() {
        let mut registry = ScreenRegistry::new();
        registry.register(TestScreen::Hud, HudScreen);

        assert_eq!(registry.find_by_type::<MenuScreen>(), None);
    }

    #[test]
    fn remove_hands_back_ownership() {
        let mut registry = ScreenRegistry::new();
        registry.register(TestScreen::Hud, HudScreen);

        let removed = registry.remove(TestScreen::Hud);
        assert!(removed.is_some());
        assert!(registry.is_empty());
        assert!(registry.remove(TestScreen::Hud).is_none());
    }
}
