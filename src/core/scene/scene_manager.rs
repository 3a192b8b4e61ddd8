//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, asynchronous loading, and lifecycle.
//
// Scenes are registered as factories keyed by scene key. Loading a scene
// creates a fresh instance; unloading drops it, so per-scene state never
// outlives the scene.
//
// Loads advance one phase per tick boundary and only the front request
// is worked on at a time:
//
//   tick N    instantiate   → handle 0.9
//   tick N+1  activate      → handle 1.0
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, VecDeque};

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{LoadHandle, LoadMode, Scene, SceneKey, SceneLoadRequest};
use crate::core::globals::GlobalContext;

//=== Types ===============================================================

type SceneFactory<S> = Box<dyn Fn() -> Box<dyn Scene<S>> + Send>;

/// Progress value reported once a scene is instantiated and waiting to activate.
pub const READY_TO_ACTIVATE: f32 = 0.9;

struct LoadedScene<S: SceneKey> {
    key: S,
    scene: Box<dyn Scene<S>>,
}

struct PendingLoad<S: SceneKey> {
    request: SceneLoadRequest<S>,
    instance: Option<Box<dyn Scene<S>>>,
}

//=== Scene Manager =======================================================

/// Manages scene lifecycle and asynchronous scene switching.
///
/// Scenes are registered once as factories and referenced by key. Loaded
/// scenes are updated bottom-up in load order.
pub struct SceneManager<S: SceneKey> {
    factories: HashMap<S, SceneFactory<S>>,
    loaded: Vec<LoadedScene<S>>,
    pending: VecDeque<PendingLoad<S>>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a new scene manager with no loaded scenes.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            loaded: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene factory with the manager.
    ///
    /// The factory is called every time the scene is loaded.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use aetheric_frontend::prelude::*;
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// # enum GameScene { Main }
    /// # impl SceneKey for GameScene {}
    /// # struct MainScene;
    /// # impl Scene<GameScene> for MainScene {
    /// #     fn update(&mut self, _ctx: &mut GlobalContext<GameScene>) {}
    /// # }
    /// # let mut manager = SceneManager::new();
    /// manager.register_scene(GameScene::Main, || MainScene);
    /// ```
    pub fn register_scene<F, T>(&mut self, key: S, factory: F)
    where
        F: Fn() -> T + Send + 'static,
        T: Scene<S> + 'static,
    {
        let boxed: SceneFactory<S> = Box::new(move || -> Box<dyn Scene<S>> { Box::new(factory()) });

        if self.factories.insert(key, boxed).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and queues it as the initial scene.
    ///
    /// The scene is instantiated and entered by [`SceneManager::start`].
    pub fn register_default<F, T>(&mut self, key: S, factory: F)
    where
        F: Fn() -> T + Send + 'static,
        T: Scene<S> + 'static,
    {
        self.register_scene(key, factory);

        debug!(target: "scene", "Registered scene {:?} as default", key);
        self.pending.push_back(PendingLoad {
            request: SceneLoadRequest {
                scene: key,
                mode: LoadMode::Single,
                handle: LoadHandle::new(),
            },
            instance: None,
        });
    }

    /// Loads every queued scene immediately, entering the initial scene.
    pub fn start(&mut self, context: &mut GlobalContext<S>) {
        self.pending.extend(context.scene_loads.take().into_iter().map(|request| PendingLoad {
            request,
            instance: None,
        }));

        while !self.pending.is_empty() {
            self.advance_front(context);
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates every loaded scene.
    pub fn update(&mut self, context: &mut GlobalContext<S>) {
        for loaded in &mut self.loaded {
            loaded.scene.update(context);
        }
    }

    //--- Load Processing --------------------------------------------------

    /// Collects new load requests and advances the front pending load.
    ///
    /// Should be called at the tick boundary after scene updates.
    pub fn process_loads(&mut self, context: &mut GlobalContext<S>) {
        for request in context.scene_loads.take() {
            self.pending.push_back(PendingLoad {
                request,
                instance: None,
            });
        }

        if !self.pending.is_empty() {
            self.advance_front(context);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the keys of the loaded scenes in load order.
    pub fn loaded_scenes(&self) -> impl Iterator<Item = S> + '_ {
        self.loaded.iter().map(|loaded| loaded.key)
    }

    pub fn is_loaded(&self, key: S) -> bool {
        self.loaded.iter().any(|loaded| loaded.key == key)
    }

    /// Number of loads waiting to be instantiated or activated.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn advance_front(&mut self, context: &mut GlobalContext<S>) {
        let Some(front) = self.pending.front_mut() else {
            return;
        };

        if front.instance.is_none() {
            let key = front.request.scene;
            match self.factories.get(&key) {
                Some(factory) => {
                    debug!(target: "scene", "Instantiated scene {:?}", key);
                    front.instance = Some(factory());
                    front.request.handle.report(READY_TO_ACTIVATE);
                }
                None => {
                    warn!(target: "scene", "Attempted to load unregistered scene {:?}", key);
                    self.pending.pop_front();
                }
            }
            return;
        }

        if let Some(PendingLoad { request, instance: Some(scene) }) = self.pending.pop_front() {
            self.activate(request.scene, scene, request.mode, context);
            request.handle.report(1.0);
        }
    }

    fn activate(
        &mut self,
        key: S,
        mut scene: Box<dyn Scene<S>>,
        mode: LoadMode,
        context: &mut GlobalContext<S>,
    ) {
        match mode {
            LoadMode::Single => {
                for mut unloaded in self.loaded.drain(..) {
                    debug!(target: "scene", "Unloading scene {:?}", unloaded.key);
                    unloaded.scene.on_exit(context);
                }
            }
            LoadMode::Additive => {
                if self.is_loaded(key) {
                    warn!(target: "scene", "Scene {:?} is already loaded, skipping additive load", key);
                    return;
                }
            }
        }

        info!(target: "scene", "Activating scene {:?} ({:?})", key, mode);
        scene.on_enter(context);
        self.loaded.push(LoadedScene { key, scene });
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneLoader;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Welcome,
        Generation,
        Overlay,
    }

    impl SceneKey for TestScene {}

    type Log = Arc<Mutex<Vec<String>>>;

    //--- Test Helpers -----------------------------------------------------

    struct RecordingScene {
        name: &'static str,
        log: Log,
    }

    impl Scene<TestScene> for RecordingScene {
        fn on_enter(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.log.lock().unwrap().push(format!("{}:enter", self.name));
        }

        fn on_exit(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.log.lock().unwrap().push(format!("{}:exit", self.name));
        }

        fn update(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.log.lock().unwrap().push(format!("{}:update", self.name));
        }
    }

    fn manager(log: &Log) -> SceneManager<TestScene> {
        let mut manager = SceneManager::new();
        for (key, name) in [
            (TestScene::Welcome, "welcome"),
            (TestScene::Generation, "generation"),
            (TestScene::Overlay, "overlay"),
        ] {
            let log = Arc::clone(log);
            manager.register_scene(key, move || RecordingScene {
                name,
                log: Arc::clone(&log),
            });
        }
        manager
    }

    fn events(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn start_enters_default_scene() {
        let log: Log = Arc::default();
        let mut manager = manager(&log);
        let log_for_default = Arc::clone(&log);
        manager.register_default(TestScene::Welcome, move || RecordingScene {
            name: "welcome",
            log: Arc::clone(&log_for_default),
        });
        let mut context = GlobalContext::new();

        manager.start(&mut context);
        manager.update(&mut context);

        assert!(manager.is_loaded(TestScene::Welcome));
        assert_eq!(events(&log), vec!["welcome:enter", "welcome:update"]);
    }

    #[test]
    fn single_load_reports_progress_then_replaces() {
        let log: Log = Arc::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        context.scene_loads.load_scene(TestScene::Welcome, LoadMode::Single);
        manager.start(&mut context);

        let handle = context.scene_loads.load_scene(TestScene::Generation, LoadMode::Single);
        assert_eq!(handle.progress(), 0.0);

        manager.process_loads(&mut context);
        assert_eq!(handle.progress(), READY_TO_ACTIVATE);
        assert!(manager.is_loaded(TestScene::Welcome));

        manager.process_loads(&mut context);
        assert_eq!(handle.progress(), 1.0);
        assert_eq!(
            manager.loaded_scenes().collect::<Vec<_>>(),
            vec![TestScene::Generation]
        );
        assert_eq!(
            events(&log),
            vec!["welcome:enter", "welcome:exit", "generation:enter"]
        );
    }

    #[test]
    fn additive_load_keeps_existing_scenes() {
        let log: Log = Arc::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        context.scene_loads.load_scene(TestScene::Welcome, LoadMode::Single);
        manager.start(&mut context);

        context.scene_loads.load_scene(TestScene::Overlay, LoadMode::Additive);
        manager.process_loads(&mut context);
        manager.process_loads(&mut context);

        assert_eq!(
            manager.loaded_scenes().collect::<Vec<_>>(),
            vec![TestScene::Welcome, TestScene::Overlay]
        );
    }

    #[test]
    fn queued_loads_are_processed_one_at_a_time() {
        let log: Log = Arc::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        let first = context.scene_loads.load_scene(TestScene::Generation, LoadMode::Single);
        let second = context.scene_loads.load_scene(TestScene::Welcome, LoadMode::Single);

        manager.process_loads(&mut context);
        assert_eq!(first.progress(), READY_TO_ACTIVATE);
        assert_eq!(second.progress(), 0.0);
        assert_eq!(manager.pending_loads(), 2);

        manager.process_loads(&mut context);
        manager.process_loads(&mut context);
        manager.process_loads(&mut context);

        assert_eq!(second.progress(), 1.0);
        assert_eq!(manager.pending_loads(), 0);
        assert_eq!(
            manager.loaded_scenes().collect::<Vec<_>>(),
            vec![TestScene::Welcome]
        );
    }

    #[test]
    fn unregistered_scene_load_is_dropped() {
        let mut manager = SceneManager::<TestScene>::new();
        let mut context = GlobalContext::new();
        let handle = context.scene_loads.load_scene(TestScene::Overlay, LoadMode::Single);

        manager.process_loads(&mut context);

        assert_eq!(manager.pending_loads(), 0);
        assert_eq!(handle.progress(), 0.0);
        assert_eq!(manager.loaded_scenes().count(), 0);
    }
}
