//=========================================================================
// Aetheric Front-End Engine
//=========================================================================
//
// Main entry point and coordinator for the front-end runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns logic thread
//         ├─ with_channel_capacity()    runs platform
//         └─ with_window_title()        blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::platform_bridge::{PlatformCommand, PlatformEvent};
use crate::core::scene::SceneKey;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window title**: "Aetheric"
///
/// # Examples
///
/// ```no_run
/// use aetheric_frontend::EngineBuilder;
/// use aetheric_frontend::core::scene::SceneKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Welcome }
/// impl SceneKey for GameScene {}
///
/// EngineBuilder::<GameScene>::new()
///     .with_tps(120.0)
///     .with_window_title("Aetheric Launcher")
///     .build()
///     .init(|systems, context| {
///         // systems.scene_manager.register_default(GameScene::Welcome, ...);
///         // context.set_localization(...);
///     })
///     .run();
/// ```
pub struct EngineBuilder<S: SceneKey> {
    config: RuntimeConfig,
    _scenes: PhantomData<S>,
}

/// Runtime settings collected by the builder.
#[derive(Debug, Clone, PartialEq)]
struct RuntimeConfig {
    tps: f64,
    channel_capacity: usize,
    window_title: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window_title: "Aetheric".to_string(),
        }
    }
}

impl<S: SceneKey> EngineBuilder<S> {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            _scenes: PhantomData,
        }
    }

    /// Logic ticks per second. The welcome flow's real-time delays are
    /// measured per tick, so this bounds their resolution.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Bound of the platform → core event channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    pub fn build(self) -> Engine<S> {
        debug!(target: "engine", "Building engine with {:?}", self.config);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(),
            config: self.config,
        }
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Front-end runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► SceneManager → WelcomeScene → ScreenCoordinator, WelcomeFlowController
///   │
///   └─► Platform (Event Loop)
///         └─► Window
///
/// platform → core: crossbeam channel (PlatformEvent)
/// core → platform: EventLoopProxy (PlatformCommand)
/// ```
pub struct Engine<S: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<S>,
    config: RuntimeConfig,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Configures systems and context before the engine runs.
    ///
    /// Register scenes on `systems.scene_manager`, install localization
    /// on `context`, and capture `context.clock.time_scale()` for screen
    /// coordinators that need to pause the simulation.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S>, &mut GlobalContext<S>),
    {
        self.orchestrator.init_systems(init_fn);
        debug!(target: "engine", "Engine systems configured");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event loop and the platform → core channel
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Window close or quit request: both sides stop, logic thread is joined
    pub fn run(self) {
        let RuntimeConfig {
            tps,
            channel_capacity,
            window_title,
        } = self.config;
        info!(target: "engine", "Starting front-end runtime at {} TPS", tps);

        //--- 1. Event loop and channel -----------------------------------
        let event_loop = match Platform::create_event_loop() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                error!(target: "engine", "Platform error: {}", e);
                return;
            }
        };
        let proxy = event_loop.create_proxy();

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(channel_capacity);

        //--- 2. Logic thread ---------------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, tps, move || {
            if proxy.send_event(PlatformCommand::Quit).is_err() {
                debug!(target: "engine", "Event loop already closed, quit not delivered");
            }
        });

        //--- 3. Platform (blocks) ----------------------------------------
        if let Err(e) = Platform::new(tx, window_title).run(event_loop) {
            error!(target: "engine", "Platform error: {}", e);
        }

        //--- 4. Join the logic thread ------------------------------------
        if let Err(e) = core_handle.join() {
            error!(target: "engine", "Core thread panicked: {:?}", e);
        }

        info!(target: "engine", "Front-end runtime stopped");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    //--- EngineBuilder ----------------------------------------------------

    #[test]
    fn builder_starts_from_runtime_defaults() {
        let builder = EngineBuilder::<TestScene>::new();
        assert_eq!(builder.config, RuntimeConfig::default());
        assert_eq!(builder.config.tps, 60.0);
        assert_eq!(builder.config.window_title, "Aetheric");
    }

    #[test]
    fn builder_settings_reach_engine() {
        let engine = EngineBuilder::<TestScene>::new()
            .with_tps(30.0)
            .with_channel_capacity(16)
            .with_window_title("Launcher")
            .build();

        assert_eq!(
            engine.config,
            RuntimeConfig {
                tps: 30.0,
                channel_capacity: 16,
                window_title: "Launcher".to_string(),
            }
        );
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn non_positive_tps_is_rejected() {
        EngineBuilder::<TestScene>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn empty_channel_is_rejected() {
        EngineBuilder::<TestScene>::new().with_channel_capacity(0);
    }

    //--- Engine -----------------------------------------------------------

    #[test]
    fn init_closure_sees_context() {
        let engine = EngineBuilder::<TestScene>::new()
            .build()
            .init(|_systems, context| context.request_quit());

        assert!(engine.orchestrator.context().quit_requested());
    }
}
