//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Runs the logic thread: scenes, screens, and the welcome flow all tick
// here, independently of the platform event loop.
//
// Architecture:
//   CoreSystemsOrchestrator
//     ├─ GlobalSystems  (scene manager)
//     └─ GlobalContext  (clock, localization, load queue, quit flag)
//
// Each tick:
//   1. Drain platform events (window close ends the loop)
//   2. Advance clock, update scenes, process scene loads
//   3. Stop if a quit was requested
//   4. Sleep to keep a fixed tick rate
//
// On exit the `on_quit` callback tells the platform to close, so a quit
// issued from a scene shuts the window down as well.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::info;

//=== Module Declarations =================================================

pub mod clock;
pub mod globals;
pub mod localization;
pub mod scene;
pub mod screen;
pub mod sequence;

pub(crate) mod platform_bridge;
pub(crate) mod shared;

//=== Internal Dependencies ===============================================

use globals::{GlobalContext, GlobalSystems};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::SceneKey;

//=== CoreSystemsOrchestrator =============================================

/// Owns the engine systems and their shared context on the logic thread.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey> {
    systems: GlobalSystems<S>,
    context: GlobalContext<S>,
}

impl<S: SceneKey> CoreSystemsOrchestrator<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
        }
    }

    /// Gives the caller access to systems and context before the run.
    pub fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S>, &mut GlobalContext<S>),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    //--- Ticking ----------------------------------------------------------

    /// Enters the initial scene.
    pub fn start(&mut self) {
        self.systems.start(&mut self.context);
    }

    /// Runs one logic tick covering `real_delta` of wall-clock time.
    pub fn tick(&mut self, real_delta: Duration) -> TickControl {
        self.systems.update(&mut self.context, real_delta);

        if self.context.quit_requested() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    //--- spawn_core_thread() ----------------------------------------------

    /// Spawns the logic thread ticking at `tps` until the window closes or
    /// a quit is requested. `on_quit` runs once when the loop ends.
    pub fn spawn_core_thread<Q>(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
        on_quit: Q,
    ) -> thread::JoinHandle<()>
    where
        Q: FnOnce() + Send + 'static,
    {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut orchestrator = self;
            let mut collector = EventCollector::new(receiver);

            orchestrator.start();
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "core", "Platform closed, core thread exiting");
                    break;
                }

                //--- Step 2: Update systems --------------------------------
                let real_delta = frame_start.duration_since(last_tick);
                last_tick = frame_start;

                if orchestrator.tick(real_delta) == TickControl::Exit {
                    info!(target: "core", "Quit requested, core thread exiting");
                    break;
                }

                //--- Step 3: Maintain pacing -------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            on_quit();
        })
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn context(&self) -> &GlobalContext<S> {
        &self.context
    }

    #[cfg(test)]
    pub(crate) fn systems(&self) -> &GlobalSystems<S> {
        &self.systems
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Scene;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    /// Requests a quit after a fixed number of updates.
    struct CountdownScene {
        remaining: u32,
    }

    impl Scene<TestScene> for CountdownScene {
        fn update(&mut self, context: &mut GlobalContext<TestScene>) {
            if self.remaining == 0 {
                context.request_quit();
            } else {
                self.remaining -= 1;
            }
        }
    }

    fn orchestrator(updates_before_quit: u32) -> CoreSystemsOrchestrator<TestScene> {
        let mut orchestrator = CoreSystemsOrchestrator::new();
        orchestrator.init_systems(|systems, _context| {
            systems.scene_manager.register_default(TestScene::Main, move || CountdownScene {
                remaining: updates_before_quit,
            });
        });
        orchestrator
    }

    //--- Ticking ----------------------------------------------------------

    #[test]
    fn tick_continues_until_quit_requested() {
        let mut orchestrator = orchestrator(2);
        orchestrator.start();
        assert!(orchestrator.systems().scene_manager.is_loaded(TestScene::Main));

        let frame = Duration::from_millis(16);
        assert_eq!(orchestrator.tick(frame), TickControl::Continue);
        assert_eq!(orchestrator.tick(frame), TickControl::Continue);
        assert_eq!(orchestrator.tick(frame), TickControl::Exit);

        assert_eq!(orchestrator.context().clock.frame(), 3);
        assert_eq!(orchestrator.context().clock.real_elapsed(), Duration::from_millis(48));
    }

    #[test]
    fn init_systems_reaches_context() {
        let mut orchestrator = CoreSystemsOrchestrator::<TestScene>::new();
        orchestrator.init_systems(|_systems, context| context.clock.time_scale().set(0.5));

        assert_eq!(orchestrator.context().clock.time_scale().get(), 0.5);
    }

    //--- Core Thread ------------------------------------------------------

    #[test]
    fn core_thread_stops_on_quit_and_notifies_platform() {
        let (_tx, rx) = unbounded();
        let notified = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&notified);

        let handle = orchestrator(3).spawn_core_thread(rx, 240.0, move || {
            flag.store(true, Ordering::SeqCst);
        });

        handle.join().unwrap();
        assert!(notified.load(Ordering::SeqCst));
    }

    #[test]
    fn core_thread_stops_on_window_close() {
        let (tx, rx) = unbounded();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        let handle = orchestrator(u32::MAX).spawn_core_thread(rx, 240.0, || {});
        handle.join().unwrap();
    }
}
