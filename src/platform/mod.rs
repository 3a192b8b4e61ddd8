//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  CoreSystems         │
//  │   CloseRequested ────────┼───>│   EventCollector     │
//  │          crossbeam       │    │   GlobalSystems      │
//  │                          │    │                      │
//  │   user_event(Quit) <─────┼────│   quit requested     │
//  │          EventLoopProxy  │    │                      │
//  └──────────────────────────┘    └──────────────────────┘
// ```
//
// Winit mandates the main thread on macOS/iOS, so the loop runs on the
// thread that called `Engine::run()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformCommand, PlatformError, PlatformEvent};

//=== Platform ============================================================

/// Window owner running on the main thread.
///
/// # Lifecycle
///
/// 1. `Platform::create_event_loop()` on the main thread
/// 2. `Platform::new(sender, title)`
/// 3. `platform.run(event_loop)` blocks until the loop exits
/// 4. Window close → `WindowClosed` to core → exit;
///    core quit → `PlatformCommand::Quit` → exit
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    window_title: String,

    /// Channel to send events to core thread.
    event_sender: Sender<PlatformEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>, window_title: impl Into<String>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_title: window_title.into(),
            event_sender,
        }
    }

    /// Creates the event loop accepting [`PlatformCommand`]s.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::EventLoopCreation`] if the OS refuses.
    pub fn create_event_loop() -> Result<EventLoop<PlatformCommand>, PlatformError> {
        EventLoop::<PlatformCommand>::with_user_event()
            .build()
            .map_err(PlatformError::EventLoopCreation)
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or core asks to quit.
    pub fn run(mut self, event_loop: EventLoop<PlatformCommand>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn notify_core(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Core thread is gone, dropping {:?}", event);
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<PlatformCommand> for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_title.clone())
            .with_inner_size(LogicalSize::new(1280, 720));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify_core(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            info!(target: "platform", "Window close requested");
            self.notify_core(PlatformEvent::WindowClosed);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, command: PlatformCommand) {
        match command {
            PlatformCommand::Quit => {
                info!(target: "platform", "Core requested quit, closing window");
                self.window = None;
                event_loop.exit();
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(tx, "Aetheric");
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert_eq!(platform.window_title, "Aetheric");
    }

    #[test]
    fn notify_core_sends_event() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(tx, "Aetheric");

        platform.notify_core(PlatformEvent::WindowClosed);

        assert_eq!(rx.try_recv(), Ok(PlatformEvent::WindowClosed));
    }

    #[test]
    fn notify_core_survives_disconnected_channel() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(tx, "Aetheric");
        drop(rx);

        platform.notify_core(PlatformEvent::WindowClosed);
    }
}
