//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages crossing the platform/core thread boundary, and the errors
// the platform layer can raise.
//
//   platform ──PlatformEvent (crossbeam)──> core
//   core     ──PlatformCommand (winit user event)──> platform
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use winit::error::EventLoopError;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlatformEvent {
    /// Window close requested by the user or the OS.
    WindowClosed,
}

//=== PlatformCommand =====================================================

/// Requests sent from core to the platform event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlatformCommand {
    /// The logic thread stopped; close the window and leave the loop.
    Quit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(EventLoopError),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
