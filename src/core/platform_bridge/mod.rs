//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the windowing layer and the logic thread.
//
// Components:
// - `interface`: event, command and error types
// - `event_collector`: core-side event draining
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformCommand, PlatformError, PlatformEvent};
