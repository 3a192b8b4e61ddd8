//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of platform events with bounded polling and shutdown
// detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → TickControl
//
// Bounded polling prevents a flooded channel from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events once per tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Returns [`TickControl::Exit`] when the window closed or the
    /// platform side of the channel is gone.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if Self::handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "core", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "core", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    fn handle_event(event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::WindowClosed => {
                debug!(target: "core", "Window closed event received");
                TickControl::Exit
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
