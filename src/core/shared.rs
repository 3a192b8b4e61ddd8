//=========================================================================
// Shared Scalars
//=========================================================================
//
// Lock-free f32 cell used by handles that several owners read and one
// owner writes (time scale, scene load progress).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU32, Ordering};

//=== AtomicF32 ===========================================================

/// An `f32` stored as its bit pattern inside an `AtomicU32`.
#[derive(Debug)]
pub(crate) struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub(crate) fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub(crate) fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

//=========================================================================
// Tests
//=========================================================================
