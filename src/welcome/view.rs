//=========================================================================
// Welcome View
//=========================================================================
//
// Outbound UI hookups of the welcome flow.
//
// Every hookup is optional: the default methods do nothing, so a view
// that lacks a widget simply leaves the method unimplemented.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, PoisonError};

/// Actions whose availability depends on the selected version's assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WelcomeAction {
    Enter,
    Replay,
    ResourcePacks,
}

impl WelcomeAction {
    pub const ALL: [WelcomeAction; 3] = [Self::Enter, Self::Replay, Self::ResourcePacks];
}

/// Animation triggers fired by the welcome flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    /// Carousel moved to the previous version.
    SelectLeft,
    /// Carousel moved to the next version.
    SelectRight,
    /// The welcome scene itself starts leaving (replay entry).
    Enter,
}

/// UI surface of the welcome scene.
pub trait WelcomeView: Send {
    fn set_version_label(&mut self, _text: &str) {}

    /// Status line under the carousel (version banner, download status).
    fn set_info_text(&mut self, _text: &str) {}

    /// Hides or shows the "download needed" prompt.
    fn set_download_prompt_hidden(&mut self, _hidden: bool) {}

    fn set_action_enabled(&mut self, _action: WelcomeAction, _enabled: bool) {}

    fn play_cue(&mut self, _cue: AnimationCue) {}
}

/// A view with no widgets attached.
#[derive(Debug, Default)]
pub struct DetachedView;

impl WelcomeView for DetachedView {}

/// Screen object notified when gameplay entry begins.
///
/// To signal a screen that also lives in the scene's `ScreenRegistry`,
/// share it as `Arc<Mutex<_>>`: register one clone and hand the other to
/// `with_welcome_screen`. Both then act on the same screen state.
pub trait EnterGameSignal: Send {
    fn begin_enter_game(&mut self);
}

impl<T: EnterGameSignal> EnterGameSignal for Arc<Mutex<T>> {
    fn begin_enter_game(&mut self) {
        self.lock().unwrap_or_else(PoisonError::into_inner).begin_enter_game();
    }
}
