//=========================================================================
// Welcome Flow
//=========================================================================
//
// Title-scene logic: version carousel, locale switching, resource
// download and the hand-off into gameplay or replay.
//
// Architecture:
//   WelcomeScene (Scene)
//     ├─ ScreenCoordinator + ScreenRegistry
//     └─ WelcomeFlowController
//          ├─ VersionCatalog
//          ├─ PackLocator        (asset presence)
//          ├─ DownloadService ──> DownloadTask (polled per tick)
//          ├─ WelcomeView        (UI hookups)
//          └─ TransitionTask*  ──> SceneLoader
//
//=========================================================================

//=== Module Declarations =================================================

mod catalog;
mod controller;
mod download;
mod packs;
mod scene;
mod transition;
mod view;

//=== Public API ==========================================================

pub use catalog::{VersionCatalog, VersionEntry};
pub use controller::{
    WelcomeCommand, WelcomeConfig, WelcomeFlowBuilder, WelcomeFlowController,
    DEFAULT_PACK_ROOT, DEFAULT_READY_PROGRESS, DEFAULT_TRANSITION_DELAY, DOWNLOAD_FAILURE_KEY,
};
pub use download::{
    download_channel, DownloadEvent, DownloadHandle, DownloadReporter, DownloadService,
    DownloadTask, ThreadedDownloadService,
};
pub use packs::{PackDirectory, PackLocator};
pub use scene::{command_channel, WelcomeScene};
pub use transition::TransitionTask;
pub use view::{AnimationCue, DetachedView, EnterGameSignal, WelcomeAction, WelcomeView};
