//=========================================================================
// Welcome Flow Controller
//=========================================================================
//
// Drives the title scene: version carousel, locale switching, resource
// download, and the delayed hand-off into the gameplay or replay scene.
//
// Guards:
//   no catalog          → carousel, download and transitions are no-ops
//   download running    → same; at most one download at a time
//   exclusive_transitions (opt-in) → at most one transition at a time
//
// Flow:
//   command ──> controller mutates selection / launches a task
//   update() ──> DownloadTask::poll() ──> view text / prompt / refresh
//            └─> TransitionTask::step() ──> SceneLoader (Single mode)
//
// `refresh_selection_display()` is the single place that derives the
// version-dependent UI state; it runs after every selection change and
// after every download completion.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::catalog::VersionCatalog;
use super::download::{DownloadEvent, DownloadService, DownloadTask};
use super::packs::{PackDirectory, PackLocator};
use super::transition::TransitionTask;
use super::view::{AnimationCue, DetachedView, EnterGameSignal, WelcomeAction, WelcomeView};
use crate::core::globals::GlobalContext;
use crate::core::localization::{format_text, Localizer};
use crate::core::scene::SceneKey;
use crate::core::sequence::Step;

//=== Constants ===========================================================

/// Real-time pause between the entry cue and the scene load.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(320);

/// Load progress at which a scene counts as ready to activate.
pub const DEFAULT_READY_PROGRESS: f32 = 0.9;

/// Default resource-pack root, relative to the working directory.
pub const DEFAULT_PACK_ROOT: &str = "resourcepacks";

/// Localization key of the download failure message; `{0}` is the version.
pub const DOWNLOAD_FAILURE_KEY: &str = "status.error.download_resource_failure";

//=== WelcomeConfig =======================================================

/// Tunables of the welcome flow.
#[derive(Debug, Clone)]
pub struct WelcomeConfig<S: SceneKey> {
    pub gameplay_scene: S,
    pub replay_scene: S,
    pub transition_delay: Duration,
    pub ready_progress: f32,
    /// Shown as `v{app_version}` in the info line.
    pub app_version: String,
    /// Refuse a new transition while another one is in flight.
    pub exclusive_transitions: bool,
}

impl<S: SceneKey> WelcomeConfig<S> {
    pub fn new(gameplay_scene: S, replay_scene: S) -> Self {
        Self {
            gameplay_scene,
            replay_scene,
            transition_delay: DEFAULT_TRANSITION_DELAY,
            ready_progress: DEFAULT_READY_PROGRESS,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            exclusive_transitions: false,
        }
    }

    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay;
        self
    }

    /// # Panics
    ///
    /// Panics if `progress` is outside `[0.0, 1.0]`.
    pub fn with_ready_progress(mut self, progress: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&progress),
            "Ready progress must be within [0, 1], got {}",
            progress
        );
        self.ready_progress = progress;
        self
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    pub fn with_exclusive_transitions(mut self, exclusive: bool) -> Self {
        self.exclusive_transitions = exclusive;
        self
    }
}

//=== WelcomeCommand ======================================================

/// User intents forwarded from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeCommand {
    PreviousVersion,
    NextVersion,
    AdvanceLocale,
    StartDownload,
    EnterGameplay,
    EnterReplay,
    Quit,
}

//=== WelcomeFlowBuilder ==================================================

/// Wires a [`WelcomeFlowController`] to its collaborators.
///
/// Everything except the config is optional. Missing hookups turn the
/// matching feature off instead of failing.
pub struct WelcomeFlowBuilder<S: SceneKey> {
    config: WelcomeConfig<S>,
    catalog: Option<VersionCatalog>,
    packs: Option<Box<dyn PackLocator>>,
    downloads: Option<Box<dyn DownloadService>>,
    view: Option<Box<dyn WelcomeView>>,
    welcome_screen: Option<Box<dyn EnterGameSignal>>,
}

impl<S: SceneKey> WelcomeFlowBuilder<S> {
    pub fn new(config: WelcomeConfig<S>) -> Self {
        Self {
            config,
            catalog: None,
            packs: None,
            downloads: None,
            view: None,
            welcome_screen: None,
        }
    }

    pub fn with_catalog(mut self, catalog: VersionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Defaults to a [`PackDirectory`] rooted at [`DEFAULT_PACK_ROOT`].
    pub fn with_pack_locator(mut self, packs: impl PackLocator + 'static) -> Self {
        self.packs = Some(Box::new(packs));
        self
    }

    pub fn with_download_service(mut self, downloads: impl DownloadService + 'static) -> Self {
        self.downloads = Some(Box::new(downloads));
        self
    }

    pub fn with_view(mut self, view: impl WelcomeView + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn with_welcome_screen(mut self, screen: impl EnterGameSignal + 'static) -> Self {
        self.welcome_screen = Some(Box::new(screen));
        self
    }

    pub fn build(self) -> WelcomeFlowController<S> {
        WelcomeFlowController {
            config: self.config,
            catalog: self.catalog,
            packs: self
                .packs
                .unwrap_or_else(|| Box::new(PackDirectory::new(DEFAULT_PACK_ROOT))),
            downloads: self.downloads,
            view: self.view.unwrap_or_else(|| Box::new(DetachedView)),
            welcome_screen: self.welcome_screen,
            download: None,
            transitions: Vec::new(),
        }
    }
}

//=== WelcomeFlowController ===============================================

pub struct WelcomeFlowController<S: SceneKey> {
    config: WelcomeConfig<S>,
    catalog: Option<VersionCatalog>,
    packs: Box<dyn PackLocator>,
    downloads: Option<Box<dyn DownloadService>>,
    view: Box<dyn WelcomeView>,
    welcome_screen: Option<Box<dyn EnterGameSignal>>,
    download: Option<DownloadTask>,
    transitions: Vec<TransitionTask<S>>,
}

impl<S: SceneKey> WelcomeFlowController<S> {
    pub fn builder(config: WelcomeConfig<S>) -> WelcomeFlowBuilder<S> {
        WelcomeFlowBuilder::new(config)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Shows the version banner and selects the first version.
    pub fn start(&mut self) {
        let banner = self.version_banner();
        self.view.set_info_text(&banner);

        let Some(catalog) = self.catalog.as_mut() else {
            return;
        };
        if catalog.is_empty() {
            return;
        }

        catalog.select(0);
        self.refresh_selection_display();
    }

    /// Advances the running download and transitions by one tick.
    pub fn update(&mut self, context: &mut GlobalContext<S>) {
        self.poll_download(&*context.localization);

        let real_delta = context.clock.real_delta();
        let loads = &mut context.scene_loads;
        self.transitions
            .retain_mut(|transition| transition.step(real_delta, &mut *loads) == Step::Pending);
    }

    /// Dispatches a UI command.
    pub fn handle(&mut self, command: WelcomeCommand, context: &mut GlobalContext<S>) {
        match command {
            WelcomeCommand::PreviousVersion => self.previous_version(),
            WelcomeCommand::NextVersion => self.next_version(),
            WelcomeCommand::AdvanceLocale => self.advance_locale(&mut *context.localization),
            WelcomeCommand::StartDownload => self.start_download(),
            WelcomeCommand::EnterGameplay => self.enter_gameplay(),
            WelcomeCommand::EnterReplay => self.enter_replay(),
            WelcomeCommand::Quit => self.quit(context),
        }
    }

    //--- Selection --------------------------------------------------------

    /// Pushes the selected version's label, download prompt and action
    /// availability to the view.
    pub fn refresh_selection_display(&mut self) {
        let Some(entry) = self.catalog.as_ref().and_then(VersionCatalog::selected) else {
            return;
        };

        self.view.set_version_label(&format!("< {} >", entry.name));

        let present = self.packs.is_present(&entry.resource_version);
        self.view.set_download_prompt_hidden(present);

        for action in WelcomeAction::ALL {
            self.view.set_action_enabled(action, present);
        }
    }

    pub fn previous_version(&mut self) {
        self.step_selection(VersionCatalog::select_previous, AnimationCue::SelectLeft);
    }

    pub fn next_version(&mut self) {
        self.step_selection(VersionCatalog::select_next, AnimationCue::SelectRight);
    }

    //--- Localization -----------------------------------------------------

    /// Switches to the next available locale, wrapping after the last.
    ///
    /// Does nothing if the selected locale is not one of the available ones.
    pub fn advance_locale(&self, localizer: &mut dyn Localizer) {
        let locales = localizer.available_locales();
        let Some(current) = localizer.selected_locale() else {
            return;
        };
        let Some(index) = locales.iter().position(|locale| locale == current) else {
            debug!(target: "welcome", "Selected locale {} is not available, keeping it", current);
            return;
        };

        let next = locales[(index + 1) % locales.len()].clone();
        info!(target: "welcome", "Locale changed to {}", next);
        localizer.select_locale(next);
    }

    //--- Download ---------------------------------------------------------

    /// Starts downloading the selected version's resources.
    pub fn start_download(&mut self) {
        if self.is_locked() {
            return;
        }

        let Some(entry) = self.catalog.as_ref().and_then(VersionCatalog::selected) else {
            return;
        };
        let Some(downloads) = self.downloads.as_mut() else {
            debug!(target: "welcome", "No download service configured");
            return;
        };

        info!(target: "welcome", "Downloading resources for {}", entry.resource_version);
        let handle = downloads.begin(&entry.resource_version);
        self.download = Some(DownloadTask::new(entry.resource_version.clone(), handle));
    }

    //--- Transitions ------------------------------------------------------

    /// Signals the welcome screen and hands off to the gameplay scene.
    pub fn enter_gameplay(&mut self) {
        if self.transition_blocked() {
            return;
        }

        if let Some(screen) = self.welcome_screen.as_mut() {
            screen.begin_enter_game();
        }
        self.launch_transition(self.config.gameplay_scene);
    }

    /// Plays the entry cue and hands off to the replay scene.
    pub fn enter_replay(&mut self) {
        if self.transition_blocked() {
            return;
        }

        self.view.play_cue(AnimationCue::Enter);
        self.launch_transition(self.config.replay_scene);
    }

    /// Asks the engine to exit.
    pub fn quit(&self, context: &mut GlobalContext<S>) {
        context.request_quit();
    }

    //--- Queries ----------------------------------------------------------

    pub fn catalog(&self) -> Option<&VersionCatalog> {
        self.catalog.as_ref()
    }

    pub fn selected_resource_version(&self) -> Option<&str> {
        self.catalog
            .as_ref()
            .and_then(VersionCatalog::selected)
            .map(|entry| entry.resource_version.as_str())
    }

    pub fn selected_pack_format(&self) -> Option<u32> {
        self.catalog
            .as_ref()
            .and_then(VersionCatalog::selected)
            .map(|entry| entry.pack_format)
    }

    pub fn is_download_in_progress(&self) -> bool {
        self.download.is_some()
    }

    pub fn transitions_in_flight(&self) -> usize {
        self.transitions.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn version_banner(&self) -> String {
        format!("v{}", self.config.app_version)
    }

    fn is_locked(&self) -> bool {
        if self.catalog.is_none() {
            return true;
        }
        if self.download.is_some() {
            debug!(target: "welcome", "Ignoring request while a download is running");
            return true;
        }
        false
    }

    fn transition_blocked(&self) -> bool {
        if self.is_locked() {
            return true;
        }
        if self.config.exclusive_transitions && !self.transitions.is_empty() {
            debug!(target: "welcome", "Ignoring request while a transition is running");
            return true;
        }
        false
    }

    fn step_selection(&mut self, step: fn(&mut VersionCatalog), cue: AnimationCue) {
        if self.is_locked() {
            return;
        }

        if let Some(catalog) = self.catalog.as_mut() {
            step(catalog);
        }
        self.refresh_selection_display();
        self.view.play_cue(cue);
    }

    fn launch_transition(&mut self, target: S) {
        debug!(target: "welcome", "Starting transition to {:?}", target);
        self.transitions.push(TransitionTask::new(
            target,
            self.config.transition_delay,
            self.config.ready_progress,
        ));
    }

    fn poll_download(&mut self, localizer: &dyn Localizer) {
        let Some(task) = self.download.as_mut() else {
            return;
        };

        for event in task.poll() {
            match event {
                DownloadEvent::Status(key) => {
                    let text = format_text(localizer, &key, &[]);
                    self.view.set_info_text(&text);
                }
                DownloadEvent::ThresholdReached => self.view.set_download_prompt_hidden(true),
                DownloadEvent::Finished { succeeded } => {
                    self.finish_download(succeeded, localizer);
                    break;
                }
            }
        }
    }

    fn finish_download(&mut self, succeeded: bool, localizer: &dyn Localizer) {
        let Some(task) = self.download.take() else {
            return;
        };

        self.view.set_download_prompt_hidden(succeeded);

        let text = if succeeded {
            info!(target: "welcome", "Resources for {} downloaded", task.resource_version());
            self.version_banner()
        } else {
            info!(target: "welcome", "Download of {} failed", task.resource_version());
            format_text(localizer, DOWNLOAD_FAILURE_KEY, &[&task.resource_version()])
        };
        self.view.set_info_text(&text);

        self.refresh_selection_display();
    }
}

//=========================================================================
// Tests
//=========================================================================
