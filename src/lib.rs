//=========================================================================
// Aetheric Front-End - Library Root
//=========================================================================
//
// Screen coordination and the title-scene flow of the Aetheric client.
//
// Layout:
// - `core`: clock, scenes, screens, localization, sequencing
// - `welcome`: the title scene (version carousel, downloads, hand-off)
// - `engine`: `EngineBuilder` / `Engine` runtime facade
// - `platform`: winit window host, kept private
//
// Typical usage:
// ```no_run
// use aetheric_frontend::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum GameScene { Welcome }
// impl SceneKey for GameScene {}
//
// EngineBuilder::<GameScene>::new().build().run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod prelude;
pub mod welcome;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
