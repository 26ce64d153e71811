//! Named action presets.
//!
//! A preset binds an [`Action`](crate::action::Action) to a motor output on a
//! named driver, so that applications can refer to motions by name.

mod registry;

pub use registry::{Preset, PresetRegistry, MAX_PRESETS};
