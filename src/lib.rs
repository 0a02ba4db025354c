#![forbid(unsafe_code)]
#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod chime;
pub mod cli;
pub mod clock;
pub mod controller;
pub mod digits;
pub mod flip;
pub mod host;
pub mod mode;
pub mod prefs;
pub mod schedule;
pub mod settings;
pub mod shortcut;
pub mod surface;

#[cfg(test)]
mod test_support;

pub use app::FlipClockApp;
pub use controller::{ClockController, ControllerOptions, RenderMode};
pub use mode::DisplayMode;

/// Per-user directories for settings and the remembered mode.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "github.tomykaira", "flip-clock")
}
