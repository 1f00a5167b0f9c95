//! Plain-text persistence of a [`Scene`](crate::world::Scene).

mod scene_file;

pub use scene_file::{LoadWarning, SceneFileError, Warnings, load, parse, save, write};
