use glam::DVec2;

use super::{Boxes, Camera, Walls};
use crate::config::ViewConfig;

/// A wall map together with the camera exploring it.
///
/// This is the unit the scene file stores and the interactive loop drives.
/// `boxes` live in their own space, seen from an [`Eye`](super::Eye) at the
/// origin; only the camera's view settings carry over to them.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub walls: Walls,
    pub boxes: Boxes,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            walls: Walls::new(),
            boxes: Boxes::new(),
        }
    }
}

impl Default for Scene {
    /// Camera at the origin facing +X with the default view.
    fn default() -> Self {
        Self::new(Camera::new(DVec2::ZERO, 0.0, ViewConfig::default()))
    }
}
