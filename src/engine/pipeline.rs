// ──────────────────────────────────────────────────────────────────────────
// engine/pipeline.rs
//
//   World ─ cast_all ─▶ RayResult[] ─ Projector ─▶ Column[] ─ Compositor
//
//   * Frame<M> owns the per-frame scratch so nothing is reallocated once
//     the first frame has sized it.
//   * render_walls / render_boxes pick the viewpoint and projector for
//     each world; everything after the cast is shared.
// ──────────────────────────────────────────────────────────────────────────

use crate::config::ViewConfig;
use crate::engine::{
    projection::{BoxProjector, Column, HeightRange, Projector, WallProjector},
    raycast::{RayResult, cast_all},
};
use crate::renderer::{Compositor, CompositorExt};
use crate::world::{Boxes, BoxSurface, Camera, Eye, Primitive, Walls, WallFacing, World};

/// Reusable scratch for one kind of world.
#[derive(Clone, Debug)]
pub struct Frame<M> {
    results: Vec<RayResult<M>>,
    columns: Vec<Column>,
}

pub type WallFrame = Frame<WallFacing>;
pub type BoxFrame = Frame<BoxSurface>;

impl<M> Default for Frame<M> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            columns: Vec::new(),
        }
    }
}

impl<M: Copy> Frame<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ray results of the last frame, in ray order.
    pub fn results(&self) -> &[RayResult<M>] {
        &self.results
    }

    /// Projected columns of the last frame, in ray order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Cast, project and composite one frame.
    pub fn render<P, I, J, C>(
        &mut self,
        world: &World<P>,
        rays: I,
        view: &ViewConfig,
        projector: &mut J,
        target: &mut C,
    ) where
        P: Primitive<Material = M>,
        I: IntoIterator<Item = P::Ray>,
        J: Projector<M>,
        C: Compositor,
    {
        cast_all(world, rays, &mut self.results);
        debug_assert_eq!(self.results.len(), view.ray_count());

        projector.project(view, &self.results, &mut self.columns);
        target.compose(&self.columns, view.screen_height(), J::ORDER);

        log::debug!(
            "frame: {}/{} rays hit, {} primitives",
            self.results.iter().filter(|r| r.is_hit()).count(),
            self.results.len(),
            world.len()
        );
    }
}

/// Render the wall map as seen from `camera` into `target`.
pub fn render_walls<C: Compositor>(
    walls: &Walls,
    camera: &Camera,
    frame: &mut WallFrame,
    target: &mut C,
) {
    frame.render(walls, camera.rays(), camera.view(), &mut WallProjector, target);
}

/// Cast every ray of `eye` at `pitch_deg` into the boxes.
///
/// Pure: no display, no scratch.  [`render_boxes`] is the composited form.
pub fn cast_boxes(boxes: &Boxes, eye: &Eye, pitch_deg: f64) -> Vec<RayResult<BoxSurface>> {
    let mut out = Vec::with_capacity(eye.view().ray_count());
    cast_all(boxes, eye.rays(pitch_deg), &mut out);
    out
}

/// Render the box scene at `pitch_deg` into `target`.  Returns the hit-height
/// range the columns were scaled against, `None` if nothing was hit.
pub fn render_boxes<C: Compositor>(
    boxes: &Boxes,
    eye: &Eye,
    pitch_deg: f64,
    frame: &mut BoxFrame,
    target: &mut C,
) -> Option<HeightRange> {
    let mut projector = BoxProjector::default();
    frame.render(boxes, eye.rays(pitch_deg), eye.view(), &mut projector, target);
    projector.range()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
