pub mod collision;
pub mod pipeline;
pub mod projection;
pub mod raycast;

pub use collision::{PROBE_RAYS, probe, try_step};
pub use pipeline::{BoxFrame, Frame, WallFrame, cast_boxes, render_boxes, render_walls};
pub use projection::{
    BOX_RAMP, BoxProjector, Column, HeightRange, Projector, REFERENCE_HALF_HEIGHT, Span,
    WALL_RAMP, WallProjector,
};
pub use raycast::{Hit, RayResult, cast, cast_all};
