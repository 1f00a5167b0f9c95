mod camera;
mod container;
mod geometry;
mod scene;

pub use geometry::{
    Aabb, BoxSurface, GeometryError, Intersection, NO_HIT_DISTANCE, PARALLEL_EPS, Primitive,
    PrimitiveId, Ray2, Ray3, Segment, WallFacing,
};

pub use camera::{Camera, Eye, wrap_degrees};
pub use container::{Boxes, Walls, World};
pub use scene::Scene;
