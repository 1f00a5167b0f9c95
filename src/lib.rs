//! Column ray-caster for character-grid displays.
//!
//! One ray per screen column is cast from a viewpoint into a world of
//! primitives; the nearest hit is projected into a vertical span of shaded
//! cells.  Two worlds share the same pipeline:
//!
//! * [`world::Segment`] walls seen from a movable 2-D [`world::Camera`];
//! * axis-aligned [`world::Aabb`] boxes seen from a fixed [`world::Eye`]
//!   at the origin with a per-frame pitch.
//!
//! ```text
//! World ──cast──▶ RayResult[] ──Projector──▶ Column[] ──Compositor──▶ ScreenBuffer
//! ```

pub mod config;
pub mod engine;
pub mod renderer;
pub mod save;
pub mod world;

pub use config::{ConfigError, MotionConfig, ViewConfig};
