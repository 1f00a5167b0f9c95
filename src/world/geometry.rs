use glam::{DVec2, DVec3};
use thiserror::Error;

/// Below this magnitude a determinant or direction component counts as zero
/// and the primitive is treated as parallel to the ray.
pub const PARALLEL_EPS: f64 = 1e-10;

/// Distance reported by a ray that hit nothing.  Hits at or beyond it are
/// discarded.
pub const NO_HIT_DISTANCE: f64 = 1e9;

/// Index of a primitive inside its [`World`](super::World).
pub type PrimitiveId = usize;

/// Things that can go wrong when adding a primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("coordinate {0} is not finite")]
    NonFinite(f64),

    #[error("brightness {0} outside [0, 1]")]
    Brightness(f64),

    #[error("box min corner {min} exceeds max corner {max}")]
    InvertedBox { min: DVec3, max: DVec3 },
}

pub(crate) fn ensure_finite(values: &[f64]) -> Result<(), GeometryError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&bad) => Err(GeometryError::NonFinite(bad)),
        None => Ok(()),
    }
}

/*----------------------------- rays ---------------------------------*/

/// Half-line on the map plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray2 {
    pub origin: DVec2,
    pub dir: DVec2,
}

impl Ray2 {
    /// Unit-length ray leaving `origin` at `angle_deg` (0° = +X, CCW positive).
    pub fn from_angle(origin: DVec2, angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Self {
            origin,
            dir: DVec2::new(c, s),
        }
    }
}

/// Half-line in box space (y is up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray3 {
    pub origin: DVec3,
    pub dir: DVec3,
}

/*--------------------------- primitives -----------------------------*/

/// Accepted ray/primitive crossing: ray parameter plus whatever the
/// projector needs to shade it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection<M> {
    pub t: f64,
    pub material: M,
}

/// Anything a ray can hit.
///
/// Degenerate cases (parallel ray, zero-length segment, origin outside a
/// slab the ray never crosses) return `None`; they are never errors.
pub trait Primitive {
    type Ray;
    type Material: Copy;

    fn intersect(&self, ray: &Self::Ray) -> Option<Intersection<Self::Material>>;
}

/// Wall on the map plane, `a → b`.  Immutable once added to a world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

/// Orientation of a hit wall; drives its shade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallFacing {
    /// `atan2(dy, dx)` of the wall direction, radians in (-π, π].
    pub angle: f64,
}

impl WallFacing {
    /// `|cos(angle)|`: walls running along the X axis are brightest.
    #[inline]
    pub fn brightness(self) -> f64 {
        self.angle.cos().abs()
    }
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            a: DVec2::new(x1, y1),
            b: DVec2::new(x2, y2),
        }
    }

    #[inline]
    pub fn facing(&self) -> WallFacing {
        let d = self.b - self.a;
        WallFacing {
            angle: d.y.atan2(d.x),
        }
    }
}

impl Primitive for Segment {
    type Ray = Ray2;
    type Material = WallFacing;

    /// Solve `O + t·D = A + s·(B − A)` by Cramer's rule.
    /// Accepted when `t ≥ 0` and `0 ≤ s ≤ 1`.
    fn intersect(&self, ray: &Ray2) -> Option<Intersection<WallFacing>> {
        let edge = self.b - self.a;
        let denom = ray.dir.perp_dot(edge);
        if denom.abs() < PARALLEL_EPS {
            return None;
        }

        let to_a = self.a - ray.origin;
        let t = to_a.perp_dot(edge) / denom;
        let s = to_a.perp_dot(ray.dir) / denom;

        (t >= 0.0 && (0.0..=1.0).contains(&s)).then(|| Intersection {
            t,
            material: self.facing(),
        })
    }
}

/// Axis-aligned box with a fixed brightness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
    /// 0.0 (dark) ..= 1.0 (bright), fixed at creation.
    pub brightness: f64,
}

/// What a box ray remembers about its hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSurface {
    /// World-space y of the hit point.
    pub height: f64,
    pub brightness: f64,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3, brightness: f64) -> Self {
        Self {
            min,
            max,
            brightness,
        }
    }
}

impl Primitive for Aabb {
    type Ray = Ray3;
    type Material = BoxSurface;

    /// Slab test: narrow `[t_near, t_far]` axis by axis.
    fn intersect(&self, ray: &Ray3) -> Option<Intersection<BoxSurface>> {
        // Same outer bounds as the "nothing hit" distance.
        let mut t_near = -NO_HIT_DISTANCE;
        let mut t_far = NO_HIT_DISTANCE;

        for axis in 0..3 {
            let (o, d) = (ray.origin[axis], ray.dir[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() > PARALLEL_EPS {
                let t1 = (lo - o) / d;
                let t2 = (hi - o) / d;
                t_near = t_near.max(t1.min(t2));
                t_far = t_far.min(t1.max(t2));
            } else if o < lo || o > hi {
                return None;
            }
        }

        if t_far < t_near || t_far <= 0.0 {
            return None;
        }

        // Origin inside the box: the near plane is behind us.
        let t = if t_near > 0.0 { t_near } else { t_far };
        Some(Intersection {
            t,
            material: BoxSurface {
                height: ray.origin.y + ray.dir.y * t,
                brightness: self.brightness,
            },
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn ray_hits_wall_straight_ahead() {
        let wall = Segment::new(0.0, -5.0, 0.0, 5.0);
        let hit = wall
            .intersect(&Ray2::from_angle(DVec2::new(-3.0, 0.0), 0.0))
            .expect("wall in front must be hit");
        assert!((hit.t - 3.0).abs() < 1e-12);
        assert!((hit.material.angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn parallel_wall_is_never_hit() {
        let ray = Ray2::from_angle(DVec2::ZERO, 0.0);
        for (x1, x2) in [(1.0, 5.0), (-5.0, -1.0), (-2.0, 2.0)] {
            assert!(Segment::new(x1, 0.0, x2, 0.0).intersect(&ray).is_none());
        }
    }

    #[test]
    fn wall_behind_the_ray_is_ignored() {
        let wall = Segment::new(-1.0, -5.0, -1.0, 5.0);
        assert!(wall.intersect(&Ray2::from_angle(DVec2::ZERO, 0.0)).is_none());
    }

    #[test]
    fn ray_past_segment_end_misses() {
        let wall = Segment::new(2.0, 1.0, 2.0, 5.0);
        assert!(wall.intersect(&Ray2::from_angle(DVec2::ZERO, 0.0)).is_none());
    }

    #[test]
    fn segment_endpoint_counts_as_hit() {
        let wall = Segment::new(2.0, 0.0, 2.0, 5.0);
        let hit = wall.intersect(&Ray2::from_angle(DVec2::ZERO, 0.0)).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_is_never_hit() {
        let dot = Segment::new(1.0, 0.0, 1.0, 0.0);
        assert!(dot.intersect(&Ray2::from_angle(DVec2::ZERO, 0.0)).is_none());
    }

    #[test]
    fn wall_brightness_follows_orientation() {
        assert!((Segment::new(0.0, 0.0, 4.0, 0.0).facing().brightness() - 1.0).abs() < 1e-12);
        assert!(Segment::new(0.0, 0.0, 0.0, 4.0).facing().brightness() < 1e-12);
    }

    #[test]
    fn origin_inside_box_reports_exit_distance() {
        let cube = Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0), 0.5);
        let ray = Ray3 {
            origin: DVec3::ZERO,
            dir: DVec3::Z,
        };
        let hit = cube.intersect(&ray).expect("ray from inside must hit");
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert_eq!(hit.material.brightness, 0.5);
        assert!(hit.material.height.abs() < 1e-12);
    }

    #[test]
    fn box_ahead_reports_entry_distance_and_height() {
        let b = Aabb::new(DVec3::new(-1.0, -1.0, 4.0), DVec3::new(1.0, 3.0, 6.0), 1.0);
        let dir = DVec3::new(0.0, 0.5, 1.0).normalize();
        let hit = b.intersect(&Ray3 { origin: DVec3::ZERO, dir }).unwrap();
        // Enters through the z = 4 face at y = 2.
        assert!((hit.t - 4.0 / dir.z).abs() < 1e-9);
        assert!((hit.material.height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let b = Aabb::new(DVec3::new(2.0, -1.0, 4.0), DVec3::new(3.0, 1.0, 6.0), 1.0);
        let ray = Ray3 {
            origin: DVec3::ZERO,
            dir: DVec3::Z,
        };
        assert!(b.intersect(&ray).is_none());
    }

    #[test]
    fn box_behind_origin_misses() {
        let b = Aabb::new(DVec3::new(-1.0, -1.0, -6.0), DVec3::new(1.0, 1.0, -4.0), 1.0);
        let ray = Ray3 {
            origin: DVec3::ZERO,
            dir: DVec3::Z,
        };
        assert!(b.intersect(&ray).is_none());
    }
}
