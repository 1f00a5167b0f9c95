//! Nearest-hit queries against a [`World`].
//!
//! Linear in the number of primitives per ray; the worlds this renders hold
//! tens of walls, so there is no spatial index.

use crate::world::{NO_HIT_DISTANCE, Primitive, PrimitiveId, World};

/// The primitive a ray stopped at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<M> {
    pub id: PrimitiveId,
    pub material: M,
}

/// Outcome of one cast.  Lives for one frame only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayResult<M> {
    /// Distance along the ray; [`NO_HIT_DISTANCE`] when nothing was hit.
    pub distance: f64,
    pub hit: Option<Hit<M>>,
}

impl<M> RayResult<M> {
    pub const MISS: Self = Self {
        distance: NO_HIT_DISTANCE,
        hit: None,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    #[inline]
    pub fn material(&self) -> Option<&M> {
        self.hit.as_ref().map(|h| &h.material)
    }
}

/// Closest primitive along `ray`.
///
/// Ties keep the primitive added first.
pub fn cast<P: Primitive>(world: &World<P>, ray: &P::Ray) -> RayResult<P::Material> {
    let mut best = RayResult::MISS;
    for (id, prim) in world.iter().enumerate() {
        if let Some(x) = prim.intersect(ray) {
            if x.t < best.distance {
                best = RayResult {
                    distance: x.t,
                    hit: Some(Hit {
                        id,
                        material: x.material,
                    }),
                };
            }
        }
    }
    best
}

/// Cast every ray in order, replacing the contents of `out`.
pub fn cast_all<P, I>(world: &World<P>, rays: I, out: &mut Vec<RayResult<P::Material>>)
where
    P: Primitive,
    I: IntoIterator<Item = P::Ray>,
{
    out.clear();
    out.extend(rays.into_iter().map(|ray| cast(world, &ray)));
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Boxes, Ray2, Ray3, Walls};
    use glam::{DVec2, DVec3};
    use proptest::prelude::*;

    fn corridor() -> Walls {
        let mut w = Walls::new();
        w.add_segment(5.0, -5.0, 5.0, 5.0).unwrap();
        w.add_segment(2.0, -1.0, 2.0, 1.0).unwrap();
        w.add_segment(8.0, -5.0, 8.0, 5.0).unwrap();
        w
    }

    #[test]
    fn nearest_wall_wins_regardless_of_order() {
        let res = cast(&corridor(), &Ray2::from_angle(DVec2::ZERO, 0.0));
        assert!((res.distance - 2.0).abs() < 1e-12);
        assert_eq!(res.hit.map(|h| h.id), Some(1));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let res = cast(&corridor(), &Ray2::from_angle(DVec2::ZERO, 180.0));
        assert!(!res.is_hit());
        assert_eq!(res.distance, NO_HIT_DISTANCE);
    }

    #[test]
    fn empty_world_never_hits() {
        let res = cast(&Walls::new(), &Ray2::from_angle(DVec2::ZERO, 45.0));
        assert_eq!(res, RayResult::MISS);
    }

    #[test]
    fn equal_distance_keeps_first_primitive() {
        let mut w = Walls::new();
        w.add_segment(3.0, -1.0, 3.0, 1.0).unwrap();
        w.add_segment(3.0, 1.0, 3.0, -1.0).unwrap();
        let res = cast(&w, &Ray2::from_angle(DVec2::ZERO, 0.0));
        assert_eq!(res.hit.map(|h| h.id), Some(0));
    }

    #[test]
    fn nearest_box_carries_its_surface() {
        let mut boxes = Boxes::new();
        boxes
            .add_box(DVec3::new(-1.0, -1.0, 10.0), DVec3::new(1.0, 1.0, 12.0), 0.2)
            .unwrap();
        boxes
            .add_box(DVec3::new(-1.0, -1.0, 4.0), DVec3::new(1.0, 1.0, 5.0), 0.9)
            .unwrap();
        let res = cast(
            &boxes,
            &Ray3 {
                origin: DVec3::ZERO,
                dir: DVec3::Z,
            },
        );
        assert!((res.distance - 4.0).abs() < 1e-12);
        assert_eq!(res.material().map(|m| m.brightness), Some(0.9));
    }

    #[test]
    fn cast_all_reuses_the_output() {
        let walls = corridor();
        let mut out = vec![RayResult::MISS; 7];
        cast_all(
            &walls,
            [0.0, 180.0].map(|a| Ray2::from_angle(DVec2::ZERO, a)),
            &mut out,
        );
        assert_eq!(out.len(), 2);
        assert!(out[0].is_hit() && !out[1].is_hit());
    }

    fn point2() -> impl Strategy<Value = DVec2> {
        (-10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, y)| DVec2::new(x, y))
    }

    fn point3() -> impl Strategy<Value = DVec3> {
        (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, y, z)| DVec3::new(x, y, z))
    }

    proptest! {
        // Origin past x = ±10 and heading further out: every wall is behind.
        #[test]
        fn rays_leaving_the_walls_never_hit(
            ends in prop::collection::vec((point2(), point2()), 1..8),
            gap in 0.01f64..100.0,
            y in -50.0f64..50.0,
            angle in -89.0f64..89.0,
            flip in any::<bool>(),
        ) {
            let mut walls = Walls::new();
            for (a, b) in ends {
                walls.add_segment(a.x, a.y, b.x, b.y).unwrap();
            }
            let (x, heading) = if flip { (-10.0 - gap, 180.0 - angle) } else { (10.0 + gap, angle) };
            let res = cast(&walls, &Ray2::from_angle(DVec2::new(x, y), heading));
            prop_assert_eq!(res, RayResult::MISS);
        }

        // Origin past z = ±10 and moving further out along z.
        #[test]
        fn rays_leaving_the_boxes_never_hit(
            corners in prop::collection::vec((point3(), point3(), 0.0f64..=1.0), 1..8),
            gap in 0.01f64..100.0,
            xy in (-50.0f64..50.0, -50.0f64..50.0),
            dir in (-1.0f64..1.0, -1.0f64..1.0, 0.01f64..1.0),
            flip in any::<bool>(),
        ) {
            let mut boxes = Boxes::new();
            for (a, b, brightness) in corners {
                boxes.add_box(a.min(b), a.max(b), brightness).unwrap();
            }
            let sign = if flip { -1.0 } else { 1.0 };
            let ray = Ray3 {
                origin: DVec3::new(xy.0, xy.1, sign * (10.0 + gap)),
                dir: DVec3::new(dir.0, dir.1, sign * dir.2).normalize(),
            };
            prop_assert_eq!(cast(&boxes, &ray), RayResult::MISS);
        }
    }
}
