//! Movement blocking by ray probes.
//!
//! A position is blocked when any of eight rays fanned out every 45° around
//! it hits a wall closer than the collision radius.  The probe builds its
//! rays at the candidate position directly, so the camera is never moved
//! just to look around.

use glam::DVec2;

use crate::config::MotionConfig;
use crate::engine::raycast::cast;
use crate::world::{Camera, Ray2, Walls};

/// Rays per probe, evenly spaced around the full circle.
pub const PROBE_RAYS: usize = 8;

/// `true` if a wall lies within `radius` of `position`.
pub fn probe(walls: &Walls, position: DVec2, radius: f64) -> bool {
    (0..PROBE_RAYS).any(|i| {
        let angle = 360.0 / PROBE_RAYS as f64 * i as f64;
        let res = cast(walls, &Ray2::from_angle(position, angle));
        res.is_hit() && res.distance < radius
    })
}

/// Move `camera` by `forward` / `side` (left positive) step units unless the
/// target is blocked.  Returns whether the camera moved.
pub fn try_step(
    walls: &Walls,
    camera: &mut Camera,
    forward: f64,
    side: f64,
    motion: &MotionConfig,
) -> bool {
    let target = camera.step_target(forward * motion.step, side * motion.step);
    if motion.collide && probe(walls, target, motion.collision_radius) {
        log::trace!("move to ({:.3}, {:.3}) blocked", target.x, target.y);
        return false;
    }
    camera.set_pos(target);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;

    fn wall_at_x1() -> Walls {
        let mut w = Walls::new();
        w.add_segment(1.0, -5.0, 1.0, 5.0).unwrap();
        w
    }

    #[test]
    fn position_next_to_wall_is_blocked() {
        assert!(probe(&wall_at_x1(), DVec2::new(0.95, 0.0), 0.1));
    }

    #[test]
    fn position_just_outside_radius_is_free() {
        assert!(!probe(&wall_at_x1(), DVec2::new(1.0 - 0.1 - 1e-6, 0.0), 0.1));
        assert!(!probe(&wall_at_x1(), DVec2::new(0.0, 0.0), 0.1));
    }

    #[test]
    fn empty_world_never_blocks() {
        assert!(!probe(&Walls::new(), DVec2::ZERO, 10.0));
    }

    #[test]
    fn step_stops_at_wall() {
        let walls = wall_at_x1();
        let mut cam = Camera::new(DVec2::new(0.5, 0.0), 0.0, ViewConfig::default());
        let motion = MotionConfig {
            step: 0.2,
            collision_radius: 0.15,
            ..MotionConfig::default()
        };

        assert!(try_step(&walls, &mut cam, 1.0, 0.0, &motion));
        assert!((cam.pos().x - 0.7).abs() < 1e-12);
        // The next step would end 0.1 from the wall.
        assert!(!try_step(&walls, &mut cam, 1.0, 0.0, &motion));
        assert!((cam.pos().x - 0.7).abs() < 1e-12);
    }

    #[test]
    fn disabled_collision_walks_through() {
        let walls = wall_at_x1();
        let mut cam = Camera::new(DVec2::new(0.9, 0.0), 0.0, ViewConfig::default());
        let motion = MotionConfig {
            collide: false,
            ..MotionConfig::default()
        };
        assert!(try_step(&walls, &mut cam, 2.0, 0.0, &motion));
        assert!((cam.pos().x - 1.1).abs() < 1e-12);
    }

    #[test]
    fn strafe_moves_left_of_heading() {
        let mut cam = Camera::new(DVec2::ZERO, 0.0, ViewConfig::default());
        assert!(try_step(&Walls::new(), &mut cam, 0.0, 1.0, &MotionConfig::default()));
        assert!((cam.pos() - DVec2::new(0.0, 0.1)).length() < 1e-12);
    }
}
