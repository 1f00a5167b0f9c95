use glam::{DVec2, DVec3};

use super::geometry::{Ray2, Ray3};
use crate::config::ViewConfig;

/// Wrap an angle into `[0, 360)` degrees.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.
    if w >= 360.0 { 0.0 } else { w }
}

/// Viewpoint on the map plane.
///
/// * `heading` is in degrees (0 = +X, counter-clockwise) and is kept in
///   `[0, 360)` by every setter.
/// * Only the pose changes during a session; the view is fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: DVec2,
    heading: f64,
    view: ViewConfig,
}

impl Camera {
    pub fn new(pos: DVec2, heading: f64, view: ViewConfig) -> Self {
        Self {
            pos,
            heading: wrap_degrees(heading),
            view,
        }
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    #[inline]
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn set_pos(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = wrap_degrees(heading);
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline]
    pub fn forward(&self) -> DVec2 {
        let (s, c) = self.heading.to_radians().sin_cos();
        DVec2::new(c, s)
    }

    /// Unit vector pointing to the camera's left (forward rotated +90°).
    #[inline]
    pub fn left(&self) -> DVec2 {
        self.forward().perp()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Position reached by moving `forward` units ahead and `side` units to
    /// the left.  The camera itself is not moved.
    pub fn step_target(&self, forward: f64, side: f64) -> DVec2 {
        self.pos + self.forward() * forward + self.left() * side
    }

    /// Rotate by `delta_deg` (positive = turn left).
    pub fn turn(&mut self, delta_deg: f64) {
        self.set_heading(self.heading + delta_deg);
    }

    /*──────────────────────── ray enumeration ───────────────────────*/

    /// Ray `i` of the current frame, cast at `heading + relative_angle(i)`.
    #[inline]
    pub fn ray(&self, i: usize) -> Ray2 {
        Ray2::from_angle(self.pos, self.heading + self.view.relative_angle(i))
    }

    pub fn rays(&self) -> impl Iterator<Item = Ray2> + '_ {
        (0..self.view.ray_count()).map(|i| self.ray(i))
    }
}

/// Fixed viewpoint at the origin of box space, looking down +Z.
///
/// Pitch is not stored; it is supplied to every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eye {
    view: ViewConfig,
}

impl Eye {
    pub const ORIGIN: DVec3 = DVec3::ZERO;

    pub fn new(view: ViewConfig) -> Self {
        Self { view }
    }

    #[inline]
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Direction of ray `i` tilted by `pitch_deg` (positive looks up).
    ///
    /// ```text
    /// (cos p · sin r, sin p, cos p · cos r)
    /// ```
    pub fn direction(&self, i: usize, pitch_deg: f64) -> DVec3 {
        let (sr, cr) = self.view.relative_angle(i).to_radians().sin_cos();
        let (sp, cp) = pitch_deg.to_radians().sin_cos();
        DVec3::new(cp * sr, sp, cp * cr).normalize_or_zero()
    }

    pub fn rays(&self, pitch_deg: f64) -> impl Iterator<Item = Ray3> + '_ {
        (0..self.view.ray_count()).map(move |i| Ray3 {
            origin: Self::ORIGIN,
            dir: self.direction(i, pitch_deg),
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
