//! View and motion parameters, validated once at construction so the
//! per-frame code never has to guard its divisions.

use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ray count {0} is too small, at least 2 rays are required")]
    TooFewRays(usize),

    #[error("field of view {0}° must be finite and inside (0°, 180°)")]
    FieldOfView(f64),

    #[error("screen height must be at least one row")]
    ZeroScreenHeight,

    #[error("motion parameter `{name}` = {value} must be finite and positive")]
    Motion { name: &'static str, value: f64 },
}

/// Horizontal field of view, resolution and screen height of one frame.
///
/// Ray `i` of `ray_count` looks at `-fov/2 + fov/(ray_count-1) * i`
/// degrees relative to the viewing direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    fov_deg: f64,
    ray_count: usize,
    screen_height: usize,
}

impl ViewConfig {
    pub const MIN_RAYS: usize = 2;

    pub fn new(fov_deg: f64, ray_count: usize, screen_height: usize) -> Result<Self, ConfigError> {
        if ray_count < Self::MIN_RAYS {
            return Err(ConfigError::TooFewRays(ray_count));
        }
        // 180° and above would push the outermost rays behind the viewer,
        // where the fisheye cosine turns non-positive.
        if !fov_deg.is_finite() || fov_deg <= 0.0 || fov_deg >= 180.0 {
            return Err(ConfigError::FieldOfView(fov_deg));
        }
        if screen_height == 0 {
            return Err(ConfigError::ZeroScreenHeight);
        }
        Ok(Self {
            fov_deg,
            ray_count,
            screen_height,
        })
    }

    #[inline]
    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    #[inline]
    pub fn fov_rad(&self) -> f64 {
        self.fov_deg.to_radians()
    }

    /// Number of rays, which is also the screen width in columns.
    #[inline]
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    #[inline]
    pub fn screen_height(&self) -> usize {
        self.screen_height
    }

    /// First row of the lower (ground) half.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.screen_height / 2
    }

    /// Angular distance between neighbouring rays, degrees.
    #[inline]
    pub fn angle_step(&self) -> f64 {
        self.fov_deg / (self.ray_count - 1) as f64
    }

    /// Offset of ray `i` from the viewing direction, degrees.
    #[inline]
    pub fn relative_angle(&self, i: usize) -> f64 {
        -self.fov_deg * 0.5 + self.angle_step() * i as f64
    }

    /// Relative angles of every ray, left edge of the field of view first.
    pub fn relative_angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.ray_count).map(|i| self.relative_angle(i))
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            ray_count: 300,
            screen_height: 100,
        }
    }
}

/// How far one key press moves or turns the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// World units per step.
    pub step: f64,
    /// Degrees per turn.
    pub turn_deg: f64,
    /// Moves closer than this to any wall are rejected.
    pub collision_radius: f64,
    pub collide: bool,
}

impl MotionConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("step", self.step),
            ("turn", self.turn_deg),
            ("collision radius", self.collision_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Motion { name, value });
            }
        }
        Ok(self)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            turn_deg: 2.0,
            collision_radius: 0.1,
            collide: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ray_is_rejected() {
        assert_eq!(ViewConfig::new(60.0, 1, 10), Err(ConfigError::TooFewRays(1)));
        assert_eq!(ViewConfig::new(60.0, 0, 10), Err(ConfigError::TooFewRays(0)));
    }

    #[test]
    fn degenerate_fov_is_rejected() {
        for fov in [0.0, -10.0, 180.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(ViewConfig::new(fov, 10, 10), Err(ConfigError::FieldOfView(_))),
                "fov {fov} accepted"
            );
        }
    }

    #[test]
    fn zero_height_is_rejected() {
        assert_eq!(ViewConfig::new(60.0, 10, 0), Err(ConfigError::ZeroScreenHeight));
    }

    #[test]
    fn rays_span_the_whole_fov() {
        let view = ViewConfig::new(90.0, 5, 10).unwrap();
        let angles: Vec<f64> = view.relative_angles().collect();
        assert_eq!(angles, vec![-45.0, -22.5, 0.0, 22.5, 45.0]);
        assert_eq!(view.horizon(), 5);
    }

    #[test]
    fn motion_rejects_non_positive_values() {
        let bad = MotionConfig {
            step: 0.0,
            ..MotionConfig::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::Motion {
                name: "step",
                value: 0.0
            })
        );
        assert!(MotionConfig::default().validate().is_ok());
    }
}
