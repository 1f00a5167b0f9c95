//! Hit distance → vertical span of glyphs.
//!
//! Both worlds go through [`Projector`]; the wall projector works ray by
//! ray, the box projector needs the whole frame first because it rescales
//! every column against the frame's height range.

use crate::config::ViewConfig;
use crate::engine::raycast::RayResult;
use crate::renderer::ColumnOrder;
use crate::world::{BoxSurface, WallFacing};

/// Wall shades, darkest first.
pub const WALL_RAMP: [char; 8] = [':', '-', '=', '+', '*', '#', '%', '@'];

/// Box shades, darkest first.
pub const BOX_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Height (in world units) every wall is assumed to rise above and sink
/// below eye level.  Walls carry no height of their own.
pub const REFERENCE_HALF_HEIGHT: f64 = 5.0;

/// Rows `top..bottom` of one column painted with `glyph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub top: usize,
    pub bottom: usize,
    pub glyph: char,
}

impl Span {
    #[inline]
    pub fn rows(&self) -> usize {
        self.bottom - self.top
    }

    #[inline]
    pub fn contains(&self, row: usize) -> bool {
        (self.top..self.bottom).contains(&row)
    }
}

/// Projected column in ray order; `None` is drawn as sky over ground.
pub type Column = Option<Span>;

/// Turns one frame of ray results into columns.
pub trait Projector<M> {
    /// Screen placement of the projected columns.
    const ORDER: ColumnOrder;

    /// `results[i]` belongs to ray `i` of `view`; `columns` is replaced with
    /// one entry per result.
    fn project(&mut self, view: &ViewConfig, results: &[RayResult<M>], columns: &mut Vec<Column>);
}

/*──────────────────────────── shared math ────────────────────────────*/

/// Rows covered by a surface at `distance`:
///
/// ```text
/// rows = ⌊ atan(REFERENCE_HALF_HEIGHT / distance) / fov · screen_height ⌋
/// ```
///
/// Non-increasing in `distance`; a distance of zero yields `π/2 / fov`
/// screens.
pub fn projected_rows(distance: f64, view: &ViewConfig) -> i64 {
    let angle = (REFERENCE_HALF_HEIGHT / distance).atan();
    (angle / view.fov_rad() * view.screen_height() as f64) as i64
}

/// Centre `rows` vertically on a screen of `height` rows and clip.
pub fn centered_span(rows: i64, height: usize, glyph: char) -> Column {
    let h = height as i64;
    let top = (h - rows) / 2;
    let bottom = top.saturating_add(rows);
    let (top, bottom) = (top.clamp(0, h), bottom.clamp(0, h));
    (top < bottom).then_some(Span {
        top: top as usize,
        bottom: bottom as usize,
        glyph,
    })
}

/// Nearest ramp entry: `round(brightness · 7)`.
pub fn wall_glyph(facing: WallFacing) -> char {
    let last = WALL_RAMP.len() - 1;
    let idx = (facing.brightness() * last as f64 + 0.5) as usize;
    WALL_RAMP[idx.min(last)]
}

/// Lower ramp entry: `⌊brightness · 9⌋`, clamped.
pub fn box_glyph(brightness: f64) -> char {
    let last = BOX_RAMP.len() - 1;
    let idx = (brightness * last as f64).max(0.0) as usize;
    BOX_RAMP[idx.min(last)]
}

/*──────────────────────────── walls ──────────────────────────────────*/

/// Per-ray projection with fisheye correction.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallProjector;

impl WallProjector {
    pub fn column(view: &ViewConfig, ray: usize, result: &RayResult<WallFacing>) -> Column {
        let facing = result.material()?;
        // Project onto the view direction so flat walls stay flat.
        let corrected = result.distance * view.relative_angle(ray).to_radians().cos();
        let rows = projected_rows(corrected, view);
        centered_span(rows, view.screen_height(), wall_glyph(*facing))
    }
}

impl Projector<WallFacing> for WallProjector {
    // Ray 0 is the clockwise edge of the view, the right of the screen.
    const ORDER: ColumnOrder = ColumnOrder::Mirrored;

    fn project(
        &mut self,
        view: &ViewConfig,
        results: &[RayResult<WallFacing>],
        columns: &mut Vec<Column>,
    ) {
        columns.clear();
        columns.extend(
            results
                .iter()
                .enumerate()
                .map(|(i, r)| Self::column(view, i, r)),
        );
    }
}

/*──────────────────────────── boxes ──────────────────────────────────*/

/// Lowest and highest hit point of one box frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRange {
    pub min: f64,
    pub max: f64,
}

impl HeightRange {
    pub fn of<'a>(surfaces: impl IntoIterator<Item = &'a BoxSurface>) -> Option<Self> {
        surfaces.into_iter().fold(None, |acc, s| {
            Some(match acc {
                None => HeightRange {
                    min: s.height,
                    max: s.height,
                },
                Some(r) => HeightRange {
                    min: r.min.min(s.height),
                    max: r.max.max(s.height),
                },
            })
        })
    }

    /// Position of `height` inside the range, 0.0 ..= 1.0.  `None` when
    /// every hit shares one height.
    pub fn normalize(&self, height: f64) -> Option<f64> {
        let span = self.max - self.min;
        (span > 0.0).then(|| (height - self.min) / span)
    }
}

/// Frame-global projection: each column rises from the bottom of the screen
/// in proportion to where its hit height sits in the frame's range.
///
/// A frame whose hits all share one height has no range to rescale
/// against; its columns fall back to the perspective height of the hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxProjector {
    range: Option<HeightRange>,
}

impl BoxProjector {
    /// Range of the last projected frame; `None` if nothing was hit.
    pub fn range(&self) -> Option<HeightRange> {
        self.range
    }

    fn column(view: &ViewConfig, range: Option<HeightRange>, result: &RayResult<BoxSurface>) -> Column {
        let surface = result.material()?;
        let h = view.screen_height() as i64;
        let rows = match range.and_then(|r| r.normalize(surface.height)) {
            Some(n) => (n * h as f64) as i64,
            None => projected_rows(result.distance, view),
        }
        .clamp(1, h);
        Some(Span {
            top: (h - rows) as usize,
            bottom: h as usize,
            glyph: box_glyph(surface.brightness),
        })
    }
}

impl Projector<BoxSurface> for BoxProjector {
    // Ray 0 looks towards −x, the left of the screen.
    const ORDER: ColumnOrder = ColumnOrder::RayOrder;

    fn project(
        &mut self,
        view: &ViewConfig,
        results: &[RayResult<BoxSurface>],
        columns: &mut Vec<Column>,
    ) {
        self.range = HeightRange::of(results.iter().filter_map(RayResult::material));
        columns.clear();
        columns.extend(results.iter().map(|r| Self::column(view, self.range, r)));
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
