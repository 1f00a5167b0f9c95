//! Compositing layer.
//!
//! *The engine never touches the grid directly.*  It produces one
//! [`Column`] per ray and hands them to a type implementing [`Compositor`],
//! which paints them into a caller-owned [`ScreenBuffer`].  Putting the grid
//! on a display is a separate step ([`terminal`]).
//!
//! Where ray `i` of `n` lands is a [`ColumnOrder`]: camera rays are
//! enumerated from the right edge of the view to the left and are
//! mirrored, eye rays sweep from −x to +x and are laid out as cast.

use crate::engine::projection::Column;

mod screen;
pub mod terminal;

pub use screen::{GROUND, SKY, ScreenBuffer};

/// How ray indices map onto screen columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Ray `i` of `n` in column `n - i - 1`.
    Mirrored,
    /// Ray `i` in column `i`.
    RayOrder,
}

impl ColumnOrder {
    #[inline]
    pub fn column(self, ray: usize, n: usize) -> usize {
        match self {
            ColumnOrder::Mirrored => n - ray - 1,
            ColumnOrder::RayOrder => ray,
        }
    }
}

/// Paints projected columns into a frame.
pub trait Compositor {
    /// Size the frame for `width × height` cells.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Overwrite every row of screen column `x`.
    fn draw_column(&mut self, x: usize, column: Column);

    /// Finish the frame and **loan** it to `submit`.
    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&ScreenBuffer) -> R;
}

/// Blanket helper that lays a whole frame of ray-ordered columns out.
pub trait CompositorExt: Compositor {
    fn compose(&mut self, columns: &[Column], height: usize, order: ColumnOrder) {
        let n = columns.len();
        self.begin_frame(n, height);
        for (i, column) in columns.iter().enumerate() {
            self.draw_column(order.column(i, n), *column);
        }
    }
}
impl<T: Compositor + ?Sized> CompositorExt for T {}

impl Compositor for ScreenBuffer {
    fn begin_frame(&mut self, width: usize, height: usize) {
        if width != self.width() || height != self.height() {
            self.resize(width, height);
        }
    }

    fn draw_column(&mut self, x: usize, column: Column) {
        let horizon = self.height() / 2;
        for (y, cell) in self.column_mut(x).iter_mut().enumerate() {
            *cell = match column {
                Some(span) if span.contains(y) => span.glyph,
                _ if y >= horizon => GROUND,
                _ => SKY,
            };
        }
    }

    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&ScreenBuffer) -> R,
    {
        submit(self)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::projection::Span;

    #[test]
    fn empty_column_is_sky_over_ground() {
        let mut buf = ScreenBuffer::new(1, 4);
        buf.draw_column(0, None);
        assert_eq!(buf.lines(), vec![" ", " ", ".", "."]);
    }

    #[test]
    fn span_overrides_sky_and_ground() {
        let mut buf = ScreenBuffer::new(1, 5);
        buf.draw_column(
            0,
            Some(Span {
                top: 1,
                bottom: 4,
                glyph: '#',
            }),
        );
        assert_eq!(buf.lines(), vec![" ", "#", "#", "#", "."]);
    }

    #[test]
    fn compose_mirrors_ray_order_and_resizes() {
        let mut buf = ScreenBuffer::new(1, 1);
        let wall = Some(Span {
            top: 0,
            bottom: 2,
            glyph: '@',
        });
        buf.compose(&[wall, None, None], 2, ColumnOrder::Mirrored);
        let out = buf.end_frame(|fb| fb.lines());
        assert_eq!(out, vec!["  @", "..@"]);
    }

    #[test]
    fn ray_order_keeps_first_ray_on_the_left() {
        let mut buf = ScreenBuffer::default();
        let wall = Some(Span {
            top: 0,
            bottom: 2,
            glyph: '@',
        });
        buf.compose(&[wall, None, None], 2, ColumnOrder::RayOrder);
        assert_eq!(buf.lines(), vec!["@  ", "@.."]);
    }
}
