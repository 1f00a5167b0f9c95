use std::fmt;

/// Glyph above the horizon where nothing was hit.
pub const SKY: char = ' ';
/// Glyph below the horizon where nothing was hit.
pub const GROUND: char = '.';

/// Character grid, `width` columns × `height` rows, stored column-major so
/// a projected column is one contiguous slice.
///
/// Owned by the caller and handed to the compositor every frame; the backing
/// `Vec` is reused as long as the resolution does not grow.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ScreenBuffer {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl ScreenBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![SKY; width * height],
        }
    }

    /// Change resolution in place.  Cell contents are unspecified afterwards;
    /// the next frame overwrites every one of them.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.resize(width * height, SKY);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[x * self.height + y])
    }

    /// Rows `0..height` of column `x`, top first.
    pub fn column_mut(&mut self, x: usize) -> &mut [char] {
        let start = x * self.height;
        &mut self.cells[start..start + self.height]
    }

    /// Glyphs of row `y`, left to right.
    pub fn row(&self, y: usize) -> impl Iterator<Item = char> + '_ {
        (0..self.width).map(move |x| self.cells[x * self.height + y])
    }

    /// Every row as an owned string.  Handy in tests and for one-shot output.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row(y).collect()).collect()
    }
}

impl fmt::Display for ScreenBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for ch in self.row(y) {
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
