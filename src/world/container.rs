use glam::DVec3;

use super::geometry::{Aabb, GeometryError, PrimitiveId, Segment, ensure_finite};

/// Append-only list of primitives.
///
/// Order carries no meaning for rendering (the nearest hit wins) but is kept
/// stable so a [`PrimitiveId`] stays valid for the lifetime of the world and
/// saved scenes reload in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct World<P> {
    items: Vec<P>,
}

/// Map made of wall segments.
pub type Walls = World<Segment>;
/// Scene made of axis-aligned boxes.
pub type Boxes = World<Aabb>;

impl<P> Default for World<P> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<P> World<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append without validation; see `add_segment` / `add_box` for the
    /// checked entry points.
    pub fn push(&mut self, primitive: P) -> PrimitiveId {
        self.items.push(primitive);
        self.items.len() - 1
    }

    #[inline]
    pub fn get(&self, id: PrimitiveId) -> Option<&P> {
        self.items.get(id)
    }

    #[inline]
    pub fn as_slice(&self) -> &[P] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, P> IntoIterator for &'a World<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl World<Segment> {
    /// Add the wall `(x1, y1) → (x2, y2)`.  Zero-length walls are accepted;
    /// they simply never report a hit.
    pub fn add_segment(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> Result<PrimitiveId, GeometryError> {
        ensure_finite(&[x1, y1, x2, y2])?;
        Ok(self.push(Segment::new(x1, y1, x2, y2)))
    }
}

impl World<Aabb> {
    pub fn add_box(
        &mut self,
        min: DVec3,
        max: DVec3,
        brightness: f64,
    ) -> Result<PrimitiveId, GeometryError> {
        ensure_finite(&min.to_array())?;
        ensure_finite(&max.to_array())?;
        if !(0.0..=1.0).contains(&brightness) {
            return Err(GeometryError::Brightness(brightness));
        }
        if min.cmpgt(max).any() {
            return Err(GeometryError::InvertedBox { min, max });
        }
        Ok(self.push(Aabb::new(min, max, brightness)))
    }
}
