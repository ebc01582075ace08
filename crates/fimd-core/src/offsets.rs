//! Flattens the 2-D boundary/interior point sets into signed 1-D strides
//! (`dy * width + dx`) once the image width is known. This is the point
//! where the circle geometry collapses into the scalar offsets the hot
//! loop in [`crate::scan`] actually dereferences.

use crate::bresenham::RadiusPoints;

/// Flat signed 1-D offset tables for one `(radius, width)` pair.
#[derive(Debug)]
pub struct OffsetTable {
    pub boundary: Vec<i32>,
    pub interior: Vec<i32>,
}

impl OffsetTable {
    pub fn build(points: &RadiusPoints, width: usize) -> Self {
        let w = width as i32;
        let boundary = points
            .boundary
            .iter()
            .map(|&(dx, dy)| dy * w + dx)
            .collect();
        let interior = points
            .interior
            .iter()
            .map(|&(dx, dy)| dy * w + dx)
            .collect();
        Self { boundary, interior }
    }
}
