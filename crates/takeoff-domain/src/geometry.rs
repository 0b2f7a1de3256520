//! Bounding-box geometry for OCR fragments
//!
//! The OCR collaborator delivers each fragment with a polygon of four or
//! more points. Deduplication only needs axis-aligned overlap, so the
//! polygon is collapsed to its bounding rectangle on ingestion.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle of an OCR fragment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum x coordinate
    pub min_x: f64,
    /// Minimum y coordinate
    pub min_y: f64,
    /// Maximum x coordinate
    pub max_x: f64,
    /// Maximum y coordinate
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box from explicit corner coordinates
    ///
    /// # Panics
    /// Panics if min exceeds max on either axis.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        assert!(min_x <= max_x, "min_x must be <= max_x");
        assert!(min_y <= max_y, "min_y must be <= max_y");
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Collapse an OCR polygon (4+ points) to its axis-aligned bounds
    ///
    /// Returns `None` when fewer than 4 points are supplied, which the
    /// extractor treats as a malformed fragment.
    pub fn from_polygon(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 4 {
            return None;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Area of the box
    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }

    /// Area of the rectangle intersection with another box (0 when disjoint)
    pub fn intersection_area(&self, other: &BoundingBox) -> f64 {
        let w = (self.max_x.min(other.max_x) - self.min_x.max(other.min_x)).max(0.0);
        let h = (self.max_y.min(other.max_y) - self.min_y.max(other.min_y)).max(0.0);
        w * h
    }

    /// Intersection area over this box's own area
    ///
    /// Zero-area boxes report zero overlap rather than dividing by zero.
    pub fn overlap_ratio(&self, other: &BoundingBox) -> f64 {
        let own = self.area();
        if own <= 0.0 {
            return 0.0;
        }
        self.intersection_area(other) / own
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_polygon() {
        let bbox =
            BoundingBox::from_polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]).unwrap();
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.max_x, 10.0);
        assert_eq!(bbox.area(), 50.0);
    }

    #[test]
    fn test_from_polygon_too_few_points() {
        assert!(BoundingBox::from_polygon(&[(0.0, 0.0), (1.0, 1.0)]).is_none());
    }

    #[test]
    fn test_intersection_area() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersection_area(&b), 25.0);
        assert_eq!(b.intersection_area(&a), 25.0);
    }

    #[test]
    fn test_disjoint_boxes() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(5.0, 5.0, 6.0, 6.0);
        assert_eq!(a.intersection_area(&b), 0.0);
        assert_eq!(a.overlap_ratio(&b), 0.0);
    }

    #[test]
    fn test_overlap_ratio_is_over_own_area() {
        // Small box fully inside a large one: overlap is 100% of the small
        // box but only 1% of the large one.
        let small = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let large = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!((small.overlap_ratio(&large) - 1.0).abs() < 1e-9);
        assert!((large.overlap_ratio(&small) - 0.01).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn test_invalid_bounds() {
        BoundingBox::new(10.0, 0.0, 0.0, 10.0);
    }
}
