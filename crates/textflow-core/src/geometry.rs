/// A point in PDF user space (origin bottom-left, y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box in PDF user space.
///
/// Coordinates follow the PDF convention:
/// - `left`: left edge
/// - `bottom`: lower edge (y grows upward)
/// - `right`: right edge
/// - `top`: upper edge
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BBox {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Vertical midpoint.
    pub fn mid_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &BBox) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.bottom >= self.bottom
            && other.top <= self.top
    }
}

/// 2-D affine transform `[a b c d e f]` as used by PDF content streams.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let (a, b, c, d, e, f) = (
            self.a as f64,
            self.b as f64,
            self.c as f64,
            self.d as f64,
            self.e as f64,
            self.f as f64,
        );
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Bitwise comparison of the linear part (`a`, `b`, `c`, `d`).
    ///
    /// The translation is ignored: it only encodes where a glyph was placed,
    /// which baseline and proximity checks already account for.
    pub fn same_linear_part(&self, other: &Matrix) -> bool {
        self.a.to_bits() == other.a.to_bits()
            && self.b.to_bits() == other.b.to_bits()
            && self.c.to_bits() == other.c.to_bits()
            && self.d.to_bits() == other.d.to_bits()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_new() {
        let bbox = BBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bbox.left, 10.0);
        assert_eq!(bbox.bottom, 20.0);
        assert_eq!(bbox.right, 30.0);
        assert_eq!(bbox.top, 40.0);
    }

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(bbox.width(), 40.0);
        assert_eq!(bbox.height(), 40.0);
        assert_eq!(bbox.mid_y(), 40.0);
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 20.0, 30.0, 40.0);
        let b = BBox::new(5.0, 25.0, 35.0, 45.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(5.0, 20.0, 35.0, 45.0));
    }

    #[test]
    fn test_bbox_contains() {
        let outer = BBox::new(0.0, 0.0, 100.0, 20.0);
        assert!(outer.contains(&BBox::new(10.0, 2.0, 40.0, 12.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&BBox::new(90.0, 2.0, 110.0, 12.0)));
    }

    #[test]
    fn test_matrix_transform_point() {
        let m = Matrix::scale(2.0, 3.0).concat(&Matrix::translate(10.0, 20.0));
        let p = m.transform_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 23.0));
    }

    #[test]
    fn test_matrix_linear_part_ignores_translation() {
        let a = Matrix::new(12.0, 0.0, 0.0, 12.0, 72.0, 700.0);
        let b = Matrix::new(12.0, 0.0, 0.0, 12.0, 140.0, 650.0);
        let c = Matrix::new(10.0, 0.0, 0.0, 10.0, 72.0, 700.0);
        assert!(a.same_linear_part(&b));
        assert!(!a.same_linear_part(&c));
    }
}
