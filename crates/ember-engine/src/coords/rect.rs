use super::Vector;

/// Axis-aligned rectangle in logical pixels (top-left origin, +Y down).
///
/// `position` is the top-left corner, `dimension` holds width and height.
/// Negative dimensions are kept as given; nothing here normalizes them.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub position: Vector,
    pub dimension: Vector,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            position: Vector::new(x, y),
            dimension: Vector::new(w, h),
        }
    }

    #[inline]
    pub const fn from_position_dimension(position: Vector, dimension: Vector) -> Self {
        Self { position, dimension }
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.position.y
    }

    #[inline]
    pub fn w(self) -> f64 {
        self.dimension.x
    }

    #[inline]
    pub fn h(self) -> f64 {
        self.dimension.y
    }

    #[inline]
    pub fn left(self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn right(self) -> f64 {
        self.position.x + self.dimension.x
    }

    #[inline]
    pub fn top(self) -> f64 {
        self.position.y
    }

    #[inline]
    pub fn bottom(self) -> f64 {
        self.position.y + self.dimension.y
    }

    #[inline]
    pub fn center(self) -> Vector {
        self.position + self.dimension / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.dimension.x <= 0.0 || self.dimension.y <= 0.0
    }

    /// Tests for overlap and resolves the side of contact.
    ///
    /// Touching edges count as overlapping. Returns `None` when the rects are
    /// apart on either axis, otherwise the side of `other` that `self` meets:
    ///
    /// - `ZERO` when both axes overlap with positive extent
    /// - `UP` / `DOWN` when the x ranges overlap strictly and only a top or
    ///   bottom edge touches (`UP` when `self` sits above `other`)
    /// - `LEFT` / `RIGHT` otherwise, when a left or right edge touches
    ///
    /// The strict horizontal-overlap test comes first. A corner touch, where
    /// neither axis overlaps strictly, falls through to `LEFT` or `RIGHT`.
    pub fn overlaps(self, other: Rect) -> Option<Vector> {
        let (a, b) = (self, other);

        let touching = a.right() >= b.left()
            && a.left() <= b.right()
            && a.bottom() >= b.top()
            && a.top() <= b.bottom();
        if !touching {
            return None;
        }

        let strict_x = a.right() > b.left() && a.left() < b.right();
        let strict_y = a.bottom() > b.top() && a.top() < b.bottom();

        let side = if strict_x {
            if strict_y {
                Vector::ZERO
            } else if a.bottom() <= b.top() {
                Vector::UP
            } else {
                Vector::DOWN
            }
        } else if a.right() <= b.left() {
            Vector::LEFT
        } else {
            Vector::RIGHT
        };

        Some(side)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.position.is_finite() && self.dimension.is_finite()
    }
}
