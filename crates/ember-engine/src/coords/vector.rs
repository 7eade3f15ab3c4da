use core::ops::{Add, Div, Mul, Sub};

/// 2D vector in logical pixels, double precision.
///
/// Doubles as a size (`w`, `h`) when used as a rect dimension.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0);
    pub const UP: Vector = Vector::new(0.0, 1.0);
    pub const DOWN: Vector = Vector::new(0.0, -1.0);
    pub const LEFT: Vector = Vector::new(-1.0, 0.0);
    pub const RIGHT: Vector = Vector::new(1.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn w(self) -> f64 {
        self.x
    }

    #[inline]
    pub fn h(self) -> f64 {
        self.y
    }

    #[inline]
    pub fn add_scalar(self, s: f64) -> Vector {
        Vector::new(self.x + s, self.y + s)
    }

    #[inline]
    pub fn sub_scalar(self, s: f64) -> Vector {
        Vector::new(self.x - s, self.y - s)
    }

    #[inline]
    pub fn mul_scalar(self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s)
    }

    /// Divides both components by `s`.
    ///
    /// A divisor within `f64::EPSILON` of zero leaves the vector unchanged.
    #[inline]
    pub fn div_scalar(self, s: f64) -> Vector {
        if s.abs() <= f64::EPSILON {
            return self;
        }
        Vector::new(self.x / s, self.y / s)
    }

    #[inline]
    pub fn mul_vector(self, rhs: Vector) -> Vector {
        Vector::new(self.x * rhs.x, self.y * rhs.y)
    }

    /// Component-wise division; each component is guarded like [`div_scalar`](Self::div_scalar).
    #[inline]
    pub fn div_vector(self, rhs: Vector) -> Vector {
        let guarded = |a: f64, b: f64| if b.abs() <= f64::EPSILON { a } else { a / b };
        Vector::new(guarded(self.x, rhs.x), guarded(self.y, rhs.y))
    }

    /// Linear interpolation `a + (b - a) * t`. `t` is not clamped.
    #[inline]
    pub fn lerp(a: Vector, b: Vector, t: f64) -> Vector {
        a + (b - a) * t
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(a: Vector, b: Vector) -> f64 {
        (b - a).magnitude()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        self.mul_scalar(rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    #[inline]
    fn div(self, rhs: f64) -> Vector {
        self.div_scalar(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector { Vector::new(x, y) }

    // ── arithmetic ────────────────────────────────────────────────────────

    #[test]
    fn add_then_sub_restores_original() {
        let a = v(3.5, -2.0);
        let b = v(0.25, 10.0);
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn scalar_ops_apply_to_both_components() {
        assert_eq!(v(1.0, 2.0).add_scalar(1.0), v(2.0, 3.0));
        assert_eq!(v(1.0, 2.0).sub_scalar(1.0), v(0.0, 1.0));
        assert_eq!(v(1.0, 2.0) * 3.0, v(3.0, 6.0));
        assert_eq!(v(3.0, 6.0) / 3.0, v(1.0, 2.0));
    }

    #[test]
    fn div_by_zero_is_noop() {
        assert_eq!(v(4.0, 8.0).div_scalar(0.0), v(4.0, 8.0));
        assert_eq!(v(4.0, 8.0).div_scalar(f64::EPSILON / 2.0), v(4.0, 8.0));
    }

    #[test]
    fn mul_undoes_div_for_nonzero_scalars() {
        let a = v(12.5, -3.75);
        for s in [2.0, -0.5, 3.0, 0.1, 1e6, 1e-6] {
            let back = a.div_scalar(s).mul_scalar(s);
            assert!((back - a).magnitude() < 1e-9, "s = {s}: {back:?}");
        }
    }

    #[test]
    fn div_vector_guards_each_component() {
        assert_eq!(v(4.0, 8.0).div_vector(v(2.0, 0.0)), v(2.0, 8.0));
        assert_eq!(v(4.0, 8.0).mul_vector(v(0.5, 2.0)), v(2.0, 16.0));
    }

    // ── lerp ──────────────────────────────────────────────────────────────

    #[test]
    fn lerp_endpoints() {
        let a = v(0.0, 10.0);
        let b = v(20.0, -10.0);
        assert_eq!(Vector::lerp(a, b, 0.0), a);
        assert_eq!(Vector::lerp(a, b, 1.0), b);
        assert_eq!(Vector::lerp(a, b, 0.5), v(10.0, 0.0));
    }

    #[test]
    fn lerp_extrapolates_outside_unit_range() {
        assert_eq!(Vector::lerp(v(0.0, 0.0), v(1.0, 1.0), 2.0), v(2.0, 2.0));
    }

    // ── magnitude / distance ──────────────────────────────────────────────

    #[test]
    fn magnitude_of_3_4_is_5() {
        assert_eq!(v(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Vector::distance(v(0.0, 0.0), v(3.0, 4.0)), 5.0);
        assert_eq!(Vector::distance(v(0.0, 0.0), v(0.0, 4.0)), 4.0);
        assert_eq!(Vector::distance(v(1.0, 1.0), v(1.0, 1.0)), 0.0);
    }

    #[test]
    fn direction_constants() {
        assert_eq!(Vector::UP, v(0.0, 1.0));
        assert_eq!(Vector::DOWN, v(0.0, -1.0));
        assert_eq!(Vector::LEFT, v(-1.0, 0.0));
        assert_eq!(Vector::RIGHT, v(1.0, 0.0));
    }
}
