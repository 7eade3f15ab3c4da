/// Drawable area in screen pixels.
///
/// Renderers upload this to their viewport uniform; shaders map
/// `(0, 0)..(width, height)` onto NDC with +Y pointing down.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a pixel position to normalized device coordinates, matching the shaders.
    #[inline]
    pub fn to_ndc(self, x: f32, y: f32) -> [f32; 2] {
        [x / self.width * 2.0 - 1.0, 1.0 - y / self.height * 2.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_ndc_extents() {
        let vp = Viewport::from_pixels(640, 480);
        assert_eq!(vp.to_ndc(0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(vp.to_ndc(640.0, 480.0), [1.0, -1.0]);
        assert_eq!(vp.to_ndc(320.0, 240.0), [0.0, 0.0]);
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::from_pixels(0, 10).is_valid());
        assert!(Viewport::from_pixels(1, 1).is_valid());
    }
}
