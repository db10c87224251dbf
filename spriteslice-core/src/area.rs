//! Frame regions in pixel space and their derived texel counterparts.
//!
//! A [`FrameArea`] always pairs a [`PixelArea`] with the [`TexelArea`] derived
//! from it and the image's texel scale. Texel areas are never built on their own.

use glam::{IVec2, Vec2};

/// Rectangle in image pixels. Offsets may be negative; keeping the rectangle
/// inside the image is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelArea {
    pub offset: IVec2,
    pub width: u32,
    pub height: u32,
}

impl PixelArea {
    pub const ZERO: Self = Self { offset: IVec2::ZERO, width: 0, height: 0 };

    pub const fn new(offset_x: i32, offset_y: i32, width: u32, height: u32) -> Self {
        Self { offset: IVec2::new(offset_x, offset_y), width, height }
    }

    /// Shape-validated constructor for signed input (descriptors, CLI, script
    /// bindings). Returns `None` for a negative width or height.
    pub fn try_new(offset_x: i32, offset_y: i32, width: i32, height: i32) -> Option<Self> {
        let width = u32::try_from(width).ok()?;
        let height = u32::try_from(height).ok()?;
        Some(Self::new(offset_x, offset_y, width, height))
    }

    pub fn offset_x(&self) -> i32 { self.offset.x }
    pub fn offset_y(&self) -> i32 { self.offset.y }
}

/// Normalized texture coordinates for a frame.
///
/// `lower`/`upper` may be swapped per axis to express a flip; that is the only
/// change allowed after derivation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TexelArea {
    pub lower: Vec2,
    pub upper: Vec2,
    pub width: f32,
    pub height: f32,
}

impl TexelArea {
    pub const ZERO: Self = Self { lower: Vec2::ZERO, upper: Vec2::ZERO, width: 0.0, height: 0.0 };

    fn derive(pixel: &PixelArea, scale: TexelScale) -> Self {
        let lower = pixel.offset.as_vec2() * scale.0;
        let width = pixel.width as f32 * scale.0.x;
        let height = pixel.height as f32 * scale.0.y;
        Self { lower, upper: lower + Vec2::new(width, height), width, height }
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        if flip_x { std::mem::swap(&mut self.lower.x, &mut self.upper.x); }
        if flip_y { std::mem::swap(&mut self.lower.y, &mut self.upper.y); }
    }

    pub fn flipped(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.set_flip(flip_x, flip_y);
        self
    }

    pub fn to_uv(&self) -> TexelUv {
        TexelUv { lower: self.lower.to_array(), upper: self.upper.to_array() }
    }
}

/// GPU-uploadable texel rectangle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexelUv {
    pub lower: [f32; 2],
    pub upper: [f32; 2],
}

/// Reciprocal image size. A zero dimension gives a zero scale on that axis
/// instead of an infinity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TexelScale(pub Vec2);

impl TexelScale {
    pub fn for_image(width: u32, height: u32) -> Self {
        let recip = |v: u32| if v == 0 { 0.0 } else { 1.0 / v as f32 };
        Self(Vec2::new(recip(width), recip(height)))
    }
}

/// A frame: a pixel rectangle and the texel rectangle derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameArea {
    pixel: PixelArea,
    texel: TexelArea,
}

/// Returned by lookups that miss (empty table, unknown name, wrong mode).
/// Zero-sized at the origin so drawing it is harmless.
pub const BAD_FRAME: FrameArea = FrameArea { pixel: PixelArea::ZERO, texel: TexelArea::ZERO };

impl FrameArea {
    pub fn new(pixel: PixelArea, scale: TexelScale) -> Self {
        Self { pixel, texel: TexelArea::derive(&pixel, scale) }
    }

    pub fn pixel(&self) -> &PixelArea { &self.pixel }
    pub fn texel(&self) -> &TexelArea { &self.texel }

    pub fn is_bad_frame(&self) -> bool { *self == BAD_FRAME }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texel_derivation_is_exact() {
        let scale = TexelScale::for_image(256, 128);
        let frame = FrameArea::new(PixelArea::new(64, 32, 32, 16), scale);
        let t = frame.texel();
        assert_eq!(t.lower, Vec2::new(0.25, 0.25));
        assert_eq!(t.width, 0.125);
        assert_eq!(t.height, 0.125);
        assert_eq!(t.upper, Vec2::new(0.375, 0.375));
    }

    #[test]
    fn flip_twice_restores() {
        let scale = TexelScale::for_image(256, 128);
        let original = *FrameArea::new(PixelArea::new(64, 32, 32, 16), scale).texel();
        let mut t = original;
        t.set_flip(true, false);
        assert_eq!(t.lower.x, original.upper.x);
        assert_eq!(t.upper.x, original.lower.x);
        assert_eq!(t.lower.y, original.lower.y);
        t.set_flip(true, false);
        assert_eq!(t, original);
        assert_eq!(original.flipped(true, true).flipped(true, true), original);
    }

    #[test]
    fn zero_sized_image_has_zero_scale() {
        let scale = TexelScale::for_image(0, 64);
        assert_eq!(scale.0, Vec2::new(0.0, 1.0 / 64.0));
        let frame = FrameArea::new(PixelArea::new(4, 4, 8, 8), scale);
        assert!(frame.texel().lower.x.is_finite());
    }

    #[test]
    fn shape_validation_rejects_negative_size() {
        assert!(PixelArea::try_new(0, 0, -1, 4).is_none());
        assert!(PixelArea::try_new(0, 0, 4, -1).is_none());
        assert_eq!(PixelArea::try_new(-3, 2, 0, 0), Some(PixelArea::new(-3, 2, 0, 0)));
    }

    #[test]
    fn bad_frame_is_zero() {
        assert!(BAD_FRAME.is_bad_frame());
        assert_eq!(BAD_FRAME.pixel().width, 0);
        assert_eq!(BAD_FRAME.texel().upper, Vec2::ZERO);
    }
}
