/// Pixel dimensions of an image or canvas
pub trait Dimensions {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Total number of pixels
    fn pixel_count(&self) -> u64 {
        u64::from(self.width()).saturating_mul(u64::from(self.height()))
    }
}

/// Plain `(width, height)` pair
impl Dimensions for (u32, u32) {
    fn width(&self) -> u32 {
        self.0
    }

    fn height(&self) -> u32 {
        self.1
    }
}
