/// RGBA8 image produced by an offscreen render
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Number of bins in a luminance histogram
pub const HISTOGRAM_BINS: usize = 256;

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self { width, height, pixels }
    }

    /// Uniform image filled with one color
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self { width, height, pixels }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Per-pixel luminance (Rec. 709 weights), rounded into `0..=255`
    pub fn luminance(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.chunks_exact(4).map(|px| {
            let l = 0.2126 * px[0] as f64 + 0.7152 * px[1] as f64 + 0.0722 * px[2] as f64;
            l.round().clamp(0.0, 255.0) as u8
        })
    }

    /// Pixel counts per luminance level
    pub fn luminance_histogram(&self) -> Vec<u64> {
        let mut bins = vec![0u64; HISTOGRAM_BINS];
        for l in self.luminance() {
            bins[l as usize] += 1;
        }
        bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_histogram_single_bin() {
        let image = Image::filled(4, 2, [255, 255, 255, 255]);
        let histogram = image.luminance_histogram();
        assert_eq!(histogram.len(), HISTOGRAM_BINS);
        assert_eq!(histogram[255], 8);
        assert_eq!(histogram.iter().sum::<u64>(), 8);
    }

    #[test]
    fn test_luminance_weights() {
        let image = Image::new(3, 1, vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255]);
        let l: Vec<u8> = image.luminance().collect();
        assert_eq!(l, vec![54, 182, 18]);
    }

    #[test]
    fn test_black_image() {
        let image = Image::filled(2, 2, [0, 0, 0, 255]);
        assert_eq!(image.luminance_histogram()[0], 4);
    }
}
