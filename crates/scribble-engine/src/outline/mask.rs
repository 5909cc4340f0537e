use image::{GrayImage, Luma, RgbaImage};

/// Mask value for pixels whose alpha clears the threshold.
/// `find_contours` treats non-zero pixels as foreground.
pub const FOREGROUND: u8 = 255;

/// Binary silhouette mask built from an RGBA asset.
///
/// Any pixel whose alpha exceeds the threshold is foreground; everything
/// else, including the padding ring added around the image, is
/// background. The padding keeps the contour pass from ever reading the
/// image frame as a shape.
pub struct AlphaMask {
    image: GrayImage,
    foreground_px: usize,
}

impl AlphaMask {
    /// Build a padded mask from raw RGBA bytes (4 bytes per pixel,
    /// row-major, origin top-left).
    pub fn from_rgba(
        pixels: &[u8],
        width: u32,
        height: u32,
        alpha_threshold: u8,
        pad_fraction: f32,
    ) -> Self {
        let pad_x = (width as f32 * pad_fraction).round() as u32;
        let pad_y = (height as f32 * pad_fraction).round() as u32;
        let mut image = GrayImage::new(width + 2 * pad_x, height + 2 * pad_y);
        let mut foreground_px = 0;

        let expected = (width as usize) * (height as usize);
        for (i, px) in pixels.chunks_exact(4).take(expected).enumerate() {
            if px[3] > alpha_threshold {
                let x = (i as u32) % width;
                let y = (i as u32) / width;
                image.put_pixel(x + pad_x, y + pad_y, Luma([FOREGROUND]));
                foreground_px += 1;
            }
        }

        Self {
            image,
            foreground_px,
        }
    }

    pub fn from_image(image: &RgbaImage, alpha_threshold: u8, pad_fraction: f32) -> Self {
        Self::from_rgba(
            image.as_raw(),
            image.width(),
            image.height(),
            alpha_threshold,
            pad_fraction,
        )
    }

    /// The padded binary mask.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Padded canvas width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Padded canvas height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when no pixel cleared the alpha threshold.
    pub fn is_blank(&self) -> bool {
        self.foreground_px == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_square(size: u32, inset: u32, alpha: u8) -> RgbaImage {
        let mut img = RgbaImage::new(size, size);
        for y in inset..size - inset {
            for x in inset..size - inset {
                img.put_pixel(x, y, image::Rgba([255, 255, 255, alpha]));
            }
        }
        img
    }

    #[test]
    fn opaque_pixels_become_foreground() {
        let img = rgba_square(10, 2, 255);
        let mask = AlphaMask::from_image(&img, 30, 0.30);
        assert!(!mask.is_blank());
        // 30% padding on each side
        assert_eq!(mask.width(), 10 + 2 * 3);
        assert_eq!(mask.height(), 10 + 2 * 3);
        // interior pixel of the square, shifted by the pad
        assert_eq!(mask.image().get_pixel(5 + 3, 5 + 3).0[0], FOREGROUND);
        // padding ring stays background
        assert_eq!(mask.image().get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn faint_alpha_is_background() {
        let img = rgba_square(10, 2, 20);
        let mask = AlphaMask::from_image(&img, 30, 0.30);
        assert!(mask.is_blank());
    }

    #[test]
    fn threshold_is_exclusive() {
        let img = rgba_square(10, 2, 30);
        let mask = AlphaMask::from_image(&img, 30, 0.30);
        // alpha == threshold does not count as foreground
        assert!(mask.is_blank());

        let img = rgba_square(10, 2, 31);
        let mask = AlphaMask::from_image(&img, 30, 0.30);
        assert!(!mask.is_blank());
    }

    #[test]
    fn zero_pad_keeps_dimensions() {
        let img = rgba_square(8, 1, 255);
        let mask = AlphaMask::from_image(&img, 30, 0.0);
        assert_eq!(mask.width(), 8);
        assert_eq!(mask.height(), 8);
    }
}
