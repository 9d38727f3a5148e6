//! Pure dimension math. No I/O, no pixels.

/// Output dimensions for the full-size derivative.
///
/// Scales to `target_width` preserving aspect ratio. Sources already at or
/// below the target keep their original size: images are never upscaled.
///
/// ```text
/// (4000, 3000), 1200 → (1200, 900)
/// (800, 600),   1200 → (800, 600)
/// ```
pub fn full_size_dimensions(original: (u32, u32), target_width: u32) -> (u32, u32) {
    let (width, height) = original;
    if width <= target_width || width == 0 {
        return original;
    }
    let ratio = target_width as f64 / width as f64;
    let scaled_height = ((height as f64 * ratio).round() as u32).max(1);
    (target_width, scaled_height)
}

/// Intermediate size before a center crop to a `size`×`size` square.
///
/// The shorter source edge maps to `size`; the longer one overflows and is
/// cropped away.
pub fn cover_dimensions(original: (u32, u32), size: u32) -> (u32, u32) {
    let (width, height) = original;
    if width == 0 || height == 0 {
        return (size, size);
    }
    if width >= height {
        let w = (size as f64 * width as f64 / height as f64).round() as u32;
        (w.max(size), size)
    } else {
        let h = (size as f64 * height as f64 / width as f64).round() as u32;
        (size, h.max(size))
    }
}
