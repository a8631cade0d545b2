//! Navigability mask
//!
//! A grayscale image whose brightness decides which world pixels the agent
//! may stand on. Pixels are read once through a [`PixelSource`] and kept in
//! memory; every later query is a plain lookup.

use glam::Vec2;

/// Default brightness at or above which a pixel is walkable.
pub const DEFAULT_WALKABLE_THRESHOLD: u8 = 128;

/// Smallest padding kept between a clamped point and the mask edge.
pub const MIN_PADDING: f32 = 12.0;
/// Largest padding kept between a clamped point and the mask edge.
pub const MAX_PADDING: f32 = 22.0;

/// Keyed access to decoded images.
///
/// This is the only way the navigation core reads pixels. The scene hands
/// an implementation in explicitly; there is no global texture lookup.
pub trait PixelSource {
    /// Check whether an image is registered under `key`
    fn exists(&self, key: &str) -> bool;

    /// Image dimensions in pixels
    fn dimensions(&self, key: &str) -> Option<(u32, u32)>;

    /// RGBA sample at integer pixel coordinates, or `None` out of range
    fn pixel(&self, key: &str, x: u32, y: u32) -> Option<[u8; 4]>;
}

/// Point-level walkable/blocked queries against a traversability image.
#[derive(Debug, Clone)]
pub struct NavMask {
    width: u32,
    height: u32,
    /// Per-pixel brightness, row-major
    brightness: Vec<u8>,
    threshold: u8,
    present: bool,
}

impl NavMask {
    /// A mask that treats the whole world as walkable.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            width: 0,
            height: 0,
            brightness: Vec::new(),
            threshold: DEFAULT_WALKABLE_THRESHOLD,
            present: false,
        }
    }

    /// Build a mask from raw brightness values.
    ///
    /// Missing trailing values are treated as black.
    #[must_use]
    pub fn from_brightness(width: u32, height: u32, mut brightness: Vec<u8>, threshold: u8) -> Self {
        brightness.resize(width as usize * height as usize, 0);
        Self {
            width,
            height,
            brightness,
            threshold,
            present: true,
        }
    }

    /// Sample the mask image registered under `key`.
    ///
    /// Brightness is taken from the red channel, which equals luma for a
    /// grayscale image. Pixels the source cannot produce count as blocked.
    /// A missing image yields the degraded, always-walkable mask.
    pub fn from_source(source: &dyn PixelSource, key: &str, threshold: u8) -> Self {
        let Some((width, height)) = source
            .dimensions(key)
            .filter(|_| source.exists(key))
        else {
            log::warn!("Navigation mask '{key}' not found, treating every area as walkable");
            return Self::absent();
        };

        let mut brightness = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                brightness.push(source.pixel(key, x, y).map_or(0, |p| p[0]));
            }
        }

        Self::from_brightness(width, height, brightness, threshold)
    }

    /// Whether a mask image was supplied
    #[must_use]
    pub fn exists(&self) -> bool {
        self.present
    }

    /// Mask width in pixels (0 when absent)
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels (0 when absent)
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Brightness threshold for walkability
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Check whether a world point is walkable.
    ///
    /// Points outside the image are blocked. Without a mask everything is
    /// walkable.
    #[must_use]
    pub fn is_walkable(&self, point: Vec2) -> bool {
        if !self.present {
            return true;
        }

        if point.x < 0.0
            || point.y < 0.0
            || point.x >= self.width as f32
            || point.y >= self.height as f32
        {
            return false;
        }

        let px = point.x.floor() as usize;
        let py = point.y.floor() as usize;
        self.brightness[py * self.width as usize + px] >= self.threshold
    }

    /// Clamp a point into `[padding, dim - 1 - padding]` on both axes,
    /// flooring to whole pixels.
    ///
    /// Identity when no mask is present.
    #[must_use]
    pub fn clamp_to_bounds(&self, point: Vec2, padding: f32) -> Vec2 {
        if !self.present {
            return point;
        }

        let max_x = self.width as f32 - 1.0 - padding;
        let max_y = self.height as f32 - 1.0 - padding;

        // min/max rather than clamp: a mask narrower than twice the padding
        // must not panic
        Vec2::new(
            point.x.floor().min(max_x).max(padding),
            point.y.floor().min(max_y).max(padding),
        )
    }
}

impl Default for NavMask {
    fn default() -> Self {
        Self::absent()
    }
}

/// Padding derived from an agent's collision half-extents.
///
/// The larger half-extent, kept within [`MIN_PADDING`, `MAX_PADDING`].
#[must_use]
pub fn agent_padding(half_extents: Vec2) -> f32 {
    half_extents.max_element().clamp(MIN_PADDING, MAX_PADDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::test_util::mask_from_ascii;

    struct SolidSource {
        width: u32,
        height: u32,
        value: u8,
    }

    impl PixelSource for SolidSource {
        fn exists(&self, key: &str) -> bool {
            key == "floor"
        }

        fn dimensions(&self, key: &str) -> Option<(u32, u32)> {
            self.exists(key).then_some((self.width, self.height))
        }

        fn pixel(&self, _key: &str, x: u32, y: u32) -> Option<[u8; 4]> {
            (x < self.width && y < self.height).then_some([self.value, 0, 0, 255])
        }
    }

    #[test]
    fn test_threshold_decides_walkability() {
        let mask = NavMask::from_brightness(3, 1, vec![127, 128, 255], 128);

        assert!(!mask.is_walkable(Vec2::new(0.5, 0.5)));
        assert!(mask.is_walkable(Vec2::new(1.5, 0.5)));
        assert!(mask.is_walkable(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let mask = NavMask::from_brightness(4, 4, vec![255; 16], 128);

        assert!(!mask.is_walkable(Vec2::new(-0.1, 1.0)));
        assert!(!mask.is_walkable(Vec2::new(1.0, -3.0)));
        assert!(!mask.is_walkable(Vec2::new(4.0, 1.0)));
        assert!(!mask.is_walkable(Vec2::new(1.0, 4.0)));
        assert!(mask.is_walkable(Vec2::new(3.9, 3.9)));
    }

    #[test]
    fn test_absent_mask_is_walkable_everywhere() {
        let mask = NavMask::absent();

        assert!(!mask.exists());
        assert!(mask.is_walkable(Vec2::new(-1000.0, 5000.0)));
        assert_eq!(
            mask.clamp_to_bounds(Vec2::new(-3.5, 9000.2), 16.0),
            Vec2::new(-3.5, 9000.2)
        );
    }

    #[test]
    fn test_from_source_reads_red_channel() {
        let bright = SolidSource {
            width: 8,
            height: 4,
            value: 200,
        };
        let mask = NavMask::from_source(&bright, "floor", DEFAULT_WALKABLE_THRESHOLD);
        assert!(mask.exists());
        assert_eq!((mask.width(), mask.height()), (8, 4));
        assert!(mask.is_walkable(Vec2::new(7.0, 3.0)));

        let dark = SolidSource {
            width: 8,
            height: 4,
            value: 40,
        };
        let mask = NavMask::from_source(&dark, "floor", DEFAULT_WALKABLE_THRESHOLD);
        assert!(!mask.is_walkable(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_from_source_missing_key_degrades() {
        let source = SolidSource {
            width: 8,
            height: 4,
            value: 0,
        };
        let mask = NavMask::from_source(&source, "missing", DEFAULT_WALKABLE_THRESHOLD);

        assert!(!mask.exists());
        assert!(mask.is_walkable(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn test_clamp_stays_within_padding() {
        let mask = mask_from_ascii(&["....", "...."], 32);
        let padding = 16.0;
        let max_x = 128.0 - 1.0 - padding;
        let max_y = 64.0 - 1.0 - padding;

        let inputs = [
            Vec2::new(-1.0e9, -1.0e9),
            Vec2::new(1.0e9, 1.0e9),
            Vec2::new(0.0, 63.0),
            Vec2::new(64.7, 20.2),
            Vec2::new(127.9, -5.0),
        ];

        for input in inputs {
            let clamped = mask.clamp_to_bounds(input, padding);
            assert!(clamped.x >= padding && clamped.x <= max_x, "{input} -> {clamped}");
            assert!(clamped.y >= padding && clamped.y <= max_y, "{input} -> {clamped}");
            assert_eq!(clamped.x, clamped.x.floor());
        }

        assert_eq!(
            mask.clamp_to_bounds(Vec2::new(64.7, 20.2), padding),
            Vec2::new(64.0, 20.0)
        );
    }

    #[test]
    fn test_agent_padding_range() {
        assert_eq!(agent_padding(Vec2::new(4.0, 6.0)), 12.0);
        assert_eq!(agent_padding(Vec2::new(16.0, 18.0)), 18.0);
        assert_eq!(agent_padding(Vec2::new(40.0, 10.0)), 22.0);
    }
}
