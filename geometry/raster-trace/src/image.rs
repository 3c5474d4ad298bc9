//! Grayscale images and binary rasters.

use crate::error::{TraceResult, check_len};

/// 8-bit grayscale image, row-major with y down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Wrap a `width * height` intensity buffer.
    ///
    /// # Errors
    ///
    /// [`TraceError::BufferSize`](crate::TraceError::BufferSize) when the
    /// buffer length does not match, or
    /// [`TraceError::EmptyImage`](crate::TraceError::EmptyImage) for a zero
    /// dimension.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> TraceResult<Self> {
        check_len(width, height, 1, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Average the channels of an interleaved RGB buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`], with three bytes per pixel.
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> TraceResult<Self> {
        Self::from_interleaved(width, height, rgb, 3)
    }

    /// Average the color channels of an interleaved RGBA buffer. Alpha is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`], with four bytes per pixel.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> TraceResult<Self> {
        Self::from_interleaved(width, height, rgba, 4)
    }

    fn from_interleaved(
        width: usize,
        height: usize,
        bytes: &[u8],
        channels: usize,
    ) -> TraceResult<Self> {
        check_len(width, height, channels, bytes.len())?;
        let data = bytes
            .chunks_exact(channels)
            .map(|px| {
                let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
                // At most 255 after dividing
                u8::try_from(sum / 3).unwrap_or(u8::MAX)
            })
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Intensity at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    /// Threshold into a binary raster.
    ///
    /// A pixel is foreground when its intensity (or `255 - intensity` with
    /// `invert`) is strictly below `threshold`, so dark ink on a light
    /// background is foreground by default.
    #[must_use]
    pub fn binarize(&self, threshold: u8, invert: bool) -> Bitmap {
        let bits = self
            .data
            .iter()
            .map(|&g| {
                let level = if invert { 255 - g } else { g };
                level < threshold
            })
            .collect();
        Bitmap {
            width: self.width,
            height: self.height,
            bits,
        }
    }
}

/// Offsets of the eight neighbours, clockwise from north with y down.
pub(crate) const RING: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Binary raster, row-major with y down. Pixels outside are background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Bitmap {
    /// All-background raster.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    /// Build from text rows where `#` marks foreground.
    ///
    /// Short rows are padded with background.
    ///
    /// ```
    /// use raster_trace::Bitmap;
    ///
    /// let bitmap = Bitmap::from_rows(&["#..", ".#.", "..#"]);
    /// assert_eq!(bitmap.count(), 3);
    /// assert!(bitmap.get(1, 1));
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut bitmap = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                bitmap.set(x, y, c == '#');
            }
        }
        bitmap
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` is foreground. Out of range is background.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Set `(x, y)`. Out of range is ignored.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = value;
        }
    }

    /// Foreground test for signed coordinates.
    pub(crate) fn at(&self, x: isize, y: isize) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y),
            _ => false,
        }
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// The eight neighbours of `(x, y)`, clockwise from north.
    #[must_use]
    pub fn neighbours(&self, x: usize, y: usize) -> [bool; 8] {
        let (x, y) = (signed(x), signed(y));
        RING.map(|(dx, dy)| self.at(x + dx, y + dy))
    }

    /// Number of foreground 8-neighbours.
    #[must_use]
    pub fn degree(&self, x: usize, y: usize) -> usize {
        self.neighbours(x, y).iter().filter(|&&b| b).count()
    }

    /// Foreground pixel coordinates in row-major order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}

/// Raster coordinates always fit in `isize` because the buffer exists.
pub(crate) fn signed(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}
