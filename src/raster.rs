use crate::error::{CharcoalError, CharcoalResult};

/// Channel layout of a [`Raster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Channels {
    /// Single 8-bit luminance sample per pixel.
    Gray,
    /// Three 8-bit samples per pixel, R then G then B.
    Rgb,
}

impl Channels {
    /// Number of samples per pixel for this layout.
    pub fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
        }
    }
}

/// Owned rectangular grid of 8-bit pixel samples, row-major, tightly packed.
///
/// Every transformation step allocates a fresh `Raster`; the only mutation
/// path is the reveal canvas, which each animation run owns exclusively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

// BT.601 luma weights in Q16, summing to exactly 2^16 so that a constant
// gray input converts without drift.
const LUMA_R_Q16: u32 = 19595;
const LUMA_G_Q16: u32 = 38470;
const LUMA_B_Q16: u32 = 7471;

impl Raster {
    /// Create a raster from raw samples.
    ///
    /// `data.len()` must equal `width * height * channels.count()`.
    pub fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> CharcoalResult<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels.count()))
            .ok_or_else(|| CharcoalError::invalid_input("raster buffer size overflow"))?;
        if data.len() != expected_len {
            return Err(CharcoalError::invalid_input(format!(
                "raster data length {} does not match {}x{}x{}",
                data.len(),
                width,
                height,
                channels.count()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a raster with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: Channels, value: u8) -> Self {
        let len = (width as usize) * (height as usize) * channels.count();
        Self {
            width,
            height,
            channels,
            data: vec![value; len],
        }
    }

    /// Blank white single-channel canvas, the starting state of a reveal run.
    pub fn blank_white(width: u32, height: u32) -> Self {
        Self::filled(width, height, Channels::Gray, 255)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw samples, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `true` when the raster covers zero pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample at `(x, y)`, channel `c`. Panics when out of bounds.
    pub fn sample(&self, x: u32, y: u32, c: usize) -> u8 {
        assert!(x < self.width && y < self.height && c < self.channels.count());
        let stride = (self.width as usize) * self.channels.count();
        self.data[(y as usize) * stride + (x as usize) * self.channels.count() + c]
    }

    /// Samples of row `y`, all channels interleaved.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height);
        let stride = (self.width as usize) * self.channels.count();
        &self.data[(y as usize) * stride..(y as usize + 1) * stride]
    }

    /// Copy row `y` of `src` into row `y` of `self`.
    ///
    /// Caller guarantees matching dimensions and layout; the animator
    /// constructs the canvas from the sketch's dimensions so this holds.
    pub(crate) fn copy_row_from(&mut self, src: &Raster, y: u32) {
        debug_assert_eq!(self.width, src.width);
        debug_assert_eq!(self.height, src.height);
        debug_assert_eq!(self.channels, src.channels);
        let stride = (self.width as usize) * self.channels.count();
        let range = (y as usize) * stride..(y as usize + 1) * stride;
        self.data[range.clone()].copy_from_slice(&src.data[range]);
    }

    /// Convert to single-channel grayscale using BT.601 luma weights.
    ///
    /// Gray rasters pass through as a copy.
    pub fn to_gray(&self) -> Raster {
        match self.channels {
            Channels::Gray => self.clone(),
            Channels::Rgb => {
                let mut out = Vec::with_capacity((self.width as usize) * (self.height as usize));
                for px in self.data.chunks_exact(3) {
                    let luma = LUMA_R_Q16 * u32::from(px[0])
                        + LUMA_G_Q16 * u32::from(px[1])
                        + LUMA_B_Q16 * u32::from(px[2]);
                    out.push(((luma + 32768) >> 16) as u8);
                }
                Raster {
                    width: self.width,
                    height: self.height,
                    channels: Channels::Gray,
                    data: out,
                }
            }
        }
    }

    /// Per-sample inversion (`255 - v`), same layout and dimensions.
    pub fn inverted(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| 255 - v).collect(),
        }
    }

    /// Expand to tightly packed RGBA8 with full alpha, for display upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        match self.channels {
            Channels::Gray => {
                for &v in &self.data {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
            }
            Channels::Rgb => {
                for px in self.data.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_length() {
        assert!(Raster::new(2, 2, Channels::Gray, vec![0; 3]).is_err());
        assert!(Raster::new(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
    }

    #[test]
    fn to_gray_is_exact_for_constant_rgb() {
        let r = Raster::filled(3, 2, Channels::Rgb, 128);
        let gray = r.to_gray();
        assert_eq!(gray.channels(), Channels::Gray);
        assert!(gray.data().iter().all(|&v| v == 128));
    }

    #[test]
    fn to_gray_passes_gray_through() {
        let r = Raster::filled(4, 4, Channels::Gray, 7);
        assert_eq!(r.to_gray(), r);
    }

    #[test]
    fn inverted_twice_is_identity() {
        let r = Raster::new(2, 2, Channels::Gray, vec![0, 1, 128, 255]).unwrap();
        assert_eq!(r.inverted().inverted(), r);
        assert_eq!(r.inverted().data(), &[255, 254, 127, 0]);
    }

    #[test]
    fn copy_row_from_moves_one_row_only() {
        let src = Raster::filled(3, 3, Channels::Gray, 9);
        let mut canvas = Raster::blank_white(3, 3);
        canvas.copy_row_from(&src, 1);
        assert_eq!(canvas.row(0), &[255, 255, 255]);
        assert_eq!(canvas.row(1), &[9, 9, 9]);
        assert_eq!(canvas.row(2), &[255, 255, 255]);
    }

    #[test]
    fn to_rgba8_expands_gray() {
        let r = Raster::new(2, 1, Channels::Gray, vec![0, 200]).unwrap();
        assert_eq!(r.to_rgba8(), vec![0, 0, 0, 255, 200, 200, 200, 255]);
    }
}
