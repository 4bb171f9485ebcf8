use std::ops::RangeInclusive;

use crate::{
    blur::blur_gray,
    error::{CharcoalError, CharcoalResult},
    raster::Raster,
};

/// User-facing parameters of the sketch transform.
///
/// `blur_strength` is the Gaussian kernel size and must be odd;
/// `contrast_level` multiplies the dodge denominator, darkening the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SketchParams {
    /// Gaussian kernel size, odd, >= 1.
    pub blur_strength: u32,
    /// Contrast divisor, >= 1.
    pub contrast_level: u32,
}

impl SketchParams {
    /// Slider range for [`Self::blur_strength`].
    pub const BLUR_RANGE: RangeInclusive<u32> = 1..=51;
    /// Slider range for [`Self::contrast_level`].
    pub const CONTRAST_RANGE: RangeInclusive<u32> = 1..=5;

    /// Snap arbitrary slider values onto the valid domain.
    ///
    /// Blur is rounded up to the next odd value; both parameters are raised
    /// to at least 1. This is the supported path for raw UI input, so an
    /// even kernel can never reach [`transform`].
    pub fn snapped(blur_strength: u32, contrast_level: u32) -> Self {
        let blur_strength = match blur_strength {
            0 => 1,
            b if b % 2 == 0 => b + 1,
            b => b,
        };
        Self {
            blur_strength,
            contrast_level: contrast_level.max(1),
        }
    }

    /// Reject parameters outside the domain.
    ///
    /// An even or zero kernel, or a zero contrast, is a caller bug: the
    /// transform fails fast rather than guessing.
    pub fn validate(&self) -> CharcoalResult<()> {
        if self.blur_strength == 0 || self.blur_strength % 2 == 0 {
            return Err(CharcoalError::invalid_parameter(format!(
                "blur_strength must be odd and >= 1, got {}",
                self.blur_strength
            )));
        }
        if self.contrast_level == 0 {
            return Err(CharcoalError::invalid_parameter(
                "contrast_level must be >= 1",
            ));
        }
        Ok(())
    }
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            blur_strength: 21,
            contrast_level: 1,
        }
    }
}

/// Turn a source raster into a single-channel pencil sketch.
///
/// Fixed pipeline, each step full-frame over a fresh allocation:
///
/// 1. luma grayscale (pass-through for gray input)
/// 2. inversion
/// 3. Gaussian blur of the inverted image, kernel = `blur_strength`,
///    sigma derived from the kernel size
/// 4. color-dodge blend:
///    `out = min(255, gray * 256 / (255 * contrast * max(blurred, 1)))`
///
/// Pure: identical inputs yield bit-identical output, and the input raster
/// is never mutated. Output dimensions equal the source dimensions.
#[tracing::instrument(skip(source), fields(width = source.width(), height = source.height()))]
pub fn transform(source: &Raster, params: SketchParams) -> CharcoalResult<Raster> {
    params.validate()?;
    if source.is_empty() {
        return Err(CharcoalError::invalid_input("source raster has zero area"));
    }

    let gray = source.to_gray();
    let blurred = blur_gray(&gray.inverted(), params.blur_strength, 0.0)?;
    dodge_blend(&gray, &blurred, params.contrast_level)
}

/// Division-based blend of the grayscale image against its blurred inverse.
///
/// Bright where the neighborhood holds no edge, dark near outlines. The
/// division rounds half up before saturating to `[0, 255]`.
fn dodge_blend(gray: &Raster, blurred: &Raster, contrast: u32) -> CharcoalResult<Raster> {
    let data = gray
        .data()
        .iter()
        .zip(blurred.data())
        .map(|(&g, &b)| {
            let num = u32::from(g) * 256;
            let denom = 255 * contrast * u32::from(b).max(1);
            ((num + denom / 2) / denom).min(255) as u8
        })
        .collect();
    Raster::new(gray.width(), gray.height(), gray.channels(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channels;

    #[test]
    fn snapped_rounds_even_blur_up() {
        assert_eq!(SketchParams::snapped(4, 1).blur_strength, 5);
        assert_eq!(SketchParams::snapped(21, 1).blur_strength, 21);
        assert_eq!(SketchParams::snapped(0, 0), SketchParams::snapped(1, 1));
    }

    #[test]
    fn validate_rejects_even_or_zero() {
        assert!(SketchParams::snapped(6, 1).validate().is_ok());
        let even = SketchParams {
            blur_strength: 6,
            contrast_level: 1,
        };
        assert!(matches!(
            even.validate(),
            Err(CharcoalError::InvalidParameter(_))
        ));
        let flat = SketchParams {
            blur_strength: 3,
            contrast_level: 0,
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn dodge_blend_known_values() {
        let gray = Raster::new(2, 1, Channels::Gray, vec![128, 255]).unwrap();
        let blurred = Raster::new(2, 1, Channels::Gray, vec![127, 0]).unwrap();

        // 128 * 256 / (255 * 127) rounds to 1; division by max(0, 1) saturates.
        let out = dodge_blend(&gray, &blurred, 1).unwrap();
        assert_eq!(out.data(), &[1, 255]);

        let darker = dodge_blend(&gray, &blurred, 5).unwrap();
        assert_eq!(darker.data(), &[0, 51]);
    }

    #[test]
    fn transform_rejects_zero_area() {
        let empty = Raster::new(0, 4, Channels::Gray, vec![]).unwrap();
        assert!(matches!(
            transform(&empty, SketchParams::default()),
            Err(CharcoalError::InvalidInput(_))
        ));
    }

    #[test]
    fn params_serde_roundtrip() {
        let params = SketchParams::snapped(33, 2);
        let s = serde_json::to_string(&params).unwrap();
        let de: SketchParams = serde_json::from_str(&s).unwrap();
        assert_eq!(de, params);
    }
}
