use crate::{
    error::{CharcoalError, CharcoalResult},
    raster::{Channels, Raster},
};

/// Separable Gaussian blur over a single-channel raster.
///
/// `kernel_size` must be odd and >= 1; a size of 1 is the identity.
/// `sigma <= 0` derives sigma from the kernel size using the standard
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8` convention.
///
/// Kernel weights are Q16 fixed point and renormalized to sum to exactly
/// 2^16, so a constant image blurs to itself bit-exactly. Edges clamp.
pub fn blur_gray(src: &Raster, kernel_size: u32, sigma: f32) -> CharcoalResult<Raster> {
    if src.channels() != Channels::Gray {
        return Err(CharcoalError::invalid_input(
            "blur_gray expects a single-channel raster",
        ));
    }
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(CharcoalError::invalid_parameter(format!(
            "blur kernel size must be odd and >= 1, got {kernel_size}"
        )));
    }

    let radius = (kernel_size - 1) / 2;
    if radius == 0 || src.is_empty() {
        return Ok(src.clone());
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        derived_sigma(kernel_size)
    };

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let (width, height) = (src.width(), src.height());
    let mut tmp = vec![0u8; src.data().len()];
    let mut out = vec![0u8; src.data().len()];

    horizontal_pass(src.data(), &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);

    Raster::new(width, height, Channels::Gray, out)
}

fn derived_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CharcoalResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CharcoalError::invalid_parameter("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    // Quantize to Q16 and push any rounding residue into the center tap so
    // the weights sum to exactly 65536.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let dx = ki as i32 - radius;
                let sx = (x + dx).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[(y * w + sx) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let dy = ki as i32 - radius;
                let sy = (y + dy).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}
