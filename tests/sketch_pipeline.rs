use charcoal::{Channels, CharcoalError, Raster, SketchParams, transform};

fn gradient_gray(width: u32, height: u32) -> Raster {
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(155 + ((x + y) % 100) as u8);
        }
    }
    Raster::new(width, height, Channels::Gray, data).unwrap()
}

#[test]
fn output_matches_source_dimensions_and_is_single_channel() {
    let source = Raster::filled(8, 5, Channels::Rgb, 90);
    for (blur, contrast) in [(1, 1), (3, 2), (21, 5), (51, 1)] {
        let params = SketchParams {
            blur_strength: blur,
            contrast_level: contrast,
        };
        let sketch = transform(&source, params).unwrap();
        assert_eq!((sketch.width(), sketch.height()), (8, 5));
        assert_eq!(sketch.channels(), Channels::Gray);
    }
}

#[test]
fn transform_is_pure() {
    let source = gradient_gray(32, 24);
    let params = SketchParams::default();
    let a = transform(&source, params).unwrap();
    let b = transform(&source, params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn constant_gray_input_yields_uniform_sketch() {
    // No edges anywhere: inverted is constant 127, the blur preserves it
    // exactly, and the dodge division lands on the same value per pixel.
    let source = Raster::filled(100, 100, Channels::Gray, 128);
    let params = SketchParams {
        blur_strength: 21,
        contrast_level: 1,
    };
    let sketch = transform(&source, params).unwrap();
    let first = sketch.data()[0];
    assert!(sketch.data().iter().all(|&v| v == first));
    assert_eq!(first, 1); // 128 * 256 / (255 * 127), rounded
}

#[test]
fn raising_contrast_darkens_every_pixel() {
    let source = gradient_gray(64, 64);
    let low = transform(
        &source,
        SketchParams {
            blur_strength: 9,
            contrast_level: 1,
        },
    )
    .unwrap();
    let high = transform(
        &source,
        SketchParams {
            blur_strength: 9,
            contrast_level: 5,
        },
    )
    .unwrap();

    // The gradient keeps every low-contrast pixel positive, so the higher
    // contrast must strictly reduce each one.
    assert!(low.data().iter().all(|&v| v > 0));
    for (&lo, &hi) in low.data().iter().zip(high.data()) {
        assert!(hi < lo);
    }
}

#[test]
fn invalid_parameters_are_rejected() {
    let source = Raster::filled(4, 4, Channels::Gray, 128);
    for params in [
        SketchParams {
            blur_strength: 2,
            contrast_level: 1,
        },
        SketchParams {
            blur_strength: 0,
            contrast_level: 1,
        },
        SketchParams {
            blur_strength: 3,
            contrast_level: 0,
        },
    ] {
        assert!(matches!(
            transform(&source, params),
            Err(CharcoalError::InvalidParameter(_))
        ));
    }
}

#[test]
fn zero_area_source_is_rejected() {
    let source = Raster::new(0, 0, Channels::Gray, vec![]).unwrap();
    assert!(matches!(
        transform(&source, SketchParams::default()),
        Err(CharcoalError::InvalidInput(_))
    ));
}

#[test]
fn one_pixel_source_produces_one_pixel_sketch() {
    let source = Raster::filled(1, 1, Channels::Rgb, 200);
    let sketch = transform(&source, SketchParams::default()).unwrap();
    assert_eq!((sketch.width(), sketch.height()), (1, 1));
    assert_eq!(sketch.channels(), Channels::Gray);
}
