use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use gaussblur_engine::{
    gaussian_blur, gaussian_blur_with_backend, ConvolveBackend, FilterError, GaussianBlur,
    GaussianKernel, VideoFormat,
};
use gaussblur_plane::{Plane, PlaneSize};

fn random_plane(size: PlaneSize, seed: u64) -> Plane {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..size.num_samples())
        .map(|_| rng.random_range(0..=u16::MAX))
        .collect();
    Plane::new(size, data).unwrap()
}

/// Full 2D reference blur that treats out-of-range taps as zero instead of
/// clamping, for contrast with the engine's clamp-to-edge rule.
fn zero_padded_blur(src: &Plane, radius: usize) -> Plane {
    let kernel = GaussianKernel::new(radius).unwrap();
    let w = kernel.weights();
    let width = src.width() as isize;
    let height = src.height() as isize;

    let mut tmp = vec![0.0f64; src.as_slice().len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &weight) in w.iter().enumerate() {
                let xx = x + k as isize - radius as isize;
                if xx >= 0 && xx < width {
                    acc += src.as_slice()[(y * width + xx) as usize] as f64 * weight;
                }
            }
            tmp[(y * width + x) as usize] = acc;
        }
    }

    let mut out = Plane::from_size_val(src.size(), 0).unwrap();
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &weight) in w.iter().enumerate() {
                let yy = y + k as isize - radius as isize;
                if yy >= 0 && yy < height {
                    acc += tmp[(yy * width + x) as usize] * weight;
                }
            }
            out.as_slice_mut()[(y * width + x) as usize] =
                (acc.clamp(0.0, 65535.0) + 0.5) as u16;
        }
    }
    out
}

#[test]
fn corner_spike_replicates_into_clamped_taps() -> Result<(), FilterError> {
    let size = PlaneSize {
        width: 8,
        height: 8,
    };
    let mut src = Plane::from_size_val(size, 0)?;
    src.as_slice_mut()[0] = 60000;
    let radius = 2;

    let mut clamped = Plane::from_size_val(size, 0)?;
    gaussian_blur(&src.view(), &mut clamped.view_mut(), radius)?;

    let zero_padded = zero_padded_blur(&src, radius);

    // clamping reads the bright corner repeatedly, zero padding loses it
    assert!(clamped.as_slice()[0] > zero_padded.as_slice()[0]);

    // away from the edges both references agree
    let center = 4 * 8 + 4;
    assert_eq!(clamped.as_slice()[center], zero_padded.as_slice()[center]);
    Ok(())
}

#[test]
fn scalar_and_auto_backends_agree_within_one_lsb() -> Result<(), FilterError> {
    // widths chosen to exercise the vector body, its remainder and the
    // narrow fallback
    for (width, height) in [(131, 67), (40, 13), (8, 8), (7, 3)] {
        for radius in [1, 2, 3, 8] {
            let size = PlaneSize { width, height };
            let src = random_plane(size, (width * height + radius) as u64);

            let mut scalar = Plane::from_size_val(size, 0)?;
            gaussian_blur_with_backend(
                &src.view(),
                &mut scalar.view_mut(),
                radius,
                ConvolveBackend::Scalar,
            )?;

            let mut auto = Plane::from_size_val(size, 0)?;
            gaussian_blur_with_backend(
                &src.view(),
                &mut auto.view_mut(),
                radius,
                ConvolveBackend::Auto,
            )?;

            for (i, (&a, &s)) in auto.as_slice().iter().zip(scalar.as_slice()).enumerate() {
                let diff = (i32::from(a) - i32::from(s)).abs();
                assert!(
                    diff <= 1,
                    "{width}x{height} radius {radius} sample {i}: {a} vs {s}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn concurrent_plane_invocations_match_serial() -> Result<(), FilterError> {
    // the host runs one instance across planes and frames in parallel
    let filter = GaussianBlur::new(VideoFormat::integer16(), 3)?;

    let sizes = [
        PlaneSize {
            width: 64,
            height: 48,
        },
        PlaneSize {
            width: 32,
            height: 24,
        },
        PlaneSize {
            width: 32,
            height: 24,
        },
        PlaneSize {
            width: 64,
            height: 48,
        },
    ];
    let planes: Vec<Plane> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| random_plane(size, i as u64))
        .collect();

    let serial: Vec<Plane> = planes
        .iter()
        .map(|p| {
            let mut dst = Plane::from_size_val(p.size(), 0)?;
            filter.process_plane(&p.view(), &mut dst.view_mut())?;
            Ok(dst)
        })
        .collect::<Result<_, FilterError>>()?;

    let parallel: Vec<Plane> = planes
        .par_iter()
        .map(|p| {
            let mut dst = Plane::from_size_val(p.size(), 0)?;
            filter.process_plane(&p.view(), &mut dst.view_mut())?;
            Ok(dst)
        })
        .collect::<Result<_, FilterError>>()?;

    assert_eq!(serial, parallel);
    Ok(())
}

#[test]
fn blurring_spreads_energy_but_preserves_flat_regions() -> Result<(), FilterError> {
    let size = PlaneSize {
        width: 32,
        height: 32,
    };
    let mut src = Plane::from_size_val(size, 200)?;
    // bright 4x4 block in the middle
    for y in 14..18 {
        for x in 14..18 {
            src.as_slice_mut()[y * 32 + x] = 50000;
        }
    }

    let mut dst = Plane::from_size_val(size, 0)?;
    gaussian_blur(&src.view(), &mut dst.view_mut(), 4)?;

    // the block's peak drops, its surroundings rise, far corners stay flat
    assert!(dst.as_slice()[15 * 32 + 15] < 50000);
    assert!(dst.as_slice()[12 * 32 + 12] > 200);
    assert_eq!(dst.as_slice()[0], 200);
    assert_eq!(dst.as_slice()[31 * 32 + 31], 200);
    Ok(())
}
