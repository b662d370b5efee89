use argh::FromArgs;
use rayon::prelude::*;

use gaussblur::engine::{FilterError, GaussianBlur, VideoFormat};
use gaussblur::plane::{Plane, PlaneSize};

#[derive(FromArgs)]
/// Blur synthetic 16-bit planes with a separable Gaussian
struct Args {
    /// luma plane width
    #[argh(option, default = "1280")]
    width: usize,

    /// luma plane height
    #[argh(option, default = "720")]
    height: usize,

    /// the blur radius in samples
    #[argh(option)]
    radius: i64,
}

/// A gradient plane with a bright block in the middle, so the blur has
/// visible edges to work on.
fn synthetic_plane(size: PlaneSize) -> Result<Plane, FilterError> {
    let mut plane = Plane::from_size_val(size, 0)?;
    for y in 0..size.height {
        let row_base = y * size.width;
        for x in 0..size.width {
            plane.as_slice_mut()[row_base + x] = ((x * 65535) / size.width) as u16;
        }
    }
    for y in size.height / 3..(2 * size.height / 3).max(size.height / 3 + 1) {
        for x in size.width / 3..(2 * size.width / 3).max(size.width / 3 + 1) {
            plane.as_slice_mut()[y * size.width + x] = 60000;
        }
    }
    Ok(plane)
}

fn plane_stats(plane: &Plane) -> (u16, u16, f64) {
    let mut min = u16::MAX;
    let mut max = 0u16;
    let mut sum = 0u64;
    for &v in plane.as_slice() {
        min = min.min(v);
        max = max.max(v);
        sum += u64::from(v);
    }
    let mean = sum as f64 / plane.as_slice().len() as f64;
    (min, max, mean)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // validation happens once here; the per-plane loop below cannot fail on
    // format or radius anymore
    let filter = GaussianBlur::new(VideoFormat::integer16(), args.radius)?;

    // 4:2:0-style frame: full resolution luma, half resolution chroma
    let sizes = [
        PlaneSize {
            width: args.width,
            height: args.height,
        },
        PlaneSize {
            width: (args.width / 2).max(1),
            height: (args.height / 2).max(1),
        },
        PlaneSize {
            width: (args.width / 2).max(1),
            height: (args.height / 2).max(1),
        },
    ];
    let planes = sizes
        .iter()
        .map(|&size| synthetic_plane(size))
        .collect::<Result<Vec<_>, _>>()?;

    // the host would schedule planes across workers; one instance serves
    // all of them concurrently
    let start = std::time::Instant::now();
    let blurred = planes
        .par_iter()
        .map(|plane| {
            let mut dst = Plane::from_size_val(plane.size(), 0)?;
            filter.process_plane(&plane.view(), &mut dst.view_mut())?;
            Ok(dst)
        })
        .collect::<Result<Vec<_>, FilterError>>()?;
    let elapsed = start.elapsed();

    log::info!(
        "blurred {} planes with radius {} in {elapsed:?}",
        blurred.len(),
        filter.radius()
    );

    for (i, (src, dst)) in planes.iter().zip(blurred.iter()).enumerate() {
        let (min_in, max_in, mean_in) = plane_stats(src);
        let (min_out, max_out, mean_out) = plane_stats(dst);
        println!(
            "plane {i} ({}x{}): in min/max/mean {min_in}/{max_in}/{mean_in:.1} -> out {min_out}/{max_out}/{mean_out:.1}",
            src.width(),
            src.height(),
        );
    }

    Ok(())
}
