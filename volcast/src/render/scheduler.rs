//! Fork-join casting of the whole image plane.
//!
//! Rows are split into one contiguous range per thread. Ranges never overlap,
//! so workers write into disjoint parts of the plane without locking.

use std::{
    ops::Range,
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{camera::ViewTransform, color::RGBA};

use super::{ImagePlane, RayCaster};

/// Diagnostics of one [`cast_all`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastStats {
    /// Rays which intersected the volume
    pub rays_hit: usize,
    pub rows: usize,
    pub threads: usize,
    pub elapsed: Duration,
}

/// `threads` contiguous ranges covering `0..rows`.
/// Last range takes the remainder.
pub fn row_ranges(rows: usize, threads: usize) -> Vec<Range<usize>> {
    let threads = threads.max(1);
    let chunk = rows / threads;

    (0..threads)
        .map(|i| {
            let start = i * chunk;
            let end = if i == threads - 1 { rows } else { start + chunk };
            start..end
        })
        .collect()
}

fn progress_bar(rows: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(rows as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {bar:40} {pos}/{len} rows")
            .progress_chars("=> "),
    );
    bar.set_message("Casting");
    bar
}

/// Cast every pixel of `plane` using `num_threads` worker threads.
///
/// Blocks until all workers finish. Result does not depend on the thread count.
pub fn cast_all(
    caster: &RayCaster,
    view: &ViewTransform,
    plane: &mut ImagePlane,
    num_threads: usize,
) -> CastStats {
    let start = Instant::now();
    caster.reset();

    let (width, height) = plane.get_resolution();
    let ranges = row_ranges(height, num_threads);
    let threads = ranges.len();

    if width == 0 || height == 0 {
        return CastStats {
            rays_hit: 0,
            rows: height,
            threads: 0,
            elapsed: start.elapsed(),
        };
    }

    log::debug!("Casting {width}x{height}, row ranges {ranges:?}");

    // Storage begins with the top row, so the last range owns the first chunk
    let mut jobs: Vec<(Range<usize>, &mut [RGBA])> = Vec::with_capacity(threads);
    let mut rest = plane.pixels_mut();
    for range in ranges.into_iter().rev() {
        let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * width);
        jobs.push((range, chunk));
        rest = tail;
    }

    let rows_done = AtomicUsize::new(0);
    let bar = progress_bar(height, caster.show_progress());

    crossbeam::scope(|s| {
        for (id, (range, chunk)) in jobs.into_iter().enumerate() {
            let rows_done = &rows_done;
            let bar = &bar;

            s.builder()
                .name(format!("Ren{id}"))
                .spawn(move |_| {
                    // single worker draws progress
                    let reports = range.contains(&0);

                    // chunk rows go from the top of the range down
                    for (row, out) in range.rev().zip(chunk.chunks_exact_mut(width)) {
                        caster.cast_row(row, view, out);

                        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                        if reports {
                            bar.set_position(done as u64);
                        }
                    }
                })
                .expect("cannot spawn render worker");
        }
    })
    .expect("render worker panicked");

    bar.finish_and_clear();

    let stats = CastStats {
        rays_hit: caster.rays_hit(),
        rows: height,
        threads,
        elapsed: start.elapsed(),
    };
    log::debug!(
        "Cast done in {:?}, {} of {} rays hit",
        stats.elapsed,
        stats.rays_hit,
        width * height
    );
    stats
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::{test_helpers::*, volumetric::ColoredVolume, RenderConfig, TransferFunction};

    #[test]
    fn ranges_cover_rows_once() {
        for (rows, threads) in [(10, 3), (3, 3), (2, 5), (0, 4), (100, 1), (7, 0)] {
            let ranges = row_ranges(rows, threads);

            assert_eq!(ranges.len(), threads.max(1));
            let mut next = 0;
            for r in &ranges {
                assert_eq!(r.start, next);
                next = r.end;
            }
            assert_eq!(next, rows);
        }
    }

    #[test]
    fn last_range_takes_remainder() {
        assert_eq!(row_ranges(10, 3), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn thread_count_does_not_change_image() {
        let volume = sphere_volume(12, 255, 60);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let config = RenderConfig::builder()
            .resolution(16, 13)
            .transfer_function(TransferFunction::SheppLogan)
            .build()
            .unwrap();
        let caster = RayCaster::new(&colored, &volume, &config);
        let view = ViewTransform::orbit(
            &volume.get_bound_box(),
            config.resolution,
            30.0,
            20.0,
            vector![0.0, 0.0],
        );

        let mut single = ImagePlane::new(config.resolution);
        let single_stats = cast_all(&caster, &view, &mut single, 1);

        for threads in [2, 3, 5, 13, 20] {
            let mut multi = ImagePlane::new(config.resolution);
            let stats = cast_all(&caster, &view, &mut multi, threads);

            assert_eq!(single, multi, "{threads} threads");
            assert_eq!(stats.rays_hit, single_stats.rays_hit);
            assert_eq!(stats.threads, threads);
        }
        assert!(single_stats.rays_hit > 0);
    }

    #[test]
    fn every_row_is_written() {
        let volume = solid_volume(vector![4, 4, 4], 60);
        let colored = ColoredVolume::classify(&volume, TransferFunction::SheppLogan);
        let config = RenderConfig::builder()
            .resolution(4, 4)
            .transfer_function(TransferFunction::SheppLogan)
            .build()
            .unwrap();
        let caster = RayCaster::new(&colored, &volume, &config);

        let mut plane = ImagePlane::filled((4, 4), crate::color::mono(0.5, 0.5));
        let stats = cast_all(&caster, &ViewTransform::identity(), &mut plane, 3);

        assert_eq!(stats.rays_hit, 16);
        let first = plane.pixels()[0];
        assert!(first.w > 0.0 && first.w < 0.5);
        assert!(plane.pixels().iter().all(|&p| p == first));
    }
}
