use itertools::Itertools;
use rayon::ThreadPool;

use crate::stackblur::line::LineBlur;
use crate::stackblur::unsafe_slice::UnsafeSlice;

/// Which dimension a pass sweeps along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    /// Blur along rows; lines are indexed by `y`.
    Horizontal,
    /// Blur along columns; lines are indexed by `x`.
    Vertical,
}

/// Runs one blur pass, partitioned across the pool's workers.
///
/// The pass's line count (height for horizontal, width for vertical) is split
/// into contiguous ranges `d*k/n .. d*(k+1)/n`; the ranges are disjoint,
/// cover every line exactly once, and differ in size by at most one. Each
/// non-empty range becomes one task that blurs its lines sequentially. The
/// enclosing scope joins all tasks before returning, which is the barrier
/// the vertical pass depends on.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_pass(
    pool: &ThreadPool,
    pixels: &UnsafeSlice<u32>,
    width: usize,
    height: usize,
    orientation: Orientation,
    radius: u32,
    blur_alpha: bool,
) {
    let lines = match orientation {
        Orientation::Horizontal => height,
        Orientation::Vertical => width,
    };
    if lines == 0 {
        return;
    }

    let workers = pool.current_num_threads().clamp(1, lines);
    if workers == 1 {
        blur_lines(pixels, 0..lines, width, height, orientation, radius, blur_alpha);
        return;
    }

    pool.scope(|scope| {
        for (lo, hi) in (0..=workers).map(|k| lines * k / workers).tuple_windows() {
            if lo == hi {
                continue;
            }
            scope.spawn(move |_| {
                blur_lines(pixels, lo..hi, width, height, orientation, radius, blur_alpha);
            });
        }
    });
}

/// One worker's share of a pass: a fresh window state, reused across the
/// range's lines.
fn blur_lines(
    pixels: &UnsafeSlice<u32>,
    range: std::ops::Range<usize>,
    width: usize,
    height: usize,
    orientation: Orientation,
    radius: u32,
    blur_alpha: bool,
) {
    let mut engine = LineBlur::new(radius, blur_alpha);
    for line in range {
        let (start, stride, len) = match orientation {
            Orientation::Horizontal => (line * width, 1, width),
            Orientation::Vertical => (line, width, height),
        };
        engine.blur_line(pixels, start, stride, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(lines: usize, workers: usize) -> Vec<(usize, usize)> {
        (0..=workers)
            .map(|k| lines * k / workers)
            .tuple_windows()
            .collect()
    }

    #[test]
    fn ranges_cover_all_lines_exactly_once() {
        for lines in [1, 2, 7, 64, 1080] {
            for workers in [1, 2, 3, 8, 100] {
                let ranges = ranges(lines, workers);
                assert_eq!(ranges.len(), workers);
                assert_eq!(ranges[0].0, 0);
                assert_eq!(ranges[workers - 1].1, lines);
                for window in ranges.windows(2) {
                    assert_eq!(window[0].1, window[1].0);
                }
            }
        }
    }

    #[test]
    fn range_sizes_differ_by_at_most_one() {
        for lines in [5, 64, 1080] {
            for workers in [2, 3, 7] {
                let sizes: Vec<usize> = ranges(lines, workers)
                    .iter()
                    .map(|(lo, hi)| hi - lo)
                    .collect();
                let min = sizes.iter().min().unwrap();
                let max = sizes.iter().max().unwrap();
                assert!(max - min <= 1, "lines={lines} workers={workers}: {sizes:?}");
            }
        }
    }

    #[test]
    fn more_workers_than_lines_yields_empty_ranges_only() {
        let ranges = ranges(3, 8);
        let covered: usize = ranges.iter().map(|(lo, hi)| hi - lo).sum();
        assert_eq!(covered, 3);
    }
}
