use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Error;
use crate::stackblur::buffer::PixelBuffer;
use crate::stackblur::partition::{run_pass, Orientation};
use crate::stackblur::unsafe_slice::UnsafeSlice;

/// Largest effective radius. Keeps `255 * (radius + 1)^2`, the worst-case
/// window sum, inside the `u32` accumulators.
const MAX_RADIUS: u32 = 4096;

/// The blur contract shared by all backends.
///
/// This crate ships [`StackBlur`], the portable CPU engine; accelerated
/// implementations (SIMD, GPU) honor the same contract and are selected by
/// constructing the engine of choice.
pub trait BlurProcess {
    /// Blurs `src` into `dst` by `radius` pixels.
    ///
    /// `src` is only read; `dst` is fully overwritten. A radius of 0 is an
    /// identity copy.
    ///
    /// # Errors
    ///
    /// - [`Error::NegativeRadius`] if `radius` is negative or NaN.
    /// - [`Error::DimensionMismatch`] if `src` and `dst` differ in size.
    /// - [`Error::WorkerPanicked`] if a parallel line task panicked; `dst`
    ///   is then left in an unspecified state.
    ///
    /// `dst` is not mutated on a validation error.
    fn blur(&self, src: &PixelBuffer, dst: &mut PixelBuffer, radius: f32) -> Result<(), Error>;

    /// Blurs `buffer` in place by `radius` pixels.
    ///
    /// Same contract as [`blur`](Self::blur) with source and destination
    /// aliased; a radius of 0 is a no-op.
    fn blur_in_place(&self, buffer: &mut PixelBuffer, radius: f32) -> Result<(), Error>;
}

/// Multi-threaded stack blur over [`PixelBuffer`]s.
///
/// Runs a horizontal pass across all rows, then a vertical pass across all
/// columns, each partitioned over an explicit worker pool owned by this
/// engine. Each call blocks until both passes complete.
///
/// ```
/// use stackblur::{BlurProcess, PixelBuffer, StackBlur};
///
/// let engine = StackBlur::new()?;
/// let mut buffer = PixelBuffer::new(64, 64);
/// engine.blur_in_place(&mut buffer, 4.0)?;
/// # Ok::<(), stackblur::Error>(())
/// ```
pub struct StackBlur {
    pool: ThreadPool,
    blur_alpha: bool,
}

impl StackBlur {
    /// Creates an engine with one worker per available core.
    pub fn new() -> Result<Self, Error> {
        Self::with_workers(0)
    }

    /// Creates an engine with a fixed worker count; `0` selects one worker
    /// per available core.
    pub fn with_workers(workers: usize) -> Result<Self, Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        Ok(Self {
            pool,
            blur_alpha: false,
        })
    }

    /// Whether the alpha channel is blurred along with the color channels.
    ///
    /// Off by default: alpha is then carried over from the source pixels
    /// unchanged.
    #[must_use]
    pub fn blur_alpha(mut self, blur_alpha: bool) -> Self {
        self.blur_alpha = blur_alpha;
        self
    }

    /// Rounds and validates the radius. NaN fails the `>= 0` check and is
    /// reported as a negative radius.
    fn effective_radius(radius: f32) -> Result<u32, Error> {
        if !(radius >= 0.0) {
            return Err(Error::NegativeRadius(radius));
        }
        Ok((radius.round() as u32).min(MAX_RADIUS))
    }

    /// Both passes over one buffer. The scope join inside each pass is the
    /// barrier: every row is fully blurred before any column is read.
    fn run_passes(&self, buffer: &mut PixelBuffer, radius: u32) -> Result<(), Error> {
        let (width, height) = (buffer.width() as usize, buffer.height() as usize);
        if width == 0 || height == 0 {
            return Ok(());
        }
        catch_unwind(AssertUnwindSafe(|| {
            let pixels = UnsafeSlice::new(buffer.pixels_mut());
            run_pass(
                &self.pool,
                &pixels,
                width,
                height,
                Orientation::Horizontal,
                radius,
                self.blur_alpha,
            );
            run_pass(
                &self.pool,
                &pixels,
                width,
                height,
                Orientation::Vertical,
                radius,
                self.blur_alpha,
            );
        }))
        .map_err(|_| Error::WorkerPanicked)
    }
}

impl BlurProcess for StackBlur {
    fn blur(&self, src: &PixelBuffer, dst: &mut PixelBuffer, radius: f32) -> Result<(), Error> {
        let radius = Self::effective_radius(radius)?;
        if src.dimensions() != dst.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: src.dimensions(),
                actual: dst.dimensions(),
            });
        }
        dst.copy_from(src);
        if radius == 0 {
            return Ok(());
        }
        self.run_passes(dst, radius)
    }

    fn blur_in_place(&self, buffer: &mut PixelBuffer, radius: f32) -> Result<(), Error> {
        let radius = Self::effective_radius(radius)?;
        if radius == 0 {
            return Ok(());
        }
        self.run_passes(buffer, radius)
    }
}
