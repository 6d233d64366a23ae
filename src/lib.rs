//! Multi-threaded stack blur for packed ARGB pixel buffers.
//!
//! Stack blur is a fast approximation of Gaussian blur: a separable two-pass
//! filter (horizontal, then vertical) whose triangular kernel is maintained
//! as a sliding window of running sums, making each output pixel O(1)
//! regardless of radius. Each pass is partitioned across a worker pool, one
//! contiguous range of rows or columns per worker.
//!
//! ```
//! use stackblur::{BlurProcess, PixelBuffer, StackBlur};
//!
//! let engine = StackBlur::new()?;
//! let src = PixelBuffer::new(128, 128);
//! let mut dst = PixelBuffer::new(128, 128);
//! engine.blur(&src, &mut dst, 8.0)?;
//! # Ok::<(), stackblur::Error>(())
//! ```
//!
//! Pixels are `0xAARRGGBB` words. The alpha channel is passed through
//! untouched unless [`StackBlur::blur_alpha`] enables blurring it.
//! Normalization rounds half-up, so constant-color images are exact fixed
//! points of the blur at every radius.

mod error;
mod stackblur;

pub use error::Error;
pub use stackblur::buffer::{pack_argb, unpack_argb, PixelBuffer};
pub use stackblur::process::{BlurProcess, StackBlur};
