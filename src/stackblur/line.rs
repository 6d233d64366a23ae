use crate::stackblur::unsafe_slice::UnsafeSlice;

/// Single-threaded stack-blur engine for one row or column.
///
/// The stack blur kernel is triangular: the pixel at the window center
/// contributes `radius + 1` times, its neighbours one time fewer per step of
/// distance, for a total weight of `div_sum = (radius + 1)^2`. Instead of
/// convolving, the engine keeps the window's weighted sum and two partial
/// sums (`sum_in` over the growing half, `sum_out` over the shrinking half)
/// and updates all three in O(1) per output pixel.
///
/// Normalization is integer division rounded half-up,
/// `(sum + div_sum / 2) / div_sum`. Results never exceed 255, so no clamp is
/// applied. This is the canonical rounding rule for the crate; a constant
/// line is an exact fixed point under it.
///
/// One engine is created per worker task and reused across all lines the
/// task is assigned; the stacks are re-seeded at the start of each line.
pub(crate) struct LineBlur {
    radius: usize,
    div: usize,
    div_sum: u32,
    stack_r: Vec<u8>,
    stack_g: Vec<u8>,
    stack_b: Vec<u8>,
    /// Present only when the alpha channel is blurred; otherwise alpha is
    /// copied verbatim from the pixel being overwritten.
    stack_a: Option<Vec<u8>>,
}

impl LineBlur {
    pub(crate) fn new(radius: u32, blur_alpha: bool) -> Self {
        debug_assert!(radius >= 1, "radius 0 is handled by the caller");
        let radius = radius as usize;
        let div = 2 * radius + 1;
        Self {
            radius,
            div,
            div_sum: ((radius + 1) * (radius + 1)) as u32,
            stack_r: vec![0; div],
            stack_g: vec![0; div],
            stack_b: vec![0; div],
            stack_a: blur_alpha.then(|| vec![0; div]),
        }
    }

    /// Blurs one line in place.
    ///
    /// The line is the `len` pixels at `start`, `start + stride`, ...;
    /// rows are `(y * width, 1, width)` and columns `(x, width, height)`.
    /// Reads that would run past the line end are clamped to the last pixel
    /// (edge replication); the window initially holds `radius + 1` copies of
    /// the first pixel, the clamped left half of the kernel.
    ///
    /// Callers must guarantee exclusive access to the line for the duration
    /// of the call; see [`UnsafeSlice`].
    pub(crate) fn blur_line(&mut self, pixels: &UnsafeSlice<u32>, start: usize, stride: usize, len: usize) {
        debug_assert!(len >= 1);
        let radius = self.radius;
        let div = self.div;
        let half = self.div_sum / 2;
        let last = start + stride * (len - 1);

        let (mut sum_r, mut sum_g, mut sum_b, mut sum_a) = (0u32, 0u32, 0u32, 0u32);
        let (mut sum_in_r, mut sum_in_g, mut sum_in_b, mut sum_in_a) = (0u32, 0u32, 0u32, 0u32);
        let (mut sum_out_r, mut sum_out_g, mut sum_out_b, mut sum_out_a) = (0u32, 0u32, 0u32, 0u32);

        // Seed the left half: radius + 1 copies of the first pixel, weighted
        // 1..=radius+1 toward the window center.
        let first = pixels.get(start);
        let fa = (first >> 24) as u8;
        let fr = (first >> 16) as u8;
        let fg = (first >> 8) as u8;
        let fb = first as u8;
        for i in 0..=radius {
            let weight = (i + 1) as u32;
            self.stack_r[i] = fr;
            self.stack_g[i] = fg;
            self.stack_b[i] = fb;
            sum_r += fr as u32 * weight;
            sum_g += fg as u32 * weight;
            sum_b += fb as u32 * weight;
            sum_out_r += fr as u32;
            sum_out_g += fg as u32;
            sum_out_b += fb as u32;
            if let Some(stack_a) = &mut self.stack_a {
                stack_a[i] = fa;
                sum_a += fa as u32 * weight;
                sum_out_a += fa as u32;
            }
        }

        // Seed the right half, clamping the read cursor at the line end.
        let mut src = start;
        for i in 1..=radius {
            if src + stride <= last {
                src += stride;
            }
            let weight = (radius + 1 - i) as u32;
            let pixel = pixels.get(src);
            let a = (pixel >> 24) as u8;
            let r = (pixel >> 16) as u8;
            let g = (pixel >> 8) as u8;
            let b = pixel as u8;
            self.stack_r[i + radius] = r;
            self.stack_g[i + radius] = g;
            self.stack_b[i + radius] = b;
            sum_r += r as u32 * weight;
            sum_g += g as u32 * weight;
            sum_b += b as u32 * weight;
            sum_in_r += r as u32;
            sum_in_g += g as u32;
            sum_in_b += b as u32;
            if let Some(stack_a) = &mut self.stack_a {
                stack_a[i + radius] = a;
                sum_a += a as u32 * weight;
                sum_in_a += a as u32;
            }
        }

        let mut stack_i = radius;
        let mut dst = start;
        for _ in 0..len {
            // Emit. When alpha is not blurred it is carried over from the
            // pixel being overwritten.
            let a = match &self.stack_a {
                Some(_) => ((sum_a + half) / self.div_sum) as u8,
                None => (pixels.get(dst) >> 24) as u8,
            };
            let r = ((sum_r + half) / self.div_sum) as u8;
            let g = ((sum_g + half) / self.div_sum) as u8;
            let b = ((sum_b + half) / self.div_sum) as u8;
            pixels.write(
                dst,
                (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
            );
            dst += stride;

            // Advance the read cursor, clamped at the line end.
            if src + stride <= last {
                src += stride;
            }

            // Retire the oldest contribution.
            sum_r -= sum_out_r;
            sum_g -= sum_out_g;
            sum_b -= sum_out_b;
            let stack_drop = (stack_i + radius + 1) % div;
            sum_out_r -= self.stack_r[stack_drop] as u32;
            sum_out_g -= self.stack_g[stack_drop] as u32;
            sum_out_b -= self.stack_b[stack_drop] as u32;

            // Admit the new pixel at the freed slot.
            let pixel = pixels.get(src);
            let r = (pixel >> 16) as u8;
            let g = (pixel >> 8) as u8;
            let b = pixel as u8;
            self.stack_r[stack_drop] = r;
            self.stack_g[stack_drop] = g;
            self.stack_b[stack_drop] = b;
            sum_in_r += r as u32;
            sum_in_g += g as u32;
            sum_in_b += b as u32;
            sum_r += sum_in_r;
            sum_g += sum_in_g;
            sum_b += sum_in_b;

            if let Some(stack_a) = &mut self.stack_a {
                sum_a -= sum_out_a;
                sum_out_a -= stack_a[stack_drop] as u32;
                let a = (pixel >> 24) as u8;
                stack_a[stack_drop] = a;
                sum_in_a += a as u32;
                sum_a += sum_in_a;
            }

            // Rotate: the value at the new center moves from the growing to
            // the shrinking half.
            stack_i = (stack_i + 1) % div;
            sum_out_r += self.stack_r[stack_i] as u32;
            sum_out_g += self.stack_g[stack_i] as u32;
            sum_out_b += self.stack_b[stack_i] as u32;
            sum_in_r -= self.stack_r[stack_i] as u32;
            sum_in_g -= self.stack_g[stack_i] as u32;
            sum_in_b -= self.stack_b[stack_i] as u32;
            if let Some(stack_a) = &self.stack_a {
                sum_out_a += stack_a[stack_i] as u32;
                sum_in_a -= stack_a[stack_i] as u32;
            }
        }
    }
}
