/// A decoded mono audio clip: f32 samples in [-1, 1] plus a sample rate.
///
/// Buffers are immutable once built; every transform returns a new buffer.
/// Combination methods (`append`, `append_crossfade`, `overlay`) require both
/// operands to share a sample rate — callers resample first (`resampled`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl ClipBuffer {
    /// Wrap raw mono samples at the given rate.
    ///
    /// # Example
    /// ```
    /// use sw_core::ClipBuffer;
    /// let clip = ClipBuffer::new(vec![0.0; 44100], 44100);
    /// assert!((clip.duration_secs() - 1.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Borrow the raw samples.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the buffer holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Convert a millisecond duration to a sample count at this clip's rate.
    #[must_use]
    pub fn ms_to_samples(&self, ms: u32) -> usize {
        (u64::from(self.sample_rate) * u64::from(ms) / 1000) as usize
    }

    /// Linear fade-in over the first `ms` milliseconds (clamped to the clip).
    #[must_use]
    pub fn fade_in(&self, ms: u32) -> Self {
        let mut out = self.clone();
        let n = out.ms_to_samples(ms).min(out.samples.len());
        if n > 0 {
            for (i, s) in out.samples.iter_mut().take(n).enumerate() {
                *s *= i as f32 / n as f32;
            }
        }
        out
    }

    /// Linear fade-out over the last `ms` milliseconds (clamped to the clip).
    #[must_use]
    pub fn fade_out(&self, ms: u32) -> Self {
        let mut out = self.clone();
        let n = out.ms_to_samples(ms).min(out.samples.len());
        if n > 0 {
            for (i, s) in out.samples.iter_mut().rev().take(n).enumerate() {
                *s *= i as f32 / n as f32;
            }
        }
        out
    }

    /// Apply a gain in decibels (amplitude factor `10^(db/20)`).
    #[must_use]
    pub fn with_gain_db(&self, db: f32) -> Self {
        self.scaled(10.0f32.powf(db / 20.0))
    }

    /// Scale every sample by a linear factor.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            samples: self.samples.iter().map(|s| s * factor).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Reverse the clip.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut samples = self.samples.clone();
        samples.reverse();
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// The final `ms` milliseconds of the clip (the whole clip if shorter).
    #[must_use]
    pub fn tail(&self, ms: u32) -> Self {
        let n = self.ms_to_samples(ms).min(self.samples.len());
        Self {
            samples: self.samples[self.samples.len() - n..].to_vec(),
            sample_rate: self.sample_rate,
        }
    }

    /// Plain concatenation: `self` followed by `other`.
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        debug_assert_eq!(self.sample_rate, other.sample_rate);
        let mut samples = Vec::with_capacity(self.samples.len() + other.samples.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Concatenate with a linear crossfade of `ms` milliseconds.
    ///
    /// The trailing window of `self` and the leading window of `other` are
    /// blended with complementary linear weights instead of abutted, so the
    /// result is `self.len() + other.len() - overlap` samples long. The
    /// overlap is clamped to the shorter operand.
    ///
    /// # Example
    /// ```
    /// use sw_core::ClipBuffer;
    /// let a = ClipBuffer::new(vec![1.0; 4000], 1000);
    /// let b = ClipBuffer::new(vec![-1.0; 4000], 1000);
    /// let joined = a.append_crossfade(&b, 1000);
    /// assert_eq!(joined.len(), 4000 + 4000 - 1000);
    /// ```
    #[must_use]
    pub fn append_crossfade(&self, other: &Self, ms: u32) -> Self {
        debug_assert_eq!(self.sample_rate, other.sample_rate);
        let overlap = self
            .ms_to_samples(ms)
            .min(self.samples.len())
            .min(other.samples.len());
        if overlap == 0 {
            return self.append(other);
        }

        let head = self.samples.len() - overlap;
        let mut samples = Vec::with_capacity(self.samples.len() + other.samples.len() - overlap);
        samples.extend_from_slice(&self.samples[..head]);
        for (i, (&a, &b)) in self.samples[head..]
            .iter()
            .zip(&other.samples[..overlap])
            .enumerate()
        {
            let t = i as f32 / overlap as f32;
            samples.push(a * (1.0 - t) + b * t);
        }
        samples.extend_from_slice(&other.samples[overlap..]);
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Sum `other` onto `self` sample-for-sample from offset zero.
    ///
    /// The result is as long as the longer operand; the shorter one is
    /// implicitly silent past its end. Summing can exceed [-1, 1] — the
    /// export path clamps.
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        debug_assert_eq!(self.sample_rate, other.sample_rate);
        let (long, short) = if self.samples.len() >= other.samples.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut samples = long.samples.clone();
        for (s, &o) in samples.iter_mut().zip(&short.samples) {
            *s += o;
        }
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Linearly resample the clip to `target_rate`.
    ///
    /// Duration is preserved to within one sample. Returns a clone when the
    /// rates already match.
    #[must_use]
    pub fn resampled(&self, target_rate: u32) -> Self {
        if target_rate == self.sample_rate || self.sample_rate == 0 || target_rate == 0 {
            let mut out = self.clone();
            out.sample_rate = target_rate.max(self.sample_rate);
            return out;
        }

        let ratio = f64::from(self.sample_rate) / f64::from(target_rate);
        let out_len =
            (self.samples.len() as f64 * f64::from(target_rate) / f64::from(self.sample_rate))
                .round() as usize;
        let mut samples = Vec::with_capacity(out_len);
        for i in 0..out_len {
            let pos = i as f64 * ratio;
            let i0 = (pos.floor() as usize).min(self.samples.len().saturating_sub(1));
            let i1 = (i0 + 1).min(self.samples.len().saturating_sub(1));
            let frac = (pos - pos.floor()) as f32;
            samples.push(self.samples[i0] * (1.0 - frac) + self.samples[i1] * frac);
        }
        Self {
            samples,
            sample_rate: target_rate,
        }
    }
}
