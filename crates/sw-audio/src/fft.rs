use realfft::RealFftPlanner;

/// Hann-windowed real FFT over fixed-size analysis frames.
///
/// The plan and scratch buffers are allocated once and reused across frames;
/// short frames are zero-padded.
///
/// # Example
/// ```
/// use sw_audio::fft::SpectrumPipeline;
/// let mut fft = SpectrumPipeline::new(256);
/// let mags = fft.magnitudes(&[0.0f32; 256]);
/// assert_eq!(mags.len(), 129); // N/2 + 1
/// ```
pub struct SpectrumPipeline {
    frame_size: usize,
    input_buf: Vec<f32>,
    spectrum_buf: Vec<realfft::num_complex::Complex<f32>>,
    scratch: Vec<realfft::num_complex::Complex<f32>>,
    plan: std::sync::Arc<dyn realfft::RealToComplex<f32>>,
    window: Vec<f32>,
}

impl SpectrumPipeline {
    /// Create a pipeline for `frame_size`-sample analysis frames.
    ///
    /// # Panics
    /// Panics if `frame_size` is 0.
    #[must_use]
    pub fn new(frame_size: usize) -> Self {
        assert!(frame_size > 0, "FFT frame size must be > 0");

        let mut planner = RealFftPlanner::<f32>::new();
        let plan = planner.plan_fft_forward(frame_size);

        let input_buf = plan.make_input_vec();
        let spectrum_buf = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();

        let window: Vec<f32> = (0..frame_size)
            .map(|i| {
                0.5 * (1.0
                    - (2.0 * std::f32::consts::PI * i as f32 / (frame_size as f32 - 1.0)).cos())
            })
            .collect();

        Self {
            frame_size,
            input_buf,
            spectrum_buf,
            scratch,
            plan,
            window,
        }
    }

    /// Spectrum magnitudes (N/2+1 bins) of one windowed frame.
    pub fn magnitudes(&mut self, samples: &[f32]) -> Vec<f32> {
        let n = self.frame_size.min(samples.len());

        for (i, slot) in self.input_buf.iter_mut().enumerate() {
            *slot = if i < n {
                samples[i] * self.window[i]
            } else {
                0.0
            };
        }

        if self
            .plan
            .process_with_scratch(&mut self.input_buf, &mut self.spectrum_buf, &mut self.scratch)
            .is_err()
        {
            return vec![0.0; self.spectrum_buf.len()];
        }

        self.spectrum_buf
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt() / self.frame_size as f32)
            .collect()
    }

    /// Analysis frame size.
    #[must_use]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }
}
