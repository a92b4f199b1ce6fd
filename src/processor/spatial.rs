use crate::data::DepthFrame;

use super::ProcessorTrait;

/// Edge-preserving spatial smoothing over a single depth frame.
///
/// Each iteration runs an exponential moving average along every row in
/// both directions, then along every column in both directions. A sample is
/// only pulled towards its neighbor when their difference stays below
/// `smooth_delta`, so depth discontinuities survive the pass. Invalid
/// (zero) samples neither move nor attract their neighbors; `holes_fill`
/// optionally repairs them from the nearest valid sample to the left.
///
/// Stateless: the output depends only on the input frame and the declared
/// parameters.
#[derive(Debug, Clone, Copy)]
pub struct SpatialFilter {
    /// Number of smoothing iterations
    pub magnitude: u32,
    /// Weight of the current sample in the moving average [0, 1]
    pub smooth_alpha: f32,
    /// Maximum neighbor difference (raw units) still treated as noise
    pub smooth_delta: u16,
    /// 0 disables hole filling, n fills from up to 2^(n-1) pixels away
    pub holes_fill: u32,
}

impl Default for SpatialFilter {
    fn default() -> Self {
        Self {
            magnitude: 2,
            smooth_alpha: 0.5,
            smooth_delta: 20,
            holes_fill: 0,
        }
    }
}

impl SpatialFilter {
    pub fn apply(&self, frame: &DepthFrame) -> DepthFrame {
        let mut output = frame.clone();

        for _ in 0..self.magnitude {
            self.smooth_rows(&mut output);
            self.smooth_columns(&mut output);
        }

        if self.holes_fill > 0 {
            self.fill_holes(&mut output);
        }

        output
    }

    fn blend(&self, buffer: &mut [u16], index: usize, neighbor: usize) {
        let current = buffer[index];
        let other = buffer[neighbor];

        // holes are handled separately and never smeared around
        if current == 0 || other == 0 {
            return;
        }

        let delta = current.abs_diff(other);

        if delta == 0 || delta > self.smooth_delta {
            return;
        }

        let blended =
            current as f32 * self.smooth_alpha + other as f32 * (1.0 - self.smooth_alpha);

        buffer[index] = blended.round() as u16;
    }

    fn smooth_rows(&self, frame: &mut DepthFrame) {
        for y in 0..frame.height {
            let row = y * frame.width;

            for x in 1..frame.width {
                self.blend(&mut frame.buffer, row + x, row + x - 1);
            }

            for x in (0..frame.width.saturating_sub(1)).rev() {
                self.blend(&mut frame.buffer, row + x, row + x + 1);
            }
        }
    }

    fn smooth_columns(&self, frame: &mut DepthFrame) {
        for x in 0..frame.width {
            for y in 1..frame.height {
                self.blend(&mut frame.buffer, x + y * frame.width, x + (y - 1) * frame.width);
            }

            for y in (0..frame.height.saturating_sub(1)).rev() {
                self.blend(&mut frame.buffer, x + y * frame.width, x + (y + 1) * frame.width);
            }
        }
    }

    fn fill_holes(&self, frame: &mut DepthFrame) {
        let radius = 1usize << (self.holes_fill - 1);
        // fills read the pre-fill state so repairs do not cascade past the radius
        let source = frame.buffer.clone();

        for y in 0..frame.height {
            let row = y * frame.width;

            for x in 0..frame.width {
                if source[row + x] != 0 {
                    continue;
                }

                let filler = (1..=radius.min(x))
                    .map(|offset| source[row + x - offset])
                    .find(|&sample| sample != 0);

                if let Some(sample) = filler {
                    frame.buffer[row + x] = sample;
                }
            }
        }
    }
}

impl ProcessorTrait<DepthFrame, DepthFrame> for SpatialFilter {
    fn process(&self, input: DepthFrame) -> Result<DepthFrame, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.apply(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: usize, height: usize, samples: &[u16]) -> DepthFrame {
        DepthFrame {
            width,
            height,
            buffer: samples.to_vec(),
            sequence: 0,
            timestamp: 0,
        }
    }

    #[test]
    fn noise_is_pulled_towards_neighbors() {
        let filter = SpatialFilter {
            magnitude: 1,
            ..SpatialFilter::default()
        };
        let input = frame(3, 1, &[1000, 1010, 1000]);

        let output = filter.apply(&input);

        // the spike shrinks, nothing leaves the original value range
        assert!(output.buffer[1] < 1010);
        for &sample in &output.buffer {
            assert!((1000..=1010).contains(&sample));
        }
    }

    #[test]
    fn depth_discontinuities_are_preserved() {
        let filter = SpatialFilter::default();
        let input = frame(2, 1, &[1000, 1600]);

        let output = filter.apply(&input);

        assert_eq!(output.buffer, vec![1000, 1600]);
    }

    #[test]
    fn holes_are_filled_from_the_left_within_radius() {
        let filter = SpatialFilter {
            magnitude: 0,
            holes_fill: 2,
            ..SpatialFilter::default()
        };
        let input = frame(4, 1, &[800, 0, 0, 900]);

        let output = filter.apply(&input);

        assert_eq!(output.buffer, vec![800, 800, 800, 900]);
    }

    #[test]
    fn holes_beyond_the_radius_stay_invalid() {
        let filter = SpatialFilter {
            magnitude: 0,
            holes_fill: 1,
            ..SpatialFilter::default()
        };
        let input = frame(4, 1, &[800, 0, 0, 900]);

        let output = filter.apply(&input);

        assert_eq!(output.buffer, vec![800, 800, 0, 900]);
    }

    #[test]
    fn holes_do_not_attract_valid_samples() {
        let filter = SpatialFilter::default();
        let input = frame(3, 1, &[0, 1000, 0]);

        let output = filter.apply(&input);

        assert_eq!(output.buffer, vec![0, 1000, 0]);
    }

    #[test]
    fn smoothing_spans_columns_as_well() {
        let filter = SpatialFilter {
            magnitude: 1,
            ..SpatialFilter::default()
        };
        let input = frame(1, 3, &[1000, 1010, 1000]);

        let output = filter.apply(&input);

        assert!(output.buffer[1] < 1010);
    }
}
