use log::warn;

use crate::data::DepthFrame;

use super::ProcessorTrait;

/// Temporal smoothing of a depth frame against the previously filtered one.
///
/// Samples whose difference to their predecessor stays below `smooth_delta`
/// are blended towards it; larger jumps are kept as-is, so real motion is
/// not averaged away. With `holes_fill` enabled, an invalid (zero) sample
/// inherits the predecessor's value.
///
/// The filter holds no history of its own: the caller passes the previous
/// output back in, and the first frame of a session passes through
/// unchanged.
#[derive(Debug, Clone, Copy)]
pub struct TemporalFilter {
    /// Weight of the current sample in the blend [0, 1]
    pub smooth_alpha: f32,
    /// Maximum frame-to-frame difference (raw units) still treated as noise
    pub smooth_delta: u16,
    /// 0 disables filling invalid samples from the previous frame
    pub holes_fill: u32,
}

impl Default for TemporalFilter {
    fn default() -> Self {
        Self {
            smooth_alpha: 0.4,
            smooth_delta: 20,
            holes_fill: 3,
        }
    }
}

impl TemporalFilter {
    pub fn apply(&self, current: &DepthFrame, previous: Option<&DepthFrame>) -> DepthFrame {
        let Some(previous) = previous else {
            return current.clone();
        };

        if previous.width != current.width || previous.height != current.height {
            warn!(
                "temporal history is {}x{} but the stream is {}x{}, dropping it",
                previous.width, previous.height, current.width, current.height
            );

            return current.clone();
        }

        let mut output = current.clone();

        for (sample, &past) in output.buffer.iter_mut().zip(previous.buffer.iter()) {
            if past == 0 {
                continue;
            }

            if *sample == 0 {
                if self.holes_fill > 0 {
                    *sample = past;
                }

                continue;
            }

            if sample.abs_diff(past) <= self.smooth_delta {
                let blended = *sample as f32 * self.smooth_alpha
                    + past as f32 * (1.0 - self.smooth_alpha);

                *sample = blended.round() as u16;
            }
        }

        output
    }
}

impl ProcessorTrait<(DepthFrame, DepthFrame), DepthFrame> for TemporalFilter {
    fn process(
        &self,
        (current, previous): (DepthFrame, DepthFrame),
    ) -> Result<DepthFrame, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.apply(&current, Some(&previous)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(samples: &[u16]) -> DepthFrame {
        DepthFrame {
            width: samples.len(),
            height: 1,
            buffer: samples.to_vec(),
            sequence: 0,
            timestamp: 0,
        }
    }

    #[test]
    fn first_frame_passes_through() {
        let filter = TemporalFilter::default();
        let current = frame(&[1000, 0, 1200]);

        assert_eq!(filter.apply(&current, None), current);
    }

    #[test]
    fn small_jitter_is_blended_towards_history() {
        let filter = TemporalFilter::default();
        let current = frame(&[1010]);
        let previous = frame(&[1000]);

        let output = filter.apply(&current, Some(&previous));

        // 0.4 * 1010 + 0.6 * 1000
        assert_eq!(output.buffer, vec![1004]);
    }

    #[test]
    fn real_motion_is_not_averaged_away() {
        let filter = TemporalFilter::default();
        let current = frame(&[1100]);
        let previous = frame(&[1000]);

        let output = filter.apply(&current, Some(&previous));

        assert_eq!(output.buffer, vec![1100]);
    }

    #[test]
    fn holes_inherit_the_previous_value() {
        let filter = TemporalFilter::default();
        let current = frame(&[0]);
        let previous = frame(&[900]);

        let output = filter.apply(&current, Some(&previous));

        assert_eq!(output.buffer, vec![900]);
    }

    #[test]
    fn hole_filling_can_be_disabled() {
        let filter = TemporalFilter {
            holes_fill: 0,
            ..TemporalFilter::default()
        };
        let current = frame(&[0]);
        let previous = frame(&[900]);

        let output = filter.apply(&current, Some(&previous));

        assert_eq!(output.buffer, vec![0]);
    }

    #[test]
    fn processor_seam_blends_against_explicit_history() {
        let filter = TemporalFilter::default();

        let output = filter
            .process((frame(&[1010]), frame(&[1000])))
            .unwrap();

        assert_eq!(output.buffer, vec![1004]);
    }

    #[test]
    fn mismatched_history_is_dropped() {
        let filter = TemporalFilter::default();
        let current = frame(&[1000, 1000]);
        let previous = frame(&[990]);

        let output = filter.apply(&current, Some(&previous));

        assert_eq!(output, current);
    }
}
