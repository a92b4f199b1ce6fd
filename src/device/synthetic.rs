use log::{debug, info};

use crate::{
    camera::Intrinsics,
    data::{ColorFormat, ColorFrame, DepthFrame},
    Config, Error,
};

use super::{Backend, StreamProfile};

const SUPPORTED_MODES: &[StreamProfile] = &[
    StreamProfile {
        width: 424,
        height: 240,
        frame_rate: 30,
    },
    StreamProfile {
        width: 640,
        height: 480,
        frame_rate: 30,
    },
    StreamProfile {
        width: 848,
        height: 480,
        frame_rate: 30,
    },
    StreamProfile {
        width: 1280,
        height: 720,
        frame_rate: 30,
    },
];

/// Software frame source producing a deterministic scene: a gently rippling
/// wall with a spherical bump, a far band beyond usual clipping distances,
/// scattered sensor dropouts, and a color gradient stored in BGR order.
#[derive(Debug, Clone, Default)]
pub struct SyntheticBackend {
    profile: Option<StreamProfile>,
    sequence: u32,
    dropout_interval: u32,
}

impl SyntheticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every `interval`-th frame pair as unavailable.
    pub fn with_dropout(interval: u32) -> Self {
        Self {
            dropout_interval: interval,
            ..Self::default()
        }
    }

    fn depth_sample(profile: StreamProfile, x: usize, y: usize, sequence: u32) -> u16 {
        // scattered invalid samples, as a real sensor produces
        if (x + y * profile.width) % 97 == 0 {
            return 0;
        }

        let u = x as f32 / profile.width as f32;
        let v = y as f32 / profile.height as f32;

        // band on the right edge, beyond usual clipping distances
        if u > 0.92 {
            return 2600;
        }

        // wall at ~1.5m with a shallow ripple drifting over time
        let mut depth = 1500.0 + 40.0 * (u * 12.0 + sequence as f32 * 0.1).sin();

        // spherical bump towards the viewer in the middle of the scene
        let du = u - 0.5;
        let dv = v - 0.5;
        let r2 = du * du + dv * dv;

        if r2 < 0.04 {
            depth -= 400.0 * (1.0 - r2 / 0.04);
        }

        depth as u16
    }
}

impl Backend for SyntheticBackend {
    fn open(&mut self, config: &Config) -> Result<StreamProfile, Error> {
        let profile = SUPPORTED_MODES
            .iter()
            .copied()
            .find(|mode| mode.width == config.width && mode.height == config.height)
            .ok_or(Error::NoStreamConfig {
                width: config.width,
                height: config.height,
            })?;

        self.profile = Some(profile);
        self.sequence = 0;

        debug!(
            "synthetic streams negotiated at {}x{}@{}",
            profile.width, profile.height, profile.frame_rate
        );

        Ok(profile)
    }

    fn depth_scale(&self) -> f32 {
        // depth units are millimeters
        0.001
    }

    fn intrinsics(&self) -> Intrinsics {
        match self.profile {
            Some(profile) => Intrinsics {
                fx: profile.width as f32 * 0.8,
                fy: profile.width as f32 * 0.8,
                cx: (profile.width as f32 - 1.0) / 2.0,
                cy: (profile.height as f32 - 1.0) / 2.0,
            },
            None => Intrinsics::default(),
        }
    }

    fn next_frame_pair(&mut self) -> Result<Option<(DepthFrame, ColorFrame)>, Error> {
        let Some(profile) = self.profile else {
            return Ok(None);
        };

        let sequence = self.sequence;
        self.sequence += 1;

        if self.dropout_interval > 0 && sequence % self.dropout_interval == 0 {
            return Ok(None);
        }

        let timestamp = sequence.saturating_mul(1000 / profile.frame_rate.max(1));

        let mut depth_buffer = Vec::with_capacity(profile.width * profile.height);
        let mut color_buffer = Vec::with_capacity(profile.width * profile.height * 3);

        for y in 0..profile.height {
            for x in 0..profile.width {
                depth_buffer.push(Self::depth_sample(profile, x, y, sequence));

                // gradient stored in the stream's native BGR order
                let blue = (x * 255 / profile.width) as u8;
                let green = (y * 255 / profile.height) as u8;

                color_buffer.extend_from_slice(&[blue, green, 200]);
            }
        }

        Ok(Some((
            DepthFrame {
                width: profile.width,
                height: profile.height,
                buffer: depth_buffer,
                sequence,
                timestamp,
            },
            ColorFrame {
                format: ColorFormat::Bgr,
                width: profile.width,
                height: profile.height,
                buffer: color_buffer,
                sequence,
                timestamp,
            },
        )))
    }

    fn close(&mut self) {
        if self.profile.take().is_some() {
            info!("synthetic streams stopped");
        }
    }
}
