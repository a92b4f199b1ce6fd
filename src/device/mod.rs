mod closed;
mod opened;
mod synthetic;

pub use closed::Closed;
pub use opened::Opened;
pub use synthetic::SyntheticBackend;

use crate::{camera::Intrinsics, data::ColorFrame, data::DepthFrame, Config, Error};

/// Stream configuration negotiated at open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamProfile {
    pub width: usize,
    pub height: usize,
    pub frame_rate: u32,
}

/// The vendor SDK seam behind a streaming session.
///
/// A backend produces depth and color frames already resampled onto the same
/// pixel grid. A missing half of a pair is signalled with `Ok(None)` and is
/// skippable, not fatal.
pub trait Backend {
    /// Negotiate a matching resolution and format across both streams and
    /// start them. There is no fallback resolution: negotiation failure is
    /// terminal for this open attempt.
    fn open(&mut self, config: &Config) -> Result<StreamProfile, Error>;

    /// Raw depth unit to meter conversion factor, fixed per session.
    fn depth_scale(&self) -> f32;

    /// Calibration of the depth stream's video profile.
    fn intrinsics(&self) -> Intrinsics;

    /// Block until the next aligned frame pair is available, or `None` when
    /// either component of the pair is missing.
    fn next_frame_pair(&mut self) -> Result<Option<(DepthFrame, ColorFrame)>, Error>;

    /// Stop the streams and release the underlying handle.
    fn close(&mut self);
}

#[derive(Clone)]
pub struct Device<T> {
    inner: T,
}

impl Device<()> {
    /// Wrap a backend, ready to be opened with `config`.
    pub fn from_backend<B: Backend>(backend: B, config: Config) -> Device<Closed<B>> {
        Device {
            inner: Closed { backend, config },
        }
    }

    /// A deterministic software device, for tests and machines without
    /// camera hardware.
    pub fn synthetic(config: Config) -> Device<Closed<SyntheticBackend>> {
        Device::from_backend(SyntheticBackend::new(), config)
    }
}
