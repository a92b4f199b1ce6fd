use log::{debug, info};

use crate::{
    camera::Intrinsics,
    data::{ColorFrame, DepthFrame},
    Config, Error,
};

use super::{Backend, Closed, Device, StreamProfile};

/// Camera device with running streams.
///
/// The underlying stream handle is released on every exit path: `close`
/// releases it and hands the device back for reuse, and dropping an opened
/// device releases it as well.
pub struct Opened<B: Backend> {
    backend: Option<B>,
    config: Config,
    profile: StreamProfile,
    depth_scale: f32,
    intrinsics: Intrinsics,
    running: bool,
}

impl<B: Backend> Opened<B> {
    pub(super) fn new(mut backend: B, config: Config) -> Result<Self, Error> {
        let profile = backend.open(&config)?;

        info!(
            "streams started at {}x{}@{}",
            profile.width, profile.height, profile.frame_rate
        );

        // let the sensor settle before handing out frames
        for _ in 0..config.warmup_frames {
            if let Err(error) = backend.next_frame_pair() {
                backend.close();

                return Err(error);
            }
        }

        if config.warmup_frames > 0 {
            debug!("discarded {} warm-up frames", config.warmup_frames);
        }

        let depth_scale = backend.depth_scale();
        let intrinsics = backend.intrinsics();

        Ok(Self {
            backend: Some(backend),
            config,
            profile,
            depth_scale,
            intrinsics,
            running: true,
        })
    }

    fn release(&mut self) {
        if !self.running {
            return;
        }

        self.running = false;

        if let Some(backend) = self.backend.as_mut() {
            backend.close();
        }

        info!("streaming session released");
    }
}

impl<B: Backend> Drop for Opened<B> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<B: Backend> Device<Opened<B>> {
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn stream_profile(&self) -> StreamProfile {
        self.inner.profile
    }

    pub fn depth_scale(&self) -> f32 {
        self.inner.depth_scale
    }

    pub fn intrinsics(&self) -> Intrinsics {
        self.inner.intrinsics
    }

    /// Block until the next aligned frame pair, `None` when either half of
    /// the pair is missing.
    pub fn next_frame_pair(&mut self) -> Result<Option<(DepthFrame, ColorFrame)>, Error> {
        match self.inner.backend.as_mut() {
            Some(backend) => backend.next_frame_pair(),
            None => Ok(None),
        }
    }

    /// Stop the streams and hand the device back for later reuse.
    pub fn close(mut self) -> Device<Closed<B>> {
        self.inner.release();

        let config = self.inner.config.clone();

        match self.inner.backend.take() {
            Some(backend) => Device {
                inner: Closed { backend, config },
            },
            // the backend is only ever taken here, and `close` consumes the device
            None => unreachable!("session backend already taken"),
        }
    }
}
