use crate::{Config, Error};

use super::{Backend, Device, Opened};

/// Camera device with stopped streams.
#[derive(Clone)]
pub struct Closed<B: Backend> {
    pub(super) backend: B,
    pub(super) config: Config,
}

impl<B: Backend> Device<Closed<B>> {
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Negotiate and start the streams, then run the sensor warm-up.
    pub fn open(self) -> Result<Device<Opened<B>>, Error> {
        Ok(Device {
            inner: Opened::new(self.inner.backend, self.inner.config)?,
        })
    }
}
