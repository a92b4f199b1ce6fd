mod camera;
mod data;

pub mod device;
pub mod ply;
pub mod processor;
#[cfg(feature = "viewer")]
pub mod viewer;

use thiserror::Error;

pub use camera::Intrinsics;
pub use data::{ColorFormat, ColorFrame, DepthFrame, Point, PointCloud};
pub use device::{Backend, Device, StreamProfile, SyntheticBackend};
pub use processor::{
    CloudProjector, FilterConfig, ProcessTrait, ProcessorTrait, SpatialFilter, TemporalFilter,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("No stream configuration matching {width}x{height}")]
    NoStreamConfig { width: usize, height: usize },
    #[error("Frame dimensions mismatch: depth is {depth_width}x{depth_height}, color is {color_width}x{color_height}")]
    DimensionMismatch {
        depth_width: usize,
        depth_height: usize,
        color_width: usize,
        color_height: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid point cloud file: {0}")]
    Ply(String),
    #[error("Processing error: {0}")]
    Processing(Box<dyn std::error::Error + Send + Sync>),
}

/// Configuration of a streaming session and its depth pipeline.
#[derive(Clone)]
pub struct Config {
    /// Requested stream width (pixel)
    pub width: usize,
    /// Requested stream height (pixel)
    pub height: usize,
    /// Requested frame rate (Hz)
    pub frame_rate: u32,
    /// Frames grabbed and discarded at open while the sensor settles
    pub warmup_frames: u32,
    /// Clip at this maximum distance (meter)
    pub clipping_distance: f32,
    /// Depth noise filters, spatial pass first
    pub filters: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: 30,
            warmup_frames: 100,
            clipping_distance: 2.0,
            filters: FilterConfig::default(),
        }
    }
}
