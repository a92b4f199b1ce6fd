#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    camera::Intrinsics,
    data::{ColorFrame, DepthFrame, Point, PointCloud},
    Error,
};

use super::ProcessorTrait;

/// Back-projects an aligned depth/color frame pair into a colored point
/// cloud through the depth stream's pinhole intrinsics.
///
/// A sample is valid iff `0 < raw * depth_scale < clipping_distance`;
/// invalid samples are dropped entirely rather than emitted as zero or NaN
/// points. Points come out in row-major scan order of the source frame.
///
/// Pure and stateless: the output depends only on the frame pair and the
/// declared parameters, and repeated calls with the same inputs yield the
/// same cloud.
#[derive(Debug, Clone, Copy)]
pub struct CloudProjector {
    /// Raw depth unit to meter conversion factor
    pub depth_scale: f32,
    /// Samples at or beyond this distance (meter) are dropped
    pub clipping_distance: f32,
    /// Calibration of the depth stream
    pub intrinsics: Intrinsics,
}

impl CloudProjector {
    pub fn new(depth_scale: f32, clipping_distance: f32, intrinsics: Intrinsics) -> Self {
        Self {
            depth_scale,
            clipping_distance,
            intrinsics,
        }
    }

    pub fn project(&self, depth: &DepthFrame, color: &ColorFrame) -> Result<PointCloud, Error> {
        if depth.width != color.width || depth.height != color.height {
            return Err(Error::DimensionMismatch {
                depth_width: depth.width,
                depth_height: depth.height,
                color_width: color.width,
                color_height: color.height,
            });
        }

        #[cfg(feature = "parallel")]
        let points: Vec<Point> = (0..depth.height)
            .into_par_iter()
            .flat_map_iter(|y| self.project_row(depth, color, y))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let points: Vec<Point> = (0..depth.height)
            .flat_map(|y| self.project_row(depth, color, y))
            .collect();

        Ok(PointCloud::from(points))
    }

    fn project_row<'a>(
        &self,
        depth: &'a DepthFrame,
        color: &'a ColorFrame,
        y: usize,
    ) -> impl Iterator<Item = Point> + 'a {
        let projector = *self;

        (0..depth.width).filter_map(move |x| {
            let z = depth.get(x, y) as f32 * projector.depth_scale;

            if z <= 0.0 || z >= projector.clipping_distance {
                return None;
            }

            let [red, green, blue] = color.rgb_at(x, y);

            Some(Point {
                x: z * (x as f32 - projector.intrinsics.cx) / projector.intrinsics.fx,
                y: z * (y as f32 - projector.intrinsics.cy) / projector.intrinsics.fy,
                z,
                red,
                green,
                blue,
            })
        })
    }
}

impl ProcessorTrait<(DepthFrame, ColorFrame), PointCloud> for CloudProjector {
    fn process(
        &self,
        (depth, color): (DepthFrame, ColorFrame),
    ) -> Result<PointCloud, Box<dyn std::error::Error + Send + Sync>> {
        self.project(&depth, &color).map_err(Into::into)
    }
}
