//! Interactive point cloud viewer, enabled with the `viewer` feature.

use kiss3d::light::Light;
use kiss3d::nalgebra::{Point2, Point3};
use kiss3d::text::Font;
use kiss3d::window::Window;

use crate::data::PointCloud;

/// Opens a window rendering the cloud as a colored point set and blocks
/// until it is closed.
pub fn show(cloud: &PointCloud) {
    let mut window = Window::new("depth-cloud");

    window.set_light(Light::StickToCamera);
    window.set_point_size(2.0);

    // optical frame (y down, z forward) to viewer frame (y up, z backward)
    let vertices: Vec<(Point3<f32>, Point3<f32>)> = cloud
        .iter()
        .map(|point| {
            (
                Point3::new(point.x, -point.y, -point.z),
                Point3::new(
                    point.red as f32 / 255.0,
                    point.green as f32 / 255.0,
                    point.blue as f32 / 255.0,
                ),
            )
        })
        .collect();

    let label = format!("Number of points: {}", cloud.len());

    while window.render() {
        for (position, color) in &vertices {
            window.draw_point(position, color);
        }

        window.draw_text(
            &label,
            &Point2::new(0.0, 20.0),
            60.0,
            &Font::default(),
            &Point3::new(1.0, 1.0, 1.0),
        );
    }
}
