/// Depth stream intrinsic calibration parameters.
/// Devices expose factory preset values for these parameters.
/// They are used to back-project depth pixels into the camera's optical frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    /// Focal length x (pixel)
    pub fx: f32,
    /// Focal length y (pixel)
    pub fy: f32,
    /// Principal point x (pixel)
    pub cx: f32,
    /// Principal point y (pixel)
    pub cy: f32,
}
