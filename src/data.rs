/// Channel layout of a color frame buffer.
///
/// Aligned color streams are commonly delivered as BGR8, while emitted
/// points carry named red/green/blue fields. The mapping between the two
/// goes through [`ColorFrame::rgb_at`], never through positional copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Rgb,
    Bgr,
}

impl ColorFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        3
    }
}

/// Depth frame in raw sensor units, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    pub width: usize,
    pub height: usize,
    pub buffer: Vec<u16>,
    pub sequence: u32,
    pub timestamp: u32,
}

impl DepthFrame {
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.buffer[x + y * self.width]
    }
}

/// Color frame resampled onto the depth stream's pixel grid, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorFrame {
    pub format: ColorFormat,
    pub width: usize,
    pub height: usize,
    pub buffer: Vec<u8>,
    pub sequence: u32,
    pub timestamp: u32,
}

impl ColorFrame {
    /// Red, green and blue at (x, y) regardless of the buffer's native
    /// channel order.
    pub fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let offset = (x + y * self.width) * self.format.bytes_per_pixel();
        let pixel = &self.buffer[offset..offset + 3];

        match self.format {
            ColorFormat::Rgb => [pixel[0], pixel[1], pixel[2]],
            ColorFormat::Bgr => [pixel[2], pixel[1], pixel[0]],
        }
    }
}

/// Colored point in the camera's optical frame, coordinates in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Flat list of colored points derived from one frame pair.
///
/// Points follow row-major scan order of the source frame, but consumers
/// must not rely on any ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl From<Vec<Point>> for PointCloud {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PointCloud {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
