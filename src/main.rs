use depth_cloud::{
    ply, CloudProjector, Config, DepthFrame, Device, Error, PointCloud, ProcessTrait,
};

// a few frames so the temporal pass has history to converge on
const FRAME_COUNT: usize = 10;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut device = Device::synthetic(Config::default()).open()?;

    let filters = device.config().filters.clone();
    let projector = CloudProjector::new(
        device.depth_scale(),
        device.config().clipping_distance,
        device.intrinsics(),
    );

    let mut history: Option<DepthFrame> = None;
    let mut cloud = PointCloud::new();
    let mut grabbed = 0;

    while grabbed < FRAME_COUNT {
        // a missing half of the pair is skippable, not fatal
        let Some((depth, color)) = device.next_frame_pair()? else {
            continue;
        };

        let depth = filters.apply(depth, history.as_ref());

        cloud = (depth.clone(), color).process(&projector)?;
        history = Some(depth);
        grabbed += 1;
    }

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("cloud.ply"));

    ply::write(&cloud, &path)?;

    #[cfg(feature = "viewer")]
    depth_cloud::viewer::show(&cloud);

    device.close();

    Ok(())
}
