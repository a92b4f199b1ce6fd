use depth_cloud::{ply, CloudProjector, Config, Device, PointCloud, ProcessTrait};

#[test]
fn synthetic_session_to_ply_round_trip() {
    let config = Config {
        warmup_frames: 5,
        ..Config::default()
    };
    let clipping_distance = config.clipping_distance;
    let filters = config.filters.clone();

    let mut device = Device::synthetic(config).open().unwrap();
    let projector = CloudProjector::new(
        device.depth_scale(),
        clipping_distance,
        device.intrinsics(),
    );

    let mut history = None;
    let mut cloud = PointCloud::new();

    for _ in 0..3 {
        let (depth, color) = device.next_frame_pair().unwrap().unwrap();
        let total_samples = depth.width * depth.height;

        let depth = filters.apply(depth, history.as_ref());

        cloud = (depth.clone(), color).process(&projector).unwrap();
        history = Some(depth);

        // the scene contains invalid and out-of-range samples
        assert!(!cloud.is_empty());
        assert!(cloud.len() < total_samples);
    }

    // every emitted point respects the validity mask
    for point in cloud.iter() {
        assert!(point.z > 0.0);
        assert!(point.z < clipping_distance);
    }

    let path = std::env::temp_dir().join(format!("depth_cloud_pipeline_{}.ply", std::process::id()));

    ply::write(&cloud, &path).unwrap();
    let loaded = ply::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.len(), cloud.len());

    for (original, loaded) in cloud.iter().zip(loaded.iter()) {
        assert!((original.x - loaded.x).abs() < 1e-5);
        assert!((original.y - loaded.y).abs() < 1e-5);
        assert!((original.z - loaded.z).abs() < 1e-5);
        assert_eq!(
            (original.red, original.green, original.blue),
            (loaded.red, loaded.green, loaded.blue)
        );
    }

    device.close();
}

#[test]
fn emitted_colors_follow_the_streams_native_bgr_layout() {
    let config = Config {
        warmup_frames: 0,
        ..Config::default()
    };
    let clipping_distance = config.clipping_distance;

    let mut device = Device::synthetic(config).open().unwrap();
    let projector = CloudProjector::new(
        device.depth_scale(),
        clipping_distance,
        device.intrinsics(),
    );

    let (depth, color) = device.next_frame_pair().unwrap().unwrap();
    let cloud = (depth, color).process(&projector).unwrap();

    // the synthetic scene stores a constant 200 in the BGR red slot
    for point in cloud.iter() {
        assert_eq!(point.red, 200);
    }
}
