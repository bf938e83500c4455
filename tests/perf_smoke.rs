use waterline_engine::WaterSurface;

#[test]
fn perf_smoke_advance() {
    let mut water = WaterSurface::with_defaults().expect("default config is valid");
    water.enable_perf_metrics(true);
    water.set_surface(0.0, -1.0, 64.0, 2.0);
    for i in 0..24 {
        let x = -30.0 + i as f32 * 2.5;
        water.add_physics_actor(x, 0.0, 1.0, 1.0, 0.5, -2.0, 1);
    }

    let steps = water.advance(0.1).expect("advance");
    let stats = water.get_perf_stats();
    assert_eq!(stats.steps_run(), steps);
    assert!(stats.advance_ms() >= 0.0);
    assert_eq!(stats.interactions_kept(), 16);
    assert_eq!(stats.interactions_dropped(), 8);
    assert_eq!(stats.mesh_segments(), 1024);
}
