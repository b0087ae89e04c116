//! Integration tests for the preview and background lifecycles.
//!
//! Drives the headless harness frame by frame and checks what is mounted,
//! listening and scheduled after each step.

use glam::Vec3;
use nox_configurator_lib::harness::{ConfiguratorHarness, ResourceCounts};
use nox_configurator_lib::preview::{MountPoint, Transition};
use nox_configurator_lib::state::settings::AppSettings;

const WINDOW: [f32; 2] = [1280.0, 800.0];

fn started() -> ConfiguratorHarness {
    let mut h = ConfiguratorHarness::new(WINDOW);
    assert_eq!(h.frame(), Transition::Built);
    h
}

fn baseline() -> ResourceCounts {
    ResourceCounts {
        surfaces: 2,
        viewports: 1,
        overlays: 1,
        loops: 2,
        listeners: 2,
        pointer_listeners: 1,
        resize_listeners: 1,
    }
}

#[test]
fn test_startup_builds_default_block() {
    let h = started();
    assert_eq!(h.counts(), baseline());

    let preview = h.preview().unwrap();
    let geometry = preview.scene.geometry;
    assert_eq!((geometry.width, geometry.height, geometry.depth), (10.0, 2.0, 5.0));
    assert_eq!(preview.mount().size(), [300.0, 300.0]);
}

#[test]
fn test_each_dimension_change_rebuilds_exactly_once() {
    let mut h = started();

    for (i, length) in ["11", "12", "13"].iter().enumerate() {
        h.set("length", length).unwrap();
        assert_eq!(h.frame(), Transition::Rebuilt);
        h.run_frames(5);
        assert_eq!(h.transitions().len(), i + 2);
        assert_eq!(h.counts(), baseline());
    }

    let stats = h.stats();
    // background + first build + three rebuilds
    assert_eq!(stats.mounted, 5);
    assert_eq!(stats.unmounted, 3);
    assert_eq!(h.preview().unwrap().dimensions().length, 13.0);
}

#[test]
fn test_several_edits_in_one_frame_rebuild_once() {
    let mut h = started();
    h.set("length", "20").unwrap();
    h.set("width", "8").unwrap();
    h.set("height", "4").unwrap();
    assert_eq!(h.frame(), Transition::Rebuilt);
    assert_eq!(h.frame(), Transition::Unchanged);
    assert_eq!(h.stats().unmounted, 1);
}

#[test]
fn test_unrelated_edits_keep_session() {
    let mut h = started();
    let surface = h.preview().unwrap().surface();

    h.set("name", "Jane Doe").unwrap();
    h.set("quantity", "3").unwrap();
    h.set("additionalComments", "deburr edges").unwrap();
    h.toggle("roughCutting").unwrap();
    assert_eq!(h.frame(), Transition::Unchanged);

    // Same value typed differently
    h.set("length", "10.0").unwrap();
    assert_eq!(h.frame(), Transition::Unchanged);

    assert_eq!(h.preview().unwrap().surface(), surface);
    assert_eq!(h.transitions(), &[Transition::Built]);
}

#[test]
fn test_geometry_follows_inputs() {
    let mut h = started();
    h.set("length", "12").unwrap();
    h.set("width", "7").unwrap();
    h.set("height", "3").unwrap();
    h.frame();

    let preview = h.preview().unwrap();
    assert_eq!(preview.mesh().extent(), Vec3::new(12.0, 3.0, 7.0));
}

#[test]
fn test_camera_distance_scales_with_largest_side() {
    let mut h = started();
    let eye = h.preview().unwrap().camera.eye_position();
    assert!((eye - Vec3::splat(15.0)).length() < 1e-3, "{eye:?}");

    h.set("width", "40").unwrap();
    h.frame();
    let eye = h.preview().unwrap().camera.eye_position();
    assert!((eye - Vec3::splat(60.0)).length() < 1e-2, "{eye:?}");
}

#[test]
fn test_unparseable_dimension_keeps_last_block() {
    let mut h = started();
    h.set("height", "").unwrap();
    assert_eq!(h.frame(), Transition::Unchanged);
    h.set("height", "abc").unwrap();
    assert_eq!(h.frame(), Transition::Unchanged);
    assert_eq!(h.preview().unwrap().dimensions().height, 2.0);

    h.set("height", "2.5").unwrap();
    assert_eq!(h.frame(), Transition::Rebuilt);
    assert_eq!(h.counts(), baseline());
}

#[test]
fn test_non_positive_dimension_still_previews() {
    let mut h = started();
    h.set("width", "0").unwrap();
    assert_eq!(h.frame(), Transition::Rebuilt);
    assert_eq!(h.preview().unwrap().scene.geometry.depth, 0.0);
    // ...but the order cannot be submitted
    assert!(h.form.submission().is_err());
}

#[test]
fn test_resize_touches_background_only() {
    let mut h = started();
    let preview_surface = h.preview().unwrap().surface();

    assert!(h.resize(1920.0, 1080.0));
    assert!(!h.resize(1920.0, 1080.0));
    assert_eq!(h.frame(), Transition::Unchanged);

    let bg = h.session.background.as_ref().unwrap();
    assert!((bg.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    let overlay = h.session.compositor.surface(bg.surface()).unwrap();
    assert_eq!(overlay.size, [1920.0, 1080.0]);

    let viewport = h.session.compositor.surface(preview_surface).unwrap();
    assert_eq!(viewport.size, [300.0, 300.0]);
    assert_eq!(h.counts(), baseline());
}

#[test]
fn test_mount_point_removed_and_restored() {
    let mut h = started();
    h.set_mount(None);
    assert_eq!(h.frame(), Transition::Released);
    assert!(h.preview().is_none());
    assert_eq!(h.counts().viewports, 0);
    assert_eq!(h.counts().pointer_listeners, 0);
    assert_eq!(h.counts().loops, 1);

    // Background keeps running without the preview
    let before = h.session.background.as_ref().unwrap().frames();
    h.run_frames(3);
    assert_eq!(h.session.background.as_ref().unwrap().frames(), before + 3);

    h.set_mount(MountPoint::new([300.0, 300.0]));
    assert_eq!(h.frame(), Transition::Built);
    assert_eq!(h.counts(), baseline());
}

#[test]
fn test_block_spins_every_frame() {
    let mut h = started();
    h.run_frames(99);
    let preview = h.preview().unwrap();
    // first frame() already stepped once
    assert_eq!(preview.frames(), 100);
    assert!((preview.scene.rotation_y - 1.0).abs() < 1e-3);
}

#[test]
fn test_shutdown_releases_everything() {
    let mut h = started();
    h.set("length", "30").unwrap();
    h.run_frames(10);
    h.shutdown();

    assert_eq!(
        h.counts(),
        ResourceCounts {
            surfaces: 0,
            viewports: 0,
            overlays: 0,
            loops: 0,
            listeners: 0,
            pointer_listeners: 0,
            resize_listeners: 0,
        }
    );
    let stats = h.stats();
    assert_eq!(stats.mounted, stats.unmounted);

    // Frames after shutdown do nothing
    assert_eq!(h.frame(), Transition::Skipped);
    assert_eq!(h.counts().surfaces, 0);
}

#[test]
fn test_no_background_when_disabled() {
    let mut settings = AppSettings::default();
    settings.background.visible = false;
    let mut h = ConfiguratorHarness::with_settings(WINDOW, settings);
    assert_eq!(h.frame(), Transition::Built);

    let counts = h.counts();
    assert_eq!(counts.overlays, 0);
    assert_eq!(counts.resize_listeners, 0);
    assert_eq!(counts.viewports, 1);
    assert!(h.resize(800.0, 600.0));
}

#[test]
fn test_negative_spread_does_not_abort_startup() {
    let mut settings = AppSettings::default();
    settings.background.spread = -2500.0;
    let mut h = ConfiguratorHarness::with_settings(WINDOW, settings);
    assert_eq!(h.frame(), Transition::Built);
    assert_eq!(h.counts(), baseline());
}
