//! Full drawing-session flows through the library's public API: pointer
//! input mapped into the surface, the save payload, and the gallery API.

use std::sync::Arc;

use gemsketch::Config;
use gemsketch::canvas::{DrawingSurface, SurfaceSettings};
use gemsketch::gallery::{DrawingStore, routes};
use gemsketch::input::{DisplayGeometry, PointerInput, Tool, ToolState};
use gemsketch::util::{Point, png_data_url};

const BLACK_PX: [u8; 4] = [0, 0, 0, 255];

/// A surface mounted from the default config, displayed at 500x250 so both
/// axes scale by different factors (x4 and x4.8).
fn mounted_surface() -> (DrawingSurface, DisplayGeometry) {
    let config = Config::default();
    let settings = config.canvas.surface_settings();
    let surface = DrawingSurface::new(settings).expect("surface creation");
    let geometry = DisplayGeometry {
        left: 0.0,
        top: 0.0,
        display_width: 500.0,
        display_height: 250.0,
        buffer_width: settings.width,
        buffer_height: settings.height,
    };
    (surface, geometry)
}

#[test]
fn touch_session_draws_through_the_mapper() {
    let (mut surface, geometry) = mounted_surface();
    let tools = Config::default().drawing.initial_tool_state();

    let press = geometry
        .map(&PointerInput::Touch {
            points: vec![(100.0, 50.0)],
        })
        .unwrap();
    // A second finger lands mid-gesture; the first keeps driving the stroke.
    let drag = geometry
        .map(&PointerInput::Touch {
            points: vec![(150.0, 100.0), (400.0, 30.0)],
        })
        .unwrap();

    surface.pointer_pressed(&tools, press).unwrap();
    surface.pointer_moved(&tools, drag).unwrap();
    surface.pointer_released(&tools, drag).unwrap();

    // Screen (150, 100) lands at buffer (600, 480).
    assert_eq!(surface.pixel(600, 480).unwrap(), BLACK_PX);
    assert_eq!(surface.history_len(), 2);
}

#[test]
fn tapping_the_display_center_places_a_default_shape_at_buffer_center() {
    let (mut surface, geometry) = mounted_surface();
    let tools = ToolState {
        tool: Tool::Circle,
        ..ToolState::default()
    };

    let center = geometry
        .map(&PointerInput::Mouse { x: 250.0, y: 125.0 })
        .unwrap();
    assert_eq!(center, Point::new(1000.0, 600.0));

    surface.pointer_pressed(&tools, center).unwrap();
    surface.pointer_released(&tools, center).unwrap();

    // The tap inscribes a circle in the default 150x150 box centered on the
    // buffer center, so the outline crosses (1000 +/- 75, 600).
    assert_eq!(surface.pixel(925, 600).unwrap(), BLACK_PX);
    assert_eq!(surface.pixel(1075, 600).unwrap(), BLACK_PX);
    assert_eq!(surface.history_len(), 2);
}

#[tokio::test]
async fn save_flow_round_trips_through_the_gallery_api() {
    let mut surface = DrawingSurface::new(SurfaceSettings {
        width: 320,
        height: 200,
        ..SurfaceSettings::default()
    })
    .unwrap();
    let tools = ToolState::default();

    surface
        .pointer_pressed(&tools, Point::new(20.0, 20.0))
        .unwrap();
    surface
        .pointer_moved(&tools, Point::new(300.0, 180.0))
        .unwrap();
    surface
        .pointer_released(&tools, Point::new(300.0, 180.0))
        .unwrap();

    let payload = png_data_url(&surface.export_png().unwrap());

    let dir = tempfile::tempdir().unwrap();
    let api = routes(Arc::new(DrawingStore::new(dir.path(), 50)), 20);

    let res = warp::test::request()
        .method("POST")
        .path("/api/drawings")
        .json(&serde_json::json!({ "imageData": payload }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 201);

    let res = warp::test::request()
        .method("GET")
        .path("/api/drawings")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    let drawings = body["drawings"].as_array().unwrap();
    assert_eq!(drawings.len(), 1);
    assert!(
        drawings[0]["imageData"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
    assert!(!drawings[0]["id"].as_str().unwrap().is_empty());
}
