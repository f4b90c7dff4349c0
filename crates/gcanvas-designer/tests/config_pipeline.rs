use gcanvas_camtools::StopReason;
use gcanvas_designer::Canvas;
use gcanvas_motion::{Instruction, Motion, RecordingDriver};
use gcanvas_settings::CanvasConfig;
use tempfile::TempDir;

fn recording_canvas(config: &CanvasConfig) -> Canvas<Motion<RecordingDriver>> {
    let motion = Motion::new(
        RecordingDriver::new(config.arc_support()),
        config.motion_settings(),
    );
    Canvas::from_config(motion, config).unwrap()
}

#[test]
fn test_config_file_drives_canvas() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gcanvas.toml");
    std::fs::write(
        &path,
        r#"
[tool]
diameter = 2.0

[cutting]
depth_of_cut = 0.5

[motion]
safe_z = 3.0
supports_arc_cw = true
supports_arc_ccw = true
"#,
    )
    .unwrap();

    let config = CanvasConfig::load_from_file(&path).unwrap();
    let mut canvas = recording_canvas(&config);
    assert_eq!(canvas.tool_diameter(), 2.0);

    let report = canvas.fill_rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(report.stop, StopReason::Exhausted);

    canvas.begin_path();
    canvas.arc(30.0, 0.0, 5.0, 0.0, std::f64::consts::PI, false);
    canvas.stroke();

    let log = canvas.emitter().driver().instructions();
    assert!(log.iter().all(|i| i.target().z == 3.0 || i.target().z == -0.5));
    assert!(matches!(log.last(), Some(Instruction::ArcCcw { .. })));
}

#[test]
fn test_config_fill_settings_reach_the_fill() {
    let mut config = CanvasConfig::default();
    config.tool.diameter = 1.0;
    config.fill.safety_bound = 1.0;

    let mut canvas = recording_canvas(&config);
    let report = canvas.fill_rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(report.stop, StopReason::SafetyBoundReached);
}

#[test]
fn test_instructions_serialize_to_json() {
    let mut canvas = recording_canvas(&CanvasConfig::default());
    canvas.stroke_rect(1.0, 1.0, 5.0, 5.0);

    let json = canvas.emitter().driver().to_json().unwrap();
    let parsed: Vec<Instruction> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_slice(), canvas.emitter().driver().instructions());
    assert!(json.contains("\"kind\": \"rapid\""));
}
