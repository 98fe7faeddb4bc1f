use std::fs;
use std::path::{Path, PathBuf};

use autocreator::error::BuildError;
use autocreator::model::CreatorExtension;
use autocreator::{build_all, build_autonomous, build_creator, generate, load_config};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

/// Fresh scratch directory; the output dir inside it does not exist yet.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("autocreator-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir(&dir).unwrap();
    dir
}

fn config_with(name: &str, out: &Path, input: PathBuf) -> autocreator::model::BuildConfig {
    load_config(&fixture(name), |project| {
        project.output_dir = out.to_path_buf();
        project.input_file = input;
    })
    .expect("fixture config loads")
}

#[test]
fn builds_regular_drive_program() {
    let dir = scratch("regular");
    let out = dir.join("out");
    let input = fixture("actions.json");
    let before = fs::read(&input).unwrap();

    let config = config_with("regular.json", &out, input.clone());
    let (program, creator) = build_all(&config).expect("build succeeds");

    assert_eq!(program, out.join("autonomous-creator-output.cpp"));
    assert_eq!(creator, out.join("autonomous-creator.py"));

    let source = fs::read_to_string(&program).unwrap();
    assert!(source.contains(
        "motor left_drive = motor(PORT1, ratio18_1, false);\n\
         motor right_drive = motor(PORT10, ratio18_1, true);\n\
         drivetrain Drivetrain = drivetrain(left_drive, right_drive, 319.19, 295, 40, mm, 1);\n\
         motor always_running_8 = motor(PORT8, ratio6_1, false);\n\
         motor motor_intake = motor(PORT5, ratio36_1, false);\n"
    ));
    assert!(source.ends_with(
        "int main() {\n  \
         always_running_8.setVelocity(100, percent);\n  \
         always_running_8.spin(forward);\n  \
         Drivetrain.driveFor(forward, 500, mm);\n  \
         Drivetrain.turnFor(right, 90, degrees);\n  \
         wait(50, msec);\n  \
         motor_intake.setVelocity(100, percent);\n  \
         motor_intake.spinToPosition(200, degrees);\n  \
         Drivetrain.turnFor(left, -90, degrees);\n\
         }\n"
    ));

    let companion = fs::read_to_string(&creator).unwrap();
    assert!(companion.contains("config = {'drive':{'type':'regular-drive','left':{'port':1,'reverse':False,'gear':'18:1'}"));

    // the action list is read, never rewritten
    assert_eq!(fs::read(&input).unwrap(), before);
}

#[test]
fn builds_x_drive_program() {
    let dir = scratch("xdrive");
    let out = dir.join("out");
    let config = config_with("xdrive.json", &out, fixture("actions.json"));

    let program = generate(&config).expect("translation succeeds");
    assert_eq!(
        program.actions,
        "  move(500);\n  \
         turn(90);\n  \
         wait(50, msec);\n  \
         motor_intake.setVelocity(100, percent);\n  \
         motor_intake.spinToPosition(200, degrees);\n  \
         turn(-90);\n"
    );
    assert!(program.motors.contains("void move(int mm) {"));
    assert!(program.motors.contains("void turn(int deg) {"));

    let path = build_autonomous(&config).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), program.source);
}

#[test]
fn writes_cpp_creator() {
    let dir = scratch("creator-cpp");
    let out = dir.join("out");
    let config = config_with("xdrive.json", &out, fixture("actions.json"));
    assert_eq!(config.extension, CreatorExtension::Cpp);

    let path = build_creator(&config).unwrap();
    assert_eq!(path, out.join("autonomous-creator.cpp"));

    let text = fs::read_to_string(path).unwrap();
    assert!(text.contains(r#"R"json({"drive":{"type":"x-drive","config":{"wheel_size":4,"gear_ratio":1}"#));
    // the recorder drives the configured X drive while values are dialled in
    assert!(text.contains("motor front_right_drive = motor(PORT2, ratio18_1, true);\n"));
    assert!(text.contains("void nudgeMove(int distance) {\n  move(distance);\n}\n"));
    assert!(text.contains("printf(\"]}\\n----------------\\n\");"));
    // only the creator was requested
    assert!(!out.join("autonomous-creator-output.cpp").exists());
}

#[test]
fn unknown_action_writes_nothing() {
    let dir = scratch("unknown-action");
    let out = dir.join("out");
    let input = dir.join("actions.json");
    fs::write(
        &input,
        r#"{ "code": [ { "action": "move", "value": 1 }, { "action": "spin", "value": 2 } ] }"#,
    )
    .unwrap();

    let config = config_with("regular.json", &out, input);
    let err = build_all(&config).unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::UnknownAction("spin".into()))
    );
    assert!(format!("{err:#}").contains("Invalid action: spin"));
    assert!(!out.exists(), "no output directory after a failed build");
}

#[test]
fn missing_motor_is_reported_by_name() {
    let dir = scratch("missing-motor");
    let out = dir.join("out");
    let input = dir.join("actions.json");
    fs::write(&input, "{'code': [{'action': 'run_motor', 'value': 1, 'args': ['lift']}]}").unwrap();

    let config = config_with("regular.json", &out, input);
    let err = build_autonomous(&config).unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::MotorNotFound("lift".into()))
    );
    assert!(!out.exists());
}

#[test]
fn unknown_drive_fails_translation() {
    let dir = scratch("hover");
    let out = dir.join("out");
    let config = config_with("hover.json", &out, fixture("actions.json"));

    let err = generate(&config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::UnknownDrive("hover-drive".into()))
    );
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = load_config(&fixture("regular.json"), |project| {
        project.extension = "rb".into();
    })
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::UnsupportedExtension("rb".into()))
    );
}

#[test]
fn cpp_creator_rejects_unknown_drive() {
    let err = load_config(&fixture("hover.json"), |project| {
        project.extension = "cpp".into();
    })
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::UnknownDrive("hover-drive".into()))
    );
}
