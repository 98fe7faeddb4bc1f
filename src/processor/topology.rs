//! Motor declarations and drivetrain helpers for the `{MOTORS}` slot.

use std::f64::consts::PI;

use tracing::warn;

use crate::error::{BuildError, Result};
use crate::model::{DriveTopology, GearRatio, Port, PortSet, RegularDrive, XDrive};

/// Wheel travel, track width and wheelbase handed to the VEX `drivetrain`.
/// Fixed for regular drives.
const REGULAR_GEOMETRY: &str = "319.19, 295, 40, mm, 1";

/// Gear numerator used when converting millimetres to wheel turns.
///
/// Always the 18:1 cartridge, whatever gear the wheel ports declare; the
/// declarations themselves do follow the configured gear.
const X_DRIVE_GEAR: f64 = 18.0;

/// Everything that goes before `main()`: drive motors, helpers, then the
/// always-running and named motors.
pub fn motor_block(ports: &PortSet) -> Result<String> {
    let mut out = match &ports.drive {
        DriveTopology::Regular(drive) => regular_drive(drive),
        DriveTopology::XDrive(drive) => x_drive(drive),
        DriveTopology::Unknown(tag) => return Err(BuildError::UnknownDrive(tag.clone())),
    };

    for port in &ports.always_running {
        out.push_str(&declare(&format!("always_running_{}", port.port), port));
    }
    for motor in &ports.motors {
        out.push_str(&declare(&format!("motor_{}", motor.name), &motor.mount));
    }

    Ok(out)
}

/// Statements at the top of `main()` that start every always-running motor
/// at full speed.
pub fn startup_block(ports: &PortSet) -> String {
    ports
        .always_running
        .iter()
        .map(|port| {
            format!(
                "  always_running_{p}.setVelocity(100, percent);\n  always_running_{p}.spin(forward);\n",
                p = port.port
            )
        })
        .collect()
}

/// Live drive helpers the C++ recorder calls while a value is dialled in.
pub fn nudge_block(ports: &PortSet) -> Result<String> {
    match &ports.drive {
        DriveTopology::Regular(_) => Ok("void nudgeMove(int distance) {\n  \
             Drivetrain.driveFor(forward, distance, mm);\n\
             }\n\
             void nudgeTurn(int deg) {\n  \
             Drivetrain.turnFor(right, deg, degrees);\n\
             }\n"
            .to_string()),
        DriveTopology::XDrive(_) => Ok("void nudgeMove(int distance) {\n  \
             move(distance);\n\
             }\n\
             void nudgeTurn(int deg) {\n  \
             turn(deg);\n\
             }\n"
            .to_string()),
        DriveTopology::Unknown(tag) => Err(BuildError::UnknownDrive(tag.clone())),
    }
}

/// Millimetres travelled per motor turn on an X drive.
pub fn mm_per_turn(drive: &XDrive) -> f64 {
    drive.config.wheel_size * PI * X_DRIVE_GEAR
}

fn declare(name: &str, port: &Port) -> String {
    format!(
        "motor {name} = motor(PORT{}, {}, {});\n",
        port.port,
        port.gear.cartridge(),
        port.reverse
    )
}

fn regular_drive(drive: &RegularDrive) -> String {
    let mut out = String::new();
    out.push_str(&declare("left_drive", &drive.left));
    out.push_str(&declare("right_drive", &drive.right));
    out.push_str(&format!(
        "drivetrain Drivetrain = drivetrain(left_drive, right_drive, {REGULAR_GEOMETRY});\n"
    ));
    out
}

fn x_drive(drive: &XDrive) -> String {
    let wheels = [
        &drive.front.right,
        &drive.front.left,
        &drive.back.right,
        &drive.back.left,
    ];
    if wheels.iter().any(|port| port.gear != GearRatio::Ratio18) {
        warn!(
            factor = mm_per_turn(drive),
            "x-drive wheels are not all 18:1, move distances still assume 18:1"
        );
    }

    let mut out = String::new();
    out.push_str(&declare("front_right_drive", &drive.front.right));
    out.push_str(&declare("front_left_drive", &drive.front.left));
    out.push_str(&declare("back_right_drive", &drive.back.right));
    out.push_str(&declare("back_left_drive", &drive.back.left));

    out.push_str(&format!(
        "void move(int mm) {{\n  \
         int amount = mm / {factor};\n  \
         front_right_drive.spinFor(forward, amount, turns);\n  \
         front_left_drive.spinFor(forward, amount, turns);\n  \
         back_right_drive.spinFor(forward, amount, turns);\n  \
         back_left_drive.spinFor(forward, amount, turns);\n\
         }}\n",
        factor = mm_per_turn(drive)
    ));

    // deg < 0 turns left: left side gets the negation, right side gets deg
    out.push_str(
        "void turn(int deg) {\n  \
         int opposite = deg * -1;\n  \
         bool left = deg < 0;\n  \
         if (left) {\n    \
         front_left_drive.spinFor(forward, opposite, degrees);\n    \
         back_left_drive.spinFor(forward, opposite, degrees);\n    \
         front_right_drive.spinFor(forward, deg, degrees);\n    \
         back_right_drive.spinFor(forward, deg, degrees);\n  \
         } else {\n    \
         front_right_drive.spinFor(forward, opposite, degrees);\n    \
         back_right_drive.spinFor(forward, opposite, degrees);\n    \
         front_left_drive.spinFor(forward, deg, degrees);\n    \
         back_left_drive.spinFor(forward, deg, degrees);\n  \
         }\n\
         }\n",
    );
    out
}
