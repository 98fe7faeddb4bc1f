//! Action → statement translation.
//!
//! Each action kind has one handler; handlers that move the robot branch on
//! the drivetrain topology. Output is a single statement (or, for
//! `run_motor`, two statements joined by an indented newline) without the
//! leading indent of the first line.

use crate::error::{BuildError, Result};
use crate::model::{Action, ActionArg, ActionKind, BuildConfig, DriveTopology, PortSet};

/// Coarse input units (wait time, motor position) → emitted units.
pub const UNIT_SCALE: f64 = 10.0;

/// Power used by `run_motor` when none (or a falsy one) is given.
pub const DEFAULT_POWER: f64 = 100.0;

pub fn translate(config: &BuildConfig, action: &Action) -> Result<String> {
    match action.kind()? {
        ActionKind::Move => move_action(&config.ports.drive, action),
        ActionKind::Turn => turn_action(&config.ports.drive, action),
        ActionKind::Wait => Ok(wait_action(action)),
        ActionKind::RunMotor => run_motor_action(&config.ports, action),
    }
}

fn move_action(drive: &DriveTopology, action: &Action) -> Result<String> {
    match drive {
        DriveTopology::Regular(_) => Ok(format!(
            "Drivetrain.driveFor(forward, {}, mm);",
            number(action.value)
        )),
        DriveTopology::XDrive(_) => Ok(format!("move({});", number(action.value))),
        DriveTopology::Unknown(tag) => Err(BuildError::UnknownDrive(tag.clone())),
    }
}

fn turn_action(drive: &DriveTopology, action: &Action) -> Result<String> {
    match drive {
        DriveTopology::Regular(_) => {
            let rate = action.arg(0).ok_or(BuildError::MissingArgument {
                action: ActionKind::Turn.name(),
            })?;
            Ok(format!(
                "Drivetrain.turnFor({rate}, {}, degrees);",
                number(action.value)
            ))
        }
        // sign of the value picks the direction inside the helper
        DriveTopology::XDrive(_) => Ok(format!("turn({});", number(action.value))),
        DriveTopology::Unknown(tag) => Err(BuildError::UnknownDrive(tag.clone())),
    }
}

fn wait_action(action: &Action) -> String {
    format!("wait({}, msec);", number(action.value * UNIT_SCALE))
}

fn run_motor_action(ports: &PortSet, action: &Action) -> Result<String> {
    let motor_id = action.arg(0).ok_or(BuildError::MissingArgument {
        action: ActionKind::RunMotor.name(),
    })?;
    // names are strings; a numeric id never matches a motor
    let motor = match motor_id {
        ActionArg::Text(name) => ports.find_motor(name),
        _ => None,
    }
    .ok_or_else(|| BuildError::MotorNotFound(motor_id.to_string()))?;

    let power = match action.arg(1) {
        Some(p) if p.is_truthy() => p.to_string(),
        _ => DEFAULT_POWER.to_string(),
    };

    Ok(format!(
        "motor_{name}.setVelocity({power}, percent);\n  motor_{name}.spinToPosition({position}, degrees);",
        name = motor.name,
        position = number(action.value * UNIT_SCALE),
    ))
}

/// Negative zero prints as `-0`; emit it as `0`.
fn number(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
