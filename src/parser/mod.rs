use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::literal;
use crate::model::{ActionList, BuildConfig, CreatorExtension, PortSet, ProjectConfig};
use crate::processor::template::creator_program;

/// Parse the project config file into its raw, 1-to-1 form.
///
/// The file is expected to contain a top-level object with at least
///   • "ports"       – drivetrain, always-running and named motors
///   • "output_dir"  – where both artifacts are written
///   • "input_file"  – the action list to translate
pub fn load_project(json: &str) -> Result<ProjectConfig> {
    debug!(bytes = json.len(), "config loaded");
    let root: Value = serde_json::from_str(json).context("config is not valid JSON")?;

    if root.get("ports").is_none() {
        return Err(anyhow!("config has no `ports` object"));
    }

    let project: ProjectConfig = serde_json::from_value(root)?;
    Ok(project)
}

/// Resolve a raw project into the read-only inputs of one run.
pub fn build_config(project: ProjectConfig) -> Result<BuildConfig> {
    let ports: PortSet =
        serde_json::from_value(project.ports.clone()).context("`ports` has an invalid shape")?;

    let extension: CreatorExtension = project.extension.parse()?;
    let creator_code = creator_program(extension, &project.ports, &ports)
        .with_context(|| format!("cannot generate the `{}` companion", project.extension))?;

    info!(
        drive = ports.drive.tag(),
        motors = ports.motors.len(),
        always_running = ports.always_running.len(),
        "ports parsed"
    );

    let mut seen = std::collections::HashSet::new();
    for motor in &ports.motors {
        if !seen.insert(motor.name.as_str()) {
            warn!(name = %motor.name, "duplicate motor name, the first entry wins");
        }
    }

    Ok(BuildConfig {
        ports,
        extension,
        creator_code,
        output_dir: project.output_dir,
        input_file: project.input_file,
    })
}

/// Parse an action list written in JSON or in Python literal style.
///
/// Normalisation happens in memory only; the caller's file is not touched.
pub fn load_actions(src: &str) -> Result<ActionList> {
    let root = literal::from_python_literal(src).context("action list is not a valid literal")?;

    if root.get("code").and_then(Value::as_array).is_none() {
        return Err(anyhow!("action list has no `code` array"));
    }

    let list: ActionList = serde_json::from_value(root)?;
    info!(actions = list.code.len(), "action list parsed");
    Ok(list)
}
