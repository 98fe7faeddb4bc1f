//! The functional core: actions and ports in, C++ source out.
pub mod template;
pub mod topology;
pub mod translator;

use tracing::debug;

use crate::error::Result;
use crate::model::{Action, BuildConfig};

/// Generated pieces, kept apart so callers can inspect them.
#[derive(Debug, Clone)]
pub struct GeneratedProgram {
    pub motors: String,
    pub actions: String,
    pub source: String,
}

/// Translate every action and assemble the autonomous program.
///
/// Fails on the first action that cannot be translated; no partial program
/// is returned.
pub fn run(config: &BuildConfig, actions: &[Action], prelude: &str) -> Result<GeneratedProgram> {
    let mut action_code = topology::startup_block(&config.ports);

    for (i, action) in actions.iter().enumerate() {
        let code = translator::translate(config, action)?;
        debug!(index = i, kind = %action.action, "translated action");
        action_code.push_str("  ");
        action_code.push_str(&code);
        action_code.push('\n');
    }

    let motors = topology::motor_block(&config.ports)?;
    let source = template::assemble(prelude, &motors, &action_code)?;

    Ok(GeneratedProgram {
        motors,
        actions: action_code,
        source,
    })
}
