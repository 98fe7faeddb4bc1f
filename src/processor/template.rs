//! Template text and slot substitution.

use serde_json::Value;

use super::topology;
use crate::error::{BuildError, Result};
use crate::literal::to_python_literal;
use crate::model::{CreatorExtension, PortSet};

pub const MOTORS_SLOT: &str = "{MOTORS}";
pub const ACTIONS_SLOT: &str = "{ACTIONS}";

/// VEX C++ prelude with a `{MOTORS}` and an `{ACTIONS}` slot.
pub const AUTONOMOUS_TEMPLATE: &str = include_str!("../../templates/autonomous.cpp");

const CREATOR_PY: &str = include_str!("../../templates/creator.py");
const CREATOR_PY_SLOT: &str = "#{CONFIGURATION}";

const CREATOR_CPP: &str = include_str!("../../templates/creator.cpp");
const CREATOR_CPP_SLOT: &str = "{CONFIGURATION}";
pub const NUDGE_SLOT: &str = "{NUDGE}";

/// Fill both slots of `template`, each exactly once.
pub fn assemble(template: &str, motors: &str, actions: &str) -> Result<String> {
    fill_slots(template, &[(MOTORS_SLOT, motors), (ACTIONS_SLOT, actions)])
}

/// Replace the first occurrence of every slot token with its text.
///
/// Substituted text is never rescanned, so generated code that happens to
/// contain a slot token is left alone.
fn fill_slots(template: &str, fills: &[(&'static str, &str)]) -> Result<String> {
    let mut slots = Vec::with_capacity(fills.len());
    for &(slot, text) in fills {
        let at = template
            .find(slot)
            .ok_or(BuildError::MissingPlaceholder(slot))?;
        slots.push((at, slot, text));
    }
    slots.sort_by_key(|&(at, _, _)| at);

    let extra: usize = fills.iter().map(|(_, text)| text.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut cursor = 0;
    for (at, slot, text) in slots {
        out.push_str(&template[cursor..at]);
        out.push_str(text);
        cursor = at + slot.len();
    }
    out.push_str(&template[cursor..]);

    Ok(out)
}

/// Companion recorder source with the port configuration embedded.
///
/// `raw` is embedded as written; the C++ recorder also needs the typed
/// `ports` to declare its motors and the live drive helpers.
pub fn creator_program(ext: CreatorExtension, raw: &Value, ports: &PortSet) -> Result<String> {
    match ext {
        CreatorExtension::Py => {
            let config = format!("config = {}", to_python_literal(raw));
            fill_slots(CREATOR_PY, &[(CREATOR_PY_SLOT, &config)])
        }
        CreatorExtension::Cpp => {
            let motors = topology::motor_block(ports)?;
            let nudge = topology::nudge_block(ports)?;
            let config = format!("R\"json({raw})json\"");
            fill_slots(
                CREATOR_CPP,
                &[
                    (MOTORS_SLOT, &motors),
                    (NUDGE_SLOT, &nudge),
                    (CREATOR_CPP_SLOT, &config),
                ],
            )
        }
    }
}
