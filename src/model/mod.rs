use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::BuildError;

/// ─────────────────────────────────────────────────────
/// Actions
/// ─────────────────────────────────────────────────────

/// The closed set of steps the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Move,
    Turn,
    Wait,
    RunMotor,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Turn => "turn",
            ActionKind::Wait => "wait",
            ActionKind::RunMotor => "run_motor",
        }
    }
}

impl FromStr for ActionKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(ActionKind::Move),
            "turn" => Ok(ActionKind::Turn),
            "wait" => Ok(ActionKind::Wait),
            "run_motor" => Ok(ActionKind::RunMotor),
            other => Err(BuildError::UnknownAction(other.to_string())),
        }
    }
}

/// One entry of an action's `args` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ActionArg {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ActionArg {
    /// `null`, `false`, `0` and `""` count as "not given".
    pub fn is_truthy(&self) -> bool {
        match self {
            ActionArg::Null => false,
            ActionArg::Bool(b) => *b,
            ActionArg::Number(n) => *n != 0.0 && !n.is_nan(),
            ActionArg::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ActionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionArg::Null => f.write_str("null"),
            ActionArg::Bool(b) => write!(f, "{b}"),
            ActionArg::Number(n) => write!(f, "{n}"),
            ActionArg::Text(s) => f.write_str(s),
        }
    }
}

/// A single commanded step as it appears in the action list.
///
/// The kind stays a plain string until translation so that a typo in the
/// input file is reported by the translator, naming the offending kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    pub action: String,
    pub value: f64,
    #[serde(default)]
    pub args: Option<Vec<ActionArg>>,
}

impl Action {
    pub fn new(action: impl Into<String>, value: f64, args: Option<Vec<ActionArg>>) -> Self {
        Self {
            action: action.into(),
            value,
            args,
        }
    }

    pub fn kind(&self) -> Result<ActionKind, BuildError> {
        self.action.parse()
    }

    /// `args[idx]`, treating an explicit `null` as absent.
    pub fn arg(&self, idx: usize) -> Option<&ActionArg> {
        self.args
            .as_ref()
            .and_then(|args| args.get(idx))
            .filter(|arg| **arg != ActionArg::Null)
    }
}

/// Root of the action-list file: `{ "code": [ … ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionList {
    pub code: Vec<Action>,
}

/// ─────────────────────────────────────────────────────
/// Ports & drivetrain
/// ─────────────────────────────────────────────────────

/// Port identifiers are usually numbers but the config format allows strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortId {
    Number(u32),
    Name(String),
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortId::Number(n) => write!(f, "{n}"),
            PortId::Name(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum GearRatio {
    #[default]
    #[serde(rename = "18:1")]
    Ratio18,
    #[serde(rename = "36:1")]
    Ratio36,
    #[serde(rename = "6:1")]
    Ratio6,
}

impl GearRatio {
    /// Gear cartridge constant in the VEX C++ API.
    pub fn cartridge(self) -> &'static str {
        match self {
            GearRatio::Ratio18 => "ratio18_1",
            GearRatio::Ratio36 => "ratio36_1",
            GearRatio::Ratio6 => "ratio6_1",
        }
    }
}

/// One physical motor mount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Port {
    pub port: PortId,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub gear: GearRatio,
}

/// A mount that actions can address by name (`run_motor`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Motor {
    pub name: String,
    #[serde(flatten)]
    pub mount: Port,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WheelPair {
    pub left: Port,
    pub right: Port,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegularDrive {
    pub left: Port,
    pub right: Port,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WheelConfig {
    pub wheel_size: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct XDrive {
    pub front: WheelPair,
    pub back: WheelPair,
    pub config: WheelConfig,
}

/// Drivetrain wiring, selected by the `type` field of `ports.drive`.
///
/// An unrecognised tag is kept as [`DriveTopology::Unknown`] instead of
/// failing the config load; whoever generates code for it reports the error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum DriveTopology {
    Regular(RegularDrive),
    XDrive(XDrive),
    Unknown(String),
}

impl DriveTopology {
    pub fn tag(&self) -> &str {
        match self {
            DriveTopology::Regular(_) => "regular-drive",
            DriveTopology::XDrive(_) => "x-drive",
            DriveTopology::Unknown(tag) => tag,
        }
    }
}

impl TryFrom<Value> for DriveTopology {
    type Error = serde_json::Error;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let tag = match raw.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        };

        match tag.as_str() {
            "regular-drive" => Ok(DriveTopology::Regular(serde_json::from_value(raw)?)),
            "x-drive" => Ok(DriveTopology::XDrive(serde_json::from_value(raw)?)),
            _ => Ok(DriveTopology::Unknown(tag)),
        }
    }
}

/// Everything plugged into the brain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortSet {
    pub drive: DriveTopology,
    #[serde(default)]
    pub always_running: Vec<Port>,
    #[serde(default)]
    pub motors: Vec<Motor>,
}

impl PortSet {
    pub fn find_motor(&self, name: &str) -> Option<&Motor> {
        self.motors.iter().find(|m| m.name == name)
    }
}

/// ─────────────────────────────────────────────────────
/// Project configuration
/// ─────────────────────────────────────────────────────

/// Dialect of the generated companion program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorExtension {
    Py,
    Cpp,
}

impl CreatorExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            CreatorExtension::Py => "py",
            CreatorExtension::Cpp => "cpp",
        }
    }
}

impl FromStr for CreatorExtension {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "py" => Ok(CreatorExtension::Py),
            "cpp" => Ok(CreatorExtension::Cpp),
            other => Err(BuildError::UnsupportedExtension(other.to_string())),
        }
    }
}

fn default_extension() -> String {
    CreatorExtension::Py.as_str().to_string()
}

/// The config file exactly as loaded (1-to-1 with JSON).
///
/// `ports` stays a raw value: the companion program embeds it verbatim,
/// key order included.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub ports: Value,
    pub output_dir: PathBuf,
    pub input_file: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Resolved, read-only inputs for one run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub ports: PortSet,
    pub extension: CreatorExtension,
    /// Companion program text, configuration already embedded.
    pub creator_code: String,
    pub output_dir: PathBuf,
    pub input_file: PathBuf,
}
