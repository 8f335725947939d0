use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One of the three asset groups the pipeline knows about.
///
/// Each group owns exactly one task; the group is the task's identity for
/// orchestration, logging and watch routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetGroup {
    Styles,
    Scripts,
    Templates,
}

impl AssetGroup {
    /// All groups, in build order.
    pub const ALL: [AssetGroup; 3] = [
        AssetGroup::Styles,
        AssetGroup::Scripts,
        AssetGroup::Templates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetGroup::Styles => "styles",
            AssetGroup::Scripts => "scripts",
            AssetGroup::Templates => "templates",
        }
    }
}

impl fmt::Display for AssetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "styles" => Ok(AssetGroup::Styles),
            "scripts" => Ok(AssetGroup::Scripts),
            "templates" => Ok(AssetGroup::Templates),
            other => Err(format!(
                "unknown asset group: {other} (expected \"styles\", \"scripts\" or \"templates\")"
            )),
        }
    }
}

/// Behaviour when a watch trigger arrives while the same group's task is
/// still running.
///
/// - `Queue`: single-flight per group. The trigger is remembered and exactly
///   one re-run starts once the running task finishes; further triggers in
///   the meantime coalesce into that one pending re-run (default).
/// - `Parallel`: dispatch every trigger immediately, even if a previous run
///   of the same group is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerWhileRunningBehaviour {
    Queue,
    Parallel,
}

impl Default for TriggerWhileRunningBehaviour {
    fn default() -> Self {
        TriggerWhileRunningBehaviour::Queue
    }
}

impl FromStr for TriggerWhileRunningBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "queue" => Ok(TriggerWhileRunningBehaviour::Queue),
            "parallel" => Ok(TriggerWhileRunningBehaviour::Parallel),
            other => Err(format!(
                "invalid triggered_while_running_behaviour: {other} (expected \"queue\" or \"parallel\")"
            )),
        }
    }
}
