use std::str::FromStr;

/// Subnet prefix policy applied to every routable address in a run.
///
/// The two policies are never mixed: the caller picks one at composition
/// time and the pipeline carries it in [`RunConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferencePolicy {
    /// Every address class gets a conservative /24.
    #[default]
    Basic,
    /// Class-aware prefixes: /16 for `10.*`, /20 for `172.*`, /24 otherwise.
    Enhanced,
}

impl InferencePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferencePolicy::Basic => "basic",
            InferencePolicy::Enhanced => "enhanced",
        }
    }
}

impl FromStr for InferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(InferencePolicy::Basic),
            "enhanced" => Ok(InferencePolicy::Enhanced),
            _ => Err(format!("invalid inference policy: {s} (expected 'basic' or 'enhanced')")),
        }
    }
}

/// Settings for one batch run, assembled by the caller and handed to the
/// pipeline. There is no process-wide configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub policy: InferencePolicy,
    /// Maximum number of raw records to process, `None` for all of them.
    pub limit: Option<u64>,
    /// Emit a progress snapshot every this many records.
    pub progress_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            policy: InferencePolicy::Basic,
            limit: None,
            progress_interval: 1000,
        }
    }
}
