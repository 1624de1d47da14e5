use std::fs;
use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::deviation::ErrorMetric;
use crate::error::ConfigError;
use crate::simplify::{Selection, SimplifyOptions};

/// Simplification settings as read from a JSON file or the command line.
///
/// Every field is optional so that a file can be partially overridden by
/// flags. `tolerance` must be present after merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimplifyConfig {
    pub tolerance: Option<f64>,
    pub max_steps: Option<usize>,
    pub metric: Option<ErrorMetric>,
    pub selection: Option<Selection>,
}

impl SimplifyConfig {
    pub fn from_json(contents: &str) -> Result<Self, Report<ConfigError>> {
        serde_json::from_str(contents).change_context(ConfigError::Parse)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Report<ConfigError>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .change_context(ConfigError::Read)
            .attach_printable_lazy(|| format!("path: {}", path.display()))?;

        Self::from_json(&contents).attach_printable_lazy(|| format!("path: {}", path.display()))
    }

    /// Values set in `overrides` win over values in `self`.
    pub fn merge(self, overrides: SimplifyConfig) -> SimplifyConfig {
        SimplifyConfig {
            tolerance: overrides.tolerance.or(self.tolerance),
            max_steps: overrides.max_steps.or(self.max_steps),
            metric: overrides.metric.or(self.metric),
            selection: overrides.selection.or(self.selection),
        }
    }

    pub fn into_options(self) -> Result<SimplifyOptions, Report<ConfigError>> {
        let tolerance = self.tolerance.ok_or_else(|| Report::new(ConfigError::MissingTolerance))?;

        let mut options = SimplifyOptions::new(tolerance)
            .with_metric(self.metric.unwrap_or_default())
            .with_selection(self.selection.unwrap_or_default());
        options.max_steps = self.max_steps;

        validate(&options)?;
        Ok(options)
    }
}

/// Rejects options the simplifier does not define behavior for.
pub fn validate(options: &SimplifyOptions) -> Result<(), Report<ConfigError>> {
    if !options.tolerance.is_finite() || options.tolerance < 0.0 {
        return Err(Report::new(ConfigError::InvalidTolerance)
            .attach_printable(format!("tolerance: {}", options.tolerance)));
    }
    Ok(())
}
