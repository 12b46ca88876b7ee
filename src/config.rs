use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".ticketlens.toml";

/// KPI thresholds and definitions.
///
/// Two variants of these rules circulate in ticket reporting: a 3-day SLA
/// with strict FCR (interaction count of one on a resolved ticket) and a
/// 2-day SLA with FCR on interaction count alone. Both are expressible
/// here; the defaults pick the first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiConfig {
    /// Maximum ticket age, in days, for `SLA_Status` to be `Met`.
    #[serde(default = "default_sla_threshold_days")]
    pub sla_threshold_days: f64,

    /// When true, `Is_FCR` additionally requires `Status == "Resolved"`.
    #[serde(default = "default_fcr_requires_resolved_status")]
    pub fcr_requires_resolved_status: bool,
}

fn default_sla_threshold_days() -> f64 {
    3.0
}

fn default_fcr_requires_resolved_status() -> bool {
    true
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            sla_threshold_days: default_sla_threshold_days(),
            fcr_requires_resolved_status: default_fcr_requires_resolved_status(),
        }
    }
}

impl KpiConfig {
    // Pure function: threshold must be a finite, non-negative day count
    fn validate_threshold(threshold: f64) -> Result<(), String> {
        if threshold.is_finite() && threshold >= 0.0 {
            Ok(())
        } else {
            Err(format!(
                "sla_threshold_days must be a non-negative number, got {}",
                threshold
            ))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        Self::validate_threshold(self.sla_threshold_days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TicketlensConfig {
    #[serde(default)]
    pub kpi: KpiConfig,
}

impl TicketlensConfig {
    /// Load configuration from an explicit path, or from `.ticketlens.toml`
    /// in the working directory when present, falling back to defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .kpi
            .validate()
            .map_err(|msg| anyhow::anyhow!("invalid config {}: {}", path.display(), msg))?;
        Ok(config)
    }
}

/// Default config file contents written by `ticketlens init`.
pub fn default_config_toml() -> &'static str {
    r#"# Ticketlens configuration

[kpi]
# Maximum ticket age (days) counted as SLA "Met". The alternate reporting
# convention uses 2.
sla_threshold_days = 3.0

# Strict FCR: the ticket must also have Status = "Resolved". Set to false
# to count any single-interaction ticket.
fcr_requires_resolved_status = true
"#
}
