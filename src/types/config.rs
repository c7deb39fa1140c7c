use crate::error::{MaturityError, Result};
use crate::types::scoring::{WeightScheme, Weights, COMPLEXITY_FOCUSED};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const MAX_REPORT_DECIMALS: u8 = 6;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaturityConfig {
    pub scoring: Option<ScoringConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    pub default_scheme: Option<String>,
    #[serde(default)]
    pub schemes: HashMap<String, HashMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub decimals: Option<u8>,
}

const WEIGHT_KEYS: [&str; 3] = ["collaboration", "length_efficiency", "complexity"];

impl MaturityConfig {
    pub fn default_scheme_name(&self) -> &str {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.default_scheme.as_deref())
            .unwrap_or(COMPLEXITY_FOCUSED)
    }

    pub fn decimals(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|report| report.decimals)
            .unwrap_or(1) as usize
    }

    /// Built-in schemes overlaid with configured ones, ordered by name.
    pub fn schemes(&self) -> Result<Vec<WeightScheme>> {
        let mut schemes: BTreeMap<String, WeightScheme> = WeightScheme::builtin()
            .into_iter()
            .map(|scheme| (scheme.name.clone(), scheme))
            .collect();

        if let Some(scoring) = &self.scoring {
            for (name, table) in &scoring.schemes {
                let weights = weights_from_table(name, table)?;
                schemes.insert(name.clone(), WeightScheme::new(name.clone(), weights));
            }
        }

        Ok(schemes.into_values().collect())
    }

    pub fn scheme(&self, name: &str) -> Result<WeightScheme> {
        self.schemes()?
            .into_iter()
            .find(|scheme| scheme.name == name)
            .ok_or_else(|| MaturityError::UnknownScheme(name.to_string()))
    }

    pub fn default_scheme(&self) -> Result<WeightScheme> {
        self.scheme(self.default_scheme_name())
    }

    pub fn validate(&self) -> Result<()> {
        self.default_scheme()?;

        if let Some(decimals) = self.report.as_ref().and_then(|report| report.decimals) {
            if decimals > MAX_REPORT_DECIMALS {
                return Err(MaturityError::ConfigParse(format!(
                    "report.decimals must be at most {MAX_REPORT_DECIMALS} (found {decimals})"
                )));
            }
        }

        Ok(())
    }
}

fn weights_from_table(name: &str, table: &HashMap<String, f64>) -> Result<Weights> {
    let mut unknown = table
        .keys()
        .filter(|key| !WEIGHT_KEYS.contains(&key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(MaturityError::InvalidWeights(format!(
            "scoring.schemes.{name} contains unknown key(s): {}",
            unknown.join(", ")
        )));
    }

    let get = |key: &str| {
        table.get(key).copied().ok_or_else(|| {
            MaturityError::InvalidWeights(format!("scoring.schemes.{name} is missing `{key}`"))
        })
    };
    Weights::new(get("collaboration")?, get("length_efficiency")?, get("complexity")?).map_err(
        |e| match e {
            MaturityError::InvalidWeights(msg) => {
                MaturityError::InvalidWeights(format!("scoring.schemes.{name}: {msg}"))
            }
            other => other,
        },
    )
}
