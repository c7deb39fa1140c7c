use crate::error::{MaturityError, Result};
use crate::types::region::Region;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Slack allowed when the five collaboration shares are summed, to absorb
/// rounding in the upstream percentages.
pub const COLLABORATION_SUM_TOLERANCE: f64 = 1e-6;

/// Validated per-region input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionInput {
    pub region_id: Region,
    pub pct_directive: f64,
    pub pct_feedback_loop: f64,
    pub pct_task_iteration: f64,
    pub pct_learning: f64,
    pub pct_validation: f64,
    pub prompt_index: f64,
    pub completion_index: f64,
    pub cost_index: f64,
    pub pct_level0_software: f64,
    pub pct_software_total: f64,
}

impl RegionInput {
    pub fn total_collaboration_pct(&self) -> f64 {
        self.pct_directive
            + self.pct_feedback_loop
            + self.pct_task_iteration
            + self.pct_learning
            + self.pct_validation
    }

    pub fn raw_length_index(&self) -> f64 {
        self.prompt_index + self.completion_index + self.cost_index
    }

    /// Range checks on an already-typed row. Returns every violation found.
    pub fn range_problems(&self) -> Vec<MaturityError> {
        let region = self.region_id.display_name();
        let mut problems = Vec::new();

        for (field, value) in [
            ("pct_directive", self.pct_directive),
            ("pct_feedback_loop", self.pct_feedback_loop),
            ("pct_task_iteration", self.pct_task_iteration),
            ("pct_learning", self.pct_learning),
            ("pct_validation", self.pct_validation),
            ("pct_level0_software", self.pct_level0_software),
            ("pct_software_total", self.pct_software_total),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                problems.push(out_of_range(region, field, value));
            }
        }

        for (field, value) in [
            ("prompt_index", self.prompt_index),
            ("completion_index", self.completion_index),
            ("cost_index", self.cost_index),
        ] {
            if !value.is_finite() || value < 0.0 {
                problems.push(out_of_range(region, field, value));
            }
        }

        let raw_length_index = self.raw_length_index();
        if !raw_length_index.is_finite() {
            problems.push(out_of_range(region, "raw_length_index", raw_length_index));
        }

        let total = self.total_collaboration_pct();
        if total.is_finite() && total > 100.0 + COLLABORATION_SUM_TOLERANCE {
            problems.push(out_of_range(region, "collaboration_total", total));
        }

        problems
    }

    pub fn validate(&self) -> Result<()> {
        match self.range_problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

fn out_of_range(region: &str, field: &str, value: f64) -> MaturityError {
    MaturityError::OutOfRangeInput {
        region: region.to_string(),
        field: field.to_string(),
        value,
    }
}

/// Row as it appears on disk; every field is optional so absence can be
/// reported as `MissingField` with the region attached.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRegionRow {
    pub region: Option<String>,
    pub pct_directive: Option<f64>,
    pub pct_feedback_loop: Option<f64>,
    pub pct_task_iteration: Option<f64>,
    pub pct_learning: Option<f64>,
    pub pct_validation: Option<f64>,
    pub prompt_index: Option<f64>,
    pub completion_index: Option<f64>,
    pub cost_index: Option<f64>,
    pub pct_level0_software: Option<f64>,
    pub pct_software_total: Option<f64>,
}

impl RawRegionRow {
    /// Converts one row, collecting every problem in it rather than stopping
    /// at the first.
    pub fn to_input(&self, index: usize) -> std::result::Result<RegionInput, Vec<MaturityError>> {
        let label = self
            .region
            .clone()
            .unwrap_or_else(|| format!("row {}", index + 1));
        let mut problems = Vec::new();

        let region_id = match &self.region {
            None => {
                problems.push(MaturityError::MissingField {
                    region: label.clone(),
                    field: "region".to_string(),
                });
                None
            }
            Some(name) => match name.parse::<Region>() {
                Ok(region) => Some(region),
                Err(err) => {
                    problems.push(err);
                    None
                }
            },
        };

        let mut require = |field: &str, value: Option<f64>| -> f64 {
            value.unwrap_or_else(|| {
                problems.push(MaturityError::MissingField {
                    region: label.clone(),
                    field: field.to_string(),
                });
                f64::NAN
            })
        };

        let pct_directive = require("pct_directive", self.pct_directive);
        let pct_feedback_loop = require("pct_feedback_loop", self.pct_feedback_loop);
        let pct_task_iteration = require("pct_task_iteration", self.pct_task_iteration);
        let pct_learning = require("pct_learning", self.pct_learning);
        let pct_validation = require("pct_validation", self.pct_validation);
        let prompt_index = require("prompt_index", self.prompt_index);
        let completion_index = require("completion_index", self.completion_index);
        let cost_index = require("cost_index", self.cost_index);
        let pct_level0_software = require("pct_level0_software", self.pct_level0_software);
        let pct_software_total = require("pct_software_total", self.pct_software_total);

        let Some(region_id) = region_id else {
            return Err(problems);
        };
        if !problems.is_empty() {
            return Err(problems);
        }

        let input = RegionInput {
            region_id,
            pct_directive,
            pct_feedback_loop,
            pct_task_iteration,
            pct_learning,
            pct_validation,
            prompt_index,
            completion_index,
            cost_index,
            pct_level0_software,
            pct_software_total,
        };
        let range_problems = input.range_problems();
        if range_problems.is_empty() {
            Ok(input)
        } else {
            Err(range_problems)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputTable {
    #[serde(rename = "region", alias = "regions", default)]
    pub rows: Vec<RawRegionRow>,
}

impl InputTable {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MaturityError::InputParse(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| MaturityError::InputParse(e.to_string()))
    }

    /// Every problem in the table, in row order. Empty when the table is
    /// fully usable.
    pub fn problems(&self) -> Vec<MaturityError> {
        if self.rows.is_empty() {
            return vec![MaturityError::EmptyInput];
        }

        let mut problems = Vec::new();
        let mut seen = HashSet::new();
        for (index, row) in self.rows.iter().enumerate() {
            match row.to_input(index) {
                Ok(input) => {
                    if !seen.insert(input.region_id) {
                        problems.push(MaturityError::DuplicateRegion(
                            input.region_id.display_name().to_string(),
                        ));
                    }
                }
                Err(row_problems) => problems.extend(row_problems),
            }
        }
        problems
    }

    /// Converts the whole table, failing on the first problem. No partial
    /// tables are returned since length efficiency needs every region.
    pub fn into_inputs(self) -> Result<Vec<RegionInput>> {
        if self.rows.is_empty() {
            return Err(MaturityError::EmptyInput);
        }

        let mut seen = HashSet::new();
        let mut inputs = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let input = row.to_input(index).map_err(|mut problems| problems.remove(0))?;
            if !seen.insert(input.region_id) {
                return Err(MaturityError::DuplicateRegion(
                    input.region_id.display_name().to_string(),
                ));
            }
            inputs.push(input);
        }
        Ok(inputs)
    }
}

pub fn load_input(path: &Path) -> Result<InputTable> {
    if !path.exists() {
        return Err(MaturityError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let table: std::result::Result<InputTable, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str(&content).map_err(|e| e.to_string())
    };
    table.map_err(|e| MaturityError::InputParse(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TWO_REGIONS: &str = r#"
[[region]]
region = "North America"
pct_directive = 40.0
pct_feedback_loop = 10.0
pct_task_iteration = 20.0
pct_learning = 20.0
pct_validation = 10.0
prompt_index = 1.0
completion_index = 1.0
cost_index = 1.0
pct_level0_software = 30.0
pct_software_total = 60.0

[[region]]
region = "europe"
pct_directive = 35.0
pct_feedback_loop = 12.5
pct_task_iteration = 18.0
pct_learning = 21.0
pct_validation = 8.0
prompt_index = 2.0
completion_index = 2.0
cost_index = 2.0
pct_level0_software = 25.0
pct_software_total = 55.0
"#;

    #[test]
    fn parses_toml_table() {
        let inputs = InputTable::from_toml_str(TWO_REGIONS)
            .expect("table should parse")
            .into_inputs()
            .expect("table should convert");
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].region_id, Region::NorthAmerica);
        assert_eq!(inputs[1].region_id, Region::Europe);
        assert!((inputs[0].total_collaboration_pct() - 100.0).abs() < 1e-12);
        assert!((inputs[1].raw_length_index() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn parses_json_table_with_plural_key() {
        let json = r#"{"regions": [{
            "region": "APAC",
            "pct_directive": 30, "pct_feedback_loop": 10, "pct_task_iteration": 20,
            "pct_learning": 20, "pct_validation": 10,
            "prompt_index": 1.1, "completion_index": 0.9, "cost_index": 1.0,
            "pct_level0_software": 12, "pct_software_total": 40
        }]}"#;
        let inputs = InputTable::from_json_str(json)
            .expect("json should parse")
            .into_inputs()
            .expect("json should convert");
        assert_eq!(inputs[0].region_id, Region::Apac);
    }

    #[test]
    fn missing_field_names_region_and_field() {
        let toml_str = r#"
[[region]]
region = "Europe"
pct_directive = 40.0
pct_feedback_loop = 10.0
pct_task_iteration = 20.0
pct_learning = 20.0
pct_validation = 10.0
prompt_index = 1.0
completion_index = 1.0
pct_level0_software = 30.0
pct_software_total = 60.0
"#;
        let err = InputTable::from_toml_str(toml_str)
            .expect("table should parse")
            .into_inputs()
            .expect_err("missing cost_index should fail");
        match err {
            MaturityError::MissingField { region, field } => {
                assert_eq!(region, "Europe");
                assert_eq!(field, "cost_index");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_percentage_is_rejected_not_clamped() {
        let toml_str = TWO_REGIONS.replacen("pct_level0_software = 30.0", "pct_level0_software = 130.0", 1);
        let err = InputTable::from_toml_str(&toml_str)
            .expect("table should parse")
            .into_inputs()
            .expect_err("percentage above 100 should fail");
        assert!(matches!(
            err,
            MaturityError::OutOfRangeInput { ref field, value, .. }
                if field == "pct_level0_software" && value == 130.0
        ));
    }

    #[test]
    fn negative_index_is_rejected() {
        let toml_str = TWO_REGIONS.replacen("prompt_index = 2.0", "prompt_index = -0.5", 1);
        let err = InputTable::from_toml_str(&toml_str)
            .expect("table should parse")
            .into_inputs()
            .expect_err("negative index should fail");
        assert!(err.to_string().contains("prompt_index"));
        assert!(err.to_string().contains("Europe"));
    }

    #[test]
    fn collaboration_shares_above_hundred_are_rejected() {
        let toml_str = TWO_REGIONS.replacen("pct_validation = 10.0", "pct_validation = 30.0", 1);
        let err = InputTable::from_toml_str(&toml_str)
            .expect("table should parse")
            .into_inputs()
            .expect_err("sum above 100 should fail");
        assert!(err.to_string().contains("collaboration_total"));
    }

    #[test]
    fn overflowing_length_index_is_rejected() {
        let toml_str = TWO_REGIONS
            .replacen("prompt_index = 2.0", "prompt_index = 1.5e308", 1)
            .replacen("completion_index = 2.0", "completion_index = 1.5e308", 1);
        let err = InputTable::from_toml_str(&toml_str)
            .expect("table should parse")
            .into_inputs()
            .expect_err("infinite raw index should fail");
        assert!(matches!(
            err,
            MaturityError::OutOfRangeInput { ref region, ref field, value }
                if region == "Europe" && field == "raw_length_index" && value.is_infinite()
        ));
    }

    #[test]
    fn duplicate_and_empty_tables_are_rejected() {
        let doubled = format!("{TWO_REGIONS}\n{}", TWO_REGIONS);
        let err = InputTable::from_toml_str(&doubled)
            .expect("table should parse")
            .into_inputs()
            .expect_err("duplicate region should fail");
        assert!(matches!(err, MaturityError::DuplicateRegion(_)));

        let err = InputTable::default()
            .into_inputs()
            .expect_err("empty table should fail");
        assert!(matches!(err, MaturityError::EmptyInput));
    }

    #[test]
    fn problems_collects_every_issue() {
        let toml_str = r#"
[[region]]
region = "Mars"
pct_directive = 40.0

[[region]]
pct_directive = -1.0
"#;
        let table = InputTable::from_toml_str(toml_str).expect("table should parse");
        let problems = table.problems();
        assert!(problems
            .iter()
            .any(|p| matches!(p, MaturityError::UnknownRegion(name) if name == "Mars")));
        assert!(problems.iter().any(|p| matches!(
            p,
            MaturityError::MissingField { region, field } if region == "row 2" && field == "region"
        )));
        assert!(problems.len() > 10);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = InputTable::from_toml_str("[[region]]\nregion = \"APAC\"\nlevel0_sw_pct = 4.0\n")
            .expect_err("unknown field should fail");
        assert!(matches!(err, MaturityError::InputParse(_)));
    }

    #[test]
    fn load_input_picks_format_by_extension() {
        let dir = TempDir::new().expect("temp dir should be created");
        let toml_path = dir.path().join("regional_inputs.toml");
        fs::write(&toml_path, TWO_REGIONS).expect("input should write");
        let table = load_input(&toml_path).expect("toml input should load");
        assert_eq!(table.rows.len(), 2);

        let json_path = dir.path().join("regional_inputs.json");
        fs::write(&json_path, r#"{"region": []}"#).expect("input should write");
        let table = load_input(&json_path).expect("json input should load");
        assert!(table.rows.is_empty());

        let broken_path = dir.path().join("broken.toml");
        fs::write(&broken_path, "[[region]\n").expect("input should write");
        let err = load_input(&broken_path).expect_err("malformed toml should fail");
        assert!(matches!(err, MaturityError::InputParse(_)));
        let message = err.to_string();
        assert!(message.starts_with("input parse error: "));
        assert!(message.contains("broken.toml"));
        assert_eq!(message.matches("input parse error").count(), 1);

        let err = load_input(&dir.path().join("missing.toml")).expect_err("missing file");
        assert!(matches!(err, MaturityError::PathNotFound(_)));
    }
}
