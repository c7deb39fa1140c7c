use crate::types::report::{MaturityReport, SensitivityReport};

const RULE_WIDTH: usize = 72;

pub fn to_text(report: &MaturityReport, decimals: usize) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut output = String::new();
    output.push_str(&format!("AI SOFTWARE MATURITY SCORE ({})\n", report.scheme.name));
    output.push_str(&format!("{rule}\n"));
    output.push_str(&format!(
        "{:<4} {:<22} {:>9} {:>9} {:>9} {:>9}\n",
        "Rank", "Region", "Score", "Collab", "Effic", "Complex"
    ));
    output.push_str(&format!("{rule}\n"));
    for result in &report.results {
        output.push_str(&format!(
            "{:<4} {:<22} {:>9.d$} {:>9.d$} {:>9.d$} {:>9.d$}\n",
            result.rank,
            result.region_id.display_name(),
            result.composite_score,
            result.collaboration_score,
            result.length_efficiency_score,
            result.complexity_score,
            d = decimals
        ));
    }

    if let Some(leaders) = &report.leaders {
        output.push_str(&format!("{rule}\n"));
        output.push_str(&format!("Collaboration leader:     {}\n", leaders.collaboration));
        output.push_str(&format!("Length efficiency leader: {}\n", leaders.length_efficiency));
        output.push_str(&format!("Complexity leader:        {}\n", leaders.complexity));
        output.push_str(&format!("Overall leader:           {}\n", leaders.overall));
    }
    if report.degenerate_length_normalization {
        output.push_str("note: identical raw length indices; length efficiency fixed at 50\n");
    }

    output
}

pub fn sensitivity_to_text(report: &SensitivityReport, decimals: usize) -> String {
    let mut output = String::new();
    for ranking in &report.rankings {
        output.push_str(&format!("[{}]\n", ranking.scheme.name));
        for result in &ranking.results {
            output.push_str(&format!(
                "  {:<4} {:<22} {:>9.d$}\n",
                result.rank,
                result.region_id.display_name(),
                result.composite_score,
                d = decimals
            ));
        }
    }
    output.push_str(&format!(
        "top region stable: {}\n",
        if report.top_region_stable { "yes" } else { "no" }
    ));
    if report.degenerate_length_normalization {
        output.push_str("note: identical raw length indices; length efficiency fixed at 50\n");
    }
    output
}
