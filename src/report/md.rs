use crate::types::report::{MaturityReport, SensitivityReport};

pub fn to_markdown(report: &MaturityReport, decimals: usize) -> String {
    let weights = &report.scheme.weights;
    let mut output = String::new();
    output.push_str("# AI Software Maturity Score\n\n");
    output.push_str(&format!(
        "Scheme: {} (collaboration {:.2}, length efficiency {:.2}, complexity {:.2})\n\n",
        report.scheme.name,
        weights.collaboration(),
        weights.length_efficiency(),
        weights.complexity()
    ));
    if report.degenerate_length_normalization {
        output.push_str(
            "> Length efficiency carries no signal: every region has the same raw length index, so all were set to 50.\n\n",
        );
    }

    output.push_str("## Regional Rankings\n\n");
    output.push_str("| Rank | Region | Score | Collaboration | Length Efficiency | Complexity |\n");
    output.push_str("|---:|---|---:|---:|---:|---:|\n");
    for result in &report.results {
        output.push_str(&format!(
            "| {} | {} | {:.d$} | {:.d$} | {:.d$} | {:.d$} |\n",
            result.rank,
            result.region_id,
            result.composite_score,
            result.collaboration_score,
            result.length_efficiency_score,
            result.complexity_score,
            d = decimals
        ));
    }
    output.push('\n');

    output.push_str("## Component Leaders\n\n");
    match &report.leaders {
        Some(leaders) => output.push_str(&format!(
            "- collaboration: {}\n- length efficiency: {}\n- complexity: {}\n- overall: {}\n\n",
            leaders.collaboration, leaders.length_efficiency, leaders.complexity, leaders.overall
        )),
        None => output.push_str("- none\n\n"),
    }

    output.push_str("## Component Breakdown\n\n");
    output.push_str(
        "| Region | Collaboration (weighted) | Length Efficiency (weighted) | Complexity (weighted) | Raw Length Index |\n",
    );
    output.push_str("|---|---:|---:|---:|---:|\n");
    for result in &report.results {
        output.push_str(&format!(
            "| {} | {:.d$} | {:.d$} | {:.d$} | {:.3} |\n",
            result.region_id,
            result.contributions.collaboration,
            result.contributions.length_efficiency,
            result.contributions.complexity,
            result.raw_length_index,
            d = decimals
        ));
    }

    output
}

pub fn sensitivity_to_markdown(report: &SensitivityReport, decimals: usize) -> String {
    let mut output = String::new();
    output.push_str("# Weighting Sensitivity\n\n");
    if report.degenerate_length_normalization {
        output.push_str(
            "> Length efficiency carries no signal: every region has the same raw length index, so all were set to 50.\n\n",
        );
    }
    output.push_str(&format!(
        "Top region stable across schemes: {}\n\n",
        if report.top_region_stable { "yes" } else { "no" }
    ));

    for ranking in &report.rankings {
        output.push_str(&format!("## {}\n\n", ranking.scheme.name));
        output.push_str("| Rank | Region | Score |\n|---:|---|---:|\n");
        for result in &ranking.results {
            output.push_str(&format!(
                "| {} | {} | {:.d$} |\n",
                result.rank,
                result.region_id,
                result.composite_score,
                d = decimals
            ));
        }
        output.push('\n');
    }

    output.push_str("## Rank Spread\n\n");
    output.push_str("| Region | Best | Worst | Spread |\n|---|---:|---:|---:|\n");
    for spread in &report.rank_spread {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            spread.region_id,
            spread.best_rank,
            spread.worst_rank,
            spread.spread()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&fixtures::report(), 1);
        assert!(rendered.contains("# AI Software Maturity Score"));
        assert!(rendered.contains("## Regional Rankings"));
        assert!(rendered.contains("| 1 | North America | 62.5 | 50.0 | 100.0 | 50.0 |"));
        assert!(rendered.contains("## Component Leaders"));
        assert!(rendered.contains("- overall: North America"));
        assert!(!rendered.contains("carries no signal"));
    }

    #[test]
    fn breakdown_headers_mark_weighted_contributions() {
        let rendered = to_markdown(&fixtures::report(), 1);
        let breakdown = rendered
            .split("## Component Breakdown")
            .nth(1)
            .expect("breakdown section should render");
        assert!(breakdown.contains("| Region | Collaboration (weighted) | Length Efficiency (weighted) | Complexity (weighted) |"));
        assert!(breakdown.contains("| North America | 12.5 | 25.0 | 25.0 | 3.000 |"));
    }

    #[test]
    fn markdown_respects_decimals() {
        let rendered = to_markdown(&fixtures::report(), 3);
        assert!(rendered.contains("| 2 | Europe | 37.500 |"));
    }

    #[test]
    fn markdown_flags_degenerate_normalization() {
        let mut report = fixtures::report();
        report.degenerate_length_normalization = true;
        assert!(to_markdown(&report, 1).contains("carries no signal"));
    }

    #[test]
    fn sensitivity_markdown_lists_schemes() {
        let rendered = sensitivity_to_markdown(&fixtures::sensitivity(), 1);
        assert!(rendered.contains("## balanced"));
        assert!(rendered.contains("## complexity_focused"));
        assert!(rendered.contains("## equal_weight"));
        assert!(rendered.contains("Top region stable across schemes: yes"));
        assert!(rendered.contains("| Europe | 2 | 2 | 0 |"));
    }
}
