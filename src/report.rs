//! Rendering of a [`ValuationSnapshot`] for humans.
//!
//! Two formats: full markdown for reports and a compact plain-text block
//! for notifications. Rendering is presentation only; every number comes
//! straight from the snapshot and nothing is recomputed here.

use crate::engine::ValuationSnapshot;
use crate::moat::MoatRating;
use crate::safety::ValuationStatus;

// ============================================================================
// Markdown
// ============================================================================

/// Full markdown report for one valuation run.
pub fn render_markdown(snapshot: &ValuationSnapshot) -> String {
    let mut md = String::new();

    // Header
    match &snapshot.quote {
        Some(quote) => {
            md.push_str(&format!("# Valuation report: {}\n\n", quote.symbol));
            md.push_str(&format!(
                "**Price**: ${:.2} (as of {})\n\n",
                quote.price,
                quote.as_of.format("%Y-%m-%d")
            ));
        }
        None => md.push_str("# Valuation report\n\n"),
    }
    if let Some(safety) = &snapshot.safety {
        md.push_str(&format!(
            "**Verdict**: {} (margin of safety {}, {})\n\n",
            safety.status,
            pct(safety.margin),
            safety.rating
        ));
    }

    // Highlights
    let highlights = generate_highlights(snapshot);
    if !highlights.is_empty() {
        md.push_str("## Highlights\n\n");
        for highlight in &highlights {
            md.push_str(&format!("- {}\n", highlight));
        }
        md.push('\n');
    }

    // Ratios
    let ratios = &snapshot.ratios;
    md.push_str("## Financial ratios\n\n");
    md.push_str(&format!(
        "- Gross / operating / net margin: {} / {} / {}\n",
        pct(ratios.gross_margin),
        pct(ratios.operating_margin),
        pct(ratios.net_margin)
    ));
    md.push_str(&format!(
        "- ROE {}, ROA {}, ROIC {}\n",
        pct(ratios.roe),
        pct(ratios.roa),
        opt_pct(ratios.roic)
    ));
    md.push_str(&format!(
        "- Current ratio {:.2}, debt-to-equity {:.2}\n",
        ratios.current_ratio, ratios.debt_to_equity
    ));
    md.push_str(&format!(
        "- Interest coverage {}, net debt / EBITDA {}\n",
        opt_ratio(ratios.interest_coverage),
        opt_ratio(ratios.net_debt_to_ebitda)
    ));
    md.push_str(&format!(
        "- Revenue CAGR {}, EPS CAGR {}, FCF CAGR {}\n",
        opt_pct(ratios.revenue_cagr),
        opt_pct(ratios.eps_cagr),
        opt_pct(ratios.fcf_cagr)
    ));
    md.push_str(&format!("- FCF yield {}\n\n", opt_pct(ratios.fcf_yield)));

    // DCF
    let dcf = &snapshot.dcf;
    md.push_str("## DCF valuation\n\n");
    if dcf.is_reliable() {
        md.push_str(&format!(
            "**Intrinsic value**: ${:.2} per share\n\n",
            dcf.intrinsic_value_per_share
        ));
        md.push_str(&format!("- Starting FCF: ${:.0}M\n", dcf.starting_fcf / 1e6));
        md.push_str(&format!(
            "- Growth {} fading to {} over {} years\n",
            pct(dcf.growth_rate),
            pct(dcf.terminal_growth_rate),
            dcf.projection_years
        ));
        md.push_str(&format!("- Discount rate: {}\n", pct(dcf.discount_rate)));
        md.push_str(&format!(
            "- Enterprise value ${:.0}M, equity value ${:.0}M\n\n",
            dcf.enterprise_value / 1e6,
            dcf.equity_value / 1e6
        ));
    } else {
        md.push_str("Not valued: free cash flow is non-positive.\n\n");
    }

    // Graham
    let graham = &snapshot.graham;
    md.push_str("## Graham analysis\n\n");
    if graham.graham_number > 0.0 {
        md.push_str(&format!("- Graham Number: ${:.2}\n", graham.graham_number));
    } else {
        md.push_str("- Graham Number: n/a\n");
    }
    match graham.graham_growth_value {
        Some(value) => md.push_str(&format!(
            "- Growth formula value: ${:.2} (EPS CAGR {})\n",
            value,
            opt_pct(graham.eps_cagr)
        )),
        None => md.push_str("- Growth formula value: n/a\n"),
    }
    md.push_str(&format!(
        "\n**Defensive criteria**: {} of {} passed\n\n",
        graham.checklist.passed_count(),
        graham.checklist.criteria.len()
    ));
    for result in &graham.checklist.criteria {
        let mark = if result.passed { "✅" } else { "❌" };
        md.push_str(&format!("- {} {}: {}\n", mark, result.criterion, result.detail));
    }

    // Moat
    let moat = &snapshot.moat;
    md.push_str(&format!(
        "\n## Competitive moat\n\n**Rating**: {} (score {:.1}/5)\n\n",
        moat.rating, moat.overall_score
    ));
    for dimension in &moat.dimensions {
        md.push_str(&format!("- {}: {:.1}/5\n", dimension.dimension, dimension.score));
        for evidence in &dimension.evidence {
            md.push_str(&format!("  - {}\n", evidence));
        }
    }
    md.push_str(&format!(
        "\n**Durability**: {} ({:.1}/5)\n",
        moat.durability.rating, moat.durability.score
    ));
    for adjustment in &moat.durability.adjustments {
        md.push_str(&format!("- {}\n", adjustment));
    }

    // Margin of safety
    if let Some(safety) = &snapshot.safety {
        md.push_str("\n## Margin of safety\n\n");
        md.push_str(&format!(
            "**Combined margin**: {} ({})\n\n",
            pct(safety.margin),
            safety.rating
        ));
        let used = if safety.methods_used.is_empty() {
            "none".to_string()
        } else {
            safety.methods_used.join(", ")
        };
        md.push_str(&format!("- Methods used: {}\n", used));
        if !safety.methods_discarded.is_empty() {
            md.push_str(&format!(
                "- Methods discarded: {}\n",
                safety.methods_discarded.join(", ")
            ));
        }
        if let (Some(minimum), Some(mean), Some(effective)) = (
            safety.minimum,
            safety.mean,
            safety.effective_intrinsic_value,
        ) {
            md.push_str(&format!(
                "- Estimates: minimum ${:.2}, mean ${:.2}, effective ${:.2}\n",
                minimum, mean, effective
            ));
        }
        md.push_str(&format!("\n{}\n", safety.recommendation));
    }

    // Risks
    let risks = generate_risks(snapshot);
    if !risks.is_empty() {
        md.push_str("\n## Risks\n\n");
        for risk in &risks {
            md.push_str(&format!("- ⚠️ {}\n", risk));
        }
    }

    md
}

// ============================================================================
// Plain text
// ============================================================================

/// Compact plain-text summary for notifications.
pub fn render_text(snapshot: &ValuationSnapshot) -> String {
    let mut text = String::new();

    let symbol = snapshot
        .quote
        .as_ref()
        .map(|q| q.symbol.as_str())
        .unwrap_or("(no quote)");
    match &snapshot.safety {
        Some(safety) => {
            text.push_str(&format!("[{}] {}\n", safety.status, symbol));
            text.push_str(&format!("Margin of safety: {}\n", pct(safety.margin)));
        }
        None => text.push_str(&format!("[Unpriced] {}\n", symbol)),
    }

    if snapshot.dcf.is_reliable() {
        text.push_str(&format!(
            "DCF value: ${:.2}/share\n",
            snapshot.dcf.intrinsic_value_per_share
        ));
    }
    if snapshot.graham.graham_number > 0.0 {
        text.push_str(&format!(
            "Graham Number: ${:.2}\n",
            snapshot.graham.graham_number
        ));
    }
    text.push_str(&format!(
        "Moat: {} ({:.1}/5), durability {}\n",
        snapshot.moat.rating, snapshot.moat.overall_score, snapshot.moat.durability.rating
    ));
    text.push_str(&format!(
        "Defensive criteria: {} of {}\n",
        snapshot.graham.checklist.passed_count(),
        snapshot.graham.checklist.criteria.len()
    ));

    if let Some(safety) = &snapshot.safety {
        text.push_str(&format!("\n{}\n", safety.recommendation));
    }

    text
}

// ============================================================================
// Helpers
// ============================================================================

fn generate_highlights(snapshot: &ValuationSnapshot) -> Vec<String> {
    let mut highlights = Vec::new();

    if let Some(safety) = &snapshot.safety {
        if safety.margin >= 0.25 {
            highlights.push(format!(
                "Margin of safety {}, price attractive against intrinsic value",
                pct(safety.margin)
            ));
        }
    }

    if snapshot.moat.rating == MoatRating::Wide {
        highlights.push(format!(
            "Wide moat, strongest dimension scores {:.1}/5",
            snapshot.moat.overall_score
        ));
    }

    if snapshot.graham.checklist.passes_all() {
        highlights.push("Passes every defensive-investor criterion".to_string());
    }

    if snapshot.ratios.roe >= 0.15 {
        highlights.push(format!("ROE {}", pct(snapshot.ratios.roe)));
    }

    if let Some(yield_) = snapshot.ratios.fcf_yield {
        if yield_ >= 0.05 {
            highlights.push(format!("FCF yield {}", pct(yield_)));
        }
    }

    highlights
}

fn generate_risks(snapshot: &ValuationSnapshot) -> Vec<String> {
    let mut risks = Vec::new();

    if let Some(safety) = &snapshot.safety {
        if safety.status == ValuationStatus::Overvalued {
            risks.push("Price exceeds the conservative intrinsic-value estimate".to_string());
        }
        if safety.methods_used.is_empty() {
            risks.push("No valuation method produced a usable estimate".to_string());
        }
    }

    if !snapshot.dcf.is_reliable() {
        risks.push("DCF skipped: free cash flow is non-positive".to_string());
    }

    if snapshot.moat.rating == MoatRating::None {
        risks.push("No durable competitive advantage detected".to_string());
    }

    let checklist = &snapshot.graham.checklist;
    if checklist.passed_count() * 2 < checklist.criteria.len() {
        risks.push(format!(
            "Fails {} of {} defensive criteria",
            checklist.criteria.len() - checklist.passed_count(),
            checklist.criteria.len()
        ));
    }

    if let Some(leverage) = snapshot.ratios.net_debt_to_ebitda {
        if leverage > 3.0 {
            risks.push(format!("Net debt {:.1}x EBITDA", leverage));
        }
    }

    if let Some(coverage) = snapshot.ratios.interest_coverage {
        if coverage < 3.0 {
            risks.push(format!("Interest coverage only {:.1}x", coverage));
        }
    }

    risks
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn opt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), pct)
}

fn opt_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}
