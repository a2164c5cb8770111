use super::format::{area, eur, eur_per_m2, pct};
use crate::model::{EvaluationResult, ProjectInputs};
use std::fmt::Write;

/// One reportable fact: section, metric name, formatted value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub section: &'static str,
    pub metric: &'static str,
    pub value: String,
}

fn row(section: &'static str, metric: &'static str, value: impl Into<String>) -> ReportRow {
    ReportRow {
        section,
        metric,
        value: value.into(),
    }
}

fn yes_no(ok: bool) -> &'static str {
    if ok {
        "yes"
    } else {
        "no"
    }
}

/// The facts a project report needs, in report order.
#[must_use]
pub fn report_rows(inputs: &ProjectInputs, r: &EvaluationResult) -> Vec<ReportRow> {
    let info = &inputs.info;
    let e = &r.economics;

    vec![
        row("Project", "Name", info.name.clone()),
        row("Project", "Code", info.code.clone()),
        row("Project", "Parcel number", info.parcel_number.clone()),
        row("Project", "Cadastral municipality", info.cadastral_municipality.clone()),
        row("Parcel", "Parcel area", area(r.parcel_area_m2)),
        row("FI", "Achieved", format!("{:.2}", r.fi.achieved)),
        row("FI", "Limit", format!("{:.2}", r.fi.limit)),
        row("FI", "Allowed BTP", area(r.fi.allowed_btp_m2)),
        row("FI", "BTP reserve", area(r.fi.reserve_btp_m2)),
        row("FI", "Compliant", yes_no(r.fi.ok)),
        row("FZ", "Achieved", format!("{:.3}", r.fz.achieved)),
        row("FZ", "Limit", format!("{:.3}", r.fz.limit)),
        row("FZ", "Building footprint", area(r.massing.building_footprint_m2)),
        row("FZ", "Max footprint", area(r.fz.max_footprint_m2)),
        row("FZ", "Compliant", yes_no(r.fz.ok)),
        row("FZP", "Achieved", pct(r.fzp.achieved)),
        row("FZP", "Minimum", pct(r.fzp.min_fraction)),
        row("FZP", "Growing area", area(r.fzp.growing_area_m2)),
        row("FZP", "Compliant", yes_no(r.fzp.ok)),
        row("Program", "Above-ground floors", r.massing.floors.to_string()),
        row("Program", "BTP above ground", area(r.massing.btp_above_m2)),
        row("Program", "NFA", area(r.massing.nfa_m2)),
        row("Program", "Average unit", format!("{:.1} m²", r.massing.avg_unit_m2)),
        row("Program", "Units", r.units.count.to_string()),
        row("Program", "Units mode", r.units.source.tag()),
        row("Parking", "Scenario", r.parking.scenario.tag()),
        row("Parking", "Stalls total", r.parking.stalls_total.to_string()),
        row("Parking", "Residents", r.parking.stalls_resident.to_string()),
        row("Parking", "Visitors", r.parking.stalls_visitor.to_string()),
        row("Parking", "In basement", r.parking.stalls_in_basement.to_string()),
        row("Parking", "On surface", r.parking.stalls_on_surface.to_string()),
        row("Basement", "Levels", r.basement.levels.to_string()),
        row("Basement", "Footprint", area(r.basement.footprint_m2)),
        row("Basement", "Surface parking area", area(r.basement.surface_parking_area_m2)),
        row("Economics", "Land cost", eur(e.land_cost)),
        row("Economics", "Hard cost", eur(e.hard_cost)),
        row("Economics", "Soft cost", eur(e.soft_cost)),
        row("Economics", "Total investment", eur(e.total_invest)),
        row("Economics", "Cost per m² NFA", eur_per_m2(e.cost_per_m2_nfa)),
        row("Economics", "Revenue", eur(e.revenue)),
        row("Economics", "Margin", eur(e.margin_abs)),
        row("Economics", "Margin %", pct(e.margin_pct)),
        row("Status", "Status", r.status.tag()),
    ]
}

/// Plain-text rendering of [`report_rows`], one section block each.
#[must_use]
pub fn render_text(inputs: &ProjectInputs, r: &EvaluationResult) -> String {
    let rows = report_rows(inputs, r);
    let width = rows.iter().map(|row| row.metric.len()).max().unwrap_or(0);

    let mut out = String::new();
    let mut section = "";
    for row in &rows {
        if row.section != section {
            if !section.is_empty() {
                out.push('\n');
            }
            section = row.section;
            let _ = writeln!(out, "[{section}]");
        }
        let _ = writeln!(out, "  {:<width$}  {}", row.metric, row.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;

    #[test]
    fn report_carries_required_facts() {
        let inputs = ProjectInputs::default();
        let result = evaluate(&inputs).expect("valid");
        let rows = report_rows(&inputs, &result);

        let value = |section: &str, metric: &str| {
            rows.iter()
                .find(|r| r.section == section && r.metric == metric)
                .map(|r| r.value.clone())
        };

        assert_eq!(value("FI", "Limit").as_deref(), Some("1.35"));
        assert_eq!(value("Program", "Units").as_deref(), Some("93"));
        assert_eq!(value("Parking", "Stalls total").as_deref(), Some("140"));
        assert_eq!(value("Status", "Status").as_deref(), Some("OPTIMAL"));
    }

    #[test]
    fn text_groups_sections() {
        let inputs = ProjectInputs::default();
        let result = evaluate(&inputs).expect("valid");
        let text = render_text(&inputs, &result);
        assert!(text.starts_with("[Project]\n"));
        assert!(text.contains("[Economics]\n"));
        assert!(text.contains("BASEMENT_2"));
    }
}
