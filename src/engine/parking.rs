use super::tolerance::{ceil_count, floor_count};
use crate::model::{
    ParkingParams, ParkingResult, ParkingScenario, Typology, TypologyUnits, UnitProgram,
    UnitsMode, UnitsResult,
};

/// Final unit count: AUTO always takes the fresh suggestion, MANUAL the
/// last entered count.
#[must_use]
pub fn resolve_units(program: &UnitProgram, units_auto: u32) -> UnitsResult {
    let count = match program.mode {
        UnitsMode::Auto => units_auto,
        UnitsMode::Manual => program.manual_unit_count.unwrap_or(units_auto),
    };

    UnitsResult {
        count,
        source: program.mode,
        auto_suggestion: units_auto,
        by_typology: distribute_units(count, &program.typologies),
    }
}

/// Splits `total` units over the typologies by largest remainder.
///
/// Every typology gets the floor of its share; the leftover units go to
/// the largest fractional parts, earlier entries first on ties.
#[must_use]
pub fn distribute_units(total: u32, typologies: &[Typology]) -> Vec<TypologyUnits> {
    let total_share: f64 = typologies.iter().map(|t| t.share_pct.max(0.0)).sum();

    let mut counts = vec![0_u32; typologies.len()];
    if total > 0 && total_share > 0.0 {
        let mut fractions: Vec<(usize, f64)> = Vec::with_capacity(typologies.len());
        for (i, t) in typologies.iter().enumerate() {
            let raw = f64::from(total) * t.share_pct.max(0.0) / total_share;
            counts[i] = floor_count(raw);
            fractions.push((i, raw - raw.floor()));
        }

        let assigned: u32 = counts.iter().sum();
        fractions.sort_by(|a, b| b.1.total_cmp(&a.1));
        for k in 0..total.saturating_sub(assigned) as usize {
            counts[fractions[k % fractions.len()].0] += 1;
        }
    }

    typologies
        .iter()
        .zip(counts)
        .map(|(t, units)| TypologyUnits {
            name: t.name.clone(),
            share_pct: t.share_pct,
            avg_unit_m2: t.avg_unit_m2,
            units,
        })
        .collect()
}

/// Stall demand and its basement/surface split for the chosen scenario.
#[must_use]
pub fn allocate_parking(
    units: u32,
    params: &ParkingParams,
    scenario: ParkingScenario,
) -> ParkingResult {
    let stalls_total = ceil_count(f64::from(units) * params.stalls_per_unit);
    let stalls_visitor = ceil_count(f64::from(stalls_total) * params.visitor_share).min(stalls_total);
    let stalls_resident = stalls_total - stalls_visitor;

    let (stalls_in_basement, stalls_on_surface) = match scenario {
        ParkingScenario::Basement1 | ParkingScenario::Basement2 => (stalls_total, 0),
        ParkingScenario::Basement1PlusSurface => (stalls_resident, stalls_visitor),
    };

    ParkingResult {
        scenario,
        stalls_total,
        stalls_resident,
        stalls_visitor,
        stalls_in_basement,
        stalls_on_surface,
        basement_levels: scenario.basement_levels(),
    }
}
