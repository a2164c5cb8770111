use super::tolerance::ratio_or_zero;
use crate::model::{BasementResult, CostParams, EconomicsResult};

/// Investment, revenue and margin for one massing/basement combination.
#[must_use]
pub fn compute_economics(
    costs: &CostParams,
    parcel_area_m2: f64,
    btp_above_m2: f64,
    nfa_m2: f64,
    basement: &BasementResult,
) -> EconomicsResult {
    let land_cost = parcel_area_m2 * costs.land_price_per_m2;
    let btp_below_m2 = basement.footprint_m2 * f64::from(basement.levels);

    let hard_cost = btp_above_m2 * costs.construction_cost_above_per_m2
        + btp_below_m2 * costs.construction_cost_below_per_m2;
    let soft_cost = (land_cost + hard_cost) * costs.soft_cost_fraction;
    let total_invest = land_cost + hard_cost + soft_cost;

    let revenue = nfa_m2 * costs.sales_price_per_m2_nfa;
    let margin_abs = revenue - total_invest;

    EconomicsResult {
        land_cost,
        btp_below_m2,
        hard_cost,
        soft_cost,
        total_invest,
        cost_per_m2_nfa: total_invest / nfa_m2.max(1.0),
        revenue,
        margin_abs,
        margin_pct: ratio_or_zero(margin_abs, revenue),
    }
}
