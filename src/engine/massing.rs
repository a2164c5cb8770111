use super::tolerance::{floor_count, MIN_UNIT_AREA_M2};
use crate::model::{Massing, MassingResult, UnitProgram};

/// Weighted average unit size, shares renormalized to their own sum.
///
/// Falls back to `default_avg_unit_m2` when the shares sum to zero.
#[must_use]
pub fn average_unit_size(program: &UnitProgram) -> f64 {
    let total_share: f64 = program.typologies.iter().map(|t| t.share_pct).sum();
    if total_share <= 0.0 {
        return program.default_avg_unit_m2.max(MIN_UNIT_AREA_M2);
    }

    let avg: f64 = program
        .typologies
        .iter()
        .map(|t| t.share_pct / total_share * t.avg_unit_m2)
        .sum();
    avg.max(MIN_UNIT_AREA_M2)
}

#[must_use]
pub fn compute_massing(massing: &Massing, program: &UnitProgram) -> MassingResult {
    let building_footprint_m2 =
        f64::from(massing.lamel_count) * massing.lamel_length_m * massing.lamel_width_m;
    let btp_above_m2 = building_footprint_m2 * f64::from(massing.above_ground_floors);
    let nfa_m2 = btp_above_m2 * massing.net_to_gross_ratio.clamp(0.0, 1.0);

    let avg_unit_m2 = average_unit_size(program);
    let units_auto = floor_count(nfa_m2 / avg_unit_m2.max(MIN_UNIT_AREA_M2)).max(1);

    MassingResult {
        building_footprint_m2,
        floors: massing.above_ground_floors,
        btp_above_m2,
        nfa_m2,
        avg_unit_m2,
        units_auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInputs, Typology};

    #[test]
    fn reference_massing() {
        let inputs = ProjectInputs::default();
        let m = compute_massing(&inputs.massing, &inputs.program);

        assert!((m.building_footprint_m2 - 1680.0).abs() < 1e-9);
        assert!((m.btp_above_m2 - 6720.0).abs() < 1e-9);
        assert!((m.nfa_m2 - 5510.4).abs() < 1e-6);
        assert!((m.avg_unit_m2 - 59.0).abs() < 1e-9);
        assert_eq!(m.units_auto, 93);
    }

    #[test]
    fn shares_summing_to_hundred_give_weighted_mean() {
        let mut program = ProjectInputs::default().program;
        program.typologies = vec![Typology::new("a", 50.0, 40.0), Typology::new("b", 50.0, 80.0)];
        assert!((average_unit_size(&program) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn shares_are_renormalized() {
        let mut program = ProjectInputs::default().program;
        program.typologies = vec![Typology::new("a", 1.0, 40.0), Typology::new("b", 3.0, 80.0)];
        assert!((average_unit_size(&program) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn zero_shares_fall_back_to_default() {
        let mut program = ProjectInputs::default().program;
        for t in &mut program.typologies {
            t.share_pct = 0.0;
        }
        program.default_avg_unit_m2 = 72.5;
        assert!((average_unit_size(&program) - 72.5).abs() < 1e-9);

        program.typologies.clear();
        assert!((average_unit_size(&program) - 72.5).abs() < 1e-9);
    }

    #[test]
    fn tiny_massing_still_suggests_one_unit() {
        let mut inputs = ProjectInputs::default();
        inputs.massing.lamel_count = 1;
        inputs.massing.lamel_length_m = 2.0;
        inputs.massing.lamel_width_m = 2.0;
        inputs.massing.above_ground_floors = 1;
        let m = compute_massing(&inputs.massing, &inputs.program);
        assert_eq!(m.units_auto, 1);
    }
}
