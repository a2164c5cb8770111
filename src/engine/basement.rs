use super::tolerance::{exceeds, MIN_EFFICIENCY};
use crate::model::{BasementResult, ParkingParams, ParkingResult};

/// Converts the stall split into basement and surface areas.
///
/// The basement footprint is the garage area spread over its levels plus
/// a fixed ramp/technical allowance, and never exceeds the parcel.
#[must_use]
pub fn size_basement(
    parking: &ParkingResult,
    params: &ParkingParams,
    parcel_area_m2: f64,
    building_footprint_m2: f64,
) -> BasementResult {
    let levels = parking.basement_levels.max(1);
    let efficiency = params.efficiency_for(levels);

    let garage_area_total_m2 = f64::from(parking.stalls_in_basement)
        * params.area_per_stall_basement_m2
        / efficiency.max(MIN_EFFICIENCY);
    let uncapped = garage_area_total_m2 / f64::from(levels) + params.ramp_and_technical_area_m2;
    let footprint_m2 = uncapped.min(parcel_area_m2);

    let surface_parking_area_m2 = f64::from(parking.stalls_on_surface)
        * params.area_per_stall_surface_m2
        * params.surface_area_multiplier;

    BasementResult {
        levels,
        efficiency,
        garage_area_total_m2,
        footprint_m2,
        capped_at_parcel: uncapped > parcel_area_m2,
        surface_parking_area_m2,
        exceeds_building_footprint: exceeds(footprint_m2, building_footprint_m2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parking::allocate_parking;
    use crate::model::{ParkingScenario, ProjectInputs};

    fn sized(units: u32, scenario: ParkingScenario) -> BasementResult {
        let params = ProjectInputs::default().parking;
        let parking = allocate_parking(units, &params, scenario);
        size_basement(&parking, &params, 5000.0, 1680.0)
    }

    #[test]
    fn two_levels_halve_the_garage() {
        let b = sized(93, ParkingScenario::Basement2);
        assert_eq!(b.levels, 2);
        assert!((b.efficiency - 0.85).abs() < 1e-12);
        assert!((b.garage_area_total_m2 - 140.0 * 25.0 / 0.85).abs() < 1e-9);
        assert!((b.footprint_m2 - (140.0 * 25.0 / 0.85 / 2.0 + 200.0)).abs() < 1e-9);
        assert!(!b.capped_at_parcel);
        assert!(b.exceeds_building_footprint);
        assert_eq!(b.surface_parking_area_m2, 0.0);
    }

    #[test]
    fn footprint_is_capped_at_parcel() {
        // 140 stalls on one level: 5000 m² garage + 200 m² ramp on a 5000 m² parcel.
        let b = sized(93, ParkingScenario::Basement1);
        assert!(b.capped_at_parcel);
        assert_eq!(b.footprint_m2, 5000.0);
    }

    #[test]
    fn surface_stalls_use_surface_area() {
        let b = sized(93, ParkingScenario::Basement1PlusSurface);
        assert!((b.surface_parking_area_m2 - 47.0 * 25.0).abs() < 1e-9);
        assert!((b.footprint_m2 - (93.0 * 25.0 / 0.7 + 200.0)).abs() < 1e-9);
    }

    #[test]
    fn small_garage_stays_under_the_building() {
        // 27 stalls: ~964 m² garage + 200 m² ramp under a 1680 m² footprint.
        let b = sized(18, ParkingScenario::Basement1);
        assert!((b.footprint_m2 - (27.0 * 25.0 / 0.7 + 200.0)).abs() < 1e-9);
        assert!(!b.exceeds_building_footprint);
    }

    #[test]
    fn no_stalls_leaves_only_the_ramp() {
        let b = sized(0, ParkingScenario::Basement2);
        assert_eq!(b.garage_area_total_m2, 0.0);
        assert_eq!(b.footprint_m2, 200.0);
    }
}
