use super::tolerance::{meets_minimum, ratio_or_zero};
use crate::model::{BasementResult, GreenCheck};

/// Growing area is whatever the basement and surface parking leave of the
/// parcel. The building itself stands on the basement slab.
#[must_use]
pub fn check_green_factor(
    parcel_area_m2: f64,
    basement: &BasementResult,
    fzp_min_fraction: f64,
) -> GreenCheck {
    let growing_area_m2 =
        (parcel_area_m2 - basement.footprint_m2 - basement.surface_parking_area_m2).max(0.0);
    let achieved = ratio_or_zero(growing_area_m2, parcel_area_m2);

    GreenCheck {
        min_fraction: fzp_min_fraction,
        growing_area_m2,
        achieved,
        ok: meets_minimum(achieved, fzp_min_fraction),
    }
}
