use super::tolerance::{ratio_or_zero, within_limit, TIGHT_RESERVE_M2};
use crate::model::{CoverageCheck, DensityCheck, ReserveBand};

/// Traffic-light band for a limit reserve. Exceeded shares the tolerance
/// of [`within_limit`], so a satisfied limit is never reported as exceeded.
#[must_use]
pub fn reserve_band(reserve_m2: f64) -> ReserveBand {
    if !within_limit(0.0, reserve_m2) {
        ReserveBand::Exceeded
    } else if reserve_m2 <= TIGHT_RESERVE_M2 {
        ReserveBand::Tight
    } else {
        ReserveBand::Comfortable
    }
}

#[must_use]
pub fn check_density(btp_above_m2: f64, parcel_area_m2: f64, fi_limit: f64) -> DensityCheck {
    let allowed_btp_m2 = fi_limit * parcel_area_m2;
    let reserve_btp_m2 = allowed_btp_m2 - btp_above_m2;

    DensityCheck {
        limit: fi_limit,
        achieved: ratio_or_zero(btp_above_m2, parcel_area_m2),
        allowed_btp_m2,
        reserve_btp_m2,
        band: reserve_band(reserve_btp_m2),
        ok: within_limit(btp_above_m2, allowed_btp_m2),
    }
}

#[must_use]
pub fn check_coverage(footprint_m2: f64, parcel_area_m2: f64, fz_limit: f64) -> CoverageCheck {
    let max_footprint_m2 = fz_limit * parcel_area_m2;
    let reserve_m2 = max_footprint_m2 - footprint_m2;

    CoverageCheck {
        limit: fz_limit,
        achieved: ratio_or_zero(footprint_m2, parcel_area_m2),
        max_footprint_m2,
        reserve_m2,
        band: reserve_band(reserve_m2),
        ok: within_limit(footprint_m2, max_footprint_m2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_project_passes_fi_and_fz() {
        let fi = check_density(6720.0, 5000.0, 1.35);
        assert!(fi.ok);
        assert!((fi.allowed_btp_m2 - 6750.0).abs() < 1e-9);
        assert!((fi.reserve_btp_m2 - 30.0).abs() < 1e-9);
        assert_eq!(fi.band, ReserveBand::Comfortable);

        let fz = check_coverage(1680.0, 5000.0, 0.35);
        assert!(fz.ok);
        assert!((fz.max_footprint_m2 - 1750.0).abs() < 1e-9);
        assert!((fz.achieved - 0.336).abs() < 1e-12);
    }

    #[test]
    fn zero_reserve_is_compliant() {
        let fi = check_density(6720.0, 4480.0, 1.5);
        assert_eq!(fi.reserve_btp_m2, 0.0);
        assert!(fi.ok);
        assert_eq!(fi.band, ReserveBand::Tight);
    }

    #[test]
    fn reserve_inside_tolerance_is_not_exceeded() {
        let mut parcel: f64 = 6720.0 / 1.35;
        for _ in 0..8 {
            parcel = f64::from_bits(parcel.to_bits() - 1);
            let fi = check_density(6720.0, parcel, 1.35);
            assert!(fi.ok);
            assert_eq!(fi.band, ReserveBand::Tight, "parcel {parcel}");
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(reserve_band(-1e-3), ReserveBand::Exceeded);
        assert_eq!(reserve_band(-1e-12), ReserveBand::Tight);
        assert_eq!(reserve_band(20.0), ReserveBand::Tight);
        assert_eq!(reserve_band(20.5), ReserveBand::Comfortable);
    }

    #[test]
    fn exceeding_btp_fails() {
        let fi = check_density(8400.0, 5000.0, 1.35);
        assert!(!fi.ok);
        assert_eq!(fi.band, ReserveBand::Exceeded);
        assert!((fi.achieved - 1.68).abs() < 1e-12);
    }

    #[test]
    fn zero_parcel_reports_zero_density() {
        assert_eq!(check_density(100.0, 0.0, 1.0).achieved, 0.0);
    }

    #[test]
    fn larger_parcel_never_tightens_limits() {
        let mut previous = check_coverage(1680.0, 1000.0, 0.35);
        for parcel in [2000.0, 4800.0, 5000.0, 12_500.0] {
            let fz = check_coverage(1680.0, parcel, 0.35);
            let fi = check_density(6720.0, parcel, 1.35);
            assert!(fz.max_footprint_m2 >= previous.max_footprint_m2);
            assert!(fi.allowed_btp_m2 >= 1.35 * 1000.0);
            previous = fz;
        }
    }
}
