//! The feasibility pipeline.
//!
//! Massing → FI/FZ → parking → basement → FZP → status → economics.
//! Every stage is a pure function of its arguments and returns a fresh
//! record; [`evaluate`] composes them into one [`EvaluationResult`].

pub mod basement;
pub mod compliance;
pub mod economics;
pub mod green;
pub mod massing;
pub mod parking;
pub mod status;
pub mod tolerance;

use crate::error::ValidationError;
use crate::model::{EvaluationResult, ProjectInputs};

pub use compliance::reserve_band;
pub use parking::distribute_units;
pub use tolerance::EPSILON;

/// Evaluates one project.
///
/// Inputs are validated first; nothing is computed for invalid inputs.
/// The inputs are only read, so the same value can be evaluated from
/// several threads at once and always yields identical results.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found in `inputs`.
///
/// # Example
///
/// ```
/// use urbanistika::engine::evaluate;
/// use urbanistika::model::{ComplianceStatus, ProjectInputs};
///
/// let result = evaluate(&ProjectInputs::default())?;
/// assert_eq!(result.status, ComplianceStatus::Optimal);
/// # Ok::<(), urbanistika::error::ValidationError>(())
/// ```
pub fn evaluate(inputs: &ProjectInputs) -> Result<EvaluationResult, ValidationError> {
    inputs.validate()?;

    let parcel = inputs.parcel_area_m2;
    let massing = massing::compute_massing(&inputs.massing, &inputs.program);

    let fi = compliance::check_density(massing.btp_above_m2, parcel, inputs.limits.fi_limit);
    let fz = compliance::check_coverage(
        massing.building_footprint_m2,
        parcel,
        inputs.limits.fz_limit,
    );

    let units = parking::resolve_units(&inputs.program, massing.units_auto);
    let parking = parking::allocate_parking(units.count, &inputs.parking, inputs.scenario);

    let basement = basement::size_basement(
        &parking,
        &inputs.parking,
        parcel,
        massing.building_footprint_m2,
    );
    let fzp = green::check_green_factor(parcel, &basement, inputs.limits.fzp_min_fraction);

    let status = status::classify(
        fi.ok,
        fz.ok,
        fzp.ok,
        inputs.scenario,
        basement.exceeds_building_footprint,
    );

    let economics = economics::compute_economics(
        &inputs.costs,
        parcel,
        massing.btp_above_m2,
        massing.nfa_m2,
        &basement,
    );

    tracing::debug!(
        scenario = %inputs.scenario,
        units = units.count,
        stalls = parking.stalls_total,
        status = status.tag(),
        "evaluated project"
    );

    Ok(EvaluationResult {
        parcel_area_m2: parcel,
        massing,
        fi,
        fz,
        units,
        parking,
        basement,
        fzp,
        status,
        economics,
    })
}
