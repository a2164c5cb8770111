use crate::error::ValidationError;
use crate::model::{
    CostParams, Massing, ParkingParams, ProjectInfo, ProjectInputs, Typology, UnitProgram,
    UnitsMode, ZoningLimits,
};
use serde::{Deserialize, Serialize};

/// Flat, all-optional mirror of the project form.
///
/// Missing fields survive deserialization so they can be reported per
/// field by [`ProjectDraft::into_inputs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub project_name: String,
    pub project_code: String,
    pub parcel_number: String,
    pub cadastral_municipality: String,

    pub parcel_area_m2: Option<f64>,
    pub fi_limit: Option<f64>,
    pub fz_limit: Option<f64>,
    pub fzp_min_fraction: Option<f64>,

    pub lamel_count: Option<f64>,
    pub lamel_length_m: Option<f64>,
    pub lamel_width_m: Option<f64>,
    pub above_ground_floors: Option<f64>,
    pub net_to_gross_ratio: Option<f64>,

    pub units_mode: Option<String>,
    pub manual_unit_count: Option<f64>,
    pub default_avg_unit_m2: Option<f64>,
    pub typologies: Vec<Typology>,

    pub stalls_per_unit: Option<f64>,
    pub visitor_share: Option<f64>,
    pub area_per_stall_basement_m2: Option<f64>,
    pub area_per_stall_surface_m2: Option<f64>,
    pub basement_efficiency_1level: Option<f64>,
    pub basement_efficiency_2level: Option<f64>,
    pub ramp_and_technical_area_m2: Option<f64>,
    pub surface_area_multiplier: Option<f64>,

    pub parking_scenario: Option<String>,

    pub land_price_per_m2: Option<f64>,
    pub construction_cost_above_per_m2: Option<f64>,
    pub construction_cost_below_per_m2: Option<f64>,
    pub soft_cost_fraction: Option<f64>,
    pub sales_price_per_m2_nfa: Option<f64>,
}

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

/// Whole, positive count from a JSON number.
fn count(field: &'static str, value: f64) -> Result<u32, ValidationError> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            expected: "a whole number >= 1",
        })
    }
}

impl ProjectDraft {
    /// Builds validated inputs, reporting the first missing or invalid field.
    pub fn into_inputs(self) -> Result<ProjectInputs, ValidationError> {
        let mode: UnitsMode = require("units_mode", self.units_mode)?.parse()?;
        // AUTO keeps a stored count only when it is usable.
        let manual_unit_count = match (mode, self.manual_unit_count) {
            (UnitsMode::Manual, Some(n)) => Some(count("manual_unit_count", n)?),
            (UnitsMode::Manual, None) => {
                return Err(ValidationError::Missing {
                    field: "manual_unit_count",
                })
            }
            (UnitsMode::Auto, n) => n.and_then(|n| count("manual_unit_count", n).ok()),
        };

        let inputs = ProjectInputs {
            info: ProjectInfo {
                name: self.project_name,
                code: self.project_code,
                parcel_number: self.parcel_number,
                cadastral_municipality: self.cadastral_municipality,
            },
            parcel_area_m2: require("parcel_area_m2", self.parcel_area_m2)?,
            limits: ZoningLimits {
                fi_limit: require("fi_limit", self.fi_limit)?,
                fz_limit: require("fz_limit", self.fz_limit)?,
                fzp_min_fraction: require("fzp_min_fraction", self.fzp_min_fraction)?,
            },
            massing: Massing {
                lamel_count: count("lamel_count", require("lamel_count", self.lamel_count)?)?,
                lamel_length_m: require("lamel_length_m", self.lamel_length_m)?,
                lamel_width_m: require("lamel_width_m", self.lamel_width_m)?,
                above_ground_floors: count(
                    "above_ground_floors",
                    require("above_ground_floors", self.above_ground_floors)?,
                )?,
                net_to_gross_ratio: require("net_to_gross_ratio", self.net_to_gross_ratio)?,
            },
            program: UnitProgram {
                mode,
                manual_unit_count,
                default_avg_unit_m2: require("default_avg_unit_m2", self.default_avg_unit_m2)?,
                typologies: self.typologies,
            },
            parking: ParkingParams {
                stalls_per_unit: require("stalls_per_unit", self.stalls_per_unit)?,
                visitor_share: require("visitor_share", self.visitor_share)?,
                area_per_stall_basement_m2: require(
                    "area_per_stall_basement_m2",
                    self.area_per_stall_basement_m2,
                )?,
                area_per_stall_surface_m2: require(
                    "area_per_stall_surface_m2",
                    self.area_per_stall_surface_m2,
                )?,
                basement_efficiency_1level: require(
                    "basement_efficiency_1level",
                    self.basement_efficiency_1level,
                )?,
                basement_efficiency_2level: require(
                    "basement_efficiency_2level",
                    self.basement_efficiency_2level,
                )?,
                ramp_and_technical_area_m2: require(
                    "ramp_and_technical_area_m2",
                    self.ramp_and_technical_area_m2,
                )?,
                surface_area_multiplier: require(
                    "surface_area_multiplier",
                    self.surface_area_multiplier,
                )?,
            },
            scenario: require("parking_scenario", self.parking_scenario)?.parse()?,
            costs: CostParams {
                land_price_per_m2: require("land_price_per_m2", self.land_price_per_m2)?,
                construction_cost_above_per_m2: require(
                    "construction_cost_above_per_m2",
                    self.construction_cost_above_per_m2,
                )?,
                construction_cost_below_per_m2: require(
                    "construction_cost_below_per_m2",
                    self.construction_cost_below_per_m2,
                )?,
                soft_cost_fraction: require("soft_cost_fraction", self.soft_cost_fraction)?,
                sales_price_per_m2_nfa: require(
                    "sales_price_per_m2_nfa",
                    self.sales_price_per_m2_nfa,
                )?,
            },
        };

        inputs.validate()?;
        Ok(inputs)
    }
}

impl From<&ProjectInputs> for ProjectDraft {
    fn from(inputs: &ProjectInputs) -> Self {
        let ProjectInputs {
            info,
            parcel_area_m2,
            limits,
            massing,
            program,
            parking,
            scenario,
            costs,
        } = inputs;

        Self {
            project_name: info.name.clone(),
            project_code: info.code.clone(),
            parcel_number: info.parcel_number.clone(),
            cadastral_municipality: info.cadastral_municipality.clone(),
            parcel_area_m2: Some(*parcel_area_m2),
            fi_limit: Some(limits.fi_limit),
            fz_limit: Some(limits.fz_limit),
            fzp_min_fraction: Some(limits.fzp_min_fraction),
            lamel_count: Some(f64::from(massing.lamel_count)),
            lamel_length_m: Some(massing.lamel_length_m),
            lamel_width_m: Some(massing.lamel_width_m),
            above_ground_floors: Some(f64::from(massing.above_ground_floors)),
            net_to_gross_ratio: Some(massing.net_to_gross_ratio),
            units_mode: Some(program.mode.tag().to_string()),
            manual_unit_count: program.manual_unit_count.map(f64::from),
            default_avg_unit_m2: Some(program.default_avg_unit_m2),
            typologies: program.typologies.clone(),
            stalls_per_unit: Some(parking.stalls_per_unit),
            visitor_share: Some(parking.visitor_share),
            area_per_stall_basement_m2: Some(parking.area_per_stall_basement_m2),
            area_per_stall_surface_m2: Some(parking.area_per_stall_surface_m2),
            basement_efficiency_1level: Some(parking.basement_efficiency_1level),
            basement_efficiency_2level: Some(parking.basement_efficiency_2level),
            ramp_and_technical_area_m2: Some(parking.ramp_and_technical_area_m2),
            surface_area_multiplier: Some(parking.surface_area_multiplier),
            parking_scenario: Some(scenario.tag().to_string()),
            land_price_per_m2: Some(costs.land_price_per_m2),
            construction_cost_above_per_m2: Some(costs.construction_cost_above_per_m2),
            construction_cost_below_per_m2: Some(costs.construction_cost_below_per_m2),
            soft_cost_fraction: Some(costs.soft_cost_fraction),
            sales_price_per_m2_nfa: Some(costs.sales_price_per_m2_nfa),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn draft_of_inputs_converts_back() {
        let inputs = ProjectInputs::default();
        let draft = ProjectDraft::from(&inputs);
        assert_eq!(draft.into_inputs(), Ok(inputs));
    }

    #[test]
    fn reports_first_missing_field() {
        let mut draft = ProjectDraft::from(&ProjectInputs::default());
        draft.fz_limit = None;
        assert_eq!(
            draft.into_inputs(),
            Err(ValidationError::Missing { field: "fz_limit" })
        );
    }

    #[test]
    fn empty_draft_starts_with_units_mode() {
        assert_eq!(
            ProjectDraft::default().into_inputs(),
            Err(ValidationError::Missing { field: "units_mode" })
        );
    }

    #[test]
    fn fractional_counts_are_rejected() {
        let mut draft = ProjectDraft::from(&ProjectInputs::default());
        draft.above_ground_floors = Some(3.5);
        assert_eq!(
            draft.into_inputs().unwrap_err().field(),
            "above_ground_floors"
        );

        let mut draft = ProjectDraft::from(&ProjectInputs::default());
        draft.lamel_count = Some(-2.0);
        assert_eq!(draft.into_inputs().unwrap_err().field(), "lamel_count");
    }

    #[test]
    fn unknown_scenario_tag() {
        let mut draft = ProjectDraft::from(&ProjectInputs::default());
        draft.parking_scenario = Some("ROOFTOP".to_string());
        assert!(matches!(
            draft.into_inputs(),
            Err(ValidationError::UnknownVariant {
                field: "parking_scenario",
                ..
            })
        ));
    }

    #[test]
    fn auto_mode_ignores_unusable_manual_count() {
        for stored in [0.0, 12.5, -3.0] {
            let mut draft = ProjectDraft::from(&ProjectInputs::default());
            draft.manual_unit_count = Some(stored);
            let inputs = draft.into_inputs().expect("valid draft");
            assert_eq!(inputs.program.manual_unit_count, None);
        }

        let mut draft = ProjectDraft::from(&ProjectInputs::default());
        draft.manual_unit_count = Some(70.0);
        let inputs = draft.into_inputs().expect("valid draft");
        assert_eq!(inputs.program.manual_unit_count, Some(70));
    }

    #[test]
    fn manual_mode_needs_count() {
        let mut draft = ProjectDraft::from(&ProjectInputs::default());
        draft.units_mode = Some("MANUAL".to_string());
        assert_eq!(
            draft.clone().into_inputs(),
            Err(ValidationError::Missing {
                field: "manual_unit_count"
            })
        );

        draft.manual_unit_count = Some(80.0);
        let inputs = draft.into_inputs().expect("valid draft");
        assert_eq!(inputs.program.manual_unit_count, Some(80));
    }
}
