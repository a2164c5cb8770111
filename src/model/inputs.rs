use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identification fields carried through to reports. Not used by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub code: String,
    pub parcel_number: String,
    pub cadastral_municipality: String,
}

/// Regulatory limits from the spatial plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoningLimits {
    /// Maximum above-ground BTP / parcel area.
    pub fi_limit: f64,
    /// Maximum building footprint / parcel area.
    pub fz_limit: f64,
    /// Minimum growing (green) area / parcel area.
    pub fzp_min_fraction: f64,
}

/// Slab-block massing: `lamel_count` identical lamels of the same height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Massing {
    pub lamel_count: u32,
    pub lamel_length_m: f64,
    pub lamel_width_m: f64,
    pub above_ground_floors: u32,
    pub net_to_gross_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typology {
    pub name: String,
    pub share_pct: f64,
    pub avg_unit_m2: f64,
}

impl Typology {
    #[must_use]
    pub fn new(name: impl Into<String>, share_pct: f64, avg_unit_m2: f64) -> Self {
        Self {
            name: name.into(),
            share_pct,
            avg_unit_m2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProgram {
    pub mode: UnitsMode,
    /// Last explicitly entered unit count. Required in MANUAL mode.
    pub manual_unit_count: Option<u32>,
    pub default_avg_unit_m2: f64,
    pub typologies: Vec<Typology>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingParams {
    pub stalls_per_unit: f64,
    pub visitor_share: f64,
    pub area_per_stall_basement_m2: f64,
    pub area_per_stall_surface_m2: f64,
    pub basement_efficiency_1level: f64,
    pub basement_efficiency_2level: f64,
    pub ramp_and_technical_area_m2: f64,
    pub surface_area_multiplier: f64,
}

impl ParkingParams {
    /// Garage efficiency for the given number of basement levels.
    #[must_use]
    pub fn efficiency_for(&self, levels: u32) -> f64 {
        if levels <= 1 {
            self.basement_efficiency_1level
        } else {
            self.basement_efficiency_2level
        }
    }
}

/// Unit prices in EUR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostParams {
    pub land_price_per_m2: f64,
    pub construction_cost_above_per_m2: f64,
    pub construction_cost_below_per_m2: f64,
    pub soft_cost_fraction: f64,
    pub sales_price_per_m2_nfa: f64,
}

/// Complete, validated parameter set for one evaluation.
///
/// Value object: the engine only ever reads it. Tools that want a
/// variant (scenario switch, optimization step) clone and modify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    #[serde(default)]
    pub info: ProjectInfo,
    pub parcel_area_m2: f64,
    pub limits: ZoningLimits,
    pub massing: Massing,
    pub program: UnitProgram,
    pub parking: ParkingParams,
    pub scenario: ParkingScenario,
    pub costs: CostParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitsMode {
    #[serde(rename = "AUTO")]
    Auto,
    #[serde(rename = "MANUAL")]
    Manual,
}

impl UnitsMode {
    pub const ALL: [UnitsMode; 2] = [UnitsMode::Auto, UnitsMode::Manual];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }
}

impl fmt::Display for UnitsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for UnitsMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "units_mode",
                value: s.to_string(),
                expected: "AUTO, MANUAL",
            })
    }
}

/// Where the parking stalls go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParkingScenario {
    /// Everything in a single basement level.
    #[serde(rename = "BASEMENT_1")]
    Basement1,
    /// Residents in a single basement level, visitors on the surface.
    #[serde(rename = "BASEMENT_1_PLUS_SURFACE")]
    Basement1PlusSurface,
    /// Everything in two basement levels.
    #[serde(rename = "BASEMENT_2")]
    Basement2,
}

impl ParkingScenario {
    pub const ALL: [ParkingScenario; 3] = [
        ParkingScenario::Basement1,
        ParkingScenario::Basement1PlusSurface,
        ParkingScenario::Basement2,
    ];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Basement1 => "BASEMENT_1",
            Self::Basement1PlusSurface => "BASEMENT_1_PLUS_SURFACE",
            Self::Basement2 => "BASEMENT_2",
        }
    }

    #[must_use]
    pub fn basement_levels(self) -> u32 {
        match self {
            Self::Basement1 | Self::Basement1PlusSurface => 1,
            Self::Basement2 => 2,
        }
    }

    /// Next scenario in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Basement1 => Self::Basement1PlusSurface,
            Self::Basement1PlusSurface => Self::Basement2,
            Self::Basement2 => Self::Basement1,
        }
    }
}

impl fmt::Display for ParkingScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ParkingScenario {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sc| sc.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "parking_scenario",
                value: s.to_string(),
                expected: "BASEMENT_1, BASEMENT_1_PLUS_SURFACE, BASEMENT_2",
            })
    }
}

impl Default for ProjectInputs {
    /// Reference project: three 40 x 14 m lamels on a 5000 m² parcel.
    fn default() -> Self {
        Self {
            info: ProjectInfo::default(),
            parcel_area_m2: 5000.0,
            limits: ZoningLimits {
                fi_limit: 1.35,
                fz_limit: 0.35,
                fzp_min_fraction: 0.20,
            },
            massing: Massing {
                lamel_count: 3,
                lamel_length_m: 40.0,
                lamel_width_m: 14.0,
                above_ground_floors: 4,
                net_to_gross_ratio: 0.82,
            },
            program: UnitProgram {
                mode: UnitsMode::Auto,
                manual_unit_count: None,
                default_avg_unit_m2: 60.0,
                typologies: vec![
                    Typology::new("1-room", 20.0, 35.0),
                    Typology::new("2-room", 45.0, 55.0),
                    Typology::new("3-room", 30.0, 75.0),
                    Typology::new("4-room", 5.0, 95.0),
                ],
            },
            parking: ParkingParams {
                stalls_per_unit: 1.5,
                visitor_share: 0.33,
                area_per_stall_basement_m2: 25.0,
                area_per_stall_surface_m2: 25.0,
                basement_efficiency_1level: 0.70,
                basement_efficiency_2level: 0.85,
                ramp_and_technical_area_m2: 200.0,
                surface_area_multiplier: 1.0,
            },
            scenario: ParkingScenario::Basement2,
            costs: CostParams {
                land_price_per_m2: 450.0,
                construction_cost_above_per_m2: 1400.0,
                construction_cost_below_per_m2: 1100.0,
                soft_cost_fraction: 0.12,
                sales_price_per_m2_nfa: 3200.0,
            },
        }
    }
}

/// Largest unit or stall count a result can carry (`u32::MAX`).
const MAX_COUNT: f64 = 4_294_967_295.0;

/// Smallest unit size the engine divides by; bounds the AUTO suggestion.
const MIN_UNIT_AREA_M2: f64 = 10.0;

fn check(
    field: &'static str,
    value: f64,
    ok: bool,
    expected: &'static str,
) -> Result<(), ValidationError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

impl ProjectInputs {
    /// Checks every numeric range. Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let p = self.parcel_area_m2;
        check("parcel_area_m2", p, p > 0.0, "> 0")?;

        let l = &self.limits;
        check("fi_limit", l.fi_limit, l.fi_limit > 0.0, "> 0")?;
        check(
            "fz_limit",
            l.fz_limit,
            l.fz_limit > 0.0 && l.fz_limit <= 1.0,
            "in (0, 1]",
        )?;
        check(
            "fzp_min_fraction",
            l.fzp_min_fraction,
            (0.0..=1.0).contains(&l.fzp_min_fraction),
            "in [0, 1]",
        )?;

        let m = &self.massing;
        check(
            "lamel_count",
            f64::from(m.lamel_count),
            m.lamel_count >= 1,
            ">= 1",
        )?;
        check("lamel_length_m", m.lamel_length_m, m.lamel_length_m > 0.0, "> 0")?;
        check("lamel_width_m", m.lamel_width_m, m.lamel_width_m > 0.0, "> 0")?;
        check(
            "above_ground_floors",
            f64::from(m.above_ground_floors),
            m.above_ground_floors >= 1,
            ">= 1",
        )?;
        check(
            "net_to_gross_ratio",
            m.net_to_gross_ratio,
            m.net_to_gross_ratio > 0.0 && m.net_to_gross_ratio <= 1.0,
            "in (0, 1]",
        )?;

        self.validate_program()?;
        self.validate_parking()?;
        self.validate_counts()?;

        let c = &self.costs;
        for (field, value) in [
            ("land_price_per_m2", c.land_price_per_m2),
            ("construction_cost_above_per_m2", c.construction_cost_above_per_m2),
            ("construction_cost_below_per_m2", c.construction_cost_below_per_m2),
            ("sales_price_per_m2_nfa", c.sales_price_per_m2_nfa),
        ] {
            check(field, value, value >= 0.0, ">= 0")?;
        }
        check(
            "soft_cost_fraction",
            c.soft_cost_fraction,
            (0.0..=1.0).contains(&c.soft_cost_fraction),
            "in [0, 1]",
        )?;

        Ok(())
    }

    fn validate_program(&self) -> Result<(), ValidationError> {
        let u = &self.program;
        if u.mode == UnitsMode::Manual {
            match u.manual_unit_count {
                None => {
                    return Err(ValidationError::Missing {
                        field: "manual_unit_count",
                    })
                }
                Some(n) => check("manual_unit_count", f64::from(n), n >= 1, ">= 1")?,
            }
        }
        check(
            "default_avg_unit_m2",
            u.default_avg_unit_m2,
            u.default_avg_unit_m2 > 0.0,
            "> 0",
        )?;

        for (index, t) in u.typologies.iter().enumerate() {
            check("share_pct", t.share_pct, t.share_pct >= 0.0, ">= 0")
                .and_then(|()| {
                    check(
                        "avg_unit_m2",
                        t.avg_unit_m2,
                        t.avg_unit_m2 >= MIN_UNIT_AREA_M2,
                        ">= 10",
                    )
                })
                .map_err(|source| ValidationError::Typology {
                    index,
                    name: t.name.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    fn validate_parking(&self) -> Result<(), ValidationError> {
        let k = &self.parking;
        check("stalls_per_unit", k.stalls_per_unit, k.stalls_per_unit >= 0.0, ">= 0")?;
        check(
            "visitor_share",
            k.visitor_share,
            (0.0..1.0).contains(&k.visitor_share),
            "in [0, 1)",
        )?;
        check(
            "area_per_stall_basement_m2",
            k.area_per_stall_basement_m2,
            k.area_per_stall_basement_m2 > 0.0,
            "> 0",
        )?;
        check(
            "area_per_stall_surface_m2",
            k.area_per_stall_surface_m2,
            k.area_per_stall_surface_m2 > 0.0,
            "> 0",
        )?;
        for (field, eff) in [
            ("basement_efficiency_1level", k.basement_efficiency_1level),
            ("basement_efficiency_2level", k.basement_efficiency_2level),
        ] {
            check(field, eff, eff > 0.0 && eff <= 1.0, "in (0, 1]")?;
        }
        check(
            "ramp_and_technical_area_m2",
            k.ramp_and_technical_area_m2,
            k.ramp_and_technical_area_m2 >= 0.0,
            ">= 0",
        )?;
        check(
            "surface_area_multiplier",
            k.surface_area_multiplier,
            k.surface_area_multiplier >= 1.0,
            ">= 1",
        )?;
        Ok(())
    }

    /// Unit and stall counts derived from the inputs must fit the result.
    fn validate_counts(&self) -> Result<(), ValidationError> {
        let m = &self.massing;
        let nfa_m2 = f64::from(m.lamel_count)
            * m.lamel_length_m
            * m.lamel_width_m
            * f64::from(m.above_ground_floors)
            * m.net_to_gross_ratio;
        check(
            "net_floor_area_m2",
            nfa_m2,
            nfa_m2 / MIN_UNIT_AREA_M2 <= MAX_COUNT,
            "at most 4294967295 units of 10 m²",
        )?;

        let units = match (self.program.mode, self.program.manual_unit_count) {
            (UnitsMode::Manual, Some(n)) => f64::from(n),
            _ => (nfa_m2 / MIN_UNIT_AREA_M2).floor().max(1.0),
        };
        let stalls = units * self.parking.stalls_per_unit;
        check(
            "stalls_per_unit",
            self.parking.stalls_per_unit,
            stalls.is_finite() && stalls <= MAX_COUNT,
            "a stall demand of at most 4294967295",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_project_is_valid() {
        assert_eq!(ProjectInputs::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_parcel() {
        let mut inputs = ProjectInputs::default();
        inputs.parcel_area_m2 = 0.0;
        let err = inputs.validate().unwrap_err();
        assert_eq!(err.field(), "parcel_area_m2");
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let mut inputs = ProjectInputs::default();
        inputs.massing.lamel_width_m = f64::NAN;
        assert_eq!(inputs.validate().unwrap_err().field(), "lamel_width_m");

        let mut inputs = ProjectInputs::default();
        inputs.costs.sales_price_per_m2_nfa = f64::INFINITY;
        assert_eq!(
            inputs.validate().unwrap_err().field(),
            "sales_price_per_m2_nfa"
        );
    }

    #[test]
    fn manual_mode_requires_a_count() {
        let mut inputs = ProjectInputs::default();
        inputs.program.mode = UnitsMode::Manual;
        inputs.program.manual_unit_count = None;
        assert_eq!(
            inputs.validate(),
            Err(ValidationError::Missing {
                field: "manual_unit_count"
            })
        );

        inputs.program.manual_unit_count = Some(0);
        assert_eq!(inputs.validate().unwrap_err().field(), "manual_unit_count");

        inputs.program.manual_unit_count = Some(40);
        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn stall_demand_must_fit_the_count_range() {
        let mut inputs = ProjectInputs::default();
        inputs.program.mode = UnitsMode::Manual;
        inputs.program.manual_unit_count = Some(u32::MAX);
        inputs.parking.stalls_per_unit = 2.0;
        assert_eq!(
            inputs.validate(),
            Err(ValidationError::OutOfRange {
                field: "stalls_per_unit",
                value: 2.0,
                expected: "a stall demand of at most 4294967295",
            })
        );

        inputs.parking.stalls_per_unit = 1.0;
        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn oversized_massing_is_rejected() {
        let mut inputs = ProjectInputs::default();
        inputs.massing.lamel_length_m = 1e12;
        assert_eq!(inputs.validate().unwrap_err().field(), "net_floor_area_m2");
    }

    #[test]
    fn visitor_share_must_stay_below_one() {
        let mut inputs = ProjectInputs::default();
        inputs.parking.visitor_share = 1.0;
        assert_eq!(inputs.validate().unwrap_err().field(), "visitor_share");
    }

    #[test]
    fn reports_offending_typology() {
        let mut inputs = ProjectInputs::default();
        inputs.program.typologies[2].avg_unit_m2 = 8.0;
        let err = inputs.validate().unwrap_err();
        assert!(matches!(err, ValidationError::Typology { index: 2, .. }));
        assert_eq!(err.field(), "avg_unit_m2");
    }

    #[test]
    fn parses_enum_tags() {
        assert_eq!(
            "basement_1_plus_surface".parse::<ParkingScenario>(),
            Ok(ParkingScenario::Basement1PlusSurface)
        );
        assert_eq!("MANUAL".parse::<UnitsMode>(), Ok(UnitsMode::Manual));
        assert!(matches!(
            "K-3".parse::<ParkingScenario>(),
            Err(ValidationError::UnknownVariant {
                field: "parking_scenario",
                ..
            })
        ));
    }

    #[test]
    fn scenario_cycle_visits_every_variant() {
        let mut s = ParkingScenario::Basement1;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(s);
            s = s.next();
        }
        assert_eq!(seen, ParkingScenario::ALL.to_vec());
        assert_eq!(s, ParkingScenario::Basement1);
    }
}
