use super::{ParkingScenario, UnitsMode};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassingResult {
    pub building_footprint_m2: f64,
    pub floors: u32,
    pub btp_above_m2: f64,
    pub nfa_m2: f64,
    pub avg_unit_m2: f64,
    pub units_auto: u32,
}

/// Traffic-light reading of how much headroom is left below a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReserveBand {
    Exceeded,
    Tight,
    Comfortable,
}

/// FI check: above-ground BTP against `fi_limit × parcel`. Basements do not count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCheck {
    pub limit: f64,
    pub achieved: f64,
    pub allowed_btp_m2: f64,
    pub reserve_btp_m2: f64,
    pub band: ReserveBand,
    pub ok: bool,
}

/// FZ check: building footprint against `fz_limit × parcel`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageCheck {
    pub limit: f64,
    pub achieved: f64,
    pub max_footprint_m2: f64,
    pub reserve_m2: f64,
    pub band: ReserveBand,
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypologyUnits {
    pub name: String,
    pub share_pct: f64,
    pub avg_unit_m2: f64,
    pub units: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitsResult {
    pub count: u32,
    pub source: UnitsMode,
    pub auto_suggestion: u32,
    pub by_typology: Vec<TypologyUnits>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingResult {
    pub scenario: ParkingScenario,
    pub stalls_total: u32,
    pub stalls_resident: u32,
    pub stalls_visitor: u32,
    pub stalls_in_basement: u32,
    pub stalls_on_surface: u32,
    pub basement_levels: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasementResult {
    pub levels: u32,
    pub efficiency: f64,
    pub garage_area_total_m2: f64,
    pub footprint_m2: f64,
    /// The uncapped footprint was larger than the parcel.
    pub capped_at_parcel: bool,
    pub surface_parking_area_m2: f64,
    pub exceeds_building_footprint: bool,
}

/// FZP check: residual growing area against the minimum fraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreenCheck {
    pub min_fraction: f64,
    pub growing_area_m2: f64,
    pub achieved: f64,
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComplianceStatus {
    #[serde(rename = "NONCOMPLIANT_FI")]
    NoncompliantFi,
    #[serde(rename = "NONCOMPLIANT_FZ")]
    NoncompliantFz,
    #[serde(rename = "NONCOMPLIANT_FZP")]
    NoncompliantFzp,
    #[serde(rename = "OPTIMAL")]
    Optimal,
    #[serde(rename = "BORDERLINE_COMPROMISE")]
    BorderlineCompromise,
    #[serde(rename = "CONDITIONAL_OK")]
    ConditionalOk,
    #[serde(rename = "RISKY_FZP_BECOMES_LIMITING")]
    RiskyFzpBecomesLimiting,
}

/// The planning factor a non-compliant project fails first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Factor {
    #[serde(rename = "FI")]
    Fi,
    #[serde(rename = "FZ")]
    Fz,
    #[serde(rename = "FZP")]
    Fzp,
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fi => "FI",
            Self::Fz => "FZ",
            Self::Fzp => "FZP",
        })
    }
}

impl ComplianceStatus {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::NoncompliantFi => "NONCOMPLIANT_FI",
            Self::NoncompliantFz => "NONCOMPLIANT_FZ",
            Self::NoncompliantFzp => "NONCOMPLIANT_FZP",
            Self::Optimal => "OPTIMAL",
            Self::BorderlineCompromise => "BORDERLINE_COMPROMISE",
            Self::ConditionalOk => "CONDITIONAL_OK",
            Self::RiskyFzpBecomesLimiting => "RISKY_FZP_BECOMES_LIMITING",
        }
    }

    #[must_use]
    pub fn limiting_factor(self) -> Option<Factor> {
        match self {
            Self::NoncompliantFi => Some(Factor::Fi),
            Self::NoncompliantFz => Some(Factor::Fz),
            Self::NoncompliantFzp => Some(Factor::Fzp),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_compliant(self) -> bool {
        self.limiting_factor().is_none()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoncompliantFi => "Non-compliant (FI)",
            Self::NoncompliantFz => "Non-compliant (FZ)",
            Self::NoncompliantFzp => "Non-compliant (FZP)",
            Self::Optimal => "Optimal",
            Self::BorderlineCompromise => "Borderline / compromise",
            Self::ConditionalOk => "Conditional (may be OK)",
            Self::RiskyFzpBecomesLimiting => "Risky (FZP becomes limiting)",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsResult {
    pub land_cost: f64,
    pub btp_below_m2: f64,
    pub hard_cost: f64,
    pub soft_cost: f64,
    pub total_invest: f64,
    pub cost_per_m2_nfa: f64,
    pub revenue: f64,
    pub margin_abs: f64,
    /// Fraction of revenue, 0 when there is no revenue.
    pub margin_pct: f64,
}

/// Everything one evaluation derives. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub parcel_area_m2: f64,
    pub massing: MassingResult,
    pub fi: DensityCheck,
    pub fz: CoverageCheck,
    pub units: UnitsResult,
    pub parking: ParkingResult,
    pub basement: BasementResult,
    pub fzp: GreenCheck,
    pub status: ComplianceStatus,
    pub economics: EconomicsResult,
}
