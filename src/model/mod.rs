pub mod inputs;
pub mod result;

pub use inputs::{
    CostParams, Massing, ParkingParams, ParkingScenario, ProjectInfo, ProjectInputs, Typology,
    UnitProgram, UnitsMode, ZoningLimits,
};
pub use result::{
    BasementResult, ComplianceStatus, CoverageCheck, DensityCheck, EconomicsResult,
    EvaluationResult, Factor, GreenCheck, MassingResult, ParkingResult, ReserveBand,
    TypologyUnits, UnitsResult,
};
