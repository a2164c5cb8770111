use crate::model::{ComplianceStatus, ParkingScenario};

/// Planning-policy verdict. The first failing check wins, in the order
/// FI, FZ, FZP; a compliant project is graded by its parking scenario.
#[must_use]
pub fn classify(
    fi_ok: bool,
    fz_ok: bool,
    fzp_ok: bool,
    scenario: ParkingScenario,
    basement_exceeds_building: bool,
) -> ComplianceStatus {
    if !fi_ok {
        return ComplianceStatus::NoncompliantFi;
    }
    if !fz_ok {
        return ComplianceStatus::NoncompliantFz;
    }
    if !fzp_ok {
        return ComplianceStatus::NoncompliantFzp;
    }

    match scenario {
        ParkingScenario::Basement2 => ComplianceStatus::Optimal,
        ParkingScenario::Basement1PlusSurface => ComplianceStatus::BorderlineCompromise,
        ParkingScenario::Basement1 if basement_exceeds_building => {
            ComplianceStatus::RiskyFzpBecomesLimiting
        }
        ParkingScenario::Basement1 => ComplianceStatus::ConditionalOk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Factor;
    use pretty_assertions::assert_eq;

    #[test]
    fn fi_failure_takes_priority() {
        for scenario in ParkingScenario::ALL {
            for fz_ok in [true, false] {
                for fzp_ok in [true, false] {
                    for exceeds in [true, false] {
                        assert_eq!(
                            classify(false, fz_ok, fzp_ok, scenario, exceeds),
                            ComplianceStatus::NoncompliantFi
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn fz_before_fzp() {
        assert_eq!(
            classify(true, false, false, ParkingScenario::Basement2, false),
            ComplianceStatus::NoncompliantFz
        );
        assert_eq!(
            classify(true, true, false, ParkingScenario::Basement2, false),
            ComplianceStatus::NoncompliantFzp
        );
    }

    #[test]
    fn compliant_projects_graded_by_scenario() {
        let cases = [
            (ParkingScenario::Basement2, true, ComplianceStatus::Optimal),
            (
                ParkingScenario::Basement1PlusSurface,
                true,
                ComplianceStatus::BorderlineCompromise,
            ),
            (
                ParkingScenario::Basement1,
                true,
                ComplianceStatus::RiskyFzpBecomesLimiting,
            ),
            (ParkingScenario::Basement1, false, ComplianceStatus::ConditionalOk),
        ];
        for (scenario, exceeds, expected) in cases {
            let status = classify(true, true, true, scenario, exceeds);
            assert_eq!(status, expected);
            assert!(status.is_compliant());
        }
    }

    #[test]
    fn limiting_factor_matches_status() {
        assert_eq!(
            ComplianceStatus::NoncompliantFz.limiting_factor(),
            Some(Factor::Fz)
        );
        assert_eq!(ComplianceStatus::Optimal.limiting_factor(), None);
        assert_eq!(ComplianceStatus::NoncompliantFzp.tag(), "NONCOMPLIANT_FZP");
    }
}
