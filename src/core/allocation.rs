use super::error::{EngineError, EngineResult};
use super::types::{AllocationProfile, RiskProfile};

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

const MIN_EQUITY: f64 = 20.0;
const MAX_EQUITY: f64 = 80.0;
const RISK_TILT: f64 = 10.0;

const LARGE_CAP_SHARE: f64 = 0.60;
const MID_CAP_SHARE: f64 = 0.25;
const SMALL_CAP_SHARE: f64 = 0.15;

/// Age-based equity/debt split, tilted by risk appetite.
///
/// Equity starts at `100 - age` bounded to [20, 80]; conservative investors drop
/// ten points and aggressive ones add ten, staying inside the same bounds.
pub fn allocate(age: u32, risk_profile: RiskProfile) -> EngineResult<AllocationProfile> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(EngineError::invalid(
            "age",
            format!("must be between {MIN_AGE} and {MAX_AGE}, got {age}"),
        ));
    }

    let base = (100.0 - age as f64).clamp(MIN_EQUITY, MAX_EQUITY);
    let equity_percent = match risk_profile {
        RiskProfile::Conservative => (base - RISK_TILT).max(MIN_EQUITY),
        RiskProfile::Moderate => base,
        RiskProfile::Aggressive => (base + RISK_TILT).min(MAX_EQUITY),
    };

    Ok(AllocationProfile {
        age,
        risk_profile,
        equity_percent,
        debt_percent: 100.0 - equity_percent,
        large_cap_percent: equity_percent * LARGE_CAP_SHARE,
        mid_cap_percent: equity_percent * MID_CAP_SHARE,
        small_cap_percent: equity_percent * SMALL_CAP_SHARE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{Just, prop_assert, prop_oneof, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn moderate_thirty_year_old_gets_seventy_thirty() {
        let profile = allocate(30, RiskProfile::Moderate).expect("valid age");
        assert_approx(profile.equity_percent, 70.0);
        assert_approx(profile.debt_percent, 30.0);
        assert_approx(profile.large_cap_percent, 42.0);
        assert_approx(profile.mid_cap_percent, 17.5);
        assert_approx(profile.small_cap_percent, 10.5);
    }

    #[test]
    fn risk_tilt_moves_equity_by_ten_points() {
        let conservative = allocate(40, RiskProfile::Conservative).expect("valid age");
        let aggressive = allocate(40, RiskProfile::Aggressive).expect("valid age");
        assert_approx(conservative.equity_percent, 50.0);
        assert_approx(aggressive.equity_percent, 70.0);
    }

    #[test]
    fn equity_is_capped_for_young_investors() {
        let aggressive = allocate(18, RiskProfile::Aggressive).expect("valid age");
        assert_approx(aggressive.equity_percent, 80.0);
        let conservative = allocate(18, RiskProfile::Conservative).expect("valid age");
        assert_approx(conservative.equity_percent, 70.0);
    }

    #[test]
    fn equity_is_floored_for_older_investors() {
        let conservative = allocate(95, RiskProfile::Conservative).expect("valid age");
        assert_approx(conservative.equity_percent, 20.0);
        let aggressive = allocate(95, RiskProfile::Aggressive).expect("valid age");
        assert_approx(aggressive.equity_percent, 30.0);
    }

    #[test]
    fn rejects_ages_outside_supported_range() {
        let err = allocate(17, RiskProfile::Moderate).expect_err("too young");
        assert!(matches!(err, EngineError::InvalidArgument { field: "age", .. }));
        assert!(allocate(101, RiskProfile::Moderate).is_err());
    }

    #[test]
    fn every_age_and_profile_keeps_allocation_sums() {
        for age in MIN_AGE..=MAX_AGE {
            for risk in [
                RiskProfile::Conservative,
                RiskProfile::Moderate,
                RiskProfile::Aggressive,
            ] {
                let p = allocate(age, risk).expect("valid age");
                assert_approx(p.equity_percent + p.debt_percent, 100.0);
                assert_approx(
                    p.large_cap_percent + p.mid_cap_percent + p.small_cap_percent,
                    p.equity_percent,
                );
            }
        }
    }

    proptest! {
        #[test]
        fn prop_equity_stays_within_bounds(
            age in MIN_AGE..=MAX_AGE,
            risk in prop_oneof![
                Just(RiskProfile::Conservative),
                Just(RiskProfile::Moderate),
                Just(RiskProfile::Aggressive)
            ]
        ) {
            let p = allocate(age, risk).expect("valid age");
            prop_assert!((MIN_EQUITY..=MAX_EQUITY).contains(&p.equity_percent));
            prop_assert!(p.debt_percent >= 100.0 - MAX_EQUITY);
        }
    }
}
