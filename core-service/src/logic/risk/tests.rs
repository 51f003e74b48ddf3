//! Interpreter tests

#[cfg(test)]
mod interpreter_tests {
    use crate::logic::dataset::BiometricRecord;
    use crate::logic::risk::{
        interpret, interpret_votes, score_from_probability, score_from_votes, select_reason,
    };
    use crate::logic::risk::{RiskReason, RiskTier};

    fn record(age: i64, failures: i64) -> BiometricRecord {
        BiometricRecord::new(age, 3, 1, 80, "Fingerprint", 200, failures)
    }

    // ------------------------------------------------------------------------
    // Tier boundaries
    // ------------------------------------------------------------------------

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_score(100), RiskTier::Critical);
        assert_eq!(RiskTier::from_score(75), RiskTier::Critical);
        assert_eq!(RiskTier::from_score(74), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(50), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(49), RiskTier::Safe);
        assert_eq!(RiskTier::from_score(0), RiskTier::Safe);
    }

    #[test]
    fn test_exact_probabilities_hit_boundaries() {
        let r = record(30, 0);

        let critical = interpret(0.75, &r);
        assert_eq!(critical.score, 75);
        assert_eq!(critical.tier, RiskTier::Critical);

        let moderate = interpret(0.5, &r);
        assert_eq!(moderate.score, 50);
        assert_eq!(moderate.tier, RiskTier::Moderate);

        let safe = interpret(0.495, &r);
        assert_eq!(safe.score, 49);
        assert_eq!(safe.tier, RiskTier::Safe);
    }

    #[test]
    fn test_score_mapping() {
        assert_eq!(score_from_probability(0.0), 0);
        assert_eq!(score_from_probability(0.999), 99);
        assert_eq!(score_from_probability(1.0), 100);
        assert_eq!(score_from_probability(1.7), 100);
        assert_eq!(score_from_probability(-0.2), 0);
        assert_eq!(score_from_probability(f64::NAN), 0);
    }

    #[test]
    fn test_vote_score_is_exact() {
        // 116 / 200 is 0.58, which floors to 57 in floating point
        assert_eq!(score_from_votes(116, 200), 58);
        for positive in 0..=200 {
            assert_eq!(usize::from(score_from_votes(positive, 200)), positive / 2);
        }
        assert_eq!(score_from_votes(2, 3), 66);
        assert_eq!(score_from_votes(5, 5), 100);
        assert_eq!(score_from_votes(9, 5), 100);
        assert_eq!(score_from_votes(0, 0), 0);
    }

    #[test]
    fn test_interpret_votes() {
        let r = record(30, 0);

        let moderate = interpret_votes(116, 200, &r);
        assert_eq!(moderate.score, 58);
        assert_eq!(moderate.tier, RiskTier::Moderate);
        assert_eq!(moderate.probability, 0.58);

        let critical = interpret_votes(150, 200, &r);
        assert_eq!(critical.score, 75);
        assert_eq!(critical.tier, RiskTier::Critical);
        assert_eq!(critical.reason, Some(RiskReason::MultipleFactors));

        let safe = interpret_votes(99, 200, &r);
        assert_eq!(safe.score, 49);
        assert_eq!(safe.tier, RiskTier::Safe);

        let empty = interpret_votes(0, 0, &r);
        assert_eq!(empty.score, 0);
        assert_eq!(empty.probability, 0.0);
    }

    // ------------------------------------------------------------------------
    // Advice
    // ------------------------------------------------------------------------

    #[test]
    fn test_advice_by_tier() {
        let r = record(30, 0);

        let critical = interpret(0.9, &r);
        assert_eq!(critical.reason, Some(RiskReason::MultipleFactors));
        assert_eq!(
            critical.advice,
            "Reason: Multiple Factors. Action: Immediate Biometric Update Required."
        );
        assert_eq!(critical.score_display(), "90/100");

        let moderate = interpret(0.6, &record(70, 4));
        assert_eq!(moderate.reason, None);
        assert_eq!(
            moderate.advice,
            "Reason: Digital Dormancy / Hardware Risk. Action: Advisory Sent. Check Mobile Link."
        );

        let safe = interpret(0.1, &record(70, 4));
        assert_eq!(safe.reason, None);
        assert_eq!(safe.advice, "No Action Needed.");
        assert_eq!(safe.score_display(), "10/100");
    }

    #[test]
    fn test_reason_priority() {
        assert_eq!(select_reason(&record(60, 4)), RiskReason::AgingDecay);
        assert_eq!(select_reason(&record(15, 4)), RiskReason::MissedAdolescentUpdate);
        assert_eq!(select_reason(&record(18, 0)), RiskReason::MissedAdolescentUpdate);
        assert_eq!(select_reason(&record(19, 3)), RiskReason::FrictionWear);
        assert_eq!(select_reason(&record(14, 2)), RiskReason::MultipleFactors);
        // Out-of-domain ages still get a best-effort reason
        assert_eq!(select_reason(&record(-4, 0)), RiskReason::MultipleFactors);
    }

    /// Same probability, different ages: status and score agree, reasons differ
    #[test]
    fn test_explanation_independent_of_model() {
        let senior = interpret(0.8, &record(65, 0));
        let teen = interpret(0.8, &record(16, 0));

        assert_eq!(senior.tier, teen.tier);
        assert_eq!(senior.score, teen.score);
        assert_eq!(senior.reason, Some(RiskReason::AgingDecay));
        assert_eq!(teen.reason, Some(RiskReason::MissedAdolescentUpdate));
        assert_ne!(senior.advice, teen.advice);
    }

    #[test]
    fn test_tier_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskTier::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(RiskTier::Moderate.to_string(), "MODERATE");
    }
}
