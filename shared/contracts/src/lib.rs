//! # Beanwise Contracts
//!
//! Structural contract checks for discovered bean types and the random
//! value generation they draw their inputs from.

pub mod registry;
pub mod verifier;

pub use registry::{random_date, random_date_time, GeneratorRegistry, ValueGenerator};
pub use verifier::{instantiate, ContractCheck, ContractVerifier, ContractViolation, VerificationReport};

#[cfg(test)]
mod tests {
    use super::*;
    use beanwise_models::{Value, ValueType};
    use beanwise_utils::GeneratorSettings;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_dates_stay_between_epoch_and_max(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let date = random_date(&mut rng);
            prop_assert!(date >= NaiveDate::default());
            prop_assert!(date < NaiveDate::MAX);
        }

        #[test]
        fn prop_date_times_stay_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let instant = random_date_time(&mut rng);
            prop_assert!(instant >= NaiveDateTime::MIN);
            prop_assert!(instant < NaiveDateTime::MAX);
        }

        #[test]
        fn prop_generated_values_match_requested_type(seed in any::<u64>(), text_length in 1usize..40) {
            let registry = GeneratorRegistry::new(&GeneratorSettings { seed: Some(seed), text_length });

            for value_type in [ValueType::Integer, ValueType::Long, ValueType::Double, ValueType::Text] {
                let value = registry.generate(&value_type);
                prop_assert_eq!(value.value_type(), Some(value_type));
            }

            if let Value::Text(text) = registry.generate(&ValueType::Text) {
                prop_assert_eq!(text.len(), text_length);
            }
        }
    }

    #[test]
    fn test_calendar_draws_spread_over_the_range() {
        let mut rng = StdRng::seed_from_u64(17);
        let before_epoch = (0..100)
            .map(|_| random_date_time(&mut rng))
            .filter(|instant| *instant < NaiveDateTime::default())
            .count();

        // The epoch sits near the middle of the representable range.
        assert!(before_epoch > 20 && before_epoch < 80);
    }
}
