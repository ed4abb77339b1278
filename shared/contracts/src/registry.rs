//! Value generator registry
//!
//! Maps a field's value type to a random value producer. Calendar types are
//! registered up front because a uniform draw over their full range needs
//! explicit handling; every other type falls back to the default producer.
//! The registry is an owned object handed to the verifier, so tests can
//! inject fixed generators and a fixed seed.

use beanwise_models::{Value, ValueType};
use beanwise_utils::{log_info, GeneratorSettings};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

pub type ValueGenerator = Box<dyn Fn(&mut StdRng) -> Value + Send + Sync>;

/// Upper bound (exclusive) of the magnitude of generated numbers.
const NUMERIC_MAGNITUDE: i32 = 1_000_000;

pub struct GeneratorRegistry {
    generators: HashMap<ValueType, ValueGenerator>,
    rng: Mutex<StdRng>,
    text_length: usize,
}

impl GeneratorRegistry {
    /// A registry with the calendar generators installed.
    pub fn new(settings: &GeneratorSettings) -> Self {
        let mut registry = Self::without_builtins(settings);
        registry
            .register(ValueType::LocalDateTime, |rng| Value::LocalDateTime(random_date_time(rng)))
            .register(ValueType::LocalDate, |rng| Value::LocalDate(random_date(rng)));
        registry
    }

    /// A registry where every type uses the default producer.
    pub fn without_builtins(settings: &GeneratorSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            generators: HashMap::new(),
            rng: Mutex::new(rng),
            text_length: settings.text_length,
        }
    }

    /// Installs a producer for `value_type`, replacing any earlier one, so
    /// registering the same producer twice is harmless.
    ///
    /// Producers run while the shared random source is locked: they must not
    /// block or call back into this registry.
    pub fn register<F>(&mut self, value_type: ValueType, generator: F) -> &mut Self
    where
        F: Fn(&mut StdRng) -> Value + Send + Sync + 'static,
    {
        log_info!("Registered value generator for {}", value_type);
        self.generators.insert(value_type, Box::new(generator));
        self
    }

    pub fn contains(&self, value_type: &ValueType) -> bool {
        self.generators.contains_key(value_type)
    }

    pub fn generate(&self, value_type: &ValueType) -> Value {
        let mut rng = self.rng();
        match self.generators.get(value_type) {
            Some(generator) => generator(&mut *rng),
            None => default_value(value_type, self.text_length, &mut *rng),
        }
    }

    /// A value of `value_type` different from `current`, or `None` when
    /// `attempts` draws all produced `current`.
    pub fn generate_distinct(&self, value_type: &ValueType, current: &Value, attempts: u32) -> Option<Value> {
        (0..attempts)
            .map(|_| self.generate(value_type))
            .find(|candidate| candidate != current)
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panicking generator leaves the generator state intact.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new(&GeneratorSettings::default())
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<String> = self.generators.keys().map(ToString::to_string).collect();
        registered.sort();

        f.debug_struct("GeneratorRegistry")
            .field("registered", &registered)
            .field("text_length", &self.text_length)
            .finish()
    }
}

/// Any instant between the smallest and largest representable date-time,
/// drawn as a uniform offset in seconds.
pub fn random_date_time(rng: &mut StdRng) -> NaiveDateTime {
    let span = NaiveDateTime::MAX
        .signed_duration_since(NaiveDateTime::MIN)
        .num_seconds();
    let offset = rng.gen_range(0..span);

    NaiveDateTime::MIN
        .checked_add_signed(Duration::seconds(offset))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Any date from the epoch up to the largest representable date.
pub fn random_date(rng: &mut StdRng) -> NaiveDate {
    let epoch = NaiveDate::default();
    let span = NaiveDate::MAX.signed_duration_since(epoch).num_days();
    let offset = rng.gen_range(0..span);

    epoch
        .checked_add_signed(Duration::days(offset))
        .unwrap_or(epoch)
}

/// Fallback producer for types without a registered generator.
fn default_value(value_type: &ValueType, text_length: usize, rng: &mut StdRng) -> Value {
    match value_type {
        ValueType::Integer => {
            let magnitude = rng.gen_range(1..NUMERIC_MAGNITUDE);
            Value::Integer(signed(rng, magnitude))
        }
        ValueType::Long => {
            let magnitude = rng.gen_range(1..i64::from(NUMERIC_MAGNITUDE));
            Value::Long(signed(rng, magnitude))
        }
        ValueType::Double => {
            let magnitude = rng.gen_range(1.0..f64::from(NUMERIC_MAGNITUDE));
            Value::Double(signed(rng, magnitude))
        }
        ValueType::Boolean => Value::Boolean(rng.gen()),
        ValueType::Text => Value::Text(alphanumeric(rng, text_length)),
        ValueType::LocalDate => Value::LocalDate(random_date(rng)),
        ValueType::LocalDateTime => Value::LocalDateTime(random_date_time(rng)),
        ValueType::Named(type_name) => Value::Named {
            type_name: type_name.clone(),
            text: alphanumeric(rng, text_length),
        },
    }
}

fn signed<T: std::ops::Neg<Output = T>>(rng: &mut StdRng, magnitude: T) -> T {
    if rng.gen() {
        magnitude
    } else {
        -magnitude
    }
}

fn alphanumeric(rng: &mut StdRng, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length.max(1))
        .map(char::from)
        .collect()
}
