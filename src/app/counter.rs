//! The number page: a single integer driven by named commands.

use crate::utils::error::{CatalogError, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

type Subscriber<T> = Box<dyn FnMut(&T) + Send>;

/// A value that tells its subscribers when it changes.
pub struct ObservableValue<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T: PartialEq + Clone> ObservableValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Returns `true` when the value actually changed; only then are
    /// subscribers notified.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.value);
        }
        true
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }
}

pub const GENERATED_MIN: i64 = 0;
pub const GENERATED_MAX: i64 = 100;

pub struct NumberGenerator {
    rng: SmallRng,
}

impl NumberGenerator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> i64 {
        self.rng.random_range(GENERATED_MIN..=GENERATED_MAX)
    }
}

impl Default for NumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

type Handler<T> = Box<dyn FnMut(&mut T) + Send>;

/// Handlers keyed by UI action name.
pub struct CommandMap<T> {
    handlers: BTreeMap<String, Handler<T>>,
}

impl<T> CommandMap<T> {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, action: impl Into<String>, handler: F)
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        self.handlers.insert(action.into(), Box::new(handler));
    }

    pub fn execute(&mut self, action: &str, target: &mut T) -> Result<()> {
        match self.handlers.get_mut(action) {
            Some(handler) => {
                handler(target);
                Ok(())
            }
            None => Err(CatalogError::config(format!(
                "Unknown action '{}'. Available actions: {}",
                action,
                self.actions().join(", ")
            ))),
        }
    }

    pub fn actions(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}

impl<T> Default for CommandMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CounterState {
    pub value: ObservableValue<i64>,
    generator: NumberGenerator,
}

pub struct CounterViewModel {
    state: CounterState,
    commands: CommandMap<CounterState>,
}

impl CounterViewModel {
    pub fn new() -> Self {
        Self::with_generator(NumberGenerator::new())
    }

    pub fn with_generator(generator: NumberGenerator) -> Self {
        let mut commands = CommandMap::new();
        commands.register("generate", |state: &mut CounterState| {
            let next = state.generator.generate();
            state.value.set(next);
        });
        commands.register("increment", |state: &mut CounterState| {
            let next = state.value.get() + 1;
            state.value.set(next);
        });

        Self {
            state: CounterState {
                value: ObservableValue::new(0),
                generator,
            },
            commands,
        }
    }

    pub fn value(&self) -> i64 {
        self.state.value.get()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&i64) + Send + 'static,
    {
        self.state.value.subscribe(subscriber);
    }

    pub fn execute(&mut self, action: &str) -> Result<()> {
        tracing::debug!("Counter action: {}", action);
        self.commands.execute(action, &mut self.state)
    }

    pub fn actions(&self) -> Vec<&str> {
        self.commands.actions()
    }
}

impl Default for CounterViewModel {
    fn default() -> Self {
        Self::new()
    }
}
