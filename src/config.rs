//! Machine configuration.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: '{value}' is not a valid count")]
    Invalid { var: &'static str, value: String },
    #[error("a machine needs at least one shelf")]
    NoShelves,
}

/// Fixed dimensions of a machine, set once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of shelf slots
    pub shelves: usize,
    /// How many coins of one denomination the coin box holds
    pub max_coins_per_denomination: u32,
    /// How many items a shelf holds when fully stocked
    pub max_products_per_shelf: usize,
    /// Coins of every denomination loaded at start-up by the CLI
    pub initial_coins: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            shelves: 5,
            max_coins_per_denomination: 100,
            max_products_per_shelf: 4,
            initial_coins: 10,
        }
    }
}

impl MachineConfig {
    /// Defaults overridden by the environment.
    ///
    /// - `VENDING_SHELVES`
    /// - `VENDING_MAX_COINS`
    /// - `VENDING_MAX_PRODUCTS`
    /// - `VENDING_INITIAL_COINS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = read(&lookup, "VENDING_SHELVES")? {
            config.shelves = v as usize;
        }
        if let Some(v) = read(&lookup, "VENDING_MAX_COINS")? {
            config.max_coins_per_denomination = v;
        }
        if let Some(v) = read(&lookup, "VENDING_MAX_PRODUCTS")? {
            config.max_products_per_shelf = v as usize;
        }
        if let Some(v) = read(&lookup, "VENDING_INITIAL_COINS")? {
            config.initial_coins = v;
        }

        if config.shelves == 0 {
            return Err(ConfigError::NoShelves);
        }
        Ok(config)
    }
}

fn read(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u32>, ConfigError> {
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value })
        })
        .transpose()
}
