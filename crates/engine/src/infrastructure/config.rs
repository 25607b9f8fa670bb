//! Engine configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `MANAWEAVE_ADVANCED_UNLOCK_TIER` | Tier at which advanced skills unlock | `apprentice` |
//! | `MANAWEAVE_MANA_ROUNDING` | Per-day mana rounding: `none`, `floor`, `ceil`, `nearest` | `none` |
//! | `MANAWEAVE_LOG` | Log filter used when `RUST_LOG` is unset | `manaweave_engine=info` |
//!
//! Invalid values are logged and replaced by the default.

use std::str::FromStr;

use manaweave_domain::{CraftingRules, ManaRounding, ProgressionRules};

pub const ADVANCED_UNLOCK_TIER_VAR: &str = "MANAWEAVE_ADVANCED_UNLOCK_TIER";
pub const MANA_ROUNDING_VAR: &str = "MANAWEAVE_MANA_ROUNDING";
pub const LOG_FILTER_VAR: &str = "MANAWEAVE_LOG";

pub const DEFAULT_LOG_FILTER: &str = "manaweave_engine=info";

/// Rules the engine runs with. The log filter is read separately by
/// [`log_filter_from_env`] because tracing must be up before this loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub progression: ProgressionRules,
    pub crafting: CraftingRules,
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup (environment, test map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let advanced_unlock_tier = parse_or_default(
            &lookup,
            ADVANCED_UNLOCK_TIER_VAR,
            defaults.progression.advanced_unlock_tier,
        );
        let mana_rounding: ManaRounding =
            parse_or_default(&lookup, MANA_ROUNDING_VAR, defaults.crafting.mana_rounding);

        Self {
            progression: ProgressionRules {
                advanced_unlock_tier,
                ..defaults.progression
            },
            crafting: CraftingRules { mana_rounding },
        }
    }
}

/// The log filter alone, read before tracing is initialized.
pub fn log_filter_from_env() -> String {
    log_filter_from(&|key: &str| std::env::var(key).ok())
}

fn log_filter_from(lookup: &impl Fn(&str) -> Option<String>) -> String {
    lookup(LOG_FILTER_VAR)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key).filter(|value| !value.trim().is_empty()) else {
        return default;
    };

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                variable = key,
                value = %raw,
                error = %e,
                default = ?default,
                "Invalid configuration value, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manaweave_domain::Tier;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.progression.advanced_unlock_tier, Tier::Apprentice);
        assert_eq!(config.crafting.mana_rounding, ManaRounding::None);
    }

    #[test]
    fn reads_every_variable() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ADVANCED_UNLOCK_TIER_VAR, "Journeyman"),
            (MANA_ROUNDING_VAR, "ceil"),
        ]));

        assert_eq!(config.progression.advanced_unlock_tier, Tier::Journeyman);
        assert_eq!(config.crafting.mana_rounding, ManaRounding::Ceil);
    }

    #[test]
    fn log_filter_defaults_when_unset_or_blank() {
        let set = lookup_from(&[(LOG_FILTER_VAR, " manaweave_engine=debug ")]);
        assert_eq!(log_filter_from(&set), "manaweave_engine=debug");

        let blank = lookup_from(&[(LOG_FILTER_VAR, "   ")]);
        assert_eq!(log_filter_from(&blank), DEFAULT_LOG_FILTER);
        assert_eq!(log_filter_from(&lookup_from(&[])), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ADVANCED_UNLOCK_TIER_VAR, "legendary"),
            (MANA_ROUNDING_VAR, "banker"),
        ]));

        assert_eq!(config, EngineConfig::default());
    }
}
