//! Stat and resource keys the engine interprets.
//!
//! Stat maps are open-ended (`String -> i64`); content may define any keys.
//! Only the keys below carry meaning inside the damage and heal pipelines
//! and the resource-tick pass.

/// Critical-hit chance, compared against a roll in `[0, 100)`.
pub const CRIT_CHANCE: &str = "crit_chance";

/// Additive outgoing damage bonus, in percent.
pub const AMPLIFY: &str = "amplify";

/// Incoming damage reduction, in percent, clamped to `[0, 100]`.
pub const PROTECTION: &str = "protection";

/// Flat bonus added to heals.
pub const MATK: &str = "matk";

/// Resource-tick key for health.
pub const HP: &str = "hp";

/// Resource-tick key for mana.
pub const MANA: &str = "mana";
