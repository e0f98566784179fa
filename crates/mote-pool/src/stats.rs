//! Character stats carried by particle colliders.
//!
//! When a pool is configured with a stats payload, every spawned proxy gets
//! its own copy, so whatever a particle hits can read the attacker's numbers
//! straight off the collider.

use serde::{Deserialize, Serialize};

/// Offensive stats copied onto spawned proxies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    /// Base attack power.
    pub attack: f32,
    /// Base defense value.
    pub defense: f32,
    /// Critical hit chance (0.0-1.0).
    pub crit_chance: f32,
    /// Critical hit damage multiplier.
    pub crit_multiplier: f32,
    /// Knockback impulse applied on hit.
    pub knockback: f32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            attack: 10.0,
            defense: 5.0,
            crit_chance: 0.05,
            crit_multiplier: 2.0,
            knockback: 0.0,
        }
    }
}

impl CharacterStats {
    /// Create new stats with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attack power.
    #[must_use]
    pub fn with_attack(mut self, attack: f32) -> Self {
        self.attack = attack;
        self
    }

    /// Set crit chance.
    #[must_use]
    pub fn with_crit_chance(mut self, chance: f32) -> Self {
        self.crit_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Set knockback impulse.
    #[must_use]
    pub fn with_knockback(mut self, knockback: f32) -> Self {
        self.knockback = knockback.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_clamps() {
        let stats = CharacterStats::new()
            .with_attack(20.0)
            .with_crit_chance(3.0)
            .with_knockback(-1.0);
        assert_eq!(stats.attack, 20.0);
        assert_eq!(stats.crit_chance, 1.0);
        assert_eq!(stats.knockback, 0.0);
    }
}
