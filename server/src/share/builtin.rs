//! Built-in sharable categories using bitflags.
//!
//! Categories are organized into families:
//! - Inventory (bits 0-3): item containers carried by the player
//! - Stats (bits 4-11): health, food, air and status effects
//! - Experience (bits 12-14): experience progress and levels
//! - Location (bits 15-16): respawn and last known position
//! - Economy (bit 17): account balance
//! - Hazards (bit 18): fire ticks

use bitflags::bitflags;

bitflags! {
    /// Built-in share categories represented as a 32-bit bitfield.
    ///
    /// Each single flag is one category with a stable config name (see
    /// [`Sharables::name`]).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Sharables: u32 {
        // === Inventory (bits 0-3) ===
        /// Main inventory contents
        const INVENTORY        = 1 << 0;
        /// Worn armor
        const ARMOR            = 1 << 1;
        /// Off-hand slot
        const OFFHAND          = 1 << 2;
        /// Ender chest contents
        const ENDER_CHEST      = 1 << 3;

        // === Stats (bits 4-11) ===
        /// Current health
        const HEALTH           = 1 << 4;
        /// Food level
        const HUNGER           = 1 << 5;
        /// Food saturation
        const SATURATION       = 1 << 6;
        /// Food exhaustion
        const EXHAUSTION       = 1 << 7;
        /// Remaining air
        const REMAINING_AIR    = 1 << 8;
        /// Maximum air
        const MAX_AIR          = 1 << 9;
        /// Accumulated fall distance
        const FALL_DISTANCE    = 1 << 10;
        /// Active potion effects
        const POTIONS          = 1 << 11;

        // === Experience (bits 12-14) ===
        /// Progress towards the next level
        const EXPERIENCE       = 1 << 12;
        /// Current level
        const LEVEL            = 1 << 13;
        /// Lifetime experience total
        const TOTAL_EXPERIENCE = 1 << 14;

        // === Location (bits 15-16) ===
        /// Bed spawn point
        const BED_SPAWN        = 1 << 15;
        /// Last location in the world
        const LAST_LOCATION    = 1 << 16;

        // === Economy (bit 17) ===
        /// Economy balance
        const ECONOMY          = 1 << 17;

        // === Hazards (bit 18) ===
        /// Remaining fire ticks
        const FIRE_TICKS       = 1 << 18;
    }
}

/// Config names of every single built-in flag, in bit order.
const NAMES: &[(&str, Sharables)] = &[
    ("inventory", Sharables::INVENTORY),
    ("armor", Sharables::ARMOR),
    ("offhand", Sharables::OFFHAND),
    ("ender_chest", Sharables::ENDER_CHEST),
    ("health", Sharables::HEALTH),
    ("hunger", Sharables::HUNGER),
    ("saturation", Sharables::SATURATION),
    ("exhaustion", Sharables::EXHAUSTION),
    ("remaining_air", Sharables::REMAINING_AIR),
    ("max_air", Sharables::MAX_AIR),
    ("fall_distance", Sharables::FALL_DISTANCE),
    ("potions", Sharables::POTIONS),
    ("experience", Sharables::EXPERIENCE),
    ("level", Sharables::LEVEL),
    ("total_experience", Sharables::TOTAL_EXPERIENCE),
    ("bed_spawn", Sharables::BED_SPAWN),
    ("last_location", Sharables::LAST_LOCATION),
    ("economy", Sharables::ECONOMY),
    ("fire_ticks", Sharables::FIRE_TICKS),
];

impl Sharables {
    // === Preset Combinations ===

    /// Every stat-like category (`stats` in configuration).
    pub const STATS: Self = Self::HEALTH
        .union(Self::HUNGER)
        .union(Self::SATURATION)
        .union(Self::EXHAUSTION)
        .union(Self::REMAINING_AIR)
        .union(Self::MAX_AIR)
        .union(Self::FALL_DISTANCE)
        .union(Self::FIRE_TICKS)
        .union(Self::POTIONS);

    /// All experience categories (`all_experience` in configuration).
    pub const ALL_EXPERIENCE: Self = Self::EXPERIENCE
        .union(Self::LEVEL)
        .union(Self::TOTAL_EXPERIENCE);

    /// All item containers (`all_inventory` in configuration).
    pub const ALL_INVENTORY: Self = Self::INVENTORY
        .union(Self::ARMOR)
        .union(Self::OFFHAND)
        .union(Self::ENDER_CHEST);

    const PRESETS: &'static [(&'static str, Self)] = &[
        ("stats", Self::STATS),
        ("all_experience", Self::ALL_EXPERIENCE),
        ("all_inventory", Self::ALL_INVENTORY),
    ];

    /// Resolve a config name or preset alias, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldshare_server::share::Sharables;
    ///
    /// assert_eq!(Sharables::from_config_name("Hunger"), Some(Sharables::HUNGER));
    /// assert_eq!(Sharables::from_config_name("all_experience"), Some(Sharables::ALL_EXPERIENCE));
    /// assert_eq!(Sharables::from_config_name("mana"), None);
    /// ```
    #[must_use]
    pub fn from_config_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .chain(Self::PRESETS)
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, flags)| *flags)
    }

    /// Config name of a single flag. `None` for empty or multi-flag values.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(_, flag)| *flag == self)
            .map(|(name, _)| *name)
    }

    /// Whether `name` is taken by a built-in category or preset.
    #[must_use]
    pub fn is_reserved_name(name: &str) -> bool {
        Self::from_config_name(name).is_some()
    }
}

impl Default for Sharables {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_flag_has_a_name() {
        for flag in Sharables::all().iter() {
            assert!(flag.name().is_some(), "{flag:?} has no config name");
        }
        assert_eq!(NAMES.len(), Sharables::all().iter().count());
    }

    #[test]
    fn test_names_round_trip() {
        for (name, flag) in NAMES {
            assert_eq!(Sharables::from_config_name(name), Some(*flag));
            assert_eq!(flag.name(), Some(*name));
        }
    }

    #[test]
    fn test_names_are_snake_case_and_unique() {
        for (i, (name, _)) in NAMES.iter().enumerate() {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "Name '{name}' should be snake_case"
            );
            for (other, _) in &NAMES[i + 1..] {
                assert_ne!(name, other, "Duplicate name {name}");
            }
        }
    }

    #[test]
    fn test_from_config_name_is_case_insensitive() {
        assert_eq!(Sharables::from_config_name("INVENTORY"), Some(Sharables::INVENTORY));
        assert_eq!(Sharables::from_config_name(" ender_chest "), Some(Sharables::ENDER_CHEST));
    }

    #[test]
    fn test_config_names_differ_from_flag_names() {
        // bitflags' own lookup uses the constant name; config lookup does not
        assert_eq!(Sharables::from_name("ENDER_CHEST"), Some(Sharables::ENDER_CHEST));
        assert_eq!(Sharables::from_name("ender_chest"), None);
        assert_eq!(Sharables::from_config_name("ender_chest"), Some(Sharables::ENDER_CHEST));
        assert_eq!(Sharables::from_config_name("all_inventory"), Some(Sharables::ALL_INVENTORY));
    }

    #[test]
    fn test_presets() {
        assert!(Sharables::STATS.contains(Sharables::HEALTH));
        assert!(Sharables::STATS.contains(Sharables::POTIONS));
        assert!(!Sharables::STATS.contains(Sharables::INVENTORY));

        assert_eq!(Sharables::ALL_EXPERIENCE.iter().count(), 3);
        assert!(Sharables::ALL_INVENTORY.contains(Sharables::ENDER_CHEST));

        assert_eq!(Sharables::from_config_name("stats"), Some(Sharables::STATS));
    }

    #[test]
    fn test_multi_flag_has_no_name() {
        assert_eq!(Sharables::STATS.name(), None);
        assert_eq!(Sharables::empty().name(), None);
    }

    #[test]
    fn test_reserved_names() {
        assert!(Sharables::is_reserved_name("economy"));
        assert!(Sharables::is_reserved_name("all_inventory"));
        assert!(!Sharables::is_reserved_name("mana"));
    }
}
