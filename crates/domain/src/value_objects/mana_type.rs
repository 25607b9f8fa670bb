//! Mana type identifiers.
//!
//! Three disjoint, closed sets of identifiers: base (primitive), hybrid
//! (composite) and eldritch (tertiary). Each identifier is a lowercase tag
//! with a player-facing label. A fourth tier, force, names the aggregate of a
//! character's unblocked base pools and has no identifiers of its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Tier;

/// The tier a mana type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManaTier {
    Force,
    Base,
    Hybrid,
    Eldritch,
}

impl ManaTier {
    pub fn key(self) -> &'static str {
        match self {
            Self::Force => "force",
            Self::Base => "base",
            Self::Hybrid => "hybrid",
            Self::Eldritch => "eldritch",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Force => "Force",
            Self::Base => "Base",
            Self::Hybrid => "Hybrid",
            Self::Eldritch => "Eldritch",
        }
    }

    /// Tier at which a newly learned ability of this mana category starts.
    ///
    /// Force mana has no abilities of its own.
    pub fn ability_start_tier(self) -> Option<Tier> {
        match self {
            Self::Force => None,
            Self::Base => Some(Tier::Normal),
            Self::Hybrid => Some(Tier::Apprentice),
            Self::Eldritch => Some(Tier::Master),
        }
    }
}

impl fmt::Display for ManaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

macro_rules! define_mana_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $tier:expr, $what:literal,
        { $($variant:ident => ($id:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member, in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable lowercase identifier.
            pub fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }

            /// Player-facing label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn tier(self) -> ManaTier {
                $tier
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.id())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|kind| kind.id() == id)
                    .ok_or_else(|| {
                        DomainError::parse(format!("Unknown {} mana type: {}", $what, s))
                    })
            }
        }
    };
}

define_mana_kind! {
    /// First-tier mana, each tied to one sub-attribute.
    BaseMana, ManaTier::Base, "base",
    {
        Enhancement => ("enhancement", "Enhancement"),
        Wind => ("wind", "Wind"),
        Earth => ("earth", "Earth"),
        Astral => ("astral", "Astral"),
        Light => ("light", "Light"),
        Water => ("water", "Water"),
        Fire => ("fire", "Fire"),
        Shadow => ("shadow", "Shadow"),
        Nature => ("nature", "Nature"),
    }
}

define_mana_kind! {
    /// Second-tier mana, derived from two base types.
    HybridMana, ManaTier::Hybrid, "hybrid",
    {
        // Enhancement hybrids
        Metal => ("metal", "Metal"),
        Gale => ("gale", "Gale"),
        Radiance => ("radiance", "Radiance"),
        Void => ("void", "Void"),
        Inferno => ("inferno", "Inferno"),
        Arcane => ("arcane", "Arcane"),
        Deluge => ("deluge", "Deluge"),
        Wild => ("wild", "Wild"),
        // Wind hybrids
        Sand => ("sand", "Sand"),
        Glass => ("glass", "Glass"),
        Ice => ("ice", "Ice"),
        Lightning => ("lightning", "Lightning"),
        Tempest => ("tempest", "Tempest"),
        // Earth hybrids
        Crystal => ("crystal", "Crystal"),
        Mud => ("mud", "Mud"),
        Obsidian => ("obsidian", "Obsidian"),
        Growth => ("growth", "Growth"),
        // Astral hybrids
        Life => ("life", "Life"),
        Death => ("death", "Death"),
        Dream => ("dream", "Dream"),
        Ignition => ("ignition", "Ignition"),
        Pulse => ("pulse", "Pulse"),
        // Light hybrids
        Renewal => ("renewal", "Renewal"),
        Retribution => ("retribution", "Retribution"),
        Judgement => ("judgement", "Judgement"),
        Harmony => ("harmony", "Harmony"),
        // Water hybrids
        Steam => ("steam", "Steam"),
        Poison => ("poison", "Poison"),
        Regrowth => ("regrowth", "Regrowth"),
        // Fire hybrids
        Ruin => ("ruin", "Ruin"),
        Surge => ("surge", "Surge"),
        // Shadow + Nature
        Blight => ("blight", "Blight"),
    }
}

define_mana_kind! {
    /// Third-tier mana, derived from a hybrid and an added base type.
    EldritchMana, ManaTier::Eldritch, "eldritch",
    {
        // Crystal-derived
        Resonance => ("resonance", "Resonance"),
        Overcharge => ("overcharge", "Overcharge"),
        Null => ("null", "Null"),
        // Mud-derived
        Inertia => ("inertia", "Inertia"),
        Quagmire => ("quagmire", "Quagmire"),
        // Obsidian-derived
        Disjunction => ("disjunction", "Disjunction"),
        Severance => ("severance", "Severance"),
        // Growth-derived
        Overgrowth => ("overgrowth", "Overgrowth"),
        // Steam-derived
        Suspension => ("suspension", "Suspension"),
        // Poison-derived
        Entropy => ("entropy", "Entropy"),
        Exposure => ("exposure", "Exposure"),
        Catalyst => ("catalyst", "Catalyst"),
        Corrosion => ("corrosion", "Corrosion"),
        Necrosis => ("necrosis", "Necrosis"),
        // Ignition-derived
        Mandate => ("mandate", "Mandate"),
        Recursion => ("recursion", "Recursion"),
        Cascade => ("cascade", "Cascade"),
        // Retribution-derived
        Reprisal => ("reprisal", "Reprisal"),
        // Judgement-derived
        Decree => ("decree", "Decree"),
        Sentence => ("sentence", "Sentence"),
        Injunction => ("injunction", "Injunction"),
        Precedent => ("precedent", "Precedent"),
        Sanction => ("sanction", "Sanction"),
        // Ruin-derived
        Catastrophe => ("catastrophe", "Catastrophe"),
        Devastation => ("devastation", "Devastation"),
        Scour => ("scour", "Scour"),
        // Blight-derived
        Sterility => ("sterility", "Sterility"),
    }
}

/// Any concrete mana type, regardless of tier.
///
/// Serializes as its bare identifier (`"metal"`, `"fire"`, ...); identifiers
/// are unique across all three sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ManaType {
    Base(BaseMana),
    Hybrid(HybridMana),
    Eldritch(EldritchMana),
}

impl ManaType {
    pub fn id(self) -> &'static str {
        match self {
            Self::Base(kind) => kind.id(),
            Self::Hybrid(kind) => kind.id(),
            Self::Eldritch(kind) => kind.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Base(kind) => kind.label(),
            Self::Hybrid(kind) => kind.label(),
            Self::Eldritch(kind) => kind.label(),
        }
    }

    pub fn tier(self) -> ManaTier {
        match self {
            Self::Base(_) => ManaTier::Base,
            Self::Hybrid(_) => ManaTier::Hybrid,
            Self::Eldritch(_) => ManaTier::Eldritch,
        }
    }

    /// Every identifier across all three tiers.
    pub fn all() -> impl Iterator<Item = ManaType> {
        BaseMana::ALL
            .iter()
            .map(|k| ManaType::Base(*k))
            .chain(HybridMana::ALL.iter().map(|k| ManaType::Hybrid(*k)))
            .chain(EldritchMana::ALL.iter().map(|k| ManaType::Eldritch(*k)))
    }
}

impl From<BaseMana> for ManaType {
    fn from(kind: BaseMana) -> Self {
        Self::Base(kind)
    }
}

impl From<HybridMana> for ManaType {
    fn from(kind: HybridMana) -> Self {
        Self::Hybrid(kind)
    }
}

impl From<EldritchMana> for ManaType {
    fn from(kind: EldritchMana) -> Self {
        Self::Eldritch(kind)
    }
}

impl fmt::Display for ManaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ManaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(kind) = s.parse::<BaseMana>() {
            return Ok(Self::Base(kind));
        }
        if let Ok(kind) = s.parse::<HybridMana>() {
            return Ok(Self::Hybrid(kind));
        }
        if let Ok(kind) = s.parse::<EldritchMana>() {
            return Ok(Self::Eldritch(kind));
        }
        Err(DomainError::parse(format!("Unknown mana type: {}", s)))
    }
}

impl From<ManaType> for String {
    fn from(kind: ManaType) -> Self {
        kind.id().to_string()
    }
}

impl TryFrom<String> for ManaType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_sizes() {
        assert_eq!(BaseMana::ALL.len(), 9);
        assert_eq!(HybridMana::ALL.len(), 32);
        assert_eq!(EldritchMana::ALL.len(), 27);
    }

    #[test]
    fn identifiers_are_unique_across_tiers() {
        let ids: HashSet<&str> = ManaType::all().map(ManaType::id).collect();
        assert_eq!(ids.len(), 9 + 32 + 27);
    }

    #[test]
    fn serde_name_matches_identifier() {
        for kind in ManaType::all() {
            let json = serde_json::to_string(&kind).expect("valid json");
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
        for kind in HybridMana::ALL {
            let json = serde_json::to_string(kind).expect("valid json");
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn labels_capitalize_identifiers() {
        for kind in ManaType::all() {
            let mut chars = kind.id().chars();
            let first = chars.next().expect("non-empty id").to_ascii_uppercase();
            let expected: String = std::iter::once(first).chain(chars).collect();
            assert_eq!(kind.label(), expected);
        }
    }

    #[test]
    fn parse_resolves_tier() {
        assert_eq!("fire".parse::<ManaType>(), Ok(ManaType::Base(BaseMana::Fire)));
        assert_eq!(
            "Judgement".parse::<ManaType>(),
            Ok(ManaType::Hybrid(HybridMana::Judgement))
        );
        assert_eq!(
            "null".parse::<ManaType>(),
            Ok(ManaType::Eldritch(EldritchMana::Null))
        );
        assert!("plasma".parse::<ManaType>().is_err());
    }

    #[test]
    fn typed_parse_rejects_other_tiers() {
        assert!("metal".parse::<BaseMana>().is_err());
        assert!("earth".parse::<HybridMana>().is_err());
    }

    #[test]
    fn ability_start_tiers() {
        assert_eq!(ManaTier::Base.ability_start_tier(), Some(Tier::Normal));
        assert_eq!(ManaTier::Hybrid.ability_start_tier(), Some(Tier::Apprentice));
        assert_eq!(ManaTier::Eldritch.ability_start_tier(), Some(Tier::Master));
        assert_eq!(ManaTier::Force.ability_start_tier(), None);
    }

    #[test]
    fn mana_type_deserializes_from_identifier() {
        let kind: ManaType = serde_json::from_str("\"obsidian\"").expect("valid json");
        assert_eq!(kind, ManaType::Hybrid(HybridMana::Obsidian));
        assert!(serde_json::from_str::<ManaType>("\"plasma\"").is_err());
    }
}
