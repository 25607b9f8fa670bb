//! Sub-attribute value object.
//!
//! Nine percentage-valued sub-attributes, grouped under Body, Mind and Soul.
//! Each one governs exactly one base mana type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::BaseMana;

/// Top-level attribute group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeGroup {
    Body,
    Mind,
    Soul,
}

impl AttributeGroup {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Mind => "Mind",
            Self::Soul => "Soul",
        }
    }
}

/// A character sub-attribute, stored by the host as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubAttribute {
    // Body
    Might,
    Agility,
    Fortitude,
    // Mind
    Focus,
    Insight,
    Willpower,
    // Soul
    Presence,
    Manipulation,
    Resolve,
}

impl SubAttribute {
    pub const ALL: [SubAttribute; 9] = [
        SubAttribute::Might,
        SubAttribute::Agility,
        SubAttribute::Fortitude,
        SubAttribute::Focus,
        SubAttribute::Insight,
        SubAttribute::Willpower,
        SubAttribute::Presence,
        SubAttribute::Manipulation,
        SubAttribute::Resolve,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Might => "might",
            Self::Agility => "agility",
            Self::Fortitude => "fortitude",
            Self::Focus => "focus",
            Self::Insight => "insight",
            Self::Willpower => "willpower",
            Self::Presence => "presence",
            Self::Manipulation => "manipulation",
            Self::Resolve => "resolve",
        }
    }

    pub fn group(self) -> AttributeGroup {
        match self {
            Self::Might | Self::Agility | Self::Fortitude => AttributeGroup::Body,
            Self::Focus | Self::Insight | Self::Willpower => AttributeGroup::Mind,
            Self::Presence | Self::Manipulation | Self::Resolve => AttributeGroup::Soul,
        }
    }

    /// The base mana type this sub-attribute feeds.
    pub fn base_mana(self) -> BaseMana {
        match self {
            Self::Might => BaseMana::Enhancement,
            Self::Agility => BaseMana::Wind,
            Self::Fortitude => BaseMana::Earth,
            Self::Focus => BaseMana::Astral,
            Self::Insight => BaseMana::Light,
            Self::Willpower => BaseMana::Water,
            Self::Presence => BaseMana::Fire,
            Self::Manipulation => BaseMana::Shadow,
            Self::Resolve => BaseMana::Nature,
        }
    }

    /// Inverse of [`SubAttribute::base_mana`].
    pub fn governing(base: BaseMana) -> Self {
        match base {
            BaseMana::Enhancement => Self::Might,
            BaseMana::Wind => Self::Agility,
            BaseMana::Earth => Self::Fortitude,
            BaseMana::Astral => Self::Focus,
            BaseMana::Light => Self::Insight,
            BaseMana::Water => Self::Willpower,
            BaseMana::Fire => Self::Presence,
            BaseMana::Shadow => Self::Manipulation,
            BaseMana::Nature => Self::Resolve,
        }
    }
}

impl fmt::Display for SubAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for SubAttribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.key() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown sub-attribute: {}", s)))
    }
}
