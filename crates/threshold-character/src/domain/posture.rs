//! Posture: the closed set of stances an actor can hold.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An actor's stance. Exactly one value at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    /// Upright; the only posture that allows movement.
    #[default]
    Standing,
    /// On one's knees.
    Kneeling,
    /// Seated.
    Sitting,
    /// Lying down.
    Lying,
}

impl Posture {
    /// Every posture, in declaration order.
    pub const ALL: [Posture; 4] = [
        Posture::Standing,
        Posture::Kneeling,
        Posture::Sitting,
        Posture::Lying,
    ];

    /// Verb phrase used when telling the actor: "You {verb}."
    #[must_use]
    pub fn first_person(self) -> &'static str {
        match self {
            Self::Standing => "stand up",
            Self::Kneeling => "kneel",
            Self::Sitting => "sit",
            Self::Lying => "lie down",
        }
    }

    /// Verb phrase used when telling onlookers: "<Name> {verb}."
    #[must_use]
    pub fn third_person(self) -> &'static str {
        match self {
            Self::Standing => "stands up",
            Self::Kneeling => "kneels",
            Self::Sitting => "sits",
            Self::Lying => "lies down",
        }
    }

    /// Adjective describing an actor in this posture.
    #[must_use]
    pub fn adjective(self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Kneeling => "kneeling",
            Self::Sitting => "sitting",
            Self::Lying => "lying down",
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.adjective())
    }
}
