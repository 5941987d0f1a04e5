// src/core/types/dimension.rs

//! The four attribute axes the index cycles through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Splitting axis. The axis used at depth `d` is `Dimension::ALL[d % 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Time,
    Mood,
    Energy,
    /// Distance from the coordinate origin, computed from latitude/longitude.
    Distance,
}

impl Dimension {
    pub const ALL: [Self; 4] = [Self::Time, Self::Mood, Self::Energy, Self::Distance];

    pub const fn for_depth(depth: usize) -> Self {
        Self::ALL[depth % Self::ALL.len()]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Time => 0,
            Self::Mood => 1,
            Self::Energy => 2,
            Self::Distance => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Mood => "mood",
            Self::Energy => "energy",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can be positioned in the four-dimensional attribute space.
pub trait Coordinates {
    fn time(&self) -> f64;
    fn mood(&self) -> f64;
    fn energy(&self) -> f64;
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;

    fn distance_from_origin(&self) -> f64 {
        self.latitude().hypot(self.longitude())
    }

    fn coordinate(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Time => self.time(),
            Dimension::Mood => self.mood(),
            Dimension::Energy => self.energy(),
            Dimension::Distance => self.distance_from_origin(),
        }
    }

    /// All four coordinates in `Dimension::ALL` order.
    fn point(&self) -> [f64; 4] {
        Dimension::ALL.map(|d| self.coordinate(d))
    }
}
