//! Pure-tone audiogram readings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ear {
    Right,
    Left,
}

impl Ear {
    pub const ALL: [Ear; 2] = [Ear::Right, Ear::Left];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Left => "Left",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Right" => Some(Self::Right),
            "Left" => Some(Self::Left),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conduction {
    Air,
    Bone,
}

impl Conduction {
    pub const ALL: [Conduction; 2] = [Conduction::Air, Conduction::Bone];

    /// Short code used in field identifiers ("ac" / "bc").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Air => "ac",
            Self::Bone => "bc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ac" => Some(Self::Air),
            "bc" => Some(Self::Bone),
            _ => None,
        }
    }
}

/// Test frequencies of the audiogram, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Hz250,
    Hz500,
    Hz1000,
    Hz2000,
    Hz4000,
    Hz8000,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Hz250,
        Frequency::Hz500,
        Frequency::Hz1000,
        Frequency::Hz2000,
        Frequency::Hz4000,
        Frequency::Hz8000,
    ];

    /// Frequencies included in the pure-tone average.
    pub const PURE_TONE_AVERAGE: [Frequency; 4] = [
        Frequency::Hz500,
        Frequency::Hz1000,
        Frequency::Hz2000,
        Frequency::Hz4000,
    ];

    pub fn hz(&self) -> u32 {
        match self {
            Self::Hz250 => 250,
            Self::Hz500 => 500,
            Self::Hz1000 => 1000,
            Self::Hz2000 => 2000,
            Self::Hz4000 => 4000,
            Self::Hz8000 => 8000,
        }
    }

    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.hz() == hz)
    }

    /// Position on the audiogram's x axis, `0..=5`.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Thresholds in dB HL for one ear and conduction path. `None` means not tested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds([Option<f64>; 6]);

impl Thresholds {
    pub fn get(&self, frequency: Frequency) -> Option<f64> {
        self.0[frequency.index()]
    }

    pub fn set(&mut self, frequency: Frequency, value: Option<f64>) {
        self.0[frequency.index()] = value;
    }

    /// Tested frequencies with their thresholds, lowest frequency first.
    pub fn tested(&self) -> impl Iterator<Item = (Frequency, f64)> + '_ {
        Frequency::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|db| (f, db)))
    }
}

impl<const N: usize> From<[(Frequency, f64); N]> for Thresholds {
    fn from(values: [(Frequency, f64); N]) -> Self {
        let mut thresholds = Self::default();
        for (frequency, db) in values {
            thresholds.set(frequency, Some(db));
        }
        thresholds
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EarReading {
    pub air: Thresholds,
    pub bone: Thresholds,
}

impl EarReading {
    pub fn conduction(&self, conduction: Conduction) -> &Thresholds {
        match conduction {
            Conduction::Air => &self.air,
            Conduction::Bone => &self.bone,
        }
    }

    pub fn conduction_mut(&mut self, conduction: Conduction) -> &mut Thresholds {
        match conduction {
            Conduction::Air => &mut self.air,
            Conduction::Bone => &mut self.bone,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AudiogramReading {
    pub right: EarReading,
    pub left: EarReading,
}

impl AudiogramReading {
    pub fn ear(&self, ear: Ear) -> &EarReading {
        match ear {
            Ear::Right => &self.right,
            Ear::Left => &self.left,
        }
    }

    pub fn ear_mut(&mut self, ear: Ear) -> &mut EarReading {
        match ear {
            Ear::Right => &mut self.right,
            Ear::Left => &mut self.left,
        }
    }
}
