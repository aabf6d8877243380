//! Hearing-aid trial records.

use serde::{Deserialize, Serialize};

use super::EarAffected;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    #[default]
    Bte,
    Ric,
    Cic,
    Itc,
    Ite,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bte => "BTE",
            Self::Ric => "RIC",
            Self::Cic => "CIC",
            Self::Itc => "ITC",
            Self::Ite => "ITE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BTE" => Some(Self::Bte),
            "RIC" => Some(Self::Ric),
            "CIC" => Some(Self::Cic),
            "ITC" => Some(Self::Itc),
            "ITE" => Some(Self::Ite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fitting {
    #[default]
    Monoaural,
    Binaural,
}

impl Fitting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monoaural => "Monoaural",
            Self::Binaural => "Binaural",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Monoaural" => Some(Self::Monoaural),
            "Binaural" => Some(Self::Binaural),
            _ => None,
        }
    }

    /// Bilateral loss is fitted in both ears, anything else in one.
    pub fn for_ear(ear: EarAffected) -> Self {
        match ear {
            EarAffected::Bilateral => Self::Binaural,
            EarAffected::Right | EarAffected::Left => Self::Monoaural,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Display id, stable while other trials are removed.
    pub id: u32,
    pub model: String,
    pub device_type: DeviceType,
    pub fitting: Fitting,
    /// Speech discrimination score, free text (e.g. "88%").
    pub sds: String,
    /// Satisfaction on a 1-10 scale, `None` until scored.
    pub satisfaction: Option<u32>,
    pub supplier: String,
}

impl TrialRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Satisfaction used for ranking; unscored trials count as 0.
    pub fn score(&self) -> u32 {
        self.satisfaction.unwrap_or(0)
    }
}

/// Ordered trial entries plus the id counter for new ones.
///
/// Two lists are equal when their entries are; the counter only decides the
/// id of the next trial and is not saved.
#[derive(Debug, Clone, Default, Eq)]
pub struct TrialList {
    entries: Vec<TrialRecord>,
    last_id: u32,
}

impl PartialEq for TrialList {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl TrialList {
    /// Rebuilds a list from persisted entries, renumbering ids by position.
    pub fn restored(entries: Vec<TrialRecord>) -> Self {
        let entries: Vec<TrialRecord> = entries
            .into_iter()
            .zip(1..)
            .map(|(trial, id)| TrialRecord { id, ..trial })
            .collect();
        let last_id = entries.len() as u32;
        Self { entries, last_id }
    }

    /// Appends a blank trial with the next id and returns it.
    pub fn add(&mut self) -> &mut TrialRecord {
        self.last_id += 1;
        self.entries.push(TrialRecord::new(self.last_id));
        let index = self.entries.len() - 1;
        &mut self.entries[index]
    }

    /// Removes the trial with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|trial| trial.id != id);
        self.entries.len() != before
    }

    /// Adds a blank trial if the list is empty.
    pub fn ensure_one(&mut self) {
        if self.entries.is_empty() {
            self.add();
        }
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut TrialRecord> {
        self.entries.iter_mut().find(|trial| trial.id == id)
    }

    pub fn set_all_fittings(&mut self, fitting: Fitting) {
        for trial in &mut self.entries {
            trial.fitting = fitting;
        }
    }

    pub fn as_slice(&self) -> &[TrialRecord] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrialRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
