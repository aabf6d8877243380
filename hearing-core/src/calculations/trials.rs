//! Ranking of hearing-aid trials by satisfaction.

use std::cmp::Reverse;

use serde::Serialize;

use crate::models::TrialRecord;

/// A trial with its 1-based position in the ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTrial {
    pub rank: usize,
    pub trial: TrialRecord,
}

impl RankedTrial {
    /// Satisfaction as shown in the table; blank when unscored or zero.
    pub fn satisfaction_display(&self) -> String {
        match self.trial.satisfaction {
            Some(score) if score > 0 => score.to_string(),
            _ => String::new(),
        }
    }
}

/// Trials ordered by satisfaction, highest first.
///
/// Unscored trials count as 0. Equal scores keep their entry order.
pub fn rank_trials(trials: &[TrialRecord]) -> Vec<RankedTrial> {
    let mut sorted = trials.to_vec();
    sorted.sort_by_key(|trial| Reverse(trial.score()));

    sorted
        .into_iter()
        .zip(1..)
        .map(|(trial, rank)| RankedTrial { rank, trial })
        .collect()
}

/// Model and supplier carried into the recommendation section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectedDevice {
    pub model: String,
    pub supplier: String,
}

/// The trial with the strictly highest satisfaction; the earliest wins ties.
///
/// Returns an empty selection if no trial scored above 0.
pub fn select_best(trials: &[TrialRecord]) -> SelectedDevice {
    let mut best: Option<&TrialRecord> = None;
    for trial in trials {
        if trial.score() > best.map_or(0, TrialRecord::score) {
            best = Some(trial);
        }
    }

    best.map(|trial| SelectedDevice {
        model: trial.model.clone(),
        supplier: trial.supplier.clone(),
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn trial(id: u32, model: &str, satisfaction: Option<u32>) -> TrialRecord {
        TrialRecord {
            id,
            model: model.to_string(),
            satisfaction,
            supplier: format!("{model} Supplier"),
            ..Default::default()
        }
    }

    // =========================================================================
    // rank_trials tests
    // =========================================================================

    #[test]
    fn rank_trials_orders_by_satisfaction_descending() {
        let trials = vec![trial(1, "A", Some(5)), trial(2, "B", Some(8)), trial(3, "C", Some(8))];

        let ranked = rank_trials(&trials);

        let order: Vec<(usize, &str)> = ranked
            .iter()
            .map(|r| (r.rank, r.trial.model.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "B"), (2, "C"), (3, "A")]);
    }

    #[test]
    fn rank_trials_puts_unscored_last_in_entry_order() {
        let trials = vec![trial(1, "A", None), trial(2, "B", Some(3)), trial(3, "C", None)];

        let ranked = rank_trials(&trials);

        let order: Vec<&str> = ranked.iter().map(|r| r.trial.model.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(ranked[1].satisfaction_display(), "");
        assert_eq!(ranked[0].satisfaction_display(), "3");
    }

    #[test]
    fn rank_trials_handles_empty_list() {
        assert!(rank_trials(&[]).is_empty());
    }

    // =========================================================================
    // select_best tests
    // =========================================================================

    #[test]
    fn select_best_keeps_first_of_tied_maximum() {
        let trials = vec![trial(1, "A", Some(8)), trial(2, "B", Some(9)), trial(3, "C", Some(9))];

        let best = select_best(&trials);

        assert_eq!(
            best,
            SelectedDevice {
                model: "B".to_string(),
                supplier: "B Supplier".to_string(),
            }
        );
    }

    #[test]
    fn select_best_is_empty_without_scores() {
        let trials = vec![trial(1, "A", None), trial(2, "B", Some(0))];

        assert_eq!(select_best(&trials), SelectedDevice::default());
    }

    #[test]
    fn select_best_is_empty_for_no_trials() {
        assert_eq!(select_best(&[]), SelectedDevice::default());
    }
}
