//! Reshape extractor output into the records returned to callers

use std::collections::BTreeMap;

use crate::extract::legacy::Tally;
use crate::model::{
    DetailedProfile, DifficultyCounts, DifficultyPercentages, DifficultyTag, SolvedProblems,
    StatsReport, UserStatsRecord,
};

/// Record from a legacy-page tally
pub fn from_tally(username: &str, tally: &Tally) -> UserStatsRecord {
    UserStatsRecord {
        user_name: username.to_string(),
        total_problems_solved: tally.total,
        counts: tally.counts,
    }
}

/// Record from the structured profile.
///
/// Per-tier counts are group sizes; groups with labels outside the five
/// tiers are not counted. The total is the sum of the tier counts, so it
/// always agrees with them, even though the upstream profile reports its own
/// `total_problems_solved`. That reported total is used only when no tier
/// has any problems.
pub fn from_profile(username: &str, profile: &DetailedProfile) -> UserStatsRecord {
    let mut counts = DifficultyCounts::default();

    for group in &profile.groups {
        match DifficultyTag::from_label(&group.difficulty) {
            Some(tag) => *counts.get_mut(tag) += group.count() as u64,
            None => {
                tracing::debug!(
                    username = %username,
                    difficulty = %group.difficulty,
                    "Ignoring unknown difficulty group"
                );
            }
        }
    }

    let summed = counts.sum();
    let total = if summed > 0 {
        summed
    } else {
        profile.info.total_problems_solved
    };

    UserStatsRecord {
        user_name: username.to_string(),
        total_problems_solved: total,
        counts,
    }
}

/// Listing of every solved problem, with counts keyed by lowercased group label
pub fn solved_problems(username: &str, profile: &DetailedProfile) -> SolvedProblems {
    let mut by_difficulty = BTreeMap::new();
    for group in &profile.groups {
        *by_difficulty
            .entry(group.difficulty.to_lowercase())
            .or_insert(0) += group.count() as u64;
    }

    SolvedProblems {
        user_name: username.to_string(),
        total_problems_solved: profile.all_problems.len() as u64,
        problems_by_difficulty: by_difficulty,
        problems: profile.all_problems.clone(),
    }
}

/// Attach per-tier percentages to a record
pub fn report(record: UserStatsRecord) -> StatsReport {
    let mut percentages = DifficultyPercentages::default();
    for (tag, count) in record.counts.iter() {
        percentages.set(tag, percentage(count, record.total_problems_solved));
    }

    StatsReport {
        record,
        percentages,
    }
}

/// `count / total` in percent, rounded to two decimals. Exactly 0.0 when
/// `total` is 0.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 10_000.0 / total as f64).round() / 100.0
}
