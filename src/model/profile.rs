//! Profile and per-problem records recovered from the embedded page data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Public profile fields of a user.
///
/// Text fields are always strings, even when the source page supplies
/// numbers; absent source values become `""` (streaks: `"00"`) or `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub user_name: String,
    pub full_name: String,
    #[serde(rename = "profilePicture")]
    pub avatar_url: String,
    pub institute: String,
    pub institute_rank: String,
    pub current_streak: String,
    pub max_streak: String,
    pub coding_score: u64,
    pub monthly_score: u64,
    pub total_problems_solved: u64,
}

/// A single solved problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    #[serde(rename = "question")]
    pub title: String,
    #[serde(rename = "questionUrl")]
    pub url: String,
    /// Group label exactly as the source reports it
    pub difficulty: String,
}

/// Problems the source lists under one difficulty group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedGroup {
    pub difficulty: String,
    pub problems: Vec<ProblemRecord>,
}

impl SolvedGroup {
    pub fn count(&self) -> usize {
        self.problems.len()
    }
}

/// Everything the structured extractor recovers for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedProfile {
    pub info: ProfileInfo,
    /// Groups in source order
    pub groups: Vec<SolvedGroup>,
    /// All problems across groups, flattened in source order
    pub all_problems: Vec<ProblemRecord>,
}

/// Solved-problems listing returned by the solved-problems endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedProblems {
    pub user_name: String,
    pub total_problems_solved: u64,
    pub problems_by_difficulty: BTreeMap<String, u64>,
    pub problems: Vec<ProblemRecord>,
}
