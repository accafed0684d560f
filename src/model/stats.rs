//! Difficulty tiers and the canonical statistics record

use serde::{Deserialize, Serialize};

/// Difficulty tier of a practice problem.
///
/// Declaration order is significant: the positional legacy strategy assigns
/// counts in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTag {
    School,
    Basic,
    Easy,
    Medium,
    Hard,
}

impl DifficultyTag {
    pub const ALL: [DifficultyTag; 5] = [
        DifficultyTag::School,
        DifficultyTag::Basic,
        DifficultyTag::Easy,
        DifficultyTag::Medium,
        DifficultyTag::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTag::School => "School",
            DifficultyTag::Basic => "Basic",
            DifficultyTag::Easy => "Easy",
            DifficultyTag::Medium => "Medium",
            DifficultyTag::Hard => "Hard",
        }
    }

    /// Match a source group label ("easy", "EASY", " Easy ") to a tier
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for DifficultyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solved-problem count for every difficulty tier.
///
/// A fixed record rather than a map, so all five tiers are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCounts {
    #[serde(rename = "School", default)]
    pub school: u64,
    #[serde(rename = "Basic", default)]
    pub basic: u64,
    #[serde(rename = "Easy", default)]
    pub easy: u64,
    #[serde(rename = "Medium", default)]
    pub medium: u64,
    #[serde(rename = "Hard", default)]
    pub hard: u64,
}

impl DifficultyCounts {
    pub fn get(&self, tag: DifficultyTag) -> u64 {
        match tag {
            DifficultyTag::School => self.school,
            DifficultyTag::Basic => self.basic,
            DifficultyTag::Easy => self.easy,
            DifficultyTag::Medium => self.medium,
            DifficultyTag::Hard => self.hard,
        }
    }

    pub fn get_mut(&mut self, tag: DifficultyTag) -> &mut u64 {
        match tag {
            DifficultyTag::School => &mut self.school,
            DifficultyTag::Basic => &mut self.basic,
            DifficultyTag::Easy => &mut self.easy,
            DifficultyTag::Medium => &mut self.medium,
            DifficultyTag::Hard => &mut self.hard,
        }
    }

    pub fn set(&mut self, tag: DifficultyTag, count: u64) {
        *self.get_mut(tag) = count;
    }

    /// Iterate tiers in their fixed order
    pub fn iter(&self) -> impl Iterator<Item = (DifficultyTag, u64)> + '_ {
        DifficultyTag::ALL
            .into_iter()
            .map(move |tag| (tag, self.get(tag)))
    }

    pub fn sum(&self) -> u64 {
        self.iter().fold(0, |acc, (_, count)| acc.saturating_add(count))
    }

    /// Split an aggregate total across all tiers by floor division.
    ///
    /// The remainder is dropped: 101 becomes 20 per tier.
    pub fn spread_evenly(total: u64) -> Self {
        let share = total / DifficultyTag::ALL.len() as u64;
        Self {
            school: share,
            basic: share,
            easy: share,
            medium: share,
            hard: share,
        }
    }
}

/// Canonical statistics record returned by the stats endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsRecord {
    pub user_name: String,
    pub total_problems_solved: u64,
    #[serde(flatten)]
    pub counts: DifficultyCounts,
}

/// Share of the total per tier, in percent with two decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPercentages {
    #[serde(rename = "School")]
    pub school: f64,
    #[serde(rename = "Basic")]
    pub basic: f64,
    #[serde(rename = "Easy")]
    pub easy: f64,
    #[serde(rename = "Medium")]
    pub medium: f64,
    #[serde(rename = "Hard")]
    pub hard: f64,
}

impl DifficultyPercentages {
    pub fn get(&self, tag: DifficultyTag) -> f64 {
        match tag {
            DifficultyTag::School => self.school,
            DifficultyTag::Basic => self.basic,
            DifficultyTag::Easy => self.easy,
            DifficultyTag::Medium => self.medium,
            DifficultyTag::Hard => self.hard,
        }
    }

    pub fn set(&mut self, tag: DifficultyTag, value: f64) {
        match tag {
            DifficultyTag::School => self.school = value,
            DifficultyTag::Basic => self.basic = value,
            DifficultyTag::Easy => self.easy = value,
            DifficultyTag::Medium => self.medium = value,
            DifficultyTag::Hard => self.hard = value,
        }
    }
}

/// Stats record plus derived per-tier percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub record: UserStatsRecord,
    pub percentages: DifficultyPercentages,
}
