pub mod config;
pub mod profile;
pub mod stats;

pub use config::{Config, FetchConfig};
pub use profile::{DetailedProfile, ProblemRecord, ProfileInfo, SolvedGroup, SolvedProblems};
pub use stats::{
    DifficultyCounts, DifficultyPercentages, DifficultyTag, StatsReport, UserStatsRecord,
};
