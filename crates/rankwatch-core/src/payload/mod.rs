//! Payload parsing.
//!
//! The upstream API returns a JSON document of voting groups, each with
//! ranked options. This module turns that document into a [`RankingSet`]
//! up front so that nothing downstream touches raw JSON.
//!
//! [`RankingSet`]: crate::model::RankingSet

pub mod parse;
pub mod summary;

pub use parse::{extract_rankings, fetched_at, updated_at};
pub use summary::{summarize, CategorySummary, RankingSummary, SummaryEntry};

/// Top-level key holding the list of categories
pub const KEY_GROUPS: &str = "groups";
/// Category display name
pub const KEY_GROUP_NAME: &str = "groupName";
pub const KEY_GROUP_ID: &str = "groupId";
/// Ranked options inside one category
pub const KEY_OPTIONS: &str = "options";
pub const KEY_ARTIST_ID: &str = "artistId";
pub const KEY_OPTION_ID: &str = "optionId";
pub const KEY_TITLE: &str = "title";
pub const KEY_RANK: &str = "rank";
/// Update time reported by the upstream API
pub const KEY_UPDATED_AT: &str = "updatedAt";
/// Local fetch time stamped by the fetcher
pub const KEY_FETCHED_AT: &str = "fetchedAt";
