//! Profile data from the JSON payload embedded in the practice page
//!
//! The page ships its state in `<script id="__NEXT_DATA__">`. The payload is
//! walked along `props.pageProps.{userInfo, userSubmissionsInfo}`, each step
//! failing with its own error so callers can tell a missing user from a
//! changed page.

use scraper::{Html, Selector};
use serde_json::{Map, Value};

use crate::model::{DetailedProfile, ProblemRecord, ProfileInfo, SolvedGroup};
use crate::retriever::SiteUrls;
use crate::service::StatsError;

const PAYLOAD_SELECTOR: &str = r#"script#__NEXT_DATA__[type="application/json"]"#;
const DEFAULT_STREAK: &str = "00";

/// Extract profile info and solved problems from a practice page body
pub fn extract_profile(
    html: &str,
    username: &str,
    urls: &SiteUrls,
) -> Result<DetailedProfile, StatsError> {
    let payload = payload_text(html)
        .ok_or_else(|| StatsError::StructureChanged(username.to_string()))?;

    let root: Value = serde_json::from_str(&payload).map_err(|e| {
        tracing::debug!(username = %username, error = %e, "Embedded payload is not valid JSON");
        StatsError::InvalidJson
    })?;

    let page_props = child_object(&root, "props")
        .and_then(|props| props.get("pageProps"))
        .and_then(Value::as_object)
        .ok_or_else(|| StatsError::UserDataNotFound(username.to_string()))?;

    let user_info = page_props
        .get("userInfo")
        .and_then(Value::as_object)
        .filter(|info| !info.is_empty())
        .ok_or_else(|| StatsError::ProfileNotFound(username.to_string()))?;

    let submissions = match page_props.get("userSubmissionsInfo") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) if is_falsy(other) => None,
        Some(_) => return Err(StatsError::MissingField("userSubmissionsInfo".to_string())),
    };

    let info = profile_info(user_info, username);

    let mut groups = Vec::new();
    let mut all_problems = Vec::new();
    for (difficulty, entries) in submissions.into_iter().flatten() {
        let group = solved_group(difficulty, entries, urls)?;
        all_problems.extend(group.problems.iter().cloned());
        groups.push(group);
    }

    tracing::debug!(
        username = %username,
        groups = groups.len(),
        problems = all_problems.len(),
        "Extracted structured profile"
    );

    Ok(DetailedProfile {
        info,
        groups,
        all_problems,
    })
}

fn payload_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PAYLOAD_SELECTOR).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

fn child_object<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn profile_info(info: &Map<String, Value>, username: &str) -> ProfileInfo {
    ProfileInfo {
        user_name: username.to_string(),
        full_name: text_field(info, "name", ""),
        avatar_url: text_field(info, "profile_image_url", ""),
        institute: text_field(info, "institute_name", ""),
        institute_rank: text_field(info, "institute_rank", ""),
        current_streak: text_field(info, "pod_solved_longest_streak", DEFAULT_STREAK),
        max_streak: text_field(info, "pod_solved_global_longest_streak", DEFAULT_STREAK),
        coding_score: count_field(info, "score"),
        monthly_score: count_field(info, "monthly_score"),
        total_problems_solved: count_field(info, "total_problems_solved"),
    }
}

/// String form of a field; numbers are rendered, absent or null gives `default`
fn text_field(info: &Map<String, Value>, key: &str, default: &str) -> String {
    match info.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => value_text(value),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Non-negative integer form of a field; anything unreadable is 0
fn count_field(info: &Map<String, Value>, key: &str) -> u64 {
    match info.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn solved_group(
    difficulty: &str,
    entries: &Value,
    urls: &SiteUrls,
) -> Result<SolvedGroup, StatsError> {
    let entries = entries
        .as_object()
        .ok_or_else(|| StatsError::MissingField(difficulty.to_string()))?;

    let problems = entries
        .values()
        .map(|details| {
            let title = required(details, "pname")?;
            let slug = required(details, "slug")?;
            Ok(ProblemRecord {
                title,
                url: urls.problem(&slug),
                difficulty: difficulty.to_string(),
            })
        })
        .collect::<Result<Vec<_>, StatsError>>()?;

    Ok(SolvedGroup {
        difficulty: difficulty.to_string(),
        problems,
    })
}

fn required(details: &Value, key: &str) -> Result<String, StatsError> {
    details
        .get(key)
        .map(value_text)
        .ok_or_else(|| StatsError::MissingField(key.to_string()))
}
