//! Difficulty counts from the legacy profile page markup
//!
//! The page layout has changed several times, so extraction is a cascade of
//! independent strategies tried in [`STRATEGIES`] order. Each one reads the
//! parsed page and reports a [`Tally`]; the first with a nonzero total wins.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::model::{DifficultyCounts, DifficultyTag};
use crate::service::StatsError;

/// Outcome of one strategy. A zero `total` means "nothing found".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub counts: DifficultyCounts,
    pub total: u64,
}

impl Tally {
    fn record(&mut self, tag: DifficultyTag, count: u64) {
        self.counts.set(tag, count);
        self.total = self.total.saturating_add(count);
    }
}

type Strategy = fn(&Html) -> Tally;

/// Strategies in priority order
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("positional", positional_groups),
    ("labeled", labeled_divs),
    ("full_text", full_text_pattern),
    ("score_cards", score_cards),
];

const SUMMARY_SELECTOR: &str = ".problemNavbar_head__cKSRi";
const SOLVED_SECTION_SELECTORS: &[&str] = &[
    "section.problems_solved_section",
    "div.row.problems-solved",
];
const SCORE_CARDS_SELECTOR: &str = "div.score_cards_container";

/// Run the cascade over a profile page body
pub fn extract_counts(html: &str, username: &str) -> Result<Tally, StatsError> {
    let document = Html::parse_document(html);

    for (name, strategy) in STRATEGIES {
        let tally = strategy(&document);
        if tally.total > 0 {
            tracing::debug!(
                username = %username,
                strategy = *name,
                total = tally.total,
                "Legacy strategy matched"
            );
            return Ok(tally);
        }
        tracing::debug!(username = %username, strategy = *name, "Legacy strategy found nothing");
    }

    Err(StatsError::NoDataFound(username.to_string()))
}

/// `(n)` groups in the navbar summary, assigned to tiers by position only.
///
/// Labels are never read: `"HARD (3) SCHOOL (5)"` yields School=3, Basic=5.
/// Groups that do not hold an integer are skipped without consuming a tier;
/// groups past the fifth are ignored.
fn positional_groups(document: &Html) -> Tally {
    let mut tally = Tally::default();

    let Some(summary) = select_first(document, SUMMARY_SELECTOR) else {
        return tally;
    };
    let text = summary.text().collect::<String>();

    let mut tiers = DifficultyTag::ALL.into_iter();
    for (open, _) in text.match_indices('(') {
        let start = open + 1;
        let Some(len) = text[start..].find(')') else {
            break;
        };
        let Ok(count) = text[start..start + len].trim().parse::<u64>() else {
            continue;
        };
        match tiers.next() {
            Some(tag) => tally.record(tag, count),
            None => break,
        }
    }

    tally
}

/// `<div>` whose own string names each tier inside the solved-problems
/// section, with the count read from its next sibling element or else its
/// parent's text
fn labeled_divs(document: &Html) -> Tally {
    let mut tally = Tally::default();

    let Some(section) = SOLVED_SECTION_SELECTORS
        .iter()
        .find_map(|s| select_first(document, s))
    else {
        return tally;
    };
    let Ok(div) = Selector::parse("div") else {
        return tally;
    };

    for tag in DifficultyTag::ALL {
        let needle = tag.as_str().to_lowercase();
        let label = section.select(&div).find(|el| {
            own_string(*el).is_some_and(|text| text.to_lowercase().contains(&needle))
        });
        let Some(label) = label else {
            continue;
        };

        let from_sibling = label
            .next_siblings()
            .find_map(ElementRef::wrap)
            .and_then(|sibling| first_integer(&sibling.text().collect::<String>()));
        let count = from_sibling.or_else(|| {
            label
                .parent()
                .and_then(ElementRef::wrap)
                .and_then(|parent| first_integer(&parent.text().collect::<String>()))
        });

        if let Some(count) = count {
            tally.record(tag, count);
        }
    }

    tally
}

/// `<tier>\D*(\d+)` over the whole page text, case-insensitive, first match per tier
fn full_text_pattern(document: &Html) -> Tally {
    let mut tally = Tally::default();
    let text = document.root_element().text().collect::<String>();

    for tag in DifficultyTag::ALL {
        let pattern = format!(r"(?i){}\D*(\d+)", regex::escape(tag.as_str()));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        let count = re
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok());
        if let Some(count) = count {
            tally.record(tag, count);
        }
    }

    tally
}

/// Sum of every integer in the score cards, spread evenly over the tiers.
/// The division remainder is lost.
fn score_cards(document: &Html) -> Tally {
    let Some(cards) = select_first(document, SCORE_CARDS_SELECTOR) else {
        return Tally::default();
    };

    let total = integers(&cards.text().collect::<String>()).fold(0, u64::saturating_add);
    if total == 0 {
        return Tally::default();
    }

    Tally {
        counts: DifficultyCounts::spread_evenly(total),
        total,
    }
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Text of an element that holds only text, or a single child element that
/// does, recursively. Containers with several element children have none.
fn own_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    match (children.next(), children.next()) {
        (Some(only), None) => match ElementRef::wrap(only) {
            Some(child) => own_string(child),
            None => Some(element.text().collect()),
        },
        _ if element.children().all(|child| !child.value().is_element()) => {
            Some(element.text().collect())
        }
        _ => None,
    }
}

fn integers(text: &str) -> impl Iterator<Item = u64> + '_ {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse().ok())
}

fn first_integer(text: &str) -> Option<u64> {
    integers(text).next()
}
