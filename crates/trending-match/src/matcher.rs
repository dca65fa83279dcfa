use std::collections::HashSet;

use models::{CatalogItem, TrendingEntry};

use crate::distance::levenshtein;

/// How many feed entries are scanned per requested slot.
pub const OVERSAMPLE_FACTOR: i32 = 3;
/// Largest production/release year gap accepted by the fuzzy branch.
pub const MAX_YEAR_DELTA: u32 = 1;
/// Largest case-folded edit distance accepted by the fuzzy branch.
pub const MAX_EDIT_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchKind {
    Exact,
    Fuzzy,
}

/// Map the ranked trending feed onto catalog items.
///
/// Only the first `top_count * 3` feed entries are considered. For each, in
/// rank order, the first catalog item whose name equals the title ignoring
/// case, or whose year is within one of the release year and whose name is
/// at most three edits away, is taken. Items already picked (by id) are not
/// added twice and scanning stops once `top_count` items are collected.
///
/// A `top_count` of zero or less yields an empty result.
pub fn reconcile<'a>(
    trending: &[TrendingEntry],
    catalog: &'a [CatalogItem],
    top_count: i32,
) -> Vec<&'a CatalogItem> {
    let Ok(limit) = usize::try_from(top_count) else {
        return Vec::new();
    };
    if limit == 0 {
        return Vec::new();
    }
    let window = scan_window(top_count);

    let mut matched: Vec<&'a CatalogItem> = Vec::with_capacity(limit);
    let mut seen = HashSet::new();

    for (rank, entry) in trending.iter().take(window).enumerate() {
        let Some((item, kind)) = find_match(entry, catalog) else {
            continue;
        };

        if !seen.insert(&item.id) {
            tracing::trace!(rank, title = %entry.title, id = %item.id, "already matched");
            continue;
        }

        tracing::trace!(rank, title = %entry.title, id = %item.id, ?kind, "matched");
        matched.push(item);
        if matched.len() >= limit {
            break;
        }
    }

    matched
}

/// Number of leading feed entries `reconcile` looks at for `top_count`.
///
/// Callers that drop unusable feed elements should cut the raw feed to this
/// length first, so later entries do not slide into the window.
pub fn scan_window(top_count: i32) -> usize {
    usize::try_from(top_count.saturating_mul(OVERSAMPLE_FACTOR)).unwrap_or(0)
}

fn find_match<'a>(
    entry: &TrendingEntry,
    catalog: &'a [CatalogItem],
) -> Option<(&'a CatalogItem, MatchKind)> {
    let title_lower = entry.title.to_lowercase();
    let release_year = entry.release_year();

    catalog.iter().find_map(|item| {
        match_kind(item, &entry.title, &title_lower, release_year).map(|kind| (item, kind))
    })
}

fn match_kind(
    item: &CatalogItem,
    title: &str,
    title_lower: &str,
    release_year: i32,
) -> Option<MatchKind> {
    if names_equal_ignore_case(&item.name, title) {
        return Some(MatchKind::Exact);
    }

    let year = item.production_year?;
    if year.abs_diff(release_year) > MAX_YEAR_DELTA {
        return None;
    }

    (levenshtein(&item.name.to_lowercase(), title_lower) <= MAX_EDIT_DISTANCE)
        .then_some(MatchKind::Fuzzy)
}

fn names_equal_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(title: &str, year: i32) -> TrendingEntry {
        TrendingEntry::new(title, NaiveDate::from_ymd_opt(year, 6, 1))
    }

    #[test]
    fn exact_match_ignores_case_and_year() {
        let item = CatalogItem::new("1", "The Matrix", None);
        assert_eq!(
            match_kind(&item, "THE MATRIX", "the matrix", 0),
            Some(MatchKind::Exact)
        );
    }

    #[test]
    fn fuzzy_match_requires_production_year() {
        let item = CatalogItem::new("1", "Dune: Part Two", None);
        assert_eq!(
            match_kind(&item, "Dune Part Two", "dune part two", 2024),
            None
        );
    }

    #[test]
    fn fuzzy_match_year_gate_is_inclusive() {
        let item = CatalogItem::new("1", "Dune: Part Two", Some(2024));
        for release_year in [2023, 2024, 2025] {
            assert_eq!(
                match_kind(&item, "Dune Part Two", "dune part two", release_year),
                Some(MatchKind::Fuzzy)
            );
        }
        for release_year in [0, 2022, 2026] {
            assert_eq!(
                match_kind(&item, "Dune Part Two", "dune part two", release_year),
                None
            );
        }
    }

    #[test]
    fn fuzzy_match_distance_threshold() {
        let three_edits = CatalogItem::new("1", "Alien", Some(1979));
        assert_eq!(levenshtein("alien", "aliens!!"), 3);
        assert_eq!(
            match_kind(&three_edits, "Aliens!!", "aliens!!", 1979),
            Some(MatchKind::Fuzzy)
        );
        assert_eq!(levenshtein("alien", "aliens!!!"), 4);
        assert_eq!(match_kind(&three_edits, "Aliens!!!", "aliens!!!", 1979), None);
    }

    #[test]
    fn first_catalog_hit_wins() {
        let catalog = vec![
            CatalogItem::new("fuzzy", "Dune!", Some(2021)),
            CatalogItem::new("exact", "Dune", Some(2021)),
        ];
        let matched = reconcile(&[entry("Dune", 2021)], &catalog, 1);
        assert_eq!(matched[0].id.as_str(), "fuzzy");
    }

    #[test]
    fn negative_top_count_is_empty() {
        let catalog = vec![CatalogItem::new("1", "Dune", Some(2021))];
        assert!(reconcile(&[entry("Dune", 2021)], &catalog, -4).is_empty());
        assert!(reconcile(&[entry("Dune", 2021)], &catalog, i32::MIN).is_empty());
    }

    #[test]
    fn scan_window_is_three_per_slot() {
        assert_eq!(scan_window(10), 30);
        assert_eq!(scan_window(0), 0);
        assert_eq!(scan_window(-1), 0);
        assert_eq!(scan_window(i32::MAX), i32::MAX as usize);
    }

    #[test]
    fn year_gate_handles_extreme_years() {
        let oldest = CatalogItem::new("1", "Heat", Some(i32::MIN));
        let newest = CatalogItem::new("2", "Heat", Some(i32::MAX));
        for release_year in [0, 2021, i32::MIN, i32::MAX] {
            assert_eq!(match_kind(&oldest, "Dune", "dune", release_year), None);
            assert_eq!(match_kind(&newest, "Dune", "dune", release_year), None);
        }
        assert_eq!(
            match_kind(&oldest, "Heal", "heal", i32::MIN + 1),
            Some(MatchKind::Fuzzy)
        );
    }

    #[test]
    fn huge_top_count_does_not_overflow() {
        let catalog = vec![CatalogItem::new("1", "Dune", Some(2021))];
        let matched = reconcile(&[entry("Dune", 2021)], &catalog, i32::MAX);
        assert_eq!(matched.len(), 1);
    }
}
