//! Deterministic aggregates for special intents.
//!
//! Every function here reads only the metadata of the matches already
//! retrieved for the request — there is no second data source. Zero
//! qualifying matches is a valid outcome (empty result, count 0), never an
//! error.
//!
//! Metadata contract: `category` ("crime" / "accident"), `date`
//! (`YYYY-MM-DD`), `line`, `incident_count` (number or numeric string),
//! `closest_station`.

use chrono::NaiveDate;
use serde_json::Value;
use vector_gateway::SearchMatch;

/// Count matches of the given category dated `today`, returning the count
/// together with the matches that fed it (in retrieval order).
pub fn daily_category_count(
    matches: &[SearchMatch],
    category: &str,
    today: NaiveDate,
) -> (u64, Vec<SearchMatch>) {
    let date = today.format("%Y-%m-%d").to_string();
    let fed: Vec<SearchMatch> = matches
        .iter()
        .filter(|m| {
            meta_str(m, "category") == Some(category) && meta_str(m, "date") == Some(date.as_str())
        })
        .cloned()
        .collect();

    (fed.len() as u64, fed)
}

/// Find the line(s) with the fewest incidents among matches that carry a
/// `line` key.
///
/// Returns `(lines_at_minimum, minimum, fed_matches)`. Matches without a
/// `line` key are skipped entirely; an unparsable `incident_count` counts
/// as 0 for a match that does carry a line.
pub fn safest_lines(matches: &[SearchMatch]) -> (Vec<String>, Option<i64>, Vec<SearchMatch>) {
    let mut min_incidents: Option<i64> = None;
    let mut lines: Vec<String> = Vec::new();
    let mut fed: Vec<SearchMatch> = Vec::new();

    for m in matches {
        let Some(line) = meta_str(m, "line") else {
            continue;
        };
        let incidents = incident_count(m);
        fed.push(m.clone());

        match min_incidents {
            Some(cur) if incidents > cur => {}
            Some(cur) if incidents == cur => lines.push(line.to_string()),
            _ => {
                min_incidents = Some(incidents);
                lines = vec![line.to_string()];
            }
        }
    }

    (lines, min_incidents, fed)
}

/// Collect `closest_station` values in retrieval order, de-duplicated
/// keeping the first occurrence, plus the matches that carried one.
pub fn nearby_stations(matches: &[SearchMatch]) -> (Vec<String>, Vec<SearchMatch>) {
    let mut stations: Vec<String> = Vec::new();
    let mut fed: Vec<SearchMatch> = Vec::new();

    for m in matches {
        let Some(station) = meta_str(m, "closest_station") else {
            continue;
        };
        fed.push(m.clone());
        if !stations.iter().any(|s| s == station) {
            stations.push(station.to_string());
        }
    }

    (stations, fed)
}

fn meta_str<'a>(m: &'a SearchMatch, key: &str) -> Option<&'a str> {
    m.metadata.get(key).and_then(Value::as_str)
}

fn incident_count(m: &SearchMatch) -> i64 {
    match m.metadata.get("incident_count") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mk(id: &str, pairs: &[(&str, Value)]) -> SearchMatch {
        let mut metadata = serde_json::Map::new();
        for (k, v) in pairs {
            metadata.insert((*k).to_string(), v.clone());
        }
        SearchMatch {
            id: id.to_string(),
            score: 0.9,
            metadata,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 13).unwrap()
    }

    #[test]
    fn counts_only_matching_category_and_date() {
        let matches = vec![
            mk("a", &[("category", json!("crime")), ("date", json!("2024-07-13"))]),
            mk("b", &[("category", json!("crime")), ("date", json!("2024-07-13"))]),
            mk("c", &[("category", json!("crime")), ("date", json!("2024-07-12"))]),
            mk("d", &[("category", json!("accident")), ("date", json!("2024-07-13"))]),
            mk("e", &[("location", json!("5th Ave"))]),
        ];

        let (count, fed) = daily_category_count(&matches, "crime", day());
        assert_eq!(count, 2);
        assert_eq!(fed.len(), 2);
        assert_eq!(fed[0].id, "a");
        assert_eq!(fed[1].id, "b");
    }

    #[test]
    fn zero_qualifying_matches_is_count_zero() {
        let matches = vec![mk("a", &[("category", json!("accident")), ("date", json!("2024-07-13"))])];
        let (count, fed) = daily_category_count(&matches, "crime", day());
        assert_eq!(count, 0);
        assert!(fed.is_empty());
    }

    #[test]
    fn safest_line_picks_the_minimum() {
        let matches = vec![
            mk("a", &[("line", json!("U1")), ("incident_count", json!(4))]),
            mk("b", &[("line", json!("U2")), ("incident_count", json!(1))]),
            mk("c", &[("line", json!("U3")), ("incident_count", json!(7))]),
        ];

        let (lines, min, fed) = safest_lines(&matches);
        assert_eq!(lines, vec!["U2"]);
        assert_eq!(min, Some(1));
        assert_eq!(fed.len(), 3);
    }

    #[test]
    fn safest_line_keeps_ties() {
        let matches = vec![
            mk("a", &[("line", json!("U1")), ("incident_count", json!(2))]),
            mk("b", &[("line", json!("U2")), ("incident_count", json!(2))]),
            mk("c", &[("line", json!("U3")), ("incident_count", json!(9))]),
        ];

        let (lines, min, _) = safest_lines(&matches);
        assert_eq!(lines, vec!["U1", "U2"]);
        assert_eq!(min, Some(2));
    }

    #[test]
    fn safest_line_parses_string_counts_and_skips_lineless_matches() {
        let matches = vec![
            mk("a", &[("line", json!("U1")), ("incident_count", json!("3"))]),
            mk("b", &[("line", json!("U2")), ("incident_count", json!("not-a-number"))]),
            mk("c", &[("category", json!("crime"))]),
        ];

        let (lines, min, fed) = safest_lines(&matches);
        // Unparsable count falls back to 0, so U2 wins; "c" never qualifies.
        assert_eq!(lines, vec!["U2"]);
        assert_eq!(min, Some(0));
        assert_eq!(fed.len(), 2);
    }

    #[test]
    fn no_line_data_yields_empty_result() {
        let matches = vec![mk("a", &[("category", json!("crime"))])];
        let (lines, min, fed) = safest_lines(&matches);
        assert!(lines.is_empty());
        assert_eq!(min, None);
        assert!(fed.is_empty());
    }

    #[test]
    fn stations_dedupe_preserving_first_occurrence() {
        let matches = vec![
            mk("a", &[("closest_station", json!("Central"))]),
            mk("b", &[("closest_station", json!("North Gate"))]),
            mk("c", &[("closest_station", json!("Central"))]),
            mk("d", &[("location", json!("somewhere"))]),
        ];

        let (stations, fed) = nearby_stations(&matches);
        assert_eq!(stations, vec!["Central", "North Gate"]);
        assert_eq!(fed.len(), 3);
    }
}
