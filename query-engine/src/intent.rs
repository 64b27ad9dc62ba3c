//! Special-query dispatch: a closed set of question intents recognized by
//! case-insensitive keyword matching.
//!
//! Rules live in one ordered table of `(predicate, Intent)` pairs and are
//! checked top to bottom; the **first** matching rule wins. That order is
//! the tie-breaker for questions whose wording straddles several rules
//! (e.g. "crimes today near the station"), so reordering the table is a
//! behavior change, not a cleanup.

/// A recognized category of special-purpose question, answered from match
/// metadata instead of the generic retrieval-and-synthesis path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "How many crimes happened today?"
    DailyCrimeCount,
    /// "How many traffic accidents happened today?"
    DailyTrafficAccidentCount,
    /// "What is the safest line in the last 7 days?"
    SafestLineWeek,
    /// "Which stations are near me?"
    NearbyStations,
}

/// Ordered dispatch table; priority is the enumeration order of the rules.
const RULES: &[(fn(&str) -> bool, Intent)] = &[
    (mentions_daily_crime, Intent::DailyCrimeCount),
    (mentions_daily_accident, Intent::DailyTrafficAccidentCount),
    (mentions_safest_line, Intent::SafestLineWeek),
    (mentions_nearby_station, Intent::NearbyStations),
];

fn mentions_daily_crime(q: &str) -> bool {
    q.contains("crime") && q.contains("today")
}

fn mentions_daily_accident(q: &str) -> bool {
    (q.contains("traffic") || q.contains("accident")) && q.contains("today")
}

fn mentions_safest_line(q: &str) -> bool {
    q.contains("safest") && q.contains("line")
}

fn mentions_nearby_station(q: &str) -> bool {
    (q.contains("closest") || q.contains("nearby") || q.contains("near me"))
        && q.contains("station")
}

impl Intent {
    /// Match the question against the rule table; `None` means the generic
    /// retrieval-and-synthesis path handles it.
    pub fn detect(question: &str) -> Option<Intent> {
        let q = question.to_lowercase();
        RULES
            .iter()
            .find(|(matches, _)| matches(&q))
            .map(|&(_, intent)| intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_crime_count() {
        assert_eq!(
            Intent::detect("What are the total number of crimes today?"),
            Some(Intent::DailyCrimeCount)
        );
    }

    #[test]
    fn daily_traffic_accident_count() {
        assert_eq!(
            Intent::detect("How many traffic accidents happened today?"),
            Some(Intent::DailyTrafficAccidentCount)
        );
        assert_eq!(
            Intent::detect("any accidents today?"),
            Some(Intent::DailyTrafficAccidentCount)
        );
    }

    #[test]
    fn safest_line_week() {
        assert_eq!(
            Intent::detect("What is the safest line in the last 7 days?"),
            Some(Intent::SafestLineWeek)
        );
    }

    #[test]
    fn nearby_stations() {
        assert_eq!(
            Intent::detect("What are the stations near me?"),
            Some(Intent::NearbyStations)
        );
        assert_eq!(
            Intent::detect("closest station to my location?"),
            Some(Intent::NearbyStations)
        );
        assert_eq!(
            Intent::detect("any nearby stations?"),
            Some(Intent::NearbyStations)
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            Intent::detect("TOTAL CRIMES TODAY"),
            Some(Intent::DailyCrimeCount)
        );
    }

    #[test]
    fn overlapping_keywords_resolve_by_priority() {
        // Mentions both crime-today and station phrasing; rule 1 wins.
        assert_eq!(
            Intent::detect("how many crimes today near the closest station?"),
            Some(Intent::DailyCrimeCount)
        );
        // Accident-today outranks safest-line when both appear.
        assert_eq!(
            Intent::detect("was the safest line free of accidents today?"),
            Some(Intent::DailyTrafficAccidentCount)
        );
    }

    #[test]
    fn unmatched_questions_fall_through() {
        assert_eq!(Intent::detect("What happened on 5th Avenue last week?"), None);
        assert_eq!(Intent::detect(""), None);
        // Keywords alone are not enough without their companion word.
        assert_eq!(Intent::detect("tell me about crime statistics"), None);
        assert_eq!(Intent::detect("is the station open?"), None);
    }
}
