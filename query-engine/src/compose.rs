//! Answer composition: decide whether the language model is called at all.
//!
//! Special intents have purely enumerable answers, so they are synthesized
//! deterministically from the aggregate — no external dependency, testable
//! offline. Only the generic path talks to the model, and its reply is used
//! verbatim.

use chrono::NaiveDate;
use tracing::{debug, warn};
use vector_gateway::SearchMatch;

use crate::error::EngineError;
use crate::intent::Intent;
use crate::{AnswerGenerator, aggregate, prompt};

/// A composed answer plus the matches that ground it.
#[derive(Debug, Clone)]
pub struct ComposedAnswer {
    /// Final answer text (deterministic or model-generated).
    pub answer: String,
    /// Matches used to ground the answer, in retrieval order. For special
    /// intents this is the subset that fed the aggregate.
    pub sources: Vec<SearchMatch>,
    /// Aggregate count, set only for the counting intents.
    pub count: Option<u64>,
}

/// Compose the answer for a question over the retrieved matches.
///
/// `today` is passed in (rather than read from the clock here) so the
/// date-pinned aggregates stay testable.
///
/// # Errors
/// [`EngineError::Generation`] when the model call fails; the retrieved
/// matches travel inside the error so callers can still expose them.
pub async fn compose<G: AnswerGenerator>(
    generator: &G,
    question: &str,
    matches: Vec<SearchMatch>,
    intent: Option<Intent>,
    today: NaiveDate,
) -> Result<ComposedAnswer, EngineError> {
    match intent {
        Some(Intent::DailyCrimeCount) => {
            let (count, fed) = aggregate::daily_category_count(&matches, "crime", today);
            Ok(ComposedAnswer {
                answer: format!("The total number of crimes today is {count}."),
                sources: fed,
                count: Some(count),
            })
        }

        Some(Intent::DailyTrafficAccidentCount) => {
            let (count, fed) = aggregate::daily_category_count(&matches, "accident", today);
            Ok(ComposedAnswer {
                answer: format!("The total number of traffic accidents today is {count}."),
                sources: fed,
                count: Some(count),
            })
        }

        Some(Intent::SafestLineWeek) => {
            let (lines, min_incidents, fed) = aggregate::safest_lines(&matches);
            let answer = if lines.is_empty() {
                "No data available for the safest line in the last 7 days.".to_string()
            } else {
                format!(
                    "The safest line in the last 7 days is the {} with {} incidents.",
                    lines.join(", "),
                    min_incidents.unwrap_or(0)
                )
            };
            Ok(ComposedAnswer {
                answer,
                sources: fed,
                count: None,
            })
        }

        Some(Intent::NearbyStations) => {
            let (stations, fed) = aggregate::nearby_stations(&matches);
            let answer = if stations.is_empty() {
                "No stations were found near your current location.".to_string()
            } else {
                format!(
                    "The stations near your current location are: {}.",
                    stations.join(", ")
                )
            };
            Ok(ComposedAnswer {
                answer,
                sources: fed,
                count: None,
            })
        }

        None => {
            let built = prompt::build_prompt(question, &matches);
            debug!(
                target: "query_engine::compose",
                prompt_len = built.len(),
                matches = matches.len(),
                "compose: generic path, calling generator"
            );

            match generator.generate(&built).await {
                Ok(answer) => Ok(ComposedAnswer {
                    answer,
                    sources: matches,
                    count: None,
                }),
                Err(err) => {
                    warn!(
                        target: "query_engine::compose",
                        error = %err,
                        "compose: generation failed, returning sources with the error"
                    );
                    Err(EngineError::Generation {
                        message: err.to_string(),
                        sources: matches,
                    })
                }
            }
        }
    }
}
