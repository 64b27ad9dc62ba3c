//! Prompt builder for the generic retrieval-and-synthesis path.

use serde_json::Value;
use vector_gateway::SearchMatch;

/// Build the generation prompt: a labeled context block (one line per
/// retrieved match) followed by the question.
///
/// Metadata keys render in sorted order so the same request always produces
/// the same prompt. The model's reply is used verbatim as the answer.
pub fn build_prompt(question: &str, matches: &[SearchMatch]) -> String {
    let mut context_lines = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let mut line = format!("[{}] id: {}, score: {:.3}", i + 1, m.id, m.score);
        for (key, value) in &m.metadata {
            line.push_str(&format!(", {key}: {}", render_value(value)));
        }
        context_lines.push(line);
    }

    format!(
        "Context from database:\n{}\n\nQuestion: {}\nAnswer:",
        context_lines.join("\n"),
        question.trim()
    )
}

/// Strings render bare; everything else keeps its JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_carries_question_and_context() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("category".into(), json!("crime"));
        metadata.insert("location".into(), json!("5th Ave"));
        let matches = vec![SearchMatch {
            id: "p1".into(),
            score: 0.9123,
            metadata,
        }];

        let prompt = build_prompt("What happened nearby?", &matches);
        assert!(prompt.starts_with("Context from database:\n"));
        assert!(prompt.contains("[1] id: p1, score: 0.912"));
        assert!(prompt.contains("category: crime"));
        assert!(prompt.contains("location: 5th Ave"));
        assert!(prompt.ends_with("Question: What happened nearby?\nAnswer:"));
    }

    #[test]
    fn prompt_is_deterministic_for_the_same_matches() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("b_key".into(), json!(2));
        metadata.insert("a_key".into(), json!(1));
        let matches = vec![SearchMatch {
            id: "p1".into(),
            score: 0.5,
            metadata,
        }];

        assert_eq!(build_prompt("q", &matches), build_prompt("q", &matches));
        // Sorted key order, independent of insertion order.
        assert!(build_prompt("q", &matches).contains("a_key: 1, b_key: 2"));
    }
}
