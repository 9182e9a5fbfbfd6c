//! Structured-output extraction from a shape-unstable agent response.
//!
//! Strategy precedence, first match wins:
//! 1. typed analysis object → its fields as a plain map
//! 2. envelope `structured_response` entry (non-null) → coerced to a map
//! 3. envelope `messages`, scanned most-recent-first: the LAST tool call
//!    of the first message whose last call carries an object `args`
//! 4. empty map — malformed output is not an error here
//!
//! The reverse scan and last-call pick are deliberate tie-break rules:
//! most recent tool invocation wins, last call within it wins.

use serde_json::{Map, Value};

use super::AgentResponse;

/// Reduce any agent response shape to a plain analysis map.
///
/// Pure function; never fails. Total extraction failure is the empty
/// map, which downstream normalization treats as an empty analysis.
pub fn extract_structured(response: &AgentResponse) -> Map<String, Value> {
    match response {
        AgentResponse::Typed(analysis) => match serde_json::to_value(analysis) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        AgentResponse::Raw(value) => extract_from_envelope(value),
    }
}

fn extract_from_envelope(value: &Value) -> Map<String, Value> {
    // Non-mapping bodies cannot expose fields; degrade to empty.
    let Some(obj) = value.as_object() else {
        return Map::new();
    };

    // structured_response wins over any tool-call trail.
    match obj.get("structured_response") {
        None | Some(Value::Null) => {}
        Some(sr) => return coerce_to_map(sr),
    }

    // Fallback: newest message first, last tool call within it.
    if let Some(messages) = obj.get("messages").and_then(Value::as_array) {
        for message in messages.iter().rev() {
            let Some(calls) = message.get("tool_calls").and_then(Value::as_array) else {
                continue;
            };
            if let Some(Value::Object(args)) = calls.last().and_then(|call| call.get("args")) {
                return args.clone();
            }
        }
    }

    Map::new()
}

/// Coerce a value that should expose fields into a plain map.
fn coerce_to_map(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ReviewAnalysis;
    use serde_json::json;

    #[test]
    fn typed_analysis_becomes_plain_map() {
        let response = AgentResponse::Typed(ReviewAnalysis {
            rating: Some(5),
            sentiment: Some("positive".to_string()),
            key_points: vec!["great quality".to_string()],
        });
        let map = extract_structured(&response);
        assert_eq!(map.get("rating"), Some(&json!(5)));
        assert_eq!(map.get("sentiment"), Some(&json!("positive")));
        assert_eq!(map.get("key_points"), Some(&json!(["great quality"])));
    }

    #[test]
    fn structured_response_entry_is_extracted() {
        let response = AgentResponse::Raw(json!({
            "structured_response": {"rating": 4, "sentiment": "negative"}
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("rating"), Some(&json!(4)));
    }

    #[test]
    fn structured_response_wins_over_tool_calls() {
        let response = AgentResponse::Raw(json!({
            "structured_response": {"rating": 5},
            "messages": [
                {"tool_calls": [{"args": {"rating": 1}}]}
            ]
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("rating"), Some(&json!(5)));
    }

    #[test]
    fn null_structured_response_falls_through_to_tool_calls() {
        let response = AgentResponse::Raw(json!({
            "structured_response": null,
            "messages": [
                {"tool_calls": [{"args": {"rating": 3}}]}
            ]
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("rating"), Some(&json!(3)));
    }

    #[test]
    fn non_object_structured_response_degrades_to_empty() {
        // Present but not coercible: strategy 2 still wins, with an
        // empty result — it does not fall through to messages.
        let response = AgentResponse::Raw(json!({
            "structured_response": "not a mapping",
            "messages": [
                {"tool_calls": [{"args": {"rating": 2}}]}
            ]
        }));
        assert!(extract_structured(&response).is_empty());
    }

    #[test]
    fn reverse_scan_takes_last_message_last_call() {
        let response = AgentResponse::Raw(json!({
            "messages": [
                {"tool_calls": [{"args": {"a": 1}}]},
                {"tool_calls": [{"args": {"a": 2}}]}
            ]
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("a"), Some(&json!(2)));
    }

    #[test]
    fn last_call_within_message_wins() {
        let response = AgentResponse::Raw(json!({
            "messages": [
                {"tool_calls": [
                    {"args": {"a": 1}},
                    {"args": {"a": 2}}
                ]}
            ]
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("a"), Some(&json!(2)));
    }

    #[test]
    fn message_with_bad_last_call_is_skipped() {
        // Newest message's last call has scalar args; scanning continues
        // to the older message.
        let response = AgentResponse::Raw(json!({
            "messages": [
                {"tool_calls": [{"args": {"a": 1}}]},
                {"tool_calls": [{"args": "scalar"}]}
            ]
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("a"), Some(&json!(1)));
    }

    #[test]
    fn messages_without_tool_calls_are_skipped() {
        let response = AgentResponse::Raw(json!({
            "messages": [
                {"tool_calls": [{"args": {"a": 1}}]},
                {"content": "some assistant text"},
                {"tool_calls": []}
            ]
        }));
        let map = extract_structured(&response);
        assert_eq!(map.get("a"), Some(&json!(1)));
    }

    #[test]
    fn empty_tool_calls_yield_empty_map() {
        let response = AgentResponse::Raw(json!({"messages": [{"tool_calls": []}]}));
        assert!(extract_structured(&response).is_empty());
    }

    #[test]
    fn no_match_yields_empty_map_not_error() {
        for value in [
            json!("free text"),
            json!(42),
            json!(null),
            json!({"unrelated": true, "messages": "not an array"}),
            json!({"messages": []}),
        ] {
            let map = extract_structured(&AgentResponse::Raw(value));
            assert!(map.is_empty());
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let response = AgentResponse::Raw(json!({
            "messages": [{"tool_calls": [{"args": {"rating": 5, "sentiment": "positive"}}]}]
        }));
        let first = extract_structured(&response);
        let second = extract_structured(&response);
        assert_eq!(first, second);
    }
}
