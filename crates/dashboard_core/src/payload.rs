//! Tolerant readers for endpoint bodies.
//!
//! Bodies are read through the schemas in `shared`, but a body that does not
//! match degrades to absent values instead of failing the batch.

use serde_json::{Map, Value};
use shared::domain::{RiskEntry, RiskScore};

/// `status` of a stage body, if any.
pub fn stage_status(body: &Value) -> Option<String> {
    body.get("status").and_then(scalar_text)
}

/// Rows of a risk register body in delivered order. Anything other than an
/// array reads as an empty register.
pub fn risk_register(body: Value) -> Vec<RiskEntry> {
    match body {
        Value::Array(rows) => rows.into_iter().map(risk_entry).collect(),
        _ => Vec::new(),
    }
}

/// A single register row. Non-object rows keep their slot as an empty entry.
/// Unrecognised fields are carried along untouched.
pub fn risk_entry(row: Value) -> RiskEntry {
    let Value::Object(mut fields) = row else {
        return RiskEntry::default();
    };

    RiskEntry {
        id: fields.remove("id").filter(|id| !id.is_null()),
        name: take_text(&mut fields, "name"),
        description: take_text(&mut fields, "description"),
        impact: fields.remove("impact").as_ref().and_then(score),
        likelihood: fields.remove("likelihood").as_ref().and_then(score),
        mitigation: take_text(&mut fields, "mitigation"),
        extra: fields,
    }
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    fields.remove(key).as_ref().and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn score(value: &Value) -> Option<RiskScore> {
    match value {
        Value::Null => None,
        Value::Number(number) => Some(RiskScore::Score(number.clone())),
        Value::String(text) => Some(RiskScore::Level(text.clone())),
        other => Some(RiskScore::Level(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stage_status_reads_status_field() {
        assert_eq!(
            stage_status(&json!({ "status": "in_review" })).as_deref(),
            Some("in_review")
        );
    }

    #[test]
    fn stage_status_is_absent_for_mismatched_bodies() {
        assert_eq!(stage_status(&json!({ "state": "complete" })), None);
        assert_eq!(stage_status(&json!({ "status": null })), None);
        assert_eq!(stage_status(&json!(["complete"])), None);
        assert_eq!(stage_status(&json!("complete")), None);
    }

    #[test]
    fn non_string_status_is_stringified() {
        assert_eq!(stage_status(&json!({ "status": 3 })).as_deref(), Some("3"));
        assert_eq!(
            stage_status(&json!({ "status": true })).as_deref(),
            Some("true")
        );
    }

    #[test]
    fn register_keeps_order_and_slots() {
        let rows = risk_register(json!([
            { "name": "B" },
            "garbage",
            { "name": "A", "impact": 5, "likelihood": "low" }
        ]));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name.as_deref(), Some("B"));
        assert_eq!(rows[1], RiskEntry::default());
        assert_eq!(rows[2].name.as_deref(), Some("A"));
        assert_eq!(rows[2].impact, Some(RiskScore::from(5)));
        assert_eq!(rows[2].likelihood, Some(RiskScore::from("low")));
    }

    #[test]
    fn non_array_register_is_empty() {
        assert!(risk_register(json!({ "name": "Data drift" })).is_empty());
        assert!(risk_register(Value::Null).is_empty());
    }

    #[test]
    fn register_row_carries_backend_extras() {
        let entry = risk_entry(json!({
            "id": 7,
            "name": "Bias",
            "description": "Skewed training data",
            "impact": "high",
            "likelihood": "high",
            "mitigation": "Rebalance dataset"
        }));
        assert_eq!(entry.id, Some(json!(7)));
        assert_eq!(entry.mitigation.as_deref(), Some("Rebalance dataset"));
        assert!(entry.extra.is_empty());
    }

    #[test]
    fn register_row_keeps_ids_and_unknown_fields_as_delivered() {
        let row = json!({
            "id": "R-7",
            "name": "Bias",
            "owner": "ml-platform",
            "tags": ["fairness"]
        });

        let entry = risk_entry(row.clone());

        assert_eq!(entry.id, Some(json!("R-7")));
        assert_eq!(entry.extra.get("owner"), Some(&json!("ml-platform")));
        let echoed = serde_json::to_value(&entry).expect("json");
        assert_eq!(echoed["id"], row["id"]);
        assert_eq!(echoed["tags"], row["tags"]);
    }
}
