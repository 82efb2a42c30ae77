use serde_json::Value;

/// First non-blank value among `keys`, searched under `outputs` and then
/// `data.outputs`. Keys are tried in order within each container.
pub fn extract_field(response: &Value, keys: &[&str]) -> Option<String> {
    let containers = [
        response.get("outputs"),
        response.get("data").and_then(|data| data.get("outputs")),
    ];

    containers
        .into_iter()
        .flatten()
        .flat_map(|outputs| keys.iter().filter_map(move |key| outputs.get(*key)))
        .find_map(text_value)
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case_preferred_over_camel_case() {
        let response = json!({"outputs": {"month_title": "A", "monthTitle": "B"}});
        assert_eq!(extract_field(&response, &["month_title", "monthTitle"]), Some("A".to_string()));
    }

    #[test]
    fn test_blank_falls_through_to_next_key() {
        let response = json!({"outputs": {"month_title": "  ", "monthTitle": " B "}});
        assert_eq!(extract_field(&response, &["month_title", "monthTitle"]), Some("B".to_string()));
    }

    #[test]
    fn test_blocking_mode_body() {
        let response = json!({"data": {"outputs": {"street_summary": "1）热点集中"}}});
        assert_eq!(
            extract_field(&response, &["street_summary", "streetSummary"]),
            Some("1）热点集中".to_string())
        );
    }

    #[test]
    fn test_outputs_take_priority_over_data_outputs() {
        let response = json!({
            "outputs": {"type_title": "top"},
            "data": {"outputs": {"type_title": "nested"}}
        });
        assert_eq!(extract_field(&response, &["type_title"]), Some("top".to_string()));
    }

    #[test]
    fn test_missing_or_non_text_values() {
        let response = json!({"outputs": {"a": {"nested": 1}, "b": null, "c": 7}});
        assert_eq!(extract_field(&response, &["a", "b"]), None);
        assert_eq!(extract_field(&response, &["c"]), Some("7".to_string()));
        assert_eq!(extract_field(&json!("plain"), &["a"]), None);
    }
}
