use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept an id sent either as a number or as a numeric string
pub fn deserialize_flexible_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// Accept a count sent as a number or numeric string; anything else is 0
pub fn deserialize_flexible_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_as_i64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

/// Accept text sent as a string or a number
pub fn deserialize_flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accept a flag sent as a bool, a number, or "true"/"Y"
pub fn deserialize_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().map_or(false, |n| n != 0),
        Some(Value::String(s)) => matches!(s.to_ascii_lowercase().as_str(), "true" | "y" | "1"),
        _ => false,
    })
}

/// Treat an explicit `null` like a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First id that is present and non-zero
pub fn first_id(candidates: &[Option<i64>]) -> Option<i64> {
    candidates.iter().flatten().copied().find(|id| *id != 0)
}

/// First text that is present and non-empty, or an empty string
pub fn first_text(candidates: &[&Option<String>]) -> String {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_flexible_id")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_flexible_u32")]
        count: u32,
        #[serde(default, deserialize_with = "deserialize_flexible_string")]
        hour: Option<String>,
        #[serde(default, deserialize_with = "deserialize_flexible_bool")]
        flag: bool,
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<String>,
    }

    #[test]
    fn test_flexible_fields() {
        let sample: Sample = serde_json::from_value(json!({
            "id": "42", "count": 6, "hour": 9, "flag": "Y", "items": null
        }))
        .unwrap();

        assert_eq!(sample.id, Some(42));
        assert_eq!(sample.count, 6);
        assert_eq!(sample.hour.as_deref(), Some("9"));
        assert!(sample.flag);
        assert!(sample.items.is_empty());
    }

    #[test]
    fn test_missing_and_malformed_fields() {
        let sample: Sample = serde_json::from_value(json!({"id": "abc", "count": -1})).unwrap();
        assert_eq!(sample.id, None);
        assert_eq!(sample.count, 0);
        assert_eq!(sample.hour, None);
        assert!(!sample.flag);
    }

    #[test]
    fn test_first_helpers() {
        assert_eq!(first_id(&[Some(0), None, Some(7)]), Some(7));
        assert_eq!(first_id(&[None, Some(0)]), None);

        let empty = Some(String::new());
        let title = Some("Quarterly plan".to_string());
        assert_eq!(first_text(&[&empty, &None, &title]), "Quarterly plan");
        assert_eq!(first_text(&[&None]), "");
    }
}
