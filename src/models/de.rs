use serde::{de::Error, Deserialize, Deserializer};

// Form submissions send numbers as floats or strings. Fractions round up to the next whole unit.
fn number_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn rounded_u32(f: f64) -> Option<u32> {
    let rounded = f.ceil();
    (rounded >= 0.0 && rounded <= u32::MAX as f64).then(|| rounded as u32)
}

/// Missing, negative and oversized amounts become `0`, which validation rejects.
pub fn deserialize_rounded_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).and_then(rounded_u32).unwrap_or(0))
}

pub fn deserialize_optional_rounded_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value.as_ref().and_then(number_from_value) {
        Some(f) if f > 0.0 => rounded_u32(f)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{} is out of range", f))),
        _ => Ok(None),
    }
}

pub fn deserialize_rounded_u8<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match number_from_value(&value) {
        Some(f) if (0.0..=255.0).contains(&f) => Ok(f.round() as u8),
        _ => Ok(0),
    }
}

/// Accepts either a JSON list or a comma separated string, trimming entries and dropping blanks.
pub fn deserialize_amenities<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    let amenities = match value {
        Some(serde_json::Value::String(s)) => split_amenities(&s),
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    };
    Ok(amenities)
}

pub fn split_amenities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `created_at` as RFC 3339 text in JSON and as a native date in BSON, so the
/// database sorts on the instant rather than on the string.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use mongodb::bson::{self, Bson};
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            value.serialize(serializer)
        } else {
            bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            return DateTime::<Utc>::deserialize(deserializer);
        }
        from_bson(Bson::deserialize(deserializer)?).map_err(D::Error::custom)
    }

    pub(crate) fn from_bson(value: Bson) -> Result<DateTime<Utc>, String> {
        match value {
            Bson::DateTime(date) => DateTime::from_timestamp_millis(date.timestamp_millis())
                .ok_or_else(|| format!("{} is out of range", date)),
            // Rows written before dates were stored natively
            Bson::String(text) => DateTime::parse_from_rfc3339(&text)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|e| e.to_string()),
            other => Err(format!("expected a date, found {}", other)),
        }
    }
}

pub mod optional_timestamp {
    use chrono::{DateTime, Utc};
    use mongodb::bson::Bson;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => super::timestamp::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            return Option::<DateTime<Utc>>::deserialize(deserializer);
        }
        match Option::<Bson>::deserialize(deserializer)? {
            None | Some(Bson::Null) => Ok(None),
            Some(value) => super::timestamp::from_bson(value)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}
