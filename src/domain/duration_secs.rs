//! `serde` helper serializing `Duration` as fractional seconds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    duration.as_secs_f64().serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    if secs < 0.0 || !secs.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "invalid duration seconds: {secs}"
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Wrapper(#[serde(with = "super")] Duration);

    #[test]
    fn round_trips() {
        let original = Wrapper(Duration::from_millis(40_500));
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "40.5");
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.0, original.0);
    }
}
