//! Model response normalization
//!
//! Converts the free-form text the model returns into structured values.
//! `normalize` strips fenced-code markers and attempts a strict JSON
//! parse; anything that is not a single JSON object yields `None`, never
//! an error. The typed stage decoders sit on top of it and report a
//! missing required field or an out-of-domain value as a parse error.

use crate::error::{Error, Result};
use crate::types::{DetectedItem, PolicyRecommendation, SustainabilityDecision};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static! {
    /// Fenced-code-block marker, language-tagged (```json) or bare (```)
    static ref FENCE_RE: Regex = Regex::new(r"```[A-Za-z0-9_-]*").unwrap();
}

/// Remove fenced-code-block markers and trim surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// Normalize a raw model reply into a JSON object.
///
/// # Returns
/// * `Some(map)` - the reply was a single JSON object after fence-stripping
/// * `None` - malformed JSON, empty input, or a non-object top level
///
/// Absence is the signal here; downstream stages treat `None` as a
/// terminal failure for that stage, with no partial recovery.
pub fn normalize(raw: &str) -> Option<Map<String, Value>> {
    let stripped = strip_code_fences(raw);
    if stripped.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(&stripped) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Decode the detection reply: a JSON object with an `items` array.
///
/// An empty `items` array is a valid result. A missing array, a
/// non-object reply or an item with quantity 0 is a parse error.
pub fn parse_detection_response(raw: &str) -> Result<Vec<DetectedItem>> {
    let map = normalize(raw)
        .ok_or_else(|| Error::Parse("detection reply is not a JSON object".to_string()))?;

    let items = map
        .get("items")
        .ok_or_else(|| Error::Parse("detection reply has no items list".to_string()))?;

    let items: Vec<DetectedItem> = serde_json::from_value(items.clone())
        .map_err(|e| Error::Parse(format!("detection items: {}", e)))?;

    for item in &items {
        if item.quantity < 1 {
            return Err(Error::Parse(format!(
                "item \"{}\" has quantity {}",
                item.name, item.quantity
            )));
        }
    }

    Ok(items)
}

/// Decode the sustainability-decision reply.
///
/// Rejects a negative or non-finite `estimated_co2_saved_kg` and a score
/// above 100; a missing required field surfaces as a serde error.
pub fn parse_decision_response(raw: &str) -> Result<SustainabilityDecision> {
    let map = normalize(raw)
        .ok_or_else(|| Error::Parse("decision reply is not a JSON object".to_string()))?;

    let decision: SustainabilityDecision = serde_json::from_value(Value::Object(map))
        .map_err(|e| Error::Parse(format!("decision fields: {}", e)))?;

    if !decision.co2_saved_kg.is_finite() || decision.co2_saved_kg < 0.0 {
        return Err(Error::Parse(format!(
            "estimated_co2_saved_kg must be non-negative, got {}",
            decision.co2_saved_kg
        )));
    }
    if decision.score > 100 {
        return Err(Error::Parse(format!(
            "sustainability score {} out of range",
            decision.score
        )));
    }
    if decision.resale_value_inr < 0.0 {
        return Err(Error::Parse(format!(
            "resale value must be non-negative, got {}",
            decision.resale_value_inr
        )));
    }

    Ok(decision)
}

/// Decode the policy-recommendation reply.
pub fn parse_recommendation_response(raw: &str) -> Result<PolicyRecommendation> {
    let map = normalize(raw)
        .ok_or_else(|| Error::Parse("recommendation reply is not a JSON object".to_string()))?;

    let recommendation: PolicyRecommendation = serde_json::from_value(Value::Object(map))
        .map_err(|e| Error::Parse(format!("recommendation fields: {}", e)))?;

    if !recommendation.estimated_minutes.is_finite() || recommendation.estimated_minutes < 0.0 {
        return Err(Error::Parse(format!(
            "estimated_minutes must be non-negative, got {}",
            recommendation.estimated_minutes
        )));
    }

    Ok(recommendation)
}
