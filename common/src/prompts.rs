//! Prompt builders
//!
//! One builder per pipeline stage:
//! - build_detection_prompt: stage 1 (item detection)
//! - build_decision_prompt: stage 2 (sustainability decision)
//! - build_recommendation_prompt: stage 3 (government/DIY suggestion)
//!
//! Every prompt states the exact reply JSON shape and demands JSON only;
//! the normalizer still treats the reply defensively.

use crate::types::{DetectedItem, SustainabilityDecision};

/// Item conditions the detection stage may report
pub const CONDITIONS: &[&str] = &["new", "used", "damaged"];

/// Sustainability classifications the decision stage may choose from
pub const SUSTAINABILITY_TYPES: &[&str] = &[
    "recyclable",
    "reusable",
    "upcyclable",
    "e-waste",
    "biodegradable",
];

/// End-of-life actions the decision stage may recommend
pub const BEST_ACTIONS: &[&str] = &["reuse", "upcycle", "recycle", "resell", "donate"];

/// Carriers of a recommended action
pub const ACTION_TYPES: &[&str] = &["DIY", "household", "community"];

/// Detection prompt (stage 1)
///
/// # Arguments
/// * `from_description` - true when the input is typed text instead of a photo
pub fn build_detection_prompt(from_description: bool) -> String {
    let source = if from_description {
        "the description that follows"
    } else {
        "the photo"
    };
    let conditions = CONDITIONS.join(" / ");

    format!(
        r#"You are a waste detection agent for a circular economy service.

Identify every discarded item in {source}.

## Output format (return exactly this JSON object)
{{
  "items": [
    {{
      "item_name": "short item name",
      "primary_material": "main material, e.g. PET, cotton, copper",
      "condition": "{conditions}",
      "quantity": 1
    }}
  ]
}}

## Rules
- quantity is a whole number, at least 1
- condition is one of: {conditions}
- report only items that are actually present
- JSON only. No prose, no code fences"#
    )
}

/// Decision prompt (stage 2)
///
/// Embeds the detected item as serialized JSON so the model sees exactly
/// what stage 1 reported.
pub fn build_decision_prompt(item: &DetectedItem) -> String {
    let detection = serde_json::to_string(item).unwrap_or_default();
    let types = SUSTAINABILITY_TYPES.join(" / ");
    let actions = BEST_ACTIONS.join(" / ");

    format!(
        r#"You are a circular economy sorting and carbon-impact agent.

Based on this detected item:
{detection}

Classify it and return exactly this JSON object:
{{
  "category": "product category",
  "sustainability_type": "{types}",
  "best_action": "{actions}",
  "estimated_resale_value_inr": 0,
  "estimated_co2_saved_kg": 0.0,
  "sustainability_score": 0
}}

## Rules
- estimated_co2_saved_kg is the CO2 avoided by taking best_action instead of disposal; never negative
- sustainability_score is an integer from 0 to 100
- use realistic but approximate values
- JSON only. No prose, no code fences"#
    )
}

/// Recommendation prompt (stage 3)
///
/// Embeds both upstream stage outputs.
pub fn build_recommendation_prompt(
    item: &DetectedItem,
    decision: &SustainabilityDecision,
) -> String {
    let detection = serde_json::to_string(item).unwrap_or_default();
    let classification = serde_json::to_string(decision).unwrap_or_default();
    let action_types = ACTION_TYPES.join(" / ");

    format!(
        r#"You are a sustainability policy agent suggesting concrete next steps.

Detected item:
{detection}

Sustainability decision:
{classification}

Suggest how the owner should carry out the decided action and return exactly this JSON object:
{{
  "government_green_points": 0,
  "action_type": "{action_types}",
  "steps": ["first step", "second step"],
  "tools": ["tool name"],
  "estimated_minutes": 0
}}

## Rules
- government_green_points is a whole number, never negative
- steps are short imperative sentences in the order to perform them
- tools lists distinct household tools needed; empty list if none
- estimated_minutes is the total hands-on time; never negative
- JSON only. No prose, no code fences"#
    )
}
