//! Multi-stage analysis pipeline
//!
//! Three rounds against the hosted model, strictly in order:
//! - Detect: photo or description -> list of items
//! - Decide: one item -> sustainability decision
//! - Recommend: item + decision -> government/DIY suggestion
//!
//! A detection failure fails the whole run. A decision or recommendation
//! failure aborts only that item and is recorded in the report; transport
//! failures always abort the run.

mod gemini;

pub use gemini::{Dispatch, GeminiClient};

use crate::error::{RecircleError, Result};
use crate::media::ImagePayload;
use recircle_common::{
    assemble_record, build_decision_prompt, build_detection_prompt, build_recommendation_prompt,
    parse_decision_response, parse_detection_response, parse_recommendation_response,
    select_items, AnalysisReport, ItemFailure, PipelineStage,
};

/// Raw input for one analysis run.
pub enum AnalysisInput {
    Photo(ImagePayload),
    Description(String),
}

/// Run the full detect -> decide -> recommend pipeline.
///
/// # Arguments
/// * `client` - dispatch seam to the inference service
/// * `input` - photo payload or typed description
/// * `item_cap` - maximum items analyzed (the rest are echoed as skipped)
/// * `verbose` - print per-stage diagnostics
pub async fn run_pipeline<D: Dispatch>(
    client: &D,
    input: &AnalysisInput,
    item_cap: usize,
    verbose: bool,
) -> Result<AnalysisReport> {
    // Stage 1: detection. A failure here fails the run.
    let detection_prompt = build_detection_prompt(matches!(input, AnalysisInput::Description(_)));
    let raw = match input {
        AnalysisInput::Photo(image) => {
            client.dispatch(&detection_prompt, Some(image), None).await?
        }
        AnalysisInput::Description(text) => {
            client.dispatch(&detection_prompt, None, Some(text)).await?
        }
    };
    if verbose {
        println!("  [detect] response length: {} chars", raw.len());
    }

    let items =
        parse_detection_response(&raw).map_err(|e| RecircleError::Detection(e.to_string()))?;
    if verbose {
        println!("  [detect] {} item(s) detected", items.len());
    }

    let (selected, skipped) = select_items(&items, item_cap);

    let mut records = Vec::new();
    let mut failures = Vec::new();

    for item in selected {
        // Stage 2: sustainability decision. Parse failures abort this
        // item only; a transport error still aborts the run via `?`.
        let decision_raw = client
            .dispatch(&build_decision_prompt(&item), None, None)
            .await?;
        let decision = match parse_decision_response(&decision_raw) {
            Ok(decision) => decision,
            Err(e) => {
                failures.push(ItemFailure::new(
                    &item.name,
                    PipelineStage::Decision,
                    e.to_string(),
                ));
                continue;
            }
        };
        if verbose {
            println!(
                "  [decide] {}: {} ({:.2} kg CO2)",
                item.name, decision.best_action, decision.co2_saved_kg
            );
        }

        // Stage 3: policy recommendation.
        let recommendation_raw = client
            .dispatch(&build_recommendation_prompt(&item, &decision), None, None)
            .await?;
        let recommendation = match parse_recommendation_response(&recommendation_raw) {
            Ok(recommendation) => recommendation,
            Err(e) => {
                failures.push(ItemFailure::new(
                    &item.name,
                    PipelineStage::Recommendation,
                    e.to_string(),
                ));
                continue;
            }
        };
        if verbose {
            println!(
                "  [recommend] {}: {} points",
                item.name, recommendation.green_points
            );
        }

        records.push(assemble_record(
            item,
            decision,
            recommendation,
            now_timestamp(),
        ));
    }

    Ok(AnalysisReport {
        records,
        skipped,
        failures,
    })
}

fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
