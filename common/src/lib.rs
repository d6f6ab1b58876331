//! Recircle Common Library
//!
//! Types and pure pipeline logic shared by the CLI frontend:
//! stage output types, response normalization, prompt builders,
//! item selection, record assembly and the reward conversion.

pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod reward;
pub mod types;

pub use error::{Error, Result};
pub use normalizer::{
    normalize, parse_decision_response, parse_detection_response, parse_recommendation_response,
    strip_code_fences,
};
pub use pipeline::{assemble_record, record_reward, select_items, DEFAULT_ITEM_CAP};
pub use prompts::{build_decision_prompt, build_detection_prompt, build_recommendation_prompt};
pub use reward::{compute_reward, Reward};
pub use types::{
    ActionType, AnalysisReport, BestAction, Condition, DetectedItem, ItemFailure, PipelineStage,
    PolicyRecommendation, ResultRecord, SkippedItem, SustainabilityDecision, SustainabilityType,
};
