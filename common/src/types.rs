//! Stage output type definitions
//!
//! Types shared across the three pipeline stages:
//! - DetectedItem: stage 1 (detection) output
//! - SustainabilityDecision: stage 2 (sorting/decision) output
//! - PolicyRecommendation: stage 3 (government/DIY suggestion) output
//! - ResultRecord: final per-item aggregate (all three stages merged)
//!
//! Wire field names follow the reply shape the prompts demand from the
//! model. Reward-bearing fields (`estimated_co2_saved_kg`,
//! `government_green_points`) and the closed enums carry no serde default:
//! their absence is a decode error, not a silent zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Physical condition of a detected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
    Damaged,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::New => write!(f, "new"),
            Condition::Used => write!(f, "used"),
            Condition::Damaged => write!(f, "damaged"),
        }
    }
}

/// Stage 1 output: one item recognized in the photo or description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    #[serde(rename = "item_name")]
    pub name: String,
    #[serde(rename = "primary_material")]
    pub material: String,
    pub condition: Condition,
    pub quantity: u32,
}

/// Sustainability classification of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SustainabilityType {
    Recyclable,
    Reusable,
    Upcyclable,
    #[serde(rename = "e-waste", alias = "e_waste", alias = "ewaste")]
    EWaste,
    Biodegradable,
}

impl fmt::Display for SustainabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SustainabilityType::Recyclable => write!(f, "recyclable"),
            SustainabilityType::Reusable => write!(f, "reusable"),
            SustainabilityType::Upcyclable => write!(f, "upcyclable"),
            SustainabilityType::EWaste => write!(f, "e-waste"),
            SustainabilityType::Biodegradable => write!(f, "biodegradable"),
        }
    }
}

/// Recommended end of life for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BestAction {
    Reuse,
    Upcycle,
    Recycle,
    Resell,
    Donate,
}

impl fmt::Display for BestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestAction::Reuse => write!(f, "reuse"),
            BestAction::Upcycle => write!(f, "upcycle"),
            BestAction::Recycle => write!(f, "recycle"),
            BestAction::Resell => write!(f, "resell"),
            BestAction::Donate => write!(f, "donate"),
        }
    }
}

/// Stage 2 output: sustainability decision for one detected item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityDecision {
    #[serde(default)]
    pub category: String,

    pub sustainability_type: SustainabilityType,

    pub best_action: BestAction,

    /// Approximate resale value in INR
    #[serde(
        default,
        rename = "estimated_resale_value_inr",
        alias = "resale_value"
    )]
    pub resale_value_inr: f64,

    /// CO2 avoided by taking best_action instead of disposal
    #[serde(rename = "estimated_co2_saved_kg", alias = "co2_saved_kg")]
    pub co2_saved_kg: f64,

    /// 0-100
    #[serde(default, rename = "sustainability_score", alias = "score")]
    pub score: u8,
}

/// Who carries out a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[serde(rename = "DIY", alias = "diy")]
    Diy,
    Household,
    Community,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Diy => write!(f, "DIY"),
            ActionType::Household => write!(f, "household"),
            ActionType::Community => write!(f, "community"),
        }
    }
}

/// Stage 3 output: government/DIY recommendation for one decided item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecommendation {
    #[serde(rename = "government_green_points", alias = "green_points")]
    pub green_points: u64,

    pub action_type: ActionType,

    #[serde(default)]
    pub steps: Vec<String>,

    #[serde(default)]
    pub tools: BTreeSet<String>,

    #[serde(default)]
    pub estimated_minutes: f64,
}

/// Final per-item aggregate, handed to the ledger after assembly.
///
/// `co2_saved_kg` and `points` are copied out of the stage outputs so
/// ledger sums never reach into nested records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub item: DetectedItem,
    pub decision: SustainabilityDecision,
    pub recommendation: PolicyRecommendation,
    pub co2_saved_kg: f64,
    pub points: u64,
    pub timestamp: String,
}

/// Item beyond the selection cap, echoed but not analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub name: String,
    pub quantity: u32,
}

/// Pipeline stage names, used in failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Detection,
    Decision,
    Recommendation,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Detection => write!(f, "detection"),
            PipelineStage::Decision => write!(f, "decision"),
            PipelineStage::Recommendation => write!(f, "recommendation"),
        }
    }
}

/// A per-item stage failure. The batch continues past these; they are
/// reported, never silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub item_name: String,
    pub stage: PipelineStage,
    pub reason: String,
}

impl ItemFailure {
    pub fn new(item_name: &str, stage: PipelineStage, reason: String) -> Self {
        Self {
            item_name: item_name.to_string(),
            stage,
            reason,
        }
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub records: Vec<ResultRecord>,
    pub skipped: Vec<SkippedItem>,
    pub failures: Vec<ItemFailure>,
}
