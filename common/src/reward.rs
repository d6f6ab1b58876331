//! Green-credit conversion
//!
//! 10 credits per kilogram of CO2 claimed-saved, 2 INR per credit.
//! Truncation to whole credits, not rounding.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub credits: u64,
    pub cash_inr: u64,
}

/// Deterministic, side-effect-free reward conversion.
pub fn compute_reward(co2_saved_kg: f64) -> Reward {
    let credits = (co2_saved_kg * 10.0).floor().max(0.0) as u64;
    Reward {
        credits,
        cash_inr: credits * 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_reward_zero() {
        assert_eq!(compute_reward(0.0), Reward { credits: 0, cash_inr: 0 });
    }

    #[test]
    fn test_compute_reward_one_kg() {
        assert_eq!(compute_reward(1.0), Reward { credits: 10, cash_inr: 20 });
    }

    #[test]
    fn test_compute_reward_truncates() {
        // 2.35 kg -> 23 credits, not 24
        assert_eq!(compute_reward(2.35), Reward { credits: 23, cash_inr: 46 });
    }

    #[test]
    fn test_compute_reward_sub_credit() {
        assert_eq!(compute_reward(0.09), Reward { credits: 0, cash_inr: 0 });
    }

    #[test]
    fn test_compute_reward_deterministic() {
        assert_eq!(compute_reward(1.5), compute_reward(1.5));
        assert_eq!(compute_reward(1.5).credits, 15);
        assert_eq!(compute_reward(1.5).cash_inr, 30);
    }
}
