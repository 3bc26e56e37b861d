//! Threshold rules that turn body proportions into training priorities.

use bodyform_anthro::{Proportions, Ratio};
use serde::{Deserialize, Serialize};

/// Body region a priority points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Focus {
    LowerBody,
    UpperBody,
    Core,
}

impl Focus {
    pub fn label(&self) -> &'static str {
        match self {
            Focus::LowerBody => "Lower Body",
            Focus::UpperBody => "Upper Body",
            Focus::Core => "Core",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Below,
    Above,
}

/// `ratio` compared strictly against `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub ratio: Ratio,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Condition {
    pub fn below(ratio: Ratio, threshold: f64) -> Self {
        Self {
            ratio,
            comparison: Comparison::Below,
            threshold,
        }
    }

    pub fn above(ratio: Ratio, threshold: f64) -> Self {
        Self {
            ratio,
            comparison: Comparison::Above,
            threshold,
        }
    }

    /// An undefined ratio never satisfies a condition.
    pub fn holds(&self, proportions: &Proportions) -> bool {
        match proportions.get(self.ratio) {
            Some(value) => match self.comparison {
                Comparison::Below => value < self.threshold,
                Comparison::Above => value > self.threshold,
            },
            None => false,
        }
    }
}

/// Fires when any of its conditions hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRule {
    pub focus: Focus,
    pub weight: u32,
    pub reason: String,
    pub any_of: Vec<Condition>,
}

impl PriorityRule {
    pub fn fires(&self, proportions: &Proportions) -> bool {
        self.any_of.iter().any(|c| c.holds(proportions))
    }
}

/// A fired rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub focus: Focus,
    pub weight: u32,
    pub reason: String,
}

/// Ordered rule table; declaration order breaks weight ties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<PriorityRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<PriorityRule>) -> Self {
        Self { rules }
    }

    /// Evaluate every rule independently and return the fired priorities,
    /// heaviest first. Equal weights keep declaration order.
    pub fn evaluate(&self, proportions: &Proportions) -> Vec<Priority> {
        let mut fired: Vec<Priority> = self
            .rules
            .iter()
            .filter(|rule| rule.fires(proportions))
            .map(|rule| Priority {
                focus: rule.focus,
                weight: rule.weight,
                reason: rule.reason.clone(),
            })
            .collect();

        // stable
        fired.sort_by(|a, b| b.weight.cmp(&a.weight));

        for p in &fired {
            tracing::debug!(focus = ?p.focus, weight = p.weight, reason = %p.reason, "priority fired");
        }

        fired
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(vec![
            PriorityRule {
                focus: Focus::LowerBody,
                weight: 3,
                reason: "below-average leg proportions".to_string(),
                any_of: vec![
                    Condition::below(Ratio::LegToHeight, 0.45),
                    Condition::below(Ratio::ThighToHeight, 0.25),
                    Condition::below(Ratio::CalfToHeight, 0.20),
                ],
            },
            PriorityRule {
                focus: Focus::UpperBody,
                weight: 2,
                reason: "below-average arm and chest proportions".to_string(),
                any_of: vec![
                    Condition::below(Ratio::ArmToHeight, 0.35),
                    Condition::below(Ratio::UpperToLowerArm, 0.8),
                    Condition::below(Ratio::ChestToArm, 1.5),
                ],
            },
            PriorityRule {
                focus: Focus::Core,
                weight: 2,
                reason: "core development needed for stability and proportion".to_string(),
                any_of: vec![
                    Condition::below(Ratio::TorsoToHeight, 0.30),
                    Condition::below(Ratio::ChestToWaist, 1.2),
                    Condition::above(Ratio::WaistToHeight, 0.50),
                ],
            },
            PriorityRule {
                focus: Focus::UpperBody,
                weight: 1,
                reason: "shoulder development for balanced physique".to_string(),
                any_of: vec![
                    Condition::below(Ratio::ShoulderToHipRatio, 1.2),
                    Condition::below(Ratio::ShoulderToWaist, 1.3),
                ],
            },
        ])
    }
}

/// Reason of the first priority with `focus`, in the given (sorted) order
pub fn reason_for(priorities: &[Priority], focus: Focus) -> Option<&str> {
    priorities
        .iter()
        .find(|p| p.focus == focus)
        .map(|p| p.reason.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_fires_nothing() {
        let fired = RuleSet::default().evaluate(&Proportions::default());
        assert!(fired.is_empty());
    }

    #[test]
    fn test_strict_thresholds() {
        let at_threshold = Proportions::default().with(Ratio::LegToHeight, 0.45);
        assert!(RuleSet::default().evaluate(&at_threshold).is_empty());

        let just_below = Proportions::default().with(Ratio::LegToHeight, 0.4499);
        assert_eq!(RuleSet::default().evaluate(&just_below)[0].focus, Focus::LowerBody);

        let waist_high = Proportions::default().with(Ratio::WaistToHeight, 0.51);
        assert_eq!(RuleSet::default().evaluate(&waist_high)[0].focus, Focus::Core);
    }

    #[test]
    fn test_both_upper_body_rules_kept_and_sorted() {
        let p = Proportions::default()
            .with(Ratio::ShoulderToHipRatio, 1.0)
            .with(Ratio::ChestToWaist, 1.0)
            .with(Ratio::ArmToHeight, 0.30)
            .with(Ratio::CalfToHeight, 0.1);
        let fired = RuleSet::default().evaluate(&p);

        let order: Vec<_> = fired.iter().map(|p| (p.focus, p.weight)).collect();
        assert_eq!(
            order,
            vec![
                (Focus::LowerBody, 3),
                (Focus::UpperBody, 2),
                (Focus::Core, 2),
                (Focus::UpperBody, 1),
            ]
        );
        assert_eq!(
            reason_for(&fired, Focus::UpperBody),
            Some("below-average arm and chest proportions")
        );
    }

    #[test]
    fn test_only_shoulder_rule_supplies_upper_reason() {
        let p = Proportions::default().with(Ratio::ShoulderToWaist, 1.1);
        let fired = RuleSet::default().evaluate(&p);
        assert_eq!(fired.len(), 1);
        assert_eq!(
            reason_for(&fired, Focus::UpperBody),
            Some("shoulder development for balanced physique")
        );
        assert_eq!(reason_for(&fired, Focus::Core), None);
    }

    #[test]
    fn test_rule_set_serde() {
        let json = serde_json::to_value(RuleSet::default()).unwrap();
        assert_eq!(json["rules"][2]["any_of"][2]["comparison"], "above");
        assert_eq!(json["rules"][0]["any_of"][0]["ratio"], "legToHeight");
        let back: RuleSet = serde_json::from_value(json).unwrap();
        assert_eq!(back.rules.len(), 4);
        assert_eq!(back.rules[3].focus, Focus::UpperBody);
    }
}
