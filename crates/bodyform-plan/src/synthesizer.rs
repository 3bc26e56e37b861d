//! Weekly plan synthesis from an aggregate profile.
//!
//! The week is fixed in shape: two lower-body days, two upper-body days, a
//! core day, a full-body day and a recovery Sunday. Fired priorities decide
//! whether Monday and Tuesday run the full templates (with the reason
//! appended to the description) or the same light sessions as Thursday and
//! Friday.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bodyform_anthro::AggregateProfile;
use serde::{Deserialize, Serialize};

use crate::catalog::{Exercise, ExerciseCatalog, Template};
use crate::rules::{reason_for, Focus, Priority, RuleSet};

/// Exercises in a light (truncated) session
pub const DEFAULT_LIGHT_SESSION_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub focus: String,
    pub description: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: BTreeMap<DayOfWeek, DayPlan>,
    /// Priorities that shaped this plan, heaviest first
    pub priorities: Vec<Priority>,
}

impl WeeklyPlan {
    pub fn day(&self, day: DayOfWeek) -> Option<&DayPlan> {
        self.days.get(&day)
    }

    /// True when no priority fired and the default balanced week was used
    pub fn is_balanced_default(&self) -> bool {
        self.priorities.is_empty()
    }
}

/// How a day is filled
#[derive(Debug, Clone, Copy)]
enum Session {
    /// Whole template, with a reason suffix for `Focus`
    Emphasized(Focus),
    /// Whole template, no suffix
    Full,
    /// First N exercises, no suffix
    Light,
}

struct DaySlot {
    day: DayOfWeek,
    focus: &'static str,
    description: &'static str,
    template: Template,
    fallback_reason: &'static str,
}

const WEEK: [DaySlot; 7] = [
    DaySlot {
        day: DayOfWeek::Monday,
        focus: "Lower Body",
        description: "Leg strength focus",
        template: Template::LowerBody,
        fallback_reason: "General leg strength",
    },
    DaySlot {
        day: DayOfWeek::Tuesday,
        focus: "Upper Body",
        description: "Arm and shoulder development",
        template: Template::UpperBody,
        fallback_reason: "General upper body strength",
    },
    DaySlot {
        day: DayOfWeek::Wednesday,
        focus: "Core",
        description: "Core stability and strength",
        template: Template::Core,
        fallback_reason: "General core stability",
    },
    DaySlot {
        day: DayOfWeek::Thursday,
        focus: "Lower Body",
        description: "Leg power and endurance",
        template: Template::LowerBody,
        fallback_reason: "",
    },
    DaySlot {
        day: DayOfWeek::Friday,
        focus: "Upper Body",
        description: "Chest and back focus",
        template: Template::UpperBody,
        fallback_reason: "",
    },
    DaySlot {
        day: DayOfWeek::Saturday,
        focus: "Full Body",
        description: "Overall strength and conditioning",
        template: Template::FullBody,
        fallback_reason: "",
    },
    DaySlot {
        day: DayOfWeek::Sunday,
        focus: "Rest or Active Recovery",
        description: "Light stretching or yoga",
        template: Template::Recovery,
        fallback_reason: "",
    },
];

/// Builds weekly plans from an injected catalog and rule set
#[derive(Debug, Clone)]
pub struct PlanSynthesizer {
    catalog: Arc<ExerciseCatalog>,
    rules: RuleSet,
    light_session_len: usize,
}

impl PlanSynthesizer {
    pub fn new(catalog: Arc<ExerciseCatalog>, rules: RuleSet) -> Self {
        Self {
            catalog,
            rules,
            light_session_len: DEFAULT_LIGHT_SESSION_LEN,
        }
    }

    pub fn with_light_session_len(mut self, len: usize) -> Self {
        self.light_session_len = len;
        self
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    /// Always produces a seven-day plan.
    pub fn synthesize(&self, profile: &AggregateProfile) -> WeeklyPlan {
        let priorities = self.rules.evaluate(&profile.proportions);
        let prioritized = !priorities.is_empty();

        let days = WEEK
            .iter()
            .map(|slot| {
                let session = match (slot.day, prioritized) {
                    (DayOfWeek::Monday, true) => Session::Emphasized(Focus::LowerBody),
                    (DayOfWeek::Tuesday, true) => Session::Emphasized(Focus::UpperBody),
                    (DayOfWeek::Wednesday, true) => Session::Emphasized(Focus::Core),
                    (DayOfWeek::Monday | DayOfWeek::Tuesday | DayOfWeek::Thursday | DayOfWeek::Friday, _) => {
                        Session::Light
                    }
                    _ => Session::Full,
                };
                (slot.day, self.fill(slot, session, &priorities))
            })
            .collect();

        tracing::debug!(
            priorities = priorities.len(),
            sources = profile.source_count,
            "weekly plan synthesized"
        );

        WeeklyPlan { days, priorities }
    }

    fn fill(&self, slot: &DaySlot, session: Session, priorities: &[Priority]) -> DayPlan {
        let template = self.catalog.template(slot.template);

        let (exercises, description) = match session {
            Session::Emphasized(focus) => {
                let reason = reason_for(priorities, focus).unwrap_or(slot.fallback_reason);
                (template.to_vec(), format!("{} ({})", slot.description, reason))
            }
            Session::Full => (template.to_vec(), slot.description.to_string()),
            Session::Light => {
                let n = self.light_session_len.min(template.len());
                (template[..n].to_vec(), slot.description.to_string())
            }
        };

        DayPlan {
            focus: slot.focus.to_string(),
            description,
            exercises,
        }
    }
}

impl Default for PlanSynthesizer {
    fn default() -> Self {
        Self::new(Arc::new(ExerciseCatalog::default()), RuleSet::default())
    }
}

/// Synthesize with the built-in catalog and rules.
pub fn synthesize_plan(profile: &AggregateProfile) -> WeeklyPlan {
    PlanSynthesizer::default().synthesize(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodyform_anthro::{Proportions, Ratio};

    fn profile(p: Proportions) -> AggregateProfile {
        AggregateProfile::from_proportions(p)
    }

    fn balanced() -> Proportions {
        Proportions::default()
            .with(Ratio::LegToHeight, 0.50)
            .with(Ratio::ThighToHeight, 0.27)
            .with(Ratio::CalfToHeight, 0.24)
            .with(Ratio::ArmToHeight, 0.40)
            .with(Ratio::UpperToLowerArm, 1.1)
            .with(Ratio::ChestToArm, 1.6)
            .with(Ratio::TorsoToHeight, 0.33)
            .with(Ratio::ChestToWaist, 1.4)
            .with(Ratio::WaistToHeight, 0.18)
            .with(Ratio::ShoulderToHipRatio, 1.35)
            .with(Ratio::ShoulderToWaist, 1.4)
    }

    #[test]
    fn test_always_seven_days_with_recovery_sunday() {
        let inputs = [
            Proportions::default(),
            balanced(),
            balanced().with(Ratio::LegToHeight, 0.3),
            balanced().with(Ratio::WaistToHeight, 0.9).with(Ratio::ShoulderToWaist, 1.0),
        ];
        for p in inputs {
            let plan = synthesize_plan(&profile(p));
            assert_eq!(plan.days.len(), 7);
            assert!(plan.days.values().all(|d| !d.focus.is_empty()));
            let sunday = plan.day(DayOfWeek::Sunday).unwrap();
            assert_eq!(sunday.focus, "Rest or Active Recovery");
            assert_eq!(sunday.exercises[0].name, "Yoga Flow");
        }
    }

    #[test]
    fn test_lower_body_only_scenario() {
        let p = Proportions::default()
            .with(Ratio::LegToHeight, 0.40)
            .with(Ratio::ThighToHeight, 0.30)
            .with(Ratio::CalfToHeight, 0.25)
            .with(Ratio::ArmToHeight, 0.40)
            .with(Ratio::TorsoToHeight, 0.35)
            .with(Ratio::ShoulderToHipRatio, 1.25);
        let plan = synthesize_plan(&profile(p));

        assert_eq!(plan.priorities.len(), 1);
        assert_eq!(plan.priorities[0].focus, Focus::LowerBody);
        assert_eq!(plan.priorities[0].weight, 3);

        let monday = plan.day(DayOfWeek::Monday).unwrap();
        assert_eq!(monday.exercises.len(), 5);
        assert_eq!(monday.description, "Leg strength focus (below-average leg proportions)");

        let tuesday = plan.day(DayOfWeek::Tuesday).unwrap();
        assert_eq!(tuesday.exercises.len(), 5);
        assert_eq!(
            tuesday.description,
            "Arm and shoulder development (General upper body strength)"
        );

        let wednesday = plan.day(DayOfWeek::Wednesday).unwrap();
        assert_eq!(wednesday.description, "Core stability and strength (General core stability)");
        assert_eq!(wednesday.exercises.len(), 4);
    }

    #[test]
    fn test_default_balanced_plan() {
        let plan = synthesize_plan(&profile(balanced()));
        assert!(plan.is_balanced_default());

        for day in [DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Thursday, DayOfWeek::Friday] {
            let d = plan.day(day).unwrap();
            assert_eq!(d.exercises.len(), 4, "{day}");
            assert!(!d.description.contains('('), "{day}");
        }
        assert_eq!(plan.day(DayOfWeek::Monday).unwrap().description, "Leg strength focus");
        assert_eq!(plan.day(DayOfWeek::Saturday).unwrap().exercises.len(), 4);
        assert_eq!(plan.day(DayOfWeek::Wednesday).unwrap().description, "Core stability and strength");
    }

    #[test]
    fn test_thursday_friday_always_light() {
        let plan = synthesize_plan(&profile(balanced().with(Ratio::LegToHeight, 0.2)));
        let thursday = plan.day(DayOfWeek::Thursday).unwrap();
        let friday = plan.day(DayOfWeek::Friday).unwrap();
        assert_eq!(thursday.exercises.len(), 4);
        assert_eq!(friday.exercises.len(), 4);
        assert_eq!(thursday.description, "Leg power and endurance");
        assert_eq!(friday.exercises[3].name, "Bicep Curls");
    }

    #[test]
    fn test_upper_body_reason_uses_heaviest_rule() {
        let p = balanced()
            .with(Ratio::ShoulderToHipRatio, 1.0)
            .with(Ratio::UpperToLowerArm, 0.5);
        let plan = synthesize_plan(&profile(p));
        assert_eq!(
            plan.day(DayOfWeek::Tuesday).unwrap().description,
            "Arm and shoulder development (below-average arm and chest proportions)"
        );
    }

    #[test]
    fn test_injected_catalog_and_light_len() {
        let mut catalog = ExerciseCatalog::default();
        catalog.lower_body.truncate(2);
        let synthesizer = PlanSynthesizer::new(Arc::new(catalog), RuleSet::default())
            .with_light_session_len(3);

        let plan = synthesizer.synthesize(&profile(balanced()));
        assert_eq!(plan.day(DayOfWeek::Monday).unwrap().exercises.len(), 2);
        assert_eq!(plan.day(DayOfWeek::Tuesday).unwrap().exercises.len(), 3);
    }

    #[test]
    fn test_plan_serializes_by_day_name() {
        let plan = synthesize_plan(&profile(balanced()));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["days"]["Sunday"]["focus"], "Rest or Active Recovery");
        assert_eq!(json["days"]["Wednesday"]["exercises"][0]["duration"], "30 seconds");
    }
}
