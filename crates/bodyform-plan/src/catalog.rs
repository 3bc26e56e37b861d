//! Exercise catalog: static reference data injected into the synthesizer.

use bodyform_core::Result;
use serde::{Deserialize, Serialize};

/// Either a repetition count or a timed hold, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    Reps(u32),
    Duration(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    #[serde(flatten)]
    pub volume: Volume,
}

impl Exercise {
    pub fn reps(name: &str, sets: u32, reps: u32) -> Self {
        Self {
            name: name.to_string(),
            sets,
            volume: Volume::Reps(reps),
        }
    }

    pub fn timed(name: &str, sets: u32, duration: &str) -> Self {
        Self {
            name: name.to_string(),
            sets,
            volume: Volume::Duration(duration.to_string()),
        }
    }
}

/// Which catalog template a day draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Template {
    LowerBody,
    UpperBody,
    Core,
    FullBody,
    Recovery,
}

/// Five ordered exercise templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCatalog {
    pub version: u32,
    pub lower_body: Vec<Exercise>,
    pub upper_body: Vec<Exercise>,
    pub core: Vec<Exercise>,
    pub full_body: Vec<Exercise>,
    pub recovery: Vec<Exercise>,
}

impl ExerciseCatalog {
    pub fn template(&self, template: Template) -> &[Exercise] {
        match template {
            Template::LowerBody => &self.lower_body,
            Template::UpperBody => &self.upper_body,
            Template::Core => &self.core,
            Template::FullBody => &self.full_body,
            Template::Recovery => &self.recovery,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self {
            version: 1,
            lower_body: vec![
                Exercise::reps("Squats", 3, 12),
                Exercise::reps("Lunges", 3, 10),
                Exercise::reps("Leg Press", 3, 15),
                Exercise::reps("Calf Raises", 3, 15),
                Exercise::reps("Deadlifts", 3, 10),
            ],
            upper_body: vec![
                Exercise::reps("Push-Ups", 3, 15),
                Exercise::reps("Pull-Ups", 3, 8),
                Exercise::reps("Shoulder Press", 3, 12),
                Exercise::reps("Bicep Curls", 3, 12),
                Exercise::reps("Tricep Dips", 3, 10),
            ],
            core: vec![
                Exercise::timed("Plank", 3, "30 seconds"),
                Exercise::reps("Russian Twists", 3, 20),
                Exercise::reps("Crunches", 3, 15),
                Exercise::reps("Leg Raises", 3, 12),
            ],
            full_body: vec![
                Exercise::reps("Burpees", 3, 10),
                Exercise::reps("Deadlifts", 3, 10),
                Exercise::reps("Bench Press", 3, 12),
                Exercise::reps("Bodyweight Squats", 3, 15),
            ],
            recovery: vec![
                Exercise::timed("Yoga Flow", 1, "20 minutes"),
                Exercise::timed("Dynamic Stretching", 1, "15 minutes"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_sizes() {
        let catalog = ExerciseCatalog::default();
        assert_eq!(catalog.template(Template::LowerBody).len(), 5);
        assert_eq!(catalog.template(Template::UpperBody).len(), 5);
        assert_eq!(catalog.template(Template::Core).len(), 4);
        assert_eq!(catalog.template(Template::FullBody).len(), 4);
        assert_eq!(catalog.template(Template::Recovery).len(), 2);
    }

    #[test]
    fn test_exercise_volume_is_flat() {
        let json = serde_json::to_value(Exercise::reps("Squats", 3, 12)).unwrap();
        assert_eq!(json["reps"], 12);
        assert!(json.get("duration").is_none());

        let json = serde_json::to_value(Exercise::timed("Plank", 3, "30 seconds")).unwrap();
        assert_eq!(json["duration"], "30 seconds");
        assert!(json.get("reps").is_none());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "version": 2,
            "lowerBody": [{"name": "Step-Ups", "sets": 4, "reps": 8}],
            "upperBody": [{"name": "Rows", "sets": 3, "reps": 10}],
            "core": [{"name": "Hollow Hold", "sets": 3, "duration": "20 seconds"}],
            "fullBody": [],
            "recovery": [{"name": "Walk", "sets": 1, "duration": "30 minutes"}]
        }"#;
        let catalog = ExerciseCatalog::from_json(json).unwrap();
        assert_eq!(catalog.version, 2);
        assert_eq!(catalog.lower_body[0], Exercise::reps("Step-Ups", 4, 8));
        assert_eq!(catalog.core[0].volume, Volume::Duration("20 seconds".into()));
        assert!(ExerciseCatalog::from_json("{}").is_err());
    }
}
