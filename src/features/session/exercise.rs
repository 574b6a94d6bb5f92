//! Guided eye exercise catalog.
//!
//! Exercises are static data: the session manager only records which one
//! is active and schedules its end.

use serde::{Deserialize, Serialize};

/// A guided eye exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier used on the command line.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description shown when the exercise starts.
    pub description: String,
    /// How long the exercise runs.
    pub duration_seconds: u32,
    /// Ordered instructions.
    pub steps: Vec<String>,
}

struct ExerciseDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    duration_seconds: u32,
    steps: &'static [&'static str],
}

const CATALOG: &[ExerciseDef] = &[
    ExerciseDef {
        id: "20-20-20",
        name: "20-20-20 Rule",
        description: "Look at something 20 feet away for 20 seconds.",
        duration_seconds: 20,
        steps: &[
            "Look away from your screen",
            "Find an object about 20 feet (6 meters) away",
            "Focus on it until the timer ends",
            "Blink normally throughout",
        ],
    },
    ExerciseDef {
        id: "palming",
        name: "Palming",
        description: "Rest your eyes in warm darkness.",
        duration_seconds: 60,
        steps: &[
            "Rub your palms together until warm",
            "Close your eyes",
            "Cup your palms over your eyes without pressing",
            "Breathe slowly and relax",
        ],
    },
    ExerciseDef {
        id: "blinking",
        name: "Conscious Blinking",
        description: "Refresh the tear film with slow, full blinks.",
        duration_seconds: 30,
        steps: &[
            "Close your eyes fully for two seconds",
            "Open them and relax for two seconds",
            "Repeat until the timer ends",
        ],
    },
    ExerciseDef {
        id: "eye-rolling",
        name: "Eye Rolling",
        description: "Loosen the eye muscles with slow circles.",
        duration_seconds: 45,
        steps: &[
            "Sit upright and keep your head still",
            "Roll your eyes clockwise five times",
            "Roll your eyes counter-clockwise five times",
            "Close your eyes and rest",
        ],
    },
    ExerciseDef {
        id: "figure-eight",
        name: "Figure Eight",
        description: "Trace a large sideways eight with your eyes.",
        duration_seconds: 60,
        steps: &[
            "Pick a point on the floor about 10 feet away",
            "Trace an imaginary sideways eight with your eyes",
            "Keep tracing for 30 seconds",
            "Switch direction for the remaining time",
        ],
    },
];

impl From<&ExerciseDef> for Exercise {
    fn from(def: &ExerciseDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            duration_seconds: def.duration_seconds,
            steps: def.steps.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// All built-in exercises, in display order.
#[must_use]
pub fn catalog() -> Vec<Exercise> {
    CATALOG.iter().map(Exercise::from).collect()
}

/// Look up a built-in exercise by id (case-insensitive).
#[must_use]
pub fn find(id: &str) -> Option<Exercise> {
    CATALOG
        .iter()
        .find(|def| def.id.eq_ignore_ascii_case(id.trim()))
        .map(Exercise::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let exercises = catalog();
        assert_eq!(exercises.len(), 5);

        let mut ids: Vec<_> = exercises.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), exercises.len());
    }

    #[test]
    fn test_catalog_entries_have_steps() {
        for exercise in catalog() {
            assert!(exercise.duration_seconds > 0, "{} has no duration", exercise.id);
            assert!(!exercise.steps.is_empty(), "{} has no steps", exercise.id);
        }
    }

    #[test]
    fn test_find() {
        let palming = find("Palming").unwrap();
        assert_eq!(palming.duration_seconds, 60);
        assert_eq!(palming.steps[0], "Rub your palms together until warm");

        assert!(find("squinting").is_none());
    }
}
