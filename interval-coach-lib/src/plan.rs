// interval-coach-lib/src/plan.rs
use thiserror::Error;

/// Fixed rest between sets, exercises and sections.
pub const REST_DURATION_SECS: u32 = 15;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Workout plan has no sections.")]
    EmptyPlan,
    #[error("Section '{0}' has no exercises.")]
    EmptySection(String),
    #[error("Exercise '{exercise}' in section '{section}' must last at least one second.")]
    ZeroDuration { section: String, exercise: String },
    #[error("Exercise '{exercise}' in section '{section}' must have at least one set.")]
    ZeroSets { section: String, exercise: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub duration_secs: u32, // Per set
    pub sets: u32,
    pub reps: Option<String>,
    pub icon: Option<String>,
}

impl Exercise {
    /// Single-set exercise with no reps or icon.
    pub fn new(name: &str, duration_secs: u32) -> Self {
        Self {
            name: name.to_string(),
            duration_secs,
            sets: 1,
            reps: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_sets(mut self, sets: u32) -> Self {
        self.sets = sets;
        self
    }

    #[must_use]
    pub fn with_reps(mut self, reps: &str) -> Self {
        self.reps = Some(reps.to_string());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// One-line description used by plan listings, e.g. `💪 Push-Ups - 3 sets of 8-12`.
    pub fn summary(&self) -> String {
        let mut line = String::new();
        if let Some(icon) = &self.icon {
            line.push_str(icon);
            line.push(' ');
        }
        line.push_str(&self.name);
        if self.sets > 1 {
            line.push_str(&format!(" - {} sets", self.sets));
        }
        if let Some(reps) = &self.reps {
            line.push_str(&format!(" of {reps}"));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub duration_label: String, // Display only, e.g. "5 Minutes"
    pub exercises: Vec<Exercise>,
}

impl Section {
    pub fn new(name: &str, duration_label: &str, exercises: Vec<Exercise>) -> Self {
        Self {
            name: name.to_string(),
            duration_label: duration_label.to_string(),
            exercises,
        }
    }
}

/// Ordered, validated list of sections. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    sections: Vec<Section>,
}

impl WorkoutPlan {
    /// Validates the sections and builds a plan.
    /// # Errors
    /// - `Error::EmptyPlan` if there are no sections.
    /// - `Error::EmptySection` if a section has no exercises.
    /// - `Error::ZeroDuration` / `Error::ZeroSets` for an invalid exercise.
    pub fn new(sections: Vec<Section>) -> Result<Self, Error> {
        if sections.is_empty() {
            return Err(Error::EmptyPlan);
        }
        for section in &sections {
            if section.exercises.is_empty() {
                return Err(Error::EmptySection(section.name.clone()));
            }
            for exercise in &section.exercises {
                if exercise.duration_secs == 0 {
                    return Err(Error::ZeroDuration {
                        section: section.name.clone(),
                        exercise: exercise.name.clone(),
                    });
                }
                if exercise.sets == 0 {
                    return Err(Error::ZeroSets {
                        section: section.name.clone(),
                        exercise: exercise.name.clone(),
                    });
                }
            }
        }
        Ok(Self { sections })
    }

    /// The fixed workout shipped with the app.
    pub fn builtin() -> Self {
        let sections = vec![
            Section::new(
                "WARM-UP",
                "5 Minutes",
                vec![
                    Exercise::new("Jog in Place", 60).with_icon("🏃"),
                    Exercise::new("High Knees", 30).with_icon("🦵"),
                    Exercise::new("Butt Kicks", 30).with_icon("🦿"),
                    Exercise::new("Arm Circles Forward", 30).with_icon("⭕"),
                    Exercise::new("Arm Circles Backward", 30).with_icon("⭕"),
                    Exercise::new("Defensive Slide Steps", 60).with_icon("↔️"),
                ],
            ),
            Section::new(
                "UPPER BODY",
                "3-4 Minutes",
                vec![
                    Exercise::new("Push-Ups", 45)
                        .with_sets(3)
                        .with_reps("8-12")
                        .with_icon("💪"),
                    Exercise::new("Wall Push-Offs", 30)
                        .with_sets(3)
                        .with_reps("10")
                        .with_icon("🧱"),
                ],
            ),
            Section::new(
                "LOWER BODY",
                "2-3 Minutes",
                vec![
                    Exercise::new("Bodyweight Squats", 50)
                        .with_sets(3)
                        .with_reps("12-15")
                        .with_icon("🏋️"),
                    Exercise::new("Lunges", 45)
                        .with_reps("10 each leg")
                        .with_icon("🦵"),
                ],
            ),
            Section::new(
                "CORE STRENGTH",
                "3 Minutes",
                vec![
                    Exercise::new("Plank", 30).with_sets(2).with_icon("🤸"),
                    Exercise::new("Sit-Ups or Crunches", 40)
                        .with_reps("15")
                        .with_icon("🔥"),
                    Exercise::new("Russian Twists", 45)
                        .with_reps("20 total")
                        .with_icon("🌀"),
                ],
            ),
        ];
        // The literal above always satisfies validation.
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn exercise(&self, section_index: usize, exercise_index: usize) -> Option<&Exercise> {
        self.section(section_index)?.exercises.get(exercise_index)
    }

    pub fn first_exercise(&self) -> &Exercise {
        // new() and builtin() guarantee at least one section with one exercise
        &self.sections[0].exercises[0]
    }

    /// Estimated running time: every set plus a rest after each phase but the last.
    pub fn total_seconds(&self) -> u64 {
        let phases: u64 = self
            .sections
            .iter()
            .flat_map(|s| s.exercises.iter())
            .map(|e| u64::from(e.sets))
            .sum();
        let work: u64 = self
            .sections
            .iter()
            .flat_map(|s| s.exercises.iter())
            .map(|e| u64::from(e.duration_secs) * u64::from(e.sets))
            .sum();
        work + phases.saturating_sub(1) * u64::from(REST_DURATION_SECS)
    }
}

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
