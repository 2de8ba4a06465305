//! Todo generation from fixed vocabularies.

use rand::Rng;
use sqlx::Postgres;
use sqlx::query_builder::Separated;

use crate::db::BulkRow;

/// Verbs that open a todo title.
pub const TITLE_VERBS: &[&str] = &[
    "Fix", "Update", "Create", "Review", "Test", "Deploy", "Optimize", "Configure", "Implement",
    "Design", "Analyze", "Schedule", "Complete", "Backup", "Setup", "Validate", "Integrate",
    "Refactor", "Train", "Plan", "Monitor", "Debug", "Install", "Migrate", "Document", "Organize",
    "Merge", "Build", "Patch",
];

/// Objects that complete a todo title.
pub const TITLE_OBJECTS: &[&str] = &[
    "user authentication system",
    "database queries",
    "API endpoints",
    "user interface",
    "payment gateway",
    "email notifications",
    "security settings",
    "backup system",
    "monitoring dashboard",
    "error handling",
    "data validation",
    "user permissions",
    "search functionality",
    "mobile responsiveness",
    "performance metrics",
    "log files",
    "configuration files",
    "third-party integrations",
    "code documentation",
    "test coverage",
    "production deployment",
    "staging environment",
    "development workflow",
    "bug reports",
    "feature requests",
    "user feedback",
    "system requirements",
    "project timeline",
    "team meetings",
    "code reviews",
    "quality assurance",
    "server maintenance",
];

/// Subjects that open a todo description.
pub const DESCRIPTION_SUBJECTS: &[&str] = &[
    "Review the project requirements",
    "Complete the documentation",
    "Schedule the meeting",
    "Update the database schema",
    "Fix the bug in authentication",
    "Implement the new feature",
    "Test the user interface",
    "Optimize the database queries",
    "Deploy to production server",
    "Create the user manual",
    "Backup the important data",
    "Configure the security settings",
    "Analyze the performance metrics",
    "Design the new workflow",
    "Integrate with third-party API",
    "Refactor the legacy code",
    "Validate the input forms",
    "Setup the monitoring system",
    "Train the new team members",
    "Plan the next sprint goals",
];

/// Actions that complete a todo description.
pub const DESCRIPTION_ACTIONS: &[&str] = &[
    "before the deadline approaches",
    "to improve system performance",
    "for better user experience",
    "according to best practices",
    "with proper error handling",
    "using modern standards",
    "following security guidelines",
    "to meet client requirements",
    "for scalability purposes",
    "with comprehensive testing",
    "including edge cases",
    "for maintainability",
    "considering performance impact",
    "with proper documentation",
    "following team conventions",
    "to reduce technical debt",
    "for better code quality",
    "with user feedback integration",
    "ensuring data consistency",
    "with automated monitoring",
];

/// Generated todo data ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTodo {
    pub title: String,
    pub user_id: i64,
    pub description: String,
}

impl BulkRow for GeneratedTodo {
    const COLUMNS: &'static [&'static str] = &["title", "user_id", "description"];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.title.as_str())
            .push_bind(self.user_id)
            .push_bind(self.description.as_str());
    }
}

/// Generates todos with random titles and descriptions.
///
/// Every word is drawn uniformly and independently, so a title is one of
/// `TITLE_VERBS.len() * TITLE_OBJECTS.len()` strings and a description one of
/// `DESCRIPTION_SUBJECTS.len() * DESCRIPTION_ACTIONS.len()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoGenerator;

impl TodoGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a title of the form `<verb> <object>.`.
    pub fn title(&self, rng: &mut impl Rng) -> String {
        format!("{} {}.", pick(TITLE_VERBS, rng), pick(TITLE_OBJECTS, rng))
    }

    /// Generates a description of the form `<subject> <action>.`.
    pub fn description(&self, rng: &mut impl Rng) -> String {
        format!(
            "{} {}.",
            pick(DESCRIPTION_SUBJECTS, rng),
            pick(DESCRIPTION_ACTIONS, rng)
        )
    }

    /// Generates a single todo owned by `user_id`.
    pub fn generate(&self, user_id: i64, rng: &mut impl Rng) -> GeneratedTodo {
        GeneratedTodo {
            title: self.title(rng),
            user_id,
            description: self.description(rng),
        }
    }
}

fn pick(words: &'static [&'static str], rng: &mut impl Rng) -> &'static str {
    words[rng.gen_range(0..words.len())]
}
