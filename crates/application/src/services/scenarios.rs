//! Built-in conversation practice scenarios
//!
//! Each scenario pins the system prompt for a chat session. Clients pick
//! one by id; client-supplied system messages are discarded so the prompt
//! here is the only instruction the model ever sees.

use domain::LanguagePair;
use serde::Serialize;

/// A practice scenario
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    /// Stable id clients select by
    pub id: &'static str,
    /// Short display title
    pub title: &'static str,
    /// One-line description for scenario pickers
    pub description: &'static str,
    #[serde(skip)]
    prompt: &'static str,
}

impl Scenario {
    /// Render the system prompt for a language pair
    ///
    /// The learner speaks `from` and practices `to`.
    pub fn system_prompt(&self, languages: &LanguagePair) -> String {
        format!(
            "{} Reply in {target}. Keep replies to two or three short sentences \
             suitable for a learner. If the learner writes in {source}, gently \
             continue in {target} and weave in the phrase they needed.",
            self.prompt,
            source = languages.from,
            target = languages.to,
        )
    }
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "free_talk",
        title: "Free conversation",
        description: "Open-ended practice with a patient conversation partner",
        prompt: "You are a friendly and patient language tutor having a casual \
                 conversation with a learner.",
    },
    Scenario {
        id: "cafe",
        title: "Ordering at a café",
        description: "Order drinks and food, ask about the menu, pay the bill",
        prompt: "You are a waiter at a busy café. The learner is a customer \
                 ordering from you. Stay in character.",
    },
    Scenario {
        id: "directions",
        title: "Asking for directions",
        description: "Find your way around an unfamiliar city",
        prompt: "You are a helpful local on a street corner. The learner is a \
                 lost tourist asking you for directions. Stay in character.",
    },
    Scenario {
        id: "job_interview",
        title: "Job interview",
        description: "Practice answering common interview questions",
        prompt: "You are a hiring manager interviewing the learner for a job \
                 they want. Ask one question at a time. Stay in character.",
    },
];

/// The default scenario when a chat request names none
pub const DEFAULT_SCENARIO_ID: &str = "free_talk";

/// Read-only catalog of the built-in scenarios
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioCatalog;

impl ScenarioCatalog {
    /// All scenarios, in display order
    pub fn list(self) -> &'static [Scenario] {
        SCENARIOS
    }

    /// Look up a scenario by id
    pub fn get(self, id: &str) -> Option<&'static Scenario> {
        SCENARIOS.iter().find(|s| s.id == id)
    }

    /// The default tutor scenario
    pub fn default_scenario(self) -> &'static Scenario {
        // The catalog always carries the default id.
        &SCENARIOS[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_exists() {
        assert!(ScenarioCatalog.get(DEFAULT_SCENARIO_ID).is_some());
    }

    #[test]
    fn ids_are_unique() {
        let catalog = ScenarioCatalog.list();
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(ScenarioCatalog.get("bank_heist").is_none());
    }

    #[test]
    fn default_scenario_matches_default_id() {
        assert_eq!(ScenarioCatalog.default_scenario().id, DEFAULT_SCENARIO_ID);
    }

    #[test]
    fn prompt_names_both_languages() {
        let pair = LanguagePair::parse("es", "en").unwrap();
        let scenario = ScenarioCatalog.get("cafe").unwrap();
        let prompt = scenario.system_prompt(&pair);
        assert!(prompt.contains("waiter"));
        assert!(prompt.contains("Reply in en"));
        assert!(prompt.contains("writes in es"));
    }

    #[test]
    fn listing_serializes_without_prompt() {
        let json = serde_json::to_value(ScenarioCatalog.list()).unwrap();
        let first = &json[0];
        assert!(first.get("id").is_some());
        assert!(first.get("prompt").is_none());
    }
}
