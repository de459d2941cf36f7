//! Canned predictions, chosen by score.

use posit_core::score::Score;

use crate::{PredictionError, PredictionGateway, Predictions};

// Index is score - 1.
const LOVE: [&str; 4] = [
    "Keep your heart guarded for now; a {color} sky brings misunderstandings.",
    "A quiet week in love. Wear something {color} and let things come to you.",
    "Someone close is thinking of you. The {animal} in you should make the first move.",
    "Passion is on its way! Like the {animal}, trust your instinct and dare.",
];

const HEALTH: [&str; 4] = [
    "Rest is not optional this week. Even the {animal} sleeps.",
    "Mind your sleep and drink more water; {color} foods will do you good.",
    "Your energy is steady. A walk outdoors will keep it that way.",
    "You are in top form, as strong as the {animal}. Enjoy it!",
];

const WORK: [&str; 4] = [
    "Postpone big decisions; the stars advise patience at work.",
    "Routine tasks dominate. Finish what you started before taking on more.",
    "A colleague will need your help. The {animal} in you knows how to lead.",
    "Success is near! A {color} folder may hold the opportunity you were waiting for.",
];

/// Built-in prediction table, personalised with the lucky color and totem
/// animal. Never unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictions;

impl StaticPredictions {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn pick(table: &[&str; 4], score: Score, color: &str, animal: &str) -> String {
        let idx = usize::from(score.get() - Score::MIN);
        table[idx]
            .replace("{color}", &color.to_lowercase())
            .replace("{animal}", &animal.to_lowercase())
    }
}

impl PredictionGateway for StaticPredictions {
    fn predict(
        &self,
        color: &str,
        animal: &str,
        love: Score,
        health: Score,
        work: Score,
    ) -> Result<Predictions, PredictionError> {
        let color = color.trim();
        let animal = animal.trim();
        if color.is_empty() {
            return Err(PredictionError::MissingKey("color"));
        }
        if animal.is_empty() {
            return Err(PredictionError::MissingKey("animal"));
        }
        tracing::debug!(
            color,
            animal,
            love = love.get(),
            health = health.get(),
            work = work.get(),
            "static prediction"
        );
        Ok(Predictions {
            love: Self::pick(&LOVE, love, color, animal),
            health: Self::pick(&HEALTH, health, color, animal),
            work: Self::pick(&WORK, work, color, animal),
        })
    }
}
