//! Built-in scenarios
//!
//! All scenarios run against one shared, mutable remote fixture: the
//! service's meal and combatant tables. Each scenario starts by clearing
//! both and ends by clearing them again, but nothing else isolates them.
//! In particular the lifecycle scenario assumes a freshly cleared meal table
//! hands out id 1, which is a property of the service, not of this harness.
//! A failed run leaves whatever it created behind.

use clap::ValueEnum;

use super::config::{Check, LeaderboardSort, Scenario};

/// Meal the lifecycle scenario creates, fetches and deletes
const LIFECYCLE_MEAL: &str = "Pasta";

/// Id the service is expected to assign to the first meal after a clear
const FIRST_MEAL_ID: u64 = 1;

/// Scenarios selectable with `--scenario`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScenarioKind {
    /// Create meals, prep two combatants, battle, read the leaderboard
    #[default]
    Battle,
    /// Create, fetch and delete a single meal; clear twice
    Lifecycle,
    /// Battle followed by lifecycle
    All,
}

impl ScenarioKind {
    pub fn scenario(&self) -> Scenario {
        match self {
            ScenarioKind::Battle => battle(),
            ScenarioKind::Lifecycle => lifecycle(),
            ScenarioKind::All => {
                let mut steps = battle().steps;
                steps.extend(lifecycle().steps);
                Scenario {
                    name: "all".to_string(),
                    description: Some("battle, then meal lifecycle".to_string()),
                    steps,
                }
            }
        }
    }
}

/// Health, setup, two-combatant battle and leaderboard
pub fn battle() -> Scenario {
    Scenario {
        name: "battle".to_string(),
        description: Some(
            "Prep two meals as combatants, battle them and read the leaderboard".to_string(),
        ),
        steps: vec![
            Check::CheckHealth,
            Check::CheckDb,
            Check::ClearMeals,
            Check::ClearCombatants,
            Check::create_meal("Pasta", "Italian", 15.0, "MED"),
            Check::create_meal("Sushi", "Japanese", 20.0, "HIGH"),
            Check::create_meal("Tacos", "Mexican", 10.0, "LOW"),
            Check::prep_combatant("Pasta"),
            Check::prep_combatant("Sushi"),
            Check::GetCombatants,
            Check::Battle,
            // Only the winner should remain; the marker cannot tell us that
            Check::GetCombatants,
            Check::GetLeaderboard {
                sort: LeaderboardSort::Wins,
            },
            Check::ClearMeals,
            Check::ClearCombatants,
        ],
    }
}

/// Single-meal create/get/delete flow, with back-to-back clears
pub fn lifecycle() -> Scenario {
    Scenario {
        name: "lifecycle".to_string(),
        description: Some("Create, fetch and delete one meal".to_string()),
        steps: vec![
            Check::CheckHealth,
            Check::CheckDb,
            Check::ClearMeals,
            Check::ClearMeals,
            Check::ClearCombatants,
            Check::ClearCombatants,
            Check::create_meal(LIFECYCLE_MEAL, "Italian", 15.0, "MED"),
            Check::GetMealById { id: FIRST_MEAL_ID },
            Check::GetMealByName {
                meal: LIFECYCLE_MEAL.to_string(),
            },
            Check::DeleteMeal { id: FIRST_MEAL_ID },
            Check::ClearMeals,
        ],
    }
}
