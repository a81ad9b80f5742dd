//! Check and scenario definitions
//!
//! A [`Check`] is one request plus the marker its response must contain.
//! Scenarios are ordered lists of checks, either built in or loaded from a
//! YAML file.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::json;

use crate::api::ApiRequest;
use crate::common::config::Markers;
use crate::common::{Error, Result};

/// A complete scenario loaded from a YAML file or built in
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario exercises
    pub description: Option<String>,
    /// Checks in execution order
    pub steps: Vec<Check>,
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        Self::from_yaml(&content).map_err(|e| match e {
            Error::ScenarioParse { message, .. } => Error::ScenarioParse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse a scenario from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Scenario =
            serde_yaml::from_str(content).map_err(|e| Error::ScenarioParse {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        if scenario.steps.is_empty() {
            return Err(Error::ScenarioParse {
                path: "<inline>".to_string(),
                message: format!("scenario '{}' has no steps", scenario.name),
            });
        }
        Ok(scenario)
    }
}

/// Ordering requested from the leaderboard endpoint
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Wins,
    WinPct,
}

impl LeaderboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardSort::Wins => "wins",
            LeaderboardSort::WinPct => "win_pct",
        }
    }
}

/// Which configured marker a check looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Healthy,
    Database,
    Success,
}

impl MarkerKind {
    pub fn resolve<'a>(&self, markers: &'a Markers) -> &'a str {
        match self {
            MarkerKind::Healthy => &markers.healthy,
            MarkerKind::Database => &markers.database,
            MarkerKind::Success => &markers.success,
        }
    }
}

/// One named request against the service
///
/// Arguments are passed through untouched: no range checks on prices, no
/// whitelist of difficulties. The service is the one that decides.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    CheckHealth,
    CheckDb,
    ClearMeals,
    CreateMeal {
        meal: String,
        cuisine: String,
        price: f64,
        difficulty: String,
    },
    GetMealById {
        id: u64,
    },
    GetMealByName {
        meal: String,
    },
    DeleteMeal {
        id: u64,
    },
    PrepCombatant {
        meal: String,
    },
    ClearCombatants,
    GetCombatants,
    Battle,
    GetLeaderboard {
        #[serde(default)]
        sort: LeaderboardSort,
    },
}

impl Check {
    pub fn create_meal(meal: &str, cuisine: &str, price: f64, difficulty: &str) -> Self {
        Check::CreateMeal {
            meal: meal.to_string(),
            cuisine: cuisine.to_string(),
            price,
            difficulty: difficulty.to_string(),
        }
    }

    pub fn prep_combatant(meal: &str) -> Self {
        Check::PrepCombatant {
            meal: meal.to_string(),
        }
    }

    /// Identifier used in output and scenario files
    pub fn name(&self) -> &'static str {
        match self {
            Check::CheckHealth => "check_health",
            Check::CheckDb => "check_db",
            Check::ClearMeals => "clear_meals",
            Check::CreateMeal { .. } => "create_meal",
            Check::GetMealById { .. } => "get_meal_by_id",
            Check::GetMealByName { .. } => "get_meal_by_name",
            Check::DeleteMeal { .. } => "delete_meal",
            Check::PrepCombatant { .. } => "prep_combatant",
            Check::ClearCombatants => "clear_combatants",
            Check::GetCombatants => "get_combatants",
            Check::Battle => "battle",
            Check::GetLeaderboard { .. } => "get_leaderboard",
        }
    }

    /// The request this check issues
    pub fn request(&self) -> ApiRequest {
        match self {
            Check::CheckHealth => ApiRequest::get("/health"),
            Check::CheckDb => ApiRequest::get("/db-check"),
            Check::ClearMeals => ApiRequest::delete("/clear-meals"),
            Check::CreateMeal {
                meal,
                cuisine,
                price,
                difficulty,
            } => ApiRequest::post("/create-meal").with_json(json!({
                "meal": meal,
                "cuisine": cuisine,
                "price": price,
                "difficulty": difficulty,
            })),
            Check::GetMealById { id } => ApiRequest::get(format!("/get-meal-by-id/{id}")),
            Check::GetMealByName { meal } => ApiRequest::get(format!("/get-meal-by-name/{meal}")),
            Check::DeleteMeal { id } => ApiRequest::delete(format!("/delete-meal/{id}")),
            Check::PrepCombatant { meal } => {
                ApiRequest::post("/prep-combatant").with_json(json!({ "meal": meal }))
            }
            Check::ClearCombatants => ApiRequest::post("/clear-combatants"),
            Check::GetCombatants => ApiRequest::get("/get-combatants"),
            Check::Battle => ApiRequest::get("/battle"),
            Check::GetLeaderboard { sort } => {
                ApiRequest::get(format!("/leaderboard?sort={}", sort.as_str()))
            }
        }
    }

    /// Marker the response body must contain
    pub fn marker_kind(&self) -> MarkerKind {
        match self {
            Check::CheckHealth => MarkerKind::Healthy,
            Check::CheckDb => MarkerKind::Database,
            _ => MarkerKind::Success,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::CreateMeal {
                meal,
                cuisine,
                price,
                difficulty,
            } => write!(f, "create_meal({meal}, {cuisine}, {price}, {difficulty})"),
            Check::GetMealById { id } => write!(f, "get_meal_by_id({id})"),
            Check::GetMealByName { meal } => write!(f, "get_meal_by_name({meal})"),
            Check::DeleteMeal { id } => write!(f, "delete_meal({id})"),
            Check::PrepCombatant { meal } => write!(f, "prep_combatant({meal})"),
            Check::GetLeaderboard { sort } => write!(f, "get_leaderboard({})", sort.as_str()),
            other => f.write_str(other.name()),
        }
    }
}
