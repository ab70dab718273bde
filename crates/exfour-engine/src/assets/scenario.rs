use serde::{Deserialize, Serialize};

use crate::api::config::SimConfig;
use crate::api::error::ScenarioError;
use crate::components::planet::valid_body_radius;

/// Starting map for a scene: planets, their initial fleets and the
/// initially selected planet. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    pub planets: Vec<PlanetDescriptor>,
    /// Name of the planet selected at start.
    #[serde(default)]
    pub selected: Option<String>,
}

/// Describes a single planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDescriptor {
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Body radius; orbits start slightly outside it.
    pub radius: f32,
    /// Ships placed in orbit at start (default: 0).
    #[serde(default)]
    pub ships: usize,
}

impl PlanetDescriptor {
    pub fn new(name: impl Into<String>, x: f32, y: f32, radius: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            radius,
            ships: 0,
        }
    }

    pub fn with_ships(mut self, ships: usize) -> Self {
        self.ships = ships;
        self
    }
}

impl Scenario {
    /// Parse a scenario from a JSON string and check it for obvious mistakes.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        for planet in &self.planets {
            if !valid_body_radius(planet.radius) {
                return Err(ScenarioError::InvalidRadius {
                    name: planet.name.clone(),
                    radius: planet.radius,
                });
            }
        }
        if let Some(selected) = &self.selected {
            if !self.planets.iter().any(|p| &p.name == selected) {
                return Err(ScenarioError::UnknownSelection(selected.clone()));
            }
        }
        Ok(())
    }

    /// The three-planet skirmish map: Lanto, Tylon and Atrex, Tylon selected.
    pub fn skirmish() -> Self {
        Self {
            config: SimConfig::default(),
            planets: vec![
                PlanetDescriptor::new("Lanto", 150.0, -250.0, 128.0),
                PlanetDescriptor::new("Tylon", -350.0, 150.0, 96.0),
                PlanetDescriptor::new("Atrex", 450.0, 250.0, 48.0),
            ],
            selected: Some("Tylon".to_string()),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::skirmish()
    }
}
