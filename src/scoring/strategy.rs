use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    SmartBalance,
    Fastest,
    HighImpact,
    Deadline,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::Fastest,
        Strategy::HighImpact,
        Strategy::Deadline,
    ];

    /// Unknown names fall back to `smart_balance`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "fastest" => Strategy::Fastest,
            "high_impact" => Strategy::HighImpact,
            "deadline" => Strategy::Deadline,
            _ => Strategy::SmartBalance,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::Fastest => "fastest",
            Strategy::HighImpact => "high_impact",
            Strategy::Deadline => "deadline",
        }
    }

    pub fn weights(self) -> Weights {
        match self {
            Strategy::SmartBalance => Weights::new(0.35, 0.35, 0.15, 0.15),
            Strategy::Fastest => Weights::new(0.2, 0.2, 0.45, 0.15),
            Strategy::HighImpact => Weights::new(0.2, 0.6, 0.1, 0.1),
            Strategy::Deadline => Weights::new(0.7, 0.15, 0.1, 0.05),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Weights {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependency: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependency,
        }
    }

    pub fn with_overrides(mut self, overrides: &WeightOverrides) -> Self {
        if let Some(w) = overrides.urgency {
            self.urgency = w;
        }
        if let Some(w) = overrides.importance {
            self.importance = w;
        }
        if let Some(w) = overrides.effort {
            self.effort = w;
        }
        if let Some(w) = overrides.dependency {
            self.dependency = w;
        }
        self
    }
}

/// Largest accepted override for a single factor.
pub const MAX_WEIGHT: f64 = 1.0;

/// Per-request weight tweaks; absent factors keep the preset value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct WeightOverrides {
    pub urgency: Option<f64>,
    pub importance: Option<f64>,
    pub effort: Option<f64>,
    pub dependency: Option<f64>,
}

impl WeightOverrides {
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            ("urgency", self.urgency),
            ("importance", self.importance),
            ("effort", self.effort),
            ("dependency", self.dependency),
        ];
        for (name, weight) in all {
            if let Some(w) = weight {
                if !(0.0..=MAX_WEIGHT).contains(&w) {
                    return Err(format!("weight '{}' must be between 0 and {}", name, MAX_WEIGHT));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub weights: Weights,
}

pub fn list_strategies() -> Vec<StrategyInfo> {
    Strategy::ALL
        .iter()
        .map(|s| StrategyInfo {
            name: s.name(),
            weights: s.weights(),
        })
        .collect()
}
