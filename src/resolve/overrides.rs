//! User overrides: the sparse, tunable-only edit set.
//!
//! Unknown keys are rejected at parse time, so an overrides document that tries
//! to set a fixed chassis parameter (`wheelbase`, `front_track`, ...) never
//! reaches the resolver.

use serde::{Deserialize, Serialize};

use crate::domain::SetupField;
use crate::error::ResolutionError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_spring_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_spring_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_arb_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_arb_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_motion_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_motion_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tire_compound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_tire_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_tire_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_camber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_camber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_toe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_toe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_bump: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_rebound: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_bump: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear_rebound: Option<f64>,
}

impl UserOverrides {
    pub fn from_json(json: &str) -> Result<Self, ResolutionError> {
        serde_json::from_str(json).map_err(|e| ResolutionError::MalformedOverrides(e.to_string()))
    }

    /// Numeric override for `field`, if one was given.
    pub fn value(&self, field: SetupField) -> Option<f64> {
        match field {
            SetupField::FrontSpringRate => self.front_spring_rate,
            SetupField::RearSpringRate => self.rear_spring_rate,
            SetupField::FrontArbRate => self.front_arb_rate,
            SetupField::RearArbRate => self.rear_arb_rate,
            SetupField::FrontMotionRatio => self.front_motion_ratio,
            SetupField::RearMotionRatio => self.rear_motion_ratio,
            SetupField::FrontTirePressure => self.front_tire_pressure,
            SetupField::RearTirePressure => self.rear_tire_pressure,
            SetupField::FrontCamber => self.front_camber,
            SetupField::RearCamber => self.rear_camber,
            SetupField::FrontToe => self.front_toe,
            SetupField::RearToe => self.rear_toe,
            SetupField::FrontBump => self.front_bump,
            SetupField::FrontRebound => self.front_rebound,
            SetupField::RearBump => self.rear_bump,
            SetupField::RearRebound => self.rear_rebound,
            _ => None,
        }
    }

    /// Every field this override set touches, in `SetupField` order.
    pub fn fields(&self) -> Vec<SetupField> {
        SetupField::ALL
            .into_iter()
            .filter(|&f| match f {
                SetupField::TireCompound => self.tire_compound.is_some(),
                _ => self.value(f).is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    pub fn touches_dampers(&self) -> bool {
        self.front_bump.is_some()
            || self.front_rebound.is_some()
            || self.rear_bump.is_some()
            || self.rear_rebound.is_some()
    }
}
