//! Tire compound reference data.
//!
//! Each compound carries a load → pressure reference curve: the pressure (bar)
//! at which the compound reaches its optimal contact patch for a given corner
//! load (kg). The advisor uses ratios along this curve, never absolute values,
//! so a curve only has to get the *shape* right.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::advisor::recommend_tire_pressure;
use crate::math::interp::interpolate;

/// Load (kg) → pressure (bar) reference curve, knots sorted by load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>")]
pub struct PressureCurve {
    knots: Vec<(f64, f64)>,
}

impl PressureCurve {
    pub fn new(knots: Vec<(f64, f64)>) -> Result<Self, String> {
        if knots.is_empty() {
            return Err("pressure curve needs at least one knot".to_string());
        }
        for &(load, pressure) in &knots {
            if !(load.is_finite() && pressure.is_finite() && load >= 0.0 && pressure > 0.0) {
                return Err(format!("invalid knot ({load}, {pressure})"));
            }
        }
        if knots.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err("knot loads must be strictly increasing".to_string());
        }
        Ok(Self { knots })
    }

    /// Reference pressure (bar) at `load_kg`, flat beyond the measured range.
    pub fn pressure_at(&self, load_kg: f64) -> f64 {
        // Non-empty by construction.
        interpolate(&self.knots, load_kg).unwrap_or(self.knots[0].1)
    }

    pub fn knots(&self) -> &[(f64, f64)] {
        &self.knots
    }
}

impl TryFrom<Vec<[f64; 2]>> for PressureCurve {
    type Error = String;

    fn try_from(value: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        PressureCurve::new(value.into_iter().map(|[l, p]| (l, p)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompoundReference {
    pub name: String,
    pub curve: PressureCurve,
}

/// All compounds a catalog knows about, keyed by compound id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundTable {
    compounds: BTreeMap<String, CompoundReference>,
}

impl CompoundTable {
    pub fn new(compounds: BTreeMap<String, CompoundReference>) -> Self {
        Self { compounds }
    }

    pub fn get(&self, id: &str) -> Option<&CompoundReference> {
        self.compounds.get(id)
    }

    pub fn curve(&self, id: &str) -> Option<&PressureCurve> {
        self.get(id).map(|c| &c.curve)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.compounds.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.compounds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Pressure recommendation on compound `id`'s curve, `None` if the compound is unknown.
    pub fn recommend(&self, id: &str, corner_load_kg: f64, reference_load_kg: f64, optimal_bar: f64) -> Option<f64> {
        self.curve(id)
            .map(|curve| recommend_tire_pressure(corner_load_kg, reference_load_kg, optimal_bar, curve))
    }
}
