//! Shipment packages
//!
//! A package's chargeable weight is the ceiling of the greater of its actual
//! and volumetric weights. The volumetric divisor is a per-service term (sea
//! freight converts volume more aggressively than road).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::money::sanitize;
use crate::service::Service;

/// Package dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dimensions {
    pub height_cm: f64,
    pub width_cm: f64,
    pub length_cm: f64,
}

impl Dimensions {
    pub fn new(height_cm: f64, width_cm: f64, length_cm: f64) -> Self {
        Self {
            height_cm: sanitize(height_cm),
            width_cm: sanitize(width_cm),
            length_cm: sanitize(length_cm),
        }
    }

    /// Sum of the three sides, the figure shop restrictions are checked
    /// against.
    pub fn linear_sum_cm(&self) -> f64 {
        self.height_cm + self.width_cm + self.length_cm
    }

    /// Volume in cm3.
    pub fn volume_cm3(&self) -> f64 {
        self.height_cm * self.width_cm * self.length_cm
    }
}

/// A physical shipment unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Package {
    /// Actual weight in kg
    pub weight_kg: f64,
    /// Optional dimensions; without them the volumetric weight is 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Number of identical packages on this line (>= 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Package {
    pub fn new(weight_kg: f64) -> Self {
        Self {
            weight_kg: sanitize(weight_kg),
            dimensions: None,
            quantity: 1,
        }
    }

    pub fn with_dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Volumetric weight in kg for a service's conversion divisor.
    pub fn volumetric_weight(&self, service: Service) -> f64 {
        match self.dimensions {
            Some(dims) => dims.volume_cm3() / service.terms().volumetric_divisor,
            None => 0.0,
        }
    }

    /// Chargeable weight: ceiling of max(actual, volumetric), never negative.
    pub fn chargeable_weight(&self, service: Service) -> f64 {
        let w = sanitize(self.weight_kg).max(self.volumetric_weight(service));
        w.ceil().max(0.0)
    }
}
