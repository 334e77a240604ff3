// Fleet seeding: the built-in starter fleet and JSON fleet files

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::RentalError;
use crate::models::Vehicle;
use crate::rental::{RentalConfig, RentalService};

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Fleet rejected: {0}")]
    Rejected(#[from] RentalError),
}

// Data structure for a fleet file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Fleet {
    pub vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn from_json(json: &str) -> Result<Self, FleetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FleetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    // Register every vehicle with a fresh service
    pub fn into_service(self, config: RentalConfig) -> Result<RentalService, FleetError> {
        Ok(RentalService::with_fleet(config, self.vehicles)?)
    }
}

impl From<Vec<Vehicle>> for Fleet {
    fn from(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }
}

/// The three vehicles every new system starts with.
pub fn default_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle::new("V001", "Toyota", "Innova", Decimal::from(600)),
        Vehicle::new("V002", "Honda", "Brio", Decimal::from(700)),
        Vehicle::new("V003", "Mahindra", "Thar", Decimal::from(1500)),
    ]
}
