// Core records of the rental ledger: vehicles, clients and bookings

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Identity of a vehicle in the fleet (e.g. "V001")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

// Identity minted by the client registry (e.g. "CLT1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        // Lets the id maps be queried with a plain &str
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(VehicleId);
string_id!(ClientId);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub daily_rate: Decimal,
    // Only rent/return flip this; fleet files cannot seed a vehicle as rented
    #[serde(skip_deserializing, default = "available_by_default")]
    available: bool,
}

fn available_by_default() -> bool {
    true
}

impl Vehicle {
    // New vehicles always join the fleet as available
    pub fn new(
        id: impl Into<VehicleId>,
        make: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            make: make.into(),
            model: model.into(),
            daily_rate,
            available: true,
        }
    }

    /// Human-readable "Make Model" label used on receipts and listings.
    pub fn descriptor(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Cost of renting this vehicle for `days` days: `daily_rate * days`.
    ///
    /// No taxes, fees or discounts are applied.
    pub fn rental_cost(&self, days: u32) -> Decimal {
        self.daily_rate * Decimal::from(days)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn mark_rented(&mut self) {
        self.available = false;
    }

    pub(crate) fn mark_returned(&mut self) {
        self.available = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub full_name: String,
}

impl Client {
    pub fn new(id: impl Into<ClientId>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
        }
    }
}

// Live association between one vehicle and one client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Booking {
    pub vehicle_id: VehicleId,
    pub client_id: ClientId,
    pub rental_days: u32,
    pub opened_at: DateTime<Utc>,
}
