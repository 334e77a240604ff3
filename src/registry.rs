// Vehicle and client registries owned by the rental service

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::RentalError;
use crate::models::{Client, ClientId, Vehicle, VehicleId};

pub const DEFAULT_CLIENT_ID_PREFIX: &str = "CLT";

// Fleet catalog, kept in registration order with an id index on the side
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
    index: HashMap<VehicleId, usize>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), RentalError> {
        if self.index.contains_key(&vehicle.id) {
            return Err(RentalError::DuplicateId(vehicle.id.to_string()));
        }
        if vehicle.daily_rate < Decimal::ZERO {
            return Err(RentalError::NegativeRate(vehicle.id.to_string()));
        }

        debug!(vehicle_id = %vehicle.id, rate = %vehicle.daily_rate, "registering vehicle");
        self.index.insert(vehicle.id.clone(), self.vehicles.len());
        self.vehicles.push(vehicle);
        Ok(())
    }

    pub fn find(&self, id: &str) -> Result<&Vehicle, RentalError> {
        self.index
            .get(id)
            .map(|&slot| &self.vehicles[slot])
            .ok_or_else(|| RentalError::NotFound(id.to_string()))
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Result<&mut Vehicle, RentalError> {
        match self.index.get(id) {
            Some(&slot) => Ok(&mut self.vehicles[slot]),
            None => Err(RentalError::NotFound(id.to_string())),
        }
    }

    /// Vehicles currently available for rent, in registration order.
    ///
    /// The iterator is lazy and cloneable, so a caller can walk the listing
    /// more than once without going back to the registry.
    pub fn list_available(&self) -> impl Iterator<Item = &Vehicle> + Clone + '_ {
        self.vehicles.iter().filter(|vehicle| vehicle.is_available())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[derive(Debug)]
pub struct ClientRegistry {
    clients: Vec<Client>,
    index: HashMap<ClientId, usize>,
    id_prefix: String,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_CLIENT_ID_PREFIX)
    }
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            clients: Vec::new(),
            index: HashMap::new(),
            id_prefix: prefix.into(),
        }
    }

    pub fn add(&mut self, client: Client) -> Result<(), RentalError> {
        if self.index.contains_key(&client.id) {
            return Err(RentalError::DuplicateId(client.id.to_string()));
        }
        self.index.insert(client.id.clone(), self.clients.len());
        self.clients.push(client);
        Ok(())
    }

    /// Next sequential id: prefix followed by `count + 1`.
    ///
    /// Unique as long as clients only enter through this registry's ids.
    pub fn next_id(&self) -> ClientId {
        ClientId(format!("{}{}", self.id_prefix, self.clients.len() + 1))
    }

    // Mint an id and store a fresh client under it. Names are never matched
    // against existing records.
    pub fn register(&mut self, full_name: &str) -> Result<Client, RentalError> {
        let client = Client::new(self.next_id(), full_name);
        self.add(client.clone())?;
        debug!(client_id = %client.id, "registered client");
        Ok(client)
    }

    pub fn find(&self, id: &str) -> Result<&Client, RentalError> {
        self.index
            .get(id)
            .map(|&slot| &self.clients[slot])
            .ok_or_else(|| RentalError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> + '_ {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
