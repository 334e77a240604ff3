// Rental service: owns the fleet, client and booking stores and enforces the
// rent/return protocol
//
// Per vehicle the state machine is AVAILABLE -> RENTED -> AVAILABLE -> ...
// and a vehicle is RENTED exactly when the ledger holds a booking for it.

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::error::RentalError;
use crate::ledger::BookingLedger;
use crate::models::{Booking, Client, ClientId, Vehicle};
use crate::registry::{ClientRegistry, VehicleRegistry, DEFAULT_CLIENT_ID_PREFIX};

// Service configuration options
#[derive(Debug, Clone)]
pub struct RentalConfig {
    pub currency_symbol: String,
    pub client_id_prefix: String,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            client_id_prefix: DEFAULT_CLIENT_ID_PREFIX.to_string(),
        }
    }
}

// Priced rental that has not been committed yet. Only `RentalService::quote`
// builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalQuote {
    client: Client,
    vehicle_id: String,
    vehicle: String,
    rental_days: u32,
    total_cost: Decimal,
}

impl RentalQuote {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    pub fn rental_days(&self) -> u32 {
        self.rental_days
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }
}

// Outcome of a confirmed rental
#[derive(Debug, Clone, PartialEq)]
pub struct RentalReceipt {
    pub client_id: ClientId,
    pub client_name: String,
    pub vehicle: String,
    pub rental_days: u32,
    pub total_cost: Decimal,
}

#[derive(Debug, Default)]
pub struct RentalService {
    config: RentalConfig,
    vehicles: VehicleRegistry,
    clients: ClientRegistry,
    bookings: BookingLedger,
}

impl RentalService {
    pub fn new(config: RentalConfig) -> Self {
        let clients = ClientRegistry::with_prefix(config.client_id_prefix.clone());
        Self {
            config,
            vehicles: VehicleRegistry::new(),
            clients,
            bookings: BookingLedger::new(),
        }
    }

    // Build a service with the given fleet already registered
    pub fn with_fleet(
        config: RentalConfig,
        fleet: impl IntoIterator<Item = Vehicle>,
    ) -> Result<Self, RentalError> {
        let mut service = Self::new(config);
        for vehicle in fleet {
            service.add_vehicle(vehicle)?;
        }
        Ok(service)
    }

    pub fn config(&self) -> &RentalConfig {
        &self.config
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<(), RentalError> {
        self.vehicles.add(vehicle)
    }

    /// Rents `vehicle_id` to a newly registered client for `days` days.
    ///
    /// Fails with [`RentalError::InvalidDuration`] for a non-positive day
    /// count and [`RentalError::VehicleUnavailable`] when the vehicle is
    /// unknown or already out. Nothing is mutated on failure.
    pub fn rent(
        &mut self,
        vehicle_id: &str,
        client_name: &str,
        days: i64,
    ) -> Result<RentalReceipt, RentalError> {
        let quote = self.quote(vehicle_id, client_name, days)?;
        self.confirm(quote)
    }

    /// Prices a rental and registers the requesting client without touching
    /// the vehicle.
    ///
    /// The client stays registered even if the quote is never confirmed.
    pub fn quote(
        &mut self,
        vehicle_id: &str,
        client_name: &str,
        days: i64,
    ) -> Result<RentalQuote, RentalError> {
        let rental_days = validate_days(days).inspect_err(|e| {
            warn!(vehicle_id, days, "rental rejected: {}", e);
        })?;
        let vehicle = self.rentable_vehicle(vehicle_id)?;
        let descriptor = vehicle.descriptor();
        let total_cost = vehicle.rental_cost(rental_days);

        let client = self.clients.register(client_name)?;

        Ok(RentalQuote {
            client,
            vehicle_id: vehicle_id.to_string(),
            vehicle: descriptor,
            rental_days,
            total_cost,
        })
    }

    /// Commits a quote. The client must be registered and the vehicle still
    /// available; the price and descriptor are taken from the fleet again
    /// rather than from the quote.
    pub fn confirm(&mut self, quote: RentalQuote) -> Result<RentalReceipt, RentalError> {
        let client = self.clients.find(quote.client.id.as_str())?.clone();
        let vehicle = self.rentable_vehicle(&quote.vehicle_id)?;
        let receipt = RentalReceipt {
            client_id: client.id,
            client_name: client.full_name,
            vehicle: vehicle.descriptor(),
            rental_days: quote.rental_days,
            total_cost: vehicle.rental_cost(quote.rental_days),
        };

        let vehicle = self.vehicles.find_mut(&quote.vehicle_id)?;
        self.bookings
            .open(&vehicle.id, &receipt.client_id, receipt.rental_days)?;
        vehicle.mark_rented();

        info!(
            vehicle_id = %quote.vehicle_id,
            client_id = %receipt.client_id,
            days = receipt.rental_days,
            total = %receipt.total_cost,
            "vehicle rented"
        );
        Ok(receipt)
    }

    /// Returns a rented vehicle and hands back the client who held it.
    ///
    /// Every lookup happens before the ledger or the vehicle is touched, so a
    /// failed return leaves both as they were.
    pub fn return_vehicle(&mut self, vehicle_id: &str) -> Result<Client, RentalError> {
        let rented = matches!(self.vehicles.find(vehicle_id), Ok(v) if !v.is_available());
        if !rented {
            warn!(vehicle_id, "return rejected: vehicle is not rented");
            return Err(RentalError::NotRented(vehicle_id.to_string()));
        }

        let Ok(booking) = self.bookings.find_by_vehicle(vehicle_id) else {
            error!(vehicle_id, "vehicle is marked rented but has no open booking");
            return Err(RentalError::NotRented(vehicle_id.to_string()));
        };
        let client = self
            .clients
            .find(booking.client_id.as_str())
            .inspect_err(|_| {
                error!(vehicle_id, client_id = %booking.client_id, "booking held by unknown client");
            })?
            .clone();

        self.bookings.close(vehicle_id)?;
        self.vehicles.find_mut(vehicle_id)?.mark_returned();

        info!(vehicle_id, client_id = %client.id, "vehicle returned");
        Ok(client)
    }

    pub fn available_vehicles(&self) -> impl Iterator<Item = &Vehicle> + Clone + '_ {
        self.vehicles.list_available()
    }

    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    pub fn bookings(&self) -> &BookingLedger {
        &self.bookings
    }

    pub fn vehicle(&self, vehicle_id: &str) -> Result<&Vehicle, RentalError> {
        self.vehicles.find(vehicle_id)
    }

    pub fn client(&self, client_id: &str) -> Result<&Client, RentalError> {
        self.clients.find(client_id)
    }

    pub fn booking(&self, vehicle_id: &str) -> Result<&Booking, RentalError> {
        self.bookings.find_by_vehicle(vehicle_id)
    }

    /// True when every vehicle is unavailable exactly when the ledger holds a
    /// booking for it, and no booking points at an unknown vehicle.
    pub fn is_consistent(&self) -> bool {
        let flags_match = self
            .vehicles
            .iter()
            .all(|v| v.is_available() == self.bookings.find_by_vehicle(v.id.as_str()).is_err());
        let no_orphans = self
            .bookings
            .iter()
            .all(|b| self.vehicles.find(b.vehicle_id.as_str()).is_ok());
        flags_match && no_orphans
    }

    fn rentable_vehicle(&self, vehicle_id: &str) -> Result<&Vehicle, RentalError> {
        match self.vehicles.find(vehicle_id) {
            Ok(vehicle) if vehicle.is_available() => Ok(vehicle),
            _ => {
                warn!(vehicle_id, "rental rejected: vehicle unavailable");
                Err(RentalError::VehicleUnavailable(vehicle_id.to_string()))
            }
        }
    }
}

// Day counts arrive signed from the caller; only 1..=u32::MAX is bookable
fn validate_days(days: i64) -> Result<u32, RentalError> {
    match u32::try_from(days) {
        Ok(valid) if valid > 0 => Ok(valid),
        _ => Err(RentalError::InvalidDuration(days)),
    }
}
