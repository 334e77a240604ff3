// Booking ledger: open rental agreements keyed by vehicle id

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::error::RentalError;
use crate::models::{Booking, ClientId, VehicleId};

#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: HashMap<VehicleId, Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a booking for `vehicle_id` held by `client_id`.
    ///
    /// `rental_days` must be positive. A vehicle can only carry one open
    /// booking, so a second `open` for the same vehicle is rejected.
    pub fn open(
        &mut self,
        vehicle_id: &VehicleId,
        client_id: &ClientId,
        rental_days: u32,
    ) -> Result<&Booking, RentalError> {
        if rental_days == 0 {
            return Err(RentalError::InvalidDuration(0));
        }
        if self.bookings.contains_key(vehicle_id) {
            return Err(RentalError::VehicleUnavailable(vehicle_id.to_string()));
        }

        debug!(vehicle_id = %vehicle_id, client_id = %client_id, rental_days, "opening booking");
        let booking = Booking {
            vehicle_id: vehicle_id.clone(),
            client_id: client_id.clone(),
            rental_days,
            opened_at: Utc::now(),
        };
        Ok(self.bookings.entry(vehicle_id.clone()).or_insert(booking))
    }

    pub fn find_by_vehicle(&self, vehicle_id: &str) -> Result<&Booking, RentalError> {
        self.bookings
            .get(vehicle_id)
            .ok_or_else(|| RentalError::NotFound(vehicle_id.to_string()))
    }

    pub fn close(&mut self, vehicle_id: &str) -> Result<Booking, RentalError> {
        self.bookings
            .remove(vehicle_id)
            .ok_or_else(|| RentalError::NotFound(vehicle_id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings.values()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
