// Main library file for the vehicle rental desk

pub mod error;
pub mod fleet;
pub mod ledger;
pub mod menu;
pub mod models;
pub mod registry;
pub mod rental;
pub mod shared;

// Re-export key types for convenience
pub use error::RentalError;
pub use fleet::{default_fleet, Fleet, FleetError};
pub use ledger::BookingLedger;
pub use menu::Menu;
pub use models::{Booking, Client, ClientId, Vehicle, VehicleId};
pub use registry::{ClientRegistry, VehicleRegistry};
pub use rental::{RentalConfig, RentalQuote, RentalReceipt, RentalService};
pub use shared::SharedRentalService;
