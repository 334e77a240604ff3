// Thread-safe handle around the rental service
//
// Every mutating call takes the one lock for both its availability check and
// its mutation, so two callers can never open bookings on the same vehicle.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::RentalError;
use crate::models::{Client, Vehicle};
use crate::rental::{RentalReceipt, RentalService};

#[derive(Debug, Clone)]
pub struct SharedRentalService {
    inner: Arc<Mutex<RentalService>>,
}

impl SharedRentalService {
    pub fn new(service: RentalService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn rent(
        &self,
        vehicle_id: &str,
        client_name: &str,
        days: i64,
    ) -> Result<RentalReceipt, RentalError> {
        self.inner.lock().rent(vehicle_id, client_name, days)
    }

    pub fn return_vehicle(&self, vehicle_id: &str) -> Result<Client, RentalError> {
        self.inner.lock().return_vehicle(vehicle_id)
    }

    pub fn add_vehicle(&self, vehicle: Vehicle) -> Result<(), RentalError> {
        self.inner.lock().add_vehicle(vehicle)
    }

    // Snapshot, since the listing cannot outlive the lock
    pub fn available_vehicles(&self) -> Vec<Vehicle> {
        self.inner.lock().available_vehicles().cloned().collect()
    }

    pub fn is_consistent(&self) -> bool {
        self.inner.lock().is_consistent()
    }

    // Run a read-only closure against the service under the lock
    pub fn with<T>(&self, f: impl FnOnce(&RentalService) -> T) -> T {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::default_fleet;
    use crate::rental::RentalConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn shared() -> SharedRentalService {
        let service = RentalService::with_fleet(RentalConfig::default(), default_fleet()).unwrap();
        SharedRentalService::new(service)
    }

    #[test]
    fn test_concurrent_rent_of_same_vehicle_has_one_winner() {
        let service = shared();
        let winners = Arc::new(AtomicUsize::new(0));
        let threads_count = 16;

        let mut handles = vec![];
        for i in 0..threads_count {
            let service = service.clone();
            let winners = Arc::clone(&winners);
            let handle = thread::spawn(move || {
                let name = format!("client{}", i);
                match service.rent("V001", &name, 2) {
                    Ok(_) => {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => assert_eq!(e, RentalError::VehicleUnavailable("V001".to_string())),
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert!(service.is_consistent());
        service.with(|s| {
            assert_eq!(s.bookings().len(), 1);
            assert_eq!(s.clients().len(), 1);
        });
    }

    #[test]
    fn test_concurrent_rent_return_with_contention() {
        let service = shared();
        let threads_count = 8;
        let operations_per_thread = 500;
        let fleet_ids = ["V001", "V002", "V003"];

        let mut handles = vec![];
        for i in 0..threads_count {
            let service = service.clone();
            let handle = thread::spawn(move || {
                for j in 0..operations_per_thread {
                    let vehicle_id = fleet_ids[(i + j) % fleet_ids.len()];
                    if rand::random::<f64>() < 0.5 {
                        let _ = service.rent(vehicle_id, "contender", 1 + (j % 7) as i64);
                    } else {
                        let _ = service.return_vehicle(vehicle_id);
                    }
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(service.is_consistent());
        let rented = 3 - service.available_vehicles().len();
        service.with(|s| assert_eq!(s.bookings().len(), rented));
    }

    #[test]
    fn test_add_vehicle_through_handle() {
        let service = shared();
        service
            .add_vehicle(Vehicle::new(
                "V004",
                "Tata",
                "Nexon",
                rust_decimal::Decimal::from(900),
            ))
            .unwrap();
        assert_eq!(service.available_vehicles().len(), 4);

        let receipt = service.rent("V004", "Lena", 2).unwrap();
        assert_eq!(receipt.total_cost, rust_decimal::Decimal::from(1800));
        assert_eq!(service.return_vehicle("V004").unwrap().full_name, "Lena");
    }
}
