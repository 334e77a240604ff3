// Interactive text menu over the rental service
//
// Reads choices from any BufRead and writes prompts to any Write, so the same
// loop drives stdin/stdout in the binary and scripted buffers in tests.

use std::io::{self, BufRead, Write};

use crate::error::RentalError;
use crate::rental::RentalService;

enum Step {
    Continue,
    Exit,
}

pub struct Menu<'a, R, W> {
    service: &'a mut RentalService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut RentalService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs the read-decide-act loop until the user exits or input ends.
    ///
    /// Rental errors are reported and the loop continues; only I/O failures
    /// on the menu's own streams are returned.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "===== Car Rental System =====")?;
            writeln!(self.output, "1. Rent a Vehicle")?;
            writeln!(self.output, "2. Return a Vehicle")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let step = match choice.as_str() {
                "1" => self.rent_flow()?,
                "2" => self.return_flow()?,
                "3" => Step::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice. Please enter a valid option.")?;
                    Step::Continue
                }
            };
            if let Step::Exit = step {
                break;
            }
        }

        writeln!(self.output, "\nThank you for using the Car Rental System!")?;
        self.output.flush()
    }

    fn rent_flow(&mut self) -> io::Result<Step> {
        writeln!(self.output, "\n== Rent a Vehicle ==\n")?;
        let Some(client_name) = self.prompt("Enter your name: ")? else {
            return Ok(Step::Exit);
        };

        writeln!(self.output, "\nAvailable Vehicles:")?;
        for vehicle in self.service.available_vehicles() {
            writeln!(self.output, "{} - {}", vehicle.id, vehicle.descriptor())?;
        }

        let Some(vehicle_id) = self.prompt("\nEnter the vehicle ID you want to rent: ")? else {
            return Ok(Step::Exit);
        };
        let Some(days) = self.prompt("Enter the number of days for rental: ")? else {
            return Ok(Step::Exit);
        };
        let Ok(days) = days.parse::<i64>() else {
            writeln!(self.output, "\nInvalid number of days: {}", days)?;
            return Ok(Step::Continue);
        };

        let quote = match self.service.quote(&vehicle_id, &client_name, days) {
            Ok(quote) => quote,
            Err(e) => {
                writeln!(self.output, "\n{}", describe(&e))?;
                return Ok(Step::Continue);
            }
        };

        writeln!(self.output, "\n== Rental Information ==\n")?;
        writeln!(self.output, "Client ID: {}", quote.client().id)?;
        writeln!(self.output, "Client Name: {}", quote.client().full_name)?;
        writeln!(self.output, "Vehicle: {}", quote.vehicle())?;
        writeln!(self.output, "Rental Days: {}", quote.rental_days())?;
        writeln!(
            self.output,
            "Total Price: {}{:.2}",
            self.service.config().currency_symbol,
            quote.total_cost()
        )?;

        let Some(confirm) = self.prompt("\nConfirm rental (Y/N): ")? else {
            return Ok(Step::Exit);
        };
        if confirm.eq_ignore_ascii_case("y") {
            match self.service.confirm(quote) {
                Ok(_) => writeln!(self.output, "\nVehicle rented successfully.")?,
                Err(e) => writeln!(self.output, "\n{}", describe(&e))?,
            }
        } else {
            writeln!(self.output, "\nRental canceled.")?;
        }
        Ok(Step::Continue)
    }

    fn return_flow(&mut self) -> io::Result<Step> {
        writeln!(self.output, "\n== Return a Vehicle ==\n")?;
        let Some(vehicle_id) = self.prompt("Enter the vehicle ID you want to return: ")? else {
            return Ok(Step::Exit);
        };

        match self.service.return_vehicle(&vehicle_id) {
            Ok(client) => writeln!(
                self.output,
                "Vehicle returned successfully by {}",
                client.full_name
            )?,
            Err(e) => writeln!(self.output, "{}", describe(&e))?,
        }
        Ok(Step::Continue)
    }

    // None once the input is exhausted
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

// Human-readable message for the menu boundary
pub fn describe(error: &RentalError) -> String {
    match error {
        RentalError::VehicleUnavailable(_) | RentalError::NotFound(_) => {
            "Invalid vehicle selection or vehicle not available for rent.".to_string()
        }
        RentalError::InvalidDuration(days) => {
            format!("Invalid number of days: {}. Rentals last at least one day.", days)
        }
        RentalError::NotRented(_) => "Invalid vehicle ID or vehicle is not rented.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::default_fleet;
    use crate::rental::RentalConfig;
    use std::io::Cursor;

    fn run_script(service: &mut RentalService, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(service, Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn service() -> RentalService {
        RentalService::with_fleet(RentalConfig::default(), default_fleet()).unwrap()
    }

    #[test]
    fn test_rent_and_confirm() {
        let mut service = service();
        let output = run_script(&mut service, "1\nPriya\nV001\n3\ny\n3\n");

        assert!(output.contains("V001 - Toyota Innova"));
        assert!(output.contains("V003 - Mahindra Thar"));
        assert!(output.contains("Client ID: CLT1"));
        assert!(output.contains("Client Name: Priya"));
        assert!(output.contains("Vehicle: Toyota Innova"));
        assert!(output.contains("Rental Days: 3"));
        assert!(output.contains("Total Price: ₹1800.00"));
        assert!(output.contains("Vehicle rented successfully."));
        assert!(output.ends_with("Thank you for using the Car Rental System!\n"));

        assert!(!service.vehicle("V001").unwrap().is_available());
        assert!(service.is_consistent());
    }

    #[test]
    fn test_declined_rental_changes_nothing_but_registers_client() {
        let mut service = service();
        let output = run_script(&mut service, "1\nDev\nV002\n2\nN\n3\n");

        assert!(output.contains("Rental canceled."));
        assert!(service.vehicle("V002").unwrap().is_available());
        assert!(service.bookings().is_empty());
        assert_eq!(service.clients().len(), 1);
    }

    #[test]
    fn test_rented_vehicle_drops_out_of_listing() {
        let mut service = service();
        service.rent("V002", "Arjun", 1).unwrap();
        let output = run_script(&mut service, "1\nKiran\nV002\n1\n3\n");

        assert!(!output.contains("V002 - Honda Brio"));
        assert!(output.contains("Invalid vehicle selection or vehicle not available for rent."));
        assert_eq!(service.clients().len(), 1);
    }

    #[test]
    fn test_invalid_days_input() {
        let mut service = service();
        let output = run_script(&mut service, "1\nNisha\nV003\nthree\n1\nNisha\nV003\n0\n3\n");

        assert!(output.contains("Invalid number of days: three"));
        assert!(output.contains("Invalid number of days: 0. Rentals last at least one day."));
        assert!(service.bookings().is_empty());
        assert!(service.clients().is_empty());
    }

    #[test]
    fn test_return_flow() {
        let mut service = service();
        service.rent("V003", "Farhan", 2).unwrap();
        let output = run_script(&mut service, "2\nV003\n2\nV002\n3\n");

        assert!(output.contains("Vehicle returned successfully by Farhan"));
        assert!(output.contains("Invalid vehicle ID or vehicle is not rented."));
        assert!(service.vehicle("V003").unwrap().is_available());
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut service = service();
        let output = run_script(&mut service, "7\nabc\n3\n");

        assert_eq!(
            output
                .matches("Invalid choice. Please enter a valid option.")
                .count(),
            2
        );
        assert_eq!(output.matches("===== Car Rental System =====").count(), 3);
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut service = service();
        let output = run_script(&mut service, "1\nPriya\n");
        assert!(output.ends_with("Thank you for using the Car Rental System!\n"));
        assert!(service.clients().is_empty());
    }

    #[test]
    fn test_custom_currency_symbol() {
        let config = RentalConfig {
            currency_symbol: "$".to_string(),
            ..RentalConfig::default()
        };
        let mut service = RentalService::with_fleet(config, default_fleet()).unwrap();
        let output = run_script(&mut service, "1\nLena\nV002\n2\nY\n3\n");
        assert!(output.contains("Total Price: $1400.00"));
    }
}
