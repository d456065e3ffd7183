use crate::domain::vehicle::VehicleDescriptor;
use crate::error::{Result, ValuationError};
use std::io::Read;

/// Reads vehicle descriptors from a CSV source.
///
/// Columns use the lead-form names (`vehicleMake`, `vehicleYear`, ...). Whitespace is
/// trimmed and `vehicleModel`, `hasAccidents` and `hasServiceHistory` may be omitted.
pub struct VehicleReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> VehicleReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one descriptor per row; a bad row does not stop the stream.
    pub fn vehicles(self) -> impl Iterator<Item = Result<VehicleDescriptor>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ValuationError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::Condition;

    #[test]
    fn test_reader_valid_stream() {
        let data = "vehicleMake, vehicleModel, vehicleYear, vehicleMileage, vehicleCondition, hasAccidents, hasServiceHistory\n\
                    BMW, 320d, 2016, 250000, poor, true, false\n\
                    Toyota, Yaris, 2023, 30000, very_good, false, true";
        let reader = VehicleReader::new(data.as_bytes());
        let results: Vec<Result<VehicleDescriptor>> = reader.vehicles().collect();

        assert_eq!(results.len(), 2);
        let bmw = results[0].as_ref().unwrap();
        assert_eq!(bmw.make, "BMW");
        assert_eq!(bmw.mileage_km, 250_000);
        assert_eq!(bmw.condition, Condition::Poor);
        assert!(bmw.has_accident_history);
        assert!(results[1].as_ref().unwrap().has_service_history);
    }

    #[test]
    fn test_reader_optional_columns() {
        let data = "vehicleMake,vehicleYear,vehicleMileage,vehicleCondition\nKia,2020,40000,good";
        let vehicle = VehicleReader::new(data.as_bytes())
            .vehicles()
            .next()
            .unwrap()
            .unwrap();

        assert_eq!(vehicle.model, "");
        assert!(!vehicle.has_accident_history);
        assert!(!vehicle.has_service_history);
    }

    #[test]
    fn test_reader_blank_flag_cells() {
        let data = "vehicleMake,vehicleModel,vehicleYear,vehicleMileage,vehicleCondition,hasAccidents,hasServiceHistory\n\
                    Kia,Ceed,2020,40000,good,,\n\
                    Kia,Rio,2019,60000,fair,TRUE,\n\
                    Kia,Picanto,2018,70000,fair,sometimes,";
        let results: Vec<Result<VehicleDescriptor>> =
            VehicleReader::new(data.as_bytes()).vehicles().collect();

        let ceed = results[0].as_ref().unwrap();
        assert_eq!(ceed.model, "Ceed");
        assert!(!ceed.has_accident_history);
        assert!(!ceed.has_service_history);

        let rio = results[1].as_ref().unwrap();
        assert!(rio.has_accident_history);
        assert!(!rio.has_service_history);

        assert!(results[2].is_err());
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "vehicleMake,vehicleYear,vehicleMileage,vehicleCondition\n\
                    Kia,2020,40000,shiny\n\
                    Kia,twenty,40000,good\n\
                    Kia,2020,40000,good";
        let results: Vec<Result<VehicleDescriptor>> =
            VehicleReader::new(data.as_bytes()).vehicles().collect();

        assert!(results[0].is_err());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
