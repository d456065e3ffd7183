use std::fs::File;
use std::io::Error;
use std::path::Path;

const MAKES: [&str; 5] = ["BMW", "Toyota", "Fiat", "Porsche", "NoSuchMake"];
const CONDITIONS: [&str; 5] = ["excellent", "very_good", "good", "fair", "poor"];

/// Writes `rows` valid vehicles cycling through makes, years and conditions.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record([
        "vehicleMake",
        "vehicleModel",
        "vehicleYear",
        "vehicleMileage",
        "vehicleCondition",
        "hasAccidents",
        "hasServiceHistory",
    ])?;

    for i in 0..rows {
        wtr.write_record([
            MAKES[i % MAKES.len()],
            "Generated",
            &(2000 + (i % 27)).to_string(),
            &((i * 7_919) % 400_000).to_string(),
            CONDITIONS[i % CONDITIONS.len()],
            if i % 3 == 0 { "true" } else { "false" },
            if i % 2 == 0 { "true" } else { "false" },
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
