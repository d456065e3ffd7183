pub mod valuation_writer;
pub mod vehicle_reader;
