//! Wire formats: CSV batches and the JSON request/response of the lead forms.

pub mod csv;
pub mod json;
