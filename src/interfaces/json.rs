use crate::domain::trade_in::{TradeInRecord, TradeInStatus};
use crate::domain::valuation::ValuationResult;
use crate::domain::vehicle::VehicleDescriptor;
use crate::error::{Result, ValuationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use uuid::Uuid;

/// Body posted by the valuation and trade-in forms.
pub type ValuationRequest = VehicleDescriptor;

/// Accepts either a single request object or an array of them.
///
/// The body must be well-formed JSON. Each element is decoded on its own, so
/// one bad request is reported in place and does not hide its neighbours.
pub fn read_requests<R: Read>(source: R) -> Result<Vec<Result<ValuationRequest>>> {
    let body: serde_json::Value = serde_json::from_reader(source)?;
    let elements = match body {
        serde_json::Value::Array(elements) => elements,
        object @ serde_json::Value::Object(_) => vec![object],
        other => {
            return Err(ValuationError::InternalError(
                format!("expected a request object or array, found {other}").into(),
            ));
        }
    };
    Ok(elements
        .into_iter()
        .map(|element| serde_json::from_value(element).map_err(ValuationError::from))
        .collect())
}

/// A valuation, merged with the record identity when a trade-in was filed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TradeInStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub valuation: ValuationResult,
}

impl From<ValuationResult> for ValuationResponse {
    fn from(valuation: ValuationResult) -> Self {
        Self {
            id: None,
            status: None,
            expires_at: None,
            valuation,
        }
    }
}

impl From<TradeInRecord> for ValuationResponse {
    fn from(record: TradeInRecord) -> Self {
        Self {
            id: Some(record.id),
            status: Some(record.status),
            expires_at: Some(record.expires_at),
            valuation: record.valuation,
        }
    }
}

pub fn write_responses<W: Write>(sink: W, responses: &[ValuationResponse]) -> Result<()> {
    serde_json::to_writer_pretty(sink, responses)?;
    Ok(())
}
