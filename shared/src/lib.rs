use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An inventory item and its on-hand quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub part_no: String,
    pub quant: i32,
}

impl Part {
    pub fn new(part_no: impl Into<String>, quant: i32) -> Self {
        Self {
            part_no: part_no.into(),
            quant,
        }
    }
}

/// Display model for the listing page. Built fresh for every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    pub partlist: Vec<Part>,
    pub message: String,
}

impl ListingPage {
    pub fn new(partlist: Vec<Part>) -> Self {
        Self {
            partlist,
            message: String::new(),
        }
    }

    pub fn with_message(partlist: Vec<Part>, error: &RequestError) -> Self {
        Self {
            partlist,
            message: error.to_string(),
        }
    }
}

/// Result of an atomic decrement against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    Applied { remaining: i32 },
    NotFound,
    Insufficient { available: i32 },
}

/// Everything a part request can fail with that is reported back on the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("INVALID PART NUMBER / QUANTITY")]
    InvalidRequest,
    #[error("QUANTITY MUST BE A VALID INTEGER")]
    InvalidQuantity,
    #[error("PART NOT FOUND: {part_no}")]
    PartNotFound { part_no: String },
    #[error("INSUFFICIENT QUANTITY FOR {part_no}; inventory = {inventory}, requested = {requested}")]
    InsufficientQuantity {
        part_no: String,
        inventory: i32,
        requested: i32,
    },
}

/// A validated request to take `amount` units of `part_no` out of inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartRequest {
    pub part_no: String,
    pub amount: i32,
}

impl PartRequest {
    /// Validates raw form values. Absent and empty fields are treated alike;
    /// the amount must be a non-negative integer that fits the quantity column.
    pub fn parse(part_no: Option<&str>, amount: Option<&str>) -> Result<Self, RequestError> {
        let (part_no, amount) = match (part_no, amount) {
            (Some(p), Some(a)) if !p.is_empty() && !a.is_empty() => (p, a),
            _ => return Err(RequestError::InvalidRequest),
        };

        let amount: i32 = amount
            .trim()
            .parse()
            .map_err(|_| RequestError::InvalidQuantity)?;
        if amount < 0 {
            return Err(RequestError::InvalidQuantity);
        }

        Ok(Self {
            part_no: part_no.to_string(),
            amount,
        })
    }

    /// Maps a store outcome to the user-facing error, if any.
    pub fn check(&self, outcome: DecrementOutcome) -> Result<i32, RequestError> {
        match outcome {
            DecrementOutcome::Applied { remaining } => Ok(remaining),
            DecrementOutcome::NotFound => Err(RequestError::PartNotFound {
                part_no: self.part_no.clone(),
            }),
            DecrementOutcome::Insufficient { available } => Err(RequestError::InsufficientQuantity {
                part_no: self.part_no.clone(),
                inventory: available,
                requested: self.amount,
            }),
        }
    }
}
