//! Buy-request listing entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dialog::FinishedRecord;
use crate::domain::foundation::{
    DialogKind, DomainError, ErrorCode, ListingStatus, RequestId, StateMachine, Timestamp, UserId,
};

/// A buyer's request for livestock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyRequest {
    id: RequestId,
    buyer_id: UserId,
    category: String,
    region: String,
    quantity: u32,
    max_price: Option<i64>,
    deadline: Option<NaiveDate>,
    comment: Option<String>,
    status: ListingStatus,
    created_at: Timestamp,
}

impl BuyRequest {
    /// Creates a new request, immediately active.
    ///
    /// Requests skip moderation: they expose no seller contact details, so
    /// they go live as soon as the dialog finishes.
    ///
    /// # Errors
    ///
    /// - `InvalidEntity` if category or region is empty, or quantity is
    ///   below 1
    pub fn new(
        id: RequestId,
        buyer_id: UserId,
        category: String,
        region: String,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        if category.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::InvalidEntity, "Request category is empty"));
        }
        if region.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::InvalidEntity, "Request region is empty"));
        }
        if quantity < 1 {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                "Request quantity must be at least 1",
            ));
        }
        Ok(Self {
            id,
            buyer_id,
            category,
            region,
            quantity,
            max_price: None,
            deadline: None,
            comment: None,
            status: ListingStatus::Active,
            created_at: Timestamp::now(),
        })
    }

    /// Builds an active request from a finished request-creation dialog.
    pub fn from_record(id: RequestId, record: &FinishedRecord) -> Result<Self, DomainError> {
        if record.dialog_kind() != DialogKind::RequestCreation {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                format!("Cannot build a request from a {} record", record.dialog_kind()),
            ));
        }
        let quantity = u32::try_from(record.require_integer("quantity")?).map_err(|_| {
            DomainError::new(ErrorCode::InvalidEntity, "Request quantity out of range")
        })?;
        let mut request = Self::new(
            id,
            record.user_id().clone(),
            record.require_text("category")?.to_string(),
            record.require_text("region")?.to_string(),
            quantity,
        )?;
        request.max_price = record.integer("max_price");
        request.deadline = record.date("deadline");
        request.comment = record.text("comment").map(str::to_string);
        Ok(request)
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn buyer_id(&self) -> &UserId {
        &self.buyer_id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_price(&self) -> Option<i64> {
        self.max_price
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn status(&self) -> ListingStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// True while the request should be considered for matching.
    pub fn is_open(&self) -> bool {
        self.status.is_matchable()
    }

    /// Takes the request off the market.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ListingStatus::Archived)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer() -> UserId {
        UserId::new("buyer-1").unwrap()
    }

    fn test_request() -> BuyRequest {
        BuyRequest::new(
            RequestId::new(),
            buyer(),
            "cattle".to_string(),
            "Voronezh".to_string(),
            10,
        )
        .unwrap()
    }

    #[test]
    fn new_request_is_active_and_open() {
        let request = test_request();
        assert_eq!(request.status(), ListingStatus::Active);
        assert!(request.is_open());
    }

    #[test]
    fn new_request_rejects_zero_quantity() {
        let result = BuyRequest::new(
            RequestId::new(),
            buyer(),
            "cattle".to_string(),
            "Voronezh".to_string(),
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_request_rejects_empty_region() {
        let result = BuyRequest::new(
            RequestId::new(),
            buyer(),
            "cattle".to_string(),
            "".to_string(),
            10,
        );
        assert!(result.is_err());
    }

    #[test]
    fn archived_request_is_closed() {
        let mut request = test_request();
        request.archive().unwrap();
        assert!(!request.is_open());
        assert!(request.archive().is_err());
    }
}
