//! Sell-offer listing entity.

use serde::{Deserialize, Serialize};

use crate::domain::dialog::{FinishedRecord, MediaRef};
use crate::domain::foundation::{
    DialogKind, DomainError, ErrorCode, ListingStatus, OfferId, StateMachine, Timestamp, UserId,
};

/// A seller's listing of available livestock.
///
/// # Invariants
///
/// - `quantity` and `price_per_head` are at least 1
/// - status transitions follow [`ListingStatus`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    id: OfferId,
    seller_id: UserId,
    category: String,
    breed: String,
    region: String,
    quantity: u32,
    price_per_head: i64,
    milk_yield: Option<i64>,
    photo: Option<MediaRef>,
    status: ListingStatus,
    created_at: Timestamp,
}

impl Offer {
    /// Creates a new pending offer.
    ///
    /// # Errors
    ///
    /// - `InvalidEntity` if category or region is empty, or quantity/price
    ///   is below 1
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OfferId,
        seller_id: UserId,
        category: String,
        breed: String,
        region: String,
        quantity: u32,
        price_per_head: i64,
    ) -> Result<Self, DomainError> {
        if category.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::InvalidEntity, "Offer category is empty"));
        }
        if region.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::InvalidEntity, "Offer region is empty"));
        }
        if quantity < 1 {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                "Offer quantity must be at least 1",
            ));
        }
        if price_per_head < 1 {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                "Offer price must be at least 1",
            ));
        }
        Ok(Self {
            id,
            seller_id,
            category,
            breed,
            region,
            quantity,
            price_per_head,
            milk_yield: None,
            photo: None,
            status: ListingStatus::Pending,
            created_at: Timestamp::now(),
        })
    }

    /// Builds a pending offer from a finished offer-creation dialog.
    pub fn from_record(id: OfferId, record: &FinishedRecord) -> Result<Self, DomainError> {
        if record.dialog_kind() != DialogKind::OfferCreation {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                format!("Cannot build an offer from a {} record", record.dialog_kind()),
            ));
        }
        let quantity = u32::try_from(record.require_integer("quantity")?).map_err(|_| {
            DomainError::new(ErrorCode::InvalidEntity, "Offer quantity out of range")
        })?;
        let mut offer = Self::new(
            id,
            record.user_id().clone(),
            record.require_text("category")?.to_string(),
            record.require_text("breed")?.to_string(),
            record.require_text("region")?.to_string(),
            quantity,
            record.require_integer("price_per_head")?,
        )?;
        offer.milk_yield = record.integer("milk_yield");
        offer.photo = record.media("photo").cloned();
        Ok(offer)
    }

    pub fn id(&self) -> OfferId {
        self.id
    }

    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price_per_head(&self) -> i64 {
        self.price_per_head
    }

    pub fn milk_yield(&self) -> Option<i64> {
        self.milk_yield
    }

    pub fn photo(&self) -> Option<&MediaRef> {
        self.photo.as_ref()
    }

    pub fn status(&self) -> ListingStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// True if the offer participates in matching.
    pub fn is_matchable(&self) -> bool {
        self.status.is_matchable()
    }

    /// Moderator approval.
    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ListingStatus::Approved)?;
        Ok(())
    }

    /// Moderator rejection.
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ListingStatus::Rejected)?;
        Ok(())
    }

    /// Makes an approved offer publicly visible.
    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ListingStatus::Active)?;
        Ok(())
    }

    /// Takes the offer off the market.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ListingStatus::Archived)?;
        Ok(())
    }
}
