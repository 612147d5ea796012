//! Dialog completion handling.
//!
//! Bridges the conversation engine and the rest of the marketplace: a
//! finished record is saved first, the session is deleted second, and
//! only then does the record fan out into listings, matching, or the
//! contact workflow. If the save fails the session survives, the engine
//! re-emits the same record on the next event, and nothing is lost.

use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::domain::dialog::FinishedRecord;
use crate::domain::foundation::{
    ContactRequestId, DialogKind, DomainError, ErrorCode, OfferId, RecordId, RequestId,
};
use crate::domain::listing::{BuyRequest, Offer};
use crate::ports::{ListingRepository, RecordSink, SessionStore};

use super::contact::ContactRequestWorkflow;
use super::matching::MatchingEngine;

/// What happened to a finished record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The record was saved; no further routing applies (registration,
    /// profile edits).
    Recorded(RecordId),
    /// A new offer was submitted and awaits moderation.
    OfferSubmitted(OfferId),
    /// A new request went live and was matched immediately.
    RequestPublished {
        request_id: RequestId,
        matches: usize,
    },
    /// A contact request was filed for moderation.
    ContactRequested(ContactRequestId),
}

/// Routes finished dialog records to their downstream effects.
pub struct DialogCompletionHandler {
    sink: Arc<dyn RecordSink>,
    sessions: Arc<dyn SessionStore>,
    listings: Arc<dyn ListingRepository>,
    matching: Arc<MatchingEngine>,
    contacts: Arc<ContactRequestWorkflow>,
}

impl DialogCompletionHandler {
    pub fn new(
        sink: Arc<dyn RecordSink>,
        sessions: Arc<dyn SessionStore>,
        listings: Arc<dyn ListingRepository>,
        matching: Arc<MatchingEngine>,
        contacts: Arc<ContactRequestWorkflow>,
    ) -> Self {
        Self {
            sink,
            sessions,
            listings,
            matching,
            contacts,
        }
    }

    /// Saves a finished record, releases its session, and routes it.
    ///
    /// # Errors
    ///
    /// - `StorageFailure` if the record sink or a repository fails; the
    ///   session is kept so the completion can be retried
    /// - `InvalidEntity` if the record cannot produce a valid entity
    pub async fn handle(&self, record: FinishedRecord) -> Result<CompletionOutcome, DomainError> {
        let record_id = self.sink.save(&record).await.map_err(DomainError::from)?;
        // Save confirmed: the session may now be released. From here a
        // crash loses at most the routing, never the record.
        let key = crate::domain::dialog::SessionKey::new(
            record.user_id().clone(),
            record.dialog_kind(),
        );
        self.sessions.delete(&key).await?;
        info!(kind = %record.dialog_kind(), %record_id, "dialog record saved");

        match record.dialog_kind() {
            DialogKind::Registration | DialogKind::ProfileEdit => {
                Ok(CompletionOutcome::Recorded(record_id))
            }
            DialogKind::OfferCreation => {
                let offer = Offer::from_record(OfferId::new(), &record)?;
                self.listings.save_offer(&offer).await.map_err(DomainError::from)?;
                // Matching waits for moderation; on_offer_approved runs then.
                Ok(CompletionOutcome::OfferSubmitted(offer.id()))
            }
            DialogKind::RequestCreation => {
                let request = BuyRequest::from_record(RequestId::new(), &record)?;
                self.listings
                    .save_request(&request)
                    .await
                    .map_err(DomainError::from)?;
                let matches = self.matching.on_request_finished(&request).await?;
                Ok(CompletionOutcome::RequestPublished {
                    request_id: request.id(),
                    matches: matches.len(),
                })
            }
            DialogKind::ContactComment => {
                let offer_id = record.require_text("offer_id").and_then(|raw| {
                    OfferId::from_str(raw).map_err(|_| {
                        DomainError::new(
                            ErrorCode::InvalidEntity,
                            format!("'{}' is not a valid offer id", raw),
                        )
                    })
                })?;
                let comment = record.text("comment").map(str::to_string);
                let request = self
                    .contacts
                    .create(record.user_id().clone(), offer_id, comment)
                    .await?;
                Ok(CompletionOutcome::ContactRequested(request.id()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryContactStore, InMemoryListingStore, InMemoryMatchStore, InMemoryNotifier,
        InMemoryRecordSink, InMemorySessionStore,
    };
    use crate::domain::dialog::{flows, Answers, DialogSession, FieldValue, SessionKey};
    use crate::domain::foundation::{ListingStatus, UserId};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Fixture {
        handler: DialogCompletionHandler,
        sink: Arc<InMemoryRecordSink>,
        sessions: Arc<InMemorySessionStore>,
        listings: Arc<InMemoryListingStore>,
        matches: Arc<InMemoryMatchStore>,
    }

    fn fixture() -> Fixture {
        let sink = Arc::new(InMemoryRecordSink::new());
        let sessions = Arc::new(InMemorySessionStore::new(1800));
        let listings = Arc::new(InMemoryListingStore::new());
        let matches = Arc::new(InMemoryMatchStore::new());
        let notifier = Arc::new(InMemoryNotifier::new());
        let matching = Arc::new(MatchingEngine::new(
            listings.clone(),
            matches.clone(),
            notifier.clone(),
        ));
        let contacts = Arc::new(ContactRequestWorkflow::new(
            Arc::new(InMemoryContactStore::new()),
            listings.clone(),
            notifier,
            user("moderator"),
        ));
        Fixture {
            handler: DialogCompletionHandler::new(
                sink.clone(),
                sessions.clone(),
                listings.clone(),
                matching,
                contacts,
            ),
            sink,
            sessions,
            listings,
            matches,
        }
    }

    // Runs a whole flow with pre-validated values and returns the record
    // with its session still in the store, as the engine leaves it.
    async fn finish_dialog(
        f: &Fixture,
        user_id: &str,
        kind: DialogKind,
        seed: Answers,
        values: Vec<FieldValue>,
    ) -> FinishedRecord {
        let flow = flows::flow_for(kind);
        let mut session = DialogSession::start(flow, user(user_id), seed);
        for value in values {
            session = session.advance(flow, value).unwrap();
        }
        f.sessions.put(session.clone()).await.unwrap();
        FinishedRecord::from_session(&session).unwrap()
    }

    async fn finished_request_record(f: &Fixture, user_id: &str) -> FinishedRecord {
        finish_dialog(
            f,
            user_id,
            DialogKind::RequestCreation,
            Answers::new(),
            vec![
                FieldValue::Choice("cattle".to_string()),
                FieldValue::Integer(20),
                FieldValue::Absent,
                FieldValue::Text("Voronezh".to_string()),
                FieldValue::Date(chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()),
                FieldValue::Absent,
            ],
        )
        .await
    }

    #[tokio::test]
    async fn registration_record_is_saved_and_session_released() {
        let f = fixture();
        let record = finish_dialog(
            &f,
            "u1",
            DialogKind::Registration,
            Answers::new(),
            vec![
                FieldValue::Email("a@example.com".to_string()),
                FieldValue::Text("hunter2hunter2".to_string()),
                FieldValue::Text("hunter2hunter2".to_string()),
                FieldValue::Text("Anna Petrova".to_string()),
                FieldValue::Phone("+79991234567".to_string()),
                FieldValue::Absent,
                FieldValue::Text("Voronezh".to_string()),
            ],
        )
        .await;

        let outcome = f.handler.handle(record).await.unwrap();

        assert!(matches!(outcome, CompletionOutcome::Recorded(_)));
        assert_eq!(f.sink.len().await, 1);
        assert!(f.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn offer_record_lands_pending_for_moderation() {
        let f = fixture();
        let record = finish_dialog(
            &f,
            "s1",
            DialogKind::OfferCreation,
            Answers::new(),
            vec![
                FieldValue::Choice("cattle".to_string()),
                FieldValue::Text("hereford".to_string()),
                FieldValue::Integer(30),
                FieldValue::Integer(120_000),
                FieldValue::Text("Voronezh".to_string()),
                FieldValue::Absent,
            ],
        )
        .await;

        let outcome = f.handler.handle(record).await.unwrap();

        let CompletionOutcome::OfferSubmitted(offer_id) = outcome else {
            panic!("expected an offer submission, got {:?}", outcome);
        };
        let offer = f.listings.find_offer(offer_id).await.unwrap().unwrap();
        assert_eq!(offer.status(), ListingStatus::Pending);
        // No matching before moderation.
        assert_eq!(f.matches.len().await, 0);
    }

    #[tokio::test]
    async fn request_record_goes_live_and_matches() {
        let f = fixture();

        // An already-approved offer is waiting in the listings.
        let mut offer = Offer::new(
            OfferId::new(),
            user("seller-1"),
            "cattle".to_string(),
            "hereford".to_string(),
            "Voronezh".to_string(),
            30,
            120_000,
        )
        .unwrap();
        offer.approve().unwrap();
        f.listings.save_offer(&offer).await.unwrap();

        let record = finished_request_record(&f, "b1").await;
        let outcome = f.handler.handle(record).await.unwrap();

        assert!(matches!(
            outcome,
            CompletionOutcome::RequestPublished { matches: 1, .. }
        ));
        assert_eq!(f.matches.len().await, 1);
    }

    #[tokio::test]
    async fn contact_comment_record_files_a_contact_request() {
        let f = fixture();
        let offer = Offer::new(
            OfferId::new(),
            user("seller-1"),
            "cattle".to_string(),
            "hereford".to_string(),
            "Voronezh".to_string(),
            30,
            120_000,
        )
        .unwrap();
        f.listings.save_offer(&offer).await.unwrap();

        let mut seed = Answers::new();
        seed.insert(
            "offer_id".to_string(),
            FieldValue::Text(offer.id().to_string()),
        );
        let record = finish_dialog(
            &f,
            "b1",
            DialogKind::ContactComment,
            seed,
            vec![FieldValue::Text("interested in 20 head".to_string())],
        )
        .await;

        let outcome = f.handler.handle(record).await.unwrap();
        assert!(matches!(outcome, CompletionOutcome::ContactRequested(_)));
    }

    #[tokio::test]
    async fn failed_save_keeps_the_session_for_retry() {
        let f = fixture();
        let record = finished_request_record(&f, "b1").await;
        let key = SessionKey::new(user("b1"), DialogKind::RequestCreation);

        f.sink.set_failing(true);
        let err = f.handler.handle(record.clone()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageFailure);
        assert!(f.sessions.get(&key).await.unwrap().is_some());

        // Retry after the sink recovers.
        f.sink.set_failing(false);
        f.handler.handle(record).await.unwrap();
        assert!(f.sessions.get(&key).await.unwrap().is_none());
        assert_eq!(f.sink.len().await, 1);
    }
}
