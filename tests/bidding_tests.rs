mod common;

use async_trait::async_trait;
use catalogue_bid_service::bidding::commands::{
    begin_bid, confirm, edit, handle_confirm_bid, parse_bid, reset, validate,
};
use catalogue_bid_service::bidding::model::{BidFields, BidRecord, FieldEdits, FormState, Phase};
use catalogue_bid_service::error::{BidError, PersistenceError, SessionError, ValidationError};
use catalogue_bid_service::record_store::RecordStore;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn confirmed(proposed_bid: &str, full_name: &str, phone_number: &str, email: &str) -> FormState {
    FormState {
        phase: Phase::Confirmed,
        fields: BidFields {
            proposed_bid: proposed_bid.to_string(),
            full_name: full_name.to_string(),
            phone_number: phone_number.to_string(),
            email: email.to_string(),
        },
    }
}

// region:    --- Transitions

#[test]
fn test_begin_bid_opens_blank_form_with_zero_bid() {
    let state = begin_bid(FormState::default());
    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.fields.proposed_bid, "0");
    assert!(state.fields.full_name.is_empty());
    assert!(state.fields.phone_number.is_empty());
    assert!(state.fields.email.is_empty());
}

#[test]
fn test_begin_bid_keeps_open_form() {
    let state = confirmed("150", "Ann", "555", "ann@example.com");
    assert_eq!(begin_bid(state.clone()), state);
}

#[test]
fn test_edit_and_confirm_require_open_form() {
    assert_eq!(
        edit(FormState::default(), FieldEdits::default()),
        Err(SessionError::FormNotOpen)
    );
    assert_eq!(confirm(FormState::default()), Err(SessionError::FormNotOpen));
}

#[test]
fn test_edit_changes_only_given_fields() {
    let state = begin_bid(FormState::default());
    let state = edit(
        state,
        FieldEdits {
            full_name: Some("Ann".to_string()),
            ..FieldEdits::default()
        },
    )
    .unwrap();
    assert_eq!(state.fields.full_name, "Ann");
    assert_eq!(state.fields.proposed_bid, "0");
    assert_eq!(state.phase, Phase::Bidding);
}

#[test]
fn test_confirm_stays_confirmed() {
    let state = confirm(begin_bid(FormState::default())).unwrap();
    assert_eq!(state.phase, Phase::Confirmed);
    let state = confirm(state).unwrap();
    assert_eq!(state.phase, Phase::Confirmed);
}

#[test]
fn test_reset_clears_everything() {
    let state = reset(confirmed("150", "Ann", "555", "ann@example.com"));
    assert_eq!(state, FormState::default());
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.fields.proposed_bid.is_empty());
}

// endregion: --- Transitions

// region:    --- Validation

#[test]
fn test_validation_waits_for_confirmation() {
    let product = common::product(100.0);
    let mut state = confirmed("", "", "", "");
    state.phase = Phase::Bidding;
    assert_eq!(validate(&state, &product), Ok(None));
}

#[test]
fn test_missing_fields_reported_before_other_errors() {
    let product = common::product(100.0);
    // 빈 필드 + 잘못된 형식 + 최소 금액 미달이 동시에 있는 경우
    let state = confirmed("-5", "", "555", "ann@example.com");
    assert_eq!(
        validate(&state, &product),
        Err(ValidationError::MissingFields)
    );

    let state = confirmed("", "Ann", "555", "ann@example.com");
    assert_eq!(
        validate(&state, &product),
        Err(ValidationError::MissingFields)
    );
}

#[test]
fn test_non_numeric_bid_is_format_error() {
    let product = common::product(100.0);
    for raw in ["abc", "-150", "+150", "150.0", "1 50", "99999999999999999999"] {
        let state = confirmed(raw, "Ann", "555", "ann@example.com");
        assert_eq!(
            validate(&state, &product),
            Err(ValidationError::InvalidBidFormat),
            "bid {raw:?}"
        );
    }
}

#[test]
fn test_low_bid_is_rejected() {
    let product = common::product(100.0);
    let state = confirmed("5", "Ann", "555", "ann@example.com");
    assert_eq!(
        validate(&state, &product),
        Err(ValidationError::BidTooLow {
            bid: 5,
            price: 100.0
        })
    );

    let product = common::product(80.5);
    let state = confirmed("80", "Ann", "555", "ann@example.com");
    assert!(matches!(
        validate(&state, &product),
        Err(ValidationError::BidTooLow { .. })
    ));
}

#[test]
fn test_bid_at_or_above_price_passes() {
    let product = common::product(100.0);
    let bid = validate(&confirmed("150", "Ann", "555", "ann@example.com"), &product)
        .unwrap()
        .unwrap();
    assert_eq!(bid.proposed_bid, 150);
    assert_eq!(bid.full_name, "Ann");

    let bid = validate(&confirmed("100", "Ann", "555", "ann@example.com"), &product)
        .unwrap()
        .unwrap();
    assert_eq!(bid.proposed_bid, 100);
}

#[test]
fn test_parse_bid() {
    assert_eq!(parse_bid("0"), Ok(0));
    assert_eq!(parse_bid("007"), Ok(7));
    assert_eq!(parse_bid(""), Err(ValidationError::InvalidBidFormat));
    assert_eq!(parse_bid("١٢"), Err(ValidationError::InvalidBidFormat));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ValidationError::MissingFields.to_string(),
        "Please fill in all required fields."
    );
    assert_eq!(
        ValidationError::InvalidBidFormat.to_string(),
        "Incorrect bid amount format"
    );
    assert_eq!(
        ValidationError::BidTooLow { bid: 1, price: 2.0 }.to_string(),
        "Bid Amount must be equal to start price or greater."
    );
}

// endregion: --- Validation

// region:    --- Confirm Command

/// 메모리 저장소 (쓰기/내보내기 실패 여부 설정 가능)
#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<BidRecord>>,
    exports: AtomicUsize,
    fail_writes: bool,
    fail_exports: bool,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn add_record(&self, record: &BidRecord) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Io(std::io::Error::other("disk gone")));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn export_all(&self) -> Result<usize, PersistenceError> {
        self.exports.fetch_add(1, Ordering::SeqCst);
        if self.fail_exports {
            return Err(PersistenceError::Io(std::io::Error::other("export locked")));
        }
        Ok(self.records.lock().unwrap().len())
    }

    async fn all_records(&self) -> Result<Vec<BidRecord>, PersistenceError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn product_records(
        &self,
        product_code: &str,
    ) -> Result<Vec<BidRecord>, PersistenceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.product == product_code)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }

    fn export_path(&self) -> &Path {
        Path::new("memory.csv")
    }
}

#[tokio::test]
async fn test_confirm_persists_and_exports() {
    let store = MemoryStore::default();
    let product = common::product(100.0);
    let mut state = begin_bid(FormState::default());
    state = edit(
        state,
        FieldEdits {
            proposed_bid: Some("150".to_string()),
            full_name: Some("Ann".to_string()),
            phone_number: Some("555".to_string()),
            email: Some("ann@example.com".to_string()),
        },
    )
    .unwrap();

    let record = handle_confirm_bid(&mut state, &product, &store).await.unwrap();
    assert_eq!(record.proposed_bid, 150);
    assert_eq!(record.product, "AUR-001");
    assert_eq!(record.category, "Bags");
    assert_eq!(state.phase, Phase::Confirmed);
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.exports.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_confirm_writes_nothing_and_stays_confirmed() {
    let store = MemoryStore::default();
    let product = common::product(100.0);
    let mut state = begin_bid(FormState::default());

    let err = handle_confirm_bid(&mut state, &product, &store)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BidError::Validation(ValidationError::MissingFields)
    ));
    assert_eq!(state.phase, Phase::Confirmed);
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(store.exports.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_confirm_from_idle_is_rejected() {
    let store = MemoryStore::default();
    let mut state = FormState::default();
    let err = handle_confirm_bid(&mut state, &common::product(1.0), &store)
        .await
        .unwrap_err();
    assert!(matches!(err, BidError::Session(SessionError::FormNotOpen)));
    assert_eq!(state.phase, Phase::Idle);
}

#[tokio::test]
async fn test_write_failure_is_persistence_error() {
    let store = MemoryStore {
        fail_writes: true,
        ..MemoryStore::default()
    };
    let mut state = confirmed("150", "Ann", "555", "ann@example.com");
    let err = handle_confirm_bid(&mut state, &common::product(100.0), &store)
        .await
        .unwrap_err();
    assert!(matches!(err, BidError::Persistence(_)));
    assert_eq!(store.exports.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_export_failure_after_commit_still_confirms() {
    let store = MemoryStore {
        fail_exports: true,
        ..MemoryStore::default()
    };
    let mut state = confirmed("150", "Ann", "555", "ann@example.com");

    let record = handle_confirm_bid(&mut state, &common::product(100.0), &store)
        .await
        .unwrap();
    assert_eq!(record.proposed_bid, 150);
    assert_eq!(state.phase, Phase::Confirmed);
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.all_records().await.unwrap(), vec![record]);
    assert_eq!(store.exports.load(Ordering::SeqCst), 1);
}

// endregion: --- Confirm Command
