/// 입찰 폼 상태 전이 및 검증
/// 1. 입찰 시작
/// 2. 입력값 수정
/// 3. 확정 및 검증
/// 4. 상품 변경 시 초기화
// region:    --- Imports
use super::model::{BidFields, BidRecord, FieldEdits, FormState, Phase, ValidatedBid};
use crate::catalogue::model::Product;
use crate::error::{BidError, SessionError, ValidationError};
use crate::record_store::RecordStore;
use chrono::Utc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Transitions
/// 1. 입찰 시작 (Idle -> Bidding)
/// 이미 열린 폼은 입력값을 유지한다.
pub fn begin_bid(state: FormState) -> FormState {
    match state.phase {
        Phase::Idle => FormState {
            phase: Phase::Bidding,
            fields: BidFields::opened(),
        },
        _ => state,
    }
}

/// 2. 입력값 수정
pub fn edit(mut state: FormState, edits: FieldEdits) -> Result<FormState, SessionError> {
    if state.phase == Phase::Idle {
        return Err(SessionError::FormNotOpen);
    }
    let fields = &mut state.fields;
    if let Some(v) = edits.proposed_bid {
        fields.proposed_bid = v;
    }
    if let Some(v) = edits.full_name {
        fields.full_name = v;
    }
    if let Some(v) = edits.phone_number {
        fields.phone_number = v;
    }
    if let Some(v) = edits.email {
        fields.email = v;
    }
    Ok(state)
}

/// 3. 확정 (Bidding | Confirmed -> Confirmed)
pub fn confirm(state: FormState) -> Result<FormState, SessionError> {
    match state.phase {
        Phase::Idle => Err(SessionError::FormNotOpen),
        _ => Ok(FormState {
            phase: Phase::Confirmed,
            ..state
        }),
    }
}

/// 4. 초기화 (상품 변경)
pub fn reset(_state: FormState) -> FormState {
    FormState::default()
}
// endregion: --- Transitions

// region:    --- Validation
/// 확정 상태의 폼 검증
/// 확정 전에는 검증할 것이 없으므로 Ok(None) 을 반환한다.
/// 검사 순서: 필수 입력 -> 숫자 형식 -> 최소 금액
pub fn validate(
    state: &FormState,
    product: &Product,
) -> Result<Option<ValidatedBid>, ValidationError> {
    if state.phase != Phase::Confirmed {
        return Ok(None);
    }

    let fields = &state.fields;
    let required = [
        &fields.proposed_bid,
        &fields.full_name,
        &fields.phone_number,
        &fields.email,
    ];
    if required.iter().any(|v| v.is_empty()) {
        return Err(ValidationError::MissingFields);
    }

    let bid = parse_bid(&fields.proposed_bid)?;

    if (bid as f64) < product.price {
        return Err(ValidationError::BidTooLow {
            bid,
            price: product.price,
        });
    }

    Ok(Some(ValidatedBid {
        proposed_bid: bid,
        full_name: fields.full_name.clone(),
        phone_number: fields.phone_number.clone(),
        email: fields.email.clone(),
    }))
}

/// 입찰 금액 파싱 (ASCII 숫자만 허용)
pub fn parse_bid(raw: &str) -> Result<i64, ValidationError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidBidFormat);
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidBidFormat)
}
// endregion: --- Validation

// region:    --- Commands
/// 입찰 확정 처리
/// 검증을 통과하면 기록을 저장하고 내보내기 파일을 갱신한다.
/// 상태는 검증 결과와 관계없이 Confirmed 로 남는다.
pub async fn handle_confirm_bid(
    state: &mut FormState,
    product: &Product,
    store: &dyn RecordStore,
) -> Result<BidRecord, BidError> {
    info!(
        "{:<12} --> 입찰 확정 요청: product={}",
        "Command", product.product_code
    );
    *state = confirm(state.clone())?;

    let bid = match validate(state, product)? {
        Some(bid) => bid,
        None => return Err(SessionError::FormNotOpen.into()),
    };

    let record = BidRecord::new(product, bid, Utc::now());
    store.add_record(&record).await?;
    info!(
        "{:<12} --> 입찰 저장 완료: product={}, bid={}",
        "Command", record.product, record.proposed_bid
    );

    // 기록은 이미 커밋되었으므로 내보내기 실패는 입찰 실패로 보지 않는다.
    if let Err(e) = store.export_all().await {
        error!("{:<12} --> 내보내기 갱신 실패: {:?}", "Command", e);
    }

    Ok(record)
}
// endregion: --- Commands
