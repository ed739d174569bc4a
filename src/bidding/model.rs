use crate::catalogue::model::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 폼 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Idle,
    Bidding,
    Confirmed,
}

// 입찰 폼 입력값 (파싱 전 문자열)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidFields {
    pub proposed_bid: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

impl BidFields {
    /// 입찰 시작 시 기본값
    pub fn opened() -> Self {
        Self {
            proposed_bid: "0".to_string(),
            ..Self::default()
        }
    }
}

// 부분 수정 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldEdits {
    pub proposed_bid: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

// 세션 폼 상태
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub phase: Phase,
    pub fields: BidFields,
}

// 검증을 통과한 입찰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBid {
    pub proposed_bid: i64,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

// 입찰 기록 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidRecord {
    pub category: String,
    pub brand: String,
    pub product: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub proposed_bid: i64,
    pub action_date: DateTime<Utc>,
}

impl BidRecord {
    pub fn new(product: &Product, bid: ValidatedBid, action_date: DateTime<Utc>) -> Self {
        Self {
            category: product.category.clone(),
            brand: product.brand.clone(),
            product: product.product_code.clone(),
            full_name: bid.full_name,
            phone_number: bid.phone_number,
            email: bid.email,
            proposed_bid: bid.proposed_bid,
            action_date,
        }
    }
}
