/// 입찰 기록 추가
pub const INSERT_RECORD: &str = r#"
    INSERT INTO bid_records (
        category, brand, product, full_name, phone_number, email, proposed_bid, action_date
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// 모든 입찰 기록 조회 (저장 순서)
pub const GET_ALL_RECORDS: &str = r#"
    SELECT category, brand, product, full_name, phone_number, email, proposed_bid, action_date
    FROM bid_records
    ORDER BY rowid
"#;

/// 입찰 기록 수 조회
pub const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM bid_records";

/// 상품별 입찰 기록 조회
pub const GET_PRODUCT_RECORDS: &str = r#"
    SELECT category, brand, product, full_name, phone_number, email, proposed_bid, action_date
    FROM bid_records
    WHERE product = ?
    ORDER BY rowid
"#;
