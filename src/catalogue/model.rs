use serde::{Deserialize, Serialize};

// 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub category: String,
    pub brand: String,
    pub product_code: String,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub material: String,
    pub price: f64,
}
