/// 상품 카탈로그 저장소
/// 서비스 시작 시 CSV 또는 엑셀(xlsx) 파일에서 한 번 로드되며 이후 변경되지 않는다.
// region:    --- Imports
pub mod model;
pub mod workbook;

use crate::error::LoadError;
use model::Product;
use std::collections::HashSet;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

// endregion: --- Imports

// region:    --- Catalogue Store
#[derive(Debug, Clone)]
pub struct CatalogueStore {
    products: Vec<Product>,
}

impl CatalogueStore {
    /// 파일에서 카탈로그 로드
    /// 확장자가 xlsx 이면 엑셀, 그 외에는 CSV 로 읽는다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        info!("{:<12} --> 카탈로그 로드: {:?}", "Catalogue", path);
        let file = std::fs::File::open(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if is_workbook(path) {
            Self::from_products(workbook::read_products(BufReader::new(file))?)
        } else {
            Self::from_reader(file)
        }
    }

    /// CSV 리더에서 카탈로그 로드
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut products = Vec::new();
        for row in rdr.deserialize::<Product>() {
            products.push(row?);
        }
        Self::from_products(products)
    }

    /// 상품 목록 검증 후 저장소 생성
    pub fn from_products(products: Vec<Product>) -> Result<Self, LoadError> {
        if products.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen = HashSet::new();
        for product in &products {
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(LoadError::InvalidPrice {
                    code: product.product_code.clone(),
                    price: product.price,
                });
            }
            if !seen.insert(product.product_code.as_str()) {
                return Err(LoadError::DuplicateProduct(product.product_code.clone()));
            }
        }

        info!("{:<12} --> 상품 {}개 로드 완료", "Catalogue", products.len());
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// 조건에 맞는 상품 필터링
    /// 조건이 None 이면 해당 컬럼은 제한하지 않는다.
    pub fn filter(
        &self,
        category: Option<&str>,
        brand: Option<&str>,
        product_code: Option<&str>,
    ) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| brand.map_or(true, |b| p.brand == b))
            .filter(|p| product_code.map_or(true, |code| p.product_code == code))
            .collect()
    }

    /// 카테고리+브랜드+상품코드로 단일 상품 선택
    pub fn select(&self, category: &str, brand: &str, product_code: &str) -> Option<&Product> {
        self.filter(Some(category), Some(brand), Some(product_code))
            .into_iter()
            .next()
    }

    pub fn get(&self, product_code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_code == product_code)
    }

    /// 카테고리 목록 (최초 등장 순서)
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// 카테고리 내 브랜드 목록
    pub fn brands(&self, category: &str) -> Vec<&str> {
        distinct(
            self.filter(Some(category), None, None)
                .into_iter()
                .map(|p| p.brand.as_str()),
        )
    }

    /// 카테고리+브랜드 내 상품코드 목록
    pub fn product_codes(&self, category: &str, brand: &str) -> Vec<&str> {
        distinct(
            self.filter(Some(category), Some(brand), None)
                .into_iter()
                .map(|p| p.product_code.as_str()),
        )
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
// endregion: --- Catalogue Store
