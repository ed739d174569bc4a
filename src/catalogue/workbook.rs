/// 엑셀(xlsx) 카탈로그 읽기
/// 첫 번째 시트의 첫 행을 헤더로 사용한다.
// region:    --- Imports
use super::model::Product;
use crate::error::LoadError;
use calamine::{Data, Reader, Xlsx};
use std::io::{Read, Seek};

// endregion: --- Imports

// region:    --- Workbook Reader
const COLUMNS: [&str; 8] = [
    "category",
    "brand",
    "product_code",
    "product_name",
    "size",
    "color",
    "material",
    "price",
];

pub fn read_products<RS: Read + Seek>(reader: RS) -> Result<Vec<Product>, LoadError> {
    let mut workbook = Xlsx::new(reader)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(LoadError::Empty),
    };

    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::Empty)?;
    let mut index = [0usize; 8];
    for (slot, name) in index.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|cell| cell_text(cell) == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }

    let mut products = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        // 헤더 포함 1부터 시작하는 행 번호
        let row_no = i + 2;
        let text = |col: usize| row.get(index[col]).map(cell_text).unwrap_or_default();
        products.push(Product {
            category: text(0),
            brand: text(1),
            product_code: text(2),
            product_name: text(3),
            size: text(4),
            color: text(5),
            material: text(6),
            price: cell_price(row.get(index[7]).unwrap_or(&Data::Empty), row_no)?,
        });
    }
    Ok(products)
}

/// 셀 값을 문자열로 (숫자 셀 42.0 -> "42")
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_price(cell: &Data, row: usize) -> Result<f64, LoadError> {
    let invalid = || LoadError::InvalidCell {
        row,
        column: "price",
        value: cell_text(cell),
    };
    match cell {
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
// endregion: --- Workbook Reader
