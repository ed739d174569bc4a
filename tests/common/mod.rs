#![allow(dead_code)]

use calamine::{open_workbook, Reader, Xlsx};
use catalogue_bid_service::catalogue::model::Product;
use catalogue_bid_service::catalogue::CatalogueStore;
use catalogue_bid_service::database::DatabaseManager;
use catalogue_bid_service::export::{ExportFormat, SpreadsheetExporter};
use catalogue_bid_service::record_store::SqliteRecordStore;
use std::path::Path;
use std::sync::Arc;

pub const CATALOGUE_CSV: &str = "\
category,brand,product_code,product_name,size,color,material,price
Bags,Aurora,AUR-001,Aurora Tote,M,Black,Leather,100
Bags,Aurora,AUR-002,Aurora Clutch,S,Red,Suede,80.5
Bags,Nordik,NOR-001,Nordik Backpack,L,Grey,Canvas,60
Shoes,Nordik,NOR-101,Nordik Runner,42,White,Mesh,120
Shoes,Velo,VEL-201,Velo Loafer,41,Brown,Leather,150
";

pub fn catalogue() -> CatalogueStore {
    CatalogueStore::from_reader(CATALOGUE_CSV.as_bytes()).expect("sample catalogue")
}

pub fn product(price: f64) -> Product {
    Product {
        category: "Bags".to_string(),
        brand: "Aurora".to_string(),
        product_code: "AUR-001".to_string(),
        product_name: "Aurora Tote".to_string(),
        size: "M".to_string(),
        color: "Black".to_string(),
        material: "Leather".to_string(),
        price,
    }
}

pub fn database_url(dir: &Path) -> String {
    format!("sqlite://{}", dir.join("data.db").display())
}

/// 임시 디렉터리에 저장소 생성 (CSV 내보내기)
pub async fn open_store(dir: &Path) -> SqliteRecordStore {
    open_store_with_export(dir, "data.csv").await
}

pub async fn open_store_with_export(dir: &Path, export_file: &str) -> SqliteRecordStore {
    let db_manager = Arc::new(
        DatabaseManager::new(&database_url(dir))
            .await
            .expect("database"),
    );
    SqliteRecordStore::open(db_manager, SpreadsheetExporter::new(dir.join(export_file)))
        .await
        .expect("record store")
}

/// 내보내기 파일의 데이터 행 수 (헤더 제외)
pub fn export_rows(path: &Path) -> usize {
    match ExportFormat::for_path(path) {
        ExportFormat::Csv => {
            let mut rdr = csv::Reader::from_path(path).expect("export file");
            rdr.records().map(|r| r.expect("export row")).count()
        }
        ExportFormat::Xlsx => workbook_rows(path).len().saturating_sub(1),
    }
}

/// 엑셀 첫 시트의 모든 행 (헤더 포함), 셀은 문자열로
pub fn workbook_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook");
    let range = workbook
        .worksheet_range_at(0)
        .expect("first sheet")
        .expect("sheet range");
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
