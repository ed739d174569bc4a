/// 입찰 기록 스프레드시트 내보내기
/// 확장자가 xlsx 이면 엑셀, 그 외에는 CSV 로 쓴다.
// region:    --- Imports
use crate::bidding::model::BidRecord;
use crate::error::PersistenceError;
use rust_xlsxwriter::Workbook;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

// endregion: --- Imports

// region:    --- Format
const HEADER: [&str; 8] = [
    "category",
    "brand",
    "product",
    "full_name",
    "phone_number",
    "email",
    "proposed_bid",
    "action_date",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Self::Xlsx,
            _ => Self::Csv,
        }
    }
}
// endregion: --- Format

// region:    --- Exporter
#[derive(Debug, Clone)]
pub struct SpreadsheetExporter {
    path: PathBuf,
    format: ExportFormat,
}

impl SpreadsheetExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = ExportFormat::for_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// 전체 기록을 파일로 다시 쓴다. 기존 파일은 덮어쓴다.
    /// 임시 파일에 쓴 뒤 이름을 바꾸므로 중간 상태의 파일은 보이지 않는다.
    pub fn write_all(&self, records: &[BidRecord]) -> Result<usize, PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        match self.format {
            ExportFormat::Csv => write_csv(&tmp_path, records)?,
            ExportFormat::Xlsx => write_xlsx(&tmp_path, records)?,
        }
        std::fs::rename(&tmp_path, &self.path)?;

        info!(
            "{:<12} --> 내보내기 완료: {:?} ({} rows)",
            "Export",
            self.path,
            records.len()
        );
        Ok(records.len())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
// endregion: --- Exporter

// region:    --- Writers
fn write_csv(path: &Path, records: &[BidRecord]) -> Result<(), PersistenceError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(HEADER)?;
    for r in records {
        let proposed_bid = r.proposed_bid.to_string();
        let action_date = r.action_date.to_rfc3339();
        writer.write_record([
            r.category.as_str(),
            r.brand.as_str(),
            r.product.as_str(),
            r.full_name.as_str(),
            r.phone_number.as_str(),
            r.email.as_str(),
            proposed_bid.as_str(),
            action_date.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, records: &[BidRecord]) -> Result<(), PersistenceError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (i, r) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, r.category.as_str())?;
        sheet.write_string(row, 1, r.brand.as_str())?;
        sheet.write_string(row, 2, r.product.as_str())?;
        sheet.write_string(row, 3, r.full_name.as_str())?;
        sheet.write_string(row, 4, r.phone_number.as_str())?;
        sheet.write_string(row, 5, r.email.as_str())?;
        sheet.write_number(row, 6, r.proposed_bid as f64)?;
        sheet.write_string(row, 7, r.action_date.to_rfc3339())?;
    }
    workbook.save(path)?;
    Ok(())
}
// endregion: --- Writers
