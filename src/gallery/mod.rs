/// 상품 이미지 조회 및 배치
// region:    --- Imports
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageHandle {
    pub file_name: String,
    pub url: String,
}

// 이미지 배치: 없음 / 단일 전체폭 / 한 줄에 N개
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "images", rename_all = "snake_case")]
pub enum ImageLayout {
    Empty,
    Single(ImageHandle),
    Row(Vec<ImageHandle>),
}

pub fn layout(mut images: Vec<ImageHandle>) -> ImageLayout {
    match images.len() {
        0 => ImageLayout::Empty,
        1 => ImageLayout::Single(images.remove(0)),
        _ => ImageLayout::Row(images),
    }
}
// endregion: --- Model

// region:    --- Gallery
#[derive(Debug, Clone)]
pub struct ImageGallery {
    dir: PathBuf,
    url_prefix: String,
}

impl ImageGallery {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 상품코드로 시작하는 이미지 파일 목록 (이름순)
    /// 디렉터리가 없거나 읽을 수 없으면 빈 목록을 반환한다.
    pub fn find(&self, product_code: &str) -> Vec<ImageHandle> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("{:<12} --> 이미지 디렉터리 읽기 실패: {:?} ({})", "Gallery", self.dir, e);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !product_code.is_empty() && name.starts_with(product_code))
            .collect();
        names.sort();
        debug!("{:<12} --> {} 이미지 {}개", "Gallery", product_code, names.len());

        names
            .into_iter()
            .map(|file_name| ImageHandle {
                url: format!("{}/{}", self.url_prefix.trim_end_matches('/'), file_name),
                file_name,
            })
            .collect()
    }

    pub fn layout_for(&self, product_code: &str) -> ImageLayout {
        layout(self.find(product_code))
    }
}
// endregion: --- Gallery
