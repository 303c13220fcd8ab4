//! 下载打包
//!
//! 单块结果直接作为 markdown 文件下载，多块结果打包为 ZIP（编号文件）

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::edit::ChunkSet;

pub const SINGLE_FILE_NAME: &str = "edited_document.md";
pub const ARCHIVE_FILE_NAME: &str = "edited_documents.zip";
pub const MARKDOWN_MIME: &str = "text/markdown";
pub const ZIP_MIME: &str = "application/zip";

/// 打包错误
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// 下载类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Single,
    Archive,
}

impl DownloadKind {
    /// 根据块数决定下载方式
    pub fn for_chunks(chunks: &ChunkSet) -> Self {
        if chunks.is_single() {
            DownloadKind::Single
        } else {
            DownloadKind::Archive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadKind::Single => "single",
            DownloadKind::Archive => "archive",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DownloadKind::Single => SINGLE_FILE_NAME,
            DownloadKind::Archive => ARCHIVE_FILE_NAME,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DownloadKind::Single => MARKDOWN_MIME,
            DownloadKind::Archive => ZIP_MIME,
        }
    }
}

/// 可下载的文件
#[derive(Debug, Clone)]
pub struct DownloadArtifact {
    pub kind: DownloadKind,
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// 第 index 块（从 0 开始）在 ZIP 中的文件名
pub fn part_file_name(index: usize) -> String {
    format!("edited_document_{}.md", index + 1)
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// 打包分块结果
pub fn package_chunks(chunks: &ChunkSet) -> Result<DownloadArtifact, DownloadError> {
    let kind = DownloadKind::for_chunks(chunks);

    let bytes = match kind {
        DownloadKind::Single => chunks.as_slice()[0].as_bytes().to_vec(),
        DownloadKind::Archive => build_archive(chunks)?,
    };

    Ok(DownloadArtifact {
        kind,
        file_name: kind.file_name(),
        mime: kind.mime(),
        bytes,
    })
}

fn build_archive(chunks: &ChunkSet) -> Result<Vec<u8>, DownloadError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (index, chunk) in chunks.iter().enumerate() {
        writer.start_file(part_file_name(index), entry_options())?;
        writer.write_all(chunk.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunker::ChunkConfig;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_single_chunk_is_plain_markdown() {
        let text = "x".repeat(500);
        let chunks = ChunkSet::from_text(&text, &ChunkConfig::default());

        let artifact = package_chunks(&chunks).unwrap();
        assert_eq!(artifact.kind, DownloadKind::Single);
        assert_eq!(artifact.file_name, "edited_document.md");
        assert_eq!(artifact.mime, "text/markdown");
        assert_eq!(artifact.bytes, text.as_bytes());
    }

    #[test]
    fn test_multiple_chunks_are_zipped_with_numbered_entries() {
        let text = "第一部分\n\n第二部分\n\n第三部分";
        let chunks = ChunkSet::from_text(text, &ChunkConfig::new(6));
        assert!(chunks.len() > 1);

        let artifact = package_chunks(&chunks).unwrap();
        assert_eq!(artifact.kind, DownloadKind::Archive);
        assert_eq!(artifact.file_name, "edited_documents.zip");
        assert_eq!(artifact.mime, "application/zip");

        let mut archive = ZipArchive::new(Cursor::new(artifact.bytes)).unwrap();
        assert_eq!(archive.len(), chunks.len());
        for (index, expected) in chunks.iter().enumerate() {
            let mut entry = archive.by_index(index).unwrap();
            assert_eq!(entry.name(), format!("edited_document_{}.md", index + 1));
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            assert_eq!(&content, expected);
        }
    }

    #[test]
    fn test_empty_result_is_empty_archive() {
        let chunks = ChunkSet::from_text("", &ChunkConfig::default());
        let artifact = package_chunks(&chunks).unwrap();

        assert_eq!(artifact.kind, DownloadKind::Archive);
        let archive = ZipArchive::new(Cursor::new(artifact.bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
