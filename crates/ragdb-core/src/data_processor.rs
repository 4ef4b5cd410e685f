use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{EvidenceRecord, Modality};

/// Character-window chunking used for plain-text ingestion.
///
/// Windows overlap so that sentences cut at a boundary still appear whole in
/// one of the neighboring chunks.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub chunk_chars: usize,
    pub overlap_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_chars: 800, overlap_chars: 200 }
    }
}

#[derive(Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(chunking_config: ChunkingConfig) -> Self {
        Self { chunking_config }
    }

    /// Walk `data_dir` for `.txt` files and turn each into evidence records.
    /// Embedding happens later, via an `EmbeddingProducer` over `content`.
    pub fn process_directory(&self, data_dir: &Path) -> Result<Vec<EvidenceRecord>> {
        let files = self.list_txt_files(data_dir);
        if files.is_empty() {
            println!("No .txt files found under {}.", data_dir.display());
            return Ok(vec![]);
        }
        let mut all_records = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            println!("Processing file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            let content = self.read_file_content(file_path)?;
            let source = self.extract_source(file_path);
            all_records.extend(self.chunk_content(&content, &source));
        }
        println!("Processed {} files into {} records", files.len(), all_records.len());
        Ok(all_records)
    }

    pub fn process_directory_limited(&self, data_dir: &Path, limit: usize) -> Result<Vec<EvidenceRecord>> {
        let mut files = self.list_txt_files(data_dir);
        if files.is_empty() { println!("No .txt files found under {}.", data_dir.display()); return Ok(vec![]); }
        if files.len() > limit { files.truncate(limit); println!("🔢 Limited to first {} files", limit); }
        let mut all_records = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            println!("Processing file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            let content = self.read_file_content(file_path)?;
            let source = self.extract_source(file_path);
            all_records.extend(self.chunk_content(&content, &source));
        }
        println!("Processed {} files into {} records", files.len(), all_records.len());
        Ok(all_records)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
        }
    }

    fn extract_source(&self, file_path: &Path) -> String {
        file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string_lossy().to_string())
    }

    /// Split `content` into overlapping character windows and wrap each as a
    /// text evidence record carrying its chunk position in `extra`.
    pub fn chunk_content(&self, content: &str, source: &str) -> Vec<EvidenceRecord> {
        let chars: Vec<char> = content.chars().collect();
        let window = self.chunking_config.chunk_chars.max(1);
        let step = window.saturating_sub(self.chunking_config.overlap_chars).max(1);

        let mut texts = Vec::new();
        let mut start = 0usize;
        while start < chars.len() {
            let end = (start + window).min(chars.len());
            let chunk: String = chars[start..end].iter().collect();
            let chunk = chunk.trim().to_string();
            if !chunk.is_empty() { texts.push(chunk); }
            if end >= chars.len() { break; }
            start += step;
        }

        let total = texts.len();
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let mut record = EvidenceRecord::new(text, source, Modality::Text);
                record.extra.insert("chunk".to_string(), i.to_string());
                record.extra.insert("total_chunks".to_string(), total.to_string());
                record
            })
            .collect()
    }

    fn list_txt_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut txt_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path(); if path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
        }
        txt_files.sort(); txt_files
    }
}
