//! Fixed-size byte chunking and per-file batching.
//!
//! Chunk counts come from file metadata alone; chunk bytes are read lazily
//! and sequentially, one batch at a time, so memory stays bounded by
//! `chunk_size * batch_size` regardless of the input size.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use docsift_types::SearchError;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::debug;

/// `ceil(size / chunk_size)`, `0` for an empty file or a zero chunk size.
pub fn chunk_count(size: u64, chunk_size: u64) -> u64 {
    if chunk_size == 0 {
        return 0;
    }
    size.div_ceil(chunk_size)
}

/// Validated chunking parameters for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: u64,
    batch_size: usize,
}

impl Chunker {
    pub fn new(chunk_size: u64, batch_size: usize) -> Result<Self, SearchError> {
        if chunk_size == 0 {
            return Err(SearchError::invalid_request("chunk_size must be greater than 0"));
        }
        if batch_size == 0 {
            return Err(SearchError::invalid_request("batch_size must be greater than 0"));
        }
        Ok(Self { chunk_size, batch_size })
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Sum of per-file chunk counts, from metadata only.
    pub async fn total_chunks(&self, paths: &[PathBuf]) -> Result<u64, SearchError> {
        let mut total = 0_u64;
        for path in paths {
            let metadata = tokio::fs::metadata(path)
                .await
                .map_err(|e| SearchError::io(path.display().to_string(), &e))?;
            if !metadata.is_file() {
                return Err(SearchError::Io {
                    path: path.display().to_string(),
                    message: "not a regular file".to_string(),
                });
            }
            total += chunk_count(metadata.len(), self.chunk_size);
        }
        Ok(total)
    }

    pub async fn open(&self, path: &Path) -> Result<ChunkReader, SearchError> {
        ChunkReader::open(path, self.chunk_size).await
    }
}

/// Contiguous chunks from a single file, the unit of upload and of progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    source: PathBuf,
    ordinal: u64,
    first_chunk: u64,
    chunks: Vec<Bytes>,
    whole_file: bool,
}

impl Batch {
    pub fn new(source: PathBuf, ordinal: u64, first_chunk: u64, chunks: Vec<Bytes>) -> Self {
        Self { source, ordinal, first_chunk, chunks, whole_file: false }
    }

    /// A single-chunk batch holding an entire file under its own name.
    pub fn whole_file(source: PathBuf, data: Bytes) -> Self {
        Self { source, ordinal: 0, first_chunk: 0, chunks: vec![data], whole_file: true }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Position of this batch within its file, starting at 0.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Ordinal of the first chunk within its file.
    pub fn first_chunk(&self) -> u64 {
        self.first_chunk
    }

    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.chunks.iter().map(|c| c.len() as u64).sum()
    }

    /// Upload file name for the chunk at `offset` within this batch.
    pub fn chunk_name(&self, offset: usize) -> String {
        let file_name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        if self.whole_file {
            return file_name;
        }
        let stem = self
            .source
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(file_name);
        format!("{}.part{:05}.txt", stem, self.first_chunk + offset as u64)
    }
}

/// Sequential chunk reader over one file.
#[derive(Debug)]
pub struct ChunkReader {
    path: PathBuf,
    file: File,
    chunk_size: u64,
    next_chunk: u64,
    next_batch: u64,
    exhausted: bool,
}

impl ChunkReader {
    pub async fn open(path: &Path, chunk_size: u64) -> Result<Self, SearchError> {
        if chunk_size == 0 {
            return Err(SearchError::invalid_request("chunk_size must be greater than 0"));
        }
        let file = File::open(path)
            .await
            .map_err(|e| SearchError::io(path.display().to_string(), &e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            chunk_size,
            next_chunk: 0,
            next_batch: 0,
            exhausted: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next chunk, `None` at EOF. Short reads are retried until the chunk
    /// is full or the file ends.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, SearchError> {
        if self.exhausted {
            return Ok(None);
        }
        let capacity = self.chunk_size.min(8 * 1024 * 1024) as usize;
        let mut buf = Vec::with_capacity(capacity);
        (&mut self.file)
            .take(self.chunk_size)
            .read_to_end(&mut buf)
            .await
            .map_err(|e| SearchError::io(self.path.display().to_string(), &e))?;

        if buf.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }
        if (buf.len() as u64) < self.chunk_size {
            self.exhausted = true;
        }
        self.next_chunk += 1;
        Ok(Some(Bytes::from(buf)))
    }

    /// Up to `batch_size` consecutive chunks, `None` once the file is consumed.
    pub async fn next_batch(&mut self, batch_size: usize) -> Result<Option<Batch>, SearchError> {
        let first_chunk = self.next_chunk;
        let mut chunks = Vec::with_capacity(batch_size);
        while chunks.len() < batch_size {
            match self.next_chunk().await? {
                Some(chunk) => chunks.push(chunk),
                None => break,
            }
        }
        if chunks.is_empty() {
            return Ok(None);
        }
        let batch = Batch::new(self.path.clone(), self.next_batch, first_chunk, chunks);
        self.next_batch += 1;
        debug!(
            "[Chunker] {} batch {} ({} chunks, {} bytes)",
            self.path.display(),
            batch.ordinal(),
            batch.len(),
            batch.total_bytes()
        );
        Ok(Some(batch))
    }

    /// Restart from the beginning of the file.
    pub async fn rewind(&mut self) -> Result<(), SearchError> {
        self.file
            .seek(SeekFrom::Start(0))
            .await
            .map_err(|e| SearchError::io(self.path.display().to_string(), &e))?;
        self.next_chunk = 0;
        self.next_batch = 0;
        self.exhausted = false;
        Ok(())
    }
}
