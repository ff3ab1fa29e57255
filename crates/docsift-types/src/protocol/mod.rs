//! Wire types for the hosted services docsift sits in front of.
//!
//! - `responses`: text/structured completion requests and replies
//! - `vector_store`: document stores, uploaded files and file batches

pub mod responses;
pub mod vector_store;

pub use responses::{
    ContentPart, InputMessage, MessageContent, OutputContent, OutputItem, ResponseInput,
    ResponsesReply, ResponsesRequest, TextConfig, TextFormat, Tool, Usage,
};
pub use vector_store::{
    CreateFileBatchRequest, CreateVectorStoreRequest, DeletionStatus, FileBatch, FileBatchStatus,
    FileCounts, FileObject, VectorStore,
};
