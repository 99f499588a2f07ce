//! Core library: retrieval-augmented Nice classification of product descriptions.

pub mod classifier;
pub mod config;
pub mod decision;
pub mod embeddings;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod retriever;
pub mod vectorstore;

pub use classifier::{Classification, Classifier};
pub use error::ClassifyError;
pub use retriever::{CandidateSet, RetrievalOptions};
