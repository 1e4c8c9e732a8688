//! Selection, query and label layout engine for catalog label sheets.
//!
//! Provides the geometry model, record store with persistent selection,
//! filter/sort/paginate pipeline, label content transform, page assembly,
//! and a named template registry backed by a key-value store.

pub mod config;
pub mod error;
pub mod geometry;
pub mod label;
pub mod layout;
pub mod persistence;
pub mod query;
pub mod record;
pub mod session;
pub mod template;

pub use error::LabelError;
pub use session::Session;
