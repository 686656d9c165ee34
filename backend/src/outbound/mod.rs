//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories used without a database and in tests
//! - **completion**: OpenAI-compatible text completion over HTTP
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod completion;
pub mod memory;
pub mod persistence;
