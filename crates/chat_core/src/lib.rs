//! chat_core - Core types for the branching-conversation chat system
//!
//! This crate provides the foundational types used across all chat-related crates:
//! - `conversation` - Conversation, the top-level container of branches
//! - `branch` - Branch, one strand of dialogue with per-branch settings
//! - `message` - Message, Role and reference-block composition
//! - `config` / `paths` - data directory resolution and configuration

pub mod branch;
pub mod config;
pub mod conversation;
pub mod ids;
pub mod message;
pub mod paths;

// Re-export commonly used types
pub use branch::{Branch, ForkOrigin};
pub use config::ChatConfig;
pub use conversation::Conversation;
pub use ids::generate_id;
pub use message::{compose_with_references, Message, Role};
