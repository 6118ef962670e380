//! Umlmend Core Types and Definitions
//!
//! This crate provides the foundational types shared by the diagram healing
//! pipeline. It includes:
//!
//! - **Markers**: The delimiters that open and close a diagram fragment ([`markers`])
//! - **Identifiers**: Participant name grammar and coercion ([`identifier`])
//! - **Semantic**: The structured diagram model and its textual form ([`semantic`])

pub mod identifier;
pub mod markers;
pub mod semantic;
