//! debate-council - Scripted Pro/Con Debate with an LLM Judge
//!
//! Two language-model personas argue opposite stances on a topic for a fixed
//! number of rounds, optionally cross-examine each other in a free debate,
//! and a third model call judges the result.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use debate_council::{ChatClient, ChatConfig, Debate, DebateConfig, RawDebateInput};
//!
//! let config = DebateConfig::from_raw(&RawDebateInput {
//!     topic: Some("Should AI replace teachers?".into()),
//!     rounds: Some("2".into()),
//!     free_debate_rounds: Some("1".into()),
//!     ..Default::default()
//! });
//! let generator = Arc::new(ChatClient::new(ChatConfig::default())?);
//!
//! let outcome = Debate::new(config, generator).run().await?;
//! let (pro, con, verdict) = outcome.into_triple();
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Debate (orchestrator)                │
//! │  regular rounds → free debate → adjudication         │
//! │  owns: context windows, transcripts                  │
//! └──────┬──────────────────┬──────────────────┬─────────┘
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//!   Persona (Pro)      Persona (Con)      Adjudicator
//!        └──────────────────┼──────────────────┘
//!                           ▼
//!               Arc<dyn TextGenerator>
//!              (ChatClient in production)
//! ```

pub mod adjudicator;
pub mod client;
pub mod config;
pub mod context_window;
pub mod debate;
pub mod error;
pub mod generator;
pub mod persona;
pub mod summarizer;
pub mod transcript;
pub mod types;

// Core engine
pub use debate::{Debate, DebatePhase};
pub use types::*;

// Configuration
pub use config::{DebateConfig, RawDebateInput};

// Text generation
pub use client::{ChatClient, ChatConfig};
pub use error::GenerationError;
pub use generator::TextGenerator;

// Building blocks
pub use adjudicator::Adjudicator;
pub use context_window::{ContextWindow, NO_PRIOR_STATEMENT};
pub use persona::Persona;
pub use summarizer::shrink;
pub use transcript::Transcript;
