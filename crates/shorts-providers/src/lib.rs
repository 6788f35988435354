//! Clients for the external generation services.
//!
//! The pipeline only talks to the capability traits in [`traits`]. This crate
//! also ships the HTTP implementations used in production:
//! - OpenAI chat completions for scripts and prompts
//! - ElevenLabs for text-to-speech
//! - AssemblyAI for word-level alignment
//! - Replicate for still images and image-to-video animation

pub mod assemblyai;
pub mod elevenlabs;
pub mod error;
pub mod openai;
pub mod prompts;
pub mod replicate;
pub mod traits;

pub use assemblyai::{AssemblyAiClient, AssemblyAiConfig};
pub use elevenlabs::{ElevenLabsClient, ElevenLabsConfig, ProviderVoice};
pub use error::{ProviderError, ProviderResult};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use replicate::{ModelRef, ReplicateClient, ReplicateConfig};
pub use traits::{MediaSynthesizer, PromptStyle, ScriptProvider, SpeechSynthesizer, WordAligner};
