//! Voice catalog offered to clients.

use schemars::JsonSchema;
use serde::Serialize;

/// A selectable narration voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Voice {
    pub name: &'static str,
    pub id: &'static str,
}

/// Voices listed by the API. Synthesis still resolves the name against the
/// speech provider, so this list only drives the client's picker.
pub const VOICE_CATALOG: &[Voice] = &[
    Voice {
        name: "Sarah",
        id: "EXAVITQu4vr4xnSDxMaL",
    },
    Voice {
        name: "Roger",
        id: "CwhRBWXzGAHq8TQ4Fs17",
    },
    Voice {
        name: "Charlie",
        id: "IKne3meq5aSn9XLyUdCD",
    },
];
