//! Request handlers.

pub mod assets;
pub mod health;
pub mod upload;
pub mod voices;

pub use assets::*;
pub use health::*;
pub use upload::*;
pub use voices::*;
