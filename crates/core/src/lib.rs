pub mod caster;
pub mod error;
pub mod media;
pub mod pacing;
pub mod protocol;
pub mod transport;

pub use caster::{CastStats, Caster, CasterConfig};
pub use error::{CastError, Result};
pub use media::{FrameEncoder, FrameSource, RawFrame};
pub use pacing::PacingPolicy;
pub use protocol::{Fragmenter, FrameSequence, ProtocolVariant};
