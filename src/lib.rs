//! Synchronizes two differently ordered jet collections (AK4 and AK7) recorded
//! from the same collisions into one compact record per event.
//!
//! The secondary (AK7) collection is indexed by event identity, the trigger
//! catalog is reduced to versionless canonical names, and every primary (AK4)
//! event is then paired with its secondary counterpart, its jets are selected
//! and quantized, and the leading secondary jets are matched onto them by ΔR.

pub mod config;
pub mod core;
pub mod storage;

pub use crate::config::SyncConfig;
pub use crate::core::codec::{decode_count, decode_fraction, encode_count, encode_fraction};
pub use crate::core::composition::{DecodedComposition, QuantizedComposition};
pub use crate::core::error::SyncError;
pub use crate::core::event::{EventHeader, Met, PrimaryEvent, PrimaryJet, RawComposition, SecondaryEvent, SecondaryJet};
pub use crate::core::identity::IdentityIndex;
pub use crate::core::matching::{delta_phi, delta_r, nearest};
pub use crate::core::record::{
    McRecord, NO_MATCH, OutputRecord, PrimaryJetRecord, SecondaryJetRecord, TriggerRecord,
};
pub use crate::core::selection::SelectedJets;
pub use crate::core::sync::{EventSynchronizer, SyncSummary, synchronize, verify_identity};
pub use crate::core::triggers::{CanonicalTriggerList, NOT_EVALUATED, strip_version};
pub use crate::core::types::{EventIdentity, FourVector, IdentifiedEvent, Kinematics};
