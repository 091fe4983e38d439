// output-side layout: one OutputRecord per primary event
use serde::{Deserialize, Serialize};

use crate::core::composition::QuantizedComposition;
use crate::core::event::{PrimaryJet, SecondaryJet};
use crate::core::types::{EventIdentity, Kinematics};

/// Match index stored for a secondary jet when there is no primary jet to match.
pub const NO_MATCH: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimaryJetRecord {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub e: f32,
    pub tight_id: bool,
    pub area: f32,
    pub jes: f32,
}

impl PrimaryJetRecord {
    pub fn new(kin: Kinematics, jet: &PrimaryJet) -> Self {
        Self {
            pt: kin.pt,
            eta: kin.eta,
            phi: kin.phi,
            e: kin.energy,
            tight_id: jet.tight_id,
            area: jet.area,
            jes: jet.cor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SecondaryJetRecord {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub e: f32,
    pub area: f32,
    pub jes: f32,
}

impl SecondaryJetRecord {
    pub fn new(kin: Kinematics, jet: &SecondaryJet) -> Self {
        Self {
            pt: kin.pt,
            eta: kin.eta,
            phi: kin.phi,
            e: kin.energy,
            area: jet.area,
            jes: jet.cor,
        }
    }
}

/// Trigger state of one event in canonical numbering.
///
/// `decisions[i]` stays `None` unless some raw trigger mapping to canonical
/// slot `i` was evaluated in this event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub decisions: Vec<Option<bool>>,
    pub prescales: Vec<u32>,
}

impl TriggerRecord {
    pub fn with_len(len: usize) -> Self {
        Self {
            decisions: vec![None; len],
            prescales: vec![0; len],
        }
    }

    pub fn ntrg(&self) -> usize {
        self.decisions.len()
    }

    pub fn fired(&self, position: usize) -> bool {
        matches!(self.decisions.get(position), Some(Some(true)))
    }
}

/// Simulation-only quantities, absent for collision data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct McRecord {
    pub gen_jets: Vec<Kinematics>,
    pub pthat: f32,
    pub mcweight: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputRecord {
    pub identity: EventIdentity,
    pub jets: Vec<PrimaryJetRecord>,
    /// Parallel to the leading `ncomp()` entries of `jets`.
    pub composition: Vec<QuantizedComposition>,
    pub ak7_jets: Vec<SecondaryJetRecord>,
    /// Index into `jets` of the nearest primary jet, or [`NO_MATCH`].
    pub ak7_to_ak4: Vec<i32>,
    pub triggers: TriggerRecord,
    pub met: f32,
    pub sumet: f32,
    pub rho: f32,
    pub mc: Option<McRecord>,
}

impl OutputRecord {
    pub fn njet(&self) -> usize {
        self.jets.len()
    }

    pub fn njet_ak7(&self) -> usize {
        self.ak7_jets.len()
    }

    pub fn ncomp(&self) -> usize {
        self.composition.len()
    }
}
