// input-side event layout, one struct per collection entry
use serde::{Deserialize, Serialize};

use crate::core::types::{EventIdentity, FourVector, IdentifiedEvent};

/// Per-event header shared by both collections. The MC fields are only
/// populated for simulated samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventHeader {
    pub run: u32,
    pub lumi: u32,
    pub event: u64,
    pub pf_rho: f32,
    pub pthat: f32,
    pub weight: f32,
}

impl EventHeader {
    pub fn new(identity: EventIdentity) -> Self {
        Self {
            run: identity.run,
            lumi: identity.lumi,
            event: identity.event,
            ..Self::default()
        }
    }

    pub fn identity(&self) -> EventIdentity {
        EventIdentity::new(self.run, self.lumi, self.event)
    }
}

/// Particle-flow composition of one jet, as produced upstream.
/// Fractions are nominally in [0,1]; multiplicities are non-negative counts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawComposition {
    pub chf: f32,
    pub nhf: f32,
    pub nemf: f32,
    pub cemf: f32,
    pub muf: f32,
    pub hf_hf: f32,
    pub hf_phf: f32,
    pub hf_hm: i32,
    pub hf_phm: i32,
    pub chm: i32,
    pub nhm: i32,
    pub phm: i32,
    pub elm: i32,
    pub mum: i32,
    pub qg_tagger: f32,
    pub beta: f32,
    pub beta_star: f32,
    pub hof: f32,
}

/// One AK4 jet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryJet {
    pub p4: FourVector,
    pub tight_id: bool,
    pub area: f32,
    pub cor: f32,
    pub composition: RawComposition,
}

/// One AK7 jet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryJet {
    pub p4: FourVector,
    pub area: f32,
    pub cor: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Met {
    pub et: f32,
    pub sum_et: f32,
}

/// One entry of the AK4 collection.
///
/// `trigger_decisions`, `l1_prescales` and `hlt_prescales` are parallel to the
/// file-level trigger catalog. Decisions are -1 (not evaluated), 0 or 1.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryEvent {
    pub header: EventHeader,
    pub jets: Vec<PrimaryJet>,
    pub gen_jets: Vec<FourVector>,
    pub met: Met,
    pub trigger_decisions: Vec<i32>,
    pub l1_prescales: Vec<u32>,
    pub hlt_prescales: Vec<u32>,
}

impl IdentifiedEvent for PrimaryEvent {
    fn identity(&self) -> EventIdentity {
        self.header.identity()
    }
}

/// One entry of the AK7 collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryEvent {
    pub header: EventHeader,
    pub jets: Vec<SecondaryJet>,
}

impl IdentifiedEvent for SecondaryEvent {
    fn identity(&self) -> EventIdentity {
        self.header.identity()
    }
}
