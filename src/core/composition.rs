use serde::{Deserialize, Serialize};

use crate::core::codec::{decode_count, decode_fraction, encode_count, encode_fraction};
use crate::core::event::RawComposition;

/// Byte-packed composition of one leading jet.
///
/// Fractions go through [`encode_fraction`], multiplicities through [`encode_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QuantizedComposition {
    pub chf: u8,
    pub nhf: u8,
    pub phf: u8,
    pub elf: u8,
    pub muf: u8,
    pub hf_hf: u8,
    pub hf_phf: u8,
    pub hf_hm: u8,
    pub hf_phm: u8,
    pub chm: u8,
    pub nhm: u8,
    pub phm: u8,
    pub elm: u8,
    pub mum: u8,
    pub beta: u8,
    pub bstar: u8,
    pub hof: u8,
    pub qgl: u8,
}

impl QuantizedComposition {
    /// Number of attributes packed per jet.
    pub const FIELD_COUNT: usize = 18;

    pub fn from_raw(raw: &RawComposition) -> Self {
        Self {
            chf: encode_fraction(raw.chf),
            nhf: encode_fraction(raw.nhf),
            phf: encode_fraction(raw.nemf),
            elf: encode_fraction(raw.cemf),
            muf: encode_fraction(raw.muf),
            hf_hf: encode_fraction(raw.hf_hf),
            hf_phf: encode_fraction(raw.hf_phf),
            hf_hm: encode_count(raw.hf_hm),
            hf_phm: encode_count(raw.hf_phm),
            chm: encode_count(raw.chm),
            nhm: encode_count(raw.nhm),
            phm: encode_count(raw.phm),
            elm: encode_count(raw.elm),
            mum: encode_count(raw.mum),
            beta: encode_fraction(raw.beta),
            bstar: encode_fraction(raw.beta_star),
            hof: encode_fraction(raw.hof),
            qgl: encode_fraction(raw.qg_tagger),
        }
    }

    pub fn decode(&self) -> DecodedComposition {
        DecodedComposition {
            chf: decode_fraction(self.chf),
            nhf: decode_fraction(self.nhf),
            phf: decode_fraction(self.phf),
            elf: decode_fraction(self.elf),
            muf: decode_fraction(self.muf),
            hf_hf: decode_fraction(self.hf_hf),
            hf_phf: decode_fraction(self.hf_phf),
            hf_hm: decode_count(self.hf_hm),
            hf_phm: decode_count(self.hf_phm),
            chm: decode_count(self.chm),
            nhm: decode_count(self.nhm),
            phm: decode_count(self.phm),
            elm: decode_count(self.elm),
            mum: decode_count(self.mum),
            beta: decode_fraction(self.beta),
            bstar: decode_fraction(self.bstar),
            hof: decode_fraction(self.hof),
            qgl: decode_fraction(self.qgl),
        }
    }
}

/// Read-side view of a [`QuantizedComposition`]. Values are only as precise as the codec allows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecodedComposition {
    pub chf: f32,
    pub nhf: f32,
    pub phf: f32,
    pub elf: f32,
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
    pub beta: f32,
    pub bstar: f32,
    pub hof: f32,
    pub qgl: f32,
}
