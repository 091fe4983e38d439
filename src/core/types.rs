use std::fmt;

use serde::{Deserialize, Serialize};

/// Pseudorapidity reported for a vector lying exactly on the beam axis.
pub const LONGITUDINAL_ETA: f64 = 10e10;

/// Composite identity of one recorded collision: run, luminosity section, event number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct EventIdentity {
    pub run: u32,
    pub lumi: u32,
    pub event: u64,
}

impl EventIdentity {
    pub fn new(run: u32, lumi: u32, event: u64) -> Self {
        Self { run, lumi, event }
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.run, self.lumi, self.event)
    }
}

/// Anything that knows which collision it belongs to.
pub trait IdentifiedEvent {
    fn identity(&self) -> EventIdentity;
}

/// Raw cartesian four-momentum as stored by the upstream producer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourVector {
    pub px: f32,
    pub py: f32,
    pub pz: f32,
    pub e: f32,
}

impl FourVector {
    pub fn new(px: f32, py: f32, pz: f32, e: f32) -> Self {
        Self { px, py, pz, e }
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        f64::from(self.px).hypot(f64::from(self.py))
    }

    /// Pseudorapidity. The null vector gives 0, a purely longitudinal one gives
    /// `±LONGITUDINAL_ETA`.
    pub fn eta(&self) -> f64 {
        let pz = f64::from(self.pz);
        let p = self.pt().hypot(pz);
        let cos_theta = if p == 0.0 { 1.0 } else { pz / p };

        if cos_theta * cos_theta < 1.0 {
            -0.5 * ((1.0 - cos_theta) / (1.0 + cos_theta)).ln()
        } else if pz == 0.0 {
            0.0
        } else if pz > 0.0 {
            LONGITUDINAL_ETA
        } else {
            -LONGITUDINAL_ETA
        }
    }

    /// Azimuthal angle in [-π, π], 0 when the transverse components vanish.
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            0.0
        } else {
            f64::from(self.py).atan2(f64::from(self.px))
        }
    }

    pub fn energy(&self) -> f64 {
        f64::from(self.e)
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            pt: self.pt() as f32,
            eta: self.eta() as f32,
            phi: self.phi() as f32,
            energy: self.e,
        }
    }
}

/// Kinematic summary carried into output records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub pt: f32,
    pub eta: f32,
    pub phi: f32,
    pub energy: f32,
}
