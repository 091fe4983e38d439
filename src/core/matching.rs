// ΔR nearest-neighbour matching of secondary jets onto kept primary jets
use std::f64::consts::PI;

use crate::core::event::SecondaryJet;
use crate::core::record::{NO_MATCH, PrimaryJetRecord, SecondaryJetRecord};
use crate::core::sync::EventSynchronizer;

/// Azimuthal difference wrapped into [-π, π).
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    (phi1 - phi2 + PI).rem_euclid(2.0 * PI) - PI
}

pub fn delta_r(eta1: f64, phi1: f64, eta2: f64, phi2: f64) -> f64 {
    (eta1 - eta2).hypot(delta_phi(phi1, phi2))
}

/// Index of the candidate closest in ΔR to (`eta`, `phi`).
///
/// Scans in ascending order and only a strictly smaller distance replaces the
/// current best, so the first of several equidistant candidates wins.
pub fn nearest(eta: f64, phi: f64, candidates: &[PrimaryJetRecord]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, c) in candidates.iter().enumerate() {
        let dr = delta_r(eta, phi, f64::from(c.eta), f64::from(c.phi));
        let closer = match best {
            Some((_, best_dr)) => dr < best_dr,
            None => !dr.is_nan(),
        };
        if closer {
            best = Some((i, dr));
        }
    }

    best.map(|(i, _)| i)
}

impl EventSynchronizer {
    /// Take the leading `secondary_jets` raw secondary jets (no pT cut) and
    /// match each one to its nearest kept primary jet.
    ///
    /// Returns the secondary records and, parallel to them, the primary index
    /// of each match or `NO_MATCH` when `primary` is empty.
    pub fn match_secondary_jets(
        &self,
        raw: &[SecondaryJet],
        primary: &[PrimaryJetRecord],
    ) -> (Vec<SecondaryJetRecord>, Vec<i32>) {
        let config = self.config();
        let take = raw.len().min(config.secondary_jets).min(config.max_jets);

        let mut records = Vec::with_capacity(take);
        let mut matches = Vec::with_capacity(take);

        for jet in &raw[..take] {
            records.push(SecondaryJetRecord::new(jet.p4.kinematics(), jet));

            let matched = nearest(jet.p4.eta(), jet.p4.phi(), primary)
                .and_then(|i| i32::try_from(i).ok())
                .unwrap_or(NO_MATCH);
            matches.push(matched);
        }

        (records, matches)
    }
}
