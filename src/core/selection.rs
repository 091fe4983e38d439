// primary jet selection + leading-subset composition
use crate::core::composition::QuantizedComposition;
use crate::core::event::PrimaryJet;
use crate::core::record::PrimaryJetRecord;
use crate::core::sync::EventSynchronizer;

/// Primary jets surviving the pT cut, and the quantized composition of the leading ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedJets {
    pub jets: Vec<PrimaryJetRecord>,
    pub composition: Vec<QuantizedComposition>,
}

impl EventSynchronizer {
    /// Keep jets with `pt > min_pt` in their original order, at most `max_jets` of them.
    /// The first `composition_jets` kept jets also get their composition packed;
    /// `composition[k]` always describes `jets[k]`.
    pub fn select_primary_jets(&self, raw: &[PrimaryJet]) -> SelectedJets {
        let config = self.config();
        let mut selected = SelectedJets {
            jets: Vec::with_capacity(raw.len().min(config.max_jets)),
            composition: Vec::with_capacity(config.composition_jets),
        };

        for jet in raw {
            //failing jets are dropped, not zero-filled
            if !(jet.p4.pt() > config.min_pt) {
                continue;
            }
            if selected.jets.len() == config.max_jets {
                break;
            }

            if selected.jets.len() < config.composition_jets {
                selected.composition.push(QuantizedComposition::from_raw(&jet.composition));
            }
            selected.jets.push(PrimaryJetRecord::new(jet.p4.kinematics(), jet));
        }

        selected
    }
}
