// per-event synchronization of the AK4 (primary) and AK7 (secondary) collections
use log::{debug, info, warn};

use crate::config::SyncConfig;
use crate::core::error::SyncError;
use crate::core::event::{PrimaryEvent, SecondaryEvent};
use crate::core::identity::IdentityIndex;
use crate::core::record::{McRecord, OutputRecord, TriggerRecord};
use crate::core::triggers::CanonicalTriggerList;
use crate::core::types::{EventIdentity, IdentifiedEvent};
use crate::storage::{EventSource, RecordSink};

/// Counters reported at the end of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncSummary {
    pub events_read: u64,
    pub events_written: u64,
    pub secondary_indexed: usize,
    pub runs_indexed: usize,
    pub canonical_triggers: usize,
}

/// Holds the two read-only lookup structures built before the event loop,
/// plus the run configuration.
#[derive(Debug, Clone, Default)]
pub struct EventSynchronizer {
    config: SyncConfig,
    index: IdentityIndex,
    triggers: CanonicalTriggerList,
}

impl EventSynchronizer {
    pub fn new(config: SyncConfig, index: IdentityIndex, triggers: CanonicalTriggerList) -> Self {
        Self {
            config,
            index,
            triggers,
        }
    }

    /// Synchronizer with empty index and trigger list.
    pub fn with_config(config: SyncConfig) -> Self {
        Self::new(config, IdentityIndex::new(), CanonicalTriggerList::default())
    }

    /// Build the identity index over `secondary` and the canonical trigger list
    /// from the catalog of `primary`. Triggers are skipped for simulation.
    pub fn prepare<P, S>(config: SyncConfig, primary: &P, secondary: &mut S) -> Result<Self, SyncError>
    where
        P: EventSource<PrimaryEvent> + ?Sized,
        S: EventSource<SecondaryEvent> + ?Sized,
    {
        config.validate()?;

        info!("mapping AK7 events to AK4 events");
        let index = IdentityIndex::build(secondary)?;

        let triggers = if config.is_mc {
            CanonicalTriggerList::default()
        } else {
            CanonicalTriggerList::from_catalog(primary.trigger_names())
        };
        info!(
            "{} raw trigger labels collapse to {} canonical triggers",
            primary.trigger_names().len(),
            triggers.len()
        );
        if triggers.len() > config.max_triggers {
            warn!(
                "{} canonical triggers exceed the output bound of {}, the rest are dropped",
                triggers.len(),
                config.max_triggers
            );
        }

        Ok(Self::new(config, index, triggers))
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn index(&self) -> &IdentityIndex {
        &self.index
    }

    pub fn triggers(&self) -> &CanonicalTriggerList {
        &self.triggers
    }

    /// Canonical names as they appear in the output, bounded like the per-event arrays.
    pub fn output_trigger_names(&self) -> &[String] {
        let names = self.triggers.names();
        &names[..names.len().min(self.config.max_triggers)]
    }

    /// Build the output record of one primary event.
    ///
    /// 1) select primary jets + pack leading composition
    /// 2) look up and read the paired secondary event
    /// 3) verify both carry the same identity
    /// 4) match leading secondary jets onto the kept primary jets
    /// 5) resolve triggers into canonical slots
    pub fn process_event<S>(&self, event: &PrimaryEvent, secondary: &mut S) -> Result<OutputRecord, SyncError>
    where
        S: EventSource<SecondaryEvent> + ?Sized,
    {
        let selected = self.select_primary_jets(&event.jets);

        let identity = event.identity();
        let position = self.index.lookup(identity)?;
        let paired = secondary.read_entry(position)?;
        verify_identity(identity, paired.identity())?;

        let (ak7_jets, ak7_to_ak4) = self.match_secondary_jets(&paired.jets, &selected.jets);

        let (triggers, mc) = if self.config.is_mc {
            (TriggerRecord::default(), Some(self.mc_record(event)))
        } else {
            let triggers = self.triggers.resolve(
                &event.trigger_decisions,
                &event.hlt_prescales,
                &event.l1_prescales,
                self.config.max_triggers,
            );
            (triggers, None)
        };

        debug!(
            "event {}: {} of {} jets kept, {} AK7 jets matched, secondary entry {}",
            identity,
            selected.jets.len(),
            event.jets.len(),
            ak7_jets.len(),
            position
        );

        Ok(OutputRecord {
            identity,
            jets: selected.jets,
            composition: selected.composition,
            ak7_jets,
            ak7_to_ak4,
            triggers,
            met: event.met.et,
            sumet: event.met.sum_et,
            rho: event.header.pf_rho,
            mc,
        })
    }

    fn mc_record(&self, event: &PrimaryEvent) -> McRecord {
        McRecord {
            gen_jets: event
                .gen_jets
                .iter()
                .take(self.config.max_jets)
                .map(|p4| p4.kinematics())
                .collect(),
            pthat: event.header.pthat,
            mcweight: event.header.weight,
        }
    }

    /// Main event loop: one record per primary entry, in entry order.
    /// Stops at the first error; the sink is neither flushed nor closed then.
    pub fn run<P, S, K>(&self, primary: &mut P, secondary: &mut S, sink: &mut K) -> Result<SyncSummary, SyncError>
    where
        P: EventSource<PrimaryEvent> + ?Sized,
        S: EventSource<SecondaryEvent> + ?Sized,
        K: RecordSink + ?Sized,
    {
        let total = primary.entry_count();
        let limit = self.config.max_events.map_or(total, |n| n.min(total));
        info!("total entries: {}, processing {}", total, limit);

        sink.define_output(self.output_trigger_names())?;

        let mut summary = SyncSummary {
            secondary_indexed: self.index.len(),
            runs_indexed: self.index.run_count(),
            canonical_triggers: self.triggers.len(),
            ..SyncSummary::default()
        };

        for entry in 0..limit {
            let event = primary.read_entry(entry)?;
            summary.events_read += 1;

            let record = self.process_event(&event, secondary)?;
            sink.write_record(&record)?;
            summary.events_written += 1;
        }

        Ok(summary)
    }
}

/// Run, lumi section and event number must agree exactly.
pub fn verify_identity(primary: EventIdentity, secondary: EventIdentity) -> Result<(), SyncError> {
    if primary != secondary {
        return Err(SyncError::IdentityMismatch { primary, secondary });
    }
    Ok(())
}

/// Full pipeline: index, canonicalize, loop, close.
pub fn synchronize<P, S, K>(
    config: SyncConfig,
    primary: &mut P,
    secondary: &mut S,
    sink: &mut K,
) -> Result<SyncSummary, SyncError>
where
    P: EventSource<PrimaryEvent> + ?Sized,
    S: EventSource<SecondaryEvent> + ?Sized,
    K: RecordSink + ?Sized,
{
    let sync = EventSynchronizer::prepare(config, &*primary, secondary)?;
    let summary = sync.run(primary, secondary, sink)?;
    sink.close()?;

    info!(
        "success: {} of {} events written",
        summary.events_written, summary.events_read
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{EventHeader, Met, PrimaryJet, SecondaryJet};
    use crate::core::types::FourVector;
    use crate::storage::{MemoryCollection, MemorySink};

    fn mk_header(run: u32, lumi: u32, event: u64) -> EventHeader {
        EventHeader {
            pf_rho: 4.5,
            pthat: 120.0,
            weight: 0.25,
            ..EventHeader::new(EventIdentity::new(run, lumi, event))
        }
    }

    fn mk_primary(event: u64, pts: &[f32], decisions: Vec<i32>) -> PrimaryEvent {
        PrimaryEvent {
            header: mk_header(1, 1, event),
            jets: pts
                .iter()
                .map(|&pt| PrimaryJet {
                    p4: FourVector::new(pt, 0.0, 0.0, pt),
                    ..PrimaryJet::default()
                })
                .collect(),
            gen_jets: vec![FourVector::new(0.0, 25.0, 0.0, 25.0)],
            met: Met { et: 12.0, sum_et: 300.0 },
            l1_prescales: vec![1; decisions.len()],
            hlt_prescales: vec![10; decisions.len()],
            trigger_decisions: decisions,
        }
    }

    fn mk_secondary(run: u32, lumi: u32, event: u64) -> SecondaryEvent {
        SecondaryEvent {
            header: mk_header(run, lumi, event),
            jets: vec![SecondaryJet {
                p4: FourVector::new(40.0, 0.0, 0.0, 40.0),
                area: 0.9,
                cor: 1.05,
            }],
        }
    }

    fn catalog() -> Vec<String> {
        vec!["HLT_Jet30_v1".to_string(), "HLT_Jet60_v1".to_string(), "HLT_Jet30_v2".to_string()]
    }

    #[test]
    fn pipeline_pairs_events_stored_in_different_order() {
        let mut primary = MemoryCollection::with_trigger_names(
            catalog(),
            vec![
                mk_primary(100, &[20.0, 10.0, 30.0], vec![1, 0, -1]),
                mk_primary(101, &[50.0], vec![-1, 1, 0]),
            ],
        );
        let mut secondary = MemoryCollection::new(vec![mk_secondary(1, 1, 101), mk_secondary(1, 1, 100)]);
        let mut sink = MemorySink::new();

        let summary = synchronize(SyncConfig::default(), &mut primary, &mut secondary, &mut sink).unwrap();

        assert_eq!(summary.events_read, 2);
        assert_eq!(summary.events_written, 2);
        assert_eq!(summary.secondary_indexed, 2);
        assert_eq!(summary.canonical_triggers, 2);
        assert!(sink.is_closed());
        assert_eq!(sink.trigger_names, vec!["HLT_Jet30".to_string(), "HLT_Jet60".to_string()]);

        let first = &sink.records[0];
        assert_eq!(first.identity, EventIdentity::new(1, 1, 100));
        assert_eq!(first.njet(), 2);
        assert_eq!(first.ncomp(), 2);
        assert_eq!(first.ak7_to_ak4, vec![0]);
        assert_eq!(first.triggers.decisions, vec![Some(true), Some(false)]);
        assert_eq!(first.triggers.prescales, vec![10, 10]);
        assert_eq!(first.met, 12.0);
        assert_eq!(first.sumet, 300.0);
        assert_eq!(first.rho, 4.5);
        assert!(first.mc.is_none());

        // HLT_Jet30_v2 overwrites the HLT_Jet30_v1 slot, which was not evaluated
        let second = &sink.records[1];
        assert_eq!(second.triggers.decisions, vec![Some(false), Some(true)]);
    }

    #[test]
    fn lookup_miss_aborts_without_closing_sink() {
        let mut primary = MemoryCollection::with_trigger_names(
            catalog(),
            vec![mk_primary(100, &[20.0], vec![]), mk_primary(102, &[20.0], vec![])],
        );
        let mut secondary = MemoryCollection::new(vec![mk_secondary(1, 1, 100)]);
        let mut sink = MemorySink::new();

        let err = synchronize(SyncConfig::default(), &mut primary, &mut secondary, &mut sink).unwrap_err();

        assert!(matches!(err, SyncError::IdentityNotFound(id) if id.event == 102));
        assert_eq!(sink.records.len(), 1);
        assert!(!sink.is_closed());
    }

    #[test]
    fn mismatched_secondary_entry_is_fatal() {
        // index claims event 100 lives at entry 0, but entry 0 holds event 999
        let mut index = IdentityIndex::new();
        index.insert(EventIdentity::new(1, 1, 100), 0).unwrap();
        let sync = EventSynchronizer::new(SyncConfig::default(), index, CanonicalTriggerList::default());
        let mut secondary = MemoryCollection::new(vec![mk_secondary(1, 1, 999)]);

        let err = sync
            .process_event(&mk_primary(100, &[20.0], vec![]), &mut secondary)
            .unwrap_err();

        match err {
            SyncError::IdentityMismatch { primary, secondary } => {
                assert_eq!(primary.event, 100);
                assert_eq!(secondary.event, 999);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn verify_identity_checks_every_component() {
        let a = EventIdentity::new(1, 2, 3);
        assert!(verify_identity(a, a).is_ok());
        assert!(verify_identity(a, EventIdentity::new(9, 2, 3)).is_err());
        assert!(verify_identity(a, EventIdentity::new(1, 9, 3)).is_err());
        assert!(verify_identity(a, EventIdentity::new(1, 2, 9)).is_err());
    }

    #[test]
    fn mc_mode_carries_generator_jets_and_skips_triggers() {
        let config = SyncConfig {
            is_mc: true,
            ..SyncConfig::default()
        };
        let mut primary = MemoryCollection::with_trigger_names(catalog(), vec![mk_primary(100, &[20.0], vec![1, 1, 1])]);
        let mut secondary = MemoryCollection::new(vec![mk_secondary(1, 1, 100)]);
        let mut sink = MemorySink::new();

        let summary = synchronize(config, &mut primary, &mut secondary, &mut sink).unwrap();

        assert_eq!(summary.canonical_triggers, 0);
        assert!(sink.trigger_names.is_empty());
        let record = &sink.records[0];
        assert_eq!(record.triggers.ntrg(), 0);
        let mc = record.mc.as_ref().unwrap();
        assert_eq!(mc.gen_jets.len(), 1);
        assert!((mc.gen_jets[0].pt - 25.0).abs() < 1e-4);
        assert_eq!(mc.pthat, 120.0);
        assert_eq!(mc.mcweight, 0.25);
    }

    #[test]
    fn max_events_limits_the_primary_pass() {
        let config = SyncConfig {
            max_events: Some(1),
            ..SyncConfig::default()
        };
        let mut primary = MemoryCollection::new(vec![mk_primary(100, &[20.0], vec![]), mk_primary(555, &[20.0], vec![])]);
        let mut secondary = MemoryCollection::new(vec![mk_secondary(1, 1, 100)]);
        let mut sink = MemorySink::new();

        // event 555 has no partner but is never reached
        let summary = synchronize(config, &mut primary, &mut secondary, &mut sink).unwrap();

        assert_eq!(summary.events_written, 1);
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn output_trigger_names_respect_bound() {
        let config = SyncConfig {
            max_triggers: 1,
            ..SyncConfig::default()
        };
        let primary = MemoryCollection::with_trigger_names(catalog(), Vec::<PrimaryEvent>::new());
        let mut secondary: MemoryCollection<SecondaryEvent> = MemoryCollection::new(Vec::new());

        let sync = EventSynchronizer::prepare(config, &primary, &mut secondary).unwrap();

        assert_eq!(sync.triggers().len(), 2);
        assert_eq!(sync.output_trigger_names(), ["HLT_Jet30".to_string()]);
    }
}
