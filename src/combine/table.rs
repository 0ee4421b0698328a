use std::collections::HashMap;
use std::mem;
use std::net::IpAddr;
use crate::augment::{Enrich, Networks};
use crate::collect::FlowRecord;
use super::{Datapoint, Stats};

#[derive(Debug, Default)]
pub struct Table {
    stats: HashMap<IpAddr, Stats>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            stats: HashMap::new(),
        }
    }

    pub fn record(&mut self, flow: &FlowRecord, networks: &Networks) -> bool {
        let src = networks.contains(flow.src.addr);
        let dst = networks.contains(flow.dst.addr);

        if src {
            let update = flow.outbound();
            self.stats(update.entity).record(update);
        }

        if dst {
            let update = flow.inbound();
            self.stats(update.entity).record(update);
        }

        src || dst
    }

    pub fn detach(&mut self) -> Table {
        mem::take(self)
    }

    pub fn finalize(self, enrich: &dyn Enrich) -> Vec<Datapoint> {
        self.stats.into_iter().filter_map(|(_, stats)| {
            stats.finalize(enrich)
        }).collect()
    }

    pub fn get(&self, addr: IpAddr) -> Option<&Stats> {
        self.stats.get(&addr)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    fn stats(&mut self, addr: IpAddr) -> &mut Stats {
        self.stats.entry(addr).or_insert_with(|| Stats::new(addr))
    }
}
