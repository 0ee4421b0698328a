use log::trace;
use crate::augment::Networks;
use crate::combine::{Table, Windows};
use crate::export::Export;
use super::FlowRecord;

pub struct Collect {
    networks: Networks,
    table:    Table,
    windows:  Windows,
    export:   Export,
}

impl Collect {
    pub fn new(networks: Networks, windows: Windows, export: Export) -> Self {
        Self {
            networks: networks,
            table:    Table::new(),
            windows:  windows,
            export:   export,
        }
    }

    pub fn collect(&mut self, flows: Vec<FlowRecord>) {
        for flow in flows {
            self.record(flow);
        }
    }

    fn record(&mut self, flow: FlowRecord) {
        if !self.table.record(&flow, &self.networks) {
            trace!("discarding {} -> {}", flow.src, flow.dst);
            return;
        }

        // record first so the flow crossing the boundary is counted
        // in the window it closes
        if let Some(start) = self.windows.tick(flow.end) {
            let table = self.table.detach();
            self.export.export(table, start);
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}
