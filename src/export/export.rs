use std::sync::Arc;
use log::{debug, warn};
use tokio::runtime::Handle;
use timescale_api::Client;
use crate::augment::Enrich;
use crate::combine::Table;
use super::batch;

pub struct Export {
    client: Arc<Client>,
    enrich: Arc<dyn Enrich + Send + Sync>,
    handle: Handle,
}

impl Export {
    pub fn new(client: Client, enrich: Arc<dyn Enrich + Send + Sync>, handle: Handle) -> Self {
        Self {
            client: Arc::new(client),
            enrich: enrich,
            handle: handle,
        }
    }

    pub fn export(&self, table: Table, start: f64) {
        debug!("exporting window {} with {} entities", start, table.len());

        let client = self.client.clone();
        let enrich = self.enrich.clone();
        self.handle.spawn(flush(client, enrich, table, start));
    }
}

async fn flush(client: Arc<Client>, enrich: Arc<dyn Enrich + Send + Sync>, table: Table, start: f64) {
    match batch::flush(client, enrich, table, start).await {
        Ok(()) => (),
        Err(e) => warn!("window {} export failed: {}", start, e),
    }
}
