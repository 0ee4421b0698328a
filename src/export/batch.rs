use std::sync::Arc;
use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, info};
use timescale_api::{Catalog, Client, Entity, Point};
use crate::augment::Enrich;
use crate::combine::{Datapoint, Table};

pub async fn flush(client: Arc<Client>, enrich: Arc<dyn Enrich + Send + Sync>, table: Table, start: f64) -> Result<()> {
    let points = table.finalize(&*enrich);
    if points.is_empty() {
        debug!("window {} had no active entities", start);
        return Ok(());
    }

    let time = timestamp(start)?;

    let mut conn    = client.connect().await?;
    let mut catalog = client.catalog(&mut conn).await?;

    let (entities, points) = rows(&mut catalog, time, points);

    client.insert_entities(&mut conn, &entities).await?;
    client.insert_points(&mut conn, &points).await?;

    info!("window {}: wrote {} datapoints, {} new entities", start, points.len(), entities.len());

    Ok(())
}

pub fn rows(catalog: &mut Catalog, time: DateTime<Utc>, points: Vec<Datapoint>) -> (Vec<Entity>, Vec<Point>) {
    let mut entities = Vec::new();

    let points = points.into_iter().map(|d| {
        let addr = d.addr.to_string();
        let id   = match catalog.get(&addr) {
            Some(id) => id,
            None     => {
                let id = catalog.assign(&addr);
                entities.push(Entity { id: id, addr: addr });
                id
            }
        };
        point(time, id, d)
    }).collect();

    (entities, points)
}

fn point(time: DateTime<Utc>, entity: i64, d: Datapoint) -> Point {
    Point {
        time:              time,
        entity:            entity,
        flows:             d.flows   as i64,
        packets:           d.packets as i64,
        bytes:             d.bytes   as i64,
        dest_private:      d.dest_private as i64,
        dest_public:       d.dest_public  as i64,
        dest_asns:         d.dest_asns    as i64,
        dest_countries:    d.dest_countries,
        dest_ports:        d.dest_ports   as i64,
        tcp_ratio_packets: d.tcp_ratio_packets,
        tcp_ratio_bytes:   d.tcp_ratio_bytes,
        dir_ratio_packets: d.dir_ratio_packets,
        dir_ratio_bytes:   d.dir_ratio_bytes,
        avg_duration:      d.avg_duration,
        avg_ttl:           d.avg_ttl,
    }
}

fn timestamp(start: f64) -> Result<DateTime<Utc>> {
    let secs  = start.trunc() as i64;
    let nanos = (start.fract() * 1e9) as u32;
    Utc.timestamp_opt(secs, nanos).single().ok_or_else(|| {
        anyhow!("invalid window start {}", start)
    })
}
