use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use anyhow::Result;
use crate::augment::{Enrich, Networks};
use crate::collect::{Addr, FlowRecord, TCP};
use super::{Table, Windows};
use super::stats::private;

const UDP: u8 = 17;

#[derive(Default)]
struct Fixed {
    asns:      HashMap<IpAddr, u32>,
    countries: HashMap<IpAddr, String>,
    enabled:   bool,
}

impl Enrich for Fixed {
    fn asn(&self, addr: IpAddr) -> Option<u32> {
        self.asns.get(&addr).copied()
    }

    fn country(&self, addr: IpAddr) -> Option<String> {
        self.countries.get(&addr).cloned()
    }

    fn countries(&self) -> bool {
        self.enabled
    }
}

fn addr(s: &str) -> Addr {
    let sa = s.parse::<SocketAddr>().unwrap();
    Addr { addr: sa.ip(), port: sa.port() }
}

fn flow(src: &str, dst: &str, protocol: u8, packets: (u32, u32), bytes: (u64, u64), start: f64, end: f64) -> FlowRecord {
    FlowRecord {
        src:         addr(src),
        dst:         addr(dst),
        protocol:    protocol,
        packets:     packets.0,
        packets_rev: packets.1,
        bytes:       bytes.0,
        bytes_rev:   bytes.1,
        start:       start,
        end:         end,
        ttl:         64,
    }
}

#[test]
fn aggregates_flows_per_entity() -> Result<()> {
    let networks  = Networks::parse("10.0.0.0/8")?;
    let mut table = Table::new();

    table.record(&flow("10.1.1.1:40001", "93.184.216.34:443", TCP, (6, 4), (600, 400), 1000.0, 1002.0), &networks);
    table.record(&flow("10.1.1.1:40002", "198.51.100.7:8443", TCP, (3, 7), (300, 700), 1000.0, 1004.0), &networks);
    table.record(&flow("10.1.1.1:40003", "93.184.216.34:443", TCP, (5, 5), (500, 500), 1000.0, 1006.0), &networks);

    let entity = "10.1.1.1".parse::<IpAddr>()?;
    let stats  = table.get(entity).unwrap();
    assert_eq!(stats.flows,   3);
    assert_eq!(stats.packets, 30);
    assert_eq!(stats.bytes,   3000);

    let mut asns = HashMap::new();
    asns.insert("93.184.216.34".parse()?, 15133);
    asns.insert("198.51.100.7".parse()?,  64496);
    let enrich = Fixed { asns: asns, ..Default::default() };

    let points = table.finalize(&enrich);
    assert_eq!(points.len(), 1);

    let point = &points[0];
    assert_eq!(point.addr,              entity);
    assert_eq!(point.flows,             3);
    assert_eq!(point.packets,           30);
    assert_eq!(point.bytes,             3000);
    assert_eq!(point.dest_private,      0);
    assert_eq!(point.dest_public,       2);
    assert_eq!(point.dest_asns,         2);
    assert_eq!(point.dest_countries,    -1);
    assert_eq!(point.dest_ports,        2);
    assert_eq!(point.tcp_ratio_packets, 1.0);
    assert_eq!(point.tcp_ratio_bytes,   1.0);
    assert!((point.dir_ratio_packets - 14.0 / 30.0).abs() < 1e-9);
    assert!((point.dir_ratio_bytes - 1400.0 / 3000.0).abs() < 1e-9);
    assert_eq!(point.avg_duration, 4.0);
    assert_eq!(point.avg_ttl,      64.0);

    Ok(())
}

#[test]
fn ratios_stay_within_unit_interval() -> Result<()> {
    let networks  = Networks::parse("10.0.0.0/8")?;
    let mut table = Table::new();

    table.record(&flow("10.1.1.1:40001", "8.8.8.8:53",  UDP, (4, 1), (400, 100), 0.0, 1.0), &networks);
    table.record(&flow("10.1.1.1:40002", "9.9.9.9:443", TCP, (2, 3), (200, 300), 0.0, 2.0), &networks);

    let points = table.finalize(&Fixed::default());
    assert_eq!(points.len(), 1);

    let point = &points[0];
    assert_eq!(point.tcp_ratio_packets, 0.5);
    assert_eq!(point.tcp_ratio_bytes,   0.5);
    assert_eq!(point.dir_ratio_packets, 0.6);
    assert_eq!(point.dir_ratio_bytes,   0.6);

    let ratios = [point.tcp_ratio_packets, point.tcp_ratio_bytes,
                  point.dir_ratio_packets, point.dir_ratio_bytes];
    for ratio in &ratios {
        assert!(*ratio >= 0.0 && *ratio <= 1.0);
    }

    Ok(())
}

#[test]
fn silent_destinations_are_dropped() -> Result<()> {
    let networks  = Networks::parse("10.0.0.0/8")?;
    let mut table = Table::new();

    // 10.1.1.1 never sends a packet back, 10.1.1.2 responds
    table.record(&flow("8.8.8.8:53", "10.1.1.1:40001", UDP, (10, 0), (1000, 0),   0.0, 1.0), &networks);
    table.record(&flow("8.8.8.8:53", "10.1.1.2:40002", UDP, (10, 2), (1000, 200), 0.0, 1.0), &networks);

    assert_eq!(table.len(), 2);
    assert!(table.get("8.8.8.8".parse()?).is_none());

    let points = table.finalize(&Fixed::default());
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].addr, "10.1.1.2".parse::<IpAddr>()?);

    Ok(())
}

#[test]
fn enriches_public_destinations() -> Result<()> {
    let networks  = Networks::parse("10.0.0.0/8")?;
    let mut table = Table::new();

    table.record(&flow("10.1.1.1:40001", "192.168.1.5:445", TCP, (1, 1), (100, 100), 0.0, 1.0), &networks);
    table.record(&flow("10.1.1.1:40002", "8.8.8.8:53",      UDP, (1, 1), (100, 100), 0.0, 1.0), &networks);
    table.record(&flow("10.1.1.1:40003", "9.9.9.9:53",      UDP, (1, 1), (100, 100), 0.0, 1.0), &networks);

    let stats = table.get("10.1.1.1".parse()?).unwrap().clone();

    let blank = stats.clone().finalize(&Fixed::default()).unwrap();
    assert_eq!(blank.dest_private,   1);
    assert_eq!(blank.dest_public,    2);
    assert_eq!(blank.dest_asns,      0);
    assert_eq!(blank.dest_countries, -1);

    let mut asns = HashMap::new();
    asns.insert("8.8.8.8".parse()?, 15169);
    let mut countries = HashMap::new();
    countries.insert("8.8.8.8".parse()?, "US".to_owned());
    countries.insert("9.9.9.9".parse()?, "CH".to_owned());
    let enrich = Fixed { asns: asns, countries: countries, enabled: true };

    let point = stats.finalize(&enrich).unwrap();
    assert_eq!(point.dest_asns,      1);
    assert_eq!(point.dest_countries, 2);

    Ok(())
}

#[test]
fn classifies_address_scope() {
    let private_addrs = ["10.0.0.1", "172.16.0.1", "192.168.1.5", "127.0.0.1",
                         "169.254.1.1", "::1", "fc00::1", "fdab::1", "fe80::1"];
    let public_addrs  = ["8.8.8.8", "93.184.216.34", "172.32.0.1",
                         "2001:4860:4860::8888"];

    for addr in &private_addrs {
        assert!(private(addr.parse().unwrap()), "{} should be private", addr);
    }

    for addr in &public_addrs {
        assert!(!private(addr.parse().unwrap()), "{} should be public", addr);
    }
}

#[test]
fn routes_records_by_tracked_side() -> Result<()> {
    let networks  = Networks::parse("10.0.0.0/8\n192.168.0.0/16")?;
    let mut table = Table::new();

    let both = table.record(&flow("10.1.1.1:40001", "192.168.1.1:443", TCP, (7, 2), (700, 200), 0.0, 1.0), &networks);
    assert!(both);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("10.1.1.1".parse()?).unwrap().fwd_packets,    7);
    assert_eq!(table.get("192.168.1.1".parse()?).unwrap().fwd_packets, 2);
    assert_eq!(table.get("192.168.1.1".parse()?).unwrap().fwd_bytes,   200);

    let one = table.record(&flow("10.1.1.1:40002", "8.8.8.8:53", UDP, (1, 1), (100, 100), 0.0, 1.0), &networks);
    assert!(one);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("10.1.1.1".parse()?).unwrap().flows, 2);

    let neither = table.record(&flow("8.8.8.8:53", "9.9.9.9:53", UDP, (1, 1), (100, 100), 0.0, 1.0), &networks);
    assert!(!neither);
    assert_eq!(table.len(), 2);

    Ok(())
}

#[test]
fn detach_hands_off_the_table() -> Result<()> {
    let networks  = Networks::parse("10.0.0.0/8")?;
    let mut table = Table::new();

    table.record(&flow("10.1.1.1:40001", "8.8.8.8:53", UDP, (1, 1), (100, 100), 0.0, 1.0), &networks);

    let detached = table.detach();
    assert_eq!(detached.len(), 1);
    assert!(table.is_empty());

    table.record(&flow("10.1.1.2:40002", "8.8.8.8:53", UDP, (1, 1), (100, 100), 0.0, 1.0), &networks);
    assert_eq!(table.len(), 1);
    assert!(table.get("10.1.1.1".parse()?).is_none());

    Ok(())
}

#[test]
fn closes_windows_on_the_grid() {
    let mut windows = Windows::new(Duration::from_secs(600));

    assert_eq!(windows.tick(1000.0), None);
    assert_eq!(windows.start(),      Some(1000.0));

    assert_eq!(windows.tick(1599.9), None);
    assert_eq!(windows.tick(1600.0), Some(1000.0));
    assert_eq!(windows.tick(2200.0), Some(1600.0));
    assert_eq!(windows.tick(2300.0), None);
    assert_eq!(windows.start(),      Some(2200.0));
}

#[test]
fn catches_up_one_window_at_a_time() {
    let mut windows = Windows::new(Duration::from_secs(600));

    assert_eq!(windows.tick(0.0),    None);
    assert_eq!(windows.tick(1800.0), Some(0.0));
    assert_eq!(windows.tick(1800.0), Some(600.0));
    assert_eq!(windows.tick(1800.0), Some(1200.0));
    assert_eq!(windows.tick(1800.0), None);
}

#[test]
fn closures_track_elapsed_time() {
    let mut windows = Windows::new(Duration::from_secs(10));
    let mut closed  = Vec::new();

    let mut time = 5.0;
    while time <= 125.0 {
        if let Some(start) = windows.tick(time) {
            closed.push(start);
        }
        time += 3.0;
    }

    let expect = (0..12).map(|n| 5.0 + 10.0 * n as f64).collect::<Vec<_>>();
    assert_eq!(closed, expect);
}
