use std::collections::HashSet;
use std::net::IpAddr;
use crate::augment::Enrich;
use crate::collect::{Directed, TCP};

#[derive(Clone, Debug)]
pub struct Stats {
    pub addr:         IpAddr,
    pub flows:        u64,
    pub packets:      u64,
    pub bytes:        u64,
    pub dest_private: HashSet<IpAddr>,
    pub dest_public:  HashSet<IpAddr>,
    pub dest_ports:   HashSet<u16>,
    pub tcp_packets:  u64,
    pub tcp_bytes:    u64,
    pub fwd_packets:  u64,
    pub fwd_bytes:    u64,
    pub duration:     f64,
    pub ttl:          u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Datapoint {
    pub addr:              IpAddr,
    pub flows:             u64,
    pub packets:           u64,
    pub bytes:             u64,
    pub dest_private:      u64,
    pub dest_public:       u64,
    pub dest_asns:         u64,
    pub dest_countries:    i64,
    pub dest_ports:        u64,
    pub tcp_ratio_packets: f64,
    pub tcp_ratio_bytes:   f64,
    pub dir_ratio_packets: f64,
    pub dir_ratio_bytes:   f64,
    pub avg_duration:      f64,
    pub avg_ttl:           f64,
}

impl Stats {
    pub fn new(addr: IpAddr) -> Self {
        Self {
            addr:         addr,
            flows:        0,
            packets:      0,
            bytes:        0,
            dest_private: HashSet::new(),
            dest_public:  HashSet::new(),
            dest_ports:   HashSet::new(),
            tcp_packets:  0,
            tcp_bytes:    0,
            fwd_packets:  0,
            fwd_bytes:    0,
            duration:     0.0,
            ttl:          0,
        }
    }

    pub fn record(&mut self, d: Directed) {
        let packets = d.packets as u64 + d.packets_rev as u64;
        let bytes   = d.bytes + d.bytes_rev;

        self.flows   += 1;
        self.packets += packets;
        self.bytes   += bytes;

        if private(d.peer.addr) {
            self.dest_private.insert(d.peer.addr);
        } else {
            self.dest_public.insert(d.peer.addr);
        }
        self.dest_ports.insert(d.peer.port);

        if d.protocol == TCP {
            self.tcp_packets += packets;
            self.tcp_bytes   += bytes;
        }

        self.fwd_packets += d.packets as u64;
        self.fwd_bytes   += d.bytes;

        self.duration += d.end - d.start;
        self.ttl      += d.ttl as u64;
    }

    pub fn finalize(self, enrich: &dyn Enrich) -> Option<Datapoint> {
        if self.flows == 0 {
            return None;
        }

        let tcp_ratio_packets = self.tcp_packets as f64 / self.packets as f64;
        let tcp_ratio_bytes   = self.tcp_bytes   as f64 / self.bytes   as f64;
        let dir_ratio_packets = self.fwd_packets as f64 / self.packets as f64;
        let dir_ratio_bytes   = self.fwd_bytes   as f64 / self.bytes   as f64;

        // only ever a destination this window, never an originator
        if dir_ratio_packets == 0.0 {
            return None;
        }

        let asns = self.dest_public.iter().filter_map(|addr| {
            enrich.asn(*addr)
        }).collect::<HashSet<_>>();

        let countries = if enrich.countries() {
            self.dest_public.iter().filter_map(|addr| {
                enrich.country(*addr)
            }).collect::<HashSet<_>>().len() as i64
        } else {
            -1
        };

        Some(Datapoint {
            addr:              self.addr,
            flows:             self.flows,
            packets:           self.packets,
            bytes:             self.bytes,
            dest_private:      self.dest_private.len() as u64,
            dest_public:       self.dest_public.len()  as u64,
            dest_asns:         asns.len() as u64,
            dest_countries:    countries,
            dest_ports:        self.dest_ports.len() as u64,
            tcp_ratio_packets: tcp_ratio_packets,
            tcp_ratio_bytes:   tcp_ratio_bytes,
            dir_ratio_packets: dir_ratio_packets,
            dir_ratio_bytes:   dir_ratio_bytes,
            avg_duration:      self.duration / self.flows as f64,
            avg_ttl:           self.ttl as f64 / self.flows as f64,
        })
    }
}

pub fn private(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => ip.is_private() || ip.is_loopback() || ip.is_link_local(),
        IpAddr::V6(ip) => {
            let seg = ip.segments()[0];
            ip.is_loopback() || seg & 0xfe00 == 0xfc00 || seg & 0xffc0 == 0xfe80
        }
    }
}
