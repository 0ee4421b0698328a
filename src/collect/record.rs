use std::fmt;
use std::net::IpAddr;
use serde::{Serialize, Deserialize};

pub const TCP: u8 = 6;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Addr {
    pub addr: IpAddr,
    pub port: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowRecord {
    pub src:         Addr,
    pub dst:         Addr,
    pub protocol:    u8,
    pub packets:     u32,
    pub packets_rev: u32,
    pub bytes:       u64,
    pub bytes_rev:   u64,
    pub start:       f64,
    pub end:         f64,
    pub ttl:         u8,
}

#[derive(Copy, Clone, Debug)]
pub struct Directed {
    pub entity:      IpAddr,
    pub peer:        Addr,
    pub packets:     u32,
    pub packets_rev: u32,
    pub bytes:       u64,
    pub bytes_rev:   u64,
    pub protocol:    u8,
    pub start:       f64,
    pub end:         f64,
    pub ttl:         u8,
}

impl FlowRecord {
    pub fn outbound(&self) -> Directed {
        Directed {
            entity:      self.src.addr,
            peer:        self.dst,
            packets:     self.packets,
            packets_rev: self.packets_rev,
            bytes:       self.bytes,
            bytes_rev:   self.bytes_rev,
            protocol:    self.protocol,
            start:       self.start,
            end:         self.end,
            ttl:         self.ttl,
        }
    }

    pub fn inbound(&self) -> Directed {
        Directed {
            entity:      self.dst.addr,
            peer:        self.src,
            packets:     self.packets_rev,
            packets_rev: self.packets,
            bytes:       self.bytes_rev,
            bytes_rev:   self.bytes,
            protocol:    self.protocol,
            start:       self.start,
            end:         self.end,
            ttl:         self.ttl,
        }
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}
