use std::fs;
use std::net::IpAddr;
use std::path::Path;
use anyhow::{Context, Result};
use ipnetwork::IpNetwork;

pub struct Networks {
    ranges: Vec<IpNetwork>,
}

impl Networks {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).with_context(|| {
            format!("reading networks file {}", path.display())
        })?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self> {
        let mut ranges = Vec::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let range = line.parse::<IpNetwork>().with_context(|| {
                format!("invalid network range '{}'", line)
            })?;
            ranges.push(range);
        }
        Ok(Self { ranges: ranges })
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        self.ranges.iter().any(|range| range.contains(addr))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }
}
