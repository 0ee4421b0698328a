use std::net::IpAddr;
use std::path::Path;
use anyhow::Result;
use maxminddb::{geoip2, Reader};

pub trait Enrich {
    fn asn(&self, addr: IpAddr) -> Option<u32>;
    fn country(&self, addr: IpAddr) -> Option<String>;
    fn countries(&self) -> bool;
}

pub struct Enricher {
    asn: Reader<Vec<u8>>,
    geo: Option<Reader<Vec<u8>>>,
}

impl Enricher {
    pub fn open<P: AsRef<Path>>(asn: P, geo: Option<P>) -> Result<Self> {
        let asn = Reader::open_readfile(asn)?;
        let geo = geo.map(Reader::open_readfile).transpose()?;
        Ok(Self {
            asn: asn,
            geo: geo,
        })
    }
}

impl Enrich for Enricher {
    fn asn(&self, addr: IpAddr) -> Option<u32> {
        let asn: geoip2::Asn = self.asn.lookup(addr).ok()?;
        asn.autonomous_system_number
    }

    fn country(&self, addr: IpAddr) -> Option<String> {
        let geo = self.geo.as_ref()?;
        let country: geoip2::Country = geo.lookup(addr).ok()?;
        Some(country.country?.iso_code?.to_owned())
    }

    fn countries(&self) -> bool {
        self.geo.is_some()
    }
}
