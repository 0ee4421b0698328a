use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use anyhow::Result;
use clap::{App, load_yaml, value_t};
use crossbeam_channel::bounded;
use env_logger::Builder;
use jemallocator::Jemalloc;
use log::info;
use log::LevelFilter::*;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag::register;
use tokio::runtime::Runtime;
use timescale_api::Client;
use sigma::augment::{Enricher, Networks};
use sigma::collect::{source, Collect};
use sigma::combine::Windows;
use sigma::export::Export;

#[global_allocator]
static ALLOC: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let listen   = value_t!(args, "listen",   String)?;
    let networks = value_t!(args, "networks", String)?;
    let asn      = value_t!(args, "asn",      String)?;
    let db       = value_t!(args, "db",       String)?;
    let window   = value_t!(args, "window",   u64)?;
    let geo      = args.value_of("geo");

    let (module, level) = match args.occurrences_of("verbose") {
        0 => (Some(module_path!()), Info),
        1 => (Some(module_path!()), Debug),
        2 => (Some(module_path!()), Trace),
        _ => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    info!("initializing sigma {}", ver);

    let shutdown = Arc::new(AtomicBool::new(false));
    register(SIGTERM, shutdown.clone())?;
    register(SIGINT,  shutdown.clone())?;

    let networks = Networks::load(&networks)?;
    info!("tracking {} network ranges", networks.len());

    let enrich = Enricher::open(asn.as_str(), geo)?;
    let client = Client::new(&db)?;

    let rt = Runtime::new()?;

    let (tx, rx) = bounded(1_000);
    rt.spawn(source::listen(listen, tx));

    let export  = Export::new(client, Arc::new(enrich), rt.handle().clone());
    let windows = Windows::new(Duration::from_secs(window));

    let mut collect = Collect::new(networks, windows, export);

    let timeout = Duration::from_millis(100);

    while !shutdown.load(Ordering::Acquire) {
        if let Ok(flows) = rx.recv_timeout(timeout) {
            if flows.is_empty() {
                info!("end of stream");
                break;
            }
            collect.collect(flows);
        }
    }

    // disconnect the channel first so a sender parked on a full
    // channel returns and the runtime can join its workers
    drop(rx);
    drop(rt);

    Ok(())
}
