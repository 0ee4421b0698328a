use anyhow::Result;
use crossbeam_channel::Sender;
use futures::prelude::*;
use log::{debug, error};
use tokio::net::{TcpListener, TcpStream};
use tokio_serde::{SymmetricallyFramed, formats::SymmetricalJson};
use tokio_util::codec::{FramedRead, LengthDelimitedCodec};
use super::FlowRecord;

pub async fn listen(addr: String, tx: Sender<Vec<FlowRecord>>) {
    match execute(addr, tx).await {
        Ok(()) => debug!("listener finished"),
        Err(e) => error!("listener failed: {}", e),
    }
}

async fn execute(addr: String, tx: Sender<Vec<FlowRecord>>) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    loop {
        let (sock, peer) = listener.accept().await?;
        debug!("connection from {}", peer);
        let tx = tx.clone();
        tokio::spawn(async move {
            match stream(sock, tx).await {
                Ok(()) => debug!("stream {} finished", peer),
                Err(e) => error!("stream {} error: {}", peer, e),
            }
        });
    }
}

pub(crate) async fn stream(sock: TcpStream, tx: Sender<Vec<FlowRecord>>) -> Result<()> {
    let mut length = LengthDelimitedCodec::new();
    length.set_max_frame_length(32 * 1024 * 1024);
    let framed = FramedRead::new(sock, length);
    let format = SymmetricalJson::<Vec<FlowRecord>>::default();

    let mut codec = SymmetricallyFramed::new(framed, format);

    // an empty batch is the end-of-stream marker and must reach the
    // collect loop, so a full channel blocks the sender instead of
    // dropping records
    while let Some(batch) = codec.try_next().await? {
        let done = batch.is_empty();
        if tx.send(batch).is_err() || done {
            break;
        }
    }

    Ok(())
}
