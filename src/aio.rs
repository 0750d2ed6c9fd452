//! Async adapters: a tokio task per TCP connection plus a single datagram
//! task, all tracked so shutdown can wait for in-flight frames to finish.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{info, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::account::SiaAccount;
use crate::counter::{Counter, CounterSnapshot};
use crate::registry::AccountRegistry;
use crate::server::{AsyncEventHandler, FrameBuffer, Handler};
use crate::Protocol;

const READ_CHUNK: usize = 1024;
const MAX_DATAGRAM: usize = 2048;

/// Async receiver facade: bind, serve, and stop a DC-09 listener on the
/// current tokio runtime. One start/stop cycle per client.
pub struct SiaClient {
    host: String,
    port: u16,
    protocol: Protocol,
    registry: Arc<AccountRegistry>,
    counter: Arc<Counter>,
    function: AsyncEventHandler,
    tracker: TaskTracker,
    shutdown: CancellationToken,
    local_addr: Option<SocketAddr>,
}

impl SiaClient {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        accounts: Vec<SiaAccount>,
        function: AsyncEventHandler,
        protocol: Protocol,
    ) -> SiaClient {
        SiaClient {
            host: host.into(),
            port,
            protocol,
            registry: Arc::new(AccountRegistry::new(accounts)),
            counter: Arc::new(Counter::new()),
            function,
            tracker: TaskTracker::new(),
            shutdown: CancellationToken::new(),
            local_addr: None,
        }
    }

    /// Bind the socket and spawn the serving tasks.
    pub async fn start(&mut self) -> io::Result<()> {
        let handler = Handler::new(self.registry.clone(), self.counter.clone());
        let function = self.function.clone();
        let token = self.shutdown.clone();
        match self.protocol {
            Protocol::Tcp => {
                let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;
                self.local_addr = Some(listener.local_addr()?);
                info!("listening for panels on tcp {}", listener.local_addr()?);
                let tracker = self.tracker.clone();
                self.tracker
                    .spawn(accept_loop(listener, handler, function, tracker, token));
            }
            Protocol::Udp => {
                let socket = UdpSocket::bind((self.host.as_str(), self.port)).await?;
                self.local_addr = Some(socket.local_addr()?);
                info!("listening for panels on udp {}", socket.local_addr()?);
                self.tracker
                    .spawn(datagram_loop(socket, handler, function, token));
            }
        }
        Ok(())
    }

    /// Signal shutdown and wait for every task to finish. Frames already
    /// read complete (response sent) before their task exits; the listener
    /// socket closes last, when the accept task drops it.
    pub async fn stop(&mut self) {
        self.shutdown.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }

    /// The bound address, once started. Useful when listening on port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn accounts(&self) -> Vec<SiaAccount> {
        self.registry.accounts()
    }

    /// Atomically replace the whole account set.
    pub fn set_accounts(&self, accounts: Vec<SiaAccount>) {
        self.registry.replace(accounts);
    }

    pub fn counts(&self) -> CounterSnapshot {
        self.counter.snapshot()
    }
}

async fn accept_loop(
    listener: TcpListener,
    handler: Handler,
    function: AsyncEventHandler,
    tracker: TaskTracker,
    token: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    info!("panel connected from {peer}");
                    tracker.spawn(connection_loop(
                        stream,
                        peer,
                        handler.clone(),
                        function.clone(),
                        token.clone(),
                    ));
                }
                Err(err) => warn!("accept failed: {err}"),
            },
        }
    }
    info!("tcp listener shut down");
}

async fn connection_loop(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Handler,
    function: AsyncEventHandler,
    token: CancellationToken,
) {
    let mut buffer = FrameBuffer::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            read = stream.read(&mut chunk) => match read {
                Ok(0) => {
                    if let Some(frame) = buffer.drain() {
                        process_frame(&handler, &function, &mut stream, &frame).await;
                    }
                    break;
                }
                Ok(n) => {
                    buffer.extend(&chunk[..n]);
                    while let Some(frame) = buffer.next_frame() {
                        process_frame(&handler, &function, &mut stream, &frame).await;
                    }
                }
                Err(err) => {
                    warn!("read error from {peer}: {err}");
                    break;
                }
            },
        }
    }
    info!("panel {peer} disconnected");
}

/// One frame through the pipeline: respond first, then dispatch, so a slow
/// callback never delays the acknowledgement.
async fn process_frame(
    handler: &Handler,
    function: &AsyncEventHandler,
    stream: &mut TcpStream,
    frame: &[u8],
) {
    let (response, event) = handler.handle_frame(frame);
    if let Some(response) = response {
        if let Err(err) = write_response(stream, &response).await {
            warn!("failed to respond: {err}");
        }
    }
    if let Some(event) = event {
        handler.dispatch_async(function, event).await;
    }
}

async fn write_response(stream: &mut TcpStream, response: &[u8]) -> io::Result<()> {
    stream.write_all(response).await?;
    stream.flush().await
}

async fn datagram_loop(
    socket: UdpSocket,
    handler: Handler,
    function: AsyncEventHandler,
    token: CancellationToken,
) {
    let mut chunk = [0u8; MAX_DATAGRAM];
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            received = socket.recv_from(&mut chunk) => match received {
                Ok((n, peer)) => {
                    // one datagram, one frame
                    let mut buffer = FrameBuffer::new();
                    buffer.extend(&chunk[..n]);
                    let Some(frame) = buffer.next_frame().or_else(|| buffer.drain()) else {
                        continue;
                    };
                    let (response, event) = handler.handle_frame(&frame);
                    if let Some(response) = response {
                        if let Err(err) = socket.send_to(&response, peer).await {
                            warn!("failed to respond to {peer}: {err}");
                        }
                    }
                    if let Some(event) = event {
                        handler.dispatch_async(&function, event).await;
                    }
                }
                Err(err) => warn!("udp receive failed: {err}"),
            },
        }
    }
    info!("udp listener shut down");
}
