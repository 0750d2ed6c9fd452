//! Blocking adapters: an acceptor thread plus one worker thread per TCP
//! connection, or a single UDP worker. Sockets run with a short read timeout
//! so every loop observes the shutdown flag between reads.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use crate::account::SiaAccount;
use crate::counter::{Counter, CounterSnapshot};
use crate::registry::AccountRegistry;
use crate::server::{EventHandler, FrameBuffer, Handler};
use crate::Protocol;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const READ_CHUNK: usize = 1024;
const MAX_DATAGRAM: usize = 2048;

/// Blocking receiver facade, the thread-per-connection sibling of
/// [`crate::aio::SiaClient`]. One start/stop cycle per client.
pub struct SiaClient {
    host: String,
    port: u16,
    protocol: Protocol,
    registry: Arc<AccountRegistry>,
    counter: Arc<Counter>,
    function: EventHandler,
    shutdown: Arc<AtomicBool>,
    workers: Arc<Mutex<Vec<JoinHandle<()>>>>,
    acceptor: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl SiaClient {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        accounts: Vec<SiaAccount>,
        function: EventHandler,
        protocol: Protocol,
    ) -> SiaClient {
        SiaClient {
            host: host.into(),
            port,
            protocol,
            registry: Arc::new(AccountRegistry::new(accounts)),
            counter: Arc::new(Counter::new()),
            function,
            shutdown: Arc::new(AtomicBool::new(false)),
            workers: Arc::new(Mutex::new(Vec::new())),
            acceptor: None,
            local_addr: None,
        }
    }

    /// Bind the socket and spawn the acceptor (or datagram) thread.
    pub fn start(&mut self) -> io::Result<()> {
        let handler = Handler::new(self.registry.clone(), self.counter.clone());
        let function = self.function.clone();
        let shutdown = self.shutdown.clone();
        match self.protocol {
            Protocol::Tcp => {
                let listener = TcpListener::bind((self.host.as_str(), self.port))?;
                listener.set_nonblocking(true)?;
                self.local_addr = Some(listener.local_addr()?);
                info!("listening for panels on tcp {}", listener.local_addr()?);
                let workers = self.workers.clone();
                self.acceptor = Some(
                    thread::Builder::new()
                        .name("sia-acceptor".to_string())
                        .spawn(move || accept_loop(listener, handler, function, workers, shutdown))?,
                );
            }
            Protocol::Udp => {
                let socket = UdpSocket::bind((self.host.as_str(), self.port))?;
                socket.set_read_timeout(Some(POLL_INTERVAL))?;
                self.local_addr = Some(socket.local_addr()?);
                info!("listening for panels on udp {}", socket.local_addr()?);
                self.acceptor = Some(
                    thread::Builder::new()
                        .name("sia-udp".to_string())
                        .spawn(move || datagram_loop(socket, handler, function, shutdown))?,
                );
            }
        }
        Ok(())
    }

    /// Raise the shutdown flag and join every worker. In-flight frames
    /// complete before their worker exits.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(acceptor) = self.acceptor.take() {
            if acceptor.join().is_err() {
                warn!("acceptor thread panicked");
            }
        }
        let workers = std::mem::take(&mut *self.workers.lock().unwrap());
        for worker in workers {
            if worker.join().is_err() {
                warn!("connection worker panicked");
            }
        }
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

fn accept_loop(
    listener: TcpListener,
    handler: Handler,
    function: EventHandler,
    workers: Arc<Mutex<Vec<JoinHandle<()>>>>,
    shutdown: Arc<AtomicBool>,
) {
    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, peer)) => {
                info!("panel connected from {peer}");
                let handler = handler.clone();
                let function = function.clone();
                let shutdown = shutdown.clone();
                let worker = thread::Builder::new()
                    .name(format!("sia-conn-{peer}"))
                    .spawn(move || connection_loop(stream, peer, handler, function, shutdown));
                match worker {
                    Ok(worker) => workers.lock().unwrap().push(worker),
                    Err(err) => warn!("failed to spawn connection worker: {err}"),
                }
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                warn!("accept failed: {err}");
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
    info!("tcp listener shut down");
}

fn connection_loop(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Handler,
    function: EventHandler,
    shutdown: Arc<AtomicBool>,
) {
    // accepted sockets can inherit the listener's nonblocking flag
    if let Err(err) = stream
        .set_nonblocking(false)
        .and_then(|()| stream.set_read_timeout(Some(POLL_INTERVAL)))
    {
        warn!("failed to configure socket for {peer}: {err}");
        return;
    }
    let mut buffer = FrameBuffer::new();
    let mut chunk = [0u8; READ_CHUNK];
    while !shutdown.load(Ordering::SeqCst) {
        match stream.read(&mut chunk) {
            Ok(0) => {
                if let Some(frame) = buffer.drain() {
                    process_frame(&handler, &function, &mut stream, &frame);
                }
                break;
            }
            Ok(n) => {
                buffer.extend(&chunk[..n]);
                while let Some(frame) = buffer.next_frame() {
                    process_frame(&handler, &function, &mut stream, &frame);
                }
            }
            Err(err)
                if err.kind() == io::ErrorKind::WouldBlock
                    || err.kind() == io::ErrorKind::TimedOut =>
            {
                continue;
            }
            Err(err) => {
                warn!("read error from {peer}: {err}");
                break;
            }
        }
    }
    info!("panel {peer} disconnected");
}

/// Respond first, then dispatch, so the callback never delays the ACK.
fn process_frame(handler: &Handler, function: &EventHandler, stream: &mut TcpStream, frame: &[u8]) {
    let (response, event) = handler.handle_frame(frame);
    if let Some(response) = response {
        if let Err(err) = stream.write_all(&response).and_then(|()| stream.flush()) {
            warn!("failed to respond: {err}");
        }
    }
    if let Some(event) = event {
        handler.dispatch(function, event);
    }
}

fn datagram_loop(
    socket: UdpSocket,
    handler: Handler,
    function: EventHandler,
    shutdown: Arc<AtomicBool>,
) {
    let mut chunk = [0u8; MAX_DATAGRAM];
    while !shutdown.load(Ordering::SeqCst) {
        match socket.recv_from(&mut chunk) {
            Ok((n, peer)) => {
                // one datagram, one frame
                let mut buffer = FrameBuffer::new();
                buffer.extend(&chunk[..n]);
                let Some(frame) = buffer.next_frame().or_else(|| buffer.drain()) else {
                    continue;
                };
                let (response, event) = handler.handle_frame(&frame);
                if let Some(response) = response {
                    if let Err(err) = socket.send_to(&response, peer) {
                        warn!("failed to respond to {peer}: {err}");
                    }
                }
                if let Some(event) = event {
                    handler.dispatch(&function, event);
                }
            }
            Err(err)
                if err.kind() == io::ErrorKind::WouldBlock
                    || err.kind() == io::ErrorKind::TimedOut =>
            {
                continue;
            }
            Err(err) => warn!("udp receive failed: {err}"),
        }
    }
    info!("udp listener shut down");
}
