use std::io::{self, BufReader};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;

use roster_http::codec::Limits;
use roster_http::connection::{ConnectionInfo, HttpConnection};
use roster_http::handler::Handler;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// How accepted connections are handed to the blocking pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DispatchMode {
    /// One connection at a time; the next accept waits for the previous response.
    #[default]
    Sequential,
    /// Connections run concurrently on tokio's blocking threads.
    Threaded,
}

pub struct ServerBuilder {
    address: Option<io::Result<Vec<SocketAddr>>>,
    handler: Option<Arc<dyn Handler>>,
    mode: DispatchMode,
    limits: Limits,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { address: None, handler: None, mode: DispatchMode::default(), limits: Limits::default() }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// # Errors
    ///
    /// Fails when the address or the handler is missing, or the address
    /// doesn't resolve.
    pub fn build(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)??;
        if address.is_empty() {
            return Err(ServerBuildError::MissingAddress);
        }
        let handler = self.handler.ok_or(ServerBuildError::MissingHandler)?;
        Ok(Server { address, handler, mode: self.mode, limits: self.limits })
    }
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("address", &self.address)
            .field("mode", &self.mode)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

pub struct Server {
    address: Vec<SocketAddr>,
    handler: Arc<dyn Handler>,
    mode: DispatchMode,
    limits: Limits,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("address", &self.address)
            .field("mode", &self.mode)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("handler must be set")]
    MissingHandler,
    #[error("address must be set")]
    MissingAddress,
    #[error("address can't be resolved: {source}")]
    InvalidAddress {
        #[from]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {address:?}: {source}")]
    Bind { address: Vec<SocketAddr>, source: io::Error },
    #[error("listener io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// # Errors
    ///
    /// Fails when none of the configured addresses can be bound.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        TcpListener::bind(self.address.as_slice())
            .await
            .map_err(|source| ServerError::Bind { address: self.address.clone(), source })
    }

    /// Serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// See [`Server::serve_with_shutdown`].
    pub async fn start(self) -> Result<(), ServerError> {
        self.serve_with_shutdown(ctrl_c()).await
    }

    /// Binds the configured address and serves until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Fails when binding fails.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Accepts connections from `listener` until `shutdown` completes.
    ///
    /// Failures of a single connection are logged and never stop the loop.
    ///
    /// # Errors
    ///
    /// Fails when the listener's local address can't be read.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        info!(address = %listener.local_addr()?, mode = ?self.mode, "start listening");
        tokio::pin!(shutdown);

        loop {
            let (tcp_stream, peer) = tokio::select! {
                () = &mut shutdown => {
                    info!("shutdown requested, stop accepting");
                    return Ok(());
                }
                accepted = listener.accept() => match accepted {
                    Ok(stream_and_addr) => stream_and_addr,
                    Err(e) => {
                        warn!(cause = %e, "failed to accept");
                        continue;
                    }
                },
            };

            let stream = match into_blocking(tcp_stream) {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(%peer, cause = %e, "can't hand over connection");
                    continue;
                }
            };

            let handler = Arc::clone(&self.handler);
            let limits = self.limits;
            let task = tokio::task::spawn_blocking(move || serve_connection(&stream, peer, handler.as_ref(), limits));

            if self.mode == DispatchMode::Sequential
                && let Err(e) = task.await
            {
                error!(%peer, cause = %e, "connection task failed");
            }
        }
    }
}

fn into_blocking(tcp_stream: tokio::net::TcpStream) -> io::Result<TcpStream> {
    let stream = tcp_stream.into_std()?;
    stream.set_nonblocking(false)?;
    Ok(stream)
}

fn serve_connection(stream: &TcpStream, peer: SocketAddr, handler: &dyn Handler, limits: Limits) {
    info!(%peer, "connected");

    match stream.local_addr() {
        Ok(local) => {
            let info = ConnectionInfo::new(local, peer);
            let connection = HttpConnection::with_limits(BufReader::new(stream), stream, limits);
            if let Err(e) = connection.process(handler, &info) {
                error!(%peer, cause = %e, "can't send response");
            }
        }
        Err(e) => error!(%peer, cause = %e, "can't read local address"),
    }

    if let Err(e) = stream.shutdown(Shutdown::Both) {
        debug!(%peer, cause = %e, "shutdown after response failed");
    }
    info!(%peer, "disconnected");
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(cause = %e, "can't listen for ctrl-c, serving until killed");
        std::future::pending::<()>().await;
    }
}
