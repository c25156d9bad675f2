//! Static files and a small record roster served over [`roster_http`].
//!
//! - [`router`]: turns a request into a [`router::RouteDecision`]
//! - [`docroot`]: normalizes paths and keeps them under the document root
//! - [`records`]: query and form parsing plus HTML rendering for the roster
//! - [`store`]: the record store trait with file and in-memory backends
//! - [`app`]: the [`roster_http::handler::Handler`] tying the above together
//! - [`server`]: the accept loop
//! - [`config`]: command line and environment configuration

pub mod app;
pub mod config;
pub mod docroot;
pub mod records;
pub mod router;
pub mod server;
pub mod store;

pub use app::RosterApp;
pub use config::Config;
pub use server::{DispatchMode, Server};
