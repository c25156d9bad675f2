use std::fs;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use http::Response;
use roster_http::connection::ConnectionInfo;
use roster_http::handler::Handler;
use roster_http::protocol::{Request, response};
use tracing::{debug, error, info, warn};

use crate::docroot::DocumentRoot;
use crate::records;
use crate::router::{RouteDecision, Router};
use crate::store::{Criteria, NewRecord, RecordStore};

/// Page listing the records, must contain [`records::ROWS_PLACEHOLDER`].
pub const LIST_TEMPLATE: &str = "app_list.html";

/// Page served after a record was stored.
pub const ADD_TEMPLATE: &str = "app_add.html";

/// The application handler: routes each request and acts on the decision.
#[derive(Clone)]
pub struct RosterApp {
    router: Router,
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for RosterApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterApp").field("router", &self.router).finish_non_exhaustive()
    }
}

impl RosterApp {
    pub fn new(docroot: DocumentRoot, store: Arc<dyn RecordStore>) -> Self {
        Self { router: Router::new(docroot), store }
    }

    pub fn respond(&self, decision: RouteDecision) -> Response<Bytes> {
        match decision {
            RouteDecision::StaticFile(path) => serve_file(&path),
            RouteDecision::DirectoryRedirect(location) => response::moved_permanently(&location).unwrap_or_else(|e| {
                warn!(%location, cause = %e, "can't redirect");
                response::bad_request()
            }),
            RouteDecision::DynamicList(criteria) => self.list(&criteria),
            RouteDecision::DynamicAdd(record) => self.add(&record),
            RouteDecision::NotFound => response::not_found(),
            RouteDecision::BadRequest(reason) => {
                warn!(%reason, "rejected request");
                response::bad_request()
            }
        }
    }

    fn list(&self, criteria: &Criteria) -> Response<Bytes> {
        let records = records::list(self.store.as_ref(), criteria);
        debug!(?criteria, matched = records.len(), "queried records");

        let template_path = self.router.docroot().file(LIST_TEMPLATE);
        match fs::read_to_string(&template_path) {
            Ok(template) => response::ok(records::render_list(&template, &records), &mime::TEXT_HTML),
            Err(e) => {
                warn!(path = %template_path.display(), cause = %e, "can't read list template");
                response::not_found()
            }
        }
    }

    fn add(&self, record: &NewRecord) -> Response<Bytes> {
        match self.store.append(&record.first, &record.last) {
            Ok(stored) => {
                info!(number = stored.number, "stored record");
                serve_file(&self.router.docroot().file(ADD_TEMPLATE))
            }
            Err(e) => {
                error!(cause = %e, "can't store record");
                response::internal_error()
            }
        }
    }
}

impl Handler for RosterApp {
    fn call(&self, request: &Request, info: &ConnectionInfo) -> Response<Bytes> {
        let decision = self.router.route(request, info.local_addr());
        debug!(uri = request.target(), ?decision, "routed request");
        self.respond(decision)
    }
}

fn serve_file(path: &Path) -> Response<Bytes> {
    match fs::read(path) {
        Ok(content) => response::ok(content, &response::guess_mime(&path.to_string_lossy())),
        Err(e) => {
            debug!(path = %path.display(), cause = %e, "can't read file");
            response::not_found()
        }
    }
}
