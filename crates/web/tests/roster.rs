use std::io::Cursor;
use std::sync::Arc;

use indoc::indoc;
use roster_http::connection::{ConnectionInfo, HttpConnection};
use roster_http::protocol::response::{BAD_REQUEST_PAGE, NOT_FOUND_PAGE};
use roster_web::RosterApp;
use roster_web::docroot::DocumentRoot;
use roster_web::store::{Criteria, MemoryRecordStore, Record, RecordStore};

const ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/www-data");

struct Reply {
    status_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Reply {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

fn exchange(store: Arc<MemoryRecordStore>, raw: &str) -> Reply {
    let app = RosterApp::new(DocumentRoot::new(ROOT).unwrap(), store);
    let info = ConnectionInfo::new("127.0.0.1:8080".parse().unwrap(), "127.0.0.1:51000".parse().unwrap());

    let mut output = Vec::new();
    HttpConnection::new(Cursor::new(raw.as_bytes().to_vec()), &mut output).process(&app, &info).unwrap();

    let split = output.windows(4).position(|window| window == b"\r\n\r\n").unwrap();
    let head = std::str::from_utf8(&output[..split]).unwrap();
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_owned();
    let headers = lines
        .map(|line| {
            let (name, value) = line.split_once(": ").unwrap();
            (name.to_owned(), value.to_owned())
        })
        .collect();

    let reply = Reply { status_line, headers, body: output[split + 4..].to_vec() };
    assert_eq!(reply.header("connection"), Some("close"));
    assert_eq!(reply.header("content-length"), Some(reply.body.len().to_string().as_str()));
    assert!(reply.header("content-type").is_some());
    reply
}

fn seeded() -> Arc<MemoryRecordStore> {
    let store = MemoryRecordStore::new();
    store.append("Mick", "Jagger").unwrap();
    store.append("Keith", "Richards").unwrap();
    store.append("Mick", "Taylor").unwrap();
    Arc::new(store)
}

#[test]
fn static_file_is_served_with_its_type() {
    let reply = exchange(seeded(), "GET /style.css HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
    assert_eq!(reply.header("content-type"), Some("text/css"));
    assert_eq!(reply.body, std::fs::read(format!("{ROOT}/style.css")).unwrap());
}

#[test]
fn directory_redirects_with_or_without_slash() {
    for target in ["/students", "/students/"] {
        let reply = exchange(seeded(), &format!("GET {target} HTTP/1.1\r\n\r\n"));
        assert_eq!(reply.status_line, "HTTP/1.1 301 Moved Permanently");
        assert_eq!(reply.header("location"), Some("http://localhost:8080/students/index.html"));
        assert!(reply.text().contains("http://localhost:8080/students/index.html"));
    }
}

#[test]
fn missing_file_is_not_found() {
    let reply = exchange(seeded(), "GET /nope.html HTTP/1.1\r\n\r\n");
    assert_eq!(reply.status_line, "HTTP/1.1 404 Not Found");
    assert_eq!(reply.text(), NOT_FOUND_PAGE);
}

#[test]
fn traversal_never_leaves_the_root() {
    for target in ["/../Cargo.toml", "/students/../../Cargo.toml", "/%2e%2e/Cargo.toml", "/..%2fCargo.toml"] {
        let reply = exchange(seeded(), &format!("GET {target} HTTP/1.1\r\n\r\n"));
        assert_eq!(reply.status_line, "HTTP/1.1 404 Not Found", "target {target}");
    }
}

#[test]
fn list_all_records() {
    let reply = exchange(seeded(), "GET /app-index HTTP/1.1\r\n\r\n");
    assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
    assert_eq!(reply.header("content-type"), Some("text/html"));
    for name in ["Jagger", "Richards", "Taylor"] {
        assert!(reply.text().contains(&format!("<td>{name}</td>")));
    }
    assert!(!reply.text().contains("{{students}}"));
}

#[test]
fn list_filters_by_exact_match() {
    let reply = exchange(seeded(), "GET /app-index?first=Mick HTTP/1.1\r\n\r\n");
    assert!(reply.text().contains("<td>Jagger</td>"));
    assert!(reply.text().contains("<td>Taylor</td>"));
    assert!(!reply.text().contains("<td>Richards</td>"));

    let reply = exchange(seeded(), "GET /app-index?number=2&first= HTTP/1.1\r\n\r\n");
    assert!(reply.text().contains("<td>Richards</td>"));
    assert!(!reply.text().contains("<td>Mick</td>"));
}

#[test]
fn list_with_bad_number_is_bad_request() {
    let reply = exchange(seeded(), "GET /app-index?number=abc HTTP/1.1\r\n\r\n");
    assert_eq!(reply.status_line, "HTTP/1.1 400 Bad Request");
    assert_eq!(reply.text(), BAD_REQUEST_PAGE);
}

#[test]
fn add_appends_and_confirms() {
    let store = seeded();
    let request = indoc! {"
        POST /app-add HTTP/1.1\r
        Host: localhost:8080\r
        Content-Type: application/x-www-form-urlencoded\r
        Content-Length: 29\r
        \r
        first=Ronnie&last=Wood+Junior"};

    let reply = exchange(Arc::clone(&store), request);
    assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
    assert_eq!(reply.body, std::fs::read(format!("{ROOT}/app_add.html")).unwrap());

    let added = store.query(&Criteria { number: Some(4), ..Criteria::default() }).unwrap();
    assert_eq!(added, vec![Record { number: 4, first: "Ronnie".into(), last: "Wood Junior".into() }]);
}

#[test]
fn add_rejections_leave_the_store_alone() {
    let requests = [
        "POST /app-add HTTP/1.1\r\nContent-Length: 10\r\n\r\nfirst=Mick",
        "POST /app-add HTTP/1.1\r\n\r\n",
        "GET /app-add HTTP/1.1\r\n\r\n",
        "POST /app-index HTTP/1.1\r\nContent-Length: 0\r\n\r\n",
        "POST /app-add HTTP/1.1\r\nContent-Length: 40\r\n\r\nfirst=Mick&last=Jagger",
    ];

    let store = seeded();
    for request in requests {
        let reply = exchange(Arc::clone(&store), request);
        assert_eq!(reply.status_line, "HTTP/1.1 400 Bad Request", "request {request:?}");
    }
    assert_eq!(store.query(&Criteria::all()).unwrap().len(), 3);
}

#[test]
fn malformed_request_lines_are_bad_requests() {
    let requests = [
        "GET /index.html\r\n\r\n",
        "GET  /index.html HTTP/1.1\r\n\r\n",
        "DELETE /index.html HTTP/1.1\r\n\r\n",
        "get /index.html HTTP/1.1\r\n\r\n",
        "GET index.html HTTP/1.1\r\n\r\n",
        "GET /index.html HTTP/2\r\n\r\n",
        "GET /index.html HTTP/1.1\r\nNo colon here\r\n\r\n",
    ];

    for request in requests {
        let reply = exchange(seeded(), request);
        assert_eq!(reply.status_line, "HTTP/1.1 400 Bad Request", "request {request:?}");
        assert_eq!(reply.text(), BAD_REQUEST_PAGE);
    }
}
