use std::hint::black_box;
use std::io::Cursor;

use bytes::{Bytes, BytesMut};
use criterion::{Criterion, criterion_group, criterion_main};
use http::Response;
use roster_http::codec::{RequestDecoder, ResponseEncoder};
use roster_http::connection::{ConnectionInfo, HttpConnection};
use roster_http::handler::make_handler;
use roster_http::protocol::{Request, response};

const SIMPLE_GET: &[u8] = b"GET /index.html HTTP/1.1\r\nHost: localhost\r\nUser-Agent: bench\r\n\r\n";

const SIMPLE_POST: &[u8] =
    b"POST /app-add HTTP/1.1\r\nHost: localhost\r\nContent-Length: 29\r\n\r\nfirst=Mickey&last=Mouse%21%21";

fn hello(_request: &Request, _info: &ConnectionInfo) -> Response<Bytes> {
    response::ok("Hello World!", &mime::TEXT_PLAIN)
}

fn bench_request_decoder(c: &mut Criterion) {
    let decoder = RequestDecoder::new();

    c.bench_function("decode_simple_get", |b| {
        b.iter(|| {
            let mut reader = Cursor::new(SIMPLE_GET);
            black_box(decoder.decode(&mut reader).unwrap());
        });
    });

    c.bench_function("decode_simple_post", |b| {
        b.iter(|| {
            let mut reader = Cursor::new(SIMPLE_POST);
            black_box(decoder.decode(&mut reader).unwrap());
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let encoder = ResponseEncoder::new();

    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            encoder.encode(response::ok("Hello World!", &mime::TEXT_PLAIN), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let handler = make_handler(hello);
    let info = ConnectionInfo::new("127.0.0.1:8080".parse().unwrap(), "127.0.0.1:50000".parse().unwrap());

    c.bench_function("process_simple_request", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(256);
            HttpConnection::new(Cursor::new(SIMPLE_GET), &mut output).process(&handler, &info).unwrap();
            black_box(output);
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
