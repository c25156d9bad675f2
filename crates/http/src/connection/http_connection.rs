use std::io::{BufRead, Write};

use bytes::{Bytes, BytesMut};
use http::Response;
use tracing::{info, trace, warn};

use crate::codec::{Limits, RequestDecoder, RequestLine, ResponseEncoder};
use crate::connection::ConnectionInfo;
use crate::handler::Handler;
use crate::protocol::{Headers, HttpError, ParseError, Request, SendError, response};

/// A single-request HTTP connection over a blocking reader and writer.
///
/// `HttpConnection` owns the stream halves for the lifetime of one request:
/// - reading and validating the request line, headers and body
/// - answering every parse failure with `400 Bad Request`
/// - handing well-formed requests to the [`Handler`]
/// - writing exactly one response and dropping the stream
///
/// # Type Parameters
///
/// * `R`: The buffered readable stream type
/// * `W`: The writable stream type
///
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: W,
    decoder: RequestDecoder,
    encoder: ResponseEncoder,
}

/// Where a connection is in its single pass. Every state moves forward;
/// failures jump straight to `BuildingResponse`.
#[derive(Debug)]
enum State {
    ReadingRequestLine,
    ParsingHeaders(RequestLine),
    ReadingBody(RequestLine, Headers),
    Routing(Request),
    BuildingResponse(Response<Bytes>),
    Closed,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::ReadingRequestLine => "reading_request_line",
            State::ParsingHeaders(_) => "parsing_headers",
            State::ReadingBody(..) => "reading_body",
            State::Routing(_) => "routing",
            State::BuildingResponse(_) => "building_response",
            State::Closed => "closed",
        }
    }
}

impl<R, W> HttpConnection<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_limits(reader, writer, Limits::default())
    }

    pub fn with_limits(reader: R, writer: W, limits: Limits) -> Self {
        Self { reader, writer, decoder: RequestDecoder::with_limits(limits), encoder: ResponseEncoder::new() }
    }

    /// Processes the one request this connection carries.
    ///
    /// # Errors
    ///
    /// Only a failure to write the response escapes; parse failures are
    /// answered on the connection itself.
    pub fn process<H>(mut self, handler: &H, info: &ConnectionInfo) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let mut state = State::ReadingRequestLine;
        loop {
            trace!(state = state.name(), "connection state");
            state = match state {
                State::ReadingRequestLine => match self.decoder.decode_request_line(&mut self.reader) {
                    Ok(line) => State::ParsingHeaders(line),
                    Err(e) => reject(&e, info),
                },

                State::ParsingHeaders(line) => match self.decoder.decode_headers(&mut self.reader) {
                    Ok(headers) => State::ReadingBody(line, headers),
                    Err(e) => reject(&e, info),
                },

                State::ReadingBody(line, headers) => match self.decoder.decode_body(&headers, &mut self.reader) {
                    Ok(body) => State::Routing(Request::from_parts(line, headers, body)),
                    Err(e) => reject(&e, info),
                },

                State::Routing(request) => {
                    let response = handler.call(&request, info);
                    info!(
                        peer = %info.peer_addr(),
                        method = %request.method(),
                        uri = request.target(),
                        status = response.status().as_u16(),
                        "handled request"
                    );
                    State::BuildingResponse(response)
                }

                State::BuildingResponse(response) => {
                    self.send(response)?;
                    State::Closed
                }

                State::Closed => return Ok(()),
            };
        }
    }

    fn send(&mut self, response: Response<Bytes>) -> Result<(), SendError> {
        let mut buffer = BytesMut::with_capacity(response.body().len() + 256);
        self.encoder.encode(response, &mut buffer)?;

        self.writer.write_all(&buffer)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn reject(e: &ParseError, info: &ConnectionInfo) -> State {
    warn!(peer = %info.peer_addr(), cause = %e, "can't parse request");
    State::BuildingResponse(response::bad_request())
}
