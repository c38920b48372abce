//! creating and sending HTTP requests
use crate::{
    body::Body,
    error::{Error, ParseErr},
    response::{Headers, Response},
    stream::Stream,
    uri::Uri,
};
use log::debug;
use std::io::{BufRead, BufReader, Read, Write};

const CR_LF: &str = "\r\n";
const HTTP_V: &str = "HTTP/1.1";
const MAX_HEAD_LEN: usize = 10 << 20;
const MAX_INTERIM_RESPONSES: usize = 5;
const SWITCHING_PROTOCOLS: u16 = 101;
const USER_AGENT: &str = concat!("fetch_status/", env!("CARGO_PKG_VERSION"));

///Reads head of a response from `reader`, up to and including the first empty line.
///Anything after it is left in the reader.
pub fn read_head<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, Error> {
    let mut head = Vec::with_capacity(200);

    loop {
        let limit = MAX_HEAD_LEN.saturating_sub(head.len()) as u64;
        if limit == 0 {
            return Err(Error::Parse(ParseErr::HeadersErr));
        }

        let start = head.len();
        let read = reader.by_ref().take(limit).read_until(b'\n', &mut head)?;

        if read == 0 {
            let err = if head.is_empty() {
                ParseErr::Empty
            } else {
                ParseErr::HeadersErr
            };
            return Err(Error::Parse(err));
        }

        let line = &head[start..];
        if line == b"\r\n" || line == b"\n" {
            return Ok(head);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestBuilder<'a> {
    uri: &'a Uri,
    version: &'a str,
    headers: Headers,
}

impl<'a> RequestBuilder<'a> {
    ///Creates new `GET` request with default headers: `Host`, `User-Agent` and
    ///`Connection: close`.
    pub fn new(uri: &'a Uri) -> RequestBuilder<'a> {
        let mut headers = Headers::new();

        if let Some(host) = uri.host_header() {
            headers.insert("Host", &host);
        }
        headers.insert("User-Agent", USER_AGENT);
        headers.insert("Connection", "close");

        RequestBuilder {
            uri,
            version: HTTP_V,
            headers,
        }
    }

    ///Adds new header to existing/default headers, replacing one with the same name
    pub fn header<T, U>(&mut self, key: &T, val: &U) -> &mut Self
    where
        T: ToString + ?Sized,
        U: ToString + ?Sized,
    {
        self.headers.insert(key, val);
        self
    }

    ///Sends HTTP request over `stream`.
    ///
    ///Writes request message once and reads head of the response. Up to five interim
    ///(1xx) responses are skipped, more than that is an error. Returned `Response`
    ///owns the `stream` as its body.
    pub fn send(&self, mut stream: Stream) -> Result<Response, Error> {
        self.write_msg(&mut stream, &self.parse_msg())?;
        let mut reader = BufReader::new(stream);
        let mut interim = 0;

        loop {
            let head = read_head(&mut reader)?;
            let (status, headers) = Response::parse_head(&head)?;
            let code = status.code();

            if code.is_info() && u16::from(code) != SWITCHING_PROTOCOLS {
                interim += 1;
                if interim > MAX_INTERIM_RESPONSES {
                    return Err(Error::Parse(ParseErr::StatusErr));
                }

                debug!("skipping interim response {}", status);
                continue;
            }

            return Ok(Response::new(status, headers, Body::new(reader)));
        }
    }

    ///Writes message to `stream` and flushes it
    pub fn write_msg<T, U>(&self, stream: &mut T, msg: &U) -> Result<(), Error>
    where
        T: Write,
        U: AsRef<[u8]>,
    {
        stream.write_all(msg.as_ref())?;
        stream.flush()?;

        Ok(())
    }

    ///Parses request message
    pub fn parse_msg(&self) -> Vec<u8> {
        let request_line = format!("GET {} {}{}", self.uri.resource(), self.version, CR_LF);

        let headers: String = self
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}{}", k, v, CR_LF))
            .collect();

        (request_line + &headers + CR_LF).into_bytes()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Request<'a> {
    inner: RequestBuilder<'a>,
}

impl<'a> Request<'a> {
    ///Creates new `Request` with default parameters
    pub fn new(uri: &'a Uri) -> Request<'a> {
        Request {
            inner: RequestBuilder::new(uri),
        }
    }

    ///Sends HTTP request.
    ///
    ///Opens a single connection (wrapped with TLS for `https`), writes request message
    ///to it and returns response for this request. Nothing is retried and redirects
    ///are returned as they are.
    pub fn send(&self) -> Result<Response, Error> {
        let stream = Stream::connect(self.inner.uri)?;
        debug!("GET {}", self.inner.uri);

        self.inner.send(stream)
    }
}

///Creates and sends GET request. Returns response for this request.
///
///# Example
///```no_run
///use fetch_status::request;
///
///let res = request::get("http://example.com").unwrap();
///println!("Status: {}", res.status());
///res.close().unwrap();
///```
pub fn get<T: AsRef<str>>(uri: T) -> Result<Response, Error> {
    let uri = uri.as_ref().parse::<Uri>()?;

    Request::new(&uri).send()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Server;
    use std::io::Cursor;

    const URI: &str = "http://127.0.0.1:8080/std/string/index.html?q=1#part";

    #[test]
    fn request_b_new() {
        let uri: Uri = URI.parse().unwrap();
        let req = RequestBuilder::new(&uri);

        let mut expect_headers = Headers::new();
        expect_headers.insert("Host", "127.0.0.1:8080");
        expect_headers.insert("User-Agent", USER_AGENT);
        expect_headers.insert("Connection", "close");

        assert_eq!(req.headers, expect_headers);
        assert_eq!(req.version, HTTP_V);
    }

    #[test]
    fn request_b_header() {
        let uri: Uri = URI.parse().unwrap();
        let mut req = RequestBuilder::new(&uri);
        req.header("connection", "keep-alive").header("Accept", "*/*");

        assert_eq!(req.headers.get("Connection"), Some(&"keep-alive".to_string()));
        assert_eq!(req.headers.get("accept"), Some(&"*/*".to_string()));
        assert_eq!(req.headers.len(), 4);
    }

    #[test]
    fn request_b_parse_msg() {
        let uri: Uri = URI.parse().unwrap();
        let msg = String::from_utf8(RequestBuilder::new(&uri).parse_msg()).unwrap();

        assert!(msg.starts_with("GET /std/string/index.html?q=1 HTTP/1.1\r\n"));
        assert!(msg.contains("\r\nHost: 127.0.0.1:8080\r\n"));
        assert!(msg.contains("\r\nConnection: close\r\n"));
        assert!(msg.ends_with("\r\n\r\n"));
        assert_eq!(msg.matches("\r\n").count(), 5);
    }

    #[test]
    fn head_read() {
        let mut reader = Cursor::new(b"HTTP/1.1 200 OK\r\nA: b\r\n\r\nbody".to_vec());
        let head = read_head(&mut reader).unwrap();

        assert_eq!(head, b"HTTP/1.1 200 OK\r\nA: b\r\n\r\n");

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "body");
    }

    #[test]
    fn head_read_too_long() {
        let mut reader = Cursor::new(vec![b'a'; MAX_HEAD_LEN + 10]);

        match read_head(&mut reader) {
            Err(Error::Parse(ParseErr::HeadersErr)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn head_read_truncated() {
        let mut reader = Cursor::new(b"HTTP/1.1 200 OK\r\n".to_vec());

        match read_head(&mut reader) {
            Err(Error::Parse(ParseErr::HeadersErr)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn request_get() {
        let server = Server::reply(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello",
        );

        let mut res = get(server.uri()).unwrap();
        assert_eq!(u16::from(res.status_code()), 200);
        assert_eq!(res.version(), "HTTP/1.1");
        assert_eq!(res.reason(), "OK");
        assert_eq!(res.content_len(), Ok(Some(5)));
        assert_eq!(
            res.headers().get("content-type"),
            Some(&"text/plain".to_string())
        );

        let mut body = [0; 5];
        res.body_mut().read_exact(&mut body).unwrap();
        assert_eq!(&body, b"hello");

        res.close().unwrap();

        let exchange = server.finish();
        assert!(exchange.request.starts_with("GET / HTTP/1.1\r\n"));
        assert!(exchange.request.contains("User-Agent: fetch_status/"));
        assert!(exchange.released);
    }

    #[test]
    fn request_get_skips_interim() {
        let server = Server::reply(b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 204 No Content\r\n\r\n");

        let res = get(server.uri()).unwrap();
        assert_eq!(res.status().to_string(), "204 No Content");
        assert_eq!(res.content_len(), Ok(None));
        res.close().unwrap();

        assert!(server.finish().released);
    }

    #[test]
    fn request_get_interim_limit() {
        let server = Server::reply(
            b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 100 Continue\r\n\r\n\
              HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 100 Continue\r\n\r\n\
              HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\n\r\n",
        );

        let res = get(server.uri()).unwrap();
        assert_eq!(u16::from(res.status_code()), 200);
        res.close().unwrap();
        assert!(server.finish().released);

        let server = Server::reply(
            b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 100 Continue\r\n\r\n\
              HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 100 Continue\r\n\r\n\
              HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 103 Early Hints\r\n\r\n\
              HTTP/1.1 200 OK\r\n\r\n",
        );

        match get(server.uri()) {
            Err(Error::Parse(ParseErr::StatusErr)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(server.finish().released);
    }

    #[test]
    fn head_read_large() {
        let mut raw = b"HTTP/1.1 200 OK\r\nSet-Cookie: ".to_vec();
        raw.extend(vec![b'a'; 256 * 1024]);
        raw.extend(b"\r\n\r\n");

        let head = read_head(&mut Cursor::new(raw.clone())).unwrap();
        assert_eq!(head, raw);
    }

    #[test]
    fn request_get_malformed_status() {
        let server = Server::reply(b"SPDY/9 ok\r\n\r\n");

        match get(server.uri()) {
            Err(Error::Parse(ParseErr::StatusErr)) => (),
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(server.finish().released);
    }

    #[test]
    fn request_get_empty_reply() {
        let server = Server::reply_and_hang_up(b"");

        match get(server.uri()) {
            Err(Error::Parse(ParseErr::Empty)) => (),
            other => panic!("unexpected result: {:?}", other),
        }

        server.finish();
    }

    #[test]
    fn request_get_invalid_uri() {
        match get("not a uri") {
            Err(Error::Parse(ParseErr::Empty)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[ignore]
    #[test]
    fn request_get_remote() {
        let res = get("http://example.com").unwrap();
        assert!(res.status_code().is_success());
    }
}
