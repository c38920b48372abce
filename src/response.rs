//! parsing server response
use crate::{body::Body, error::ParseErr};
use std::{
    collections::{hash_map, HashMap},
    fmt, io, str,
};
use unicase::Ascii;

/// Response to the request: parsed head and the body still attached to the connection.
#[derive(Debug)]
pub struct Response {
    status: Status,
    headers: Headers,
    body: Body,
}

impl Response {
    ///Creates new `Response` from its parsed head and the `body` the rest of it can be
    ///read from.
    pub fn new(status: Status, headers: Headers, body: Body) -> Response {
        Response {
            status,
            headers,
            body,
        }
    }

    ///Parses head of a `Response` - status and headers - from slice of bytes.
    ///
    ///Only version and status code have to be ASCII. Bytes of a reason phrase or
    ///header value which are not valid UTF-8 are replaced with U+FFFD.
    pub fn parse_head(head: &[u8]) -> Result<(Status, Headers), ParseErr> {
        if head.is_empty() {
            return Err(ParseErr::Empty);
        }

        let head = String::from_utf8_lossy(head);
        let head: &str = &head;
        let (status_line, rest) = head.split_once('\n').unwrap_or((head, ""));

        Ok((status_line.parse()?, rest.parse()?))
    }

    ///Returns status of this `Response`.
    pub fn status(&self) -> &Status {
        &self.status
    }

    ///Returns status code of this `Response`.
    pub fn status_code(&self) -> StatusCode {
        self.status.code
    }

    ///Returns HTTP version of this `Response`.
    pub fn version(&self) -> &str {
        &self.status.version
    }

    ///Returns reason of this `Response`.
    pub fn reason(&self) -> &str {
        &self.status.reason
    }

    ///Returns headers of this `Response`.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    ///Returns length of the content of this `Response`, according to information
    ///included in headers. If there is no such an information, returns `Ok(None)`.
    pub fn content_len(&self) -> Result<Option<usize>, ParseErr> {
        match self.headers.get("Content-Length") {
            Some(p) => Ok(Some(p.trim().parse()?)),
            None => Ok(None),
        }
    }

    ///Returns body of this `Response`.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    ///Releases the connection this `Response` was read from.
    pub fn close(mut self) -> io::Result<()> {
        self.body.close()
    }
}

///Code sent by a server in response to a client's request.
///# Example
///```
///use fetch_status::response::StatusCode;
///
///let code = StatusCode::from(200);
///assert!(code.is_success())
///```
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct StatusCode(u16);

impl StatusCode {
    pub fn new(code: u16) -> StatusCode {
        StatusCode(code)
    }

    ///Checks if this `StatusCode` is within 100-199, which indicates that it's Informational.
    pub fn is_info(&self) -> bool {
        (100..200).contains(&self.0)
    }

    ///Checks if this `StatusCode` is within 200-299, which indicates that it's Successful.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    ///Checks if this `StatusCode` is within 300-399, which indicates that it's Redirection.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.0)
    }

    ///Checks if this `StatusCode` is within 400-499, which indicates that it's Client Error.
    pub fn is_client_err(&self) -> bool {
        (400..500).contains(&self.0)
    }

    ///Checks if this `StatusCode` is within 500-599, which indicates that it's Server Error.
    pub fn is_server_err(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///Status line of a response.
///
///Displayed as status text, e.g. `200 OK`.
#[derive(PartialEq, Debug, Clone)]
pub struct Status {
    version: String,
    code: StatusCode,
    reason: String,
}

impl Status {
    ///Returns HTTP version of this `Status`.
    pub fn version(&self) -> &str {
        &self.version
    }

    ///Returns status code of this `Status`.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    ///Returns reason phrase of this `Status`. May be empty.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl<T, U, V> From<(T, U, V)> for Status
where
    T: ToString,
    V: ToString,
    StatusCode: From<U>,
{
    fn from(status: (T, U, V)) -> Status {
        Status {
            version: status.0.to_string(),
            code: StatusCode::from(status.1),
            reason: status.2.to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.reason.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.reason)
        }
    }
}

impl str::FromStr for Status {
    type Err = ParseErr;

    fn from_str(status_line: &str) -> Result<Status, Self::Err> {
        let mut parts = status_line.trim_end().splitn(3, ' ');

        let version = parts
            .next()
            .filter(|v| v.starts_with("HTTP/"))
            .ok_or(ParseErr::StatusErr)?;
        let code = parts
            .next()
            .filter(|c| c.len() == 3 && c.bytes().all(|b| b.is_ascii_digit()))
            .ok_or(ParseErr::StatusErr)?;
        let code: u16 = code.parse()?;
        let reason = parts.next().unwrap_or("").trim();

        Ok(Status::from((version, code, reason)))
    }
}

///Wrapper around HashMap<Ascii<String>, String> with additional functionality
///for parsing HTTP headers. Names are compared case-insensitively.
///
///# Example
///```
///use fetch_status::response::Headers;
///
///let mut headers = Headers::new();
///headers.insert("Content-Type", "text/html");
///
///assert_eq!(headers.get("content-type"), Some(&"text/html".to_string()));
///```
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Headers(HashMap<Ascii<String>, String>);

impl Headers {
    ///Creates an empty `Headers`.
    pub fn new() -> Headers {
        Headers(HashMap::new())
    }

    ///An iterator visiting all key-value pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<Ascii<String>, String> {
        self.0.iter()
    }

    ///Returns a reference to the value corresponding to the key.
    pub fn get<T: ToString + ?Sized>(&self, k: &T) -> Option<&String> {
        self.0.get(&Ascii::new(k.to_string()))
    }

    ///Inserts a key-value pair. Returns the previous value, if the key was present.
    pub fn insert<T, U>(&mut self, key: &T, val: &U) -> Option<String>
    where
        T: ToString + ?Sized,
        U: ToString + ?Sized,
    {
        self.0.insert(Ascii::new(key.to_string()), val.to_string())
    }

    ///Removes a key from the map, returning its value if it was present.
    pub fn remove<T: ToString + ?Sized>(&mut self, key: &T) -> Option<String> {
        self.0.remove(&Ascii::new(key.to_string()))
    }

    ///Returns the number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    ///Checks if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl str::FromStr for Headers {
    type Err = ParseErr;

    fn from_str(s: &str) -> Result<Headers, ParseErr> {
        let mut headers = Headers::new();

        for line in s.lines().take_while(|l| !l.is_empty()) {
            let (key, value) = line.split_once(':').ok_or(ParseErr::HeadersErr)?;
            let key = key.trim();

            if key.is_empty() {
                return Err(ParseErr::HeadersErr);
            }

            headers.insert(key, value.trim());
        }

        Ok(headers)
    }
}
