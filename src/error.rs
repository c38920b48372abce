//! error system used around the crate.
use std::{error, fmt, io, num};

#[derive(Debug, PartialEq)]
pub enum ParseErr {
    Int(num::ParseIntError),
    StatusErr,
    HeadersErr,
    UriErr,
    Empty,
}

impl error::Error for ParseErr {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::ParseErr::*;

        match self {
            Int(e) => Some(e),
            StatusErr | HeadersErr | UriErr | Empty => None,
        }
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ParseErr::*;

        let err = match self {
            Int(_) => "Cannot parse number",
            Empty => "Nothing to parse",
            StatusErr => "Status line contains invalid values",
            HeadersErr => "Headers contain invalid values",
            UriErr => "URI contains invalid characters",
        };
        write!(f, "ParseErr: {}", err)
    }
}

impl From<num::ParseIntError> for ParseErr {
    fn from(e: num::ParseIntError) -> Self {
        ParseErr::Int(e)
    }
}

/// Failure of the single request: transport, malformed response or TLS.
#[derive(Debug)]
pub enum Error {
    IO(io::Error),
    Parse(ParseErr),
    #[cfg(feature = "native-tls")]
    Tls(native_tls::Error),
    TlsUnavailable,
}

impl Error {
    /// Returns kind of the underlying IO error, if there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::IO(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::Error::*;

        match self {
            IO(e) => Some(e),
            Parse(e) => Some(e),
            #[cfg(feature = "native-tls")]
            Tls(e) => Some(e),
            TlsUnavailable => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match self {
            IO(e) => write!(f, "Error: IO error: {}", e),
            Parse(e) => e.fmt(f),
            #[cfg(feature = "native-tls")]
            Tls(e) => write!(f, "Error: TLS error: {}", e),
            TlsUnavailable => write!(f, "Error: TLS support is not enabled"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IO(e)
    }
}

impl From<ParseErr> for Error {
    fn from(e: ParseErr) -> Self {
        Error::Parse(e)
    }
}

impl From<num::ParseIntError> for Error {
    fn from(e: num::ParseIntError) -> Self {
        Error::Parse(ParseErr::Int(e))
    }
}

#[cfg(feature = "native-tls")]
impl From<native_tls::Error> for Error {
    fn from(e: native_tls::Error) -> Self {
        Error::Tls(e)
    }
}

#[cfg(feature = "native-tls")]
impl<T> From<native_tls::HandshakeError<T>> for Error {
    fn from(e: native_tls::HandshakeError<T>) -> Self {
        match e {
            native_tls::HandshakeError::Failure(e) => Error::Tls(e),
            // blocking sockets never interrupt a handshake
            native_tls::HandshakeError::WouldBlock(_) => Error::IO(io::Error::new(
                io::ErrorKind::WouldBlock,
                "TLS handshake interrupted",
            )),
        }
    }
}
