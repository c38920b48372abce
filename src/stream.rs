//! TCP stream
use crate::{
    error::{Error, ParseErr},
    uri::Uri,
};
use log::debug;
use std::{
    io::{self, Read, Write},
    net::{Shutdown, TcpStream},
};

/// Wrapper around TCP stream for HTTP and HTTPS protocols.
#[derive(Debug)]
pub enum Stream {
    Http(TcpStream),
    #[cfg(feature = "native-tls")]
    Https(native_tls::TlsStream<TcpStream>),
}

impl Stream {
    /// Opens a connection to the host `uri` points to.
    ///
    /// Makes a single attempt and blocks until it succeeds or fails. For `https`
    /// the connection is wrapped with TLS before it is returned.
    pub fn connect(uri: &Uri) -> Result<Stream, Error> {
        let secure = match uri.scheme() {
            "http" => false,
            "https" if cfg!(feature = "native-tls") => true,
            "https" => return Err(Error::TlsUnavailable),
            _ => return Err(Error::Parse(ParseErr::UriErr)),
        };

        let host = uri.host().ok_or(ParseErr::UriErr)?;
        let port = uri.corr_port();

        debug!("connecting to {}:{}", host, port);
        let stream = TcpStream::connect((host, port))?;

        if secure {
            Self::try_to_https(host, stream)
        } else {
            Ok(Stream::Http(stream))
        }
    }

    #[cfg(feature = "native-tls")]
    fn try_to_https(host: &str, stream: TcpStream) -> Result<Stream, Error> {
        let connector = native_tls::TlsConnector::new()?;
        let stream = connector.connect(host, stream)?;

        debug!("TLS session established with {}", host);
        Ok(Stream::Https(stream))
    }

    #[cfg(not(feature = "native-tls"))]
    fn try_to_https(_host: &str, _stream: TcpStream) -> Result<Stream, Error> {
        Err(Error::TlsUnavailable)
    }

    /// Closes both directions of the connection.
    ///
    /// A peer which has already gone away is not treated as an error.
    pub fn shutdown(&mut self) -> io::Result<()> {
        let res = match self {
            Stream::Http(stream) => stream.shutdown(Shutdown::Both),
            #[cfg(feature = "native-tls")]
            Stream::Https(stream) => stream
                .shutdown()
                .and_then(|_| stream.get_ref().shutdown(Shutdown::Both)),
        };

        match res {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        match self {
            Stream::Http(stream) => stream.read(buf),
            #[cfg(feature = "native-tls")]
            Stream::Https(stream) => stream.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> Result<usize, io::Error> {
        match self {
            Stream::Http(stream) => stream.write(buf),
            #[cfg(feature = "native-tls")]
            Stream::Https(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        match self {
            Stream::Http(stream) => stream.flush(),
            #[cfg(feature = "native-tls")]
            Stream::Https(stream) => stream.flush(),
        }
    }
}
