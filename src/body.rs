//! response body and its release
use crate::stream::Stream;
use log::{debug, warn};
use std::io::{self, BufReader, Read};

/// Body of a response, which owns the connection it is read from.
///
/// The connection is released once: either by an explicit [`Body::close`] or,
/// if that never happens, when the body is dropped. A released body reads as
/// empty.
#[derive(Debug)]
pub struct Body {
    reader: Option<BufReader<Stream>>,
}

impl Body {
    /// Creates a `Body` reading from `reader`. Bytes already buffered
    /// by the reader are returned first.
    pub fn new(reader: BufReader<Stream>) -> Body {
        Body {
            reader: Some(reader),
        }
    }

    /// Releases the underlying connection. Subsequent calls do nothing.
    pub fn close(&mut self) -> io::Result<()> {
        match self.reader.take() {
            Some(reader) => {
                debug!("releasing response body");
                reader.into_inner().shutdown()
            }
            None => Ok(()),
        }
    }

    /// Checks if the underlying connection has been released.
    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read(buf),
            None => Ok(0),
        }
    }
}

impl Drop for Body {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to release response body: {}", e);
        }
    }
}
