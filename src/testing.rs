//! loopback server used by the tests
use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
    time::Duration,
};

const RELEASE_WAIT: Duration = Duration::from_secs(5);

/// What the server observed on its single connection.
pub struct Exchange {
    pub request: String,
    pub released: bool,
}

/// Server answering the first connection with a canned reply.
pub struct Server {
    listener: TcpListener,
    handle: JoinHandle<Exchange>,
    port: u16,
}

impl Server {
    /// Replies and then waits for the client to release the connection.
    pub fn reply(reply: &'static [u8]) -> Server {
        Server::start(reply, false)
    }

    /// Replies and closes the connection straight away.
    pub fn reply_and_hang_up(reply: &'static [u8]) -> Server {
        Server::start(reply, true)
    }

    fn start(reply: &'static [u8], hang_up: bool) -> Server {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let accepting = listener.try_clone().unwrap();

        let handle = thread::spawn(move || {
            let (conn, _) = accepting.accept().unwrap();
            conn.set_read_timeout(Some(RELEASE_WAIT)).unwrap();

            let mut reader = BufReader::new(conn);
            let mut request = String::new();

            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();

                let end = line.is_empty() || line == "\r\n";
                request.push_str(&line);

                if end {
                    break;
                }
            }

            reader.get_mut().write_all(reply).unwrap();

            if hang_up {
                return Exchange {
                    request,
                    released: true,
                };
            }

            // A client closing with unread bytes in its socket sends RST instead of FIN.
            let mut rest = Vec::new();
            let released = match reader.read_to_end(&mut rest) {
                Ok(_) => true,
                Err(e) => e.kind() == io::ErrorKind::ConnectionReset,
            };

            Exchange { request, released }
        });

        Server {
            listener,
            handle,
            port,
        }
    }

    pub fn uri(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// Waits for the exchange to end and checks no other connection was attempted.
    pub fn finish(self) -> Exchange {
        let exchange = self.handle.join().unwrap();

        self.listener.set_nonblocking(true).unwrap();
        match self.listener.accept() {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => (),
            Err(e) => panic!("unexpected accept error: {}", e),
            Ok((_, addr)) => panic!("unexpected second connection from {}", addr),
        }

        exchange
    }
}
