#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One step of a scripted proxy conversation.
pub enum Step {
    /// Read exactly this many request bytes
    Expect(usize),
    /// Write these reply bytes
    Send(Vec<u8>),
    /// Stay silent for this long
    Stall(Duration),
    /// Stop sending; the client sees end of stream
    Hangup,
}

/// What the scripted proxy observed.
pub struct Exchange {
    pub received: Vec<u8>,
    /// The client closed its end after the script ran
    pub closed_by_client: bool,
}

pub struct ScriptedProxy {
    pub addr: SocketAddr,
    handle: JoinHandle<Exchange>,
}

impl ScriptedProxy {
    /// Accept one connection and play `script` against it.
    pub fn spawn(script: Vec<Step>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind scripted proxy");
        let addr = listener.local_addr().expect("scripted proxy address");

        let handle = thread::spawn(move || {
            let (mut conn, _) = listener.accept().expect("accept tunnel client");
            conn.set_read_timeout(Some(Duration::from_secs(5)))
                .expect("set proxy read timeout");

            let mut received = Vec::new();
            for step in script {
                match step {
                    Step::Expect(count) => {
                        let mut buf = vec![0u8; count];
                        conn.read_exact(&mut buf).expect("read request bytes");
                        received.extend_from_slice(&buf);
                    }
                    Step::Send(bytes) => conn.write_all(&bytes).expect("write reply bytes"),
                    Step::Stall(duration) => thread::sleep(duration),
                    Step::Hangup => conn.shutdown(Shutdown::Write).expect("shut down proxy write side"),
                }
            }

            let mut probe = [0u8; 64];
            let closed_by_client = loop {
                match conn.read(&mut probe) {
                    Ok(0) => break true,
                    Ok(n) => received.extend_from_slice(&probe[..n]),
                    Err(_) => break false,
                }
            };

            Exchange {
                received,
                closed_by_client,
            }
        });

        Self { addr, handle }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn finish(self) -> Exchange {
        self.handle.join().expect("scripted proxy thread panicked")
    }
}
