//! Line-delimited JSON transport over any reader/writer pair.
//!
//! Each input line is one `BridgeMessage`; each produces exactly one output
//! line. The loop ends at EOF or once the handler has finished.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::bridge::{BridgeHandler, BridgeMessage, KeyEventResult, MethodResult};
use crate::core::error::{BridgeError, Result};

/// Why the serve loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeExit {
    EndOfInput,
    Finished,
}

pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Pump messages into `handler` until EOF or finish
    pub fn serve<H: BridgeHandler + ?Sized>(&mut self, handler: &mut H) -> Result<ServeExit> {
        let mut buf = Vec::new();

        loop {
            if handler.is_finished() {
                tracing::info!("Handler finished, closing bridge");
                return Ok(ServeExit::Finished);
            }

            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                tracing::info!("Bridge input closed");
                return Ok(ServeExit::EndOfInput);
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    self.reject(e.to_string())?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<BridgeMessage>(line) {
                Ok(BridgeMessage::MethodCall(call)) => {
                    let result = handler.handle_method_call(&call);
                    self.write_line(&result)?;
                }
                Ok(BridgeMessage::KeyEvent(event)) => {
                    let consumed = handler.dispatch_key_event(&event);
                    self.write_line(&KeyEventResult { consumed })?;
                }
                Err(e) => self.reject(e.to_string())?,
            }
        }
    }

    /// Answer an undecodable line without ending the session
    fn reject(&mut self, reason: String) -> Result<()> {
        tracing::warn!(%reason, "Malformed bridge message");
        let result: MethodResult = BridgeError::MalformedMessage { reason }.into();
        self.write_line(&result)
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value).map_err(std::io::Error::from)?;
        writeln!(self.writer, "{}", encoded)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
