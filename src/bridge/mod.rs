//! Host Bridge
//!
//! The request surface the host UI layer reaches the lockdown core through:
//! - `check-default-launcher` -> bool
//! - `restart-to-home` -> acknowledgement
//! - `set-absorb-volume-keys {enabled}` -> acknowledgement
//!
//! Unknown method names are answered with `not_implemented`.

mod method;
mod transport;


pub use method::{
    BridgeHandler, BridgeMessage, BridgeMethod, KeyEventResult, MethodCall, MethodResult,
};
pub use transport::{LineTransport, ServeExit};
