//! Bridge method set and result encoding

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::BridgeError;
use crate::input::KeyEvent;

/// A named request from the host UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = arguments;
        self
    }
}

/// The enumerated method set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMethod {
    CheckDefaultLauncher,
    RestartToHome,
    SetAbsorbVolumeKeys { enabled: bool },
}

impl BridgeMethod {
    /// Resolve a call into a known method.
    ///
    /// Both the dashed request names and the camelCase names used by
    /// mobile host channels are accepted.
    pub fn parse(call: &MethodCall) -> Result<Self, BridgeError> {
        match call.method.as_str() {
            "check-default-launcher" | "isDefaultLauncher" => Ok(BridgeMethod::CheckDefaultLauncher),
            "restart-to-home" | "restartApp" => Ok(BridgeMethod::RestartToHome),
            "set-absorb-volume-keys" | "setAbsorbVolumeKeys" => {
                let enabled = match &call.arguments {
                    Value::Bool(enabled) => Some(*enabled),
                    Value::Object(map) => map.get("enabled").and_then(Value::as_bool),
                    _ => None,
                };
                enabled
                    .map(|enabled| BridgeMethod::SetAbsorbVolumeKeys { enabled })
                    .ok_or_else(|| BridgeError::InvalidArguments {
                        method: call.method.clone(),
                        reason: "expected boolean `enabled`".to_string(),
                    })
            }
            other => Err(BridgeError::NotImplemented {
                method: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BridgeMethod::CheckDefaultLauncher => "check-default-launcher",
            BridgeMethod::RestartToHome => "restart-to-home",
            BridgeMethod::SetAbsorbVolumeKeys { .. } => "set-absorb-volume-keys",
        }
    }
}

/// Reply to a method call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResult {
    Success { result: Value },
    Error { code: String, message: String },
    NotImplemented { method: String },
}

impl MethodResult {
    pub fn success(result: impl Into<Value>) -> Self {
        MethodResult::Success {
            result: result.into(),
        }
    }

    /// Acknowledgement with no payload
    pub fn ack() -> Self {
        MethodResult::Success { result: Value::Null }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResult::Success { .. })
    }
}

impl From<BridgeError> for MethodResult {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::NotImplemented { method } => MethodResult::NotImplemented { method },
            other => MethodResult::Error {
                code: other.code().to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// One inbound message on a bridge transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeMessage {
    MethodCall(MethodCall),
    KeyEvent(KeyEvent),
}

/// Reply to a delivered key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEventResult {
    pub consumed: bool,
}

/// Receiver side of the bridge
pub trait BridgeHandler {
    fn handle_method_call(&mut self, call: &MethodCall) -> MethodResult;

    /// Deliver a key event; returns whether it was consumed
    fn dispatch_key_event(&mut self, event: &KeyEvent) -> bool;

    /// Whether the receiving instance has ended
    fn is_finished(&self) -> bool;
}
