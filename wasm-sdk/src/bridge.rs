//! Call bridge between JavaScript callers and the core library.
//!
//! Every operation validates its arguments, delegates to a [`Cipher`] inside a
//! protected scope and always produces a [`Response`]. Collaborator errors come
//! back as `{ error }` values.
//!
//! Panics are only caught on unwinding targets. `wasm32-unknown-unknown` aborts
//! on panic, so the core library reports every expected fault (empty seed, bad
//! JSON, bad hex, bad address) as an `Err` rather than panicking.
//!
//! This half of the bridge is platform-agnostic; the JavaScript attachment
//! lives in `host` and is only compiled for WASM.

use crate::error::{BridgeError, ErrorResult};
use crate::js_types::Response;
use skycoin_lite_core::{AddressEntry, liteclient};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Identifier of the namespace object attached to the JavaScript global scope.
pub const NAMESPACE: &str = "SkycoinCipher";

/// One marshalled JavaScript argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    /// `undefined`, `null` or not passed at all.
    Absent,
    Text(String),
    /// Any other value; holds its `typeof`.
    Other(String),
}

impl HostValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, HostValue::Absent)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Text(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Text(s)
    }
}

/// Positional arguments of a bridge call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArguments(Vec<HostValue>);

impl CallArguments {
    pub fn new(values: Vec<HostValue>) -> Self {
        Self(values)
    }

    /// Whether the first `arity` positions all carry a value.
    pub fn supplies(&self, arity: usize) -> bool {
        self.0.len() >= arity && self.0[..arity].iter().all(HostValue::is_present)
    }

    /// The string at `index`, or an error naming `param`.
    pub fn text(&self, index: usize, param: &'static str) -> Result<&str, BridgeError> {
        match self.0.get(index) {
            Some(HostValue::Text(s)) => Ok(s),
            Some(HostValue::Other(found)) => Err(BridgeError::NotAString {
                param,
                found: found.clone(),
            }),
            Some(HostValue::Absent) | None => Err(BridgeError::NotAString {
                param,
                found: "undefined".to_string(),
            }),
        }
    }
}

impl FromIterator<HostValue> for CallArguments {
    fn from_iter<I: IntoIterator<Item = HostValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The cryptographic operations the bridge delegates to.
pub trait Cipher {
    fn generate_address(&self, seed: &str) -> skycoin_lite_core::Result<AddressEntry>;

    fn prepare_transaction(
        &self,
        inputs_json: &str,
        outputs_json: &str,
    ) -> skycoin_lite_core::Result<String>;
}

/// [`Cipher`] backed by `skycoin_lite_core::liteclient`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteCipher;

impl Cipher for LiteCipher {
    fn generate_address(&self, seed: &str) -> skycoin_lite_core::Result<AddressEntry> {
        liteclient::generate_address(seed)
    }

    fn prepare_transaction(
        &self,
        inputs_json: &str,
        outputs_json: &str,
    ) -> skycoin_lite_core::Result<String> {
        liteclient::prepare_transaction(inputs_json, outputs_json)
    }
}

/// Operations exposed on the namespace object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GenerateAddress,
    PrepareTransaction,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::GenerateAddress, Operation::PrepareTransaction];

    /// Member name on the namespace object.
    pub fn js_name(self) -> &'static str {
        match self {
            Operation::GenerateAddress => "generateAddress",
            Operation::PrepareTransaction => "prepareTransaction",
        }
    }

    pub fn from_js_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.js_name() == name)
    }

    /// Parameter names, in call order.
    pub fn params(self) -> &'static [&'static str] {
        match self {
            Operation::GenerateAddress => &["seed"],
            Operation::PrepareTransaction => &["inputs", "outputs"],
        }
    }

    pub fn arity(self) -> usize {
        self.params().len()
    }

    pub fn missing_message(self) -> &'static str {
        match self {
            Operation::GenerateAddress => "seed parameter required",
            Operation::PrepareTransaction => "inputs and outputs parameters required",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.js_name())
    }
}

/// Run a collaborator call, turning its error into [`BridgeError::Collaborator`].
///
/// Panics are converted too where the target unwinds. Under `panic=abort` a
/// panic still ends the module.
pub fn protect<T, F>(op: Operation, f: F) -> Result<T, BridgeError>
where
    F: FnOnce() -> skycoin_lite_core::Result<T>,
{
    let message = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    if message.trim().is_empty() {
        Err(BridgeError::Collaborator(format!("{} failed", op)))
    } else {
        Err(BridgeError::Collaborator(message))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Registration descriptor: the namespace identifier and its bound operations.
///
/// Produced by [`register`]; the host layer attaches it to the JavaScript
/// global scope in a single step.
#[derive(Debug, Clone)]
pub struct Namespace<C> {
    cipher: C,
}

/// Bind the bridge operations to `cipher`.
pub fn register<C: Cipher>(cipher: C) -> Namespace<C> {
    Namespace { cipher }
}

impl<C: Cipher> Namespace<C> {
    pub fn name(&self) -> &'static str {
        NAMESPACE
    }

    pub fn operations(&self) -> &'static [Operation] {
        &Operation::ALL
    }

    /// Dispatch by member name. `None` if no such operation is registered.
    pub fn call(&self, js_name: &str, args: &CallArguments) -> Option<Response> {
        Operation::from_js_name(js_name).map(|op| self.invoke(op, args))
    }

    /// Service one call. Never panics on collaborator faults.
    pub fn invoke(&self, op: Operation, args: &CallArguments) -> Response {
        match self.try_invoke(op, args) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("{} failed: {}", op, err);
                Response::Error(ErrorResult::from(err))
            }
        }
    }

    fn try_invoke(&self, op: Operation, args: &CallArguments) -> Result<Response, BridgeError> {
        if !args.supplies(op.arity()) {
            return Err(BridgeError::MissingArguments(op.missing_message()));
        }

        match op {
            Operation::GenerateAddress => {
                let seed = args.text(0, "seed")?;
                let entry = protect(op, || self.cipher.generate_address(seed))?;
                Ok(Response::Address(entry.into()))
            }
            Operation::PrepareTransaction => {
                let inputs = args.text(0, "inputs")?;
                let outputs = args.text(1, "outputs")?;
                let txn = protect(op, || self.cipher.prepare_transaction(inputs, outputs))?;
                Ok(Response::Transaction(txn))
            }
        }
    }
}
