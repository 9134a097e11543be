//! JavaScript attachment of the bridge namespace.

use crate::bridge::{CallArguments, Cipher, HostValue, Namespace, Operation};
use crate::js_types::Response;
use js_sys::{Object, Reflect};
use std::convert::Infallible;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

/// Serialize a value to JsValue as a plain object (not a Map).
fn to_js_value<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Build `{ error: message }` without going through serde.
fn error_object(message: &str) -> JsValue {
    let object = Object::new();
    // Setting a property on a fresh plain object cannot fail.
    let _ = Reflect::set(&object, &JsValue::from_str("error"), &JsValue::from_str(message));
    object.into()
}

/// Marshal one JavaScript argument.
pub fn to_host_value(value: &JsValue) -> HostValue {
    if value.is_undefined() || value.is_null() {
        HostValue::Absent
    } else if let Some(s) = value.as_string() {
        HostValue::Text(s)
    } else {
        HostValue::Other(value.js_typeof().as_string().unwrap_or_default())
    }
}

/// Convert a bridge response into the value handed back to JavaScript.
pub fn response_to_js(response: &Response) -> JsValue {
    match response {
        Response::Transaction(txn) => JsValue::from_str(txn),
        other => to_js_value(other).unwrap_or_else(|e| {
            let message = e.as_string().unwrap_or_else(|| "Serialization error".to_string());
            error_object(&message)
        }),
    }
}

fn dispatch<C: Cipher>(namespace: &Namespace<C>, op: Operation, values: &[JsValue]) -> JsValue {
    let args: CallArguments = values.iter().map(to_host_value).collect();
    response_to_js(&namespace.invoke(op, &args))
}

/// A JavaScript function wrapping one operation.
enum Handler {
    Unary(Closure<dyn Fn(JsValue) -> JsValue>),
    Binary(Closure<dyn Fn(JsValue, JsValue) -> JsValue>),
}

impl Handler {
    fn new<C: Cipher + 'static>(namespace: Rc<Namespace<C>>, op: Operation) -> Self {
        match op {
            Operation::GenerateAddress => Handler::Unary(Closure::new(move |seed: JsValue| {
                dispatch(&namespace, op, &[seed])
            })),
            Operation::PrepareTransaction => {
                Handler::Binary(Closure::new(move |inputs: JsValue, outputs: JsValue| {
                    dispatch(&namespace, op, &[inputs, outputs])
                }))
            }
        }
    }

    fn as_js(&self) -> &JsValue {
        match self {
            Handler::Unary(closure) => closure.as_ref(),
            Handler::Binary(closure) => closure.as_ref(),
        }
    }
}

/// The namespace object installed on `globalThis`, with the closures backing it.
///
/// Dropping this invalidates the JavaScript functions, so it is kept alive by
/// [`AttachedNamespace::park`] for the lifetime of the module.
pub struct AttachedNamespace {
    handlers: Vec<Handler>,
}

impl AttachedNamespace {
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Wait forever, holding the handlers.
    ///
    /// JavaScript keeps calling into the handlers while this future is pending.
    /// Only tearing down the module instance ends it.
    pub async fn park(self) -> Infallible {
        let _attached = self;
        std::future::pending().await
    }
}

/// Install `namespace` on the JavaScript global scope under its identifier.
pub fn attach<C: Cipher + 'static>(namespace: Namespace<C>) -> Result<AttachedNamespace, JsValue> {
    let name = namespace.name();
    let namespace = Rc::new(namespace);
    let object = Object::new();

    let mut handlers = Vec::with_capacity(namespace.operations().len());
    for &op in namespace.operations() {
        let handler = Handler::new(Rc::clone(&namespace), op);
        Reflect::set(&object, &JsValue::from_str(op.js_name()), handler.as_js())?;
        handlers.push(handler);
    }

    Reflect::set(&js_sys::global(), &JsValue::from_str(name), &object)?;
    log::info!("Registered {} with {} operations", name, handlers.len());

    Ok(AttachedNamespace { handlers })
}
