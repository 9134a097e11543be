//! Skycoin Lite - WASM Bridge
//!
//! This crate exposes the Skycoin Lite core library to JavaScript as a
//! `SkycoinCipher` object on the global scope. Loading the module is enough;
//! no further setup is needed on the JavaScript side.
//!
//! The bridge logic in [`bridge`] is platform-agnostic and tested natively.
//! The JavaScript attachment is only compiled for `wasm32`.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init from './skycoin_lite_wasm.js';
//!
//! await init();
//!
//! const address = SkycoinCipher.generateAddress('my seed');
//! if (address.error) throw new Error(address.error);
//! console.log(address.address, address.nextSeed);
//!
//! const txn = SkycoinCipher.prepareTransaction(
//!     JSON.stringify([{ hash, secret }]),
//!     JSON.stringify([{ address: dest, coins: 1000000, hours: 1 }]),
//! );
//! ```

pub mod bridge;
mod error;
#[cfg(target_arch = "wasm32")]
pub mod host;
mod js_types;

pub use bridge::{
    CallArguments, Cipher, HostValue, LiteCipher, NAMESPACE, Namespace, Operation, register,
};
pub use error::*;
pub use js_types::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Set up logging and panic hooks.
#[cfg(target_arch = "wasm32")]
pub fn initialize() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Debug).ok();
    log::info!("Skycoin Lite bridge initialized");
}

/// Module entry point: register `SkycoinCipher` on the global scope and park.
///
/// The returned promise never resolves. Calls from JavaScript are serviced by
/// the registered handlers while it is pending.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    initialize();
    let attached = host::attach(register(LiteCipher))?;
    match attached.park().await {}
}
