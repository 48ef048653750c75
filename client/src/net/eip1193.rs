//! Browser bindings for the injected wallet (`window.ethereum`).
//!
//! SYSTEM CONTEXT
//! ==============
//! MetaMask and compatible extensions inject an EIP-1193 object whose
//! `request({ method, params })` returns a promise. Params and results cross
//! the JS boundary as JSON text so the rest of the crate only sees
//! `serde_json::Value`.
//!
//! ERROR HANDLING
//! ==============
//! Rejected promises carry `{ code, message }`; the code is classified by
//! [`RpcError::from_code`] so a dismissed prompt becomes `UserRejected`.

use std::time::Duration;

use contract::{Provider, RpcError};
use js_sys::{JSON, Promise, Reflect};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::controller::Notifier;

#[wasm_bindgen]
extern "C" {
    /// The injected EIP-1193 provider object.
    #[derive(Clone, Debug)]
    pub type Ethereum;

    #[wasm_bindgen(method, catch)]
    fn request(this: &Ethereum, args: &JsValue) -> Result<Promise, JsValue>;
}

/// [`Provider`] over the page's injected wallet.
#[derive(Clone, Debug)]
pub struct Eip1193Provider {
    ethereum: Ethereum,
}

impl Eip1193Provider {
    /// Locate `window.ethereum`.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Unavailable`] when no wallet extension is installed.
    pub fn detect() -> Result<Self, RpcError> {
        let window = web_sys::window().ok_or_else(|| RpcError::Unavailable("no window".to_owned()))?;
        let value = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|e| RpcError::Unavailable(describe(&e)))?;
        if value.is_undefined() || value.is_null() {
            return Err(RpcError::Unavailable("no injected wallet found".to_owned()));
        }
        Ok(Self { ethereum: value.unchecked_into() })
    }
}

impl Provider for Eip1193Provider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let args = serde_json::json!({ "method": method, "params": params });
        let args = JSON::parse(&args.to_string()).map_err(|e| RpcError::Transport(describe(&e)))?;
        let promise = self.ethereum.request(&args).map_err(error_from_js)?;
        let result = JsFuture::from(promise).await.map_err(error_from_js)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        let text: String = JSON::stringify(&result)
            .map_err(|e| RpcError::Transport(describe(&e)))?
            .into();
        serde_json::from_str(&text).map_err(|e| RpcError::InvalidResponse {
            method: "eip1193",
            reason: e.to_string(),
        })
    }

    async fn delay(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Shows notices with `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                leptos::logging::warn!("alert failed: {}", describe(&e));
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn error_from_js(err: JsValue) -> RpcError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64());
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| describe(&err));
    match code {
        Some(code) => RpcError::from_code(code as i64, message),
        None => RpcError::Transport(message),
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
