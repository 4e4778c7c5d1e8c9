//! Canopy client - minimal JSON-RPC over HTTP
//!
//! A run talks to the chain in exactly three places: the one
//! `proxyCreationCode()` read before the derivation pass, an optional
//! `eth_call` dry run of the packed batch, and an optional submission.
//! Nothing here retries or monitors; every transport or node failure
//! surfaces as a terminal [`CanopyError::ExternalRead`].

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{hex, Address, Bytes, B256};
use serde_json::{json, Value};

use canopy_codec::abi::decode_bytes_return;
use canopy_codec::factories::proxy_creation_code_call_data;
use canopy_core::error::{CanopyError, Result};

/// JSON-RPC client bound to one node URL
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = request_body(id, method, params);

        tracing::debug!(%method, id, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|err| CanopyError::external_read(format!("{method}: {err}")))?;
        let payload: Value = response
            .json()
            .await
            .map_err(|err| CanopyError::external_read(format!("{method}: {err}")))?;

        if let Some(error) = payload.get("error") {
            return Err(CanopyError::external_read(format!(
                "{method}: node returned {error}"
            )));
        }
        payload
            .get("result")
            .cloned()
            .ok_or_else(|| CanopyError::external_read(format!("{method}: response has no result")))
    }

    async fn request_hex(&self, method: &str, params: Value) -> Result<Vec<u8>> {
        let result = self.request(method, params).await?;
        let text = result
            .as_str()
            .ok_or_else(|| CanopyError::external_read(format!("{method}: result not a string")))?;
        hex::decode(text)
            .map_err(|err| CanopyError::external_read(format!("{method}: bad hex result: {err}")))
    }

    /// Read-only `eth_call` against `to`.
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        self.request_hex(
            "eth_call",
            json!([{ "to": to, "data": hex_bytes(data) }, "latest"]),
        )
        .await
    }

    /// Submit a transaction signed by the node-held `from` account.
    pub async fn send_transaction(&self, from: Address, to: Address, data: &[u8]) -> Result<B256> {
        let raw = self
            .request_hex(
                "eth_sendTransaction",
                json!([{ "from": from, "to": to, "data": hex_bytes(data) }]),
            )
            .await?;
        if raw.len() != 32 {
            return Err(CanopyError::external_read(format!(
                "eth_sendTransaction: expected a 32-byte hash, got {} bytes",
                raw.len()
            )));
        }
        Ok(B256::from_slice(&raw))
    }

    /// The one pre-derivation read: the account factory's proxy creation
    /// code. Not retried; a failure aborts the run.
    pub async fn proxy_creation_code(&self, factory: Address) -> Result<Bytes> {
        let returned = self
            .eth_call(factory, &proxy_creation_code_call_data())
            .await?;
        let code = decode_bytes_return(&returned)?;
        if code.is_empty() {
            return Err(CanopyError::external_read(
                "proxyCreationCode: factory returned empty creation code",
            ));
        }
        Ok(code.into())
    }
}

fn request_body(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

fn hex_bytes(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}
