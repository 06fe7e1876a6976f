use alloy_primitives::{hex, Address};
use async_trait::async_trait;
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::RpcError;

/// A single view-only contract call.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Vec<u8>,
}

/// Transport capable of executing view-only calls against the chain.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Executes the call against latest state and returns the raw return data.
    async fn eth_call(&self, call: CallRequest) -> Result<Vec<u8>, RpcError>;
}

#[async_trait]
impl<T: ContractCaller + ?Sized> ContractCaller for std::sync::Arc<T> {
    async fn eth_call(&self, call: CallRequest) -> Result<Vec<u8>, RpcError> {
        (**self).eth_call(call).await
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcErrorObject>,
}

/// JSON-RPC client holding a primary endpoint and a secondary fallback.
pub struct EthRpcClient {
    http: reqwest::Client,
    primary_rpc: String,
    secondary_rpc: String,
}

impl EthRpcClient {
    pub fn connect(primary_rpc: &str, secondary_rpc: &str) -> Self {
        info!("Connecting to chain RPC...");
        let client = Self {
            http: reqwest::Client::new(),
            primary_rpc: primary_rpc.to_string(),
            secondary_rpc: secondary_rpc.to_string(),
        };
        info!("Chain RPC connections established");
        client
    }

    /// Returns the latest block number known to the node.
    pub async fn latest_block_number(&self) -> Result<u64, RpcError> {
        let result = self.request("eth_blockNumber", json!([])).await?;
        let quantity = result.as_str().ok_or_else(|| {
            RpcError::InvalidResponse("eth_blockNumber result is not a string".to_string())
        })?;
        parse_quantity(quantity)
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        info!("Querying RPC: {}", method);
        match self
            .request_endpoint(&self.primary_rpc, method, &params)
            .await
        {
            Ok(result) => {
                info!("RPC query successful on primary: {}", method);
                Ok(result)
            }
            Err(_) => {
                warn!("Primary RPC failed, trying secondary");
                match self
                    .request_endpoint(&self.secondary_rpc, method, &params)
                    .await
                {
                    Ok(result) => {
                        info!("RPC query successful on secondary: {}", method);
                        Ok(result)
                    }
                    Err(e) => {
                        error!("Both RPCs failed: {:?}", e);
                        Err(e)
                    }
                }
            }
        }
    }

    async fn request_endpoint(
        &self,
        endpoint: &str,
        method: &str,
        params: &Value,
    ) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: JsonRpcResponse = self
            .http
            .post(endpoint)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(RpcError::Node {
                code: err.code,
                message: err.message,
            });
        }

        response.result.ok_or_else(|| {
            RpcError::InvalidResponse("response carries neither result nor error".to_string())
        })
    }
}

#[async_trait]
impl ContractCaller for EthRpcClient {
    async fn eth_call(&self, call: CallRequest) -> Result<Vec<u8>, RpcError> {
        let result = self.request("eth_call", call_params(&call)).await?;
        let data = result.as_str().ok_or_else(|| {
            RpcError::InvalidResponse("eth_call result is not a string".to_string())
        })?;
        hex::decode(data)
            .map_err(|e| RpcError::InvalidResponse(format!("bad call return data: {}", e)))
    }
}

fn call_params(call: &CallRequest) -> Value {
    let mut msg = json!({
        "to": call.to.to_string(),
        "data": hex::encode_prefixed(&call.data),
    });
    if let Some(from) = call.from {
        msg["from"] = Value::String(from.to_string());
    }
    json!([msg, "latest"])
}

fn parse_quantity(quantity: &str) -> Result<u64, RpcError> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("bad quantity {}: {}", quantity, e)))
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use super::*;

    // nothing listens on port 1, connections are refused immediately
    const UNREACHABLE: &str = "http://127.0.0.1:1";

    async fn read_request(socket: &mut TcpStream) {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            data.extend_from_slice(&buf[..n]);
            if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&data[..pos]).to_ascii_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= pos + 4 + body_len {
                    break;
                }
            }
        }
    }

    /// Serves the given JSON body to every connection on a fresh local port.
    async fn serve_json(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        format!("http://{}", addr)
    }

    fn sample_call() -> CallRequest {
        CallRequest {
            from: None,
            to: "0x1111111111111111111111111111111111111111"
                .parse()
                .unwrap(),
            data: vec![0x01],
        }
    }

    #[tokio::test]
    async fn failure_on_both_endpoints_surfaces_as_transport_error() {
        let client = EthRpcClient::connect(UNREACHABLE, UNREACHABLE);
        let result = client.eth_call(sample_call()).await;
        assert!(matches!(result, Err(RpcError::Transport(_))));
    }

    #[tokio::test]
    async fn node_error_objects_map_to_node_errors() {
        let endpoint = serve_json(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .await;
        let client = EthRpcClient::connect(&endpoint, &endpoint);
        let result = client.eth_call(sample_call()).await;
        assert!(matches!(
            result,
            Err(RpcError::Node { code: -32000, ref message }) if message.as_str() == "execution reverted"
        ));
    }

    #[tokio::test]
    async fn envelope_without_result_or_error_maps_to_invalid_response() {
        let endpoint = serve_json(r#"{"jsonrpc":"2.0","id":1}"#).await;
        let client = EthRpcClient::connect(&endpoint, &endpoint);
        let result = client.eth_call(sample_call()).await;
        assert!(matches!(result, Err(RpcError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn primary_failure_falls_through_to_the_secondary() {
        let endpoint = serve_json(r#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#).await;
        let client = EthRpcClient::connect(UNREACHABLE, &endpoint);
        assert_eq!(client.latest_block_number().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn eth_call_decodes_the_hex_payload() {
        let endpoint = serve_json(r#"{"jsonrpc":"2.0","id":1,"result":"0xdeadbeef"}"#).await;
        let client = EthRpcClient::connect(&endpoint, UNREACHABLE);
        let data = client.eth_call(sample_call()).await.unwrap();
        assert_eq!(data, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn quantities_parse_with_and_without_prefix() {
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0x10").unwrap(), 16);
        assert_eq!(parse_quantity("ff").unwrap(), 255);
        assert!(parse_quantity("0xzz").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn call_params_include_from_only_when_present() {
        let to: Address = "0x1111111111111111111111111111111111111111"
            .parse()
            .unwrap();
        let from: Address = "0x2222222222222222222222222222222222222222"
            .parse()
            .unwrap();

        let params = call_params(&CallRequest {
            from: None,
            to,
            data: vec![0xde, 0xad],
        });
        assert_eq!(params[1], "latest");
        assert_eq!(params[0]["data"], "0xdead");
        assert!(params[0].get("from").is_none());

        let params = call_params(&CallRequest {
            from: Some(from),
            to,
            data: vec![],
        });
        assert_eq!(
            params[0]["from"],
            "0x2222222222222222222222222222222222222222"
        );
    }
}
