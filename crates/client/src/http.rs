//! HTTP client wrapper around [`reqwest`].
//!
//! [`ApiClient`] owns the base URL, the bearer token, and a loading flag
//! that is `true` strictly between request dispatch and settlement of the
//! most recently issued call. All concurrent calls funnel through the one
//! flag, so an early settlement can hide a still-outstanding sibling —
//! callers that need independent indicators track their own flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Fallback surfaced when a failure carries no server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The uniform `{result, data, message}` wrapper used by every API call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub result: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// serde default helper; `Option::<T>::default` needs `T: Default`
/// through the derive, which the payload type may not have.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// A synthesized API-level failure (used for non-2xx responses whose
    /// body is not an envelope).
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: false,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    /// The message to surface to the user: the server's `message`, then
    /// `error`, then the generic fallback.
    pub fn surface_message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
    }
}

/// Decode a response body into an envelope.
///
/// Non-2xx responses that do not parse as an envelope are synthesized
/// into an API-level failure carrying the HTTP status; a 2xx body that is
/// not an envelope is a decoding error.
fn decode_envelope<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<Envelope<T>, ClientError> {
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Ok(Envelope::failure(format!("HTTP {status}"))),
        Err(err) => Err(ClientError::Decode(err)),
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP client for the UTE Zone REST API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    loading: AtomicBool,
}

impl ApiClient {
    /// Create a client for the given base URL, e.g.
    /// `http://localhost:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (connection pooling across components).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            token: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// Attach a bearer token to every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Whether the most recently issued call is still in flight.
    pub fn loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    // ---- envelope endpoints ----

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Envelope<T>, ClientError> {
        let builder = self.client.get(self.url(path)).query(query);
        self.send(builder).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ClientError> {
        let builder = self.client.post(self.url(path)).json(body);
        self.send(builder).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ClientError> {
        let builder = self.client.put(self.url(path)).json(body);
        self.send(builder).await
    }

    /// `PUT` with no request body (mark-read style endpoints).
    pub async fn put_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, ClientError> {
        let builder = self.client.put(self.url(path));
        self.send(builder).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, ClientError> {
        let builder = self.client.delete(self.url(path));
        self.send(builder).await
    }

    /// `POST` a multipart form (document upload).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<Envelope<T>, ClientError> {
        let builder = self.client.post(self.url(path)).multipart(form);
        self.send(builder).await
    }

    // ---- non-envelope endpoints ----

    /// `GET` an endpoint that returns a bare JSON body instead of the
    /// envelope (the chatbot-documents listing).
    pub async fn get_plain<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let builder = self.client.get(self.url(path)).query(query);
        let body = self.send_raw(builder).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `DELETE` an endpoint whose response body carries nothing useful.
    pub async fn delete_plain(&self, path: &str) -> Result<(), ClientError> {
        let builder = self.client.delete(self.url(path));
        self.send_raw(builder).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Dispatch with the loading flag held across the await.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.dispatch(builder).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_envelope(status, &body)
    }

    /// Like [`send`](Self::send) but fails on non-2xx instead of
    /// synthesizing an envelope.
    async fn send_raw(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, ClientError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.dispatch_raw(builder).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn dispatch_raw(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    // -- decode_envelope -----------------------------------------------------

    #[test]
    fn success_envelope_decodes() {
        let body = br#"{"result":true,"data":{"value":7}}"#;
        let env: Envelope<serde_json::Value> =
            decode_envelope(StatusCode::OK, body).unwrap();
        assert!(env.result);
        assert_eq!(env.data.unwrap()["value"], 7);
    }

    #[test]
    fn failure_envelope_keeps_server_message() {
        let body = br#"{"result":false,"message":"forbidden"}"#;
        let env: Envelope<serde_json::Value> =
            decode_envelope(StatusCode::FORBIDDEN, body).unwrap();
        assert!(!env.result);
        assert_eq!(env.surface_message(), "forbidden");
    }

    #[test]
    fn non_envelope_error_body_synthesizes_failure() {
        let body = b"<html>502 Bad Gateway</html>";
        let env: Envelope<serde_json::Value> =
            decode_envelope(StatusCode::BAD_GATEWAY, body).unwrap();
        assert!(!env.result);
        assert!(env.surface_message().contains("502"));
    }

    #[test]
    fn non_envelope_success_body_is_a_decode_error() {
        let body = br#"{"content":[]}"#;
        let result: Result<Envelope<serde_json::Value>, _> =
            decode_envelope(StatusCode::OK, body);
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    // -- surface_message -----------------------------------------------------

    #[test]
    fn surface_message_prefers_message_then_error_then_fallback() {
        let both: Envelope<()> = Envelope {
            result: false,
            data: None,
            message: Some("msg".to_string()),
            error: Some("err".to_string()),
        };
        assert_eq!(both.surface_message(), "msg");

        let only_error: Envelope<()> = Envelope {
            result: false,
            data: None,
            message: None,
            error: Some("err".to_string()),
        };
        assert_eq!(only_error.surface_message(), "err");

        let bare: Envelope<()> = Envelope {
            result: false,
            data: None,
            message: None,
            error: None,
        };
        assert_eq!(bare.surface_message(), GENERIC_FAILURE_MESSAGE);
    }

    // -- ApiClient plumbing --------------------------------------------------

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let client = ApiClient::new("http://localhost:8080/api///");
        assert_eq!(client.url("/v1/post/list"), "http://localhost:8080/api/v1/post/list");
    }

    #[test]
    fn token_roundtrip() {
        let client = ApiClient::new("http://localhost");
        assert_eq!(client.token(), None);
        client.set_token("abc123");
        assert_eq!(client.token().as_deref(), Some("abc123"));
        client.clear_token();
        assert_eq!(client.token(), None);
    }

    #[test]
    fn loading_starts_false() {
        let client = ApiClient::new("http://localhost");
        assert!(!client.loading());
    }

    // -- loading flag --------------------------------------------------------

    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// One-shot HTTP stub that holds its response until released.
    async fn stalling_server(
        body: &'static str,
        release: tokio::sync::oneshot::Receiver<()>,
    ) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = release.await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        addr
    }

    async fn wait_until_in_flight(client: &ApiClient) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !client.loading() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("request never entered flight");
    }

    #[tokio::test]
    async fn loading_is_true_while_a_request_is_pending() {
        let (release, gate) = tokio::sync::oneshot::channel();
        let addr = stalling_server(r#"{"result":true}"#, gate).await;

        let client = Arc::new(ApiClient::new(format!("http://{addr}")));
        let caller = Arc::clone(&client);
        let call =
            tokio::spawn(async move { caller.get::<serde_json::Value>("/v1/ping", &[]).await });

        wait_until_in_flight(&client).await;
        assert!(client.loading());

        release.send(()).unwrap();
        let envelope = call.await.unwrap().unwrap();
        assert!(envelope.result);
        assert!(!client.loading());
    }

    #[tokio::test]
    async fn loading_resets_after_a_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}"));
        let result = client.get::<serde_json::Value>("/v1/ping", &[]).await;
        assert!(matches!(result, Err(ClientError::Request(_))));
        assert!(!client.loading());
    }

    #[tokio::test]
    async fn loading_resets_after_a_raw_endpoint_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}"));
        let result = client.get_plain::<serde_json::Value>("/v1/ping", &[]).await;
        assert!(matches!(result, Err(ClientError::Request(_))));
        assert!(!client.loading());
    }
}
