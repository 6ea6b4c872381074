//! Admin session bootstrap.
//!
//! The access token lives in a plain file between runs. On startup the
//! stored token is verified against the API; a stale token is cleared
//! from both the store and the client so the caller can fall back to a
//! fresh login.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::http::{ApiClient, Envelope};
use crate::models::Profile;
use crate::ClientError;

// ---------------------------------------------------------------------------
// Token store
// ---------------------------------------------------------------------------

/// File-backed persistence for the admin access token.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, if any. A missing file is simply "no token".
    pub fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    /// Remove the stored token. Idempotent.
    pub fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Auth endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    access_token: String,
}

pub struct AuthApi;

impl AuthApi {
    /// Admin login. On success the token is attached to the client and
    /// returned for persistence.
    pub async fn login(
        api: &ApiClient,
        user: &str,
        password: &str,
    ) -> Result<Envelope<String>, ClientError> {
        let envelope: Envelope<LoginData> = api
            .post(
                "/v1/user/login-admin",
                &json!({ "user": user, "password": password }),
            )
            .await?;
        let Envelope {
            result,
            data,
            message,
            error,
        } = envelope;
        let token = data.map(|d| d.access_token);
        if let (true, Some(token)) = (result, token.as_deref()) {
            api.set_token(token);
        }
        Ok(Envelope {
            result,
            data: token,
            message,
            error,
        })
    }

    /// Check whether a token is still accepted by the server.
    pub async fn verify(
        api: &ApiClient,
        token: &str,
    ) -> Result<Envelope<serde_json::Value>, ClientError> {
        api.post("/v1/user/verify-token", &json!({ "accessToken": token }))
            .await
    }

    pub async fn profile(api: &ApiClient) -> Result<Envelope<Profile>, ClientError> {
        api.get("/v1/user/profile", &[]).await
    }

    /// Restore a persisted session: load the stored token, verify it,
    /// and fetch the profile. A rejected token is cleared everywhere and
    /// `None` is returned.
    pub async fn bootstrap(
        api: &ApiClient,
        store: &TokenStore,
    ) -> Result<Option<Profile>, ClientError> {
        let Some(token) = store.load()? else {
            debug!("no stored access token");
            return Ok(None);
        };
        let verified = Self::verify(api, &token).await?;
        if !verified.result {
            warn!("stored access token rejected, clearing");
            store.clear()?;
            api.clear_token();
            return Ok(None);
        }
        api.set_token(&token);
        let profile = Self::profile(api).await?;
        Ok(profile.data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- TokenStore ----------------------------------------------------------

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested/token"));
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn load_trims_whitespace_and_treats_blank_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  abc123\n").unwrap();
        let store = TokenStore::new(&path);
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));

        std::fs::write(&path, "   \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));
        store.save("abc").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    // -- LoginData -----------------------------------------------------------

    #[test]
    fn login_data_decodes_access_token() {
        let data: LoginData =
            serde_json::from_value(serde_json::json!({"accessToken": "jwt"})).unwrap();
        assert_eq!(data.access_token, "jwt");
    }

    // -- login ---------------------------------------------------------------

    /// One-shot HTTP stub returning a fixed JSON body.
    async fn stub_server(body: &'static str) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        addr
    }

    #[tokio::test]
    async fn successful_login_attaches_the_token() {
        let addr = stub_server(r#"{"result":true,"data":{"accessToken":"jwt-1"}}"#).await;
        let api = ApiClient::new(format!("http://{addr}"));

        let envelope = AuthApi::login(&api, "admin", "secret").await.unwrap();
        assert!(envelope.result);
        assert_eq!(envelope.data.as_deref(), Some("jwt-1"));
        assert_eq!(api.token().as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn failed_login_leaves_the_client_unauthenticated() {
        let addr = stub_server(r#"{"result":false,"message":"Wrong credentials"}"#).await;
        let api = ApiClient::new(format!("http://{addr}"));

        let envelope = AuthApi::login(&api, "admin", "wrong").await.unwrap();
        assert!(!envelope.result);
        assert_eq!(envelope.surface_message(), "Wrong credentials");
        assert_eq!(api.token(), None);
    }
}
