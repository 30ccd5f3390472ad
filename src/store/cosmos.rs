use super::{SessionStore, StoreError};
use crate::session::Session;
use anyhow::{anyhow, Context, Result};
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, StatusCode};
use sha2::Sha256;
use tracing::{debug, info};

const API_VERSION: &str = "2018-12-31";

type HmacSha256 = Hmac<Sha256>;

/// Cosmos DB SQL API client scoped to one database
pub struct CosmosStore {
    client: Client,
    endpoint: String,
    database: String,
    key: Vec<u8>,
}

impl CosmosStore {
    /// `master_key` is the base64 account key from the Azure portal
    pub fn new(endpoint: &str, master_key: &str, database: &str) -> Result<Self> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(master_key.trim())
            .context("Cosmos key is not valid base64")?;

        info!("Using Cosmos DB at {} (database {})", endpoint, database);

        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            database: database.to_string(),
            key,
        })
    }

    fn collection_link(&self, container: &str) -> String {
        format!("dbs/{}/colls/{}", self.database, container)
    }

    fn document_link(&self, container: &str, id: &str) -> String {
        format!("{}/docs/{}", self.collection_link(container), id)
    }

    /// URL path and signed resource link for a request. The signature covers
    /// the unescaped link; only the path is percent-encoded.
    fn resource(&self, container: &str, id: Option<&str>) -> (String, String) {
        let (path, link) = match id {
            Some(id) => {
                let link = self.document_link(container, id);
                (link.clone(), link)
            }
            None => {
                let link = self.collection_link(container);
                (format!("{}/docs", link), link)
            }
        };

        let path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        (path, link)
    }

    /// Master-key authorization token for one request
    fn authorization(
        &self,
        verb: &Method,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.as_str().to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| anyhow!("Invalid Cosmos key: {}", e))?;
        mac.update(payload.as_bytes());
        let signature =
            base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={}", signature)).into_owned())
    }

    /// Issue one document request. `id` is `None` when posting to the
    /// collection's document feed.
    async fn send(
        &self,
        method: Method,
        container: &str,
        id: Option<&str>,
        partition_key: &str,
        if_match: Option<&str>,
        body: Option<&Session>,
    ) -> Result<Session> {
        let (url_path, resource_link) = self.resource(container, id);

        let date = chrono::Utc::now()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();
        let token = self.authorization(&method, "docs", &resource_link, &date)?;
        let url = format!("{}/{}", self.endpoint, url_path);

        debug!("Cosmos {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("authorization", token)
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header(
                "x-ms-documentdb-partitionkey",
                serde_json::to_string(&[partition_key])?,
            );

        if let Some(etag) = if_match {
            request = request.header("if-match", etag);
        }
        if let Some(session) = body {
            request = request.json(session);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Cosmos request to {} failed", url))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Session>()
                .await
                .context("Failed to parse Cosmos document");
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound {
                container: container.to_string(),
                id: id.unwrap_or_default().to_string(),
            },
            StatusCode::PRECONDITION_FAILED => StoreError::Conflict {
                id: id.unwrap_or_default().to_string(),
            },
            _ => StoreError::Service {
                status: status.as_u16(),
                body,
            },
        }
        .into())
    }
}

#[async_trait::async_trait]
impl SessionStore for CosmosStore {
    async fn create(&self, container: &str, mut session: Session) -> Result<Session> {
        if session.id.is_none() {
            session.id = Some(uuid::Uuid::new_v4().to_string());
        }

        self.send(
            Method::POST,
            container,
            None,
            &session.session_id,
            None,
            Some(&session),
        )
        .await
    }

    async fn read(&self, container: &str, id: &str, partition_key: &str) -> Result<Session> {
        self.send(Method::GET, container, Some(id), partition_key, None, None)
            .await
    }

    async fn replace(&self, container: &str, session: Session) -> Result<Session> {
        let id = session.id.as_deref().ok_or(StoreError::MissingId)?;
        self.send(
            Method::PUT,
            container,
            Some(id),
            &session.session_id,
            session.etag.as_deref(),
            Some(&session),
        )
        .await
    }

    fn name(&self) -> &str {
        "cosmos"
    }
}
