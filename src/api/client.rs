use super::models::{
    CreateDocumentRequest, CreateUserRequest, DocumentId, DocumentSummary, DownloadRequest,
    DownloadResponse, LogInRequest, RecoveryCodeRequest, RecoveryRequest, SaveRequest, Theme,
};
use crate::infrastructure::page_origin;
use crate::session::DocumentSaver;
use crate::types::{PreviewError, Result, api_paths};
use futures::future::BoxFuture;
use reqwest::{Response, StatusCode};
use url::Url;

/// Client for the account, document, export and recovery endpoints served
/// next to the editor page.
///
/// The session cookie set by `log_in` is kept in the client's cookie store
/// and sent with every later request. None of the calls retry; a failure is
/// returned to the caller, carrying the server's message when there is one.
///
/// # Example
///
/// ```no_run
/// use live_preview::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = ApiClient::new("http://localhost:3000/")?;
/// api.log_in("ada@example.com", "correct horse 1", true).await?;
///
/// for document in api.fetch_documents().await? {
///     println!("{} {}", document.document_id, document.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the origin of `page_url`
    pub fn new(page_url: &str) -> Result<Self> {
        let base = page_origin(page_url)?;
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    /// Passes the response through if it has the expected status, otherwise
    /// turns its body into a [`PreviewError::Api`]
    async fn expect_status(response: Response, expected: StatusCode) -> Result<Response> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::debug!("{} answered {}: {}", expected, status, message);
        Err(PreviewError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn log_in(&self, email: &str, password: &str, remember: bool) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(api_paths::LOG_IN)?)
            .json(&LogInRequest {
                email,
                password,
                wants_to_be_remembered: remember,
            })
            .send()
            .await?;

        Self::expect_status(response, StatusCode::OK).await?;
        tracing::info!("Logged in as {}", email);
        Ok(())
    }

    pub async fn create_user(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(api_paths::CREATE_USER)?)
            .json(&CreateUserRequest { email, password })
            .send()
            .await?;

        Self::expect_status(response, StatusCode::CREATED).await?;
        tracing::info!("Created user {}", email);
        Ok(())
    }

    pub async fn log_out(&self) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(api_paths::LOG_OUT)?)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        Self::expect_status(response, StatusCode::OK).await?;
        Ok(())
    }

    /// Creates an empty document. The server's JSON answer is returned as-is.
    pub async fn create_document(&self, title: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(self.endpoint(api_paths::CREATE_DOCUMENT)?)
            .json(&CreateDocumentRequest { title })
            .send()
            .await?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_documents(&self) -> Result<Vec<DocumentSummary>> {
        let response = self
            .http
            .get(self.endpoint(api_paths::FETCH_DOCUMENTS)?)
            .send()
            .await?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    /// Stored markdown text of one document
    pub async fn fetch_content(&self, document_id: DocumentId) -> Result<String> {
        let response = self
            .http
            .get(self.endpoint(api_paths::FETCH_CONTENT)?)
            .query(&[("document_id", document_id.0)])
            .send()
            .await?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    pub async fn save(&self, document_id: DocumentId, text: &str) -> Result<()> {
        let response = self
            .http
            .put(self.endpoint(api_paths::SAVE)?)
            .json(&SaveRequest { document_id, text })
            .send()
            .await?;

        Self::expect_status(response, StatusCode::OK).await?;
        tracing::debug!("Saved document {} ({} bytes)", document_id, text.len());
        Ok(())
    }

    pub async fn delete_document(&self, document_id: DocumentId) -> Result<()> {
        let response = self
            .http
            .delete(self.endpoint(api_paths::DELETE_DOCUMENT)?)
            .query(&[("document_id", document_id.0)])
            .send()
            .await?;

        Self::expect_status(response, StatusCode::OK).await?;
        Ok(())
    }

    /// Requests a PDF export of the rendered preview; returns the download URL
    pub async fn download_pdf(&self, html: &str, theme: Theme) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint(api_paths::DOWNLOAD)?)
            .json(&DownloadRequest { html, css: theme })
            .send()
            .await?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        let body: DownloadResponse = response.json().await?;
        Ok(body.data.url)
    }

    pub async fn send_recovery(&self, email: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(api_paths::SEND_RECOVERY)?)
            .json(&RecoveryRequest { email })
            .send()
            .await?;

        Self::expect_status(response, StatusCode::OK).await?;
        Ok(())
    }

    pub async fn try_recovery_code(&self, code: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(api_paths::TRY_RECOVERY_CODE)?)
            .json(&RecoveryCodeRequest { code, password })
            .send()
            .await?;

        Self::expect_status(response, StatusCode::OK).await?;
        Ok(())
    }
}

impl DocumentSaver for ApiClient {
    fn save(&self, document_id: DocumentId, text: String) -> BoxFuture<'static, Result<()>> {
        let client = self.clone();
        Box::pin(async move { ApiClient::save(&client, document_id, &text).await })
    }
}
