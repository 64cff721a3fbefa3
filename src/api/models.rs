use serde::{Deserialize, Serialize};

/// Server-side identifier of a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub i64);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the user's document list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document_id: DocumentId,
    pub title: String,
}

/// Preview colour scheme, selects the stylesheet used for PDF export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub wants_to_be_remembered: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDocumentRequest<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveRequest<'a> {
    pub document_id: DocumentId,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DownloadRequest<'a> {
    pub html: &'a str,
    pub css: Theme,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadResponse {
    pub data: DownloadLink,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadLink {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecoveryRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecoveryCodeRequest<'a> {
    pub code: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_in_payload_shape() {
        let payload = LogInRequest {
            email: "ada@example.com",
            password: "hunter22",
            wants_to_be_remembered: true,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json.get("email").unwrap(), "ada@example.com");
        assert_eq!(json.get("password").unwrap(), "hunter22");
        assert_eq!(json.get("wants_to_be_remembered").unwrap(), true);
    }

    #[test]
    fn test_save_payload_uses_plain_document_id() {
        let payload = SaveRequest {
            document_id: DocumentId(42),
            text: "# notes",
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"document_id": 42, "text": "# notes"}));
    }

    #[test]
    fn test_download_payload_sends_theme_as_css() {
        let payload = DownloadRequest {
            html: "<h1>x</h1>",
            css: Theme::Light,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json.get("css").unwrap(), "light");
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_document_list_parses() {
        let list: Vec<DocumentSummary> = serde_json::from_str(
            r#"[{"document_id": 1, "title": "Algebra"}, {"document_id": 7, "title": "Rust"}]"#,
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].document_id, DocumentId(7));
        assert_eq!(list[1].title, "Rust");
    }

    #[test]
    fn test_download_response_parses() {
        let response: DownloadResponse =
            serde_json::from_str(r#"{"data": {"url": "https://cdn.example.com/a.pdf"}}"#)
                .unwrap();
        assert_eq!(response.data.url, "https://cdn.example.com/a.pdf");
    }
}
