/* External collaborators of the conversation driver.
 * Production implementations live in `sheets` (options, ledger) and `drive` (files).
 */

use async_trait::async_trait;

use super::steps::OptionRange;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error {0}: {1}")]
    ApiError(u16, String),
    #[error("Telegram error: {0}")]
    TelegramError(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// Turns a non-success HTTP status into an API error carrying the response body.
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::ApiError(status.as_u16(), body))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Document {
        file_id: String,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
    // Largest size of the photo
    Photo { file_id: String },
}

impl Attachment {
    pub fn file_id(&self) -> &str {
        match self {
            Attachment::Document { file_id, .. } => file_id,
            Attachment::Photo { file_id } => file_id,
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            Attachment::Document {
                mime_type: Some(mime_type),
                ..
            } => mime_type,
            Attachment::Document { .. } => "application/octet-stream",
            Attachment::Photo { .. } => "image/jpeg",
        }
    }
}

// Row of the ledger, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTransaction {
    pub timestamp: String,
    pub username: String,
    pub date: String,
    pub flow: String,
    pub transaction_type: String,
    pub currency: String,
    pub wallet: String,
    pub amount: String,
    pub purpose: String,
    pub file_name: String,
}

impl CompletedTransaction {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.username.clone(),
            self.date.clone(),
            self.flow.clone(),
            self.transaction_type.clone(),
            self.currency.clone(),
            self.wallet.clone(),
            self.amount.clone(),
            self.purpose.clone(),
            self.file_name.clone(),
        ]
    }
}

#[async_trait]
pub trait OptionSource: Send + Sync {
    // Menu options of a range, in sheet order
    async fn options(&self, range: OptionRange) -> Result<Vec<String>, ServiceError>;

    // Classification of a transaction type. Empty when the type is not listed.
    async fn lookup(&self, key: &str) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait FileVault: Send + Sync {
    async fn store(&self, attachment: &Attachment, file_name: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait Ledger: Send + Sync {
    async fn append(&self, transaction: &CompletedTransaction) -> Result<(), ServiceError>;
}
