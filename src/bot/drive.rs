/* Attachment storage.
 * Files are downloaded from Telegram and uploaded into a Google Drive folder.
 */

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use teloxide::{net::Download, prelude::*};

use super::services::{check_response, Attachment, FileVault, ServiceError};

const DRIVE_UPLOAD_API: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";

#[derive(Clone)]
pub struct DriveVault {
    bot: Bot,
    http: Client,
    folder_id: String,
    access_token: String,
}

impl DriveVault {
    pub fn new(bot: Bot, http: Client, folder_id: String, access_token: String) -> DriveVault {
        DriveVault {
            bot,
            http,
            folder_id,
            access_token,
        }
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, ServiceError> {
        let file = self
            .bot
            .get_file(file_id)
            .await
            .map_err(|err| ServiceError::TelegramError(format!("failed to get file info: {err}")))?;

        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|err| ServiceError::TelegramError(format!("failed to download file: {err}")))?;

        log::debug!("Downloaded file {} ({} bytes)", file_id, buf.len());
        Ok(buf)
    }

    async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> Result<(), ServiceError> {
        let boundary = format!("ledgerbot-{}", uuid::Uuid::new_v4().simple());
        let metadata = json!({
            "name": file_name,
            "parents": [self.folder_id],
        });
        let body = multipart_body(&boundary, &metadata.to_string(), mime_type, data);

        let response = self
            .http
            .post(DRIVE_UPLOAD_API)
            .bearer_auth(&self.access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;
        check_response(response).await?;
        Ok(())
    }
}

#[async_trait]
impl FileVault for DriveVault {
    async fn store(&self, attachment: &Attachment, file_name: &str) -> Result<(), ServiceError> {
        let data = self.download(attachment.file_id()).await?;
        self.upload(file_name, attachment.mime_type(), &data).await?;
        log::info!("Saved {} to Drive folder {}", file_name, self.folder_id);
        Ok(())
    }
}

// Body of a Drive multipart upload: JSON metadata part, then the file content part.
fn multipart_body(boundary: &str, metadata: &str, mime_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + metadata.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("xyz", r#"{"name":"a.png"}"#, "image/jpeg", b"\x89PNG");
        let expected = [
            b"--xyz\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{\"name\":\"a.png\"}\r\n"
                .as_slice(),
            b"--xyz\r\nContent-Type: image/jpeg\r\n\r\n".as_slice(),
            b"\x89PNG".as_slice(),
            b"\r\n--xyz--\r\n".as_slice(),
        ]
        .concat();
        assert_eq!(body, expected);
    }
}
