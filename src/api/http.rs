//! reqwest implementation of [`ClinicApi`].
//!
//! One JSON path for everything except uploads, which go out as multipart.
//! The session context injects the bearer token per request; a 401 fires
//! the unauthorized hook exactly once for the request that saw it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::envelope::Envelope;
use super::error::ApiError;
use super::{ClinicApi, FileUpload};
use crate::models::{
    AppointmentStatus, Attachment, AttachmentCategory, AttachmentOwner, Encounter, HistoryRecord,
};
use crate::session::SessionContext;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct HttpClinicApi {
    base_url: String,
    client: reqwest::Client,
    session: Arc<dyn SessionContext>,
}

impl HttpClinicApi {
    /// Create a client against `base_url` with the default timeout.
    pub fn new(base_url: &str, session: Arc<dyn SessionContext>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS, session)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64, session: Arc<dyn SessionContext>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request, normalize the envelope.
    ///
    /// `Ok(None)` covers both HTTP 404 and `success: true, data: null` —
    /// the two ways the backend signals "nothing there yet".
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.unauthorized();
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: Envelope<T> = response.json().await.map_err(|err| {
            if status.is_success() {
                ApiError::from(err)
            } else {
                // Non-envelope error page (proxy, crash). Surface the status.
                ApiError::Transport(format!("server answered {status}"))
            }
        })?;
        envelope.into_result()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        self.execute(self.client.get(self.url(path))).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        self.execute(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        self.execute(self.client.put(self.url(path)).json(body)).await
    }
}

/// Endpoints that promise a body on success.
fn require<T>(data: Option<T>) -> Result<T, ApiError> {
    data.ok_or_else(|| ApiError::Decode("missing data in successful response".into()))
}

#[async_trait]
impl ClinicApi for HttpClinicApi {
    async fn encounter_by_appointment(
        &self,
        atencion_id: i64,
    ) -> Result<Option<Encounter>, ApiError> {
        self.get(&format!("/api/consultas/atencion/{atencion_id}")).await
    }

    async fn patient_history(&self, paciente_id: i64) -> Result<Vec<HistoryRecord>, ApiError> {
        let records = self
            .get(&format!("/api/pacientes/{paciente_id}/consultas"))
            .await?;
        Ok(records.unwrap_or_default())
    }

    async fn create_encounter(&self, payload: &Encounter) -> Result<Encounter, ApiError> {
        require(self.post("/api/consultas", payload).await?)
    }

    async fn update_encounter(&self, id: i64, payload: &Encounter) -> Result<Encounter, ApiError> {
        require(self.put(&format!("/api/consultas/{id}"), payload).await?)
    }

    async fn set_appointment_status(
        &self,
        atencion_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "estado": status });
        self.put::<_, serde_json::Value>(&format!("/api/atenciones/{atencion_id}/estado"), &body)
            .await?;
        Ok(())
    }

    async fn list_attachments(&self, owner: AttachmentOwner) -> Result<Vec<Attachment>, ApiError> {
        let attachments = self
            .get(&format!(
                "/api/archivos/{}/{}",
                owner.kind.as_str(),
                owner.id
            ))
            .await?;
        Ok(attachments.unwrap_or_default())
    }

    async fn upload_attachment(
        &self,
        owner: AttachmentOwner,
        category: AttachmentCategory,
        file: FileUpload,
    ) -> Result<Attachment, ApiError> {
        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(mime.essence_str())
            .map_err(ApiError::from)?;
        let form = multipart::Form::new()
            .text("owner_type", owner.kind.as_str())
            .text("owner_id", owner.id.to_string())
            .text("categoria", category.as_str())
            .part("archivo", part);

        let request = self.client.post(self.url("/api/archivos")).multipart(form);
        require(self.execute(request).await?)
    }

    async fn delete_attachment(&self, attachment_id: i64) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/archivos/{attachment_id}")));
        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenSession;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpClinicApi::new("http://clinica.local/", Arc::new(TokenSession::anonymous()));
        assert_eq!(api.base_url(), "http://clinica.local");
        assert_eq!(api.url("/api/consultas"), "http://clinica.local/api/consultas");
    }
}
