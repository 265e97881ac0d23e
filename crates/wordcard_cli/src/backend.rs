//! Blocking HTTP backend for the Wordcard REST API.
//!
//! # Responsibility
//! - Implement [`WordBackend`] over `GET/POST/PUT/DELETE /api/words`.
//! - Map HTTP outcomes onto backend error kinds.
//!
//! # Invariants
//! - 404 is always `BackendError::NotFound`.
//! - Other non-success statuses are `BackendError::Rejected` with the body text.
//! - Connection and decoding failures are `BackendError::Transport`.

use log::debug;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use ureq::http::Response;
use ureq::{Agent, Body};
use wordcard_core::{
    BackendError, BackendResult, WordBackend, WordDraft, WordId, WordPatch, WordRecord,
};

/// Default base URL of the words collection.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/words";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// [`WordBackend`] that talks to a running `wordcard-server`.
pub struct HttpWordBackend {
    agent: Agent,
    base_url: String,
}

impl HttpWordBackend {
    /// Creates a backend for the collection at `base_url`,
    /// e.g. `http://localhost:3000/api/words`.
    pub fn new(base_url: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn word_url(&self, id: WordId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn finish(
        &self,
        action: &str,
        id: Option<WordId>,
        started_at: Instant,
        result: Result<Response<Body>, ureq::Error>,
    ) -> BackendResult<Response<Body>> {
        let mut response = result.map_err(|err| {
            debug!("event=http_call module=cli action={action} status=error error={err}");
            BackendError::Transport(err.to_string())
        })?;
        let status = response.status();
        debug!(
            "event=http_call module=cli action={} status={} duration_ms={}",
            action,
            status.as_u16(),
            started_at.elapsed().as_millis()
        );

        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 404 {
            if let Some(id) = id {
                return Err(BackendError::NotFound(id));
            }
        }
        let message = response
            .body_mut()
            .read_to_string()
            .unwrap_or_default()
            .trim()
            .to_string();
        Err(BackendError::Rejected {
            status: Some(status.as_u16()),
            message,
        })
    }
}

fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> BackendResult<T> {
    response
        .body_mut()
        .read_json()
        .map_err(|err| BackendError::Transport(format!("invalid response body: {err}")))
}

impl WordBackend for HttpWordBackend {
    fn fetch_all(&self) -> BackendResult<Vec<WordRecord>> {
        let started_at = Instant::now();
        let result = self.agent.get(&self.base_url).call();
        read_json(self.finish("list", None, started_at, result)?)
    }

    fn fetch_one(&self, id: WordId) -> BackendResult<WordRecord> {
        let started_at = Instant::now();
        let result = self.agent.get(&self.word_url(id)).call();
        read_json(self.finish("get", Some(id), started_at, result)?)
    }

    fn create(&self, draft: &WordDraft) -> BackendResult<WordRecord> {
        let started_at = Instant::now();
        let result = self.agent.post(&self.base_url).send_json(draft);
        read_json(self.finish("create", None, started_at, result)?)
    }

    fn update(&self, id: WordId, patch: &WordPatch) -> BackendResult<WordRecord> {
        let started_at = Instant::now();
        let result = self.agent.put(&self.word_url(id)).send_json(patch);
        read_json(self.finish("update", Some(id), started_at, result)?)
    }

    fn remove(&self, id: WordId) -> BackendResult<()> {
        let started_at = Instant::now();
        let result = self.agent.delete(&self.word_url(id)).call();
        self.finish("delete", Some(id), started_at, result)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpWordBackend, DEFAULT_API_URL};
    use wordcard_core::{BackendError, WordBackend, WordId};

    #[test]
    fn base_url_drops_trailing_slash() {
        let backend = HttpWordBackend::new("http://localhost:3000/api/words/");
        assert_eq!(backend.base_url(), DEFAULT_API_URL);
        assert_eq!(
            backend.word_url(WordId(7)),
            "http://localhost:3000/api/words/7"
        );
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        let backend = HttpWordBackend::new("http://127.0.0.1:1/api/words");
        assert!(matches!(
            backend.fetch_all().unwrap_err(),
            BackendError::Transport(_)
        ));
    }
}
