pub mod error;

use http::{
    header::{HeaderValue, ACCEPT, CONTENT_TYPE},
    Request, Uri,
};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use model::{QuestionId, RawQuestion, Submission, Topic};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time;

pub const APPLICATION_JSON: &str = "application/json";

/// Where the question service lives unless configured otherwise.
pub const DEFAULT_BASE: &str = "http://localhost:8080";

/// Reported in place of the real question count when the service cannot tell us.
pub const FALLBACK_QUESTION_COUNT: u32 = 500;

/// How long the question count may take before the fallback is used instead.
pub const COUNT_TIMEOUT: Duration = Duration::from_secs(5);

type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// Client for the remote question service.
pub struct Source {
    /// Base URL without a trailing slash.
    base: Box<str>,
    http: HttpClient,
}

impl Source {
    pub fn new(base: &str) -> error::Result<Self> {
        let base = base.trim_end_matches('/');
        let uri: Uri = base.parse()?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(error::Error::InvalidUri);
        }

        let http = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { base: base.into(), http })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> error::Result<Uri> {
        let uri = [self.base.as_ref(), path].concat().parse()?;
        Ok(uri)
    }

    async fn get<T>(&self, path: &str) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let mut request = Request::new(Full::new(Bytes::new()));
        request.headers_mut().append(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        *request.uri_mut() = self.endpoint(path)?;

        let response = self.http.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("GET {path} failed with status {status}.");
            return Err(error::Error::Service(status));
        }

        // Only reject payloads that explicitly claim to be something else
        if let Some(mime) = response.headers().get(CONTENT_TYPE) {
            let mime = mime.to_str().map_err(|_| error::Error::UnknownContent)?;
            let prefix = mime.get(..APPLICATION_JSON.len()).unwrap_or_default();
            if !prefix.eq_ignore_ascii_case(APPLICATION_JSON) {
                return Err(error::Error::UnknownContent);
            }
        }

        let body = response.into_body().collect().await?.to_bytes();
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }

    /// Fetches the question records for the given topic.
    pub async fn fetch_questions(&self, topic: &Topic) -> error::Result<Vec<RawQuestion>> {
        let category = topic.category();
        log::info!("Fetching questions for category {category}.");
        let path = format!("/question/category/{}", urlencoding::encode(category));
        let questions: Vec<RawQuestion> = self.get(&path).await?;
        log::debug!("Received {} questions for category {category}.", questions.len());
        Ok(questions)
    }

    pub async fn fetch_all_questions(&self) -> error::Result<Vec<RawQuestion>> {
        self.get("/question/all").await
    }

    /// Fetches a single question. The service answers `null` for unknown IDs.
    pub async fn fetch_question(&self, id: QuestionId) -> error::Result<Option<RawQuestion>> {
        self.get(&format!("/question/{id}")).await
    }

    /// Total number of questions in the bank. Purely informational, so any
    /// failure is logged and replaced with [`FALLBACK_QUESTION_COUNT`].
    pub async fn fetch_question_count(&self) -> u32 {
        let count = time::timeout(COUNT_TIMEOUT, self.get("/question/totalCount")).await;
        match count.unwrap_or(Err(error::Error::Timeout)) {
            Ok(count) => count,
            Err(err) => {
                log::warn!("Falling back to {FALLBACK_QUESTION_COUNT} questions: {err}");
                FALLBACK_QUESTION_COUNT
            }
        }
    }

    /// Sends the final statistics of a quiz to the result collector.
    pub async fn submit_results(&self, submission: &Submission<'_>) -> error::Result<()> {
        let body = Full::new(Bytes::from(serde_json::to_vec(submission)?));
        let request = Request::post(self.endpoint("/quiz/submit-results")?)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON)
            .body(body)?;

        let response = self.http.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error::Error::Service(status));
        }

        Ok(())
    }
}
