//! HTTP client core for the Canvas API
//!
//! Owns the base URL, bearer token, and the `Link`-header pagination loop.
//! Callers never see pages: [`CanvasClient::get_all`] follows `rel="next"`
//! until the server stops offering one and returns the fully materialized
//! sequence in server order.
//!
//! The wire layer sits behind the [`Transport`] trait so that pagination
//! and the aggregation services can be exercised against canned responses
//! in tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};

/// One response page: the raw body plus the `rel="next"` continuation
/// URL from the `Link` header, if the server offered one.
#[derive(Debug, Clone)]
pub struct Page {
    /// Raw response body
    pub body: String,
    /// Absolute URL of the next page, when present
    pub next: Option<String>,
}

/// Wire-level GET transport.
///
/// The production implementation wraps `reqwest`; tests substitute a fake
/// that serves queued pages and counts requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue an authenticated GET and return the body plus continuation.
    ///
    /// `query` is only attached on first-page requests; continuation URLs
    /// from the `Link` header already embed their query string.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Page>;
}

struct HttpTransport {
    http: reqwest::Client,
    api_token: String,
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Page> {
        let mut request = self.http.get(url).bearer_auth(&self.api_token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_link);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Page { body, next })
    }
}

/// Extract the `rel="next"` URL from a `Link` header value.
///
/// Canvas emits the RFC 5988 form:
/// `<https://...?page=2>; rel="next", <https://...?page=9>; rel="last"`.
pub(crate) fn parse_next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut segments = part.split(';');
        let url = segments.next()?.trim();
        let is_next = segments
            .any(|attr| attr.trim().eq_ignore_ascii_case("rel=\"next\""));
        if is_next {
            return Some(url.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }
    None
}

/// Query parameter bag with the three serializations Canvas expects.
///
/// Scalars go out as `key=value`, booleans as `key=true|false`, and array
/// parameters as repeated bracketed keys (`include[]=a&include[]=b`),
/// which is the convention the Canvas API requires.
#[derive(Debug, Default, Clone)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single-valued parameter.
    pub fn scalar(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a boolean flag, serialized as `true`/`false`.
    pub fn flag(mut self, key: &str, value: bool) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append an array parameter as repeated `key[]` entries.
    pub fn repeated<T: ToString>(mut self, key: &str, values: &[T]) -> Self {
        let bracketed = format!("{key}[]");
        for value in values {
            self.pairs.push((bracketed.clone(), value.to_string()));
        }
        self
    }

    /// Whether any parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The accumulated key/value pairs, in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Authenticated Canvas API client.
///
/// Constructed once at process start and passed by reference into every
/// resource accessor; there is no ambient singleton. The client performs
/// no retries and no caching.
#[derive(Clone)]
pub struct CanvasClient {
    base: String,
    transport: Arc<dyn Transport>,
}

impl CanvasClient {
    /// Create a client from connection settings.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("canvas-lens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_transport(
            &config.base_url,
            Arc::new(HttpTransport {
                http,
                api_token: config.api_token.clone(),
            }),
        ))
    }

    /// Create a client over an arbitrary transport. Used by tests to
    /// substitute canned responses for the network.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base, path)
    }

    /// GET a single object from `path` (relative to `/api/v1`).
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let page = self.transport.get(&url, query.pairs()).await?;
        serde_json::from_str(&page.body).map_err(Error::Json)
    }

    /// GET every page of a collection at `path`, following the `Link`
    /// header's `rel="next"` relation until absent.
    ///
    /// Pages are fetched sequentially (each continuation is only known
    /// after the previous response) and concatenated in server order.
    pub async fn get_all<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<Vec<T>> {
        let mut url = self.url(path);
        let mut first = true;
        let mut items: Vec<T> = Vec::new();

        loop {
            tracing::debug!(%url, page = !first, "GET");
            let empty = Query::new();
            let q = if first { query } else { &empty };
            let page = self.transport.get(&url, q.pairs()).await?;
            let mut batch: Vec<T> = serde_json::from_str(&page.body)?;
            items.append(&mut batch);

            match page.next {
                Some(next) => {
                    url = next;
                    first = false;
                }
                None => break,
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fake transports for exercising pagination and the aggregation
    //! services without a network.

    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{CanvasClient, Page, Transport};
    use crate::error::{Error, Result};

    /// Serves queued pages in order and records every request URL.
    pub(crate) struct FakeTransport {
        pages: Mutex<Vec<Page>>,
        pub(crate) requests: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub(crate) fn new(pages: Vec<Page>) -> Self {
            let mut pages = pages;
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &str, _query: &[(String, String)]) -> Result<Page> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| Error::Other("no more queued pages".to_string()))
        }
    }

    /// Routes requests by URL suffix, so concurrent fan-outs stay
    /// deterministic. The longest matching route wins, which keeps
    /// `/courses/10/grading_periods` from falling through to `/courses`.
    #[derive(Default)]
    pub(crate) struct RoutedTransport {
        routes: Vec<(String, String)>,
    }

    impl RoutedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Serve `body` as a single page for requests ending in `path`.
        pub(crate) fn route(mut self, path: &str, body: &str) -> Self {
            self.routes.push((path.to_string(), body.to_string()));
            self
        }

        /// Finish building and wrap in a client.
        pub(crate) fn client(self) -> CanvasClient {
            CanvasClient::with_transport("https://canvas.test", Arc::new(self))
        }
    }

    #[async_trait]
    impl Transport for RoutedTransport {
        async fn get(&self, url: &str, _query: &[(String, String)]) -> Result<Page> {
            self.routes
                .iter()
                .filter(|(path, _)| url.ends_with(path.as_str()))
                .max_by_key(|(path, _)| path.len())
                .map(|(_, body)| Page {
                    body: body.clone(),
                    next: None,
                })
                .ok_or_else(|| Error::Other(format!("no route for {url}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FakeTransport;
    use super::*;

    fn page(body: &str, next: Option<&str>) -> Page {
        Page {
            body: body.to_string(),
            next: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn get_all_follows_next_links_in_order() {
        let transport = Arc::new(FakeTransport::new(vec![
            page(r#"[1, 2]"#, Some("https://x/api/v1/things?page=2")),
            page(r#"[3]"#, Some("https://x/api/v1/things?page=3")),
            page(r#"[4, 5]"#, None),
        ]));
        let client = CanvasClient::with_transport("https://x", transport.clone());

        let items: Vec<u32> = client.get_all("/things", &Query::new()).await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);

        // Exactly one request per page, no over-fetching.
        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![
                "https://x/api/v1/things".to_string(),
                "https://x/api/v1/things?page=2".to_string(),
                "https://x/api/v1/things?page=3".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn get_all_single_page_issues_one_request() {
        let transport = Arc::new(FakeTransport::new(vec![page(r#"[7]"#, None)]));
        let client = CanvasClient::with_transport("https://x/", transport.clone());

        let items: Vec<u32> = client.get_all("/things", &Query::new()).await.unwrap();
        assert_eq!(items, vec![7]);
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_decodes_single_object() {
        let transport = Arc::new(FakeTransport::new(vec![page(r#"{"id": 9}"#, None)]));
        let client = CanvasClient::with_transport("https://x", transport);

        #[derive(serde::Deserialize)]
        struct Obj {
            id: u64,
        }
        let obj: Obj = client.get("/users/self", &Query::new()).await.unwrap();
        assert_eq!(obj.id, 9);
    }

    #[test]
    fn parses_next_relation_from_link_header() {
        let header = "<https://x/api/v1/courses?page=2&per_page=10>; rel=\"next\", \
                      <https://x/api/v1/courses?page=1&per_page=10>; rel=\"first\", \
                      <https://x/api/v1/courses?page=9&per_page=10>; rel=\"last\"";
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://x/api/v1/courses?page=2&per_page=10")
        );
    }

    #[test]
    fn last_page_has_no_next_relation() {
        let header = "<https://x/api/v1/courses?page=1>; rel=\"first\", \
                      <https://x/api/v1/courses?page=9>; rel=\"last\"";
        assert_eq!(parse_next_link(header), None);
    }

    #[test]
    fn query_serializes_arrays_as_repeated_bracketed_keys() {
        let query = Query::new()
            .scalar("per_page", 100)
            .flag("auto_mark_as_read", false)
            .repeated("include", &["assignment", "submission_comments"]);
        assert_eq!(
            query.pairs(),
            &[
                ("per_page".to_string(), "100".to_string()),
                ("auto_mark_as_read".to_string(), "false".to_string()),
                ("include[]".to_string(), "assignment".to_string()),
                ("include[]".to_string(), "submission_comments".to_string()),
            ]
        );
    }
}
