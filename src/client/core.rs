// File: src/client/core.rs
use crate::client::middleware::{ApiHeadersLayer, ApiHeadersService};
use crate::client::provider::{Provider, VersionInfo};
use crate::client::redirect::{FollowRedirectLayer, FollowRedirectService};
use crate::config::Config;
use crate::model::{BibleData, BibleVerse, Book, Passage, PassageRequest, filter_range};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use futures::future::OptionFuture;
use http::{Request, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tower::ServiceExt;
use tower_layer::Layer;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type ApiService = ApiHeadersService<FollowRedirectService<HttpsClient>>;

/// Pulls the `charset` parameter out of a Content-Type value.
fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Decodes a response body. A BOM wins, then the declared charset, then UTF-8.
pub fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("Response body had invalid {} sequences", used.name());
    }
    text.into_owned()
}

#[derive(Clone, Debug)]
pub struct BibleClient {
    service: ApiService,
    provider: Provider,
    timeout: Duration,
}

impl BibleClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        for err in &result.errors {
            log::debug!("Skipping native certificate: {}", err);
        }
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            // Plain-http endpoints (mirrors, tests) still work without roots.
            log::warn!("No valid system certificates found; HTTPS requests will fail");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client: HttpsClient = Client::builder(TokioExecutor::new()).build(https_connector);
        let service = ApiHeadersLayer::new(&config.user_agent)
            .layer(FollowRedirectLayer::new(config.max_redirects).layer(http_client));

        Ok(Self {
            service,
            provider: Provider::new(config.provider, config.provider_base_url()),
            timeout: Duration::from_secs(config.request_timeout_secs.max(1)),
        })
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn versions(&self) -> &'static [VersionInfo] {
        self.provider.versions()
    }

    async fn get_text(&self, uri: Uri) -> Result<String> {
        let req = Request::get(uri.clone())
            .body(String::new())
            .context("Failed to build request")?;

        // The deadline covers the body too; a stalled stream must not hang the fetch.
        let exchange = async {
            let response = self
                .service
                .clone()
                .oneshot(req)
                .await
                .with_context(|| format!("Request to {} failed", uri))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response
                .into_body()
                .collect()
                .await
                .with_context(|| format!("Failed to read body from {}", uri))?
                .to_bytes();
            Ok::<_, anyhow::Error>((status, content_type, bytes))
        };
        let (status, content_type, bytes) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| anyhow::anyhow!("Request to {} timed out", uri))??;

        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", uri, status);
        }
        Ok(decode_body(content_type.as_deref(), &bytes))
    }

    /// One chapter of one version, verses cleaned and sorted.
    pub async fn fetch_chapter(
        &self,
        version: &str,
        book: &Book,
        chapter: u32,
    ) -> Result<Vec<BibleVerse>> {
        let uri = self.provider.chapter_uri(version, book, chapter)?;
        log::debug!("GET {}", uri);
        let body = self.get_text(uri).await?;
        self.provider
            .parse_chapter(&body)
            .with_context(|| format!("{} {} ({})", book.zh, chapter, version))
    }

    /// Primary and optional parallel version, fetched concurrently.
    /// Either failing fails the whole passage.
    pub async fn fetch_passage(
        &self,
        request: &PassageRequest,
        primary: &str,
        secondary: Option<&str>,
    ) -> Result<Passage> {
        let primary_fut = self.fetch_chapter(primary, request.book, request.chapter);
        let secondary_fut: OptionFuture<_> = secondary
            .map(|v| self.fetch_chapter(v, request.book, request.chapter))
            .into();

        let (primary_lines, secondary_lines) = futures::join!(primary_fut, secondary_fut);
        let data = BibleData::new(request, primary_lines?);
        let parallel = secondary_lines
            .transpose()?
            .map(|lines| filter_range(lines, request.verses));

        log::info!(
            "Loaded {} ({} verses, parallel: {})",
            data.reference,
            data.lines.len(),
            parallel.is_some()
        );
        Ok(Passage { data, parallel })
    }
}
