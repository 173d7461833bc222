use corefacility_core::{
    async_trait,
    transport::{Body, Method, Request, Response, Transport},
    Error, Result, Value,
};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;
use url::Url;

/// [`Transport`] over a `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,

    /// API root every relative request path is joined onto. Always ends with
    /// a `/`.
    root: Url,
}

impl Http {
    /// Creates a transport for the API rooted at `root`.
    ///
    /// When a `token` is given every request carries an
    /// `Authorization: Token <token>` header.
    pub fn new(root: Url, token: Option<&str>, timeout: Duration) -> Result<Http> {
        if root.cannot_be_a_base() {
            return Err(Error::config(format!("`{root}` cannot be used as an API root")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Token {token}"))
                .map_err(|_| Error::config("the authorization token contains invalid characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| Error::config(format!("unable to build the HTTP client: {err}")))?;

        Ok(Http {
            client,
            root: with_trailing_slash(root),
        })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Joins a request path onto the API root. Absolute URLs are kept as
    /// they are.
    fn url(&self, path: &str) -> Result<Url> {
        self.root
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::invalid_route(path, err.to_string()))
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for Http {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn exec(&self, request: Request) -> Result<Response> {
        let url = self.url(&request.path)?;
        let mut builder = self.client.request(Http::method(request.method), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query.iter().collect::<Vec<_>>());
        }

        builder = match request.body {
            Body::Empty => builder,
            Body::Json(body) => builder.json(&body),
            Body::Multipart(file) => {
                let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = file.content_type {
                    part = part.mime_str(&content_type).map_err(|err| {
                        Error::config(format!("invalid content type `{content_type}`: {err}"))
                    })?;
                }
                builder.multipart(reqwest::multipart::Form::new().part(file.part, part))
            }
        };

        let response = builder.send().await.map_err(Error::network)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(Error::network)?;

        tracing::debug!(status, len = bytes.len(), "response received");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(body) => body,
                // Error pages from proxies are HTML; keep the text for the error detail
                Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
            }
        };

        Ok(Response { status, body })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
