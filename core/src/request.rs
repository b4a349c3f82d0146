use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

use crate::error::{Error, Result};

/// HTTP methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// The canonical upper-case name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of fetchable work waiting in the frontier.
///
/// Two requests are the same work item when their method, URL and body match.
/// Headers, metadata and depth ride along to the consumer but never take part
/// in equality, hashing or the fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// The URL to request
    pub url: Url,

    /// The HTTP method to use
    #[serde(default)]
    pub method: Method,

    /// HTTP headers to include
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request body (for POST, PUT, etc.)
    #[serde(default)]
    pub body: Option<Vec<u8>>,

    /// Metadata associated with this request
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,

    /// Link depth at which the request was discovered
    #[serde(default)]
    pub depth: u32,
}

impl Request {
    /// Create a request for an arbitrary method
    pub fn new<U: AsRef<str>>(method: Method, url: U) -> Result<Self> {
        let url = Url::parse(url.as_ref()).map_err(Error::UrlParse)?;
        Ok(Self {
            url,
            method,
            headers: HashMap::new(),
            body: None,
            meta: HashMap::new(),
            depth: 0,
        })
    }

    /// Create a new GET request
    pub fn get<U: AsRef<str>>(url: U) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post<U: AsRef<str>, B: Into<Vec<u8>>>(url: U, body: B) -> Result<Self> {
        let mut request = Self::new(Method::POST, url)?;
        request.body = Some(body.into());
        Ok(request)
    }

    /// Add a header to the request
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add metadata to the request
    pub fn with_meta<K: Into<String>, V: Into<serde_json::Value>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Set the discovery depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Hex SHA-256 digest of the request identity (method, URL, body).
    ///
    /// Stable across processes, so it can key an index that outlives a run.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.method.as_str().as_bytes());
        hasher.update(b" ");
        hasher.update(self.url.as_str().as_bytes());
        if let Some(ref body) = self.body {
            hasher.update(b"\n");
            hasher.update(body);
        }
        format!("{:x}", hasher.finalize())
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.method == other.method && self.body == other.body
    }
}

impl Eq for Request {}

impl Hash for Request {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.as_str().hash(state);
        self.method.hash(state);
        self.body.hash(state);
    }
}
