//! Request options for the API helper

use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// JSON body, serialized as-is
    pub body: Option<Value>,
    /// Extra headers, applied after the defaults so they can override them
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            headers: Vec::new(),
        }
    }

    pub fn post_empty() -> Self {
        Self {
            method: Method::POST,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}
