use crate::{Error, Record, Result, Value};

use serde::Deserialize;

/// A response from the REST backend, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,

    /// The decoded JSON body; `null` when the body was empty.
    pub body: Value,
}

/// One slice of a paginated list, as sent by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageData {
    /// Number of items across all pages.
    pub count: u64,

    /// Absolute URL of the next slice.
    pub next: Option<String>,

    /// Absolute URL of the previous slice.
    pub previous: Option<String>,

    pub results: Vec<Record>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Value>) -> Response {
        Response {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Maps non-success statuses to the matching error.
    pub fn error_for_status(self) -> Result<Response> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::from_status(self.status, &self.body))
        }
    }

    /// Interprets the body as a single entity.
    pub fn into_record(self) -> Result<Record> {
        match self.body {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(Error::invalid_response(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Interprets the body as a non-paginated list.
    pub fn into_list(self) -> Result<Vec<Record>> {
        match self.body {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map.into_iter().collect()),
                    other => Err(Error::invalid_response(format!(
                        "expected list items to be JSON objects, got {}",
                        kind_of(&other)
                    ))),
                })
                .collect(),
            other => Err(Error::invalid_response(format!(
                "expected a JSON array, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// Interprets the body as a page envelope.
    pub fn into_page(self) -> Result<PageData> {
        let page: PageData = serde_json::from_value(self.body).map_err(|err| {
            Error::invalid_response(format!("malformed page envelope: {err}"))
        })?;

        if (page.results.len() as u64) > page.count {
            return Err(Error::invalid_response(format!(
                "page holds {} items but the total count is {}",
                page.results.len(),
                page.count
            )));
        }

        Ok(page)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
