use crate::core::errors::ExchangeError;
use crate::core::kernel::transport::HttpResponse;
use crate::core::types::ApiResponse;
use serde_json::{Map, Value};
use tracing::debug;

/// Static code to message table for venues that only send numeric error codes.
pub type ErrorTable = &'static [(i64, &'static str)];

/// Where the human readable text of an exchange error comes from.
#[derive(Debug, Clone, Copy)]
pub enum MessageSource {
    Field(&'static str),
    /// `code: <code>, msg: <field>`
    CodeAndField(&'static str),
    /// `<code>: <table entry>`
    Table(ErrorTable),
}

/// One embedded success/failure convention.
#[derive(Debug, Clone, Copy)]
pub enum ErrorRule {
    /// A string field that must equal `success`.
    StringStatus {
        field: &'static str,
        success: &'static str,
        required: bool,
        message: MessageSource,
    },
    /// A numeric field that must equal `success`.
    NumericStatus {
        field: &'static str,
        success: i64,
        required: bool,
        message: MessageSource,
    },
    /// The mere presence of this key means failure; its value is the message.
    ErrorKey(&'static str),
}

/// Per-endpoint extraction of the substantive payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unwrap {
    #[default]
    None,
    Field(&'static str),
    /// The value stored under the formatted symbol, if present.
    SymbolKey,
    /// The first array element, if any.
    FirstElement,
}

/// A venue's success/failure conventions plus its envelope field.
#[derive(Debug, Clone, Default)]
pub struct ResponseShape {
    pub rules: Vec<ErrorRule>,
    /// Field holding the payload on every successful response (`data` for several venues).
    pub envelope: Option<&'static str>,
}

impl ResponseShape {
    pub fn plain() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rule(mut self, rule: ErrorRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub const fn envelope(mut self, field: &'static str) -> Self {
        self.envelope = Some(field);
        self
    }
}

/// Folds a raw HTTP outcome into the canonical envelope.
///
/// Evaluation order: transport (or pre-flight) failure, non-200 status, JSON decode,
/// embedded exchange error, then success with unwrapping.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    shape: ResponseShape,
}

impl ResponseNormalizer {
    pub const fn new(shape: ResponseShape) -> Self {
        Self { shape }
    }

    pub fn normalize(
        &self,
        outcome: Result<HttpResponse, ExchangeError>,
        unwrap: Unwrap,
        symbol: Option<&str>,
        st: i64,
        et: i64,
    ) -> ApiResponse {
        match self.evaluate(outcome, unwrap, symbol) {
            Ok(data) => ApiResponse::success(data, st, et),
            Err(err) => {
                debug!(code = err.code(), error = %err, "request failed");
                ApiResponse::failure(&err, st, et)
            }
        }
    }

    pub fn evaluate(
        &self,
        outcome: Result<HttpResponse, ExchangeError>,
        unwrap: Unwrap,
        symbol: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let response = outcome?;
        if response.status != 200 {
            return Err(ExchangeError::HttpStatus {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        let body: Value = serde_json::from_slice(&response.body)?;

        for rule in &self.shape.rules {
            check_rule(rule, &body)?;
        }

        let payload = match self.shape.envelope {
            Some(field) => take_field(body, field)?,
            None => body,
        };
        apply_unwrap(payload, unwrap, symbol)
    }
}

fn check_rule(rule: &ErrorRule, body: &Value) -> Result<(), ExchangeError> {
    let Some(object) = body.as_object() else {
        return match rule {
            ErrorRule::StringStatus {
                field,
                required: true,
                ..
            }
            | ErrorRule::NumericStatus {
                field,
                required: true,
                ..
            } => Err(ExchangeError::decode(format!(
                "expected an object carrying `{}`",
                field
            ))),
            _ => Ok(()),
        };
    };

    match *rule {
        ErrorRule::StringStatus {
            field,
            success,
            required,
            message,
        } => {
            let Some(value) = present(object, field, required)? else {
                return Ok(());
            };
            let status = value
                .as_str()
                .ok_or_else(|| wrong_type(field, "a string", value))?;
            if status == success {
                return Ok(());
            }
            Err(ExchangeError::Exchange(render_message(
                message,
                object,
                status.to_string(),
                None,
            )?))
        }
        ErrorRule::NumericStatus {
            field,
            success,
            required,
            message,
        } => {
            let Some(value) = present(object, field, required)? else {
                return Ok(());
            };
            let number = value
                .as_f64()
                .ok_or_else(|| wrong_type(field, "a number", value))?;
            #[allow(clippy::cast_precision_loss)]
            let matches = (number - success as f64).abs() < f64::EPSILON;
            if matches {
                return Ok(());
            }
            let code = value.as_i64();
            let rendered = code.map_or_else(|| number.to_string(), |c| c.to_string());
            Err(ExchangeError::Exchange(render_message(
                message, object, rendered, code,
            )?))
        }
        ErrorRule::ErrorKey(field) => match object.get(field) {
            None => Ok(()),
            Some(Value::String(text)) => Err(ExchangeError::Exchange(text.clone())),
            Some(other) => Err(ExchangeError::Exchange(other.to_string())),
        },
    }
}

fn present<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    required: bool,
) -> Result<Option<&'a Value>, ExchangeError> {
    match object.get(field) {
        Some(value) => Ok(Some(value)),
        None if required => Err(ExchangeError::decode(format!(
            "missing status field `{}`",
            field
        ))),
        None => Ok(None),
    }
}

fn wrong_type(field: &str, expected: &str, found: &Value) -> ExchangeError {
    ExchangeError::decode(format!(
        "field `{}` should be {}, found {}",
        field, expected, found
    ))
}

fn render_message(
    source: MessageSource,
    object: &Map<String, Value>,
    code: String,
    numeric: Option<i64>,
) -> Result<String, ExchangeError> {
    match source {
        MessageSource::Field(field) => text_field(object, field),
        MessageSource::CodeAndField(field) => {
            Ok(format!("code: {}, msg: {}", code, text_field(object, field)?))
        }
        MessageSource::Table(table) => {
            let text = numeric
                .and_then(|c| table.iter().find(|(k, _)| *k == c))
                .map_or("unknown error", |(_, text)| *text);
            Ok(format!("{}: {}", code, text))
        }
    }
}

fn text_field(object: &Map<String, Value>, field: &str) -> Result<String, ExchangeError> {
    match object.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(wrong_type(field, "a string", other)),
        None => Err(ExchangeError::decode(format!(
            "error response without `{}`",
            field
        ))),
    }
}

fn take_field(value: Value, field: &str) -> Result<Value, ExchangeError> {
    match value {
        Value::Object(mut object) => Ok(object.remove(field).unwrap_or(Value::Null)),
        other => Err(ExchangeError::decode(format!(
            "cannot unwrap `{}` from {}",
            field,
            kind(&other)
        ))),
    }
}

fn apply_unwrap(payload: Value, unwrap: Unwrap, symbol: Option<&str>) -> Result<Value, ExchangeError> {
    match unwrap {
        Unwrap::None => Ok(payload),
        Unwrap::Field(field) => take_field(payload, field),
        Unwrap::SymbolKey => match (payload, symbol) {
            (Value::Object(mut object), Some(key)) if object.contains_key(key) => {
                Ok(object.remove(key).unwrap_or(Value::Null))
            }
            (other, _) => Ok(other),
        },
        Unwrap::FirstElement => match payload {
            Value::Array(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
            other => Ok(other),
        },
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
