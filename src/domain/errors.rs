use derive_more::Display;
use wasm_bindgen::JsValue;

/// Simplified error system - one enum for every way a chart load can stop
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ChartError {
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
    #[display(fmt = "Chart container has no size after {} attempts", attempts)]
    ContainerNotSized { attempts: u32 },
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    /// Message from a non-2xx response body
    #[display(fmt = "API Error: {}", _0)]
    Api(String),
    #[display(fmt = "Parse Error: {}", _0)]
    Parse(String),
    #[display(fmt = "No data available")]
    NoData,
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
    /// A newer load was issued while this one was in flight
    #[display(fmt = "Load #{} superseded by a newer request", sequence)]
    Stale { sequence: u64 },
}

impl std::error::Error for ChartError {}

impl ChartError {
    /// Text for the page's error region
    pub fn user_message(&self) -> String {
        match self {
            ChartError::Api(message) | ChartError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, ChartError::Stale { .. })
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Parse(err.to_string())
    }
}

impl From<JsValue> for ChartError {
    fn from(value: JsValue) -> Self {
        ChartError::Rendering(
            value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}
