use std::fmt;

/// Shown when the backend answered with an error but no usable message.
pub const SERVER_ERROR_FALLBACK: &str = "Erro ao processar requisição";

/// Shown when the request went out but no response came back.
pub const UNREACHABLE_MESSAGE: &str =
    "Não foi possível conectar ao servidor. Verifique se o backend está rodando.";

/// Shown when a local failure carries no message of its own.
pub const LOCAL_ERROR_FALLBACK: &str = "Erro desconhecido";

/// Shown when the controller receives an error with an empty message.
pub const QUERY_ERROR_FALLBACK: &str = "Erro ao buscar análise de oportunidade";

/// Rejection message for identifiers that do not reduce to 11 digits.
pub const INVALID_CPF_MESSAGE: &str = "CPF deve conter 11 dígitos";

/// Client-side error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Identifier rejected before any request was issued.
    Validation(String),
    /// The backend answered with a non-2xx status.
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message taken from the body, or the generic fallback.
        message: String,
    },
    /// Request sent but no response received (connect failure, timeout).
    Unreachable,
    /// The request could not be built, or the response could not be read.
    Local(String),
}

impl ClientError {
    /// Builds a server error, falling back to the generic message when the body had none.
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
        ClientError::Server { status, message }
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(msg) => msg.as_str(),
            ClientError::Server { message, .. } => message.as_str(),
            ClientError::Unreachable => UNREACHABLE_MESSAGE,
            ClientError::Local(msg) if msg.trim().is_empty() => LOCAL_ERROR_FALLBACK,
            ClientError::Local(msg) => msg.as_str(),
        }
    }

    /// Numeric status; 0 for anything that never got an HTTP response.
    pub fn status(&self) -> u16 {
        match self {
            ClientError::Server { status, .. } => *status,
            _ => 0,
        }
    }

    /// True when the failure happened on the transport, not on the backend.
    pub fn is_transport(&self) -> bool {
        self.status() == 0
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ClientError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ClientError::Unreachable => write!(f, "Unreachable: {}", UNREACHABLE_MESSAGE),
            ClientError::Local(_) => write!(f, "Local error: {}", self.message()),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    /// Maps a transport failure onto the error taxonomy.
    ///
    /// Connection failures, timeouts and broken sends mean no response arrived.
    /// Builder and decode failures are local. Status errors never reach here;
    /// the client checks the status itself instead of calling `error_for_status`.
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() || err.is_body() {
            return ClientError::Local(err.to_string());
        }
        if err.is_connect() || err.is_timeout() || err.is_request() {
            return ClientError::Unreachable;
        }
        ClientError::Local(err.to_string())
    }
}

/// Uniform error shape handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub message: String,
    pub status: u16,
}

impl From<ClientError> for QueryError {
    fn from(err: ClientError) -> Self {
        QueryError {
            message: err.message().to_string(),
            status: err.status(),
        }
    }
}

impl From<&ClientError> for QueryError {
    fn from(err: &ClientError) -> Self {
        QueryError {
            message: err.message().to_string(),
            status: err.status(),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

impl std::error::Error for QueryError {}
