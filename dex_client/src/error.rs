use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceClientError {
    #[error("No token addresses provided")]
    EmptyInput,

    #[error("Invalid Solana address: {address}")]
    InvalidAddress { address: String },

    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("Token is not authorized (HTTP 401)")]
    Unauthorized,

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A transport failure shared by every token of one batched request
    #[error("Batched HTTP request failed: {0}")]
    BatchTransport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl PriceClientError {
    pub fn invalid_address(address: &str) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
        }
    }

    /// True for failures on the provider side: non-200 statuses and transport
    /// errors (timeouts included).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::Transport(_) | Self::BatchTransport(_)
        )
    }

    /// Equivalent error for one slot of a batch that failed as a whole.
    /// `reqwest::Error` is not `Clone`, so transport failures keep their message.
    pub fn for_slot(&self) -> Self {
        match self {
            Self::EmptyInput => Self::EmptyInput,
            Self::InvalidAddress { address } => Self::InvalidAddress {
                address: address.clone(),
            },
            Self::Upstream { status } => Self::Upstream { status: *status },
            Self::Unauthorized => Self::Unauthorized,
            Self::Transport(e) => Self::BatchTransport(e.to_string()),
            Self::BatchTransport(message) => Self::BatchTransport(message.clone()),
            Self::InvalidResponse(message) => Self::InvalidResponse(message.clone()),
            Self::Config(message) => Self::Config(message.clone()),
        }
    }
}

pub type Result<T, E = PriceClientError> = std::result::Result<T, E>;

/// Per-token outcome inside a bulk fetch.
pub type TokenResult<T> = std::result::Result<T, PriceClientError>;
