use crate::errors::ServiceError;
use chrono::Duration;
use std::{fmt, sync::Arc};

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    pub fn lifetime(&self) -> Duration {
        match self {
            TokenKind::Access => Duration::minutes(60),
            TokenKind::Refresh => Duration::days(7),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait JwtServiceTrait: Send + Sync + fmt::Debug {
    fn generate_token(&self, user_id: i32, kind: TokenKind) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str, kind: TokenKind) -> Result<i32, ServiceError>;
}
