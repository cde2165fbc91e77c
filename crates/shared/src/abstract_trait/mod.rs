mod hashing;
mod jwt;

pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait, TokenKind};
