//! Authentication module: password hashing, token issuance, bearer middleware

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService, TokenIssuer};
pub use middleware::{extract_token, jwt_auth_middleware, AuthContext};
pub use password::{Argon2Hasher, PasswordHasher};
