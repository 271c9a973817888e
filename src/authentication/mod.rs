mod error;
mod extractor;
mod jwt;
mod middleware;
mod password;

pub use error::AuthError;
pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use middleware::*;
pub use password::*;
