mod item;
mod scratch;
mod token;
mod user;

pub use item::*;
pub use scratch::*;
pub use token::*;
pub use user::*;

use crate::domain::Page;

/// `?skip=&limit=` on list endpoints.
#[derive(serde::Deserialize, Debug, Default)]
pub struct Pagination {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl From<Pagination> for Page {
    fn from(p: Pagination) -> Self {
        Page::new(p.skip, p.limit)
    }
}
