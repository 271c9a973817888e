mod item;
mod lifecycle;
mod pagination;
mod user;

pub use item::{Item, ItemChanges, NewItem};
pub use lifecycle::Lifecycle;
pub use pagination::Page;
pub use user::{NewUser, User, UserChanges};
