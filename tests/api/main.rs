mod helpers;
mod items;
mod scratch;
mod token;
