#[macro_use]
extern crate async_trait;

pub mod accessor;
pub mod block;
pub mod error;
pub mod listing;
pub mod locate;
pub mod meta;
