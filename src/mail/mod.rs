mod dates;
mod message;

pub use dates::add_local_date;
pub use message::{Header, Message};
