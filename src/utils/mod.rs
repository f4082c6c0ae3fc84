//! Utility modules shared by the template engine and the expander.

pub mod slug;
pub mod value;
