// Browser helpers
// DOM bindings, clipboard writers and notifications

pub mod clipboard;
pub mod dom;
pub mod notify;
