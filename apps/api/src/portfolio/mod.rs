// Portfolio lookup: which project links best demonstrate a job's skills.

pub mod handlers;
pub mod matching;
pub mod store;
