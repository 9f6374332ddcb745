pub mod handlers;
pub mod store;
pub mod validation;

pub use store::{PgResumeStore, ResumeStore};
