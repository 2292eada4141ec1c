mod email;
mod error;
mod submission;

pub use email::*;
pub use error::*;
pub use submission::*;
