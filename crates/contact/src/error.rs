#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Name, email, and message are required")]
    Validate(#[from] validator::ValidationErrors),

    #[error("failed to render email template: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
