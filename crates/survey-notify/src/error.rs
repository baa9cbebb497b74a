use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("e-mail delivery is not configured")]
    Disabled,

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("mail transport error: {0}")]
    Transport(String),

    #[error("mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<tera::Error> for NotifyError {
    fn from(e: tera::Error) -> Self {
        NotifyError::TemplateRender(e.to_string())
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Transport(e.to_string())
    }
}
