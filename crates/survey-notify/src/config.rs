/// Mail delivery settings, handed to the notifier when it is built.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Mailgun API root, e.g. `https://api.mailgun.net` or the EU endpoint.
    pub api_base: String,
    pub domain: String,
    pub api_key: String,
    pub from_address: String,
    pub subject: String,
}

pub const DEFAULT_API_BASE: &str = "https://api.mailgun.net";
pub const DEFAULT_SUBJECT: &str = "Resultados de tu Encuesta Psicológica";

impl MailConfig {
    /// Settings with the default endpoint, subject and a no-reply sender on
    /// `domain`.
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            from_address: format!("Encuesta <no-reply@{domain}>"),
            domain,
            api_key: api_key.into(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    pub fn messages_url(&self) -> String {
        format!(
            "{}/v3/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.domain
        )
    }
}
