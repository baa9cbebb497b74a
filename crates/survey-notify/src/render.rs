use serde::Serialize;
use tera::{Context, Tera};

use survey_core::models::feedback::AggregatedFeedback;
use survey_core::models::participant::Participant;
use survey_instruments::definition;

use crate::error::NotifyError;

const HTML_TEMPLATE: &str = include_str!("../templates/feedback.html.tera");
const TEXT_TEMPLATE: &str = include_str!("../templates/feedback.txt.tera");

/// The two bodies of a feedback e-mail.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub text: String,
    pub html: String,
}

#[derive(Serialize)]
struct EmailContext<'a> {
    email: &'a str,
    location: &'static str,
    instruments: Vec<InstrumentSection<'a>>,
}

#[derive(Serialize)]
struct InstrumentSection<'a> {
    title: &'static str,
    score: u32,
    feedback: &'a str,
    band: &'static str,
}

/// Render the plain-text and HTML bodies for `feedback`.
///
/// Instruments appear in canonical order. The HTML template is
/// auto-escaped.
pub fn render_feedback_email(
    participant: &Participant,
    feedback: &AggregatedFeedback,
) -> Result<RenderedEmail, NotifyError> {
    let mut tera = Tera::default();
    // Template names ending in .html get Tera's auto-escaping.
    tera.add_raw_templates(vec![
        ("feedback.html", HTML_TEMPLATE),
        ("feedback.txt", TEXT_TEMPLATE),
    ])
    .map_err(|e| NotifyError::TemplateParse(e.to_string()))?;

    let ctx = EmailContext {
        email: feedback.email.as_str(),
        location: participant.location.display_name(),
        instruments: feedback
            .instruments
            .iter()
            .map(|(&id, item)| InstrumentSection {
                title: definition(id).title,
                score: item.score,
                feedback: &item.feedback,
                band: item.band.as_str(),
            })
            .collect(),
    };
    let context = Context::from_serialize(&ctx)?;

    Ok(RenderedEmail {
        text: tera.render("feedback.txt", &context)?,
        html: tera.render("feedback.html", &context)?,
    })
}
