use chrono::NaiveDate;

use log::{debug, error, info, warn};

use crate::{
    error::{HolidayError, Slot},
    fetcher::HolidaySource,
    intent::{route, Action},
    query::{answer, UserQuery},
    request::{Intent, Request, RequestEnvelope},
    response::{ResponseEnvelope, SpeechletResponse},
    speech::{self, SKILL_NAME},
    utils::today_date,
};

/// Answers voice platform requests, fetching fresh holiday data from `source` for every query
pub struct Skill<S> {
    source: S,
}

impl<S: HolidaySource> Skill<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Impure (reads system clock, fetches data)
    ///
    /// Returns `None` for requests the platform expects no answer to, such as the end of a
    /// session
    pub async fn handle(&self, envelope: RequestEnvelope) -> Option<ResponseEnvelope> {
        self.handle_on(envelope, today_date()).await
    }

    /// Impure (fetches data)
    ///
    /// As [`Skill::handle`], with `today` standing in for the current date
    pub async fn handle_on(&self, envelope: RequestEnvelope, today: NaiveDate) -> Option<ResponseEnvelope> {
        let RequestEnvelope { session, request, .. } = envelope;

        if session.new {
            info!(
                "event=session_start request_id={} session_id={} application_id={}",
                request.request_id(), session.session_id, session.application.application_id
            );
        }

        let response = match request {
            Request::LaunchRequest { request_id } => {
                info!("event=launch request_id={request_id} session_id={}", session.session_id);
                welcome()
            },
            Request::IntentRequest { request_id, intent } => {
                info!("event=intent request_id={request_id} session_id={} intent={}", session.session_id, intent.name);
                self.on_intent(&intent, today).await
            },
            Request::SessionEndedRequest { request_id, reason } => {
                info!(
                    "event=session_end request_id={request_id} session_id={} reason={}",
                    session.session_id, reason.as_deref().unwrap_or("unknown")
                );
                return None;
            },
            Request::Unsupported => {
                warn!("event=unsupported_request session_id={}", session.session_id);
                return None;
            },
        };

        Some(ResponseEnvelope::new(session.attributes.unwrap_or_default(), response))
    }

    async fn on_intent(&self, intent: &Intent, today: NaiveDate) -> SpeechletResponse {
        match route(intent, today) {
            Ok(Action::Query(query))   => self.on_query(query, today).await,
            Ok(Action::Help)           => welcome(),
            Ok(Action::Stop)           => goodbye(),
            Err(HolidayError::MissingOrInvalidSlot { slot }) => {
                debug!("event=reprompt intent={} slot={slot}", intent.name);
                reprompt(slot)
            },
            Err(err @ HolidayError::UnrecognizedIntent(_)) => {
                warn!("event=fallback_to_welcome error={err}");
                welcome()
            },
            Err(err @ HolidayError::DataSourceUnavailable(_)) => {
                error!("event=intent_failed intent={} error={err}", intent.name);
                apology()
            },
        }
    }

    async fn on_query(&self, query: UserQuery, today: NaiveDate) -> SpeechletResponse {
        match self.source.fetch().await {
            Ok(dataset) => {
                let text = speech::render_answer(&answer(query, &dataset, today));
                SpeechletResponse::new(SKILL_NAME, &text, true)
            },
            Err(err) => {
                error!("event=query_failed query={query:?} error={err}");
                apology()
            },
        }
    }
}

#[must_use] pub fn welcome() -> SpeechletResponse {
    SpeechletResponse::new("Welcome", &speech::welcome(), false)
        .with_reprompt(speech::WELCOME_REPROMPT)
}

#[must_use] pub fn goodbye() -> SpeechletResponse {
    SpeechletResponse::new("Goodbye", speech::GOODBYE, true)
}

#[must_use] pub fn apology() -> SpeechletResponse {
    SpeechletResponse::new(SKILL_NAME, speech::APOLOGY, true)
}

/// Asks for `slot` again and keeps the session open
#[must_use] pub fn reprompt(slot: Slot) -> SpeechletResponse {
    let question = match slot {
        Slot::Country => speech::ASK_COUNTRY,
        Slot::Date    => speech::ASK_DATE,
        Slot::Month   => speech::ASK_MONTH,
    };

    SpeechletResponse::new(SKILL_NAME, question, false)
        .with_reprompt(&format!("{}{question}", speech::DIDNT_CATCH))
        .eliciting(slot)
}
