mod common;

use std::sync::Arc;

use survey_api::submission::{SubmissionError, SurveyService};
use survey_core::models::sociodemographic::{Gender, Sociodemographic};
use survey_instruments::{AnswerPayload, Band, InstrumentId};
use survey_storage::MemoryParticipantStore;

use common::{
    AlwaysConflictStore, InterleavingStore, RecordingNotifier, request, service, stored, tiktok,
};

fn setup() -> (Arc<MemoryParticipantStore>, Arc<RecordingNotifier>, SurveyService) {
    let store = Arc::new(MemoryParticipantStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let svc = service(store.clone(), notifier.clone());
    (store, notifier, svc)
}

fn validation_field(err: SubmissionError) -> String {
    match err {
        SubmissionError::Validation(v) => v.field,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn moderate_tiktok_scenario() {
    let (store, _, svc) = setup();

    let submitted = svc.submit(tiktok(vec![3; 6])).await.unwrap();

    let fb = &submitted.feedback.instruments[&InstrumentId::BergenTiktok];
    assert_eq!(fb.score, 18);
    assert_eq!(fb.band, Band::Moderate);
    assert_eq!(fb.feedback, "Riesgo moderado de adicción a TikTok");

    let p = stored(&store, "a@x.com").await.unwrap();
    assert!(p.consent_accepted);
    assert_eq!(p.result(InstrumentId::BergenTiktok).unwrap().total_score(), 18);
}

#[tokio::test]
async fn high_tiktok_scenario() {
    let (_, _, svc) = setup();
    let submitted = svc.submit(tiktok(vec![5; 6])).await.unwrap();

    let fb = &submitted.feedback.instruments[&InstrumentId::BergenTiktok];
    assert_eq!(fb.score, 30);
    assert_eq!(fb.band, Band::High);
}

#[tokio::test]
async fn consent_is_required() {
    let (store, notifier, svc) = setup();
    let mut req = tiktok(vec![3; 6]);
    req.consent_accepted = false;

    let err = svc.submit(req).await.unwrap_err();

    assert_eq!(validation_field(err), "consent_accepted");
    assert!(store.is_empty().await);
    assert_eq!(notifier.sent(), 0);
}

#[tokio::test]
async fn invalid_email_and_location_are_rejected() {
    let (store, _, svc) = setup();

    let err = svc.submit(request("not-an-email")).await.unwrap_err();
    assert_eq!(validation_field(err), "email");

    let mut req = request("a@x.com");
    req.location = "PE".to_string();
    let err = svc.submit(req).await.unwrap_err();
    assert_eq!(validation_field(err), "location");

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn sociodemographic_bounds_name_the_field() {
    let (_, _, svc) = setup();
    let mut req = request("a@x.com");
    req.sociodemographic_data = Some(Sociodemographic {
        age: Some(200),
        ..Default::default()
    });

    let err = svc.submit(req).await.unwrap_err();
    assert_eq!(validation_field(err), "sociodemographic_data.age");
}

#[tokio::test]
async fn out_of_range_answer_names_the_index() {
    let (store, _, svc) = setup();

    let err = svc.submit(tiktok(vec![3, 3, 9, 3, 3, 3])).await.unwrap_err();
    assert_eq!(validation_field(err), "bergen_tiktok[2]");

    let err = svc.submit(tiktok(vec![3, 3, 3, 3, 3, 0])).await.unwrap_err();
    assert_eq!(validation_field(err), "bergen_tiktok[5]");

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn wrong_item_count_is_rejected() {
    let (_, _, svc) = setup();
    let err = svc.submit(tiktok(vec![3; 5])).await.unwrap_err();
    assert_eq!(validation_field(err), "bergen_tiktok");
}

#[tokio::test]
async fn keyed_answers_are_accepted() {
    let (_, _, svc) = setup();
    let items = (1..=13).map(|n| (format!("q{n}"), 2)).collect();
    let req = request("a@x.com").with_answers(InstrumentId::Caids, AnswerPayload::Items(items));

    let submitted = svc.submit(req).await.unwrap();

    let fb = &submitted.feedback.instruments[&InstrumentId::Caids];
    assert_eq!(fb.score, 26);
    assert_eq!(fb.band, Band::Low);
}

#[tokio::test]
async fn keyed_answers_with_missing_item_are_rejected() {
    let (_, _, svc) = setup();
    let items = (1..=12).map(|n| (format!("q{n}"), 2)).collect();
    let req = request("a@x.com").with_answers(InstrumentId::Caids, AnswerPayload::Items(items));

    let err = svc.submit(req).await.unwrap_err();
    assert_eq!(validation_field(err), "caids.q13");
}

#[tokio::test]
async fn one_invalid_instrument_commits_nothing() {
    let (store, _, svc) = setup();

    let req = tiktok(vec![3; 6]).with_answers(InstrumentId::UclaLoneliness, vec![2; 19]);
    let err = svc.submit(req).await.unwrap_err();

    assert_eq!(validation_field(err), "ucla_loneliness");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn invalid_resubmission_leaves_existing_data_untouched() {
    let (store, _, svc) = setup();
    svc.submit(tiktok(vec![3; 6])).await.unwrap();
    let before = stored(&store, "a@x.com").await.unwrap();

    let mut req = tiktok(vec![5; 6]).with_answers(InstrumentId::Caids, vec![6; 13]);
    req.location = "CL".to_string();
    svc.submit(req).await.unwrap_err();

    assert_eq!(stored(&store, "a@x.com").await.unwrap(), before);
}

#[tokio::test]
async fn resubmission_is_idempotent() {
    let (store, _, svc) = setup();

    svc.submit(tiktok(vec![3; 6])).await.unwrap();
    let first = stored(&store, "a@x.com").await.unwrap();
    svc.submit(tiktok(vec![3; 6])).await.unwrap();
    let second = stored(&store, "a@x.com").await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.results().count(), 1);

    let (a, b) = (
        first.result(InstrumentId::BergenTiktok).unwrap(),
        second.result(InstrumentId::BergenTiktok).unwrap(),
    );
    assert_eq!(b.total_score(), a.total_score());
    assert_eq!(b.feedback(), a.feedback());
    assert_eq!(b.created_at(), a.created_at());
}

#[tokio::test]
async fn resubmission_replaces_only_provided_instruments() {
    let (store, _, svc) = setup();

    svc.submit(tiktok(vec![3; 6])).await.unwrap();
    let submitted = svc
        .submit(request("a@x.com").with_answers(InstrumentId::Caids, vec![5; 13]))
        .await
        .unwrap();

    // Feedback is cumulative.
    let ids: Vec<_> = submitted.feedback.instruments.keys().copied().collect();
    assert_eq!(ids, vec![InstrumentId::BergenTiktok, InstrumentId::Caids]);

    let p = stored(&store, "a@x.com").await.unwrap();
    assert_eq!(p.result(InstrumentId::BergenTiktok).unwrap().total_score(), 18);
    assert_eq!(p.result(InstrumentId::Caids).unwrap().total_score(), 65);

    svc.submit(tiktok(vec![1; 6])).await.unwrap();
    let p = stored(&store, "a@x.com").await.unwrap();
    assert_eq!(p.result(InstrumentId::BergenTiktok).unwrap().total_score(), 6);
    assert_eq!(p.result(InstrumentId::Caids).unwrap().total_score(), 65);
}

#[tokio::test]
async fn resubmission_merges_sociodemographic_fields() {
    let (store, _, svc) = setup();

    let mut first = request("a@x.com");
    first.sociodemographic_data = Some(Sociodemographic {
        age: Some(20),
        gender: Some(Gender::Female),
        ..Default::default()
    });
    svc.submit(first).await.unwrap();

    let mut second = request("a@x.com");
    second.location = "CL".to_string();
    second.sociodemographic_data = Some(Sociodemographic {
        age: Some(21),
        ..Default::default()
    });
    svc.submit(second).await.unwrap();

    let p = stored(&store, "a@x.com").await.unwrap();
    assert_eq!(p.location.code(), "CL");
    assert_eq!(p.sociodemographic.age, Some(21));
    assert_eq!(p.sociodemographic.gender, Some(Gender::Female));
}

#[tokio::test]
async fn concurrent_submissions_retry_after_a_conflict() {
    let store = Arc::new(InterleavingStore::default());
    let svc = SurveyService::new(store.clone(), Arc::new(RecordingNotifier::default()));

    let a = svc.submit(tiktok(vec![2; 6]));
    let b = svc.submit(request("a@x.com").with_answers(InstrumentId::UclaLoneliness, vec![2; 20]));
    let (a, b) = tokio::join!(a, b);
    a.unwrap();
    b.unwrap();

    assert!(store.conflicts() >= 1);
    let p = stored(&store.inner, "a@x.com").await.unwrap();
    assert_eq!(p.result(InstrumentId::BergenTiktok).unwrap().total_score(), 12);
    assert_eq!(p.result(InstrumentId::UclaLoneliness).unwrap().total_score(), 40);
}

#[tokio::test]
async fn persistent_conflicts_give_up() {
    let store = Arc::new(AlwaysConflictStore(MemoryParticipantStore::new()));
    let svc = SurveyService::new(store, Arc::new(RecordingNotifier::default()));

    let err = svc.submit(tiktok(vec![3; 6])).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Contention(_)));
}

#[tokio::test]
async fn feedback_query() {
    let (_, _, svc) = setup();

    let err = svc.feedback("nobody@x.com").await.unwrap_err();
    assert!(matches!(err, SubmissionError::NotFound(_)));

    let err = svc.feedback("bad email").await.unwrap_err();
    assert_eq!(validation_field(err), "email");

    svc.submit(tiktok(vec![3; 6])).await.unwrap();
    let fb = svc.feedback(" a@X.com ").await.unwrap();
    assert_eq!(fb.email.as_str(), "a@x.com");
    assert_eq!(fb.instruments[&InstrumentId::BergenTiktok].score, 18);
}

#[tokio::test]
async fn successful_dispatch_marks_feedback_sent() {
    let (store, notifier, svc) = setup();

    let submitted = svc.submit(tiktok(vec![3; 6])).await.unwrap();
    assert!(!submitted.participant.feedback_sent);

    let sent = svc
        .dispatch_feedback(&submitted.participant, &submitted.feedback)
        .await;

    assert!(sent);
    assert_eq!(notifier.sent(), 1);
    assert!(stored(&store, "a@x.com").await.unwrap().feedback_sent);

    // A later submission changes the feedback, so it is unsent again.
    svc.submit(tiktok(vec![4; 6])).await.unwrap();
    assert!(!stored(&store, "a@x.com").await.unwrap().feedback_sent);
}

#[tokio::test]
async fn failed_dispatch_keeps_survey_data() {
    let store = Arc::new(MemoryParticipantStore::new());
    let notifier = Arc::new(RecordingNotifier::failing());
    let svc = service(store.clone(), notifier);

    let submitted = svc.submit(tiktok(vec![3; 6])).await.unwrap();
    let sent = svc
        .dispatch_feedback(&submitted.participant, &submitted.feedback)
        .await;

    assert!(!sent);
    let p = stored(&store, "a@x.com").await.unwrap();
    assert!(!p.feedback_sent);
    assert_eq!(p.result(InstrumentId::BergenTiktok).unwrap().total_score(), 18);
}

#[tokio::test]
async fn stale_feedback_is_not_marked_sent() {
    let (store, notifier, svc) = setup();

    let first = svc.submit(tiktok(vec![3; 6])).await.unwrap();
    svc.submit(tiktok(vec![5; 6])).await.unwrap();

    let sent = svc
        .dispatch_feedback(&first.participant, &first.feedback)
        .await;

    assert!(!sent);
    assert_eq!(notifier.sent(), 1);
    assert!(!stored(&store, "a@x.com").await.unwrap().feedback_sent);
}

#[tokio::test]
async fn resend_feedback() {
    let (store, notifier, svc) = setup();

    let err = svc.resend_feedback("nobody@x.com").await.unwrap_err();
    assert!(matches!(err, SubmissionError::NotFound(_)));

    svc.submit(tiktok(vec![3; 6])).await.unwrap();
    assert!(svc.resend_feedback("a@x.com").await.unwrap());
    assert_eq!(notifier.sent(), 1);
    assert!(stored(&store, "a@x.com").await.unwrap().feedback_sent);
}
