//! Shared fixtures for posit-service unit tests.

use std::sync::Arc;

use chrono::NaiveDate;
use posit_core::entities::{Client, ClientRegistration, Medium};
use posit_db::PositDb;
use posit_notify::RecordingNotifier;
use posit_predict::StaticPredictions;

use crate::ConsultationService;

/// In-memory service with a recording notifier and the static predictions.
pub async fn test_service() -> (ConsultationService, Arc<RecordingNotifier>) {
    let db = PositDb::open_local(":memory:").await.unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let svc = ConsultationService::new(
        db,
        notifier.clone(),
        Arc::new(StaticPredictions::new()),
        "contact@posit.if",
    );
    (svc, notifier)
}

/// A valid registration born 1996-08-30 (Virgo), password `"secret"`.
pub fn registration(email: &str) -> ClientRegistration {
    ClientRegistration {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        password: "secret".into(),
        phone: "0611223344".into(),
        birth_date: NaiveDate::from_ymd_opt(1996, 8, 30).unwrap(),
        postal_address: "20 avenue Albert Einstein, Villeurbanne".into(),
    }
}

/// Seeded catalog plus one registered client.
pub async fn seeded_service() -> (ConsultationService, Arc<RecordingNotifier>, Client) {
    let (svc, notifier) = test_service().await;
    svc.seed_catalog().await.unwrap();
    let client = svc.register(registration("ada@example.org")).await.unwrap();
    (svc, notifier, client)
}

pub async fn medium_named(svc: &ConsultationService, name: &str) -> Medium {
    svc.list_mediums()
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.name == name)
        .unwrap()
}
