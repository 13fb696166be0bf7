//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use masthead::{
    db::{self, DbConnection},
    models::{NewRequirement, NewSubmission, Requirement, Submission, User},
    notify::{EventPublisher, Mailer, Notifier, NotifyError},
    roles::Role,
    status::SubmissionKind,
};

/// Open a fresh in-memory database with the schema applied.
pub async fn setup_conn() -> DbConnection {
    use diesel_async::AsyncConnection;
    let mut conn = DbConnection::establish(":memory:").await.expect("connect");
    db::run_migrations(&mut conn).await.expect("migrations");
    conn
}

/// Insert a user with the given role.
pub async fn seed_user(conn: &mut DbConnection, email: &str, role: Role) -> User {
    let now = Utc::now().naive_utc();
    db::create_user(conn, &db::new_user(email, "Test User", role, now))
        .await
        .expect("seed user")
}

/// Insert a requirement with a zeroed counter.
pub async fn seed_requirement(conn: &mut DbConnection) -> Requirement {
    db::create_requirement(
        conn,
        &NewRequirement {
            title: "Open call",
            topic: "Systems",
            submissions_count: 0,
        },
    )
    .await
    .expect("seed requirement")
}

/// Insert a submission with an explicit submission time so creation order
/// is unambiguous for round-robin assertions.
pub async fn seed_submission_at(
    conn: &mut DbConnection,
    requirement_id: i32,
    kind: SubmissionKind,
    title: &str,
    submitted_at: NaiveDateTime,
) -> Submission {
    let row = NewSubmission {
        requirement_id,
        kind: kind.as_str(),
        title,
        abstract_text: "An abstract",
        author_user_id: 1,
        author_name: "Alice Author",
        author_email: "alice@example.com",
        file_url: None,
        file_name: None,
        file_type: None,
        file_size: None,
        status: kind.unassigned_status().as_str(),
        submitted_at,
    };
    db::create_submission(conn, &row).await.expect("seed submission")
}

/// Insert `count` manuscripts spaced one second apart, oldest first.
pub async fn seed_manuscripts(
    conn: &mut DbConnection,
    requirement_id: i32,
    count: usize,
) -> Vec<Submission> {
    let base = Utc::now().naive_utc();
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let at = base + Duration::seconds(i64::try_from(i).expect("count fits"));
        let title = format!("Manuscript {}", i + 1);
        out.push(
            seed_submission_at(conn, requirement_id, SubmissionKind::Manuscript, &title, at).await,
        );
    }
    out
}

/// Mailer that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("lock")
            .push((to.to_owned(), subject.to_owned(), body.to_owned()));
        Ok(())
    }
}

/// Publisher that records every event instead of delivering it.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<(String, String, serde_json::Value)>>,
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("lock")
            .push((channel.to_owned(), event.to_owned(), payload));
        Ok(())
    }
}

/// A notifier wired to recording doubles, returned alongside them.
pub fn recording_notifier() -> (Notifier, Arc<RecordingMailer>, Arc<RecordingPublisher>) {
    let mailer = Arc::new(RecordingMailer::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let notifier = Notifier::new(
        Arc::clone(&mailer) as Arc<dyn Mailer>,
        Arc::clone(&publisher) as Arc<dyn EventPublisher>,
    );
    (notifier, mailer, publisher)
}
