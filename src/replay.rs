//! Batch replay: classify a mailbox export and rebuild per-thread lifecycles.
//!
//! 1. `load_records()` parses a JSON Lines file of `ThreadedEmail`s
//! 2. `replay()` classifies each email and stores the result
//! 3. Results are grouped by thread, sorted by time, and folded with
//!    `infer_lifecycle()`; the final state is stored per thread

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::Engine;
use crate::error::{ReplayError, Result};
use crate::lifecycle::{LifecycleEvent, LifecyclePolicy, LifecycleState, infer_lifecycle};
use crate::model::{NormalizedEmail, SignalCategory};
use crate::store::{ClassificationStore, LifecycleStore};

/// One email tagged with the conversation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadedEmail {
    pub thread_id: String,
    pub email: NormalizedEmail,
}

/// An email the engine refused to classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEmail {
    pub thread_id: String,
    pub email_id: String,
    pub code: u8,
    pub reason: String,
}

/// Final lifecycle of one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub state: LifecycleState,
    /// Classified emails that fed the lifecycle.
    pub events: usize,
    pub last_event_at: Option<DateTime<Utc>>,
}

/// Outcome of a whole replay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub policy: LifecyclePolicy,
    pub total: usize,
    pub classified: usize,
    /// Classified emails whose id was already stored earlier in the run.
    /// The later record replaces the stored result.
    pub overwritten: usize,
    pub rejected: Vec<RejectedEmail>,
    /// Sorted by thread id.
    pub threads: Vec<ThreadSummary>,
}

/// Read a JSON Lines file of `ThreadedEmail` records. Blank lines are skipped.
pub async fn load_records(path: impl AsRef<Path>) -> Result<Vec<ThreadedEmail>> {
    let content = tokio::fs::read_to_string(path.as_ref())
        .await
        .map_err(ReplayError::from)?;
    Ok(parse_records(&content)?)
}

/// Parse JSON Lines content. Line numbers in errors are 1-based.
pub fn parse_records(content: &str) -> std::result::Result<Vec<ThreadedEmail>, ReplayError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Parse {
                line: i + 1,
                source,
            })
        })
        .collect()
}

/// Classify every record, persist results, and derive one lifecycle per thread.
///
/// Invalid emails are counted and skipped. Store failures abort the run.
/// A repeated email id is logged and counted in `overwritten`; the stored
/// result is the later one, and both records still feed their thread.
pub async fn replay<S>(
    engine: &Engine,
    store: &S,
    records: &[ThreadedEmail],
    policy: LifecyclePolicy,
) -> Result<ReplaySummary>
where
    S: ClassificationStore + LifecycleStore + ?Sized,
{
    info!("Replaying {} email(s) with {:?}", records.len(), policy);

    let mut threads: BTreeMap<&str, Vec<(&NormalizedEmail, SignalCategory)>> = BTreeMap::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rejected = Vec::new();
    let mut classified = 0;
    let mut overwritten = 0;

    for record in records {
        let email = &record.email;

        match engine.classify(email) {
            Ok(result) => {
                if !seen.insert(email.id.as_str()) {
                    warn!(
                        id = %email.id,
                        thread = %record.thread_id,
                        "Duplicate email id, replacing stored classification"
                    );
                    overwritten += 1;
                }
                store.save_classification(&email.id, &result).await?;
                classified += 1;

                threads
                    .entry(record.thread_id.as_str())
                    .or_default()
                    .push((email, result.category));
            }
            Err(e) => {
                warn!(
                    id = %email.id,
                    thread = %record.thread_id,
                    code = e.code(),
                    error = %e,
                    "Email rejected"
                );
                rejected.push(RejectedEmail {
                    thread_id: record.thread_id.clone(),
                    email_id: email.id.clone(),
                    code: e.code(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut summaries = Vec::with_capacity(threads.len());
    for (thread_id, mut classified_emails) in threads {
        classified_emails.sort_by_key(|(email, _)| email.timestamp_utc);

        let events: Vec<LifecycleEvent> = classified_emails
            .iter()
            .map(|(email, category)| LifecycleEvent {
                category: *category,
                timestamp_utc: email.timestamp_utc,
            })
            .collect();

        let state = infer_lifecycle(&events, policy);
        store.save_lifecycle(thread_id, state).await?;

        let last_event_at = classified_emails
            .last()
            .and_then(|(email, _)| email.received_at());

        debug!(thread = thread_id, state = %state, events = events.len(), "Thread lifecycle inferred");

        summaries.push(ThreadSummary {
            thread_id: thread_id.to_string(),
            state,
            events: events.len(),
            last_event_at,
        });
    }

    info!(
        total = records.len(),
        classified,
        overwritten,
        rejected = rejected.len(),
        threads = summaries.len(),
        "Replay complete"
    );

    Ok(ReplaySummary {
        policy,
        total: records.len(),
        classified,
        overwritten,
        rejected,
        threads: summaries,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{EngineError, Error, StoreError};
    use crate::model::{ClassificationResult, RuleId};
    use crate::rules::{ClassificationContribution, Rule, RuleContext, RuleOutcome};
    use crate::store::MemoryStore;

    fn make_record(thread: &str, id: &str, subject: &str, timestamp_utc: i64) -> ThreadedEmail {
        ThreadedEmail {
            thread_id: thread.into(),
            email: NormalizedEmail {
                id: id.into(),
                sender: "talent@acme.example".into(),
                subject: subject.into(),
                body_plain: String::new(),
                recipients: vec![],
                timestamp_utc,
                source_platform: None,
            },
        }
    }

    #[test]
    fn parse_skips_blank_lines() {
        let line = serde_json::to_string(&make_record("t", "e1", "Hi", 1)).unwrap();
        let content = format!("\n{line}\n   \n{line}\n");
        assert_eq!(parse_records(&content).unwrap().len(), 2);
    }

    #[test]
    fn parse_reports_one_based_line() {
        let line = serde_json::to_string(&make_record("t", "e1", "Hi", 1)).unwrap();
        let content = format!("{line}\n\n{{not json}}\n");
        match parse_records(&content).unwrap_err() {
            ReplayError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for record in [
            make_record("t1", "e1", "Interview invite", 10),
            make_record("t1", "e2", "Offer", 20),
        ] {
            writeln!(file, "{}", serde_json::to_string(&record).unwrap()).unwrap();
        }

        let records = load_records(file.path()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].email.id, "e2");
    }

    #[tokio::test]
    async fn load_records_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path().join("absent.jsonl")).await.unwrap_err();
        assert!(matches!(err, Error::Replay(ReplayError::Io(_))));
    }

    #[tokio::test]
    async fn load_records_reports_bad_line_through_crate_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let line = serde_json::to_string(&make_record("t", "e1", "Hi", 1)).unwrap();
        writeln!(file, "{line}").unwrap();
        writeln!(file, "{{\"thread_id\": 7}}").unwrap();

        match load_records(file.path()).await.unwrap_err() {
            Error::Replay(ReplayError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Store whose backend is always down.
    struct UnavailableStore;

    #[async_trait]
    impl ClassificationStore for UnavailableStore {
        async fn save_classification(
            &self,
            _email_id: &str,
            _result: &ClassificationResult,
        ) -> std::result::Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }

        async fn load_classification(
            &self,
            _email_id: &str,
        ) -> std::result::Result<Option<ClassificationResult>, StoreError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl LifecycleStore for UnavailableStore {
        async fn save_lifecycle(
            &self,
            _thread_id: &str,
            _state: LifecycleState,
        ) -> std::result::Result<(), StoreError> {
            Ok(())
        }

        async fn load_lifecycle(
            &self,
            _thread_id: &str,
        ) -> std::result::Result<Option<LifecycleState>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn store_failure_aborts_with_store_error() {
        let records = vec![make_record("acme", "e1", "Interview", 10)];
        let err = replay(&Engine::new(), &UnavailableStore, &records, LifecyclePolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Backend(_))), "{err}");
    }

    #[tokio::test]
    async fn replay_sorts_events_and_stores_results() {
        let engine = Engine::new();
        let store = MemoryStore::new();
        // Out of order on purpose: the offer is the newest email.
        let records = vec![
            make_record("acme", "e3", "Your offer letter", 300),
            make_record("acme", "e1", "Take-home assignment", 100),
            make_record("acme", "e2", "Interview schedule", 200),
            make_record("globex", "g1", "Lunch?", 50),
        ];

        let summary = replay(&engine, &store, &records, LifecyclePolicy::ClosedIsTerminal)
            .await
            .unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.classified, 4);
        assert_eq!(summary.overwritten, 0);
        assert!(summary.rejected.is_empty());
        assert_eq!(store.classification_count().await, 4);

        let ids: Vec<&str> = summary.threads.iter().map(|t| t.thread_id.as_str()).collect();
        assert_eq!(ids, vec!["acme", "globex"]);

        let acme = &summary.threads[0];
        assert_eq!(acme.state, LifecycleState::Offer);
        assert_eq!(acme.events, 3);
        assert_eq!(acme.last_event_at, DateTime::from_timestamp(300, 0));
        assert_eq!(summary.threads[1].state, LifecycleState::Unknown);

        assert_eq!(
            store.load_lifecycle("acme").await.unwrap(),
            Some(LifecycleState::Offer)
        );
        let stored = store.require_classification("e2").await.unwrap();
        assert_eq!(stored.category, SignalCategory::Interview);
    }

    #[tokio::test]
    async fn replay_counts_invalid_emails_without_aborting() {
        let engine = Engine::new();
        let store = MemoryStore::new();
        let mut bad = make_record("acme", "bad", "Offer", 10);
        bad.email.sender.clear();
        let records = vec![bad, make_record("acme", "ok", "Interview", 20)];

        let summary = replay(&engine, &store, &records, LifecyclePolicy::default())
            .await
            .unwrap();

        assert_eq!(summary.classified, 1);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].email_id, "bad");
        assert_eq!(summary.rejected[0].code, EngineError::EmptySender.code());
        assert_eq!(summary.threads[0].state, LifecycleState::Interviewing);
        assert_eq!(store.load_classification("bad").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_ids_replace_and_are_counted() {
        let engine = Engine::new();
        let store = MemoryStore::new();
        let records = vec![
            make_record("acme", "same", "Interview schedule", 10),
            make_record("acme", "same", "Your offer letter", 20),
        ];

        let summary = replay(&engine, &store, &records, LifecyclePolicy::default())
            .await
            .unwrap();

        assert_eq!(summary.classified, 2);
        assert_eq!(summary.overwritten, 1);
        assert_eq!(store.classification_count().await, 1);
        let stored = store.require_classification("same").await.unwrap();
        assert_eq!(stored.category, SignalCategory::Offer);
        assert_eq!(summary.threads[0].events, 2);
    }

    #[tokio::test]
    async fn last_event_time_comes_from_newest_email() {
        let records = vec![
            make_record("acme", "late", "Interview", 1_700_000_500),
            make_record("acme", "early", "Assignment", 1_700_000_000),
        ];
        let summary = replay(&Engine::new(), &MemoryStore::new(), &records, LifecyclePolicy::default())
            .await
            .unwrap();
        assert_eq!(
            summary.threads[0].last_event_at,
            records[0].email.received_at()
        );
        assert!(summary.threads[0].last_event_at.is_some());
    }

    /// Votes for one category when the subject contains a fixed word.
    struct SubjectRule {
        id: RuleId,
        needle: &'static str,
        category: SignalCategory,
    }

    impl Rule for SubjectRule {
        fn id(&self) -> RuleId {
            self.id
        }

        fn evaluate(&self, context: &RuleContext<'_>) -> RuleOutcome {
            if !context.input.subject.contains(self.needle) {
                return RuleOutcome::no_match(self.id);
            }
            RuleOutcome::matched(self.id)
                .with_classification(ClassificationContribution::suggest(self.category, 50))
        }
    }

    fn make_engine() -> Engine {
        Engine::with_rules(vec![
            Box::new(SubjectRule {
                id: RuleId::SubjectKeywordInterview,
                needle: "interview",
                category: SignalCategory::Interview,
            }),
            Box::new(SubjectRule {
                id: RuleId::SubjectKeywordRejection,
                needle: "unfortunately",
                category: SignalCategory::Rejection,
            }),
            Box::new(SubjectRule {
                id: RuleId::SubjectKeywordOffer,
                needle: "offer",
                category: SignalCategory::Offer,
            }),
        ])
    }

    #[tokio::test]
    async fn replay_policy_decides_reopening() {
        let engine = make_engine();
        let records = vec![
            make_record("t", "c", "new offer", 3),
            make_record("t", "a", "interview loop", 1),
            make_record("t", "b", "unfortunately", 2),
        ];

        let terminal = replay(&engine, &MemoryStore::new(), &records, LifecyclePolicy::ClosedIsTerminal)
            .await
            .unwrap();
        let reopen = replay(&engine, &MemoryStore::new(), &records, LifecyclePolicy::ClosedCanReopen)
            .await
            .unwrap();

        assert_eq!(terminal.threads[0].state, LifecycleState::Closed);
        assert_eq!(reopen.threads[0].state, LifecycleState::Offer);
        assert_eq!(reopen.policy, LifecyclePolicy::ClosedCanReopen);
    }
}
