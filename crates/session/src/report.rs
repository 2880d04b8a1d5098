use chrono::Utc;
use model::{ResultSummary, Submission};
use source::Source;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Best-effort delivery of final results. Nothing here can fail a session.
pub struct Reporter {
    source: Arc<Source>,
    /// Whether to actually contact the collector. Otherwise results are only logged.
    remote: bool,
}

impl Reporter {
    pub fn new(source: Arc<Source>, remote: bool) -> Self {
        Self { source, remote }
    }

    /// Submits `summary` on a detached task. The handle resolves to whether
    /// the submission was accepted and may simply be dropped.
    pub fn submit(&self, summary: ResultSummary) -> JoinHandle<bool> {
        let source = Arc::clone(&self.source);
        let remote = self.remote;
        tokio::spawn(async move {
            let submission = Submission::new(&summary, Utc::now());
            if !remote {
                match serde_json::to_string(&submission) {
                    Ok(payload) => log::info!("Quiz results to submit: {payload}"),
                    Err(err) => log::warn!("Could not encode quiz results: {err}"),
                }
                return true;
            }

            match source.submit_results(&submission).await {
                Ok(()) => {
                    log::info!("Submitted quiz results for topic {}.", summary.topic.id());
                    true
                }
                Err(err) => {
                    log::warn!("Could not submit results to server: {err}");
                    false
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Reporter;
    use model::{AnswerMap, Completion, ResultSummary, Topic};
    use source::Source;
    use std::sync::Arc;

    fn summary() -> ResultSummary {
        ResultSummary {
            topic: Topic::JavaScript,
            total: 2,
            correct: 2,
            incorrect: 0,
            percentage: 100,
            elapsed: 61,
            answers: AnswerMap::from([(1, 0), (2, 3)]),
            completion: Completion::Submitted,
        }
    }

    fn unreachable() -> Arc<Source> {
        Arc::new(Source::new("http://127.0.0.1:1").unwrap())
    }

    #[tokio::test]
    async fn local_submission_always_succeeds() {
        let reporter = Reporter::new(unreachable(), false);
        assert!(reporter.submit(summary()).await.unwrap());
    }

    #[tokio::test]
    async fn remote_failure_is_contained() {
        let reporter = Reporter::new(unreachable(), true);
        assert!(!reporter.submit(summary()).await.unwrap());
    }
}
