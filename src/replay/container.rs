use maud::Markup;
use tokio::sync::RwLock;

/// Identifies a submission. Later submissions have greater numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Submission(u64);

/// Region whose contents are replaced by loading, error or result markup.
///
/// Only the most recent submission may settle the contents:
/// a response that arrives after a newer submission has started is discarded.
#[derive(Default)]
pub struct DisplayContainer {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_submission: u64,
    contents: String,
}

impl DisplayContainer {
    /// Starts a new submission and shows the loading markup right away.
    pub async fn begin(&self, loading: Markup) -> Submission {
        let mut inner = self.inner.write().await;
        inner.last_submission += 1;
        inner.contents = loading.into_string();
        Submission(inner.last_submission)
    }

    /// Replaces the contents unless a newer submission has started.
    ///
    /// Returns whether the contents have been replaced.
    pub async fn settle(&self, submission: Submission, markup: Markup) -> bool {
        let mut inner = self.inner.write().await;
        if submission.0 != inner.last_submission {
            return false;
        }
        inner.contents = markup.into_string();
        true
    }

    pub async fn contents(&self) -> String {
        self.inner.read().await.contents.clone()
    }
}
