use crate::{
    codeforces::{FetchError, SubmissionSource},
    registry::{UserId, UserRegistry},
};
use futures::future::join_all;
use thiserror::Error;

/// A fetch that failed for one user. The user's previous solved set is kept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{handle}: {error}")]
pub struct FetchFailure {
    pub id: UserId,
    pub handle: String,
    #[source]
    pub error: FetchError,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: Vec<UserId>,
    pub failures: Vec<FetchFailure>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch the solved sets of every user with a non-blank handle, all at once.
///
/// Results are applied only after every fetch has resolved, so the registry is never observed
/// half-updated. A failure affects only the user it belongs to.
pub async fn refresh<S>(source: &S, registry: &mut UserRegistry) -> RefreshReport
where
    S: SubmissionSource + ?Sized,
{
    let targets: Vec<(UserId, String)> = registry
        .iter()
        .filter_map(|user| {
            let handle = user.handle().trim();
            if handle.is_empty() {
                None
            } else {
                Some((user.id(), handle.to_string()))
            }
        })
        .collect();

    let mut report = RefreshReport::default();
    if targets.is_empty() {
        tracing::warn!("no user has a handle to fetch");
        return report;
    }

    tracing::info!("Start to fetch solved problems of {} users.", targets.len());
    let outcomes = join_all(targets.into_iter().map(|(id, handle)| async move {
        let outcome = source.solved_problems(&handle).await;
        (id, handle, outcome)
    }))
    .await;

    for (id, handle, outcome) in outcomes {
        match outcome {
            Ok(solved) => {
                tracing::info!("{} solved: {}", handle, solved.len());
                match registry.set_solved(id, solved) {
                    Ok(()) => report.updated.push(id),
                    Err(e) => tracing::warn!("couldn't apply solved problems of {}: {}", handle, e),
                }
            }
            Err(error) => {
                tracing::warn!("failed to fetch solved problems of {}: {}", handle, error);
                report.failures.push(FetchFailure { id, handle, error });
            }
        }
    }

    tracing::info!(
        "{} users updated, {} failed.",
        report.updated.len(),
        report.failures.len()
    );

    report
}
