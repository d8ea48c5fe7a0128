use crate::{
    catalog::ProblemId,
    codeforces::{core::FetchError, model::UserStatusResponse},
};
use std::collections::HashSet;

pub type SolvedSet = HashSet<ProblemId>;

/// Reduce the submission history of `handle` to the set of problems with at least one accepted submission.
pub fn extract(handle: &str, payload: UserStatusResponse) -> Result<SolvedSet, FetchError> {
    let handle = handle.trim();

    if !payload.is_ok() {
        let comment = payload
            .comment
            .unwrap_or_else(|| format!("status {}", payload.status));
        tracing::warn!("submissions of {} were rejected: {}", handle, comment);
        return Err(FetchError::RemoteRejected(comment));
    }

    let submissions = payload.result.ok_or_else(|| {
        FetchError::Transport(String::from("response has no submission list"))
    })?;

    let solved: SolvedSet = submissions
        .iter()
        .filter(|submission| submission.is_accepted())
        .filter_map(|submission| {
            let problem_id = submission.problem.problem_id();
            if problem_id.is_none() {
                tracing::debug!(
                    "skip accepted submission of {} without contest id: {:?}",
                    handle,
                    submission.problem
                );
            }
            problem_id
        })
        .collect();

    tracing::info!(
        "{} has {} submissions and {} solved problems",
        handle,
        submissions.len(),
        solved.len()
    );

    Ok(solved)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codeforces::model::{Submission, SubmissionProblem};

    fn solved(ids: &[&str]) -> SolvedSet {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn extract_only_accepted_problems() {
        let payload = UserStatusResponse::ok(vec![
            Submission::new(1, "A", "OK"),
            Submission::new(1, "B", "WRONG_ANSWER"),
            Submission::new(1520, "G", "OK"),
            Submission::new(4, "A", "TIME_LIMIT_EXCEEDED"),
        ]);

        assert_eq!(extract("alice", payload), Ok(solved(&["1A", "1520G"])));
    }

    #[test]
    fn problem_solved_after_failures_counts_once() {
        let payload = UserStatusResponse::ok(vec![
            Submission::new(1, "A", "WRONG_ANSWER"),
            Submission::new(1, "A", "OK"),
            Submission::new(1, "A", "OK"),
            Submission::new(1, "A", "RUNTIME_ERROR"),
        ]);

        assert_eq!(extract("alice", payload), Ok(solved(&["1A"])));
    }

    #[test]
    fn stable_under_permutation_and_duplication() {
        let submissions = vec![
            Submission::new(2, "C", "OK"),
            Submission::new(3, "D", "WRONG_ANSWER"),
            Submission::new(1, "A", "OK"),
            Submission::new(5, "E1", "OK"),
        ];
        let expected = extract("alice", UserStatusResponse::ok(submissions.clone())).unwrap();

        let mut reversed = submissions.clone();
        reversed.reverse();
        assert_eq!(extract("alice", UserStatusResponse::ok(reversed)), Ok(expected.clone()));

        let mut duplicated = submissions.clone();
        duplicated.extend(submissions.into_iter());
        assert_eq!(extract("alice", UserStatusResponse::ok(duplicated)), Ok(expected));
    }

    #[test]
    fn skip_pending_and_contestless_submissions() {
        let pending = Submission {
            id: Some(1),
            problem: SubmissionProblem {
                contest_id: Some(1),
                index: String::from("A"),
                name: None,
            },
            verdict: None,
        };
        let contestless = Submission {
            id: Some(2),
            problem: SubmissionProblem {
                contest_id: None,
                index: String::from("100"),
                name: Some(String::from("A+B")),
            },
            verdict: Some(String::from("OK")),
        };

        let payload = UserStatusResponse::ok(vec![pending, contestless]);
        assert_eq!(extract("alice", payload), Ok(SolvedSet::new()));
    }

    #[test]
    fn empty_history_yields_empty_set() {
        assert_eq!(
            extract("  newcomer ", UserStatusResponse::ok(vec![])),
            Ok(SolvedSet::new())
        );
    }

    #[test]
    fn reject_failed_status() {
        let payload = UserStatusResponse::failed("handle: User with handle ghost not found");

        assert_eq!(
            extract("ghost", payload),
            Err(FetchError::RemoteRejected(String::from(
                "handle: User with handle ghost not found"
            )))
        );
    }

    #[test]
    fn failed_status_without_comment() {
        let payload = UserStatusResponse {
            status: String::from("FAILED"),
            comment: None,
            result: None,
        };

        assert_eq!(
            extract("ghost", payload),
            Err(FetchError::RemoteRejected(String::from("status FAILED")))
        );
    }

    #[test]
    fn missing_result_is_transport_failure() {
        let payload = UserStatusResponse {
            status: String::from("OK"),
            comment: None,
            result: None,
        };

        assert!(matches!(extract("alice", payload), Err(FetchError::Transport(_))));
    }
}
