use crate::catalog::ProblemId;
use serde::{Deserialize, Serialize};

pub const STATUS_OK: &str = "OK";
pub const VERDICT_OK: &str = "OK";

/// Body of the `user.status` API method.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserStatusResponse {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<Vec<Submission>>,
}

impl UserStatusResponse {
    pub fn ok(submissions: Vec<Submission>) -> Self {
        Self {
            status: String::from(STATUS_OK),
            comment: None,
            result: Some(submissions),
        }
    }

    pub fn failed(comment: impl ToString) -> Self {
        Self {
            status: String::from("FAILED"),
            comment: Some(comment.to_string()),
            result: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Option<u64>,
    pub problem: SubmissionProblem,
    // Absent while the submission is still waiting in the judge queue.
    pub verdict: Option<String>,
}

impl Submission {
    pub fn new(contest_id: u32, index: &str, verdict: &str) -> Self {
        Self {
            id: None,
            problem: SubmissionProblem {
                contest_id: Some(contest_id),
                index: index.to_string(),
                name: None,
            },
            verdict: Some(verdict.to_string()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict.as_deref() == Some(VERDICT_OK)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionProblem {
    pub contest_id: Option<u32>,
    pub index: String,
    pub name: Option<String>,
}

impl SubmissionProblem {
    /// `<contestId><index>`, e.g. `1520G`. Problems outside of a contest have no id.
    pub fn problem_id(&self) -> Option<ProblemId> {
        self.contest_id
            .map(|contest_id| format!("{}{}", contest_id, self.index))
    }
}
