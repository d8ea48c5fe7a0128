use rival_cf_libs::{
    AggregatedRow, AggregationResult, Color, FetchFailure, Page, Problem, RatingFilter, RowStyle,
    UserId,
};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub stats: CompareStats,
    pub users: Vec<UserSummary>,
    pub items: Vec<RowResponse>,
    pub failures: Vec<FailureResponse>,
    pub message: Option<String>,
}

impl CompareResponse {
    pub fn new(
        time: u32,
        params: &impl Serialize,
        result: &AggregationResult,
        page: &Page<AggregatedRow>,
        failures: &[FetchFailure],
    ) -> Self {
        let stats = CompareStats {
            time,
            rating: Some(result.filter),
            total: result.total_problems(),
            unique: result.total_unique_solved,
            solved_by_all: result.solved_by_all,
            index: page.current_page,
            pages: page.total_pages,
            count: page.items.len(),
            start: page.start_index,
            end: page.end_index,
            params: json!(params),
        };
        let users = result
            .user_stats
            .iter()
            .map(|stat| UserSummary {
                id: stat.user.id(),
                handle: stat.user.handle().to_string(),
                color: stat.user.color(),
                solve_count: stat.solve_count,
            })
            .collect();
        let items = page.items.iter().map(RowResponse::from).collect();
        let failures = failures
            .iter()
            .map(|failure| FailureResponse {
                handle: failure.handle.clone(),
                message: failure.error.to_string(),
            })
            .collect();

        Self {
            stats,
            users,
            items,
            failures,
            message: None,
        }
    }

    pub fn error(params: &impl Serialize, message: impl ToString) -> Self {
        Self {
            stats: CompareStats {
                time: 0,
                rating: None,
                total: 0,
                unique: 0,
                solved_by_all: 0,
                index: 0,
                pages: 0,
                count: 0,
                start: 0,
                end: 0,
                params: json!(params),
            },
            users: Vec::new(),
            items: Vec::new(),
            failures: Vec::new(),
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompareStats {
    pub time: u32,
    pub rating: Option<RatingFilter>,
    /// Problems matching the rating filter.
    pub total: usize,
    pub unique: usize,
    pub solved_by_all: usize,
    pub index: usize,
    pub pages: usize,
    pub count: usize,
    /// Zero-based, inclusive.
    pub start: usize,
    /// Zero-based, exclusive.
    pub end: usize,
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub handle: String,
    pub color: Color,
    pub solve_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RowResponse {
    #[serde(flatten)]
    pub problem: Problem,
    pub solvers: Vec<String>,
    pub style: RowStyle,
    pub css: Option<String>,
}

impl From<&AggregatedRow<'_>> for RowResponse {
    fn from(row: &AggregatedRow<'_>) -> Self {
        Self {
            problem: row.problem.clone(),
            solvers: row
                .solvers
                .iter()
                .map(|user| user.handle().to_string())
                .collect(),
            style: row.style,
            css: row.style.css(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub handle: String,
    pub message: String,
}
