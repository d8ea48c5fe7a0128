pub mod aggregation;
pub mod catalog;
pub mod codeforces;
pub mod pagination;
pub mod refresh;
pub mod registry;

pub use aggregation::{aggregate, AggregatedRow, AggregationResult, RowStyle, UserStat};
pub use catalog::{
    Problem, ProblemCatalog, ProblemId, RatingFilter, DEFAULT_RATING_FILTER, RATINGS,
};
pub use codeforces::{CodeforcesClient, FetchError, SolvedSet, SubmissionSource};
pub use pagination::{paginate, Page, PageState, PaginationError, ITEMS_PER_PAGE};
pub use refresh::{refresh, FetchFailure, RefreshReport};
pub use registry::{Color, RegistryError, User, UserId, UserRegistry, PALETTE};
