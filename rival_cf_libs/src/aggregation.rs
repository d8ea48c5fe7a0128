use crate::{
    catalog::{Problem, ProblemCatalog, RatingFilter},
    registry::{Color, User, UserId},
};
use serde::Serialize;

/// Visual key of a row, derived only from the ordered colors of its solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowStyle {
    Neutral,
    Solid { color: Color },
    Blend { from: Color, to: Color },
}

impl RowStyle {
    pub fn classify<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        let mut colors = colors.into_iter();
        let first = match colors.next() {
            Some(first) => first,
            None => return RowStyle::Neutral,
        };

        match colors.last() {
            Some(last) => RowStyle::Blend {
                from: first,
                to: last,
            },
            None => RowStyle::Solid { color: first },
        }
    }

    /// Inline CSS for the row, `None` for unsolved rows.
    pub fn css(&self) -> Option<String> {
        match self {
            RowStyle::Neutral => None,
            RowStyle::Solid { color } => Some(format!(
                "background: linear-gradient(135deg, {0}50 0%, {0}35 100%); border-left: 5px solid {0};",
                color
            )),
            RowStyle::Blend { from, to } => Some(format!(
                "background: linear-gradient(135deg, {0}50 0%, {1}50 100%); border-left: 5px solid {0};",
                from, to
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedRow<'a> {
    pub problem: &'a Problem,
    pub solvers: Vec<&'a User>,
    pub style: RowStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStat<'a> {
    #[serde(flatten)]
    pub user: &'a User,
    pub solve_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult<'a> {
    pub filter: RatingFilter,
    pub user_stats: Vec<UserStat<'a>>,
    pub total_unique_solved: usize,
    pub solved_by_all: usize,
    pub rows: Vec<AggregatedRow<'a>>,
}

impl<'a> AggregationResult<'a> {
    /// Number of problems left after filtering.
    pub fn total_problems(&self) -> usize {
        self.rows.len()
    }

    pub fn solve_count(&self, id: UserId) -> Option<usize> {
        self.user_stats
            .iter()
            .find(|stat| stat.user.id() == id)
            .map(|stat| stat.solve_count)
    }
}

pub fn aggregate<'a>(
    catalog: &'a ProblemCatalog,
    users: &'a [User],
    filter: RatingFilter,
) -> AggregationResult<'a> {
    let rows: Vec<AggregatedRow<'a>> = catalog
        .filter(filter)
        .map(|problem| {
            let solvers: Vec<&'a User> = users
                .iter()
                .filter(|user| user.has_solved(&problem.problem_id))
                .collect();
            let style = RowStyle::classify(solvers.iter().map(|user| user.color()));

            AggregatedRow {
                problem,
                solvers,
                style,
            }
        })
        .collect();

    let user_stats = users
        .iter()
        .map(|user| UserStat {
            user,
            solve_count: rows
                .iter()
                .filter(|row| row.solvers.iter().any(|solver| solver.id() == user.id()))
                .count(),
        })
        .collect();
    let total_unique_solved = rows.iter().filter(|row| !row.solvers.is_empty()).count();
    let solved_by_all = if users.is_empty() {
        0
    } else {
        rows.iter()
            .filter(|row| row.solvers.len() == users.len())
            .count()
    };

    AggregationResult {
        filter,
        user_stats,
        total_unique_solved,
        solved_by_all,
        rows,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        codeforces::SolvedSet,
        registry::{UserRegistry, PALETTE},
    };

    fn problem(problem_id: &str, rating: i32) -> Problem {
        Problem {
            problem_id: problem_id.to_string(),
            name: format!("Problem {}", problem_id),
            rating: Some(rating),
            tags: vec![],
            solve_count: 0,
            length: String::new(),
            link: String::new(),
        }
    }

    fn solved(ids: &[&str]) -> SolvedSet {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn registry(users: &[(&str, &[&str])]) -> UserRegistry {
        let mut registry = UserRegistry::new(users.iter().map(|(handle, _)| *handle)).unwrap();
        for (i, (_, ids)) in users.iter().enumerate() {
            let id = registry.users()[i].id();
            registry.set_solved(id, solved(ids)).unwrap();
        }
        registry
    }

    fn solver_handles<'a>(row: &AggregatedRow<'a>) -> Vec<&'a str> {
        row.solvers.iter().map(|&user| user.handle()).collect()
    }

    #[test]
    fn single_user_over_all_problems() {
        let catalog =
            ProblemCatalog::new(vec![problem("1A", 1600), problem("1B", 1700)]).unwrap();
        let registry = registry(&[("alice", &["1A"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::All);

        assert_eq!(result.user_stats[0].solve_count, 1);
        assert_eq!(result.total_unique_solved, 1);
        assert_eq!(result.total_problems(), 2);
        assert_eq!(result.rows[0].problem.problem_id, "1A");
        assert_eq!(solver_handles(&result.rows[0]), vec!["alice"]);
        assert_eq!(result.rows[1].problem.problem_id, "1B");
        assert!(result.rows[1].solvers.is_empty());
        assert_eq!(result.rows[1].style, RowStyle::Neutral);
    }

    #[test]
    fn shared_problem_counts_once() {
        let catalog = ProblemCatalog::new(vec![problem("2C", 1800)]).unwrap();
        let registry = registry(&[("alice", &["2C"]), ("bob", &["2C"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::All);

        assert_eq!(result.user_stats[0].solve_count, 1);
        assert_eq!(result.user_stats[1].solve_count, 1);
        assert_eq!(result.total_unique_solved, 1);
        assert_eq!(result.solved_by_all, 1);
    }

    #[test]
    fn disjoint_users_sum_up() {
        let catalog = ProblemCatalog::new(vec![
            problem("1A", 1800),
            problem("1B", 1800),
            problem("1C", 1800),
            problem("1D", 1800),
        ])
        .unwrap();
        let registry = registry(&[("alice", &["1A", "1B"]), ("bob", &["1D"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::All);

        let alice = registry.users()[0].id();
        let bob = registry.users()[1].id();
        assert_eq!(result.solve_count(alice), Some(2));
        assert_eq!(result.solve_count(bob), Some(1));
        assert_eq!(result.total_unique_solved, 3);
        assert_eq!(result.solved_by_all, 0);
    }

    #[test]
    fn two_user_overlap_follows_inclusion_exclusion() {
        let catalog = ProblemCatalog::new(
            ["1A", "1B", "1C", "1D", "1E"]
                .iter()
                .map(|id| problem(id, 2000))
                .collect(),
        )
        .unwrap();
        let registry = registry(&[("alice", &["1A", "1B", "1C"]), ("bob", &["1B", "1C", "1E"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::All);

        let union = result.total_unique_solved;
        let intersection = result.solved_by_all;
        assert_eq!(union, 4);
        assert_eq!(intersection, 2);
        assert_eq!(
            intersection,
            result.user_stats[0].solve_count + result.user_stats[1].solve_count - union
        );
    }

    #[test]
    fn counts_only_filtered_problems() {
        let catalog = ProblemCatalog::new(vec![
            problem("1A", 1800),
            problem("1B", 1900),
            problem("1C", 1800),
        ])
        .unwrap();
        let registry = registry(&[("alice", &["1A", "1B", "999Z"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::Exact(1800));

        assert_eq!(result.total_problems(), 2);
        assert_eq!(result.user_stats[0].solve_count, 1);
        assert_eq!(result.total_unique_solved, 1);
        let ids: Vec<&str> = result
            .rows
            .iter()
            .map(|row| row.problem.problem_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1A", "1C"]);
    }

    #[test]
    fn unique_count_equals_rows_with_solvers() {
        let catalog = ProblemCatalog::new(
            (1..=20)
                .map(|i| problem(&format!("{}A", i), 1600 + (i % 3) * 100))
                .collect(),
        )
        .unwrap();
        let registry = registry(&[
            ("alice", &["1A", "2A", "3A", "10A"]),
            ("bob", &["2A", "5A", "17A"]),
            ("carol", &["3A", "5A", "20A"]),
        ]);

        for filter in [
            RatingFilter::All,
            RatingFilter::Exact(1600),
            RatingFilter::Exact(1700),
            RatingFilter::Exact(1800),
        ] {
            let result = aggregate(&catalog, registry.users(), filter);
            let with_solvers = result
                .rows
                .iter()
                .filter(|row| !row.solvers.is_empty())
                .count();
            assert_eq!(result.total_unique_solved, with_solvers);
        }
    }

    #[test]
    fn solvers_follow_registry_order() {
        let catalog = ProblemCatalog::new(vec![problem("4A", 1600)]).unwrap();
        let registry = registry(&[("carol", &["4A"]), ("alice", &[]), ("bob", &["4A"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::All);

        assert_eq!(solver_handles(&result.rows[0]), vec!["carol", "bob"]);
        assert_eq!(
            result.rows[0].style,
            RowStyle::Blend {
                from: PALETTE[0],
                to: PALETTE[2]
            }
        );
    }

    #[test]
    fn aggregate_is_idempotent() {
        let catalog = ProblemCatalog::new(vec![
            problem("1A", 1600),
            problem("1B", 1700),
            problem("1C", 1600),
        ])
        .unwrap();
        let registry = registry(&[("alice", &["1A", "1B"]), ("bob", &["1B", "1C"])]);

        let first = aggregate(&catalog, registry.users(), RatingFilter::Exact(1600));
        let second = aggregate(&catalog, registry.users(), RatingFilter::Exact(1600));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_catalog() {
        let catalog = ProblemCatalog::default();
        let registry = registry(&[("alice", &["1A"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::All);

        assert_eq!(result.total_problems(), 0);
        assert_eq!(result.total_unique_solved, 0);
        assert_eq!(result.solved_by_all, 0);
        assert_eq!(result.user_stats[0].solve_count, 0);
    }

    #[test]
    fn classify_row_styles() {
        assert_eq!(RowStyle::classify(vec![]), RowStyle::Neutral);
        assert_eq!(
            RowStyle::classify(vec![PALETTE[3]]),
            RowStyle::Solid { color: PALETTE[3] }
        );
        assert_eq!(
            RowStyle::classify(vec![PALETTE[1], PALETTE[5], PALETTE[2]]),
            RowStyle::Blend {
                from: PALETTE[1],
                to: PALETTE[2]
            }
        );
        assert_ne!(
            RowStyle::classify(vec![PALETTE[1], PALETTE[2]]),
            RowStyle::classify(vec![PALETTE[2], PALETTE[1]])
        );
    }

    #[test]
    fn render_row_css() {
        assert_eq!(RowStyle::Neutral.css(), None);
        assert_eq!(
            RowStyle::Solid { color: PALETTE[0] }.css().unwrap(),
            "background: linear-gradient(135deg, #10b98150 0%, #10b98135 100%); border-left: 5px solid #10b981;"
        );
        assert_eq!(
            RowStyle::Blend {
                from: PALETTE[0],
                to: PALETTE[1]
            }
            .css()
            .unwrap(),
            "background: linear-gradient(135deg, #10b98150 0%, #3b82f650 100%); border-left: 5px solid #10b981;"
        );
    }

    #[test]
    fn serialize_result() {
        let catalog = ProblemCatalog::new(vec![problem("1A", 1600)]).unwrap();
        let registry = registry(&[("alice", &["1A"])]);

        let result = aggregate(&catalog, registry.users(), RatingFilter::Exact(1600));
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["filter"], "1600");
        assert_eq!(value["user_stats"][0]["handle"], "alice");
        assert_eq!(value["user_stats"][0]["color"], "#10b981");
        assert_eq!(value["user_stats"][0]["solve_count"], 1);
        assert_eq!(value["rows"][0]["problem"]["problemId"], "1A");
        assert_eq!(value["rows"][0]["style"]["kind"], "solid");
        assert_eq!(value["rows"][0]["solvers"][0]["id"], 0);
    }
}
