use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    collections::HashSet,
    fmt,
    fs,
    path::Path,
    str::FromStr,
};
use thiserror::Error;

pub type ProblemId = String;

/// Ratings a catalog can be filtered by, in ascending order.
pub const RATINGS: [i32; 15] = [
    1600, 1700, 1800, 1900, 2000, 2100, 2200, 2300, 2400, 2500, 2600, 2700, 2800, 2900, 3000,
];

pub const DEFAULT_RATING_FILTER: RatingFilter = RatingFilter::Exact(1800);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file")]
    Io(#[from] std::io::Error),
    #[error("failed to deserialize catalog JSON")]
    Json(#[from] serde_json::Error),
    #[error("catalog file doesn't contain a problem array")]
    MissingArray,
    #[error("problem {0} appears more than once in the catalog")]
    DuplicateProblem(ProblemId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingFilterError {
    #[error("rating {0} is not one of the candidate ratings")]
    InvalidRating(i32),
    #[error("invalid rating filter `{0}`")]
    Unparsable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub problem_id: ProblemId,
    pub name: String,
    pub rating: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub solve_count: u64,
    #[serde(default, deserialize_with = "deserialize_length")]
    pub length: String,
    pub link: String,
}

/// Problem lengths are written as numbers by some catalog generators and as text by others.
fn deserialize_length<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Length {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Length::deserialize(deserializer)? {
        Length::Text(text) => text,
        Length::Integer(length) => length.to_string(),
        Length::Float(length) => length.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, SerializeDisplay, DeserializeFromStr)]
pub enum RatingFilter {
    #[default]
    All,
    Exact(i32),
}

impl RatingFilter {
    pub fn exact(rating: i32) -> Result<Self, RatingFilterError> {
        if RATINGS.contains(&rating) {
            Ok(RatingFilter::Exact(rating))
        } else {
            Err(RatingFilterError::InvalidRating(rating))
        }
    }

    pub fn matches(&self, problem: &Problem) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Exact(rating) => problem.rating == Some(*rating),
        }
    }
}

impl fmt::Display for RatingFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RatingFilter::All => write!(f, "all"),
            RatingFilter::Exact(rating) => write!(f, "{}", rating),
        }
    }
}

impl FromStr for RatingFilter {
    type Err = RatingFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(RatingFilter::All);
        }

        let rating = s
            .parse::<i32>()
            .map_err(|_| RatingFilterError::Unparsable(s.to_string()))?;
        RatingFilter::exact(rating)
    }
}

/// Immutable, ordered problem list the comparison is computed against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemCatalog {
    problems: Vec<Problem>,
}

impl ProblemCatalog {
    pub fn new(problems: Vec<Problem>) -> Result<Self, CatalogError> {
        {
            let mut seen: HashSet<&str> = HashSet::with_capacity(problems.len());
            for problem in problems.iter() {
                if !seen.insert(problem.problem_id.as_str()) {
                    return Err(CatalogError::DuplicateProblem(problem.problem_id.clone()));
                }
            }
        }

        Ok(Self { problems })
    }

    /// Parse a catalog from JSON text.
    ///
    /// Besides a bare JSON array, the generated `problems.js` module form
    /// (`export const problems = [...];` with leading comment lines) is accepted.
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        // `//` comment lines may themselves contain brackets.
        let code_lines: Vec<(usize, &str)> = source
            .split_inclusive('\n')
            .scan(0, |offset, line| {
                let start = *offset;
                *offset += line.len();
                Some((start, line))
            })
            .filter(|(_, line)| !line.trim_start().starts_with("//"))
            .collect();

        let begin = code_lines
            .iter()
            .find_map(|(start, line)| line.find('[').map(|i| start + i))
            .ok_or(CatalogError::MissingArray)?;
        let end = code_lines
            .iter()
            .rev()
            .find_map(|(start, line)| line.rfind(']').map(|i| start + i))
            .ok_or(CatalogError::MissingArray)?;
        if end < begin {
            return Err(CatalogError::MissingArray);
        }

        let problems: Vec<Problem> = serde_json::from_str(&source[begin..=end])?;
        Self::new(problems)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        tracing::info!("Load problem catalog from {}", path.display());
        let source = fs::read_to_string(path)?;
        let catalog = Self::from_json(&source)?;
        tracing::info!("{} problems loaded.", catalog.len());

        Ok(catalog)
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Problems matching `filter`, in catalog order.
    pub fn filter(&self, filter: RatingFilter) -> impl Iterator<Item = &Problem> + '_ {
        self.problems
            .iter()
            .filter(move |problem| filter.matches(problem))
    }
}
