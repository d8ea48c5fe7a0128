use itertools::Itertools;
use rival_cf_libs::{AggregatedRow, AggregationResult, Page};
use std::io::{self, Write};

const HEADERS: [&str; 7] = ["Solved by", "Problem", "Rating", "Tags", "Solves", "Length", "Link"];

/// `12345` -> `12,345`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let head = digits.len() % 3;
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - head) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn cells(row: &AggregatedRow) -> [String; 7] {
    let problem = row.problem;
    [
        row.solvers.iter().map(|user| user.handle()).join(", "),
        problem.name.clone(),
        problem
            .rating
            .map(|rating| rating.to_string())
            .unwrap_or(String::from("-")),
        if problem.tags.is_empty() {
            String::from("-")
        } else {
            problem.tags.iter().join(", ")
        },
        group_thousands(problem.solve_count),
        problem.length.clone(),
        format!("{} {}", problem.problem_id, problem.link),
    ]
}

fn write_line<W: Write>(out: &mut W, columns: &[String], widths: &[usize]) -> io::Result<()> {
    let line = columns
        .iter()
        .zip(widths.iter())
        .map(|(column, width)| format!("{:<width$}", column, width = width))
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}

pub fn write_report<W: Write>(
    out: &mut W,
    result: &AggregationResult,
    page: &Page<AggregatedRow>,
) -> io::Result<()> {
    if result
        .user_stats
        .iter()
        .any(|stat| !stat.user.solved().is_empty())
    {
        for stat in result.user_stats.iter() {
            writeln!(
                out,
                "{} ({}): {} / {}",
                stat.user.handle(),
                stat.user.color(),
                stat.solve_count,
                result.total_problems()
            )?;
        }
        writeln!(out, "Total Unique: {}", result.total_unique_solved)?;
        writeln!(out, "Solved By All: {}", result.solved_by_all)?;
        writeln!(out)?;
    }

    let start = if page.total_items == 0 {
        0
    } else {
        page.start_index + 1
    };
    writeln!(
        out,
        "Showing {}–{} of {} problems (rating: {})",
        start, page.end_index, page.total_items, result.filter
    )?;

    let rows: Vec<[String; 7]> = page.items.iter().map(cells).collect();
    let mut widths: Vec<usize> = HEADERS.iter().map(|header| header.chars().count()).collect();
    for row in rows.iter() {
        for (width, column) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(column.chars().count());
        }
    }

    let headers: Vec<String> = HEADERS.iter().map(|header| header.to_string()).collect();
    write_line(out, &headers, &widths)?;
    writeln!(out, "{}", widths.iter().map(|width| "-".repeat(*width)).join("-+-"))?;
    for row in rows.iter() {
        write_line(out, row, &widths)?;
    }

    if page.total_pages > 1 {
        writeln!(out)?;
        writeln!(out, "Page {} of {}", page.current_page, page.total_pages)?;
    }

    Ok(())
}
