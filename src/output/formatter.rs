use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::evaluation::EvaluationData;
use crate::scoring::{EvaluationLevel, ScoreSummary};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Color a level by its tier
fn format_level(level: EvaluationLevel, use_colors: bool) -> String {
    if !use_colors {
        return level.as_str().to_string();
    }
    match level {
        EvaluationLevel::Outstanding => level.as_str().green().bold().to_string(),
        EvaluationLevel::VeryGood => level.as_str().cyan().to_string(),
        EvaluationLevel::Good => level.as_str().to_string(),
        EvaluationLevel::Fair => level.as_str().yellow().to_string(),
        EvaluationLevel::NeedsImprovement => level.as_str().red().bold().to_string(),
    }
}

/// Render the score summary block: both parts, the total, and the level.
pub fn format_summary(summary: &ScoreSummary, use_colors: bool) -> String {
    let total = format!("{:>6.2} / 100", summary.total_score);
    let lines = [
        format!(
            "Part 1 (achievement)  {:>6.2} / 80",
            summary.part1_weighted
        ),
        format!(
            "Part 2 (competency)   {:>6.2} / 20",
            summary.part2_weighted
        ),
        format!(
            "Total                 {}",
            if use_colors {
                total.bold().to_string()
            } else {
                total
            }
        ),
        format!(
            "Level                 {}",
            format_level(summary.level, use_colors)
        ),
    ];
    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a rubric name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width left for rubric names after index, score, and weight columns.
fn name_width() -> usize {
    // " 1.  " + name + "  " + "12/15" + "  w20" fixed parts are ~17 chars.
    match get_terminal_width() {
        Some(width) if width > 37 => width - 17,
        Some(_) => 20,
        None => usize::MAX, // Pipe: don't truncate.
    }
}

/// Render the per-item breakdown: one line per KPI item, one per section.
/// Index columns are 1-based to match the printed rubric forms.
pub fn format_breakdown(data: &EvaluationData, use_colors: bool) -> String {
    let width = name_width();
    let mut lines = Vec::new();

    lines.push(section_header("Part 1: key performance indicators", use_colors));
    for (idx, item) in data.part1.iter().enumerate() {
        let name = truncate_name(&item.name, width);
        lines.push(format!(
            "{:>2}.  {:<name_pad$}  {}/5  w{}",
            idx + 1,
            name,
            item.score,
            item.weight,
            name_pad = width.min(60),
        ));
    }

    lines.push(String::new());
    lines.push(section_header("Part 2: competencies", use_colors));
    for (idx, section) in data.part2.iter().enumerate() {
        let name = truncate_name(&section.name, width);
        lines.push(format!(
            "{:>2}.  {:<name_pad$}  {}/{}  w{}",
            idx + 1,
            name,
            section.raw_score(),
            section.max_score(),
            section.weight,
            name_pad = width.min(60),
        ));
    }

    lines.join("\n")
}

fn section_header(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_summary;

    fn sample_data() -> EvaluationData {
        let mut data = EvaluationData::template();
        for item in &mut data.part1 {
            item.score = 4;
        }
        for section in &mut data.part2 {
            for item in &mut section.items {
                item.score = 3;
            }
        }
        data
    }

    #[test]
    fn test_format_summary_plain() {
        let data = sample_data();
        let summary = compute_summary(&data.part1, &data.part2);
        let result = format_summary(&summary, false);

        assert!(result.contains("Part 1 (achievement)   64.00 / 80"));
        assert!(result.contains("Part 2 (competency)    12.00 / 20"));
        assert!(result.contains("76.00 / 100"));
        assert!(result.contains("Level                 Good"));
    }

    #[test]
    fn test_format_summary_level_strings() {
        let data = EvaluationData::template();
        let summary = compute_summary(&data.part1, &data.part2);
        let result = format_summary(&summary, false);
        assert!(result.contains("Needs Improvement"));
    }

    #[test]
    fn test_format_breakdown_lists_every_row() {
        let data = sample_data();
        let result = format_breakdown(&data, false);

        assert!(result.contains("Part 1: key performance indicators"));
        assert!(result.contains("Part 2: competencies"));
        for item in &data.part1 {
            assert!(result.contains("4/5"));
            assert!(result.contains(&format!("w{}", item.weight)));
        }
        // Section rows show raw/max, not weighted values.
        assert!(result.contains("9/15"));
    }

    #[test]
    fn test_format_breakdown_indices_are_one_based() {
        let data = sample_data();
        let result = format_breakdown(&data, false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[1].starts_with(" 1."));
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Teamwork", 20), "Teamwork");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(
            truncate_name("A very long competency name", 15),
            "A very long ..."
        );
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Teamwork", 3), "Tea");
    }
}
