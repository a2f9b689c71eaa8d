use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// Parses a pantry checklist: one item per line, `#` comments and blank lines
/// ignored, list numbering like `"3. Soy Sauce"` stripped. Items are
/// deduplicated case-insensitively, first occurrence wins.
pub fn parse_checklist(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(strip_numbering)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn strip_numbering(line: &str) -> &str {
    match line.split_once(". ") {
        Some((prefix, rest)) if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) => {
            rest.trim()
        }
        _ => line,
    }
}

pub async fn load_checklist(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read pantry checklist '{}'", path.display()))?;
    Ok(parse_checklist(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_checklist_strips_numbering_and_comments() {
        let text = "# weekly pantry\n1. Milk\n2. Potatoes\n\n  Salt and Pepper \n4. Soy Sauce\n";
        assert_eq!(
            parse_checklist(text),
            vec!["Milk", "Potatoes", "Salt and Pepper", "Soy Sauce"]
        );
    }

    #[test]
    fn test_parse_checklist_dedups_case_insensitively() {
        assert_eq!(parse_checklist("Milk\nmilk\n2. MILK\neggs"), vec!["Milk", "eggs"]);
    }

    #[test]
    fn test_non_numeric_prefix_is_kept() {
        assert_eq!(parse_checklist("St. Agur cheese"), vec!["St. Agur cheese"]);
    }

    #[tokio::test]
    async fn test_load_checklist_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "1. Potatoes\n2. Butter")?;
        let items = load_checklist(file.path()).await?;
        assert_eq!(items, vec!["Potatoes", "Butter"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_checklist_missing_file_has_context() {
        let err = load_checklist(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("pantry checklist"));
    }
}
