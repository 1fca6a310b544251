//! Placeholder rendering.
//!
//! Statements are assembled with positional `?` placeholders and rewritten
//! to PostgreSQL's `$1, $2, ...` right before execution.

/// Replace every `?` outside single-quoted literals with `$n`, numbering
/// from `1`.
pub fn numbered_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut index = 0usize;
    let mut in_literal = false;

    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                index += 1;
                out.push('$');
                out.push_str(&index.to_string());
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Number of `?` placeholders outside single-quoted literals.
pub fn placeholder_count(sql: &str) -> usize {
    let mut count = 0;
    let mut in_literal = false;
    for ch in sql.chars() {
        match ch {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_in_order() {
        assert_eq!(
            numbered_placeholders("UPDATE movies SET name = ?, plot = ? WHERE id = ?"),
            "UPDATE movies SET name = $1, plot = $2 WHERE id = $3"
        );
    }

    #[test]
    fn leaves_literals_alone() {
        let sql = "SELECT '?' AS q FROM movies WHERE id = ? AND note = 'it''s ?'";
        assert_eq!(
            numbered_placeholders(sql),
            "SELECT '?' AS q FROM movies WHERE id = $1 AND note = 'it''s ?'"
        );
        assert_eq!(placeholder_count(sql), 1);
    }

    #[test]
    fn passes_through_without_placeholders() {
        assert_eq!(numbered_placeholders("SELECT 1"), "SELECT 1");
        assert_eq!(placeholder_count("SELECT 1"), 0);
    }

    #[test]
    fn counts_past_nine() {
        let sql = vec!["?"; 11].join(", ");
        let rendered = numbered_placeholders(&sql);
        assert!(rendered.ends_with("$10, $11"));
        assert_eq!(placeholder_count(&sql), 11);
    }
}
