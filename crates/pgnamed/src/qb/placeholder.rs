//! `:name` placeholder scanning.
//!
//! A placeholder is a `:` followed by an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
//! The token always extends over the whole identifier run, so `:id` is never
//! found inside `:id2`. A `:` that touches another `:` is part of a Postgres
//! cast (`created_at::date`) and never starts a placeholder.

/// A `:name` token found in SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Identifier without the leading `:`.
    pub name: &'a str,
    /// Byte offset of the `:`.
    pub start: usize,
    /// Byte offset just past the identifier.
    pub end: usize,
}

/// Iterator over the placeholders of a SQL string, in textual order.
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    sql: &'a str,
    pos: usize,
}

/// Scan `sql` for `:name` placeholders.
pub fn placeholders(sql: &str) -> Placeholders<'_> {
    Placeholders { sql, pos: 0 }
}

fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic()
}

fn is_ident_char(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// Whether `name` can appear as a placeholder token.
pub fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => is_ident_start(first) && rest.iter().all(|&b| is_ident_char(b)),
        None => false,
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.sql.as_bytes();
        while self.pos < bytes.len() {
            let i = self.pos;
            self.pos += 1;

            if bytes[i] != b':' {
                continue;
            }
            // `::` cast operator
            if i > 0 && bytes[i - 1] == b':' {
                continue;
            }
            match bytes.get(i + 1) {
                Some(&b) if is_ident_start(b) => {}
                _ => continue,
            }

            let mut end = i + 2;
            while end < bytes.len() && is_ident_char(bytes[end]) {
                end += 1;
            }
            self.pos = end;
            return Some(Placeholder {
                name: &self.sql[i + 1..end],
                start: i,
                end,
            });
        }
        None
    }
}

/// Replace every placeholder for which `replacement` returns `Some`.
///
/// Placeholders mapped to `None` are copied through unchanged.
pub fn rewrite<'r, F>(sql: &str, mut replacement: F) -> String
where
    F: FnMut(&str) -> Option<&'r str>,
{
    let mut out = String::with_capacity(sql.len());
    let mut last = 0;
    for ph in placeholders(sql) {
        if let Some(text) = replacement(ph.name) {
            out.push_str(&sql[last..ph.start]);
            out.push_str(text);
            last = ph.end;
        }
    }
    out.push_str(&sql[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sql: &str) -> Vec<&str> {
        placeholders(sql).map(|p| p.name).collect()
    }

    #[test]
    fn finds_tokens_in_order() {
        assert_eq!(
            names("a = :a AND (b IN (:list) OR c = :a)"),
            vec!["a", "list", "a"]
        );
    }

    #[test]
    fn token_covers_whole_identifier() {
        assert_eq!(names("id = :id OR id = :id2 OR x = :id_x"), vec!["id", "id2", "id_x"]);
    }

    #[test]
    fn skips_casts_and_non_identifiers() {
        assert_eq!(names("created_at::date = :day"), vec!["day"]);
        assert_eq!(names(":v::int"), vec!["v"]);
        assert_eq!(names("'10:30' || : x || :1"), Vec::<&str>::new());
        assert_eq!(names("trailing :"), Vec::<&str>::new());
    }

    #[test]
    fn rewrite_only_touches_mapped_names() {
        let out = rewrite("x = :x AND y = :y AND x2 = :x2", |name| match name {
            "x" => Some("$1"),
            "x2" => Some("$2"),
            _ => None,
        });
        assert_eq!(out, "x = $1 AND y = :y AND x2 = $2");
    }

    #[test]
    fn valid_names() {
        assert!(is_valid_name("user_id"));
        assert!(is_valid_name("_x1"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1x"));
        assert!(!is_valid_name("user-id"));
        assert!(!is_valid_name(":x"));
    }
}
