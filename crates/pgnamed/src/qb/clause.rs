//! Clause storage: fragment groups and join records.

/// An ordered list of SQL fragments backing one clause (SELECT list, WHERE, ...).
///
/// Predicate groups (WHERE/HAVING) parenthesize each fragment when it is stored,
/// so joining members with `AND` keeps each fragment's own `OR`s intact.
#[derive(Clone, Debug, Default)]
pub struct ClauseGroup {
    fragments: Vec<String>,
    predicate: bool,
}

impl ClauseGroup {
    /// A group of plain fragments (`, `-joined).
    pub fn list() -> Self {
        Self {
            fragments: Vec::new(),
            predicate: false,
        }
    }

    /// A group of predicates (parenthesized, `AND`-joined).
    pub fn predicate() -> Self {
        Self {
            fragments: Vec::new(),
            predicate: true,
        }
    }

    fn wrap(&self, fragment: &str) -> String {
        if self.predicate {
            format!("({})", fragment)
        } else {
            fragment.to_string()
        }
    }

    /// Discard every stored fragment and store `fragment` alone.
    pub fn set(&mut self, fragment: &str) {
        self.fragments.clear();
        let stored = self.wrap(fragment);
        self.fragments.push(stored);
    }

    /// Append `fragment` after the stored ones.
    pub fn add(&mut self, fragment: &str) {
        let stored = self.wrap(fragment);
        self.fragments.push(stored);
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Stored fragments, as they will be rendered.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    fn separator(&self) -> &'static str {
        if self.predicate { " AND " } else { ", " }
    }

    /// Render as `KEYWORD member, member` (or `KEYWORD (p) AND (q)`), or `None` when empty.
    pub fn render(&self, keyword: &str) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }
        Some(format!("{} {}", keyword, self.fragments.join(self.separator())))
    }
}

/// Join flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    /// Bare `JOIN`.
    Plain,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// The SQL keyword(s) for this join.
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Plain => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

/// One `JOIN table ON (condition)` record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub on: String,
}

impl Join {
    pub fn new(kind: JoinKind, table: &str, on: &str) -> Self {
        Self {
            kind,
            table: table.to_string(),
            on: on.to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!("{} {} ON ({})", self.kind.keyword(), self.table, self.on)
    }
}
