//! Selector compilation.
//!
//! ```text
//! selector       := qualifier ('.' qualifier)*
//! qualifier      := name? ('[' predicate_list ']')?
//! predicate_list := predicate (('&' | '|') predicate)*
//! predicate      := attr_name operator '"' value '"'
//! operator       := '=' | '!=' | '*=' | '!*=' | '%='
//! attr_name      := ASCII word characters, or '@content'
//! ```
//!
//! `&` binds predicates into the current group, `|` starts a new group. A
//! qualifier is satisfied by any group whose predicates all hold.

use core::fmt;
use std::mem;
use std::str::FromStr;

use regex::Regex;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::QueryError;

/// Predicate name that tests a node's own text instead of an attribute.
pub const CONTENT_SELECTOR: &str = "@content";

/// Comparison applied by a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum Operator {
    /// `=`: exact match.
    #[strum(serialize = "=")]
    Equal,
    /// `!=`: anything but an exact match.
    #[strum(serialize = "!=")]
    NotEqual,
    /// `*=`: contains the value as a substring.
    #[strum(serialize = "*=")]
    Includes,
    /// `!*=`: does not contain the value.
    #[strum(serialize = "!*=")]
    Excludes,
    /// `%=`: the value is a regular expression that must match somewhere.
    #[strum(serialize = "%=")]
    Regex,
}

/// One `name operator "value"` predicate.
#[derive(Debug, Clone)]
pub struct Condition {
    name: String,
    operator: Operator,
    value: String,
    pattern: Option<Regex>,
}

impl Condition {
    /// Attribute name, or [`CONTENT_SELECTOR`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The comparison.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// The value to compare against, or the regex source for
    /// [`Operator::Regex`].
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The compiled pattern; `Some` exactly when the operator is
    /// [`Operator::Regex`].
    #[must_use]
    pub const fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Does the predicate hold for `subject`?
    #[must_use]
    pub fn test(&self, subject: &str) -> bool {
        match self.operator {
            Operator::Equal => subject == self.value,
            Operator::NotEqual => subject != self.value,
            Operator::Includes => subject.contains(self.value.as_str()),
            Operator::Excludes => !subject.contains(self.value.as_str()),
            Operator::Regex => self.pattern.as_ref().is_some_and(|p| p.is_match(subject)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}\"{}\"", self.name, self.operator, self.value)
    }
}

/// A compiled selector: one qualifier plus the chain that follows it.
///
/// Compile once and reuse; a `Query` is immutable and `Send + Sync`.
///
/// ```
/// use tagsoup_query::Query;
///
/// let query: Query = r#"div[id="app" | class*="bb"].p"#.parse().unwrap();
/// assert_eq!(query.name(), "div");
/// assert_eq!(query.query_list().len(), 2);
/// assert_eq!(query.next().map(Query::name), Some("p"));
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    name: String,
    query_list: Vec<Vec<Condition>>,
    next: Option<Box<Query>>,
}

impl Query {
    /// Compile a selector.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] describing the first problem found.
    pub fn compile(selector: &str) -> Result<Self, QueryError> {
        let selector = selector.trim_matches([' ', '\t']);
        if selector.is_empty() {
            return Err(QueryError::EmptySelector);
        }

        let (qualifier, rest) = split_qualifier(selector);
        if qualifier.is_empty() {
            return Err(QueryError::NoValidQualifier);
        }
        let (name, predicates) = split_predicates(qualifier);
        let query_list = parse_predicates(predicates)?;

        let next = match rest {
            Some(rest) if !rest.is_empty() => Some(Box::new(Self::compile(rest)?)),
            _ => None,
        };

        Ok(Self {
            name: name.trim().to_string(),
            query_list,
            next,
        })
    }

    /// Required tag name; empty matches any name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Predicate groups: the outer list is OR-ed, each inner list AND-ed.
    #[must_use]
    pub fn query_list(&self) -> &[Vec<Condition>] {
        &self.query_list
    }

    /// The qualifier applied to children of nodes matching this one.
    #[must_use]
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.query_list.is_empty() {
            f.write_str("[")?;
            for (i, group) in self.query_list.iter().enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                for (j, condition) in group.iter().enumerate() {
                    if j > 0 {
                        f.write_str(" & ")?;
                    }
                    write!(f, "{condition}")?;
                }
            }
            f.write_str("]")?;
        }
        if let Some(next) = &self.next {
            write!(f, ".{next}")?;
        }
        Ok(())
    }
}

/// Split off the first qualifier at a `.` outside double quotes.
fn split_qualifier(selector: &str) -> (&str, Option<&str>) {
    let mut in_quote = false;
    for (i, c) in selector.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '.' if !in_quote => return (&selector[..i], Some(&selector[i + 1..])),
            _ => {}
        }
    }
    (selector, None)
}

/// Split a qualifier into its name and the text between `[` and the
/// matching `]`. Anything after the `]` is ignored.
fn split_predicates(qualifier: &str) -> (&str, &str) {
    let Some(open) = qualifier.find('[') else {
        return (qualifier, "");
    };
    let body = &qualifier[open + 1..];

    let mut in_quote = false;
    for (i, c) in body.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            ']' if !in_quote => return (&qualifier[..open], &body[..i]),
            _ => {}
        }
    }
    (&qualifier[..open], body)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Position {
    #[default]
    Name,
    Operator,
    Value,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Relation {
    #[default]
    And,
    Or,
}

/// Character-at-a-time predicate list parser.
#[derive(Debug, Default)]
struct PredicateParser {
    groups: Vec<Vec<Condition>>,
    name: String,
    operator: String,
    value: String,
    relation: Relation,
    position: Position,
}

impl PredicateParser {
    fn feed(&mut self, c: char) -> Result<(), QueryError> {
        match (c, self.position) {
            (' ', position) if position != Position::Value => {}

            ('=' | '!' | '*' | '%', Position::Name) => {
                self.position = Position::Operator;
                self.operator.push(c);
            }
            ('=' | '!' | '*' | '%', Position::Operator) => self.operator.push(c),

            ('"' | '&' | '|', Position::Name) => {
                return Err(QueryError::InvalidAttributeName(self.name.clone()));
            }
            ('"', Position::Operator) => self.position = Position::Value,
            ('"', Position::Value) => self.position = Position::Finish,

            ('&' | '|', Position::Operator) => {
                return Err(QueryError::InvalidOperator(self.operator.clone()));
            }
            ('&' | '|', Position::Finish) => {
                self.push_condition()?;
                self.relation = if c == '&' { Relation::And } else { Relation::Or };
            }

            (_, Position::Name) => self.name.push(c),
            (_, Position::Operator) => {
                self.operator.push(c);
                return Err(QueryError::InvalidOperator(self.operator.clone()));
            }
            (_, Position::Value) => self.value.push(c),
            (_, Position::Finish) => return Err(QueryError::InvalidCharacter(c)),
        }
        Ok(())
    }

    /// Validate the pending predicate and file it under the current relation.
    fn push_condition(&mut self) -> Result<(), QueryError> {
        let name = mem::take(&mut self.name);
        if !is_valid_attribute_name(&name) {
            return Err(QueryError::InvalidAttributeName(name));
        }
        let operator_text = mem::take(&mut self.operator);
        let operator = operator_text
            .parse::<Operator>()
            .map_err(|_| QueryError::InvalidOperator(operator_text))?;
        let value = mem::take(&mut self.value);
        let pattern = match operator {
            Operator::Regex => Some(Regex::new(&value)?),
            _ => None,
        };

        let condition = Condition {
            name,
            operator,
            value,
            pattern,
        };
        match (self.relation, self.groups.last_mut()) {
            (Relation::And, Some(group)) => group.push(condition),
            _ => self.groups.push(vec![condition]),
        }
        self.position = Position::Name;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Vec<Condition>>, QueryError> {
        self.push_condition()?;
        Ok(self.groups)
    }
}

fn parse_predicates(input: &str) -> Result<Vec<Vec<Condition>>, QueryError> {
    let input = input.trim_matches([' ', '\t']);
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let mut parser = PredicateParser::default();
    for c in input.chars() {
        parser.feed(c)?;
    }
    parser.finish()
}

fn is_valid_attribute_name(name: &str) -> bool {
    name == CONTENT_SELECTOR
        || (!name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'))
}
