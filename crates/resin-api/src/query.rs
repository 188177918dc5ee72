// Query builder for the OData-style resource endpoints.
//
// A `Query` names a resource, selects either everything, a single id, or a
// filtered subset, and optionally expands relations and orders the result.
// It renders into a `Request` descriptor that the resource client executes.
// Rendering never fails; callers validate domain input before building.

use indexmap::IndexMap;
use reqwest::Method;
use serde_json::Value;

/// Path segment under which every resource collection lives.
pub const RESOURCE_ROOT: &str = "ewa";

// ── Filter ──────────────────────────────────────────────────────────

/// Right-hand side of an equality term, or a nested relation filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(u64),
    Boolean(bool),
    Nested(Filter),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FilterValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<u64> for FilterValue {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Filter> for FilterValue {
    fn from(f: Filter) -> Self {
        Self::Nested(f)
    }
}

/// Conjunction of equality terms keyed by field (or relation) name.
///
/// Terms render in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    terms: IndexMap<String, FilterValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `field eq value`. A later term for the same field replaces the earlier one.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.terms.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.terms.get(field)
    }

    /// Render as an OData `$filter` expression.
    pub fn render(&self) -> String {
        let mut clauses = Vec::with_capacity(self.terms.len());
        self.collect_clauses("", &mut clauses);
        clauses.join(" and ")
    }

    fn collect_clauses(&self, prefix: &str, out: &mut Vec<String>) {
        for (field, value) in &self.terms {
            let path = if prefix.is_empty() {
                field.clone()
            } else {
                format!("{prefix}/{field}")
            };
            match value {
                FilterValue::Nested(inner) => inner.collect_clauses(&path, out),
                FilterValue::Text(s) => out.push(format!("{path} eq {}", quote(s))),
                FilterValue::Integer(n) => out.push(format!("{path} eq {n}")),
                FilterValue::Boolean(b) => out.push(format!("{path} eq {b}")),
            }
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// ── Ordering ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

// ── Query ───────────────────────────────────────────────────────────

/// Which records of a resource a query addresses.
///
/// `Id` and `Filter` are exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Id(u64),
    Filter(Filter),
}

/// Structured description of a resource query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    resource: String,
    selector: Selector,
    expand: Vec<String>,
    order_by: Option<OrderBy>,
    params: Vec<(String, String)>,
}

impl Query {
    /// Address every record of `resource`.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            selector: Selector::All,
            expand: Vec::new(),
            order_by: None,
            params: Vec::new(),
        }
    }

    /// Address the single record of `resource` with the given id.
    pub fn by_id(resource: impl Into<String>, id: u64) -> Self {
        Self {
            selector: Selector::Id(id),
            ..Self::new(resource)
        }
    }

    /// Select by filter, replacing any previous selector.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.selector = if filter.is_empty() {
            Selector::All
        } else {
            Selector::Filter(filter)
        };
        self
    }

    /// Shorthand for a single-term filter.
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::new().eq(field, value))
    }

    /// Inline the named relation into each returned record.
    pub fn expand(mut self, relation: impl Into<String>) -> Self {
        let relation = relation.into();
        if !self.expand.contains(&relation) {
            self.expand.push(relation);
        }
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Attach an extra query-string parameter sent verbatim.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Resource path: `/ewa/{resource}` or `/ewa/{resource}({id})`.
    pub fn path(&self) -> String {
        match self.selector {
            Selector::Id(id) => format!("/{RESOURCE_ROOT}/{}({id})", self.resource),
            Selector::All | Selector::Filter(_) => format!("/{RESOURCE_ROOT}/{}", self.resource),
        }
    }

    /// Query-string parameters in a stable order.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Selector::Filter(ref filter) = self.selector {
            params.push(("$filter".to_owned(), filter.render()));
        }
        if !self.expand.is_empty() {
            params.push(("$expand".to_owned(), self.expand.join(",")));
        }
        if let Some(ref order) = self.order_by {
            params.push((
                "$orderby".to_owned(),
                format!("{} {}", order.field, order.direction.as_str()),
            ));
        }
        params.extend(self.params.iter().cloned());
        params
    }

    /// Render into a request descriptor for the given operation.
    pub fn to_request(&self, method: Method, body: Option<Value>) -> Request {
        Request {
            method,
            path: self.path(),
            params: self.query_params(),
            body,
        }
    }
}

// ── Request descriptor ──────────────────────────────────────────────

/// A fully rendered request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    /// A request against a non-resource endpoint (actions like `/blink`).
    pub fn action(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body,
        }
    }
}
