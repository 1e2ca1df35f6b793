//! Parameter values: clone-friendly scalars, sequences, and the flattened positional list.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly parameter wrapper using Arc.
///
/// Cloning a builder (or merging parameters between builders) shares the
/// underlying values instead of copying them.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // ToSql: Debug, so show the bound value itself.
        std::fmt::Debug::fmt(&*self.0, f)
    }
}

/// A bound named parameter.
///
/// The shape is fixed when the parameter is set: a `Scalar` takes one
/// positional slot, a `Sequence` of N values takes N consecutive slots.
#[derive(Clone, Debug)]
pub enum ParamValue {
    /// Renders as a single `$n`.
    Scalar(Param),
    /// Renders as `$n,$n+1,...`, one slot per element.
    Sequence(Vec<Param>),
}

impl ParamValue {
    /// Wrap a single value.
    pub fn scalar<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        ParamValue::Scalar(Param::new(value))
    }

    /// Wrap an ordered list of values.
    pub fn sequence<T, I>(values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        ParamValue::Sequence(values.into_iter().map(Param::new).collect())
    }

    /// Number of positional slots this value occupies.
    pub fn slots(&self) -> usize {
        match self {
            ParamValue::Scalar(_) => 1,
            ParamValue::Sequence(values) => values.len(),
        }
    }

    /// Iterate the values in positional order.
    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        match self {
            ParamValue::Scalar(p) => std::slice::from_ref(p).iter(),
            ParamValue::Sequence(values) => values.iter(),
        }
    }
}

impl From<Param> for ParamValue {
    fn from(param: Param) -> Self {
        ParamValue::Scalar(param)
    }
}

impl From<Vec<Param>> for ParamValue {
    fn from(params: Vec<Param>) -> Self {
        ParamValue::Sequence(params)
    }
}

/// Positional arguments in `$1, $2, ...` order.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Create an empty list with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            params: Vec::with_capacity(capacity),
        }
    }

    /// Add a pre-wrapped Param and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get the parameter bound to `$index` (1-based).
    pub fn get(&self, index: usize) -> Option<&Param> {
        index.checked_sub(1).and_then(|i| self.params.get(i))
    }

    /// Iterate parameters in positional order.
    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    /// Debug rendering of every value, in positional order.
    pub fn to_debug_strings(&self) -> Vec<String> {
        self.params.iter().map(|p| format!("{p:?}")).collect()
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl IntoIterator for ParamList {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}
