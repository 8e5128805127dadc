//! Explicit substitution scopes.
//!
//! A translation call site describes the variables its template may refer to
//! instead of having them harvested from the stack. Bindings live in two layers,
//! `outer` (module-level or shared values) and `inner` (values local to the call
//! site), and a call may add a third layer of `extras`. When the layers are
//! flattened the precedence is `extras > inner > outer`.
//!
//! Values are stored as [`serde_json::Value`], so anything implementing
//! [`serde::Serialize`] can be bound; the fields of a bound struct become the
//! attributes walked by dotted placeholders such as `$user.name`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{I18nError, Result};

/// Ordered set of named substitution values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars {
    values: BTreeMap<String, Value>,
}

impl Vars {
    /// Create an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Builder form of [`Vars::bind`].
    ///
    /// Inputs:
    /// - `name`: Variable name as it appears after `$` in templates
    /// - `value`: Any serializable value
    ///
    /// Output:
    /// - `self` with the binding added (or left out if serialization failed)
    #[must_use]
    pub fn with<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.bind(name, value);
        self
    }

    /// What: Bind a serializable value, skipping it when serialization fails.
    ///
    /// Inputs:
    /// - `name`: Variable name
    /// - `value`: Any serializable value
    ///
    /// Details:
    /// - A value that cannot be represented (for example a map with non-string
    ///   keys) is logged and left unbound, so `$name` stays literal in output.
    pub fn bind<T: Serialize + ?Sized>(&mut self, name: impl Into<String>, value: &T) {
        let name = name.into();
        if let Err(err) = self.insert_serialized(name.clone(), value) {
            tracing::warn!(name = %name, error = %err, "skipping unserializable substitution");
        }
    }

    /// What: Bind a serializable value, reporting serialization failures.
    ///
    /// # Errors
    /// - Returns [`I18nError::Serialize`] when `value` cannot be converted.
    pub fn insert_serialized<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|source| I18nError::Serialize {
            name: name.clone(),
            source,
        })?;
        self.values.insert(name, value);
        Ok(())
    }

    /// Bind an already-built value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Remove a binding.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Look up a top-level binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`; entries of `other` win.
    fn overlay(&mut self, other: &Self) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Vars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Vars {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Build a [`Vars`] from local bindings.
///
/// `vars!(aqua, blue)` binds the locals `aqua` and `blue` under their own
/// names; `vars!(count = items.len())` binds an expression under an explicit
/// name. Both forms can be mixed.
///
/// ```
/// let aqua = "aardvarks";
/// let vars = stacked_i18n::vars!(aqua, total = 3);
/// assert_eq!(vars.len(), 2);
/// ```
#[macro_export]
macro_rules! vars {
    (@bind $vars:ident, $name:ident = $value:expr) => {
        $vars.bind(stringify!($name), &$value);
    };
    (@bind $vars:ident, $name:ident) => {
        $vars.bind(stringify!($name), &$name);
    };
    () => {
        $crate::scope::Vars::new()
    };
    ($($name:ident $(= $value:expr)?),+ $(,)?) => {{
        let mut vars = $crate::scope::Vars::new();
        $( $crate::vars!(@bind vars, $name $(= $value)?); )+
        vars
    }};
}

/// The caller-side scope of a translation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    outer: Vars,
    inner: Vars,
}

impl Scope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the outer (shared) layer.
    #[must_use]
    pub fn with_outer(mut self, outer: Vars) -> Self {
        self.outer = outer;
        self
    }

    /// Replace the inner (call-site) layer.
    #[must_use]
    pub fn with_inner(mut self, inner: Vars) -> Self {
        self.inner = inner;
        self
    }

    /// The outer layer.
    #[must_use]
    pub const fn outer(&self) -> &Vars {
        &self.outer
    }

    /// The inner layer.
    #[must_use]
    pub const fn inner(&self) -> &Vars {
        &self.inner
    }

    /// Mutable access to the outer layer.
    pub const fn outer_mut(&mut self) -> &mut Vars {
        &mut self.outer
    }

    /// Mutable access to the inner layer.
    pub const fn inner_mut(&mut self) -> &mut Vars {
        &mut self.inner
    }

    /// What: Flatten the scope into a substitution source.
    ///
    /// Inputs:
    /// - `extras`: Optional override layer
    ///
    /// Output:
    /// - A fresh [`Substitutions`] snapshot
    ///
    /// Details:
    /// - Precedence is `extras > inner > outer`, independent of insertion order.
    #[must_use]
    pub fn substitutions(&self, extras: Option<&Vars>) -> Substitutions {
        let mut flat = self.outer.clone();
        flat.overlay(&self.inner);
        if let Some(extras) = extras {
            flat.overlay(extras);
        }
        Substitutions { vars: flat }
    }
}

impl From<Vars> for Scope {
    fn from(inner: Vars) -> Self {
        Self::new().with_inner(inner)
    }
}

/// A dotted path that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no substitution for {0:?}")]
pub struct KeyNotFound(pub String);

/// Flattened, attribute-path aware substitution source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitutions {
    vars: Vars,
}

impl Substitutions {
    /// What: Resolve a dotted path such as `user.address.city`.
    ///
    /// Inputs:
    /// - `path`: Placeholder identifier, dots separating attribute segments
    ///
    /// Output:
    /// - The value at the end of the path
    ///
    /// # Errors
    /// - [`KeyNotFound`] when the first segment is unbound or any later segment
    ///   is not a field of the value reached so far.
    pub fn resolve(&self, path: &str) -> std::result::Result<&Value, KeyNotFound> {
        let missing = || KeyNotFound(path.to_string());
        let mut segments = path.split('.');
        let head = segments.next().ok_or_else(missing)?;
        let mut value = self.vars.get(head).ok_or_else(missing)?;
        for segment in segments {
            value = value
                .as_object()
                .and_then(|fields| fields.get(segment))
                .ok_or_else(missing)?;
        }
        Ok(value)
    }

    /// Resolve `path` and render it as substitution text.
    #[must_use]
    pub fn render(&self, path: &str) -> Option<String> {
        self.resolve(path).ok().map(render_value)
    }
}

impl From<Vars> for Substitutions {
    fn from(vars: Vars) -> Self {
        Self { vars }
    }
}

/// Strings are inserted as-is; everything else uses its compact JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
