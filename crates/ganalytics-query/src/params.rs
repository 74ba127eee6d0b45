//! Ordered wire parameters.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parameter {
    name: String,
    value: String,
    /// Value is already percent-encoded and must be copied verbatim.
    encoded: bool,
}

/// An ordered mapping from wire parameter name to string value.
///
/// Built fresh for every request. Setting a name that is already present
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    params: Vec<Parameter>,
}

impl QueryParameters {
    /// Create an empty parameter set.
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    fn set(&mut self, name: String, value: String, encoded: bool) {
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.value = value;
                p.encoded = encoded;
            }
            None => self.params.push(Parameter {
                name,
                value,
                encoded,
            }),
        }
    }

    /// Set a plain value; it is percent-encoded on serialization.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name.into(), value.into(), false);
    }

    /// Set a value that is already percent-encoded.
    pub fn insert_encoded(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name.into(), value.into(), true);
    }

    /// Get the stored value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Returns true if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serialize as `name=value&...`, usable both as a URL query string and
    /// as an `application/x-www-form-urlencoded` body.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(&urlencoding::encode(&p.name));
            out.push('=');
            if p.encoded {
                out.push_str(&p.value);
            } else {
                out.push_str(&urlencoding::encode(&p.value));
            }
        }
        out
    }
}

impl fmt::Display for QueryParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
