//! Helpers for the type strings found in member signatures.

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Split a type expression into the type names it mentions.
///
/// Generic arguments, arrays, and wildcard bounds are unwrapped:
/// `java.util.Map<orders.OrderId, ? extends orders.Order>[]` yields
/// `java.util.Map`, `orders.OrderId`, `orders.Order`.
pub fn type_names(type_expr: &str) -> Vec<&str> {
    type_expr
        .split(|c: char| matches!(c, '<' | '>' | ',' | '[' | ']' | '&' | ' '))
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "?" && *s != "extends" && *s != "super")
        .collect()
}

pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name)
}

/// Recognizes types that belong to the platform's standard library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardLibrary {
    prefixes: Vec<String>,
}

impl Default for StandardLibrary {
    fn default() -> Self {
        Self::new(default_standard_prefixes())
    }
}

impl StandardLibrary {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.prefixes.iter().any(|p| type_name.starts_with(p.as_str()))
    }

    /// True for types member-signature discovery never follows.
    pub fn is_excluded(&self, type_name: &str) -> bool {
        is_primitive(type_name) || self.contains(type_name)
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

pub fn default_standard_prefixes() -> Vec<String> {
    ["java.", "javax.", "kotlin.", "scala."]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
