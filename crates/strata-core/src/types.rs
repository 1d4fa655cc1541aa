use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Index of a symbol inside its [`SymbolUniverse`](crate::universe::SymbolUniverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What kind of type-like unit a symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    /// Namespace marker (package descriptor). Never part of an interface.
    Marker,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Enum => "enum",
            SymbolKind::Record => "record",
            SymbolKind::Annotation => "annotation",
            SymbolKind::Marker => "marker",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    #[default]
    Package,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Package => "package",
            Visibility::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Constructor,
    Field,
    Method,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Field => "field",
            MemberKind::Method => "method",
        }
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructor, field, or method of a symbol.
///
/// `value_type` is the field type for fields and the return type for methods.
/// Constructors leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub parameter_types: Vec<String>,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
}

impl Member {
    pub fn constructor<I, S>(parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: MemberKind::Constructor,
            name: "<init>".to_string(),
            tags: BTreeSet::new(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
            value_type: None,
            line: None,
        }
    }

    pub fn field(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Field,
            name: name.into(),
            tags: BTreeSet::new(),
            parameter_types: Vec::new(),
            value_type: Some(field_type.into()),
            line: None,
        }
    }

    pub fn method<I, S>(name: impl Into<String>, parameter_types: I, returns: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            tags: BTreeSet::new(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
            value_type: returns.map(str::to_string),
            line: None,
        }
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Human-readable signature, e.g. `method place(orders.Order) -> void`.
    pub fn signature(&self) -> String {
        let params = self.parameter_types.join(", ");
        match (self.kind, &self.value_type) {
            (MemberKind::Field, Some(ty)) => format!("field {} : {}", self.name, ty),
            (MemberKind::Field, None) => format!("field {}", self.name),
            (MemberKind::Constructor, _) => format!("constructor ({})", params),
            (MemberKind::Method, Some(ret)) => format!("method {}({}) -> {}", self.name, params, ret),
            (MemberKind::Method, None) => format!("method {}({})", self.name, params),
        }
    }
}

/// A direct reference from a symbol's code to another type that is not
/// visible in any member signature (static calls, constant access, casts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticReference {
    pub target: String,
    /// Name of the member the reference occurs in, if known.
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
}

/// A class/type-like unit of the analyzed codebase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Fully qualified name (`com.acme.orders.OrderService`).
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub kind: SymbolKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub references: Vec<StaticReference>,
    /// Named interfaces this symbol is explicitly declared part of.
    #[serde(default)]
    pub named_interfaces: Vec<String>,
}

impl Symbol {
    /// Create a public class whose namespace is derived from the qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let namespace = match name.rfind('.') {
            Some(pos) => name[..pos].to_string(),
            None => String::new(),
        };
        Self {
            name,
            namespace,
            kind: SymbolKind::Class,
            visibility: Visibility::Public,
            tags: BTreeSet::new(),
            supertypes: Vec::new(),
            members: Vec::new(),
            references: Vec::new(),
            named_interfaces: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: SymbolKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn references(mut self, target: impl Into<String>) -> Self {
        self.references.push(StaticReference {
            target: target.into(),
            member: None,
            line: None,
        });
        self
    }

    pub fn in_interface(mut self, interface: impl Into<String>) -> Self {
        self.named_interfaces.push(interface.into());
        self
    }

    /// Unqualified name (`OrderService`).
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_marker(&self) -> bool {
        self.kind == SymbolKind::Marker
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.kind == MemberKind::Constructor)
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Module metadata declared on a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDeclaration {
    #[serde(default)]
    pub display_name: Option<String>,
    /// Target module names (optionally `module::interface`). Empty means unrestricted.
    #[serde(default)]
    pub allowed_dependencies: Vec<String>,
    /// Open modules expose every symbol they contain.
    #[serde(default)]
    pub open: bool,
}

/// Metadata attached to a namespace (package descriptor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub module: Option<ModuleDeclaration>,
    /// Named interfaces this namespace is declared to be.
    #[serde(default)]
    pub named_interfaces: Vec<String>,
}

impl NamespaceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn module(mut self, declaration: ModuleDeclaration) -> Self {
        self.module = Some(declaration);
        self
    }

    pub fn named_interface(mut self, name: impl Into<String>) -> Self {
        self.named_interfaces.push(name.into());
        self
    }
}
