//! Type descriptors and runtime values.
//!
//! Every [`Argument`](crate::Argument) carries a [`TypeDescriptor`] chosen at
//! declaration time. The descriptor decides which coercion layer turns a raw
//! token into a [`Value`]: primitives, well-known types, containers, or a
//! registered [`Constructor`] for small value objects.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Raw string, taken as-is.
    String,
    /// Boolean from a fixed affirmative/negative vocabulary.
    Bool,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
}

impl PrimitiveKind {
    /// Short type name used in help output and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "int",
            Self::Float => "float",
        }
    }
}

/// A closed set of named members, matched case-insensitively.
///
/// # Examples
///
/// ```
/// use argtree_core::EnumType;
///
/// let format = EnumType::new("Format", ["Std", "Json"]);
/// assert_eq!(format.find("JSON"), Some("Json"));
/// assert_eq!(format.find("yaml"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    /// Creates an enumeration with its members in declaration order.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns the canonical member name matching `token`, ignoring case.
    pub fn find(&self, token: &str) -> Option<&str> {
        let token = token.to_lowercase();
        self.members
            .iter()
            .find(|member| member.to_lowercase() == token)
            .map(String::as_str)
    }
}

/// Well-known types with dedicated coercion rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnownKind {
    /// Filesystem path. Existence is never checked.
    Path,
    /// Enumeration matched by member name.
    Enum(EnumType),
}

/// Declared type of an argument or constructor parameter.
///
/// # Examples
///
/// ```
/// use argtree_core::TypeDescriptor;
///
/// let things = TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::integer());
/// assert_eq!(things.type_name(), "map<string,int>");
/// assert!(!things.is_scalar());
/// assert!(TypeDescriptor::bool().is_bool());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// String, bool, integer or float, parsed straight from the token.
    Primitive(PrimitiveKind),
    /// Filesystem path or enumeration.
    Known(KnownKind),
    /// Comma-separated list of scalar elements.
    List(Box<TypeDescriptor>),
    /// Comma-separated `key=value` entries of scalar keys and values.
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// Value object built by a registered factory.
    Constructed(Constructor),
}

impl TypeDescriptor {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn bool() -> Self {
        Self::Primitive(PrimitiveKind::Bool)
    }

    pub fn integer() -> Self {
        Self::Primitive(PrimitiveKind::Integer)
    }

    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    pub fn path() -> Self {
        Self::Known(KnownKind::Path)
    }

    pub fn enumeration(enum_type: EnumType) -> Self {
        Self::Known(KnownKind::Enum(enum_type))
    }

    pub fn list(element: TypeDescriptor) -> Self {
        Self::List(Box::new(element))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn constructed(constructor: Constructor) -> Self {
        Self::Constructed(constructor)
    }

    /// True for the boolean primitive, which gets flag-style lookahead.
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Bool))
    }

    /// True for primitive and well-known types.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Known(_))
    }

    /// Enumeration members, if this is an enumeration.
    pub fn choices(&self) -> &[String] {
        match self {
            Self::Known(KnownKind::Enum(enum_type)) => enum_type.members(),
            _ => &[],
        }
    }

    /// Human-readable type name (`int`, `list<string>`, `Format`, ...).
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.label().to_string(),
            Self::Known(KnownKind::Path) => "path".to_string(),
            Self::Known(KnownKind::Enum(enum_type)) => enum_type.name().to_string(),
            Self::List(element) => format!("list<{}>", element.type_name()),
            Self::Map(key, value) => format!("map<{},{}>", key.type_name(), value.type_name()),
            Self::Constructed(constructor) => constructor.type_name().to_string(),
        }
    }
}

/// A coerced argument value.
///
/// Map entries keep insertion order; a repeated key replaces the earlier
/// entry in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Token taken verbatim.
    String(String),
    /// Boolean from the affirmative/negative vocabulary.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Path, not checked for existence.
    Path(PathBuf),
    /// Canonical member name of an enumeration.
    Enum(String),
    /// Elements in token order.
    List(Vec<Value>),
    /// Entries in insertion order.
    Map(Vec<(Value, Value)>),
    /// Value object returned by a constructor.
    Object(Object),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Self::Enum(member) => Some(member),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Looks up a map entry by string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Downcasts a constructed value to its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Enum(member) => f.write_str(member),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Map(entries) => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                Ok(())
            }
            Self::Object(object) => write!(f, "{object:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Type-erased value produced by a [`Constructor`].
///
/// Equality and `Debug` delegate to the concrete type.
#[derive(Clone)]
pub struct Object {
    type_name: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
    eq: fn(&dyn Any, &dyn Any) -> bool,
    fmt: fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl Object {
    pub fn new<T>(type_name: impl Into<String>, value: T) -> Self
    where
        T: Any + Send + Sync + PartialEq + fmt::Debug,
    {
        Self {
            type_name: Arc::from(type_name.into()),
            inner: Arc::new(value),
            eq: eq_as::<T>,
            fmt: fmt_as::<T>,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

fn eq_as<T: PartialEq + 'static>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn fmt_as<T: fmt::Debug + 'static>(value: &dyn Any, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str("<object>"),
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && (self.eq)(&*self.inner, &*other.inner)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.fmt)(&*self.inner, f)
    }
}

/// A named, typed constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    ty: TypeDescriptor,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}

/// Parameter values bound from a token, in parameter declaration order.
///
/// Parameters the token did not mention stay unset; the factory decides
/// whether that is an error or a default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorArgs {
    slots: Vec<(String, Option<Value>)>,
}

impl ConstructorArgs {
    pub fn new(params: &[Param]) -> Self {
        Self {
            slots: params.iter().map(|p| (p.name.clone(), None)).collect(),
        }
    }

    /// Returns whether slot `index` already holds a value.
    pub fn is_set(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|(_, v)| v.is_some())
    }

    pub fn set(&mut self, index: usize, value: Value) {
        if let Some((_, slot)) = self.slots.get_mut(index) {
            *slot = Some(value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Like [`get`](Self::get), failing when the parameter was not given.
    pub fn require(&self, name: &str) -> anyhow::Result<&Value> {
        self.get(name)
            .ok_or_else(|| anyhow::anyhow!("missing parameter '{name}'"))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Factory signature for constructed types.
pub type ConstructorFn = dyn Fn(&ConstructorArgs) -> anyhow::Result<Object> + Send + Sync;

/// Registered factory for a small value object.
///
/// Tokens like `center,x=5,y=7` are split into positional and named values,
/// coerced with each [`Param`]'s type, and handed to the factory.
///
/// # Examples
///
/// ```
/// use argtree_core::{Constructor, ConstructorArgs, Object, Param, TypeDescriptor};
///
/// #[derive(Debug, PartialEq)]
/// struct Point { x: f64, y: f64 }
///
/// let point = Constructor::new(
///     "Point",
///     vec![
///         Param::new("x", TypeDescriptor::float()),
///         Param::new("y", TypeDescriptor::float()),
///     ],
///     |args: &ConstructorArgs| {
///         let x = args.require("x")?.as_f64().unwrap_or_default();
///         let y = args.require("y")?.as_f64().unwrap_or_default();
///         Ok(Object::new("Point", Point { x, y }))
///     },
/// );
/// assert_eq!(point.params().len(), 2);
/// ```
#[derive(Clone)]
pub struct Constructor {
    type_name: String,
    params: Vec<Param>,
    factory: Arc<ConstructorFn>,
}

impl Constructor {
    pub fn new<F>(type_name: impl Into<String>, params: Vec<Param>, factory: F) -> Self
    where
        F: Fn(&ConstructorArgs) -> anyhow::Result<Object> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            params,
            factory: Arc::new(factory),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Position of the parameter called `name`.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// Invokes the factory.
    pub fn construct(&self, args: &ConstructorArgs) -> anyhow::Result<Object> {
        (self.factory)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("type_name", &self.type_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.params == other.params
    }
}

impl Eq for Constructor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Label {
        text: String,
    }

    #[test]
    fn test_type_names() {
        assert_eq!(TypeDescriptor::integer().type_name(), "int");
        assert_eq!(TypeDescriptor::path().type_name(), "path");
        assert_eq!(
            TypeDescriptor::list(TypeDescriptor::float()).type_name(),
            "list<float>"
        );
        let format = EnumType::new("HelpFormat", ["STD", "JSON"]);
        assert_eq!(TypeDescriptor::enumeration(format).type_name(), "HelpFormat");
    }

    #[test]
    fn test_enum_find_is_case_insensitive() {
        let format = EnumType::new("HelpFormat", ["STD", "JSON"]);
        assert_eq!(format.find("json"), Some("JSON"));
        assert_eq!(format.find("Std"), Some("STD"));
        assert_eq!(format.find("xml"), None);
    }

    #[test]
    fn test_object_equality_uses_concrete_type() {
        let a = Object::new("Label", Label { text: "a".into() });
        let b = Object::new("Label", Label { text: "a".into() });
        let c = Object::new("Label", Label { text: "c".into() });
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(
            a.downcast_ref::<Label>().map(|l| l.text.as_str()),
            Some("a")
        );
        assert_eq!(format!("{a:?}"), r#"Label { text: "a" }"#);
    }

    #[test]
    fn test_value_map_lookup() {
        let value = Value::Map(vec![
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(3)),
        ]);
        assert_eq!(value.get("b"), Some(&Value::Integer(3)));
        assert_eq!(value.get("z"), None);
        assert_eq!(value.to_string(), "a=1,b=3");
    }

    #[test]
    fn test_constructor_args_slots() {
        let params = vec![
            Param::new("name", TypeDescriptor::string()),
            Param::new("x", TypeDescriptor::float()),
        ];
        let mut args = ConstructorArgs::new(&params);
        assert!(!args.is_set(1));
        args.set(1, Value::Float(5.0));
        assert!(args.is_set(1));
        assert_eq!(args.get("x"), Some(&Value::Float(5.0)));
        assert!(args.require("name").is_err());
    }
}
