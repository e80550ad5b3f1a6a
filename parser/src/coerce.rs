//! String-to-value coercion.
//!
//! [`convert`] dispatches on the declared [`TypeDescriptor`] to one of four
//! layers: primitives, well-known types, containers, and constructed value
//! objects. Only the container and constructed layers understand the
//! escaping grammar in [`crate::escape`]; scalars take the token verbatim.

use argtree_core::{Constructor, ConstructorArgs, KnownKind, PrimitiveKind, TypeDescriptor, Value};
use tracing::trace;

use crate::error::CoercionError;
use crate::escape::{split_once_unescaped, split_unescaped, unescape};

/// Tokens accepted as `true`, compared case-insensitively.
pub const AFFIRMATIVE: [&str; 9] = ["true", "yes", "yup", "👍", ":)", "😊", "1", "positive", "ok"];

/// Tokens accepted as `false`, compared case-insensitively.
pub const NEGATIVE: [&str; 8] = ["false", "no", "nah", "👎", ":(", "☹", "0", "negative"];

/// Converts `token` into a value of type `ty`.
///
/// # Errors
///
/// Returns a [`CoercionError`] naming the first part of the token that did
/// not fit. Nothing is silently defaulted.
///
/// # Examples
///
/// ```
/// use argtree_core::{TypeDescriptor, Value};
/// use argtree_parser::convert;
///
/// let ty = TypeDescriptor::list(TypeDescriptor::string());
/// let value = convert(r"a\,b,c", &ty).unwrap();
/// assert_eq!(value, Value::List(vec![Value::from("a,b"), Value::from("c")]));
///
/// assert!(convert("invalid", &TypeDescriptor::bool()).is_err());
/// ```
pub fn convert(token: &str, ty: &TypeDescriptor) -> Result<Value, CoercionError> {
    match ty {
        TypeDescriptor::Primitive(kind) => convert_primitive(token, *kind),
        TypeDescriptor::Known(kind) => convert_known(token, kind),
        TypeDescriptor::List(element) => convert_list(token, element),
        TypeDescriptor::Map(key, value) => convert_map(token, key, value),
        TypeDescriptor::Constructed(constructor) => convert_constructed(token, constructor),
    }
}

fn convert_primitive(token: &str, kind: PrimitiveKind) -> Result<Value, CoercionError> {
    match kind {
        PrimitiveKind::String => Ok(Value::String(token.to_string())),
        PrimitiveKind::Bool => parse_bool(token).map(Value::Bool),
        PrimitiveKind::Integer => token
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| CoercionError::InvalidInteger(token.to_string())),
        PrimitiveKind::Float => token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoercionError::InvalidFloat(token.to_string())),
    }
}

/// Parses a boolean from the affirmative/negative vocabulary.
pub fn parse_bool(token: &str) -> Result<bool, CoercionError> {
    let lowered = token.to_lowercase();
    if AFFIRMATIVE.contains(&lowered.as_str()) {
        Ok(true)
    } else if NEGATIVE.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(CoercionError::InvalidBool(token.to_string()))
    }
}

fn convert_known(token: &str, kind: &KnownKind) -> Result<Value, CoercionError> {
    match kind {
        KnownKind::Path => Ok(Value::Path(token.into())),
        KnownKind::Enum(enum_type) => enum_type
            .find(token)
            .map(|member| Value::Enum(member.to_string()))
            .ok_or_else(|| CoercionError::UnknownEnumMember {
                token: token.to_string(),
                type_name: enum_type.name().to_string(),
            }),
    }
}

/// Converts one already-unescaped member of a container or constructor.
fn convert_scalar(raw: &str, ty: &TypeDescriptor) -> Result<Value, CoercionError> {
    match ty {
        TypeDescriptor::Primitive(kind) => convert_primitive(raw, *kind),
        TypeDescriptor::Known(kind) => convert_known(raw, kind),
        other => Err(CoercionError::UnsupportedType(other.type_name())),
    }
}

fn convert_list(token: &str, element: &TypeDescriptor) -> Result<Value, CoercionError> {
    split_unescaped(token, ',')
        .into_iter()
        .map(|part| convert_scalar(&unescape(part), element))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

fn convert_map(
    token: &str,
    key_ty: &TypeDescriptor,
    value_ty: &TypeDescriptor,
) -> Result<Value, CoercionError> {
    let mut entries: Vec<(Value, Value)> = Vec::new();

    for entry in split_unescaped(token, ',') {
        let (raw_key, raw_value) = split_once_unescaped(entry, '=')
            .ok_or_else(|| CoercionError::MissingKeyValue(unescape(entry)))?;
        let key = convert_scalar(&unescape(raw_key), key_ty)?;
        let value = convert_scalar(&unescape(raw_value), value_ty)?;

        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => entries.push((key, value)),
        }
    }

    Ok(Value::Map(entries))
}

fn convert_constructed(token: &str, constructor: &Constructor) -> Result<Value, CoercionError> {
    let params = constructor.params();
    let type_name = constructor.type_name();
    let mut named: Vec<(String, String)> = Vec::new();
    let mut positional: Vec<String> = Vec::new();

    for part in split_unescaped(token, ',') {
        match split_once_unescaped(part, '=') {
            Some((key, value)) => {
                let key = unescape(key);
                if named.iter().any(|(k, _)| *k == key) {
                    return Err(CoercionError::DuplicateParameter {
                        name: key,
                        type_name: type_name.to_string(),
                    });
                }
                named.push((key, unescape(value)));
            }
            None => positional.push(unescape(part)),
        }
    }

    if positional.len() > params.len() {
        return Err(CoercionError::TooManyArguments {
            type_name: type_name.to_string(),
            expected: params.len(),
            given: positional.len(),
        });
    }

    let mut args = ConstructorArgs::new(params);

    for (index, (raw, param)) in positional.iter().zip(params).enumerate() {
        args.set(index, convert_scalar(raw, param.ty())?);
    }

    for (key, raw) in &named {
        let index = constructor
            .param_index(key)
            .ok_or_else(|| CoercionError::UnknownParameter {
                name: key.clone(),
                type_name: type_name.to_string(),
            })?;
        if args.is_set(index) {
            return Err(CoercionError::DuplicateParameter {
                name: key.clone(),
                type_name: type_name.to_string(),
            });
        }
        args.set(index, convert_scalar(raw, params[index].ty())?);
    }

    trace!(
        type_name,
        positional = positional.len(),
        named = named.len(),
        "Constructing value"
    );

    constructor
        .construct(&args)
        .map(Value::Object)
        .map_err(|source| CoercionError::Construct {
            type_name: type_name.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtree_core::{EnumType, Object, Param};

    #[derive(Debug, PartialEq)]
    struct Label {
        name: String,
        x: f64,
        y: f64,
    }

    fn label_type() -> TypeDescriptor {
        TypeDescriptor::constructed(Constructor::new(
            "Label",
            vec![
                Param::new("name", TypeDescriptor::string()),
                Param::new("x", TypeDescriptor::float()),
                Param::new("y", TypeDescriptor::float()),
            ],
            |args| {
                let name = args.require("name")?.as_str().unwrap_or_default().to_string();
                let x = args.get("x").and_then(Value::as_f64).unwrap_or(0.0);
                let y = args.get("y").and_then(Value::as_f64).unwrap_or(0.0);
                Ok(Object::new("Label", Label { name, x, y }))
            },
        ))
    }

    #[test]
    fn test_bool_vocabulary() {
        for token in AFFIRMATIVE.iter().chain(["TRUE", "Yes", "OK"].iter()) {
            assert!(parse_bool(token).unwrap(), "{token}");
        }
        for token in NEGATIVE.iter().chain(["FALSE", "Nah"].iter()) {
            assert!(!parse_bool(token).unwrap(), "{token}");
        }
        assert!(matches!(
            parse_bool("invalid"),
            Err(CoercionError::InvalidBool(_))
        ));
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            convert("5545", &TypeDescriptor::integer()).unwrap(),
            Value::Integer(5545)
        );
        assert_eq!(
            convert("-12", &TypeDescriptor::integer()).unwrap(),
            Value::Integer(-12)
        );
        assert!(matches!(
            convert("5.5", &TypeDescriptor::integer()),
            Err(CoercionError::InvalidInteger(_))
        ));
        assert_eq!(
            convert("2.5", &TypeDescriptor::float()).unwrap(),
            Value::Float(2.5)
        );
        assert!(matches!(
            convert("abc", &TypeDescriptor::float()),
            Err(CoercionError::InvalidFloat(_))
        ));
    }

    #[test]
    fn test_primitive_roundtrip() {
        let cases = [
            (Value::Integer(i64::MIN), TypeDescriptor::integer()),
            (Value::Integer(i64::MAX), TypeDescriptor::integer()),
            (Value::Integer(-1), TypeDescriptor::integer()),
            (Value::Integer(0), TypeDescriptor::integer()),
            (Value::Float(0.1), TypeDescriptor::float()),
            (Value::Float(-0.0), TypeDescriptor::float()),
            (Value::Float(1e300), TypeDescriptor::float()),
            (Value::Float(f64::MIN_POSITIVE), TypeDescriptor::float()),
            (Value::Bool(true), TypeDescriptor::bool()),
            (Value::Bool(false), TypeDescriptor::bool()),
            (Value::from("k=v,w"), TypeDescriptor::string()),
        ];

        for (value, ty) in cases {
            assert_eq!(convert(&value.to_string(), &ty).unwrap(), value, "{value:?}");
        }
    }

    #[test]
    fn test_scalars_are_not_unescaped() {
        assert_eq!(
            convert(r"a\,b", &TypeDescriptor::string()).unwrap(),
            Value::from(r"a\,b")
        );
        assert_eq!(
            convert("./missing/file.txt", &TypeDescriptor::path()).unwrap(),
            Value::Path("./missing/file.txt".into())
        );
    }

    #[test]
    fn test_enum_case_insensitive() {
        let ty = TypeDescriptor::enumeration(EnumType::new("HelpFormat", ["STD", "JSON"]));
        assert_eq!(convert("json", &ty).unwrap(), Value::Enum("JSON".into()));
        assert!(matches!(
            convert("xml", &ty),
            Err(CoercionError::UnknownEnumMember { .. })
        ));
    }

    #[test]
    fn test_list_of_integers() {
        let ty = TypeDescriptor::list(TypeDescriptor::integer());
        assert_eq!(convert("1,2,3", &ty).unwrap(), Value::from(vec![1, 2, 3]));
        assert!(convert("1,x", &ty).is_err());
    }

    #[test]
    fn test_map_splits_on_first_equals() {
        let ty = TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::string());
        let value = convert(r"a=b=c,k\=1=v\,w", &ty).unwrap();
        assert_eq!(value.get("a"), Some(&Value::from("b=c")));
        assert_eq!(value.get("k=1"), Some(&Value::from("v,w")));
    }

    #[test]
    fn test_map_entry_without_equals_fails() {
        let ty = TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::integer());
        assert!(matches!(
            convert("a=1,b", &ty),
            Err(CoercionError::MissingKeyValue(entry)) if entry == "b"
        ));
    }

    #[test]
    fn test_map_repeated_key_replaces_in_place() {
        let ty = TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::integer());
        let value = convert("a=1,b=2,a=3", &ty).unwrap();
        assert_eq!(value.to_string(), "a=3,b=2");
    }

    #[test]
    fn test_constructed_positional_and_named() {
        let value = convert("center,x=5,y=7", &label_type()).unwrap();
        assert_eq!(
            value.downcast_ref::<Label>(),
            Some(&Label {
                name: "center".into(),
                x: 5.0,
                y: 7.0
            })
        );
    }

    #[test]
    fn test_constructed_escaped_positional() {
        let value = convert(r"a\,b\=c,1,2", &label_type()).unwrap();
        let label = value.downcast_ref::<Label>().unwrap();
        assert_eq!(label.name, "a,b=c");
        assert_eq!((label.x, label.y), (1.0, 2.0));
    }

    #[test]
    fn test_constructed_rejects_extra_positionals() {
        match convert("center,1,2,999,junk", &label_type()) {
            Err(CoercionError::TooManyArguments {
                type_name,
                expected,
                given,
            }) => {
                assert_eq!(type_name, "Label");
                assert_eq!((expected, given), (3, 5));
            }
            other => panic!("expected TooManyArguments, got {other:?}"),
        }
    }

    #[test]
    fn test_constructed_rejects_bad_parameters() {
        assert!(matches!(
            convert("center,z=1", &label_type()),
            Err(CoercionError::UnknownParameter { name, .. }) if name == "z"
        ));
        assert!(matches!(
            convert("center,x=1,x=2", &label_type()),
            Err(CoercionError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            convert("center,1,x=2", &label_type()),
            Err(CoercionError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            convert("center,x=abc", &label_type()),
            Err(CoercionError::InvalidFloat(_))
        ));
    }

    #[test]
    fn test_constructor_failure_is_surfaced() {
        assert!(matches!(
            convert("x=1", &label_type()),
            Err(CoercionError::Construct { .. })
        ));
    }
}
