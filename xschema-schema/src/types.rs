//! Field type expressions.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::validate::validate_identifier;

/// Primitive types understood by every compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Boolean,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// The declared type of a field.
///
/// Written in schema files as `string`, `list<int>`, `option<Person>`,
/// `com.example.Address`, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeExpr {
    Primitive(Primitive),
    List(Box<TypeExpr>),
    Option(Box<TypeExpr>),
    /// Reference to a product or coproduct, simple or namespace-qualified
    Named(String),
}

impl TypeExpr {
    /// Visit every named reference in this expression.
    pub fn references(&self) -> Vec<&str> {
        match self {
            TypeExpr::Primitive(_) => Vec::new(),
            TypeExpr::List(inner) | TypeExpr::Option(inner) => inner.references(),
            TypeExpr::Named(name) => vec![name.as_str()],
        }
    }
}

impl FromStr for TypeExpr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("type expression cannot be empty".to_string());
        }

        if let Some(primitive) = Primitive::from_keyword(s) {
            return Ok(TypeExpr::Primitive(primitive));
        }

        if let Some((constructor, rest)) = s.split_once('<') {
            let inner = rest
                .strip_suffix('>')
                .ok_or_else(|| format!("unclosed '<' in type '{}'", s))?;
            return match constructor.trim_end() {
                "list" => Ok(TypeExpr::List(Box::new(inner.parse()?))),
                "option" => Ok(TypeExpr::Option(Box::new(inner.parse()?))),
                other => Err(format!("unknown type constructor '{}' in '{}'", other, s)),
            };
        }

        for segment in s.split('.') {
            if let Some(reason) = validate_identifier(segment) {
                return Err(format!("invalid type '{}': {}", s, reason));
            }
        }
        Ok(TypeExpr::Named(s.to_string()))
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{}", p.as_str()),
            TypeExpr::List(inner) => write!(f, "list<{}>", inner),
            TypeExpr::Option(inner) => write!(f, "option<{}>", inner),
            TypeExpr::Named(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TypeExpr {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_primitives() {
        assert_eq!(parse("string"), TypeExpr::Primitive(Primitive::String));
        assert_eq!(parse(" double "), TypeExpr::Primitive(Primitive::Double));
    }

    #[test]
    fn test_parse_nested() {
        assert_eq!(
            parse("list<option<int>>"),
            TypeExpr::List(Box::new(TypeExpr::Option(Box::new(TypeExpr::Primitive(
                Primitive::Int
            )))))
        );
        assert_eq!(parse("list<option<int>>").to_string(), "list<option<int>>");
    }

    #[test]
    fn test_parse_references() {
        assert_eq!(parse("Person"), TypeExpr::Named("Person".to_string()));
        assert_eq!(
            parse("list<com.example.Address>").references(),
            vec!["com.example.Address"]
        );
        // A type merely starting with a keyword is still a reference
        assert_eq!(parse("listing"), TypeExpr::Named("listing".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<TypeExpr>().is_err());
        assert!("list<int".parse::<TypeExpr>().is_err());
        assert!("com..Address".parse::<TypeExpr>().is_err());
        assert!("map<int>".parse::<TypeExpr>().is_err());
    }
}
