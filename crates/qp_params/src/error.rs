//! Errors raised while compiling schemas and marshalling values.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// CompileError

/// A schema that cannot be turned into a marshalling plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    #[error("`{type_path}` is not described as a struct and has no query parameters")]
    NotAStruct { type_path: &'static str },

    #[error("property `{property}` of `{owner}` has type `{nested}`, which has no schema to flatten")]
    UnresolvableNested {
        owner: &'static str,
        property: String,
        nested: &'static str,
    },

    #[error("property `{property}` resolves to key `{key}`, already used by `{previous}`")]
    DuplicateKey {
        key: String,
        property: String,
        previous: String,
    },

    #[error("property `{property}` flattens `{nested}` inside itself")]
    RecursiveNesting {
        property: String,
        nested: &'static str,
    },

    #[error("property `{property}` holds `{element}` values, which cannot be rendered as text")]
    UnsupportedElement {
        property: String,
        element: &'static str,
    },
}

// -----------------------------------------------------------------------------
// ConvertError

/// Failure reported by a [`ParamConverter`](crate::convert::ParamConverter).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("converter expected a `{expected}` value")]
    TypeMismatch { expected: &'static str },

    #[error("{0}")]
    Message(Cow<'static, str>),

    #[error(transparent)]
    Custom(Box<dyn core::error::Error + Send + Sync>),
}

impl ConvertError {
    /// A plain message.
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Message(message.into())
    }

    /// Wraps any error.
    pub fn custom(error: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::Custom(Box::new(error))
    }
}

// -----------------------------------------------------------------------------
// MarshalError

/// Failure of a whole marshal call. No partial output is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarshalError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("converter for key `{key}` failed: {source}")]
    Convert {
        key: String,
        #[source]
        source: ConvertError,
    },

    #[error("type `{type_name}` is not registered")]
    NotRegistered { type_name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::{CompileError, ConvertError, MarshalError};
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let err = CompileError::DuplicateKey {
            key: "q".into(),
            property: "query".into(),
            previous: "keyword".into(),
        };
        assert_eq!(
            err.to_string(),
            "property `query` resolves to key `q`, already used by `keyword`"
        );

        let err = MarshalError::Convert {
            key: "price".into(),
            source: ConvertError::msg("negative range"),
        };
        assert_eq!(
            err.to_string(),
            "converter for key `price` failed: negative range"
        );
    }

    #[test]
    fn compile_converts_into_marshal() {
        let err: MarshalError = CompileError::NotAStruct { type_path: "u8" }.into();
        assert!(matches!(err, MarshalError::Compile(_)));
    }
}
