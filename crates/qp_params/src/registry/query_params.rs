use alloc::string::String;

use crate::error::{CompileError, MarshalError};
use crate::info::Typed;
use crate::marshal::{ParamMap, marshal};
use crate::schema::CompiledSchema;
use crate::value::QueryStruct;

/// A type that can be marshalled into query parameters.
///
/// Implemented by `#[derive(QueryParams)]`. The schema is compiled the
/// first time it is needed and cached for the life of the program,
/// compilation errors included.
///
/// # Examples
///
/// ```
/// use qp_params::QueryParams;
/// use qp_params::derive::QueryParams;
///
/// #[derive(QueryParams)]
/// #[query(case = "snake")]
/// #[allow(non_snake_case)]
/// struct Search {
///     #[query(rename = "q")]
///     keyword: String,
///     pageSize: u32,
///     tags: Vec<String>,
/// }
///
/// let search = Search {
///     keyword: "red shoes".into(),
///     pageSize: 20,
///     tags: vec!["a".into(), "b".into()],
/// };
///
/// assert_eq!(
///     search.to_query_string().unwrap(),
///     "q=red%20shoes&page_size=20&tags=a&tags=b"
/// );
/// ```
pub trait QueryParams: QueryStruct + Typed + Sized {
    /// The cached schema of this type.
    fn compiled_schema() -> Result<&'static CompiledSchema, CompileError>;

    /// Marshals `self` into ordered query parameters.
    fn to_query_params(&self) -> Result<ParamMap, MarshalError> {
        marshal(Self::compiled_schema()?, self)
    }

    /// Marshals `self` and joins the pairs with `&`.
    fn to_query_string(&self) -> Result<String, MarshalError> {
        self.to_query_params().map(|params| params.to_query_string())
    }
}
