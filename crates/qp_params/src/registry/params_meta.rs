use core::any::TypeId;

use crate::error::MarshalError;
use crate::info::Type;
use crate::marshal::{ParamMap, marshal};
use crate::registry::QueryParams;
use crate::schema::CompiledSchema;
use crate::value::QueryStruct;

/// A registered type and its compiled schema.
#[derive(Debug, Clone, Copy)]
pub struct ParamsMeta {
    ty: Type,
    schema: &'static CompiledSchema,
}

impl ParamsMeta {
    #[inline]
    pub const fn new(schema: &'static CompiledSchema) -> Self {
        Self {
            ty: *schema.ty(),
            schema,
        }
    }

    /// Compiles (or reuses) the schema of `T`.
    pub fn of<T: QueryParams>() -> Result<Self, crate::error::CompileError> {
        T::compiled_schema().map(Self::new)
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub const fn schema(&self) -> &'static CompiledSchema {
        self.schema
    }

    /// Marshals a value of the registered type.
    ///
    /// # Errors
    ///
    /// [`MarshalError::NotRegistered`] if `value` is of another type.
    pub fn marshal(&self, value: &dyn QueryStruct) -> Result<ParamMap, MarshalError> {
        if value.as_any().type_id() != self.ty.id() {
            return Err(MarshalError::NotRegistered {
                type_name: value.query_type_name(),
            });
        }
        marshal(self.schema, value)
    }
}
