use alloc::string::String;
use core::any::TypeId;
use core::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use qp_utils::TypeIdMap;
use qp_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::error::{CompileError, MarshalError};
use crate::marshal::ParamMap;
use crate::registry::{ParamsMeta, QueryParams};
use crate::value::QueryStruct;

// -----------------------------------------------------------------------------
// ParamsRegistry

/// A registry of marshallable types.
///
/// Maps the identity of each registered type to its compiled schema, so
/// values can be marshalled without knowing their concrete type.
///
/// # Example
///
/// ```
/// use qp_params::ParamsRegistry;
/// use qp_params::derive::QueryParams;
/// use qp_params::value::QueryStruct;
///
/// #[derive(QueryParams)]
/// struct Page {
///     number: u32,
/// }
///
/// let mut registry = ParamsRegistry::new();
/// assert_eq!(registry.register::<Page>(), Ok(true));
/// assert_eq!(registry.register::<Page>(), Ok(false));
///
/// let meta = registry.get_with_type_name("Page").unwrap();
/// assert_eq!(meta.schema().properties().len(), 1);
///
/// let value: &dyn QueryStruct = &Page { number: 3 };
/// assert_eq!(registry.serialize_dyn(value).unwrap(), "number=3");
/// ```
pub struct ParamsRegistry {
    meta_table: TypeIdMap<ParamsMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    // Set by the registration function every build submits.
    pub(crate) auto_register_available: bool,
}

impl Default for ParamsRegistry {
    /// See [`ParamsRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ParamsRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
            auto_register_available: false,
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        meta: &ParamsMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = meta.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        // Full paths are assumed unique.
        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Inserts `meta` if its type is not registered yet.
    ///
    /// Returns `true` if it was inserted.
    pub fn try_insert_meta(&mut self, meta: ParamsMeta) -> bool {
        self.meta_table.try_insert(meta.type_id(), || {
            Self::add_new_type_indices(
                &meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Registers `T`, compiling its schema if needed.
    ///
    /// Returns `Ok(false)` if `T` was already registered.
    ///
    /// # Errors
    ///
    /// The [`CompileError`] of `T`'s schema. Nothing is registered then.
    pub fn register<T: QueryParams>(&mut self) -> Result<bool, CompileError> {
        if self.contains(TypeId::of::<T>()) {
            return Ok(false);
        }
        let meta = ParamsMeta::of::<T>()?;
        log::debug!("registered query params type `{}`", meta.type_path());
        Ok(self.try_insert_meta(meta))
    }

    /// Registers every non-generic type marked `#[query(auto_register)]`
    /// or named in `impl_auto_register!`.
    ///
    /// Repeated calls are cheap and never insert duplicates.
    ///
    /// ## Return Value
    ///
    /// `Ok(true)` if automatic registration is supported on the current
    /// platform, `Ok(false)` otherwise or without the `auto_register` feature.
    ///
    /// # Errors
    ///
    /// The first [`CompileError`] met. Types registered before it stay
    /// registered, and the next call tries again.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use core::any::TypeId;
    /// use qp_params::ParamsRegistry;
    /// use qp_params::derive::QueryParams;
    ///
    /// #[derive(QueryParams)]
    /// #[query(auto_register)]
    /// struct Page {
    ///     number: u32,
    /// }
    ///
    /// let mut registry = ParamsRegistry::new();
    /// assert_eq!(registry.auto_register(), Ok(true));
    /// assert!(registry.contains(TypeId::of::<Page>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> Result<bool, CompileError> {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            if self.auto_register_available {
                return Ok(true);
            }
            if let Err(err) = auto_register::__register_types(self) {
                self.auto_register_available = false;
                return Err(err);
            }
            Ok(self.auto_register_available)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            Ok(false)
        }
    }

    /// Whether the type with the given [`TypeId`] is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ParamsMeta> {
        self.meta_table.get(&type_id)
    }

    /// Looks a type up by its full [type path](crate::info::TypePath::type_path).
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&ParamsMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks a type up by its short [type name](crate::info::TypePath::type_name).
    ///
    /// Returns `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&ParamsMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given type name matches several registered types.
    ///
    /// ```
    /// # use qp_params::ParamsRegistry;
    /// # mod foo {
    /// #     use qp_params::derive::QueryParams;
    /// #     #[derive(QueryParams)]
    /// #     pub struct Page { pub n: u8 }
    /// # }
    /// # mod bar {
    /// #     use qp_params::derive::QueryParams;
    /// #     #[derive(QueryParams)]
    /// #     pub struct Page { pub n: u8 }
    /// # }
    /// let mut registry = ParamsRegistry::new();
    /// registry.register::<foo::Page>().unwrap();
    /// registry.register::<bar::Page>().unwrap();
    /// assert!(registry.is_ambiguous("Page"));
    /// assert!(registry.get_with_type_name("Page").is_none());
    /// ```
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ParamsMeta> {
        self.meta_table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta_table.is_empty()
    }

    /// Marshals a value whose type is registered.
    ///
    /// # Errors
    ///
    /// [`MarshalError::NotRegistered`] if the value's type is unknown, or
    /// the error of the marshal call.
    pub fn marshal_dyn(&self, value: &dyn QueryStruct) -> Result<ParamMap, MarshalError> {
        match self.get(value.as_any().type_id()) {
            Some(meta) => meta.marshal(value),
            None => Err(MarshalError::NotRegistered {
                type_name: value.query_type_name(),
            }),
        }
    }

    /// [`marshal_dyn`](Self::marshal_dyn) joined into a query string.
    pub fn serialize_dyn(&self, value: &dyn QueryStruct) -> Result<String, MarshalError> {
        self.marshal_dyn(value).map(|params| params.to_query_string())
    }
}

// -----------------------------------------------------------------------------
// ParamsRegistryArc

/// A [`ParamsRegistry`] shared between threads.
#[derive(Clone, Default)]
pub struct ParamsRegistryArc {
    /// The wrapped [`ParamsRegistry`].
    pub internal: Arc<RwLock<ParamsRegistry>>,
}

impl ParamsRegistryArc {
    /// Takes a read lock on the underlying [`ParamsRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ParamsRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ParamsRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ParamsRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ParamsRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read().type_path_to_id.keys().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::{ParamsRegistry, ParamsRegistryArc};
    use crate::derive::QueryParams;
    use crate::error::{CompileError, MarshalError};
    use crate::value::QueryStruct;

    #[derive(QueryParams)]
    struct Page {
        number: u32,
    }

    #[derive(QueryParams)]
    struct Other {
        flag: bool,
    }

    #[derive(QueryParams)]
    #[query(fail_on_duplicate_keys)]
    struct Broken {
        #[query(rename = "flag")]
        first: bool,
        flag: bool,
    }

    #[test]
    fn lookups() {
        let mut registry = ParamsRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register::<Page>(), Ok(true));

        let meta = registry.get(TypeId::of::<Page>()).unwrap();
        assert!(meta.ty().is::<Page>());
        assert!(registry.get_with_type_path(meta.type_path()).is_some());
        assert!(registry.get_with_type_name("Page").is_some());
        assert!(!registry.is_ambiguous("Page"));
        assert_eq!(registry.iter().len(), 1);
    }

    #[test]
    fn failed_compilation_registers_nothing() {
        let mut registry = ParamsRegistry::new();
        assert!(matches!(
            registry.register::<Broken>(),
            Err(CompileError::DuplicateKey { .. })
        ));
        assert!(!registry.contains(TypeId::of::<Broken>()));
    }

    #[test]
    fn marshal_by_identity() {
        let shared = ParamsRegistryArc::default();
        shared.write().register::<Page>().unwrap();

        let page: &dyn QueryStruct = &Page { number: 7 };
        assert_eq!(shared.read().serialize_dyn(page).unwrap(), "number=7");

        let other: &dyn QueryStruct = &Other { flag: true };
        assert!(matches!(
            shared.read().marshal_dyn(other),
            Err(MarshalError::NotRegistered { .. })
        ));
    }
}
