//! Items used by the code `#[derive(QueryParams)]` generates.
//!
//! Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::error::CompileError;
    use crate::registry::{ParamsRegistry, QueryParams};

    /// A registration function submitted by a derived or listed type.
    pub struct __AutoRegisterFunc(pub fn(&mut ParamsRegistry) -> Result<(), CompileError>);

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut ParamsRegistry) -> Result<(), CompileError>;
    }

    impl<T: QueryParams> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut ParamsRegistry) -> Result<(), CompileError> {
            registry.register::<T>().map(|_| ())
        }
    }

    // Always submitted. If it ran, the platform supports static registration.
    fn __mark_available(registry: &mut ParamsRegistry) -> Result<(), CompileError> {
        registry.auto_register_available = true;
        Ok(())
    }

    inventory::submit! {
        __AutoRegisterFunc(__mark_available)
    }

    pub(crate) fn __register_types(registry: &mut ParamsRegistry) -> Result<(), CompileError> {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry)?;
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use core::any::TypeId;

        use crate::derive::QueryParams;
        use crate::registry::ParamsRegistry;

        #[derive(QueryParams)]
        #[query(auto_register)]
        struct Listed {
            id: u64,
        }

        #[derive(QueryParams)]
        struct Unlisted {
            id: u64,
        }

        #[test]
        fn registers_marked_types() {
            let mut registry = ParamsRegistry::new();
            let available = registry.auto_register().unwrap();
            if available {
                assert!(registry.contains(TypeId::of::<Listed>()));
                assert!(!registry.contains(TypeId::of::<Unlisted>()));
                assert_eq!(registry.auto_register(), Ok(true));
            } else {
                assert!(registry.is_empty());
            }
        }
    }
}
