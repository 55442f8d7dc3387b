use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::config::QueryConfig;
use crate::convert::ConverterFn;
use crate::error::CompileError;
use crate::info::{StructInfo, Type, TypeInfo, TypeKind};
use crate::schema::{KeyResolver, PropertyDescriptor, ValueShape, classify, extract};

// -----------------------------------------------------------------------------
// CompiledSchema

/// The marshalling plan of a type: its configuration and one
/// [`PropertyPlan`] per emitted property, in declaration order.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    ty: Type,
    config: QueryConfig,
    properties: Box<[PropertyPlan]>,
}

impl CompiledSchema {
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Top-level plans. Ignored properties and nested properties that are
    /// not flattened have none.
    #[inline]
    pub fn properties(&self) -> &[PropertyPlan] {
        &self.properties
    }

    /// Finds a top-level plan by property name.
    pub fn property(&self, name: &str) -> Option<&PropertyPlan> {
        self.properties.iter().find(|p| p.name == name)
    }
}

// -----------------------------------------------------------------------------
// PropertyPlan

/// How one property is marshalled.
#[derive(Debug, Clone)]
pub struct PropertyPlan {
    name: String,
    index: usize,
    key: String,
    shape: ValueShape,
    converter: Option<ConverterFn>,
    children: Box<[PropertyPlan]>,
}

impl PropertyPlan {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index passed to [`QueryStruct::property`](crate::value::QueryStruct::property).
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved key. For nested properties, the prefix chain of the children.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub const fn shape(&self) -> ValueShape {
        self.shape
    }

    #[inline]
    pub const fn converter(&self) -> Option<&ConverterFn> {
        self.converter.as_ref()
    }

    /// Plans of a flattened nested struct's properties.
    #[inline]
    pub fn children(&self) -> &[PropertyPlan] {
        &self.children
    }
}

// -----------------------------------------------------------------------------
// compile

/// Compiles the schema of a struct type.
///
/// Nested properties are flattened recursively with the root type's
/// configuration. Keys are checked for duplicates across the whole type,
/// nested keys included; map entries and converter output are not.
///
/// # Errors
///
/// - [`CompileError::NotAStruct`] if `info` does not describe a struct.
/// - [`CompileError::UnresolvableNested`] if a flattened property has no struct description.
/// - [`CompileError::RecursiveNesting`] if a struct is flattened inside itself.
/// - [`CompileError::UnsupportedElement`] if items cannot be rendered as text.
/// - [`CompileError::DuplicateKey`] if keys collide and duplicates are configured to fail.
pub fn compile(info: &TypeInfo) -> Result<CompiledSchema, CompileError> {
    let Some(structure) = info.as_struct() else {
        return Err(CompileError::NotAStruct {
            type_path: info.type_path(),
        });
    };

    let config = *structure.config();
    let mut compiler = Compiler {
        resolver: KeyResolver::new(&config),
        stack: vec![info.ty().id()],
    };
    let properties = compiler.properties(structure, None, None)?;

    log::debug!(
        "compiled query schema of `{}`: {} properties",
        info.type_path(),
        properties.len()
    );

    Ok(CompiledSchema {
        ty: *info.ty(),
        config,
        properties,
    })
}

struct Compiler {
    resolver: KeyResolver,
    // Structs being flattened, outermost first.
    stack: Vec<TypeId>,
}

impl Compiler {
    fn properties(
        &mut self,
        info: &StructInfo,
        chain: Option<&str>,
        parent: Option<&str>,
    ) -> Result<Box<[PropertyPlan]>, CompileError> {
        let mut plans = Vec::new();

        for property in extract(info) {
            if property.ignored() {
                continue;
            }
            let label = match parent {
                Some(parent) => format!("{parent}.{}", property.name()),
                None => property.name().to_string(),
            };

            let shape = classify(&property)?;
            let plan = match shape {
                ValueShape::Nested => {
                    match self.nested(info, &property, chain, &label)? {
                        Some(plan) => plan,
                        None => continue,
                    }
                }
                // Map entry keys and converter output are not claimed.
                _ => {
                    let key = self.resolver.resolve(&property, chain);
                    self.resolver.claim(&key, &label)?;
                    PropertyPlan {
                        name: property.name().to_string(),
                        index: property.index(),
                        key,
                        shape,
                        converter: match shape {
                            ValueShape::Converted => property.meta().converter().copied(),
                            _ => None,
                        },
                        children: Box::new([]),
                    }
                }
            };
            plans.push(plan);
        }

        Ok(plans.into_boxed_slice())
    }

    /// `None` when the property is not flattened and emits nothing.
    fn nested(
        &mut self,
        owner: &StructInfo,
        property: &PropertyDescriptor,
        chain: Option<&str>,
        label: &str,
    ) -> Result<Option<PropertyPlan>, CompileError> {
        let child_chain = match chain {
            Some(chain) => format!("{chain}{}", property.meta().prefix().unwrap_or("")),
            None => match self.resolver.nested_chain(property) {
                Some(chain) => chain,
                None => return Ok(None),
            },
        };

        let mut nested = property.type_info();
        if let TypeKind::Nullable { inner } = nested.kind() {
            nested = inner();
        }
        let Some(nested_info) = nested.as_struct() else {
            return Err(CompileError::UnresolvableNested {
                owner: owner.type_path(),
                property: label.to_string(),
                nested: nested.type_path(),
            });
        };

        let id = nested.ty().id();
        if self.stack.contains(&id) {
            return Err(CompileError::RecursiveNesting {
                property: label.to_string(),
                nested: nested.type_path(),
            });
        }

        self.stack.push(id);
        let children = self.properties(nested_info, Some(&child_chain), Some(label));
        self.stack.pop();

        Ok(Some(PropertyPlan {
            name: property.name().to_string(),
            index: property.index(),
            key: child_chain,
            shape: ValueShape::Nested,
            converter: None,
            children: children?,
        }))
    }
}
