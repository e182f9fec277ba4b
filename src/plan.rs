//! Type-directed accessor planning.
//!
//! The [`Generator`] turns a discovered schema into an [`AccessorPlan`]: a
//! structural description of which accessor objects must exist and which
//! lens construct each of their methods instantiates. The plan is the whole
//! contract with the renderer; no source text is produced here.
//!
//! Each discovered type yields:
//!
//! - a **required** unit holding a lens onto `T`, unless the type is
//!   recursive;
//! - an **optional** unit holding a presence-aware lens onto `T`, only when
//!   the type is reached behind an `Option` or as a map value;
//! - a single **recursive** unit, in place of both, for a type with an
//!   `Option<Self>` field. It is constructible from either anchor and its
//!   `child()` method returns the same unit type.
//!
//! # Examples
//!
//! ```
//! use optica::plan::{Generator, UnitVariant};
//! use optica::schema::{CompositeType, Schema, TypeRef};
//!
//! let schema: Schema = [CompositeType::builder("Node")
//!     .field("value", TypeRef::scalar("String"))
//!     .field("child", TypeRef::optional(TypeRef::composite("Node")))
//!     .build()]
//! .into_iter()
//! .collect();
//!
//! let plan = Generator::default().generate(&schema, "Node").unwrap();
//! assert_eq!(plan.units().len(), 1);
//! assert_eq!(plan.units()[0].variant, UnitVariant::Recursive);
//! ```

use std::collections::btree_map::{BTreeMap, Entry};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::discovery::{ClassifiedField, DiscoveredType, Discovery, discover};
use crate::schema::{Describe, FieldShape, Schema, SchemaError, TypeRef};

/// Naming and path settings for generated accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorOptions {
    /// Appended to the type name: `Person` becomes `PersonAccessor`.
    pub accessor_suffix: String,
    /// Prepended to presence-aware accessor names: `OptionalPersonAccessor`.
    pub optional_prefix: String,
    /// Path of this crate as seen from the generated code.
    pub crate_path: String,
    /// Rust expressions read by a scalar property when the optional around
    /// it is empty, keyed by scalar type name.
    ///
    /// A scalar outside the standard library with no entry here is exposed
    /// as an `Option` of itself instead, reading `None` when empty.
    pub scalar_defaults: BTreeMap<String, String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            accessor_suffix: "Accessor".to_string(),
            optional_prefix: "Optional".to_string(),
            crate_path: "::optica".to_string(),
            scalar_defaults: BTreeMap::new(),
        }
    }
}

/// Which anchor a unit is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitVariant {
    /// Holds a lens onto `T`.
    Required,
    /// Holds a presence-aware lens onto `Option<T>`.
    Optional,
    /// Holds a presence-aware lens, built from either anchor.
    Recursive,
}

impl UnitVariant {
    /// Whether field accessors of this unit go through the empty policy.
    #[must_use]
    pub const fn is_presence_aware(self) -> bool {
        matches!(self, Self::Optional | Self::Recursive)
    }
}

/// What a scalar property reads when the optional around it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyDefault {
    /// `Default::default()` of the field type.
    TypeDefault,
    /// `None`, for a field that is itself optional.
    Absent,
    /// A configured Rust expression of the field type.
    Expr(String),
}

/// The lens construct behind one accessor method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Construct {
    /// A plain field lens with focus `focus`.
    Plain {
        /// Focus type.
        focus: TypeRef,
    },
    /// A field lens read through an optional, with a default when empty.
    Property {
        /// Focus type.
        focus: TypeRef,
        /// Value read when empty.
        default: PropertyDefault,
    },
    /// A field lens read through an optional as `Option<focus>`, for a
    /// scalar with no known default. Reads `None` when empty; writing
    /// `None` leaves the field untouched.
    OptionalProperty {
        /// Field type, without the added `Option`.
        focus: TypeRef,
    },
    /// The required accessor of a composite field.
    Nested {
        /// Field type.
        target: String,
        /// Accessor type to build.
        accessor: String,
    },
    /// A presence-aware accessor of a composite field.
    OptionalNested {
        /// Field type.
        target: String,
        /// Accessor type to build.
        accessor: String,
    },
    /// A sequence adapter over scalar elements.
    Sequence {
        /// Element type.
        element: TypeRef,
    },
    /// A sequence adapter whose `at` yields element accessors.
    SequenceOf {
        /// Element type.
        element: String,
        /// Element accessor type.
        accessor: String,
    },
    /// A map adapter over scalar values.
    Map {
        /// Whole map type.
        map: TypeRef,
    },
    /// A map adapter whose `at` yields presence-aware value accessors.
    MapOf {
        /// Whole map type.
        map: TypeRef,
        /// Value type.
        value: String,
        /// Value accessor type.
        accessor: String,
    },
    /// A recursive accessor anchored at a required field.
    RecursiveRequired {
        /// Field type.
        target: String,
        /// Accessor type to build.
        accessor: String,
    },
    /// A recursive accessor anchored at an optional field.
    RecursiveOptional {
        /// Field type.
        target: String,
        /// Accessor type to build.
        accessor: String,
    },
    /// `child()` of a recursive unit, returning the unit's own type.
    SelfChild,
}

/// One accessor method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldAccessor {
    /// Field name, also the method name.
    pub field: String,
    /// Declared field type, including any `Box` the accessor looks through.
    pub ty: TypeRef,
    /// Field shape.
    pub shape: FieldShape,
    /// What the method returns and how it is built.
    pub construct: Construct,
}

/// One accessor object to emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccessorUnit {
    /// Focused composite.
    pub type_name: String,
    /// Name of the accessor type.
    pub accessor_name: String,
    /// Anchor kind.
    pub variant: UnitVariant,
    /// Methods in field declaration order.
    pub fields: Vec<FieldAccessor>,
}

/// The structural output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccessorPlan {
    root: String,
    root_accessor: String,
    crate_path: String,
    units: Vec<AccessorUnit>,
}

impl AccessorPlan {
    /// Root composite name.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Accessor returned by the root's `lenses()`.
    #[must_use]
    pub fn root_accessor(&self) -> &str {
        &self.root_accessor
    }

    /// Crate path the rendered code refers to.
    #[must_use]
    pub fn crate_path(&self) -> &str {
        &self.crate_path
    }

    /// Units in discovery order, required before optional per type.
    #[must_use]
    pub fn units(&self) -> &[AccessorUnit] {
        &self.units
    }

    /// Looks a unit up by accessor name.
    #[must_use]
    pub fn unit(&self, accessor_name: &str) -> Option<&AccessorUnit> {
        self.units
            .iter()
            .find(|unit| unit.accessor_name == accessor_name)
    }

    /// The units focused on `type_name`.
    pub fn units_for<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a AccessorUnit> {
        self.units
            .iter()
            .filter(move |unit| unit.type_name == type_name)
    }
}

/// Plans accessor units for a schema.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    /// Creates a generator with `options`.
    #[must_use]
    pub const fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Plans accessors for `root` and every type reachable from it.
    ///
    /// # Errors
    ///
    /// Any discovery error, [`SchemaError::NameCollision`] when two units
    /// would share an accessor name, or [`SchemaError::ReservedField`] when a
    /// field would shadow a method the accessor defines itself.
    pub fn generate(&self, schema: &Schema, root: &str) -> Result<AccessorPlan, SchemaError> {
        let discovery = discover(schema, root)?;
        let naming = Naming::new(&self.options, &discovery);

        let mut units = Vec::new();
        for discovered in discovery.types() {
            if naming.is_recursive(discovered.name()) {
                units.push(plan_unit(&naming, discovered, UnitVariant::Recursive)?);
                continue;
            }
            units.push(plan_unit(&naming, discovered, UnitVariant::Required)?);
            if naming.needs_optional(discovered.name()) {
                units.push(plan_unit(&naming, discovered, UnitVariant::Optional)?);
            }
        }
        check_collisions(&units)?;

        let root_accessor = naming.required(discovery.root().name());
        info!(
            root,
            types = discovery.len(),
            units = units.len(),
            recursive = discovery.recursive_types().count(),
            "accessor plan generated"
        );
        Ok(AccessorPlan {
            root: discovery.root().name().to_string(),
            root_accessor,
            crate_path: self.options.crate_path.clone(),
            units,
        })
    }

    /// Plans accessors for `T`, registering its schema first.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotComposite`] if `T` is not a composite, otherwise as
    /// [`Generator::generate`].
    pub fn generate_for<T: Describe + ?Sized>(&self) -> Result<AccessorPlan, SchemaError> {
        match T::type_ref() {
            TypeRef::Composite(name) => self.generate(&Schema::of::<T>(), &name),
            other => Err(SchemaError::NotComposite {
                name: other.to_string(),
            }),
        }
    }
}

struct Naming<'a> {
    options: &'a GeneratorOptions,
    discovery: &'a Discovery,
    behind_optional: std::collections::BTreeSet<String>,
}

impl<'a> Naming<'a> {
    fn new(options: &'a GeneratorOptions, discovery: &'a Discovery) -> Self {
        Self {
            options,
            discovery,
            behind_optional: discovery.behind_optional(),
        }
    }

    fn is_recursive(&self, type_name: &str) -> bool {
        self.discovery.is_recursive(type_name)
    }

    fn needs_optional(&self, type_name: &str) -> bool {
        self.behind_optional.contains(type_name)
    }

    fn required(&self, type_name: &str) -> String {
        format!("{type_name}{}", self.options.accessor_suffix)
    }

    fn optional(&self, type_name: &str) -> String {
        if self.is_recursive(type_name) {
            return self.required(type_name);
        }
        format!(
            "{}{type_name}{}",
            self.options.optional_prefix, self.options.accessor_suffix
        )
    }
}

/// Methods every presence-aware unit defines besides its field accessors.
const PRESENCE_METHODS: &[&str] = &["is_present"];

/// Scalars known to implement `Default`.
const DEFAULTED_SCALARS: &[&str] = &[
    "bool", "char", "String", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64",
    "i128", "isize", "f32", "f64",
];

fn plan_unit(
    naming: &Naming<'_>,
    discovered: &DiscoveredType,
    variant: UnitVariant,
) -> Result<AccessorUnit, SchemaError> {
    let accessor_name = match variant {
        UnitVariant::Required | UnitVariant::Recursive => naming.required(discovered.name()),
        UnitVariant::Optional => naming.optional(discovered.name()),
    };
    if variant.is_presence_aware() {
        let reserved = discovered
            .fields()
            .iter()
            .find(|field| PRESENCE_METHODS.contains(&field.field.name.as_str()));
        if let Some(field) = reserved {
            return Err(SchemaError::ReservedField {
                type_name: discovered.name().to_string(),
                field: field.field.name.clone(),
                accessor: accessor_name,
            });
        }
    }
    let fields = discovered
        .fields()
        .iter()
        .map(|field| FieldAccessor {
            field: field.field.name.clone(),
            ty: field.field.ty.clone(),
            shape: field.shape,
            construct: construct_for(naming, field, variant.is_presence_aware()),
        })
        .collect();
    debug!(type_name = discovered.name(), accessor = %accessor_name, ?variant, "planned accessor unit");
    Ok(AccessorUnit {
        type_name: discovered.name().to_string(),
        accessor_name,
        variant,
        fields,
    })
}

fn construct_for(naming: &Naming<'_>, field: &ClassifiedField, presence_aware: bool) -> Construct {
    let ty = &field.field.ty.unboxed();
    let target = field.target().unwrap_or_default().to_string();
    match field.shape {
        FieldShape::Scalar if presence_aware => scalar_property(naming.options, ty),
        FieldShape::OptionalScalar if presence_aware => Construct::Property {
            focus: ty.clone(),
            default: PropertyDefault::Absent,
        },
        FieldShape::Scalar | FieldShape::OptionalScalar => Construct::Plain { focus: ty.clone() },
        FieldShape::CompositeRef if naming.is_recursive(&target) => {
            if presence_aware {
                Construct::RecursiveOptional {
                    accessor: naming.optional(&target),
                    target,
                }
            } else {
                Construct::RecursiveRequired {
                    accessor: naming.required(&target),
                    target,
                }
            }
        }
        FieldShape::CompositeRef if !presence_aware => Construct::Nested {
            accessor: naming.required(&target),
            target,
        },
        FieldShape::OptionalCompositeRef if naming.is_recursive(&target) => {
            Construct::RecursiveOptional {
                accessor: naming.optional(&target),
                target,
            }
        }
        FieldShape::CompositeRef | FieldShape::OptionalCompositeRef => Construct::OptionalNested {
            accessor: naming.optional(&target),
            target,
        },
        FieldShape::ListOfScalar => Construct::Sequence {
            element: match ty {
                TypeRef::List(element) => element.as_ref().clone(),
                other => other.clone(),
            },
        },
        FieldShape::ListOfComposite => Construct::SequenceOf {
            accessor: naming.required(&target),
            element: target,
        },
        FieldShape::MapOfScalar => Construct::Map { map: ty.clone() },
        FieldShape::MapOfComposite => Construct::MapOf {
            map: ty.clone(),
            accessor: naming.optional(&target),
            value: target,
        },
        FieldShape::RecursiveOptionalSelfRef => Construct::SelfChild,
    }
}

fn scalar_property(options: &GeneratorOptions, ty: &TypeRef) -> Construct {
    let name = ty.to_string();
    if let Some(expr) = options.scalar_defaults.get(&name) {
        return Construct::Property {
            focus: ty.clone(),
            default: PropertyDefault::Expr(expr.clone()),
        };
    }
    if DEFAULTED_SCALARS.contains(&name.as_str()) {
        return Construct::Property {
            focus: ty.clone(),
            default: PropertyDefault::TypeDefault,
        };
    }
    Construct::OptionalProperty { focus: ty.clone() }
}

fn check_collisions(units: &[AccessorUnit]) -> Result<(), SchemaError> {
    let mut claimed: BTreeMap<&str, &str> = BTreeMap::new();
    for unit in units {
        match claimed.entry(&unit.accessor_name) {
            Entry::Vacant(slot) => {
                slot.insert(&unit.type_name);
            }
            Entry::Occupied(slot) => {
                return Err(SchemaError::NameCollision {
                    name: unit.accessor_name.clone(),
                    first: (*slot.get()).to_string(),
                    second: unit.type_name.clone(),
                });
            }
        }
    }
    Ok(())
}
