//! Two-pass schema builder.
//!
//! The first pass registers every declared type so that the second pass,
//! which attaches fields in member order, can target any of them. Type
//! references in descriptors may still point at names that are never
//! declared; those stay deferred until the graph is finished.

use tracing::{debug, warn};

use super::field::FieldAssembler;
use super::graph::SchemaGraph;
use super::input::InputObjectCodec;
use super::meta::{DeprecationStatus, EnumValue, MetaType, TypeKind};
use super::registry::TypeRegistry;
use super::{MUTATION_TYPE, QUERY_TYPE};
use crate::config::{FieldCollisionPolicy, SchemaBuilderConfig};
use crate::declaration::{DeclarationSet, MemberDeclaration, MemberKind, TypeDeclaration, TypeShape};
use crate::error::{Result, SchemaError};
use crate::name::Name;

/// Builds a [`SchemaGraph`] from a [`DeclarationSet`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: SchemaBuilderConfig,
}

impl SchemaBuilder {
    pub fn new(config: SchemaBuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemaBuilderConfig {
        &self.config
    }

    /// Runs both passes and finalizes the graph.
    ///
    /// # Errors
    ///
    /// Stops at the first configuration error; no partial graph is returned.
    pub fn build(&self, declarations: &DeclarationSet) -> Result<SchemaGraph> {
        let mut registry = TypeRegistry::new();

        let mut claims = Vec::new();
        for declaration in &declarations.types {
            let name = self.register_type(&mut registry, declaration)?;
            if let TypeShape::Object { interfaces } = &declaration.shape {
                claims.push((name, interfaces));
            }
        }
        for (object, interfaces) in claims {
            resolve_interfaces(&mut registry, &object, interfaces)?;
        }

        for member in &declarations.members {
            self.attach_member(&mut registry, member)?;
        }

        let graph = SchemaGraph::new(registry);
        if self.config.strict_references {
            graph.check_references()?;
        }
        debug!(types = graph.type_count(), "Schema graph built");
        Ok(graph)
    }

    fn register_type(
        &self,
        registry: &mut TypeRegistry,
        declaration: &TypeDeclaration,
    ) -> Result<Name> {
        let name: Name = declaration.public_name().parse()?;
        let requested = match &declaration.shape {
            TypeShape::Object { .. } => TypeKind::Object,
            TypeShape::Interface => TypeKind::Interface,
            TypeShape::Enum { .. } => TypeKind::Enum,
            TypeShape::InputObject { .. } => TypeKind::InputObject,
        };
        // host aliases such as `int` already name a built-in scalar
        if let Some(existing) = registry.get(&name).map(MetaType::kind) {
            if existing != requested {
                return Err(SchemaError::DuplicateTypeName {
                    name: name.to_string(),
                    existing,
                    requested,
                });
            }
        }
        registry.add_alias(&declaration.identity, &name);

        match &declaration.shape {
            TypeShape::Object { .. } => {
                registry.get_or_create_object_type(&name)?;
            }
            TypeShape::Interface => {
                registry.get_or_create_interface_type(&name)?;
            }
            TypeShape::Enum { values } => {
                let values = values
                    .iter()
                    .map(|constant| -> Result<EnumValue> {
                        Ok(EnumValue {
                            name: constant.name.parse()?,
                            value: constant.value.clone(),
                            description: constant.description.clone(),
                            deprecation_status: DeprecationStatus::from_reason(
                                constant.deprecation_reason.as_deref(),
                            ),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                registry.get_or_create_enum_type(&name)?.values = values;
            }
            TypeShape::InputObject {
                fields,
                constructor,
            } => {
                let codec = InputObjectCodec::build(fields, constructor.clone(), registry)?;
                registry.get_or_create_input_object_type(&name)?.codec = codec;
            }
        }

        if let Some(meta) = registry.get_mut(&name) {
            meta.set_description(declaration.description.as_deref());
            if declaration.deprecation_reason.is_some() {
                meta.set_deprecation(DeprecationStatus::from_reason(
                    declaration.deprecation_reason.as_deref(),
                ));
            }
        }
        Ok(name)
    }

    fn attach_member(&self, registry: &mut TypeRegistry, member: &MemberDeclaration) -> Result<()> {
        let (target, explicit) = match member.kind {
            MemberKind::Query => (QUERY_TYPE.to_string(), None),
            MemberKind::Mutation => (MUTATION_TYPE.to_string(), None),
            MemberKind::Property | MemberKind::FieldMethod => {
                match (&member.extends, &member.declaring_type) {
                    (Some(extends), _) => (
                        registry.public_name_of(extends).to_string(),
                        Some(extends.as_str()),
                    ),
                    (None, Some(owner)) => (registry.public_name_of(owner).to_string(), None),
                    (None, None) => {
                        return Err(SchemaError::MissingExtendsTarget {
                            member: member.label(),
                        });
                    }
                }
            }
        };
        let target: Name = registry.alias(&target).parse()?;

        if registry.kind_of(&target).is_none() {
            if !self.config.implicit_target_types {
                return Err(SchemaError::UnknownExtendsTarget {
                    member: member.label(),
                    target: explicit.unwrap_or(target.as_str()).to_string(),
                });
            }
            registry.get_or_create_object_type(&target)?;
        }

        let field = FieldAssembler::new(registry).assemble(member, &target)?;
        let Some(meta) = registry.get_mut(&target) else {
            return Err(SchemaError::unknown_type(target.as_str(), Vec::new()));
        };
        let existing = meta.kind();
        let Some(fields) = meta.fields_mut() else {
            return Err(SchemaError::TypeKindMismatch {
                name: target.to_string(),
                existing,
                requested: TypeKind::Object,
            });
        };

        if fields.contains_key(&field.name) {
            match self.config.field_collision {
                FieldCollisionPolicy::Overwrite => {
                    warn!(
                        type_name = %target,
                        field = %field.name,
                        member = %member.label(),
                        "Overwriting field"
                    );
                }
                FieldCollisionPolicy::Reject => {
                    return Err(SchemaError::DuplicateField {
                        type_name: target.to_string(),
                        field: field.name.to_string(),
                    });
                }
            }
        }
        debug!(type_name = %target, field = %field.name, "Attached field");
        fields.insert(field.name.clone(), field);
        Ok(())
    }
}

/// Resolves an object's claimed interfaces once every type is registered.
fn resolve_interfaces(registry: &mut TypeRegistry, object: &Name, claims: &[String]) -> Result<()> {
    let mut resolved = Vec::with_capacity(claims.len());
    for claim in claims {
        match registry.get(claim) {
            Some(MetaType::Interface(interface)) => resolved.push(interface.name.clone()),
            Some(other) => {
                return Err(SchemaError::NotAnInterface {
                    object: object.to_string(),
                    interface: claim.clone(),
                    actual: other.kind(),
                });
            }
            None => return Err(SchemaError::unknown_type(claim.as_str(), registry.type_names())),
        }
    }

    let meta = registry.get_or_create_object_type(object)?;
    for interface in resolved {
        if !meta.interface_names.contains(&interface) {
            meta.interface_names.push(interface);
        }
    }
    Ok(())
}
