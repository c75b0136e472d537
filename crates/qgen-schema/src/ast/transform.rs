use super::{
    Ast, EnumId, EnumNode, FieldNode, InputFieldNode, InputId, InputNode, ModelId, ModelNode,
    OutputFieldNode, OutputId, OutputNode, ResolveError, Target, TypeLink,
};
use crate::node::{
    Document, Enum, Field, FieldKind, InputField, InputType, Location, Model, OutputType, Scalar,
    TypeRef,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Build the resolved [`Ast`] from a flat document.
///
/// Every string reference is looked up by exact name in the namespace its
/// location names. The first declaration wins when a name repeats; the
/// validators reject such documents before they get here.
pub fn transform(document: &Document) -> Result<Ast, ResolveError> {
    let arena = Arena::collect(document);
    let index = Index::build(&arena);

    let models = arena
        .models
        .iter()
        .map(|model| resolve_model(&index, model))
        .collect::<Result<Vec<_>, _>>()?;

    let enums = arena
        .enums
        .iter()
        .map(|def| EnumNode { def: (*def).clone() })
        .collect();

    let inputs = arena
        .inputs
        .iter()
        .map(|input| resolve_input(&index, input))
        .collect::<Result<Vec<_>, _>>()?;

    let outputs = arena
        .outputs
        .iter()
        .map(|output| resolve_output(&index, output))
        .collect::<Result<Vec<_>, _>>()?;

    let ast = Ast {
        models,
        enums,
        inputs,
        outputs,
    };

    debug!(
        models = ast.models.len(),
        enums = ast.enums.len(),
        inputs = ast.inputs.len(),
        outputs = ast.outputs.len(),
        "resolved schema document"
    );

    Ok(ast)
}

///
/// Arena
/// document declarations in the order their ids are assigned
///

struct Arena<'a> {
    models: Vec<&'a Model>,
    enums: Vec<&'a Enum>,
    inputs: Vec<&'a InputType>,
    outputs: Vec<&'a OutputType>,
}

impl<'a> Arena<'a> {
    fn collect(document: &'a Document) -> Self {
        let mut enums: Vec<&Enum> = document.datamodel.enums.iter().collect();

        // schema enum types repeat the datamodel enums; keep the first copy
        for e in document.schema.enum_types.iter() {
            if !enums.iter().any(|known| known.name == e.name) {
                enums.push(e);
            }
        }

        Self {
            models: document.datamodel.models.iter().collect(),
            enums,
            inputs: document.schema.input_object_types.iter().collect(),
            outputs: document.schema.output_object_types.iter().collect(),
        }
    }
}

///
/// Index
/// name -> id, one map per namespace
///

struct Index<'a> {
    models: BTreeMap<&'a str, ModelId>,
    enums: BTreeMap<&'a str, EnumId>,
    inputs: BTreeMap<&'a str, InputId>,
    outputs: BTreeMap<&'a str, OutputId>,
}

impl<'a> Index<'a> {
    fn build(arena: &Arena<'a>) -> Self {
        Self {
            models: first_wins(arena.models.iter().copied().map(|m| m.name.as_str()), ModelId),
            enums: first_wins(arena.enums.iter().copied().map(|e| e.name.as_str()), EnumId),
            inputs: first_wins(arena.inputs.iter().copied().map(|i| i.name.as_str()), InputId),
            outputs: first_wins(arena.outputs.iter().copied().map(|o| o.name.as_str()), OutputId),
        }
    }

    fn by_location(&self, location: Location, name: &str) -> Option<Target> {
        match location {
            Location::Scalar => Scalar::from_name(name).map(Target::Scalar),
            Location::EnumTypes => self.enums.get(name).copied().map(Target::Enum),
            Location::InputObjectTypes => self.inputs.get(name).copied().map(Target::Input),
            Location::OutputObjectTypes => self.outputs.get(name).copied().map(Target::Output),
        }
    }

    fn by_kind(&self, kind: FieldKind, name: &str) -> Option<Target> {
        match kind {
            FieldKind::Scalar => Scalar::from_name(name).map(Target::Scalar),
            FieldKind::Enum => self.enums.get(name).copied().map(Target::Enum),
            FieldKind::Object => self.models.get(name).copied().map(Target::Model),
        }
    }
}

fn first_wins<'a, I, F>(names: I, id: impl Fn(usize) -> F) -> BTreeMap<&'a str, F>
where
    I: Iterator<Item = &'a str>,
{
    let mut map = BTreeMap::new();
    for (i, name) in names.enumerate() {
        map.entry(name).or_insert_with(|| id(i));
    }

    map
}

fn resolve_model(index: &Index, model: &Model) -> Result<ModelNode, ResolveError> {
    let fields = model
        .fields
        .iter()
        .map(|field| resolve_field(index, &model.name, field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModelNode {
        name: model.name.clone(),
        db_name: model.db_name.clone(),
        fields,
        unique_fields: model.unique_fields.clone(),
        primary_key: model.primary_key.clone(),
    })
}

fn resolve_field(index: &Index, owner: &str, field: &Field) -> Result<FieldNode, ResolveError> {
    let target = index
        .by_kind(field.kind, &field.type_name)
        .ok_or_else(|| ResolveError::UnresolvedField {
            owner: owner.to_string(),
            field: field.name.clone(),
            type_name: field.type_name.clone(),
            kind: field.kind,
        })?;

    Ok(FieldNode {
        field: field.clone(),
        link: TypeLink {
            target,
            name: field.type_name.clone(),
            is_list: field.is_list,
        },
    })
}

fn resolve_ref(
    index: &Index,
    owner: &str,
    field: &str,
    type_ref: &TypeRef,
) -> Result<TypeLink, ResolveError> {
    let target = index
        .by_location(type_ref.location, &type_ref.type_name)
        .ok_or_else(|| ResolveError::Unresolved {
            owner: owner.to_string(),
            field: field.to_string(),
            type_name: type_ref.type_name.clone(),
            location: type_ref.location,
        })?;

    Ok(TypeLink {
        target,
        name: type_ref.type_name.clone(),
        is_list: type_ref.is_list,
    })
}

fn resolve_input_field(
    index: &Index,
    owner: &str,
    field: &InputField,
) -> Result<InputFieldNode, ResolveError> {
    let links = field
        .input_types
        .iter()
        .map(|type_ref| resolve_ref(index, owner, &field.name, type_ref))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InputFieldNode {
        field: field.clone(),
        links,
    })
}

fn resolve_input(index: &Index, input: &InputType) -> Result<InputNode, ResolveError> {
    let fields = input
        .fields
        .iter()
        .map(|field| resolve_input_field(index, &input.name, field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InputNode {
        name: input.name.clone(),
        fields,
    })
}

fn resolve_output(index: &Index, output: &OutputType) -> Result<OutputNode, ResolveError> {
    let mut fields = Vec::with_capacity(output.fields.len());

    for field in &output.fields {
        let link = resolve_ref(index, &output.name, &field.name, &field.output_type)?;

        // arguments are reported against the operation that declares them
        let owner = format!("{}.{}", output.name, field.name);
        let args = field
            .args
            .iter()
            .map(|arg| resolve_input_field(index, &owner, arg))
            .collect::<Result<Vec<_>, _>>()?;

        fields.push(OutputFieldNode {
            field: field.clone(),
            link,
            args,
        });
    }

    Ok(OutputNode {
        name: output.name.clone(),
        fields,
    })
}

///
/// TESTS
///
