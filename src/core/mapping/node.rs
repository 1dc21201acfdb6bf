//! Child mapping nodes.
//!
//! Every node kind is a variant of [`Mapping`] carrying only the fields
//! it needs. Indexable leaves share [`FieldMapping`].

use crate::core::converter::Converter;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A converter attached to a leaf by the converter-lookup stage
#[derive(Clone)]
pub struct BoundConverter {
    /// Name the converter was looked up under
    pub name: String,
    pub converter: Arc<dyn Converter>,
}

impl BoundConverter {
    pub fn new(name: impl Into<String>, converter: Arc<dyn Converter>) -> Self {
        Self {
            name: name.into(),
            converter,
        }
    }
}

impl PartialEq for BoundConverter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for BoundConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundConverter({})", self.name)
    }
}

impl Serialize for BoundConverter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Store {
    #[default]
    Yes,
    No,
    Compress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    #[default]
    Analyzed,
    NotAnalyzed,
    No,
}

/// Text indexed in place of a missing value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullValue {
    /// Takes the global default, if any
    #[default]
    Unset,
    /// Never index a null marker
    Disabled,
    Value(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagedId {
    #[default]
    Auto,
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorStrategy {
    /// Direct field access
    Field,
    /// Getter method access
    Property,
}

impl AccessorStrategy {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "field" => Some(AccessorStrategy::Field),
            "property" => Some(AccessorStrategy::Property),
            _ => None,
        }
    }
}

/// How a class member is read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessor {
    pub strategy: AccessorStrategy,
    pub member: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    List,
    Set,
    Array,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cascade {
    All,
    Create,
    Save,
    Delete,
}

/// An indexable leaf
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Field name, possibly a `${group.metadata}` placeholder
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub boost: Option<f32>,
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub index: IndexMode,
    #[serde(default)]
    pub analyzer: Option<String>,
    #[serde(default)]
    pub exclude_from_all: Option<bool>,
    #[serde(default)]
    pub null_value: NullValue,
    /// Converter name requested by the definition
    #[serde(default)]
    pub converter: Option<String>,
    /// Declared value type used for converter defaults
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub bound: Option<BoundConverter>,
}

impl FieldMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_converter(mut self, converter: impl Into<String>) -> Self {
        self.converter = Some(converter.into());
        self
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    pub fn with_null_value(mut self, null_value: NullValue) -> Self {
        self.null_value = null_value;
        self
    }

    pub fn is_stored(&self) -> bool {
        self.store != Store::No
    }
}

/// Class property or id with its indexed metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassPropertyMapping {
    pub name: String,
    #[serde(default)]
    pub accessor: Option<String>,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub managed_id: ManagedId,
    #[serde(default)]
    pub meta_data: Vec<FieldMapping>,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub resolved_accessor: Option<Accessor>,
    /// Synthetic path used to rebuild the value from the index
    #[serde(default, skip_deserializing)]
    pub internal_id_path: Option<String>,
}

impl ClassPropertyMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_meta_data(mut self, meta_data: FieldMapping) -> Self {
        self.meta_data.push(meta_data);
        self
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }
}

/// Embedded object whose mapping comes from another alias
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMapping {
    pub name: String,
    #[serde(default)]
    pub ref_alias: Vec<String>,
    #[serde(default)]
    pub ref_class: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub accessor: Option<String>,
    #[serde(default)]
    pub cascade: Vec<Cascade>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub resolved_accessor: Option<Accessor>,
    /// Children copied from the referenced alias by late binding
    #[serde(default, skip_deserializing)]
    pub inlined: Vec<Mapping>,
}

impl ComponentMapping {
    pub fn new(name: impl Into<String>, ref_alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ref_alias: vec![ref_alias.into()],
            ..Self::default()
        }
    }
}

/// Link to a separately indexed root object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMapping {
    pub name: String,
    #[serde(default)]
    pub ref_alias: Vec<String>,
    #[serde(default)]
    pub ref_class: Option<String>,
    #[serde(default)]
    pub accessor: Option<String>,
    #[serde(default)]
    pub cascade: Vec<Cascade>,
    #[serde(default)]
    pub lazy: bool,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub resolved_accessor: Option<Accessor>,
}

impl ReferenceMapping {
    pub fn new(name: impl Into<String>, ref_alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ref_alias: vec![ref_alias.into()],
            ..Self::default()
        }
    }
}

/// Fixed values indexed with every document of the alias
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantMapping {
    #[serde(flatten)]
    pub field: FieldMapping,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Back-pointer from a component to its owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentMapping {
    pub name: String,
    #[serde(default)]
    pub accessor: Option<String>,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub resolved_accessor: Option<Accessor>,
}

/// Metadata computed from an expression over the object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicMetaDataMapping {
    #[serde(flatten)]
    pub field: FieldMapping,
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Collection property; `element` maps each item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMapping {
    pub name: String,
    #[serde(default)]
    pub declared_type: Option<String>,
    #[serde(default)]
    pub accessor: Option<String>,
    pub element: Box<Mapping>,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub kind: Option<CollectionKind>,
    #[serde(default, skip_deserializing)]
    pub resolved_accessor: Option<Accessor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XmlPropertyMapping {
    #[serde(flatten)]
    pub field: FieldMapping,
    #[serde(default)]
    pub xpath: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonPropertyMapping {
    #[serde(flatten)]
    pub field: FieldMapping,
    /// Dotted name from the document root, set by late binding
    #[serde(default, skip_deserializing)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonObjectMapping {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Mapping>,
    #[serde(default)]
    pub override_by_name: bool,
    #[serde(default)]
    pub defined_in_alias: Option<String>,
    #[serde(default, skip_deserializing)]
    pub full_name: Option<String>,
}

/// A child mapping node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mapping {
    Id(ClassPropertyMapping),
    Property(ClassPropertyMapping),
    Component(ComponentMapping),
    Reference(ReferenceMapping),
    Constant(ConstantMapping),
    Parent(ParentMapping),
    DynamicMetaData(DynamicMetaDataMapping),
    Collection(CollectionMapping),
    ResourceId(FieldMapping),
    ResourceProperty(FieldMapping),
    XmlId(XmlPropertyMapping),
    XmlProperty(XmlPropertyMapping),
    XmlContent(FieldMapping),
    JsonId(JsonPropertyMapping),
    JsonProperty(JsonPropertyMapping),
    JsonObject(JsonObjectMapping),
    JsonContent(FieldMapping),
}

impl Mapping {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Mapping::Id(_) => "id",
            Mapping::Property(_) => "property",
            Mapping::Component(_) => "component",
            Mapping::Reference(_) => "reference",
            Mapping::Constant(_) => "constant",
            Mapping::Parent(_) => "parent",
            Mapping::DynamicMetaData(_) => "dynamic-meta-data",
            Mapping::Collection(_) => "collection",
            Mapping::ResourceId(_) => "resource-id",
            Mapping::ResourceProperty(_) => "resource-property",
            Mapping::XmlId(_) => "xml-id",
            Mapping::XmlProperty(_) => "xml-property",
            Mapping::XmlContent(_) => "xml-content",
            Mapping::JsonId(_) => "json-id",
            Mapping::JsonProperty(_) => "json-property",
            Mapping::JsonObject(_) => "json-object",
            Mapping::JsonContent(_) => "json-content",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Mapping::Id(m) | Mapping::Property(m) => &m.name,
            Mapping::Component(m) => &m.name,
            Mapping::Reference(m) => &m.name,
            Mapping::Constant(m) => &m.field.name,
            Mapping::Parent(m) => &m.name,
            Mapping::DynamicMetaData(m) => &m.field.name,
            Mapping::Collection(m) => &m.name,
            Mapping::ResourceId(f)
            | Mapping::ResourceProperty(f)
            | Mapping::XmlContent(f)
            | Mapping::JsonContent(f) => &f.name,
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => &m.field.name,
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => &m.field.name,
            Mapping::JsonObject(m) => &m.name,
        }
    }

    /// Mutable name, used to default unnamed nodes
    pub fn name_mut(&mut self) -> &mut String {
        match self {
            Mapping::Id(m) | Mapping::Property(m) => &mut m.name,
            Mapping::Component(m) => &mut m.name,
            Mapping::Reference(m) => &mut m.name,
            Mapping::Constant(m) => &mut m.field.name,
            Mapping::Parent(m) => &mut m.name,
            Mapping::DynamicMetaData(m) => &mut m.field.name,
            Mapping::Collection(m) => &mut m.name,
            Mapping::ResourceId(f)
            | Mapping::ResourceProperty(f)
            | Mapping::XmlContent(f)
            | Mapping::JsonContent(f) => &mut f.name,
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => &mut m.field.name,
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => &mut m.field.name,
            Mapping::JsonObject(m) => &mut m.name,
        }
    }

    pub fn is_id(&self) -> bool {
        matches!(
            self,
            Mapping::Id(_) | Mapping::ResourceId(_) | Mapping::XmlId(_) | Mapping::JsonId(_)
        )
    }

    pub fn override_by_name(&self) -> bool {
        match self {
            Mapping::Id(m) | Mapping::Property(m) => m.override_by_name,
            Mapping::Component(m) => m.override_by_name,
            Mapping::Reference(m) => m.override_by_name,
            Mapping::Constant(m) => m.field.override_by_name,
            Mapping::Parent(m) => m.override_by_name,
            Mapping::DynamicMetaData(m) => m.field.override_by_name,
            Mapping::Collection(m) => m.override_by_name,
            Mapping::ResourceId(f)
            | Mapping::ResourceProperty(f)
            | Mapping::XmlContent(f)
            | Mapping::JsonContent(f) => f.override_by_name,
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => m.field.override_by_name,
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => m.field.override_by_name,
            Mapping::JsonObject(m) => m.override_by_name,
        }
    }

    pub fn defined_in_alias(&self) -> Option<&str> {
        let defined = match self {
            Mapping::Id(m) | Mapping::Property(m) => &m.defined_in_alias,
            Mapping::Component(m) => &m.defined_in_alias,
            Mapping::Reference(m) => &m.defined_in_alias,
            Mapping::Constant(m) => &m.field.defined_in_alias,
            Mapping::Parent(m) => &m.defined_in_alias,
            Mapping::DynamicMetaData(m) => &m.field.defined_in_alias,
            Mapping::Collection(m) => &m.defined_in_alias,
            Mapping::ResourceId(f)
            | Mapping::ResourceProperty(f)
            | Mapping::XmlContent(f)
            | Mapping::JsonContent(f) => &f.defined_in_alias,
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => &m.field.defined_in_alias,
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => &m.field.defined_in_alias,
            Mapping::JsonObject(m) => &m.defined_in_alias,
        };
        defined.as_deref()
    }

    /// Stamp the alias this node was declared in, unless already set
    pub fn mark_defined_in(&mut self, alias: &str) {
        let slot = match self {
            Mapping::Id(m) | Mapping::Property(m) => &mut m.defined_in_alias,
            Mapping::Component(m) => &mut m.defined_in_alias,
            Mapping::Reference(m) => &mut m.defined_in_alias,
            Mapping::Constant(m) => &mut m.field.defined_in_alias,
            Mapping::Parent(m) => &mut m.defined_in_alias,
            Mapping::DynamicMetaData(m) => &mut m.field.defined_in_alias,
            Mapping::Collection(m) => &mut m.defined_in_alias,
            Mapping::ResourceId(f)
            | Mapping::ResourceProperty(f)
            | Mapping::XmlContent(f)
            | Mapping::JsonContent(f) => &mut f.defined_in_alias,
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => &mut m.field.defined_in_alias,
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => &mut m.field.defined_in_alias,
            Mapping::JsonObject(m) => &mut m.defined_in_alias,
        };
        if slot.is_none() {
            *slot = Some(alias.to_string());
        }
    }

    /// Visit every indexable leaf below this node
    pub fn for_each_field(&self, f: &mut dyn FnMut(&FieldMapping)) {
        match self {
            Mapping::Id(m) | Mapping::Property(m) => {
                for meta_data in &m.meta_data {
                    f(meta_data);
                }
            }
            Mapping::Component(m) => {
                for child in &m.inlined {
                    child.for_each_field(f);
                }
            }
            Mapping::Reference(_) | Mapping::Parent(_) => {}
            Mapping::Constant(m) => f(&m.field),
            Mapping::DynamicMetaData(m) => f(&m.field),
            Mapping::Collection(m) => m.element.for_each_field(f),
            Mapping::ResourceId(field)
            | Mapping::ResourceProperty(field)
            | Mapping::XmlContent(field)
            | Mapping::JsonContent(field) => f(field),
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => f(&m.field),
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => f(&m.field),
            Mapping::JsonObject(m) => {
                for child in &m.children {
                    child.for_each_field(f);
                }
            }
        }
    }

    /// Mutable counterpart of [`Mapping::for_each_field`]
    pub fn for_each_field_mut(&mut self, f: &mut dyn FnMut(&mut FieldMapping)) {
        match self {
            Mapping::Id(m) | Mapping::Property(m) => {
                for meta_data in &mut m.meta_data {
                    f(meta_data);
                }
            }
            Mapping::Component(m) => {
                for child in &mut m.inlined {
                    child.for_each_field_mut(f);
                }
            }
            Mapping::Reference(_) | Mapping::Parent(_) => {}
            Mapping::Constant(m) => f(&mut m.field),
            Mapping::DynamicMetaData(m) => f(&mut m.field),
            Mapping::Collection(m) => m.element.for_each_field_mut(f),
            Mapping::ResourceId(field)
            | Mapping::ResourceProperty(field)
            | Mapping::XmlContent(field)
            | Mapping::JsonContent(field) => f(field),
            Mapping::XmlId(m) | Mapping::XmlProperty(m) => f(&mut m.field),
            Mapping::JsonId(m) | Mapping::JsonProperty(m) => f(&mut m.field),
            Mapping::JsonObject(m) => {
                for child in &mut m.children {
                    child.for_each_field_mut(f);
                }
            }
        }
    }
}
