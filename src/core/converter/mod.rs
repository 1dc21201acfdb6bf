//! Value converters and the converter lookup.
//!
//! Converters are registered under a logical name (`date`, `long`, or
//! any name configured through `sextant.converter.<name>.type`). Value
//! type shorthands (`i64`, `String`, ...) map to a default converter
//! name.

mod builtin;

pub use builtin::{
    BooleanConverter, DateConverter, DynamicConverter, NumberConverter, NumberKind,
    StringConverter, DEFAULT_DATE_FORMAT,
};

use crate::core::error::{Result, SextantError};
use crate::core::registry::FactoryRegistry;
use crate::core::settings::{keys, Settings, SettingsSource};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Converts between in-memory values and their index text form
pub trait Converter: Send + Sync + fmt::Debug {
    /// Converter type name
    fn name(&self) -> &str;

    fn to_text(&self, value: &Value) -> Result<String>;

    fn from_text(&self, text: &str) -> Result<Value>;

    /// Whether text written by this converter can be read back
    fn round_trips(&self) -> bool {
        true
    }
}

/// Read side consulted by the processor chain
pub trait ConverterLookup: Send + Sync {
    fn lookup_converter(&self, name: &str) -> Option<Arc<dyn Converter>>;

    /// Converter name registered for a declared value type
    fn converter_name_for_type(&self, type_name: &str) -> Option<String>;
}

/// Constructors for converter types, fed with the converter group settings
pub type ConverterFactories = FactoryRegistry<dyn Converter>;

pub const STRING: &str = "string";
pub const DYNAMIC: &str = "dynamic";

/// Converter types registered under their own name in every lookup
pub const BUILTIN_TYPES: &[&str] = &[
    STRING, "int", "long", "float", "double", "boolean", "date", DYNAMIC,
];

/// Factories for every built-in converter type
pub fn builtin_factories() -> ConverterFactories {
    let mut factories = ConverterFactories::new("converter type");
    factories.register(STRING, |_: &Settings| Ok(Box::new(StringConverter) as Box<dyn Converter>));
    for kind in [
        NumberKind::Int,
        NumberKind::Long,
        NumberKind::Float,
        NumberKind::Double,
    ] {
        factories.register(NumberConverter::new(kind).name().to_string(), move |_: &Settings| {
            Ok(Box::new(NumberConverter::new(kind)) as Box<dyn Converter>)
        });
    }
    factories.register("boolean", |_: &Settings| {
        Ok(Box::new(BooleanConverter) as Box<dyn Converter>)
    });
    factories.register("date", |settings: &Settings| {
        let format = settings.get_setting_or(keys::CONVERTER_FORMAT, DEFAULT_DATE_FORMAT);
        Ok(Box::new(DateConverter::new(format)) as Box<dyn Converter>)
    });
    factories.register(DYNAMIC, |settings: &Settings| {
        let lang = settings.get_setting_or("lang", "jexl");
        Ok(Box::new(DynamicConverter::new(lang)) as Box<dyn Converter>)
    });
    factories
}

const TYPE_DEFAULTS: &[(&str, &str)] = &[
    ("String", "string"),
    ("str", "string"),
    ("string", "string"),
    ("i32", "int"),
    ("int", "int"),
    ("i64", "long"),
    ("long", "long"),
    ("f32", "float"),
    ("float", "float"),
    ("f64", "double"),
    ("double", "double"),
    ("bool", "boolean"),
    ("boolean", "boolean"),
    ("date", "date"),
    ("NaiveDate", "date"),
    ("DateTime", "date"),
];

/// Converter registry built fresh for every configuration build
#[derive(Default)]
pub struct DefaultConverterLookup {
    converters: HashMap<String, Arc<dyn Converter>>,
    by_type: HashMap<String, String>,
}

impl DefaultConverterLookup {
    /// Empty lookup without built-ins
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-ins, type defaults, then `sextant.converter.<name>` groups
    ///
    /// A group must name its `type`, which is resolved through
    /// `factories`. A group reusing a built-in name replaces it. Custom
    /// factory types only exist through a configured group.
    pub fn new(settings: &Settings, factories: &ConverterFactories) -> Result<Self> {
        let mut lookup = Self::empty();
        let defaults = Settings::new();
        for name in BUILTIN_TYPES.iter().filter(|name| factories.contains(name)) {
            let converter = factories.create(name, &defaults)?;
            lookup.register_converter(*name, Arc::from(converter));
        }
        for (type_name, converter) in TYPE_DEFAULTS {
            lookup.register_type(*type_name, *converter);
        }

        let groups = settings.get_setting_groups(keys::CONVERTER_GROUP_PREFIX)?;
        for (name, group) in groups.iter() {
            let type_name = group.get_setting(keys::CONVERTER_TYPE).ok_or_else(|| {
                SextantError::Configuration(format!(
                    "Converter [{name}] must define a [{}] setting",
                    keys::CONVERTER_TYPE
                ))
            })?;
            let converter = factories.create(&type_name, group)?;
            tracing::debug!("Configured converter [{}] of type [{}]", name, type_name);
            lookup.register_converter(name.clone(), Arc::from(converter));
        }

        Ok(lookup)
    }

    pub fn register_converter(&mut self, name: impl Into<String>, converter: Arc<dyn Converter>) {
        self.converters.insert(name.into(), converter);
    }

    /// Map a declared value type to a converter name
    pub fn register_type(&mut self, type_name: impl Into<String>, converter: impl Into<String>) {
        self.by_type.insert(type_name.into(), converter.into());
    }

    pub fn lookup_converter_for_type(&self, type_name: &str) -> Option<Arc<dyn Converter>> {
        let name = self.converter_name_for_type(type_name)?;
        self.lookup_converter(&name)
    }

    /// Registered converter names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.converters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl ConverterLookup for DefaultConverterLookup {
    fn lookup_converter(&self, name: &str) -> Option<Arc<dyn Converter>> {
        self.converters.get(name).cloned()
    }

    fn converter_name_for_type(&self, type_name: &str) -> Option<String> {
        self.by_type.get(type_name).cloned()
    }
}

impl fmt::Debug for DefaultConverterLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultConverterLookup")
            .field("converters", &self.names())
            .finish()
    }
}
