//! Configuration assembly and the build pipeline.
//!
//! A [`SextantConfiguration`] collects settings, metadata groups, raw
//! mappings and extensions. [`SextantConfiguration::build`] works on
//! copies of all of them, so one configuration can be built many times
//! and a failed build leaves it untouched for a corrected retry.

use crate::core::converter::{self, Converter, ConverterFactories, DefaultConverterLookup};
use crate::core::error::Result;
use crate::core::mapping::{AliasMapping, MappingTree};
use crate::core::metadata::{MetaDataGroup, MetaDataLookup};
use crate::core::naming::{self, NamingFactories, NamingStrategy};
use crate::core::processor::{MappingHook, ProcessContext, ProcessorChain};
use crate::core::registry::Registry;
use crate::core::settings::{RuntimeSettings, Settings};
use std::sync::Arc;
use std::time::Instant;

/// Mutable, single-writer configuration
pub struct SextantConfiguration {
    settings: Settings,
    mapping: MappingTree,
    lookup: MetaDataLookup,
    converters: Vec<(String, Arc<dyn Converter>)>,
    converter_factories: ConverterFactories,
    naming_factories: NamingFactories,
    hooks: Vec<Arc<dyn MappingHook>>,
    chain: ProcessorChain,
}

impl SextantConfiguration {
    pub fn new() -> Self {
        Self {
            settings: Settings::new(),
            mapping: MappingTree::new(),
            lookup: MetaDataLookup::new(),
            converters: Vec::new(),
            converter_factories: converter::builtin_factories(),
            naming_factories: naming::builtin_factories(),
            hooks: Vec::new(),
            chain: ProcessorChain::standard(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn set_setting(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.settings.set_setting(key, value);
        self
    }

    /// Register a raw mapping; aliases must be unique
    pub fn add_mapping(&mut self, mapping: AliasMapping) -> Result<&mut Self> {
        tracing::debug!("Adding {} mapping [{}]", mapping.kind.label(), mapping.alias);
        self.mapping.add(mapping)?;
        Ok(self)
    }

    pub fn add_group(&mut self, group: MetaDataGroup) -> Result<&mut Self> {
        self.lookup.add_group(group)?;
        Ok(self)
    }

    /// Converter merged into every build's lookup under `name`
    pub fn register_converter(
        &mut self,
        name: impl Into<String>,
        converter: Arc<dyn Converter>,
    ) -> &mut Self {
        self.converters.push((name.into(), converter));
        self
    }

    /// Custom converter type usable from `sextant.converter.<name>.type`
    pub fn register_converter_factory<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn(&Settings) -> Result<Box<dyn Converter>> + Send + Sync + 'static,
    {
        self.converter_factories.register(name, factory);
        self
    }

    /// Naming strategy selectable through `sextant.mapping.naming`
    pub fn register_naming_strategy<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Settings) -> Result<Box<dyn NamingStrategy>> + Send + Sync + 'static,
    {
        self.naming_factories.register(name, factory);
        self
    }

    pub fn add_hook(&mut self, hook: Arc<dyn MappingHook>) -> &mut Self {
        self.hooks.push(hook);
        self
    }

    pub fn mapping(&self) -> &MappingTree {
        &self.mapping
    }

    pub fn lookup(&self) -> &MetaDataLookup {
        &self.lookup
    }

    pub fn chain(&self) -> &ProcessorChain {
        &self.chain
    }

    /// Copy settings and mappings, then run the processor chain
    pub fn build(&self) -> Result<BuiltConfiguration> {
        let start = Instant::now();
        tracing::info!(
            "Building configuration: {} aliases, {} settings",
            self.mapping.len(),
            self.settings.len()
        );

        let settings = self.settings.copy();
        let mut converters = DefaultConverterLookup::new(&settings, &self.converter_factories)?;
        for (name, converter) in &self.converters {
            converters.register_converter(name.clone(), Arc::clone(converter));
        }
        let naming: Arc<dyn NamingStrategy> =
            Arc::from(naming::from_settings(&settings, &self.naming_factories)?);

        let ctx = ProcessContext {
            naming: naming.as_ref(),
            converters: &converters,
            settings: &settings,
            lookup: &self.lookup,
            hooks: &self.hooks,
        };
        let mapping = self.chain.process(self.mapping.clone(), &ctx)?;

        tracing::info!(
            "Configuration built: {} aliases, {} roots in {}ms",
            mapping.len(),
            mapping.root_mappings().count(),
            start.elapsed().as_millis()
        );

        Ok(BuiltConfiguration {
            settings: Arc::new(settings),
            mapping: Arc::new(mapping),
            converters: Arc::new(converters),
            lookup: Arc::new(self.lookup.clone()),
            naming,
            registry: Arc::new(Registry::new()),
        })
    }
}

impl std::fmt::Debug for SextantConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SextantConfiguration")
            .field("aliases", &self.mapping.alias_names())
            .field("settings", &self.settings.len())
            .field("stages", &self.chain.len())
            .finish()
    }
}

impl Default for SextantConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable result of a build, shareable across threads
#[derive(Clone)]
pub struct BuiltConfiguration {
    pub settings: Arc<Settings>,
    pub mapping: Arc<MappingTree>,
    pub converters: Arc<DefaultConverterLookup>,
    pub lookup: Arc<MetaDataLookup>,
    pub naming: Arc<dyn NamingStrategy>,
    pub registry: Arc<Registry>,
}

impl BuiltConfiguration {
    /// Per-session settings layered over the built ones
    pub fn runtime_settings(&self) -> RuntimeSettings {
        RuntimeSettings::new(Arc::clone(&self.settings), Arc::clone(&self.registry))
    }

    pub fn alias(&self, alias: &str) -> Option<&AliasMapping> {
        self.mapping.get(alias)
    }
}

impl std::fmt::Debug for BuiltConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltConfiguration")
            .field("aliases", &self.mapping.alias_names())
            .field("converters", &self.converters)
            .finish()
    }
}
