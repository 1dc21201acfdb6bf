//! Copy-on-build behaviour and chain guarantees

use crate::common::{assert_resolved_root, build, contract_and_order, field_paths};
use sextant::core::converter::{Converter, ConverterLookup, StringConverter};
use sextant::core::mapping::{
    AliasKind, AliasMapping, ClassPropertyMapping, ConstantMapping, DynamicMetaDataMapping,
    FieldMapping, JsonPropertyMapping, Mapping, SubIndexHash, XmlPropertyMapping,
};
use sextant::core::processor::MappingHook;
use sextant::core::settings::keys;
use sextant::{Result, SextantConfiguration, SextantError, Settings, SettingsSource};
use std::sync::Arc;
use std::thread;

fn id(name: &str) -> Mapping {
    Mapping::Id(ClassPropertyMapping::new(name).with_meta_data(FieldMapping::new(name)))
}

fn configuration() -> SextantConfiguration {
    let mut config = SextantConfiguration::new();
    for mapping in contract_and_order() {
        config.add_mapping(mapping).unwrap();
    }
    config
}

#[test]
fn test_chain_is_deterministic() {
    let config = configuration();
    let first = config.build().unwrap();
    let second = config.build().unwrap();

    assert_eq!(first.mapping.alias_names(), second.mapping.alias_names());
    for (a, b) in first.mapping.aliases().iter().zip(second.mapping.aliases()) {
        assert_eq!(field_paths(a), field_paths(b));
        assert_eq!(a.id_names, b.id_names);
        assert_eq!(a.uid_path, b.uid_path);
    }
    assert_eq!(*first.mapping, *second.mapping);
}

#[test]
fn test_failed_build_leaves_configuration_reusable() {
    let mut config = configuration();
    config.add_mapping(AliasMapping::class("broken", "shop::Broken")).unwrap();
    let before = config.mapping().clone();

    let err = config.build().unwrap_err();
    assert!(err.is_mapping());
    assert_eq!(*config.mapping(), before);
    assert!(config.settings().is_empty());

    // the same configuration builds once the offending alias is fine
    let mut fixed = configuration();
    fixed
        .add_mapping(AliasMapping::class("broken", "shop::Broken").with_child(id("id")))
        .unwrap();
    assert!(fixed.build().is_ok());
}

#[test]
fn test_root_without_id_rejected() {
    let err = build(vec![AliasMapping::class("orphan", "shop::Orphan")]).unwrap_err();
    assert!(err.is_mapping());
    assert!(err.message().contains("orphan"));
}

#[test]
fn test_settings_drive_uid_and_naming() {
    let mut config = configuration();
    config
        .set_setting(keys::UID_PATH, "$/doc")
        .set_setting(keys::NAMING_STRATEGY, "prefixed");
    let built = config.build().unwrap();

    let order = built.alias("order").unwrap();
    assert_eq!(order.uid_path.as_deref(), Some("$/doc"));
    assert!(field_paths(order).contains(&"order.total".to_string()));
}

#[test]
fn test_unknown_naming_strategy_is_configuration_error() {
    let mut config = configuration();
    config.set_setting(keys::NAMING_STRATEGY, "reversed");
    assert!(config.build().unwrap_err().is_configuration());
}

#[test]
fn test_modulo_sub_index() {
    let mut order = AliasMapping::class("order", "shop::Order").with_child(id("id"));
    order.sub_index_hash = Some(SubIndexHash::Modulo {
        prefix: "orders".to_string(),
        size: 3,
    });
    let built = build(vec![order]).unwrap();
    let index = built.mapping.index().unwrap();
    assert_eq!(index.by_sub_index.len(), 3);
    assert_eq!(index.by_sub_index["orders_1"], vec!["order"]);
}

#[test]
fn test_configured_converter_group() {
    let mut config = SextantConfiguration::new();
    config
        .set_setting("sextant.converter.shortDate.type", "date")
        .set_setting("sextant.converter.shortDate.format", "%d.%m.%Y");
    config
        .add_mapping(
            AliasMapping::class("event", "cal::Event")
                .with_child(id("id"))
                .with_child(Mapping::Property(
                    ClassPropertyMapping::new("day")
                        .with_meta_data(FieldMapping::new("day").with_converter("shortDate")),
                )),
        )
        .unwrap();

    let built = config.build().unwrap();
    let converter = built.converters.as_ref();
    assert!(converter.names().contains(&"shortDate".to_string()));

    let event = built.alias("event").unwrap();
    let Some(Mapping::Property(day)) = event.child("day") else {
        panic!("day missing");
    };
    let bound = day.meta_data[0].bound.as_ref().unwrap();
    assert_eq!(bound.name, "shortDate");
    let text = bound.converter.to_text(&serde_json::json!("2024-03-01")).unwrap();
    assert_eq!(text, "01.03.2024");
}

#[test]
fn test_converter_group_without_type_fails() {
    let mut config = configuration();
    config.set_setting("sextant.converter.broken.format", "x");
    let err = config.build().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_custom_converter_factory() {
    #[derive(Debug)]
    struct Shout;

    impl Converter for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn to_text(&self, value: &serde_json::Value) -> Result<String> {
            Ok(StringConverter.to_text(value)?.to_uppercase())
        }

        fn from_text(&self, text: &str) -> Result<serde_json::Value> {
            Ok(serde_json::Value::String(text.to_lowercase()))
        }

        fn round_trips(&self) -> bool {
            false
        }
    }

    let mut config = configuration();
    config
        .register_converter_factory("shout", |_: &Settings| {
            Ok(Box::new(Shout) as Box<dyn Converter>)
        })
        .set_setting("sextant.converter.loud.type", "shout");
    let built = config.build().unwrap();
    assert!(built.converters.names().contains(&"loud".to_string()));
}

#[test]
fn test_hook_runs_and_can_fail() {
    struct RequireBoost;

    impl MappingHook for RequireBoost {
        fn post_process(&self, mapping: &mut AliasMapping, settings: &Settings) -> Result<()> {
            if mapping.kind.class_name().is_none() {
                return Ok(());
            }
            if settings.get_setting_as_bool("test.strict", false) && mapping.boost.is_none() {
                return Err(SextantError::Mapping(format!(
                    "Alias [{}] must define a boost",
                    mapping.alias
                )));
            }
            mapping.boost = mapping.boost.or(Some(1.0));
            Ok(())
        }
    }

    let mut config = configuration();
    config.add_hook(Arc::new(RequireBoost));
    let built = config.build().unwrap();
    assert_eq!(built.alias("order").unwrap().boost, Some(1.0));

    config.set_setting("test.strict", "true");
    let err = config.build().unwrap_err();
    assert!(err.message().contains("must define a boost"));
}

#[test]
fn test_built_configuration_shared_across_threads() {
    let built = configuration().build().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let built = built.clone();
            thread::spawn(move || {
                let session = built.runtime_settings();
                session.set_setting("session.id", n.to_string());
                assert_resolved_root(built.alias("order").unwrap());
                session.get_setting("session.id")
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(n.to_string()));
    }
    assert!(built.settings.get_setting("session.id").is_none());
}

#[test]
fn test_converter_factory_reads_its_group_settings() {
    #[derive(Debug)]
    struct Currency {
        symbol: String,
    }

    impl Converter for Currency {
        fn name(&self) -> &str {
            "currency"
        }

        fn to_text(&self, value: &serde_json::Value) -> Result<String> {
            Ok(format!("{} {}", StringConverter.to_text(value)?, self.symbol))
        }

        fn from_text(&self, text: &str) -> Result<serde_json::Value> {
            let amount = text.trim_end_matches(self.symbol.as_str()).trim();
            Ok(serde_json::Value::String(amount.to_string()))
        }
    }

    let mut config = configuration();
    config
        .register_converter_factory("currency", |settings: &Settings| {
            let symbol = settings.get_setting("symbol").ok_or_else(|| {
                SextantError::Configuration("currency needs [symbol]".to_string())
            })?;
            Ok(Box::new(Currency { symbol }) as Box<dyn Converter>)
        })
        .set_setting("sextant.converter.money.type", "currency")
        .set_setting("sextant.converter.money.symbol", "EUR");

    let built = config.build().unwrap();
    let names = built.converters.names();
    assert!(names.contains(&"money".to_string()));
    assert!(!names.contains(&"currency".to_string()));

    let money = built.converters.lookup_converter("money").unwrap();
    assert_eq!(money.to_text(&serde_json::json!("9.50")).unwrap(), "9.50 EUR");
}

#[test]
fn test_xml_alias_with_constant_and_dynamic_meta_data() {
    let mut feed = AliasMapping::new("feed", AliasKind::XmlObject { xpath: None })
        .with_child(Mapping::XmlId(XmlPropertyMapping {
            field: FieldMapping::new("number"),
            xpath: "/feed/@number".to_string(),
        }))
        .with_child(Mapping::Constant(ConstantMapping {
            field: FieldMapping::new("type"),
            values: vec!["feed".to_string()],
        }));
    feed.children.push(Mapping::DynamicMetaData(DynamicMetaDataMapping {
        field: FieldMapping::new("summary"),
        expression: "data.number".to_string(),
        lang: None,
    }));

    let built = build(vec![feed]).unwrap();
    let feed = built.alias("feed").unwrap();
    assert_resolved_root(feed);
    assert_eq!(field_paths(feed), vec!["number", "summary", "type"]);
}

#[test]
fn test_json_alias_with_dynamic_meta_data() {
    let event = AliasMapping::new("event", AliasKind::JsonObject)
        .with_child(Mapping::JsonId(JsonPropertyMapping {
            field: FieldMapping::new("id"),
            full_name: None,
        }))
        .with_child(Mapping::DynamicMetaData(DynamicMetaDataMapping {
            field: FieldMapping::new("summary"),
            expression: "data.id".to_string(),
            lang: None,
        }));

    let built = build(vec![event]).unwrap();
    let event = built.alias("event").unwrap();
    assert_resolved_root(event);
    assert_eq!(field_paths(event), vec!["id", "summary"]);
    let Some(Mapping::DynamicMetaData(summary)) = event.child("summary") else {
        panic!("summary missing");
    };
    assert_eq!(summary.field.bound.as_ref().unwrap().name, "dynamic");
}
