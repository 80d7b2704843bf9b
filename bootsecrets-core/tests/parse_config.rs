use bootsecrets_core::{
    parse_config_str, recognize, to_json_value, to_yaml_value, ConfigFormat, ConfigNode,
    ParseError, TypeTag, Version,
};

fn sample_yaml() -> &'static str {
    r#"
service:
  name: billing
  port: 8080
  debug: false
database:
  user: app
  password: !tuple [!atom gcp_secret, !atom string, db-password]
  pool_size: !tuple [!atom gcp_secret, !atom integer, db-pool-size, "3"]
endpoints:
  - https://a.example.com
  - https://b.example.com
pair: !tuple [!atom ok, 1]
"#
}

#[test]
fn parse_yaml_preserves_key_order() {
    let parsed = parse_config_str(sample_yaml(), ConfigFormat::Yaml).unwrap();
    let ConfigNode::Map(entries) = &parsed.root else {
        panic!("expected map root");
    };
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str().unwrap()).collect();
    assert_eq!(keys, vec!["service", "database", "endpoints", "pair"]);
}

#[test]
fn parse_yaml_reads_tuples_and_atoms() {
    let parsed = parse_config_str(sample_yaml(), ConfigFormat::Yaml).unwrap();
    let pair = parsed.root.get("pair").unwrap();
    assert_eq!(
        pair,
        &ConfigNode::Tuple(vec![ConfigNode::symbol("ok"), ConfigNode::Integer(1)])
    );

    let pool = parsed.root.get("database").unwrap().get("pool_size").unwrap();
    let r = recognize(pool).unwrap().unwrap();
    assert_eq!(r.type_tag, TypeTag::Integer);
    assert_eq!(r.name, "db-pool-size");
    assert_eq!(r.version, Version::Pinned("3".to_string()));
}

#[test]
fn parse_auto_detects_formats() {
    let parsed = parse_config_str(sample_yaml(), ConfigFormat::Auto).unwrap();
    assert_eq!(parsed.format, ConfigFormat::Yaml);

    let parsed = parse_config_str(r#"{"b": 1, "a": [true, null, 1.5]}"#, ConfigFormat::Auto).unwrap();
    assert_eq!(parsed.format, ConfigFormat::Json);
    assert_eq!(
        parsed.root,
        ConfigNode::map([
            ("b", ConfigNode::Integer(1)),
            (
                "a",
                ConfigNode::List(vec![
                    ConfigNode::Bool(true),
                    ConfigNode::Null,
                    ConfigNode::Float(1.5)
                ])
            ),
        ])
    );
}

#[test]
fn unknown_tags_are_rejected() {
    let err = parse_config_str("a: !vault secret", ConfigFormat::Yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedTag(_)));
    assert!(err.to_string().contains("vault"));
}

#[test]
fn tuple_tag_requires_a_sequence() {
    let err = parse_config_str("a: !tuple nope", ConfigFormat::Yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedTag(_)));
}

#[test]
fn complex_keys_are_rejected() {
    let err = parse_config_str("? [a, b]\n: 1\n", ConfigFormat::Yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedKey(_)));
}

#[test]
fn scalar_keys_keep_their_type() {
    let parsed = parse_config_str(
        "1: one\ntrue: yes\n!atom pool_size: 10\n\"1\": quoted\n",
        ConfigFormat::Yaml,
    )
    .unwrap();
    let root = &parsed.root;
    assert_eq!(root.get_key(&ConfigNode::Integer(1)), Some(&ConfigNode::string("one")));
    assert_eq!(root.get_key(&ConfigNode::Bool(true)), Some(&ConfigNode::string("yes")));
    assert_eq!(
        root.get_key(&ConfigNode::symbol("pool_size")),
        Some(&ConfigNode::Integer(10))
    );
    assert_eq!(root.get("1"), Some(&ConfigNode::string("quoted")));
    assert_eq!(root.get("pool_size"), None);
}

#[test]
fn yaml_round_trip_keeps_key_types() {
    let input = "1: one\n!atom pool_size: 10\nname: svc\n";
    let parsed = parse_config_str(input, ConfigFormat::Yaml).unwrap();
    let rendered = to_yaml_value(&parsed.root);
    let original: serde_yaml::Value = serde_yaml::from_str(input).unwrap();
    assert_eq!(rendered, original);

    let text = serde_yaml::to_string(&rendered).unwrap();
    assert!(text.contains("!atom pool_size"), "{text}");
    assert!(!text.contains("'1'"), "{text}");
    assert_eq!(parse_config_str(&text, ConfigFormat::Yaml).unwrap().root, parsed.root);
}

#[test]
fn json_rendering_uses_key_text() {
    let parsed = parse_config_str("1: one\n!atom mode: fast\n", ConfigFormat::Yaml).unwrap();
    assert_eq!(
        to_json_value(&parsed.root),
        serde_json::json!({"1": "one", "mode": "fast"})
    );
}

#[test]
fn large_unsigned_integers_pass_through() {
    let parsed =
        parse_config_str(r#"{"max_bytes": 18446744073709551615}"#, ConfigFormat::Auto).unwrap();
    assert_eq!(
        parsed.root.get("max_bytes"),
        Some(&ConfigNode::Unsigned(u64::MAX))
    );
    assert_eq!(
        to_json_value(&parsed.root),
        serde_json::json!({"max_bytes": 18446744073709551615u64})
    );

    let parsed = parse_config_str("max_bytes: 18446744073709551615\n", ConfigFormat::Yaml).unwrap();
    assert_eq!(
        parsed.root.get("max_bytes"),
        Some(&ConfigNode::Unsigned(u64::MAX))
    );
    let text = serde_yaml::to_string(&to_yaml_value(&parsed.root)).unwrap();
    assert_eq!(text, "max_bytes: 18446744073709551615\n");
}

#[test]
fn invalid_yaml_reports_yaml_error() {
    let err = parse_config_str("not: [valid", ConfigFormat::Auto).unwrap_err();
    assert!(err.to_string().contains("YAML"));
}

#[test]
fn yaml_rendering_keeps_tags() {
    let parsed = parse_config_str(sample_yaml(), ConfigFormat::Yaml).unwrap();
    let rendered = serde_yaml::to_string(&to_yaml_value(&parsed.root)).unwrap();
    assert!(rendered.contains("!tuple"));
    assert!(rendered.contains("!atom"));

    let reparsed = parse_config_str(&rendered, ConfigFormat::Yaml).unwrap();
    assert_eq!(reparsed.root, parsed.root);
}

#[test]
fn json_rendering_flattens_tuples() {
    let node = ConfigNode::map([(
        "pair",
        ConfigNode::Tuple(vec![ConfigNode::symbol("ok"), ConfigNode::Integer(1)]),
    )]);
    assert_eq!(to_json_value(&node), serde_json::json!({"pair": ["ok", 1]}));
}
