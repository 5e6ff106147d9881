use isg_core::{ConfigError, ParseError, Property, PropertyTable, Reading, Scale, ValueError};
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct StubProperty {
    group: String,
    search_string: String,
    scale: Scale,
    value: f64,
    writes: usize,
}

impl StubProperty {
    fn new(group: &str, search_string: &str) -> Self {
        Self {
            group: group.to_string(),
            search_string: search_string.to_string(),
            scale: Scale::Identity,
            value: 0.0,
            writes: 0,
        }
    }

    fn scaled(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }
}

impl Property for StubProperty {
    fn group(&self) -> &str {
        &self.group
    }

    fn search_string(&self) -> &str {
        &self.search_string
    }

    fn scale(&self) -> Scale {
        self.scale
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
        self.writes += 1;
    }
}

fn runtime_table() -> PropertyTable<StubProperty> {
    PropertyTable::new(
        "heat_pump_info",
        vec![
            StubProperty::new("RUNTIME", "RNT COMP 1 DHW"),
            StubProperty::new("GENERAL", "FLOW RATE").scaled(Scale::Divide(60.0)),
        ],
    )
    .unwrap()
}

#[test]
fn matching_row_updates_property() {
    let mut table = runtime_table();
    let value = table
        .apply(&Reading::new("RUNTIME", "RNT COMP 1 DHW", "1771"))
        .unwrap();

    assert_eq!(value, 1771.0);
    let prop = table.lookup("RUNTIME", "RNT COMP 1 DHW").unwrap();
    assert_eq!(prop.value, 1771.0);
    assert_eq!(prop.writes, 1);
}

#[test]
fn scale_is_applied_once_before_setting() {
    let mut table = runtime_table();
    table
        .apply(&Reading::new("GENERAL", "FLOW RATE", "24 l/min"))
        .unwrap();

    let prop = table.lookup("GENERAL", "FLOW RATE").unwrap();
    assert!((prop.value - 0.4).abs() < 1e-12);
    assert_eq!(prop.writes, 1);
}

#[test]
fn unmatched_row_reports_error_without_mutation() {
    let mut table = runtime_table();
    let err = table
        .apply(&Reading::new("RUNTIME", "RNT COMP 2 DHW", "12"))
        .unwrap_err();

    assert_eq!(
        err,
        ParseError::UnmatchedProperty {
            group: "RUNTIME".to_string(),
            key: "RNT COMP 2 DHW".to_string(),
            raw: "12".to_string(),
        }
    );
    assert!(table.iter().all(|prop| prop.writes == 0));
}

#[test]
fn group_scopes_the_key() {
    let mut table = runtime_table();
    let err = table
        .apply(&Reading::new("HEATING", "RNT COMP 1 DHW", "5"))
        .unwrap_err();
    assert!(matches!(err, ParseError::UnmatchedProperty { .. }));
}

#[test]
fn unparseable_value_keeps_previous_value() {
    let mut table = runtime_table();
    table
        .apply(&Reading::new("RUNTIME", "RNT COMP 1 DHW", "1771"))
        .unwrap();

    let err = table
        .apply(&Reading::new("RUNTIME", "RNT COMP 1 DHW", "n/a"))
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::UnparseableValue {
            group: "RUNTIME".to_string(),
            key: "RNT COMP 1 DHW".to_string(),
            raw: "n/a".to_string(),
            source: ValueError::NoNumericMatch {
                raw: "n/a".to_string()
            },
        }
    );

    let prop = table.lookup("RUNTIME", "RNT COMP 1 DHW").unwrap();
    assert_eq!(prop.value, 1771.0);
    assert_eq!(prop.writes, 1);
}

#[test]
fn apply_all_collects_updates_and_errors() {
    let mut table = runtime_table();
    let summary = table.apply_all(vec![
        Reading::new("RUNTIME", "RNT COMP 1 DHW", "1771"),
        Reading::new("RUNTIME", "BH 1", "0"),
        Reading::new("GENERAL", "FLOW RATE", "---"),
    ]);

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.errors.len(), 2);
    assert!(matches!(
        summary.errors[0],
        ParseError::UnmatchedProperty { .. }
    ));
    assert!(matches!(
        summary.errors[1],
        ParseError::UnparseableValue { .. }
    ));
}

#[test]
fn repeated_application_does_not_drift() {
    let mut table = runtime_table();
    let readings = vec![
        Reading::new("RUNTIME", "RNT COMP 1 DHW", "1771"),
        Reading::new("GENERAL", "FLOW RATE", "24"),
    ];

    table.apply_all(readings.clone());
    let first: Vec<f64> = table.iter().map(|prop| prop.value).collect();
    table.apply_all(readings);
    let second: Vec<f64> = table.iter().map(|prop| prop.value).collect();

    assert_eq!(first, second);
}

#[test]
fn duplicate_properties_are_rejected() {
    let err = PropertyTable::new(
        "heat_pump_info",
        vec![
            StubProperty::new("RUNTIME", "BH 1"),
            StubProperty::new("RUNTIME", "BH 1"),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConfigError::DuplicateProperty {
            page: "heat_pump_info".to_string(),
            group: "RUNTIME".to_string(),
            property: "BH 1".to_string(),
        }
    );
}

#[test]
fn empty_page_builds_an_empty_table() {
    let table = PropertyTable::<StubProperty>::new("heat_pump_info", Vec::new()).unwrap();
    assert!(table.is_empty());
    assert!(table.lookup("RUNTIME", "BH 1").is_none());

    let table = runtime_table();
    assert!(!table.is_empty());
    assert_eq!(table.len(), 2);
}
