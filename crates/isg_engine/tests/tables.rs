use isg_core::Reading;
use isg_engine::{EngineError, TableLayout, TableWalker};
use pretty_assertions::assert_eq;
use scraper::Html;

const SYSTEM_INFO: &str = include_str!("fixtures/systeminfo.html");
const HEAT_PUMP_INFO: &str = include_str!("fixtures/heatpumpinfo.html");

fn walker() -> TableWalker {
    TableWalker::new(&TableLayout::default()).unwrap()
}

#[test]
fn walker_yields_rows_in_document_order() {
    let readings = walker().readings(SYSTEM_INFO);
    let triples: Vec<(&str, &str, &str)> = readings
        .iter()
        .map(|r| (r.group.as_str(), r.key.as_str(), r.raw.as_str()))
        .collect();

    assert_eq!(
        triples,
        vec![
            ("ROOM TEMPERATURE", "ACTUAL TEMPERATURE HC 1", "21,3 °C"),
            ("ROOM TEMPERATURE", "SET TEMPERATURE HC 1", "21,5 °C"),
            ("HEATING", "OUTSIDE TEMPERATURE", "-3,2 °C"),
            ("HEATING", "ACTUAL FLOW TEMPERATURE WP", "34,1 °C"),
            ("GENERAL", "FLOW RATE", "24,0 l/min"),
            ("GENERAL", "OUTPUT HP", "45 %"),
            ("GENERAL", "PRESSURE HTG CIRC", "n/a"),
            ("GENERAL", "COMPRESSOR TEMP.", "61,0 °C"),
        ]
    );
}

#[test]
fn value_cells_are_trimmed() {
    let readings = walker().readings(HEAT_PUMP_INFO);
    let bh2 = readings.iter().find(|r| r.key == "BH 2").unwrap();
    assert_eq!(
        bh2,
        &Reading::new("RUNTIME", "BH 2", "0h")
    );
    assert_eq!(readings.len(), 10);
}

#[test]
fn tables_outside_the_form_are_ignored() {
    let readings = walker().readings(SYSTEM_INFO);
    assert!(readings.iter().all(|r| r.group != "OUTSIDE FORM"));
}

#[test]
fn rows_without_key_cell_are_skipped() {
    let html = r#"<form id="werte"><table class="info"><tbody>
        <tr><th>RUNTIME</th></tr>
        <tr class="even"><td class="value">12</td></tr>
        <tr class="odd"><td class="key">BH 1</td></tr>
    </tbody></table></form>"#;
    let readings = walker().readings(html);
    assert_eq!(readings, vec![Reading::new("RUNTIME", "BH 1", "")]);
}

#[test]
fn walk_is_lazy_over_a_borrowed_document() {
    let document = Html::parse_document(HEAT_PUMP_INFO);
    let walker = walker();
    let mut walk = walker.walk(&document);
    assert_eq!(
        walk.next(),
        Some(Reading::new("PROCESS DATA", "COMP DLAY CNTR", "0 min"))
    );
    assert_eq!(walk.count(), 9);
}

#[test]
fn custom_layout_selects_other_markup() {
    let layout = TableLayout {
        table: "table.values".to_string(),
        group: "caption".to_string(),
        row: "tr".to_string(),
        key: "td:first-child".to_string(),
        value: "td:last-child".to_string(),
    };
    let html = r#"<table class="values"><caption> DHW </caption>
        <tr><td>SET TEMPERATURE</td><td>48,0 °C</td></tr></table>"#;
    let readings = TableWalker::new(&layout).unwrap().readings(html);
    assert_eq!(
        readings,
        vec![Reading::new("DHW", "SET TEMPERATURE", "48,0 °C")]
    );
}

#[test]
fn invalid_selector_is_reported() {
    let layout = TableLayout {
        row: "tr[".to_string(),
        ..TableLayout::default()
    };
    let err = TableWalker::new(&layout).unwrap_err();
    assert!(matches!(err, EngineError::Selector { ref selector, .. } if selector == "tr["));
}
