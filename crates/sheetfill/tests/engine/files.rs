use pretty_assertions::assert_eq;
use sheetfill::{SubstituteOptions, Template, TemplateFormat, Value, VariableStore};
use sheetfill_grid::{CellContent, JsonDocument, JsonSheet, SheetGrid};
use sheetfill_testkit::{build_json_template, read_json};

fn invoice() -> JsonSheet {
    JsonSheet::new("Invoice %number%")
        .with_text(1, 1, "Customer: %customer%")
        .with_text(2, 1, "%lines%")
}

#[test]
fn json_template_renders_to_a_file() {
    let fixture = build_json_template(vec![invoice()]);
    let out = fixture.sibling("filled.json");
    let mut vars = VariableStore::from_json(serde_json::json!({
        "number": 17,
        "customer": "ACME",
        "lines": ["bolts", "nuts"]
    }))
    .unwrap();

    let template = Template::open(fixture.path()).unwrap();
    assert_eq!(template.format(), TemplateFormat::Json);
    let summary = template
        .substitute_to_path(&out, &mut vars, &SubstituteOptions::default())
        .unwrap();
    assert!(summary.is_complete());

    let doc = read_json(&out);
    let sheet = doc.sheet(0).unwrap();
    assert_eq!(sheet.name, "Invoice 17");
    assert_eq!(sheet.text(1, 1).as_deref(), Some("Customer: ACME"));
    assert_eq!(sheet.text(3, 1).as_deref(), Some("nuts"));
}

#[test]
fn writer_output_matches_the_returned_summary() {
    let fixture = build_json_template(vec![invoice()]);
    let mut vars: VariableStore = [
        ("number", Value::Int(1)),
        ("customer", Value::from("x")),
        ("lines", Value::from(vec![1, 2, 3])),
    ]
    .into_iter()
    .collect();

    let mut buf = Vec::new();
    let summary = Template::open(fixture.path())
        .unwrap()
        .substitute_to_writer(&mut buf, &mut vars, &SubstituteOptions::default())
        .unwrap();
    assert_eq!(summary.rows_inserted, 2);

    let doc: JsonDocument = sheetfill::GridDocument::open_bytes(buf).unwrap();
    let sheet = doc.sheet(0).unwrap();
    assert_eq!(sheet.content(4, 1), Some(CellContent::Number(3.0)));
}

#[test]
fn variables_must_be_an_object() {
    let err = VariableStore::from_json(serde_json::json!([1, 2])).unwrap_err();
    assert!(err.to_string().contains("an array"));
}
