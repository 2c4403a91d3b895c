//! End-to-end ordering of enriched work orders

use aim_report_core::{
    ColumnRoles, FieldValue, InputBatch, RawRecord, ReportConfig, ReportPipeline,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn batch(rows: &[(&str, &str, &str)]) -> InputBatch {
    let records = rows
        .iter()
        .map(|(wo, building, desc)| {
            let mut rec = RawRecord::new();
            rec.insert("Work Order".into(), FieldValue::text(*wo));
            rec.insert("Property".into(), FieldValue::text(*building));
            rec.insert("Description".into(), FieldValue::text(*desc));
            rec
        })
        .collect();

    InputBatch {
        columns: vec!["Work Order".into(), "Property".into(), "Description".into()],
        roles: ColumnRoles {
            description: Some("Description".into()),
            building: Some("Property".into()),
            ..Default::default()
        },
        records,
    }
}

fn order(rows: &[(&str, &str, &str)]) -> Vec<String> {
    let pipeline = ReportPipeline::new(ReportConfig::default()).unwrap();
    let report = pipeline.run(batch(rows), today()).unwrap();
    report
        .records
        .iter()
        .map(|r| r.fields["Work Order"].to_string())
        .collect()
}

#[test]
fn test_mixed_descriptions_scenario() {
    let pipeline = ReportPipeline::new(ReportConfig::default()).unwrap();
    let report = pipeline
        .run(
            batch(&[
                ("1", "", "Floor: 2 Room: 204"),
                ("2", "", "Room: 1104"),
                ("3", "", "Elevator near 2nd floor hallway"),
                ("4", "", "Basement storage Rm: B12"),
            ]),
            today(),
        )
        .unwrap();

    let by_input: Vec<(String, String)> = ["1", "2", "3", "4"]
        .iter()
        .map(|wo| {
            let rec = report
                .records
                .iter()
                .find(|r| r.fields["Work Order"].to_string() == *wo)
                .unwrap();
            (rec.floor.clone(), rec.room.clone())
        })
        .collect();
    assert_eq!(
        by_input,
        vec![
            ("2".to_string(), "204".to_string()),
            ("11".to_string(), "1104".to_string()),
            (String::new(), String::new()),
            ("B".to_string(), "B12".to_string()),
        ]
    );

    // blank floor first, then basement, then numbered floors ascending
    let order: Vec<_> = report
        .records
        .iter()
        .map(|r| r.fields["Work Order"].to_string())
        .collect();
    assert_eq!(order, vec!["3", "4", "1", "2"]);
}

#[test]
fn test_building_then_floor_then_room() {
    let got = order(&[
        ("a", "HEB", "Room: 101"),
        ("b", "ETB", "Room: 1201"),
        ("c", "", "Room: 101"),
        ("d", "ETB", "Hallway outside Rm: Hallway"),
        ("e", "web", "Floor: SF"),
        ("f", "ETB", "Floor: 12 Room: 1201A"),
        ("g", "Annex", "Room: 101"),
        ("h", "ETB", "Floor: 2, Rm: Stair3"),
        ("i", "ETB", "Floor: 2 Room: 215"),
    ]);
    assert_eq!(got, vec!["d", "i", "h", "b", "f", "e", "a", "c", "g"]);
}

#[test]
fn test_ties_keep_input_order() {
    let got = order(&[
        ("first", "ETB", "Room: 301"),
        ("second", "ETB", "Room 301 again: 301"),
        ("third", "ETB", "Room: 301"),
    ]);
    assert_eq!(got, vec!["first", "second", "third"]);
}

#[test]
fn test_common_area_after_numbered_rooms_on_same_floor() {
    let got = order(&[
        ("hall", "ETB", "Floor: 3 Room: Hallway"),
        ("named", "ETB", "Floor: 3 Room: Lab"),
        ("num", "ETB", "Floor: 3 Room: 310"),
    ]);
    assert_eq!(got, vec!["num", "named", "hall"]);
}
