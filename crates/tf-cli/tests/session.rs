use std::fs;

use tempfile::TempDir;
use tf_cli::{Session, SessionReply};
use tf_map::ColumnResolver;
use tf_model::{CellValue, Dataset};

fn roster() -> Dataset {
    let mut dataset = Dataset::new(
        ["Name", "City", "Fee", "Rating", "In_Home", "Bio"]
            .into_iter()
            .map(str::to_string)
            .collect(),
    );
    for (name, city, fee, rating, mobile, bio) in [
        ("Ana", "Vancouver", 100.0, 4.8, "Yes", "Sports injuries"),
        ("Ben", "Vancouver", 150.0, 4.9, "No", "Prenatal care"),
        ("Cai", "Toronto", 90.0, 4.5, "Yes", "Deep tissue, sports"),
    ] {
        dataset.push_row(vec![
            CellValue::from(name),
            CellValue::from(city),
            CellValue::Number(fee),
            CellValue::Number(rating),
            CellValue::from(mobile),
            CellValue::from(bio),
        ]);
    }
    dataset
}

fn session() -> Session {
    let dataset = roster();
    let resolution = ColumnResolver::default().resolve(&dataset.headers);
    Session::new(dataset, resolution)
}

fn reply(session: &mut Session, line: &str) -> String {
    match session.apply(line) {
        SessionReply::Continue(text) => text,
        SessionReply::Quit => panic!("unexpected quit for '{line}'"),
    }
}

fn names(session: &Session) -> Vec<String> {
    let outcome = session.outcome();
    outcome
        .dataset
        .column("Name")
        .expect("name column")
        .into_iter()
        .map(|cell| cell.as_text().into_owned())
        .collect()
}

#[test]
fn starts_with_every_row() {
    let session = session();
    assert_eq!(names(&session), vec!["Ana", "Ben", "Cai"]);
    assert!(session.banner().starts_with("Loaded 3 candidates"));
}

#[test]
fn set_reruns_and_reports_count() {
    let mut session = session();
    assert_eq!(
        reply(&mut session, "set city vancouver"),
        "Matched 2 of 3 candidates."
    );
    assert_eq!(
        reply(&mut session, "price-max=120"),
        "Matched 1 of 3 candidates."
    );
    assert_eq!(names(&session), vec!["Ana"]);
}

#[test]
fn clear_and_reset_start_from_all_rows() {
    let mut session = session();
    reply(&mut session, "set city Vancouver");
    reply(&mut session, "set mobile yes");
    assert_eq!(names(&session), vec!["Ana"]);

    assert_eq!(
        reply(&mut session, "clear mobile"),
        "Matched 2 of 3 candidates."
    );
    assert_eq!(reply(&mut session, "reset"), "Matched 3 of 3 candidates.");
    assert!(session.request().is_empty());
}

#[test]
fn sort_warnings_are_reported() {
    let mut session = session();
    let text = reply(&mut session, "set sort foo,-rating");
    insta::assert_snapshot!(text, @r"
    Warning: sort key 'foo' not found; ignored.
    Matched 3 of 3 candidates.
    ");
    assert_eq!(names(&session), vec!["Ben", "Ana", "Cai"]);
}

#[test]
fn bad_input_keeps_state() {
    let mut session = session();
    reply(&mut session, "set price-max 120");
    let text = reply(&mut session, "set price-max cheap");
    assert!(text.starts_with("error: price-max needs a number"));
    assert_eq!(session.request().price_max, Some(120.0));

    let text = reply(&mut session, "dance");
    assert!(text.starts_with("error: unknown command 'dance'"));
    let text = reply(&mut session, "set colour red");
    assert_eq!(text, "error: unknown filter 'colour'");
}

#[test]
fn filters_lists_active_criteria() {
    let mut session = session();
    assert_eq!(reply(&mut session, "filters"), "No filters active.");
    reply(&mut session, "set modalities Deep Tissue; Sports");
    reply(&mut session, "set sort price");
    insta::assert_snapshot!(reply(&mut session, "filters"), @r"
    modalities = Deep Tissue, Sports
    sort = price
    (modalities ignored: no matching column)
    ");
}

#[test]
fn text_search_spans_bio() {
    let mut session = session();
    reply(&mut session, "set text sports");
    assert_eq!(names(&session), vec!["Ana", "Cai"]);
}

#[test]
fn show_prints_match_line() {
    let mut session = session();
    reply(&mut session, "set city Toronto");
    let text = reply(&mut session, "show");
    assert!(text.contains("Cai"));
    assert!(!text.contains("Ben"));
    assert!(text.ends_with("Matched 1 of 3 candidates."));
}

#[test]
fn columns_lists_mapping() {
    let mut session = session();
    let text = reply(&mut session, "columns");
    assert!(text.contains("Fee"));
    assert!(text.contains("In_Home"));
    assert!(text.contains("(unresolved)"));
}

#[test]
fn download_writes_current_result() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("picked.csv");
    let mut session = session();
    reply(&mut session, "set city Vancouver");
    reply(&mut session, "set sort -rating");
    let text = reply(&mut session, &format!("download {}", path.display()));
    assert_eq!(text, format!("Wrote 2 rows to {}", path.display()));

    let written = fs::read_to_string(&path).expect("read download");
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("Name,City,Fee,Rating,In_Home,Bio"));
    assert!(lines.next().is_some_and(|line| line.starts_with("Ben,")));
}

#[test]
fn quit_ends_session() {
    let mut session = session();
    assert_eq!(session.apply("quit"), SessionReply::Quit);
    assert_eq!(session.apply(" EXIT "), SessionReply::Quit);
    assert_eq!(session.apply(""), SessionReply::Continue(String::new()));
}
