use realty_assistant::chart;
use realty_assistant::config::Config;
use realty_assistant::export;
use realty_assistant::ingestion::{self, parse, sample_workbook, SAMPLE_FILE_NAME};
use realty_assistant::query::QueryKind;
use realty_assistant::session::{self, ChatCommand, DatasetSource, Session};

#[test]
fn test_uploaded_sample_replaces_demo_areas() {
    let mut session = Session::new();
    assert!(session.available_areas().contains(&"Wakad".to_string()));

    let outcome = parse(&sample_workbook().unwrap(), SAMPLE_FILE_NAME).unwrap();
    assert_eq!(session::load_status(&outcome), "Successfully loaded 3 records!");
    let greeting = session.load(outcome);

    assert_eq!(session.source(), DatasetSource::Uploaded);
    assert_eq!(session.available_areas(), vec!["Sample Area 1", "Sample Area 2"]);
    assert!(greeting.contains("• 'Analyze Sample Area 1'"));

    let result = session.ask("Analyze Wakad");
    assert_eq!(result.kind, QueryKind::Single);
    assert!(result.summary.contains("Sample Area 1, Sample Area 2"));

    let result = session.ask("price trend of sample area 1");
    assert_eq!(result.kind, QueryKind::Trend);
    assert!(result.summary.contains("Price growth (2023-2024): 9.3%"));
}

#[test]
fn test_compare_sample_areas() {
    let mut session = Session::new();
    session.load(parse(&sample_workbook().unwrap(), SAMPLE_FILE_NAME).unwrap());

    let result = session.ask("compare sample area 1 and sample area 2");
    assert_eq!(result.kind, QueryKind::Comparison);
    assert_eq!(result.areas, vec!["Sample Area 1", "Sample Area 2"]);
    assert!(result.summary.contains("Sample Area 2 offers better value"));
}

#[test]
fn test_reset_then_query_demo() {
    let mut session = Session::new();
    session.load(parse(&sample_workbook().unwrap(), SAMPLE_FILE_NAME).unwrap());
    let message = session.reset();

    assert!(message.starts_with("Switched back to demo data."));
    let result = session.ask("Analyze Wakad");
    assert_eq!(result.kind, QueryKind::Trend);
}

#[test]
fn test_displayed_records_export_and_chart() {
    let session = Session::new();
    let result = session.ask("Compare Aundh and Baner demand trends");

    let csv = export::to_csv(&result.table_data).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[1], "2022,Aundh,8200,92,1100,380");
    assert_eq!(lines[8], "2025,Baner,11000,98,980,540");

    let charts = chart::build(&result);
    assert_eq!(charts[1].series[0].points.len(), 8);
}

#[test]
fn test_welcome_mentions_demo_areas() {
    let message = session::welcome_message();
    for area in Session::new().available_areas() {
        assert!(message.contains(&area), "missing {}", area);
    }
}

#[tokio::test]
async fn test_load_command_mid_session_then_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(SAMPLE_FILE_NAME);
    std::fs::write(&path, sample_workbook().unwrap()).unwrap();

    let mut session = Session::new();
    assert_eq!(session.ask("Analyze Wakad").kind, QueryKind::Trend);

    let line = format!(":load {}\n", path.display());
    let Some(ChatCommand::Load(target)) = ChatCommand::parse(&line) else {
        panic!("expected a load command for {:?}", line);
    };
    let outcome = ingestion::load_file(&Config::default(), &target).await.unwrap();
    session.load(outcome);

    assert_eq!(session.source(), DatasetSource::Uploaded);
    assert_eq!(session.ask("Analyze Wakad").kind, QueryKind::Single);

    session.reset();
    assert_eq!(session.source(), DatasetSource::Demo);
    assert_eq!(session.ask("Analyze Wakad").kind, QueryKind::Trend);
}
