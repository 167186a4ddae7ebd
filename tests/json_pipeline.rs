use hostdoctor::diagnose;
use hostdoctor::report::style::Style;
use hostdoctor::system::json::JsonSource;
use hostdoctor::system::source::MetricsSource;
use insta::assert_snapshot;

fn run(document: &str, style: Style) -> String {
    let mut source = JsonSource::from_reader(document.as_bytes(), "test input");
    diagnose(&mut source, style).expect("document should produce a report")
}

#[test]
fn scenario_high_load_only() {
    let output = run(
        r#"{"load_1": 5, "cpu_cores": 4, "mem_total": 8000, "mem_used": 4000,
            "swap_total": 2000, "swap_used": 0,
            "disk_read_bytes": 0, "disk_write_bytes": 0,
            "net_sent_bytes": 0, "net_recv_bytes": 0}"#,
        Style::Plain,
    );

    let issues: Vec<&str> = output.lines().filter(|l| l.starts_with("- [!] ")).collect();
    assert_eq!(issues, vec!["- [!] High CPU load relative to CPU cores"]);
    assert!(!output.contains("High RAM usage"));
}

#[test]
fn scenario_low_memory_without_swap() {
    let output = run(
        r#"{"load_1": 1, "cpu_cores": 4, "mem_total": 4000, "mem_used": 3800, "swap_total": 0}"#,
        Style::Plain,
    );

    let issues: Vec<&str> = output.lines().filter(|l| l.starts_with("- [!] ")).collect();
    assert_eq!(
        issues,
        vec![
            "- [!] High RAM usage detected",
            "- [!] No swap detected on low-memory system",
        ]
    );
}

#[test]
fn scenario_empty_document() {
    let output = run("{}", Style::Plain);

    assert_snapshot!(output, @r"
Analysis:

OK: No critical performance issues detected

Recommendations:


Top CPU-consuming processes:

- no process data

Top RAM-consuming processes:

- no process data
");
}

#[test]
fn document_with_processes_ranks_them() {
    let output = run(
        r#"{
            "cpu_cores": 8,
            "processes": [
                {"pid": 1, "name": "init", "cpu_percent": 0.1, "resident_memory_bytes": 8388608},
                {"pid": 812, "name": "java", "cpu_percent": 250.0, "resident_memory_bytes": 4294967296},
                {"pid": 9, "cpu_percent": "n/a"}
            ]
        }"#,
        Style::Plain,
    );

    assert!(output.contains("- 812 | java | 250.0%\n- 1 | init | 0.1%"));
    assert!(output.contains("- 812 | java | 4096.00 MB\n- 1 | init | 8.00 MB"));
    assert_eq!(output.matches("(1 process skipped: unreadable entry").count(), 2);
}

#[test]
fn same_document_same_report() {
    let document = r#"{"load_1": 12.5, "cpu_cores": 2, "mem_total": 1024, "mem_used": 1000, "swap_used": 5}"#;
    assert_eq!(run(document, Style::Decorated), run(document, Style::Decorated));
}

#[test]
fn unparseable_document_aborts() {
    let mut source = JsonSource::from_reader("load_1=5".as_bytes(), "standard input");
    let err = diagnose(&mut source, Style::Plain).unwrap_err();
    assert!(
        err.to_string()
            .starts_with("failed to parse metrics document from standard input")
    );
}

#[test]
fn missing_document_aborts() {
    let mut source = JsonSource::from_reader("".as_bytes(), "standard input");
    assert!(source.capture().is_err());
}

#[test]
fn input_file_is_read() {
    let path = std::env::temp_dir().join("hostdoctor_json_pipeline_input.json");
    std::fs::write(&path, r#"{"load_1": 3, "cpu_cores": 2}"#).unwrap();

    let mut source = JsonSource::open(&path).unwrap();
    let output = diagnose(&mut source, Style::Plain).unwrap();
    assert!(output.contains("- [!] High CPU load relative to CPU cores"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_input_file_is_fatal() {
    let err = JsonSource::open(std::path::Path::new("/nonexistent/metrics.json"))
        .err()
        .expect("opening a missing file must fail");
    assert!(err.to_string().starts_with("failed to read /nonexistent/metrics.json"));
}
