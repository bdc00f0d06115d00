//! End-to-end runs through the library API

use parfold::config::{validator, Config, JobConfig, OutputConfig, WorkerConfig};
use parfold::job::{self, JobReport};
use parfold::metric::closed_form_sum;
use parfold::output::text;
use std::io::Write;

fn config(job: JobConfig, threads: usize) -> Config {
    Config {
        job,
        workers: WorkerConfig { threads },
        output: OutputConfig::default(),
    }
}

fn meet(names: &[&str]) -> JobConfig {
    JobConfig::MeetingPoint {
        locations: names.iter().map(|s| s.to_string()).collect(),
        dataset: None,
    }
}

#[test]
fn range_sum_one_to_ten() {
    let cfg = config(JobConfig::RangeSum { min: 1, max: 10, chunk_size: 100 }, 5);
    validator::validate_config(&cfg).unwrap();

    let report = job::run(&cfg).unwrap();
    let mut out = Vec::new();
    text::write_report(&mut out, &report).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "The sum of the numbers from 1 to 10 is 55\n\
         The average value is: 6.111111111111111\n\
         Calculated sum using formula is: 55\n"
    );
}

#[test]
fn range_sum_agrees_with_closed_form() {
    for (min, max) in [(0i64, 12_345i64), (-9_999, 10_001), (-20, -1)] {
        let cfg = config(JobConfig::RangeSum { min, max, chunk_size: 100 }, 5);
        match job::run(&cfg).unwrap().job {
            JobReport::RangeSum(r) => {
                assert_eq!(r.sum, closed_form_sum(min, max));
                assert_eq!(r.sum, r.check_sum);
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }
}

#[test]
fn range_sum_invalid_bounds_rejected_before_dispatch() {
    let cfg = config(JobConfig::RangeSum { min: 10, max: 1, chunk_size: 100 }, 5);
    let err = validator::validate_config(&cfg).unwrap_err();
    assert_eq!(err.to_string(), "min (10) must be less than max (1)");
}

#[test]
fn meeting_point_london_paris() {
    let report = job::run(&config(meet(&["paris", "LONDON"]), 5)).unwrap();

    let run = report.run.expect("meeting point spawns workers");
    assert_eq!(run.executors, 2);

    match report.job {
        JobReport::MeetingPoint(r) => {
            // Equal totals; London comes first in the dataset
            assert_eq!(r.location, "London");
            assert!((r.total_km - 343.5).abs() < 1.0);
            assert_eq!(r.candidates, vec!["London", "Paris"]);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}

#[test]
fn meeting_point_is_stable_across_runs() {
    let names = [
        "berlin", "madrid", "rome", "warsaw", "dublin", "oslo", "athens", "lisbon", "vienna",
        "prague",
    ];
    let first = job::run(&config(meet(&names), 5)).unwrap();

    for threads in [1, 3, 5, 10] {
        let again = job::run(&config(meet(&names), threads)).unwrap();
        assert_eq!(again.job, first.job);
    }
}

#[test]
fn meeting_point_skips_unknown_names() {
    let report = job::run(&config(meet(&["Harare", "Atlantis", "Bulawayo"]), 5)).unwrap();
    match report.job {
        JobReport::MeetingPoint(r) => {
            assert_eq!(r.candidates.len(), 2);
            assert_eq!(r.missing, vec!["atlantis".to_string()]);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}

#[test]
fn meeting_point_fails_when_nothing_found() {
    let err = job::run(&config(meet(&["Atlantis"]), 5)).unwrap_err();
    assert!(format!("{:#}", err).contains("none of the requested locations"));
}

#[test]
fn meeting_point_too_many_locations() {
    let names: Vec<String> = (0..11).map(|i| format!("city{}", i)).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    assert!(validator::validate_config(&config(meet(&names), 5)).is_err());
}

#[test]
fn meeting_point_from_dataset_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let rows = [(1, "Alpha", "0.0", "0.0"), (2, "Beta", "0.0", "1.0"), (3, "Gamma", "0.0", "2.0")];
    for (id, name, lat, lon) in rows {
        let mut fields = vec![
            id.to_string(),
            name.into(),
            name.into(),
            String::new(),
            lat.into(),
            lon.into(),
        ];
        fields.resize(19, String::new());
        writeln!(file, "{}", fields.join("\t")).unwrap();
    }

    let job = JobConfig::MeetingPoint {
        locations: vec!["gamma".into(), "alpha".into(), "beta".into()],
        dataset: Some(file.path().to_path_buf()),
    };
    match job::run(&config(job, 5)).unwrap().job {
        JobReport::MeetingPoint(r) => assert_eq!(r.location, "Beta"),
        other => panic!("unexpected report: {:?}", other),
    }
}

#[test]
fn lookup_runs_without_workers() {
    let job = JobConfig::Lookup {
        locations: vec!["Chirundu".into(), "Chiredzi".into(), "Esigodini".into()],
        dataset: None,
    };
    let report = job::run(&config(job, 5)).unwrap();

    assert!(report.run.is_none());
    match report.job {
        JobReport::Lookup(r) => assert_eq!(r.entries.len(), 3),
        other => panic!("unexpected report: {:?}", other),
    }
}
