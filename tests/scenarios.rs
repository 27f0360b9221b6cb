//! End-to-end scenarios driven through the textual wire format (C6/C7/C8),
//! matching the scheduler's documented scenarios.

use wfq_sched::{run, Config};

fn lines(input: &str) -> Vec<String> {
    let mut output = Vec::new();
    run(&Config::default(), input.as_bytes(), &mut output).expect("run should succeed");
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn s1_single_flow_unit_weights() {
    let input = "0 1.1.1.1 1 2.2.2.2 2 5\n2 1.1.1.1 1 2.2.2.2 2 3\n";
    assert_eq!(
        lines(input),
        vec![
            "0: 0 1.1.1.1 1 2.2.2.2 2 5".to_string(),
            "5: 2 1.1.1.1 1 2.2.2.2 2 3".to_string(),
        ]
    );
}

#[test]
fn s2_two_equal_weight_flows_interleaved() {
    let input = "0 1.1.1.1 1 2.2.2.2 1 4\n0 1.1.1.1 2 2.2.2.2 2 4\n";
    assert_eq!(
        lines(input),
        vec![
            "0: 0 1.1.1.1 1 2.2.2.2 1 4".to_string(),
            "4: 0 1.1.1.1 2 2.2.2.2 2 4".to_string(),
        ]
    );
}

#[test]
fn s3_weighted_flows_finish_in_weight_order() {
    let input = "0 1.1.1.1 1 2.2.2.2 1 10 2.0\n0 3.3.3.3 1 4.4.4.4 1 10 1.0\n";
    assert_eq!(
        lines(input),
        vec![
            "0: 0 1.1.1.1 1 2.2.2.2 1 10 2.0".to_string(),
            "10: 0 3.3.3.3 1 4.4.4.4 1 10 1.0".to_string(),
        ]
    );
}

#[test]
fn s4_late_arrival_link_idle_between() {
    let input = "0 1.1.1.1 1 2.2.2.2 1 3\n10 1.1.1.1 1 2.2.2.2 1 3\n";
    assert_eq!(
        lines(input),
        vec![
            "0: 0 1.1.1.1 1 2.2.2.2 1 3".to_string(),
            "10: 10 1.1.1.1 1 2.2.2.2 1 3".to_string(),
        ]
    );
}

#[test]
fn s5_backlog_change_mid_stream() {
    let input = "0 1.1.1.1 1 2.2.2.2 1 4\n2 3.3.3.3 1 4.4.4.4 1 4\n";
    let out = lines(input);
    assert_eq!(out[0], "0: 0 1.1.1.1 1 2.2.2.2 1 4");
    assert_eq!(out[1], "4: 2 3.3.3.3 1 4.4.4.4 1 4");
}

#[test]
fn s6_per_packet_weight_override_is_inherited() {
    let input = "\
0 1.1.1.1 1 2.2.2.2 1 3
1 1.1.1.1 1 2.2.2.2 1 3 3.0
2 1.1.1.1 1 2.2.2.2 1 3
0 3.3.3.3 1 4.4.4.4 1 100
";
    let out = lines(input);
    // Per-flow FIFO: the flow's own three packets stay in input order.
    let own: Vec<&str> = out
        .iter()
        .filter(|l| l.contains("1.1.1.1"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        own,
        vec![
            "0: 0 1.1.1.1 1 2.2.2.2 1 3",
            "3: 1 1.1.1.1 1 2.2.2.2 1 3 3.0",
            "4: 2 1.1.1.1 1 2.2.2.2 1 3",
        ]
    );
}

#[test]
fn malformed_lines_are_skipped_without_aborting_the_run() {
    let input = "\
not a packet
0 1.1.1.1 1 2.2.2.2 1 5

5 1.1.1.1 1 2.2.2.2 1 5 -3.0
10 1.1.1.1 1 2.2.2.2 1 5
";
    let out = lines(input);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], "0: 0 1.1.1.1 1 2.2.2.2 1 5");
    assert_eq!(out[1], "10: 10 1.1.1.1 1 2.2.2.2 1 5");
}

#[test]
fn capacity_exhaustion_is_reported_and_aborts_the_run() {
    let cfg = Config::builder().flow_capacity(1).build();
    let input = "0 1.1.1.1 1 2.2.2.2 1 5\n0 3.3.3.3 1 4.4.4.4 1 5\n";
    let mut out = Vec::new();
    let err = run(&cfg, input.as_bytes(), &mut out).unwrap_err();
    assert!(matches!(
        err,
        wfq_sched::Error::CapacityExceeded { limit: 1 }
    ));
}

#[test]
fn universal_properties_hold_over_a_mixed_workload() {
    let input = "\
0 1.1.1.1 1 2.2.2.2 1 5
0 1.1.1.1 1 2.2.2.2 1 5
1 3.3.3.3 1 4.4.4.4 1 5 2.0
2 1.1.1.1 1 2.2.2.2 1 5
6 5.5.5.5 1 6.6.6.6 1 2
";
    let mut out = Vec::new();
    let records = run(&Config::default(), input.as_bytes(), &mut out).unwrap();

    // Output cardinality: one record per valid input line.
    assert_eq!(records.len(), 5);

    // Identity preservation: each record's line is exactly the input line.
    let input_lines: Vec<&str> = input.lines().collect();
    for record in &records {
        assert!(input_lines.contains(&record.line.as_str()));
    }

    // Non-decreasing start times.
    for w in records.windows(2) {
        assert!(w[0].t_start <= w[1].t_start);
    }

    // Per-flow FIFO: packets from the 1.1.1.1 flow keep their input order.
    let own: Vec<&wfq_sched::Record> = records
        .iter()
        .filter(|r| r.line.contains("1.1.1.1"))
        .collect();
    assert_eq!(own.len(), 3);
    assert!(own[0].t_start <= own[1].t_start);
    assert!(own[1].t_start <= own[2].t_start);
}
