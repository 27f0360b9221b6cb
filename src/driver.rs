//! Configuration, input parsing, and the top-level `run` entry point
//! (C6/C7/C8): everything that sits between raw bytes and a `Scheduler`.

use std::io::{BufRead, Write};
use std::net::Ipv4Addr;

use typed_builder::TypedBuilder;

use crate::{
    error::Error,
    flow::FlowKey,
    packet::{Packet, Record},
    scheduler::Scheduler,
    time::Time,
    units::{Bytes, Weight},
};

/// Run-wide knobs for embedding callers; the CLI binary always uses
/// `Config::default()`.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Config {
    /// Maximum number of distinct flows the run will track before failing
    /// with [`Error::CapacityExceeded`].
    #[builder(default = 4096)]
    pub flow_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

/// Parses one input line into a `Packet`:
/// `<arrival_time> <src_ip> <src_port> <dst_ip> <dst_port> <length_bytes>
/// [<weight>]`. Returns `None` for blank or malformed lines so the caller
/// can skip and warn rather than aborting the whole run.
fn parse_line(line: &str, seq: u64) -> Option<Packet> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut fields = trimmed.split_whitespace();
    let arrival: u64 = fields.next()?.parse().ok()?;
    let src_ip: Ipv4Addr = fields.next()?.parse().ok()?;
    let src_port: u16 = fields.next()?.parse().ok()?;
    let dst_ip: Ipv4Addr = fields.next()?.parse().ok()?;
    let dst_port: u16 = fields.next()?.parse().ok()?;
    let length: u64 = fields.next()?.parse().ok()?;
    if length == 0 {
        return None;
    }
    let weight = match fields.next() {
        Some(raw) => {
            let value: f64 = raw.parse().ok()?;
            if value <= 0.0 {
                return None;
            }
            Some(Weight::new(value))
        }
        None => None,
    };
    if fields.next().is_some() {
        return None;
    }

    Some(
        Packet::builder()
            .arrival(Time::new(arrival))
            .key(FlowKey {
                src_ip,
                src_port,
                dst_ip,
                dst_port,
            })
            .length(Bytes::new(length))
            .weight(weight)
            .seq(seq)
            .line(trimmed.to_string())
            .build(),
    )
}

/// Reads every packet out of `input`, skipping and warning on malformed or
/// blank lines. A single bad line must not abort the run.
fn read_packets(input: impl BufRead) -> Result<Vec<Packet>, Error> {
    let mut packets = Vec::new();
    let mut seq = 0u64;
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        match parse_line(&line, seq) {
            Some(packet) => {
                packets.push(packet);
                seq += 1;
            }
            None => {
                if !line.trim().is_empty() {
                    tracing::warn!(line = lineno + 1, content = %line, "skipping malformed input line");
                }
            }
        }
    }
    Ok(packets)
}

/// Runs a full simulation end to end: reads packets from `input`, schedules
/// them, writes each departure to `output` as it is produced, and returns
/// every emitted record.
#[tracing::instrument(skip(input, output))]
pub fn run(cfg: &Config, input: impl BufRead, mut output: impl Write) -> Result<Vec<Record>, Error> {
    let packets = read_packets(input)?;
    tracing::info!(packets = packets.len(), "starting simulation");
    let scheduler = Scheduler::new(packets, cfg.flow_capacity);
    let records = scheduler.run_with(|record| {
        writeln!(output, "{}", record.to_output_line())?;
        Ok(())
    })?;
    tracing::info!(departures = records.len(), "simulation finished");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_without_weight() {
        let packet = parse_line("10 1.1.1.1 80 2.2.2.2 8080 500", 0).unwrap();
        assert_eq!(packet.arrival, Time::new(10));
        assert_eq!(packet.length, Bytes::new(500));
        assert!(packet.weight.is_none());
        assert_eq!(packet.line, "10 1.1.1.1 80 2.2.2.2 8080 500");
    }

    #[test]
    fn parses_line_with_weight() {
        let packet = parse_line("10 1.1.1.1 80 2.2.2.2 8080 500 2.5", 0).unwrap();
        assert_eq!(packet.weight.unwrap().into_f64(), 2.5);
    }

    #[test]
    fn rejects_malformed_and_blank_lines() {
        assert!(parse_line("", 0).is_none());
        assert!(parse_line("   ", 0).is_none());
        assert!(parse_line("not enough fields", 0).is_none());
        assert!(parse_line("10 1.1.1.1 80 2.2.2.2 8080 500 -1.0", 0).is_none());
        assert!(parse_line("10 1.1.1.1 80 2.2.2.2 8080 500 1.0 trailing", 0).is_none());
        assert!(parse_line("10 1.1.1.1 80 2.2.2.2 8080 0", 0).is_none());
    }

    #[test]
    fn read_packets_skips_bad_lines_and_keeps_sequence_over_good_ones() {
        let input = "10 1.1.1.1 80 2.2.2.2 8080 500\nbogus\n20 1.1.1.1 80 2.2.2.2 8080 100\n";
        let packets = read_packets(input.as_bytes()).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].seq, 0);
        assert_eq!(packets[1].seq, 1);
    }

    #[test]
    fn run_writes_output_in_wire_format() {
        let input = "0 1.1.1.1 1 2.2.2.2 2 5\n5 1.1.1.1 1 2.2.2.2 2 5\n";
        let mut output = Vec::new();
        let records = run(&Config::default(), input.as_bytes(), &mut output).unwrap();
        assert_eq!(records.len(), 2);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "0: 0 1.1.1.1 1 2.2.2.2 2 5\n5: 5 1.1.1.1 1 2.2.2.2 2 5\n"
        );
    }

    #[test]
    fn run_fails_once_flow_capacity_is_exceeded() {
        let input = "0 1.1.1.1 1 2.2.2.2 2 5\n0 1.1.1.1 2 2.2.2.2 2 5\n";
        let cfg = Config::builder().flow_capacity(1).build();
        let mut output = Vec::new();
        let err = run(&cfg, input.as_bytes(), &mut output).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { limit: 1 }));
    }
}
