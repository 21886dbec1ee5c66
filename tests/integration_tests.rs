//! Integration tests for the log bridge
//!
//! These tests verify:
//! - Mapping of every attribute kind to decoded JSON output
//! - Group nesting through chains of derived handlers
//! - Level policy with and without a configured minimum
//! - Caller and timestamp finalization
//! - Empty group policies
//! - Console output and appender failure isolation

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rust_log_bridge::appenders::{ConsoleAppender, JsonAppender, SharedBuffer};
use rust_log_bridge::bridge::{EmptyGroupPolicy, HandlerOptions, SinkHandler};
use rust_log_bridge::core::any_value::MarshalError;
use rust_log_bridge::core::record::{Record, Source};
use rust_log_bridge::prelude::*;
use rust_log_bridge::sink::{Appender, LogEntry};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug)]
struct Marshaller {
    fail: bool,
}

impl AnyValue for Marshaller {
    fn marshal_text(&self) -> Option<std::result::Result<String, MarshalError>> {
        if self.fail {
            Some(Err("failure".into()))
        } else {
            Some(Ok("marshaller".to_string()))
        }
    }
}

#[derive(Debug)]
struct Jsoner {
    foo: &'static str,
    fail: bool,
}

impl AnyValue for Jsoner {
    fn marshal_json(&self) -> Option<std::result::Result<String, MarshalError>> {
        if self.fail {
            Some(Err("failure".into()))
        } else {
            Some(Ok(format!(r#"{{"foo": "{}"}}"#, self.foo)))
        }
    }
}

#[derive(Debug, Serialize)]
struct Unknown {
    #[serde(rename = "Foo")]
    foo: String,
}

#[derive(Debug)]
struct Yo;

impl fmt::Display for Yo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "yo")
    }
}

impl std::error::Error for Yo {}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
}

fn all_attrs(now: DateTime<Utc>) -> Vec<Attr> {
    vec![
        Attr::string("titi", "toto"),
        Attr::string("tata", "tutu"),
        Attr::int64("foo", 12),
        Attr::uint64("bar", 42),
        Attr::duration("dur", Duration::from_secs(3)),
        Attr::bool("bool", true),
        Attr::float64("float", 23.7),
        Attr::time("thetime", now),
        Attr::error("err", Yo),
        Attr::group("empty", vec![]),
        Attr::group("group", vec![Attr::string("bar", "baz")]),
        Attr::any("ip", IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2))),
        Attr::any("ipnet", IpPrefix::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 0)), 24).unwrap()),
        Attr::any("mac", MacAddr::new([0x00, 0x00, 0x5e, 0x00, 0x53, 0x01])),
        Attr::any("stringer", Stringer("stringer")),
        Attr::any("marshaller", Marshaller { fail: false }),
        Attr::any("marshaller-err", Marshaller { fail: true }),
        Attr::any("unknown", Serialized(Unknown { foo: "bar".to_string() })),
        Attr::any("json", Jsoner { foo: "bar", fail: false }),
        Attr::any("json-err", Jsoner { foo: "", fail: true }),
    ]
}

fn expected_fields(now: DateTime<Utc>) -> serde_json::Value {
    json!({
        "titi": "toto",
        "tata": "tutu",
        "foo": 12,
        "bar": 42,
        "dur": 3000.0,
        "bool": true,
        "float": 23.7,
        "thetime": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        "err": "yo",
        "empty": {},
        "group": {"bar": "baz"},
        "ip": "192.168.1.2",
        "ipnet": "192.168.1.0/24",
        "mac": "00:00:5e:00:53:01",
        "stringer": "stringer",
        "marshaller": "marshaller",
        "marshaller-err": "!ERROR:failure",
        "unknown": {"Foo": "bar"},
        "json": {"foo": "bar"},
        "json-err": "!ERROR:failure",
    })
}

fn json_handler(opts: HandlerOptions) -> (SinkHandler, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (SinkHandler::json(buffer.clone(), opts), buffer)
}

fn single_line(buffer: &SharedBuffer) -> serde_json::Value {
    let lines = buffer.json_lines();
    assert_eq!(lines.len(), 1, "expected one entry, got {:?}", buffer.contents());
    lines.into_iter().next().unwrap()
}

#[test]
fn test_no_group_maps_every_kind() {
    let now = fixed_now();
    let (handler, buffer) = json_handler(HandlerOptions::default());
    let handler = handler.with_attrs(vec![Attr::string("attr", "the attr")]);

    assert!(handler.enabled(Level::ERROR));
    assert!(!handler.enabled(Level::DEBUG));

    let record = Record::new(Some(now), Level::ERROR, "foobar", None).with_attrs(all_attrs(now));
    handler.handle(record).unwrap();

    let mut expected = expected_fields(now);
    expected["level"] = json!("error");
    expected["message"] = json!("foobar");
    expected["time"] = json!(now.to_rfc3339_opts(SecondsFormat::Secs, true));
    expected["attr"] = json!("the attr");

    assert_eq!(single_line(&buffer), expected);
}

#[test]
fn test_nested_groups() {
    let now = fixed_now();
    let (handler, buffer) = json_handler(HandlerOptions::default());
    let handler = handler
        .with_attrs(vec![Attr::string("attr", "the attr")])
        .with_group("testgroup")
        .with_attrs(vec![Attr::string("attr", "the attr")])
        .with_group("subgroup");

    assert!(handler.enabled(Level::ERROR));
    assert!(!handler.enabled(Level::DEBUG));

    let record = Record::new(Some(now), Level::WARN, "foobar", None).with_attrs(all_attrs(now));
    handler.handle(record).unwrap();

    let expected = json!({
        "level": "warn",
        "message": "foobar",
        "time": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        "attr": "the attr",
        "testgroup": {
            "attr": "the attr",
            "subgroup": expected_fields(now),
        },
    });
    assert_eq!(single_line(&buffer), expected);
}

#[test]
fn test_group_keeps_attrs_bound_before() {
    let (handler, buffer) = json_handler(HandlerOptions::default());
    let handler = handler
        .with_group("g")
        .with_attrs(vec![Attr::int64("a", 1)])
        .with_attrs(vec![Attr::int64("b", 2)]);

    handler
        .handle(Record::new(None, Level::INFO, "m", None).with_attrs([Attr::int64("c", 3)]))
        .unwrap();

    assert_eq!(single_line(&buffer)["g"], json!({"a": 1, "b": 2, "c": 3}));
}

#[test]
fn test_derivation_leaves_parent_untouched() {
    let (root, buffer) = json_handler(HandlerOptions::default());
    let parent = root.with_group("g").with_attrs(vec![Attr::string("p", "parent")]);

    let left = parent.with_attrs(vec![Attr::string("side", "left")]);
    let right = parent.with_attrs(vec![Attr::string("side", "right")]);
    let _child = parent.with_group("deeper");

    parent.handle(Record::new(None, Level::INFO, "parent", None)).unwrap();
    left.handle(Record::new(None, Level::INFO, "left", None)).unwrap();
    right.handle(Record::new(None, Level::INFO, "right", None)).unwrap();
    root.handle(Record::new(None, Level::INFO, "root", None)).unwrap();

    let lines = buffer.json_lines();
    assert_eq!(lines[0]["g"], json!({"p": "parent"}));
    assert_eq!(lines[1]["g"], json!({"p": "parent", "side": "left"}));
    assert_eq!(lines[2]["g"], json!({"p": "parent", "side": "right"}));
    assert!(lines[3].get("g").is_none());
}

#[test]
fn test_levels_with_minimum() {
    let levels = [
        (LogLevel::Trace, Level::DEBUG - 1),
        (LogLevel::Debug, Level::DEBUG),
        (LogLevel::Info, Level::INFO),
        (LogLevel::Warn, Level::WARN),
        (LogLevel::Warn, Level::WARN + 1),
        (LogLevel::Warn, Level::ERROR - 1),
        (LogLevel::Error, Level::ERROR),
        (LogLevel::Error, Level::ERROR + 1),
    ];

    for (_, min) in levels {
        let (handler, buffer) = json_handler(HandlerOptions::new().with_level(min));
        for (coarse, level) in levels {
            let enabled = level >= min;
            assert_eq!(handler.enabled(level), enabled, "level {} with minimum {}", level, min);

            buffer.clear();
            handler.handle(Record::new(None, level, "foobar", None)).unwrap();
            if enabled {
                assert_eq!(single_line(&buffer)["level"], coarse.to_str());
            } else {
                assert!(buffer.contents().is_empty());
            }
        }
    }
}

#[test]
fn test_levels_without_minimum() {
    let levels = [
        (LogLevel::Trace, Level::DEBUG - 1),
        (LogLevel::Debug, Level::DEBUG),
        (LogLevel::Info, Level::INFO),
        (LogLevel::Warn, Level::WARN + 1),
        (LogLevel::Error, Level::ERROR + 1),
    ];

    for (sink_level, _) in levels {
        let buffer = SharedBuffer::new();
        let logger = SinkLogger::builder()
            .min_level(sink_level)
            .appender(JsonAppender::new(buffer.clone()))
            .build();
        let handler = SinkHandler::new(logger, HandlerOptions::default());

        for (coarse, level) in levels {
            let enabled = coarse >= sink_level;
            assert_eq!(handler.enabled(level), enabled);

            buffer.clear();
            handler.handle(Record::new(None, level, "foobar", None)).unwrap();
            if enabled {
                assert_eq!(single_line(&buffer)["level"], coarse.to_str());
            } else {
                assert!(buffer.contents().is_empty());
            }
        }
    }
}

#[test]
fn test_group_enablement_follows_root() {
    let (handler, buffer) = json_handler(HandlerOptions::new().with_level(Level::WARN));
    let deep = handler.with_group("a").with_group("b").with_group("c");

    assert!(!deep.enabled(Level::INFO));
    assert!(deep.enabled(Level::WARN));

    deep.handle(Record::new(None, Level::INFO, "dropped", None)).unwrap();
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_add_source_through_logger() {
    let (handler, buffer) = json_handler(HandlerOptions::new().with_add_source(true));
    let logger = Logger::new(handler);

    let line = line!() + 1;
    logger.info("foobar", Vec::new());

    let entry = single_line(&buffer);
    assert_eq!(entry["caller"], format!("{}:{}", file!(), line));
    assert!(entry["time"].is_string());
}

#[test]
fn test_source_omitted_when_unresolvable() {
    let (handler, buffer) = json_handler(HandlerOptions::new().with_add_source(true));
    handler
        .handle(Record::new(None, Level::INFO, "no source", None))
        .unwrap();
    handler
        .handle(Record::new(None, Level::INFO, "empty file", Some(Source::new("", 10))))
        .unwrap();

    for line in buffer.json_lines() {
        assert!(line.get("caller").is_none());
    }
}

#[test]
fn test_empty_group_inlined_by_default() {
    let (handler, buffer) = json_handler(HandlerOptions::default());
    let handler = handler
        .with_group("outer")
        .with_group("")
        .with_attrs(vec![Attr::int64("bound", 1)]);

    handler
        .handle(Record::new(None, Level::INFO, "m", None).with_attrs([Attr::int64("own", 2)]))
        .unwrap();

    assert_eq!(single_line(&buffer)["outer"], json!({"bound": 1, "own": 2}));
}

#[test]
fn test_blank_root_group_inlined() {
    let (handler, buffer) = json_handler(HandlerOptions::default());
    let handler = handler.with_group("   ");

    handler
        .handle(Record::new(None, Level::INFO, "m", None).with_attrs([Attr::int64("n", 1)]))
        .unwrap();

    let entry = single_line(&buffer);
    assert_eq!(entry["n"], 1);
    assert!(entry.get("").is_none());
}

#[test]
fn test_empty_group_nested_on_request() {
    let (handler, buffer) =
        json_handler(HandlerOptions::new().with_empty_groups(EmptyGroupPolicy::Nest));
    let handler = handler.with_group("outer").with_group("");

    handler
        .handle(Record::new(None, Level::INFO, "m", None).with_attrs([Attr::int64("n", 1)]))
        .unwrap();

    assert_eq!(single_line(&buffer)["outer"], json!({"": {"n": 1}}));
}

#[test]
fn test_lazy_values_resolved_at_handle_time() {
    let (handler, buffer) = json_handler(HandlerOptions::default());
    let handler = handler.with_group("g");

    let record = Record::new(None, Level::INFO, "lazy", None).with_attrs([
        Attr::lazy("computed", || Value::from(42i64)),
        Attr::lazy("chained", || Value::lazy(|| Value::from("inner"))),
        Attr::lazy("panics", || -> Value { panic!("valuer failed") }),
    ]);
    handler.handle(record).unwrap();

    let entry = single_line(&buffer);
    assert_eq!(entry["g"]["computed"], 42);
    assert_eq!(entry["g"]["chained"], "inner");
    let panicked = entry["g"]["panics"].as_str().unwrap();
    assert!(panicked.contains("valuer failed"), "got {}", panicked);
}

#[test]
fn test_console_handler() {
    let buffer = SharedBuffer::new();
    let handler = SinkHandler::console(buffer.clone(), HandlerOptions::default());
    handler
        .handle(Record::new(Some(fixed_now()), Level::INFO, "foobar", None))
        .unwrap();

    let text = buffer.contents();
    assert!(text.contains("foobar"), "unexpected console output {:?}", text);
    assert!(text.contains("INF"), "unexpected console output {:?}", text);
    assert!(text.contains("2025-01-08 10:30:45"), "unexpected console output {:?}", text);
}

#[test]
fn test_console_log_injection_prevention() {
    let buffer = SharedBuffer::new();
    let logger = SinkLogger::builder()
        .appender(ConsoleAppender::with_writer(buffer.clone()).with_colors(false))
        .build();
    let handler = SinkHandler::new(logger, HandlerOptions::default());

    let malicious = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    handler
        .handle(Record::new(None, Level::INFO, malicious, None))
        .unwrap();

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("\\n"));
}

#[test]
fn test_file_output() -> rust_log_bridge::Result<()> {
    let temp_dir = TempDir::new()?;
    let log_file = temp_dir.path().join("bridge.jsonl");

    let sink = SinkLogger::builder()
        .min_level(LogLevel::Debug)
        .appender(JsonAppender::to_file(&log_file)?.with_timestamp_format(TimestampFormat::UnixMillis))
        .build();
    let handler = SinkHandler::new(sink.clone(), HandlerOptions::default());

    let now = fixed_now();
    for i in 0..3 {
        handler.handle(
            Record::new(Some(now), Level::DEBUG, format!("entry {}", i), None)
                .with_attrs([Attr::int64("i", i)]),
        )?;
    }
    sink.flush()?;

    let content = std::fs::read_to_string(&log_file)?;
    let entries: Vec<serde_json::Value> = content
        .lines()
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["i"], 2);
    assert_eq!(entries[0]["time"], now.timestamp_millis());
    Ok(())
}

struct BrokenAppender;

impl Appender for BrokenAppender {
    fn append(&mut self, _entry: &LogEntry) -> rust_log_bridge::Result<()> {
        Err(LoggerError::other("broken pipe"))
    }

    fn flush(&mut self) -> rust_log_bridge::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn test_appender_failure_does_not_block_later_records() {
    let buffer = SharedBuffer::new();
    let sink = SinkLogger::builder()
        .appender(BrokenAppender)
        .appender(JsonAppender::new(buffer.clone()))
        .build();
    let logger = Logger::new(SinkHandler::new(sink.clone(), HandlerOptions::default()));

    logger.info("first", Vec::new());
    logger.info("second", Vec::new());

    assert_eq!(buffer.json_lines().len(), 2);
    assert_eq!(sink.metrics().failed_count(), 2);
    assert!((sink.metrics().failure_rate() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_handler_from_config() {
    let config: HandlerConfig =
        serde_json::from_str(r#"{"level": "debug", "add_source": false}"#).unwrap();
    let (handler, buffer) = json_handler(config.into_options().unwrap());

    let logger = Logger::new(handler);
    logger.debug("visible", attrs!("k" => "v"));

    assert_eq!(single_line(&buffer)["k"], "v");
}
