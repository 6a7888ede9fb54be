//! Integration tests for ribbon-telemetry.

use ribbon_telemetry::bus::EventBus;
use ribbon_telemetry::events::{EventKind, SimulationEvent};
use ribbon_telemetry::sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};

fn begin(tick: u64) -> SimulationEvent {
    SimulationEvent::new(
        tick,
        EventKind::TickBegin {
            sim_time: tick as f64 * 0.02,
            dt: 0.02,
        },
    )
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush_in_order() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let buffer = sink.buffer();
    bus.add_sink(Box::new(sink));

    bus.emit(begin(0));
    bus.emit(SimulationEvent::new(0, EventKind::TickEnd { wall_time: 0.001 }));
    assert!(buffer.lock().unwrap().is_empty());

    assert_eq!(bus.flush(), 2);
    let events = buffer.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind_name(), "tick_begin");
    assert_eq!(events[1].kind_name(), "tick_end");
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let buffer = sink.buffer();
    bus.add_sink(Box::new(sink));

    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(begin(0));
    assert_eq!(bus.flush(), 0);
    assert!(buffer.lock().unwrap().is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let mut bus = EventBus::new();
    let first = VecSink::new();
    let second = VecSink::new();
    let (a, b) = (first.buffer(), second.buffer());
    bus.add_sink(Box::new(first));
    bus.add_sink(Box::new(second));
    assert_eq!(bus.sink_count(), 2);
    assert_eq!(bus.sink_names(), vec!["vec_sink", "vec_sink"]);

    for tick in 0..3 {
        bus.emit(begin(tick));
    }
    bus.finalize();

    assert_eq!(a.lock().unwrap().len(), 3);
    assert_eq!(*a.lock().unwrap(), *b.lock().unwrap());
}

#[test]
fn flush_without_sinks_drains_queue() {
    let mut bus = EventBus::default();
    bus.emit(begin(0));
    assert_eq!(bus.flush(), 1);
    assert_eq!(bus.flush(), 0);
}

// ─── Sink Tests ───────────────────────────────────────────────

#[test]
fn json_lines_sink_writes_one_line_per_event() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.handle(&begin(1));
    sink.handle(&SimulationEvent::new(
        1,
        EventKind::ConstraintsBroken {
            newly_broken: 2,
            total_broken: 5,
        },
    ));
    sink.finalize();
    assert_eq!(sink.written(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let recovered: SimulationEvent = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(
        recovered.kind,
        EventKind::ConstraintsBroken {
            newly_broken: 2,
            total_broken: 5
        }
    );
    assert!(lines[0].contains("\"type\":\"tick_begin\""));
}

#[test]
fn tracing_sink_accepts_events() {
    let mut sink = TracingSink::new(tracing::Level::DEBUG);
    sink.handle(&begin(0));
    assert_eq!(sink.name(), "tracing_sink");
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        7,
        EventKind::Collision {
            ground_contacts: 3,
            sphere_contacts: 1,
            sphere_velocity: Some([0.5, 0.0, 0.0]),
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
    assert_eq!(recovered.kind_name(), "collision");
}

#[test]
fn custom_event_carries_payload() {
    let event = SimulationEvent::new(
        2,
        EventKind::Custom {
            label: "probe".into(),
            payload: r#"{"x":1}"#.into(),
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("probe"));
    assert_eq!(event.kind_name(), "custom");
}
