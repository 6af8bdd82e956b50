use kinetype_core::{
    Change, Config, EffectError, Engine, HandleId, Inputs, Outputs, ScrambleSpec, TargetResolver,
    TypewriterSpec, Value,
};

fn scramble(text: &str) -> ScrambleSpec {
    ScrambleSpec {
        duration: 1.0,
        seed: Some(11),
        ..ScrambleSpec::new(text)
    }
}

fn typewriter(texts: &[&str]) -> TypewriterSpec {
    TypewriterSpec {
        typing_speed: 0.1,
        ..TypewriterSpec::new(texts.iter().map(|t| t.to_string()).collect())
    }
}

fn text_for<'a>(out: &'a Outputs, key: &str) -> Option<&'a str> {
    out.latest_for(key).and_then(|v| v.as_text())
}

// A simple resolver used by tests
struct MapResolver(std::collections::HashMap<String, String>);
impl TargetResolver for MapResolver {
    fn resolve(&mut self, path: &str) -> Option<String> {
        self.0.get(path).cloned()
    }
}

/// it should write the exact target text on the completion tick and then go idle
#[test]
fn scramble_completes_and_retires() {
    let mut eng = Engine::new(Config::default());
    let h = eng.start_scramble("hero/title", scramble("PREMIUM RESALE")).unwrap();

    let mut ticks = 0;
    loop {
        let out = eng.update(0.1, Inputs::default());
        ticks += 1;
        if out
            .events
            .iter()
            .any(|e| matches!(e, kinetype_core::EffectEvent::Completed { handle } if *handle == h))
        {
            assert_eq!(text_for(out, "hero/title"), Some("PREMIUM RESALE"));
            break;
        }
        assert!(ticks < 100, "scramble never completed");
    }

    // Idle afterwards: no further writes, handle no longer active.
    assert!(!eng.is_active(h));
    let out = eng.update(0.1, Inputs::default());
    assert!(out.is_empty());
}

/// it should never write again after cancel, not even the final text
#[test]
fn cancel_stops_all_writes() {
    let mut eng = Engine::new(Config::default());
    let h = eng.start_scramble("hero/title", scramble("NEVER SHOWN")).unwrap();

    let _ = eng.update(0.1, Inputs::default());
    let out = eng.update(0.1, Inputs::default());
    let mid = text_for(out, "hero/title").unwrap().to_string();
    assert_ne!(mid, "NEVER SHOWN");

    assert!(eng.cancel(h));
    assert!(!eng.is_active(h));
    for _ in 0..30 {
        let out = eng.update(0.1, Inputs::default());
        assert!(out.latest_for("hero/title").is_none());
    }
}

/// it should apply input-carried cancels before stepping
#[test]
fn cancel_via_inputs_applies_before_the_tick() {
    let mut eng = Engine::new(Config::default());
    let h = eng.start_scramble("hero/title", scramble("X")).unwrap();
    let out = eng.update(0.1, Inputs::cancel(h));
    assert!(out.is_empty());
    assert!(!eng.is_active(h));
}

/// it should supersede a running effect when a new one claims the same path
#[test]
fn new_effect_supersedes_same_path() {
    let mut eng = Engine::new(Config::default());
    let first = eng.start_scramble("hero/title", scramble("OLD")).unwrap();
    let second = eng.start_scramble("hero/title", scramble("NEW")).unwrap();
    assert!(!eng.is_active(first));
    assert!(eng.is_active(second));
    assert_ne!(first, second);
}

/// it should not write anything before the start delay elapses
#[test]
fn start_delay_defers_first_write() {
    let mut eng = Engine::new(Config::default());
    let _ = eng
        .start_scramble(
            "hero/title",
            ScrambleSpec {
                delay: 0.5,
                ..scramble("LATER")
            },
        )
        .unwrap();
    for _ in 0..4 {
        let out = eng.update(0.1, Inputs::default());
        assert!(out.is_empty());
    }
    let out = eng.update(0.2, Inputs::default());
    assert!(!out.is_empty());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, kinetype_core::EffectEvent::Started { .. })));
}

/// it should keep segment 1 empty at the moment segment 0 completes
#[test]
fn next_segment_stays_empty_until_pause_elapses() {
    let mut eng = Engine::new(Config::default());
    let _ = eng.start_typewriter("hero/tag", typewriter(&["A", "BC"])).unwrap();

    // First tick initializes both sub-targets to "".
    let out = eng.update(0.05, Inputs::default());
    assert_eq!(text_for(out, "hero/tag/seg0"), Some(""));
    assert_eq!(text_for(out, "hero/tag/seg1"), Some(""));

    // Segment 0 ("A", 0.1s) completes here; segment 1 must not have been
    // touched since its init write.
    let out = eng.update(0.06, Inputs::default());
    assert_eq!(text_for(out, "hero/tag/seg0"), Some("A"));
    assert!(out.latest_for("hero/tag/seg1").is_none());

    // Still inside the 0.2s pause.
    let out = eng.update(0.1, Inputs::default());
    assert!(out.latest_for("hero/tag/seg1").is_none());

    // Past the pause: segment 1 starts growing.
    let out = eng.update(0.25, Inputs::default());
    assert!(text_for(out, "hero/tag/seg1").is_some());
}

/// it should reach Done with no typed output for an empty sequence and blink at once
#[test]
fn empty_sequence_blinks_immediately() {
    let mut eng = Engine::new(Config::default());
    let h = eng.start_typewriter("hero/tag", typewriter(&[])).unwrap();
    let out = eng.update(0.016, Inputs::default());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, kinetype_core::EffectEvent::Completed { handle } if *handle == h)));
    assert_eq!(
        out.latest_for("hero/tag/caret").and_then(|v| v.as_float()),
        Some(1.0)
    );
    assert!(out.changes.iter().all(|c| c.key == "hero/tag/caret"));
}

/// it should retire a caretless typewriter after the last segment
#[test]
fn caretless_typewriter_retires_when_done() {
    let mut eng = Engine::new(Config::default());
    let h = eng
        .start_typewriter(
            "hero/tag",
            TypewriterSpec {
                show_cursor: false,
                ..typewriter(&["OK"])
            },
        )
        .unwrap();
    for _ in 0..10 {
        let _ = eng.update(0.1, Inputs::default());
    }
    assert!(!eng.is_active(h));
    assert!(eng.update(0.1, Inputs::default()).is_empty());
}

/// it should emit SegmentTyped events in display order
#[test]
fn segment_events_preserve_order() {
    let mut eng = Engine::new(Config::default());
    let _ = eng
        .start_typewriter("hero/tag", typewriter(&["A", "B", "C"]))
        .unwrap();
    let mut indices = Vec::new();
    for _ in 0..50 {
        let out = eng.update(0.05, Inputs::default());
        for event in &out.events {
            if let kinetype_core::EffectEvent::SegmentTyped { index, .. } = event {
                indices.push(*index);
            }
        }
    }
    assert_eq!(indices, vec![0, 1, 2]);
}

/// it should produce the same final output when the same request runs twice
#[test]
fn restart_is_idempotent() {
    let mut eng = Engine::new(Config::default());
    let mut finals = Vec::new();
    for _ in 0..2 {
        let _ = eng.start_scramble("hero/title", scramble("TWICE")).unwrap();
        for _ in 0..20 {
            let out = eng.update(0.1, Inputs::default());
            if let Some(text) = text_for(out, "hero/title") {
                if !out
                    .events
                    .iter()
                    .any(|e| matches!(e, kinetype_core::EffectEvent::Completed { .. }))
                {
                    continue;
                }
                finals.push(text.to_string());
                break;
            }
        }
    }
    assert_eq!(finals, vec!["TWICE".to_string(), "TWICE".to_string()]);
}

/// it should produce identical Outputs for the same seed and dt sequence
#[test]
fn determinism_same_sequence_same_outputs() {
    let mut e1 = Engine::new(Config::default());
    let mut e2 = Engine::new(Config::default());
    let _ = e1.start_scramble("hero/title", scramble("DETERMINISM")).unwrap();
    let _ = e2.start_scramble("hero/title", scramble("DETERMINISM")).unwrap();
    let _ = e1.start_typewriter("hero/tag", typewriter(&["A", "BC"])).unwrap();
    let _ = e2.start_typewriter("hero/tag", typewriter(&["A", "BC"])).unwrap();

    let seq = [0.016, 0.016, 0.016, 0.032, 0.0, 0.1, 0.33, 1.0];
    for dt in seq {
        let o1 = serde_json::to_string(e1.update(dt, Inputs::default())).unwrap();
        let o2 = serde_json::to_string(e2.update(dt, Inputs::default())).unwrap();
        assert_eq!(o1, o2);
    }
}

/// it should key changes by resolved handles after prebind, with path fallback
#[test]
fn prebind_resolves_and_falls_back() {
    let mut eng = Engine::new(Config::default());
    let _ = eng.start_scramble("hero/title", scramble("BOUND")).unwrap();
    let _ = eng.start_scramble("hero/other", scramble("FALLBACK")).unwrap();

    let mut map = std::collections::HashMap::new();
    map.insert("hero/title".to_string(), "HANDLE_A".to_string());
    let mut resolver = MapResolver(map);
    eng.prebind(&mut resolver);

    let out = eng.update(0.1, Inputs::default());
    assert!(out.latest_for("HANDLE_A").is_some());
    assert!(out.latest_for("hero/title").is_none());
    assert!(out.latest_for("hero/other").is_some());
}

/// it should reject invalid specs without scheduling anything
#[test]
fn invalid_specs_schedule_nothing() {
    let mut eng = Engine::new(Config::default());
    let err = eng.start_scramble(
        "hero/title",
        ScrambleSpec {
            duration: -2.0,
            ..scramble("X")
        },
    );
    assert_eq!(err.unwrap_err(), EffectError::NegativeDuration(-2.0));
    assert!(eng.update(0.1, Inputs::default()).is_empty());
}

/// it should exercise Outputs API basics: clear/empty/push
#[test]
fn outputs_api_basics() {
    let mut out = Outputs::default();
    assert!(out.is_empty());
    out.push_change(Change {
        handle: HandleId(0),
        key: "a".into(),
        value: Value::Text("hi".into()),
    });
    assert!(!out.is_empty());
    assert_eq!(out.latest_for("a").and_then(|v| v.as_text()), Some("hi"));
    out.clear();
    assert!(out.is_empty());
}

/// it should round-trip Config, Inputs, and Value variants through serde
#[test]
fn serde_roundtrips_and_defaults() {
    let cfg: Config = serde_json::from_str("{}").unwrap();
    assert!((cfg.segment_pause - 0.2).abs() < 1e-6);
    let s = serde_json::to_string(&cfg).unwrap();
    let cfg2: Config = serde_json::from_str(&s).unwrap();
    assert!((cfg2.reroll_scale - 0.1).abs() < 1e-6);

    let inputs: Inputs = serde_json::from_str("{}").unwrap();
    assert!(inputs.cancels.is_empty());

    let v = Value::Text("hello".to_string());
    let sv = serde_json::to_string(&v).unwrap();
    assert_eq!(sv, r#"{"type":"text","data":"hello"}"#);
    let v2: Value = serde_json::from_str(&sv).unwrap();
    assert_eq!(v, v2);

    let f = Value::Float(0.5);
    let f2: Value = serde_json::from_str(&serde_json::to_string(&f).unwrap()).unwrap();
    assert_eq!(f, f2);

    let spec: ScrambleSpec = serde_json::from_str(r#"{"text":"HI"}"#).unwrap();
    assert!((spec.duration - 2.0).abs() < 1e-6);
    assert!(spec.tween_length);
    let tw: TypewriterSpec = serde_json::from_str(r#"{"texts":["a","b"]}"#).unwrap();
    assert!(tw.show_cursor);
    assert!((tw.typing_speed - 0.05).abs() < 1e-6);
}
