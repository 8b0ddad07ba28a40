use super::*;

fn num(v: f64) -> Arg {
    Arg::Num(v)
}

fn name(s: &str) -> Arg {
    Arg::Str(s.to_string())
}

#[test]
fn box_strips_constants_and_coordinate_system() {
    let cmd = Command::new(
        Op::Box,
        [
            name("shiny"),
            num(0.0),
            num(1.0),
            num(2.0),
            num(3.0),
            num(4.0),
            num(5.0),
            name("world"),
        ],
    );
    let d = cmd.normalize(0).unwrap();
    assert_eq!(
        d,
        Directive::Shape {
            shape: Shape::Box {
                corner: Vec3::new(0.0, 1.0, 2.0),
                size: Vec3::new(3.0, 4.0, 5.0),
            },
            constants: Some("shiny".to_string()),
            coords: Some("world".to_string()),
        }
    );
}

#[test]
fn bare_box_has_no_names() {
    let cmd = Command::new(Op::Box, [0.0, 0.0, 0.0, 1.0, 1.0, 1.0].map(num));
    let Directive::Shape {
        constants, coords, ..
    } = cmd.normalize(0).unwrap()
    else {
        panic!("expected shape");
    };
    assert_eq!(constants, None);
    assert_eq!(coords, None);
}

#[test]
fn line_accepts_per_endpoint_coordinate_systems() {
    let cmd = Command::new(
        Op::Line,
        [
            num(1.0),
            num(2.0),
            num(3.0),
            name("a"),
            num(4.0),
            num(5.0),
            num(6.0),
            name("b"),
        ],
    );
    assert_eq!(
        cmd.normalize(3).unwrap(),
        Directive::Line {
            constants: None,
            p0: Vec3::new(1.0, 2.0, 3.0),
            coords0: Some("a".to_string()),
            p1: Vec3::new(4.0, 5.0, 6.0),
            coords1: Some("b".to_string()),
        }
    );
}

#[test]
fn wrong_arity_names_command_index_and_op() {
    let err = Command::new(Op::Sphere, [0.0, 0.0, 0.0].map(num))
        .normalize(7)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("validation error"), "{msg}");
    assert!(msg.contains("#7"), "{msg}");
    assert!(msg.contains("sphere"), "{msg}");

    assert!(
        Command::new(Op::Move, [1.0, 2.0, 3.0, 4.0].map(num))
            .normalize(0)
            .is_err()
    );
}

#[test]
fn rotate_parses_axis_and_keeps_knob() {
    let cmd = Command::new(Op::Rotate, [name("y"), num(90.0)]).with_knob("spin");
    assert_eq!(
        cmd.normalize(0).unwrap(),
        Directive::Rotate {
            axis: Axis::Y,
            degrees: 90.0,
            knob: Some("spin".to_string()),
        }
    );
    assert!(
        Command::new(Op::Rotate, [name("w"), num(90.0)])
            .normalize(0)
            .is_err()
    );
}

#[test]
fn vary_requires_knob_and_integer_increasing_range() {
    let ok = Command::new(Op::Vary, [0.0, 9.0, 0.0, 1.0].map(num)).with_knob("k");
    assert!(matches!(ok.normalize(0).unwrap(), Directive::Vary(_)));

    let no_knob = Command::new(Op::Vary, [0.0, 9.0, 0.0, 1.0].map(num));
    assert!(no_knob.normalize(0).is_err());

    let fractional = Command::new(Op::Vary, [0.5, 9.0, 0.0, 1.0].map(num)).with_knob("k");
    assert!(fractional.normalize(0).is_err());

    let empty_span = Command::new(Op::Vary, [4.0, 4.0, 0.0, 1.0].map(num)).with_knob("k");
    assert!(empty_span.normalize(0).is_err());

    // Negative endpoints are a range problem, left for the resolver.
    let negative = Command::new(Op::Vary, [-1.0, 4.0, 0.0, 1.0].map(num)).with_knob("k");
    assert!(negative.normalize(0).is_ok());
}

#[test]
fn frames_must_be_positive_integer() {
    assert_eq!(
        Command::new(Op::Frames, [num(10.0)]).normalize(0).unwrap(),
        Directive::Frames { count: 10 }
    );
    assert!(Command::new(Op::Frames, [num(0.0)]).normalize(0).is_err());
    assert!(Command::new(Op::Frames, [num(2.5)]).normalize(0).is_err());
}

#[test]
fn knob_on_shape_is_rejected() {
    let cmd = Command::new(Op::Box, [0.0, 0.0, 0.0, 1.0, 1.0, 1.0].map(num)).with_knob("k");
    assert!(cmd.normalize(0).is_err());
}

#[test]
fn commands_deserialize_from_parser_json() {
    let json = r#"[
        {"op": "frames", "args": [10]},
        {"op": "vary", "args": [0, 9, 0, 90], "knob": "k"},
        {"op": "rotate", "args": ["z", 1], "knob": "k"},
        {"op": "push"},
        {"op": "save", "args": ["out.png"]}
    ]"#;
    let commands: Vec<Command> = serde_json::from_str(json).unwrap();
    let directives = normalize_commands(&commands).unwrap();
    assert_eq!(directives.len(), 5);
    assert_eq!(directives[0].op(), Op::Frames);
    assert_eq!(directives[2].op(), Op::Rotate);
    assert_eq!(
        directives[4],
        Directive::Save {
            name: "out.png".to_string()
        }
    );
}
