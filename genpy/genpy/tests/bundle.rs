use genpy::{
    GenerateError, GeneratedField, MsgContext, MsgGenerationError, MsgSpec, PyGenerator,
    core::Constant, format_generated, generate_all, generate_message,
};

fn spec(types: &[&str], names: &[&str], full_name: &str) -> MsgSpec {
    MsgSpec::new(types.to_vec(), names.to_vec(), vec![], "", full_name).unwrap()
}

fn registry() -> MsgContext {
    let mut ctx = MsgContext::create_default();
    ctx.ensure_builtin_specs();
    ctx.register("geo/Point", spec(&["float64", "float64", "float64"], &["x", "y", "z"], "geo/Point"));
    ctx.register(
        "app/Robot",
        MsgSpec::new(
            vec!["Header", "geo/Point", "float64[]", "int32"],
            vec!["header", "position", "readings", "from"],
            vec![Constant::parse("int32", "if", "3").unwrap()],
            "",
            "app/Robot",
        )
        .unwrap(),
    );
    ctx
}

#[test]
fn message_bundle_collects_every_artifact() {
    let ctx = registry();
    let g = PyGenerator::new(&ctx);
    let robot = generate_message(&g, "app/Robot").unwrap();

    assert_eq!(robot.full_name, "app/Robot");
    assert_eq!(robot.imports, ["import std_msgs.msg", "import geo.msg"]);
    assert_eq!(robot.constants.len(), 1);
    assert_eq!(robot.constants[0].name, "if_");

    assert_eq!(
        robot.fields,
        vec![
            GeneratedField {
                name: "header".into(),
                type_ref: "Header".into(),
                default_value: Some("std_msgs.msg._Header.Header()".into()),
                constructor: Some("std_msgs.msg._Header.Header()".into()),
            },
            GeneratedField {
                name: "position".into(),
                type_ref: "geo/Point".into(),
                default_value: Some("geo.msg.Point()".into()),
                constructor: Some("geo.msg.Point()".into()),
            },
            GeneratedField {
                name: "readings".into(),
                type_ref: "float64[]".into(),
                default_value: Some("[]".into()),
                constructor: None,
            },
            GeneratedField {
                name: "from_".into(),
                type_ref: "int32".into(),
                default_value: Some("0".into()),
                constructor: None,
            },
        ]
    );

    assert_eq!(
        robot.flattened.names(),
        ["header", "position.x", "position.y", "position.z", "readings", "from"]
    );
    assert_eq!(
        robot.serializer.first().map(String::as_str),
        Some("buff.write(_struct_3I.pack(self.header.seq, self.header.stamp.secs, self.header.stamp.nsecs))")
    );
    assert_eq!(
        robot.deserializer.first().map(String::as_str),
        Some("if self.header is None:")
    );
    assert_eq!(
        robot.serializer.last().map(String::as_str),
        Some("buff.write(_struct_i.pack(self.from_))")
    );
}

#[test]
fn unknown_message_is_reported_with_its_name() {
    let ctx = registry();
    let g = PyGenerator::new(&ctx);
    let err = generate_message(&g, "app/Nope").unwrap_err();
    assert_eq!(
        err,
        GenerateError::Message {
            full_name: "app/Nope".into(),
            source: MsgGenerationError::Unregistered { name: "app/Nope".into() },
        }
    );
    assert!(format!("{err:#}").contains("failed to generate 'app/Nope'"));
}

#[test]
fn generate_all_is_sorted_and_isolates_failures() {
    let mut ctx = registry();
    ctx.register("app/Broken", spec(&["Missing"], &["m"], "app/Broken"));
    let g = PyGenerator::new(&ctx);

    let results = generate_all(&g);
    let names: Vec<&str> = results.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["app/Broken", "app/Robot", "geo/Point", "std_msgs/Header"]);

    assert!(results[0].1.is_err());
    assert!(results[1..].iter().all(|(_, r)| r.is_ok()));
}

#[test]
fn imports_come_from_field_types_only() {
    let mut ctx = registry();
    ctx.register("geo/Polygon", spec(&["Point[]"], &["points"], "geo/Polygon"));
    ctx.register("app/Counter", spec(&["uint32", "string"], &["count", "label"], "app/Counter"));
    let g = PyGenerator::new(&ctx);

    assert!(generate_message(&g, "geo/Point").unwrap().imports.is_empty());
    assert!(generate_message(&g, "app/Counter").unwrap().imports.is_empty());
    assert_eq!(generate_message(&g, "geo/Polygon").unwrap().imports, ["import geo.msg"]);
}

#[test]
fn report_lists_sections() -> Result<(), std::fmt::Error> {
    let ctx = registry();
    let g = PyGenerator::new(&ctx);
    let point = generate_message(&g, "geo/Point").unwrap();

    let text = format_generated(&point)?;
    let expected = "\
geo/Point
    fields:
        float64 x = 0.
        float64 y = 0.
        float64 z = 0.
    flattened:
        float64 x
        float64 y
        float64 z
    serialize:
        buff.write(_struct_3d.pack(self.x, self.y, self.z))
    deserialize:
        start = end
        end += 24
        (self.x, self.y, self.z,) = _struct_3d.unpack(str[start:end])
";
    assert_eq!(text, expected);
    Ok(())
}
