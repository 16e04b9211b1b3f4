use genpy_core::{MsgContext, MsgGenerationError, MsgSpec};
use genpy_generator::{PyGenerator, WireOp, python::render};

fn spec(types: &[&str], names: &[&str], full_name: &str) -> MsgSpec {
    MsgSpec::new(types.to_vec(), names.to_vec(), vec![], "", full_name).unwrap()
}

fn geometry() -> MsgContext {
    let mut ctx = MsgContext::create_default();
    ctx.ensure_builtin_specs();
    ctx.register("geo/Point", spec(&["float64", "float64", "float64"], &["x", "y", "z"], "geo/Point"));
    ctx.register("geo/Polygon", spec(&["Point[]"], &["points"], "geo/Polygon"));
    ctx
}

fn rendered(ops: Vec<WireOp>) -> Vec<String> {
    render(&ops)
}

// ── flat messages ──

fn mixed() -> MsgSpec {
    spec(
        &["int32", "int32", "bool", "string", "float64[]", "time", "uint8[4]"],
        &["a", "b", "flag", "label", "values", "stamp", "raw"],
        "test_msgs/Mixed",
    )
}

#[test]
fn serializer_groups_fixed_width_fields() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    let ops = g.message_serializer(&mixed(), true).unwrap();
    assert_eq!(
        rendered(ops),
        [
            "buff.write(_struct_2iB.pack(self.a, self.b, self.flag))",
            "length = len(self.label)",
            "buff.write(struct.pack('<I%ss'%length, length, self.label.encode()))",
            "length = len(self.values)",
            "buff.write(_struct_I.pack(length))",
            "pattern = '<%sd'%length",
            "buff.write(struct.pack(pattern, *self.values))",
            "buff.write(_struct_2I.pack(self.stamp.secs, self.stamp.nsecs))",
            "# - if encoded as a list instead, serialize as bytes instead of string",
            "if type(self.raw) in [list, tuple]:",
            "  buff.write(_struct_4B.pack(*self.raw))",
            "else:",
            "  buff.write(_struct_4s.pack(self.raw))",
        ]
    );
}

#[test]
fn deserializer_constructs_reads_and_normalizes() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    let ops = g.message_serializer(&mixed(), false).unwrap();
    assert_eq!(
        rendered(ops),
        [
            "if self.stamp is None:",
            "  self.stamp = genpy.Time()",
            "start = end",
            "end += 9",
            "(self.a, self.b, self.flag,) = _struct_2iB.unpack(str[start:end])",
            "self.flag = bool(self.flag)",
            "start = end",
            "end += 4",
            "(length,) = _struct_I.unpack(str[start:end])",
            "start = end",
            "end += length",
            "self.label = str[start:end]",
            "start = end",
            "end += 4",
            "(length,) = _struct_I.unpack(str[start:end])",
            "pattern = '<%sd'%length",
            "start = end",
            "s = struct.Struct(pattern)",
            "end += s.size",
            "self.values = s.unpack(str[start:end])",
            "start = end",
            "end += 8",
            "(self.stamp.secs, self.stamp.nsecs,) = _struct_2I.unpack(str[start:end])",
            "self.stamp.canon()",
            "start = end",
            "end += 4",
            "self.raw = str[start:end]",
        ]
    );
}

#[test]
fn reserved_field_names_are_remapped() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    let s = spec(&["int32", "int32"], &["from", "to"], "test_msgs/Edge");
    assert_eq!(
        rendered(g.message_serializer(&s, true).unwrap()),
        ["buff.write(_struct_2i.pack(self.from_, self.to))"]
    );
}

// ── nested messages ──

fn shape() -> MsgSpec {
    spec(
        &["Header", "geo/Point", "geo/Point[2]"],
        &["header", "center", "corners"],
        "test_msgs/Shape",
    )
}

#[test]
fn nested_serializer_flattens_and_loops() {
    let ctx = geometry();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.message_serializer(&shape(), true).unwrap()),
        [
            "buff.write(_struct_3I.pack(self.header.seq, self.header.stamp.secs, self.header.stamp.nsecs))",
            "length = len(self.header.frame_id)",
            "buff.write(struct.pack('<I%ss'%length, length, self.header.frame_id.encode()))",
            "buff.write(_struct_3d.pack(self.center.x, self.center.y, self.center.z))",
            "if len(self.corners) != 2:",
            "  self._check_types(ValueError(\"Expecting %s items but found %s when writing '%s'\" % (2, len(self.corners), 'self.corners')))",
            "for val1 in self.corners:",
            "  buff.write(_struct_3d.pack(val1.x, val1.y, val1.z))",
        ]
    );
}

#[test]
fn nested_deserializer_constructs_top_level_fields() {
    let ctx = geometry();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.message_serializer(&shape(), false).unwrap()),
        [
            "if self.header is None:",
            "  self.header = std_msgs.msg._Header.Header()",
            "if self.center is None:",
            "  self.center = geo.msg.Point()",
            "start = end",
            "end += 12",
            "(self.header.seq, self.header.stamp.secs, self.header.stamp.nsecs,) = _struct_3I.unpack(str[start:end])",
            "self.header.stamp.canon()",
            "start = end",
            "end += 4",
            "(length,) = _struct_I.unpack(str[start:end])",
            "start = end",
            "end += length",
            "self.header.frame_id = str[start:end]",
            "start = end",
            "end += 24",
            "(self.center.x, self.center.y, self.center.z,) = _struct_3d.unpack(str[start:end])",
            "self.corners = []",
            "for i in range(0, 2):",
            "  val1 = geo.msg.Point()",
            "  start = end",
            "  end += 24",
            "  (val1.x, val1.y, val1.z,) = _struct_3d.unpack(str[start:end])",
            "  self.corners.append(val1)",
        ]
    );
}

#[test]
fn variable_nested_arrays_read_a_length_first() {
    let ctx = geometry();
    let g = PyGenerator::new(&ctx);
    let polygon = ctx.get_registered("geo/Polygon").unwrap();
    assert_eq!(
        rendered(g.message_serializer(polygon, false).unwrap()),
        [
            "start = end",
            "end += 4",
            "(length,) = _struct_I.unpack(str[start:end])",
            "self.points = []",
            "for i in range(0, length):",
            "  val1 = geo.msg.Point()",
            "  start = end",
            "  end += 24",
            "  (val1.x, val1.y, val1.z,) = _struct_3d.unpack(str[start:end])",
            "  self.points.append(val1)",
        ]
    );
}

#[test]
fn header_requires_its_registered_definition() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    let err = g.message_serializer(&shape(), true).unwrap_err();
    assert_eq!(err, MsgGenerationError::Unregistered { name: "std_msgs/Header".into() });
}

#[test]
fn recursive_layouts_are_rejected() {
    let mut ctx = MsgContext::create_default();
    let node = spec(&["int32", "Node[]"], &["value", "children"], "tree/Node");
    ctx.register("tree/Node", node.clone());
    let g = PyGenerator::new(&ctx);
    let err = g.message_serializer(&node, true).unwrap_err();
    assert!(err.to_string().contains("recursive nesting of 'tree/Node'"), "{err}");
}

#[test]
fn unresolved_field_types_are_errors() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    let s = spec(&["Missing"], &["m"], "test_msgs/Broken");
    assert!(matches!(
        g.message_serializer(&s, true).unwrap_err(),
        MsgGenerationError::Unregistered { .. }
    ));
}

// ── single fields ──

#[test]
fn string_array_field() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.field_serializer("pkg", "string[]", "self.names", true).unwrap()),
        [
            "length = len(self.names)",
            "buff.write(_struct_I.pack(length))",
            "for val1 in self.names:",
            "  length = len(val1)",
            "  buff.write(struct.pack('<I%ss'%length, length, val1.encode()))",
        ]
    );
    assert_eq!(
        rendered(g.field_serializer("pkg", "string[]", "self.names", false).unwrap()),
        [
            "start = end",
            "end += 4",
            "(length,) = _struct_I.unpack(str[start:end])",
            "self.names = []",
            "for i in range(0, length):",
            "  start = end",
            "  end += 4",
            "  (length,) = _struct_I.unpack(str[start:end])",
            "  start = end",
            "  end += length",
            "  val1 = str[start:end]",
            "  self.names.append(val1)",
        ]
    );
}

#[test]
fn duration_array_field() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.field_serializer("pkg", "duration[]", "self.d", false).unwrap()),
        [
            "start = end",
            "end += 4",
            "(length,) = _struct_I.unpack(str[start:end])",
            "self.d = []",
            "for i in range(0, length):",
            "  val1 = genpy.Duration()",
            "  start = end",
            "  end += 8",
            "  (val1.secs, val1.nsecs,) = _struct_2i.unpack(str[start:end])",
            "  val1.canon()",
            "  self.d.append(val1)",
        ]
    );
}

#[test]
fn fixed_numeric_array_field() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.field_serializer("pkg", "bool[3]", "self.flags", false).unwrap()),
        [
            "start = end",
            "end += 3",
            "self.flags = _struct_3B.unpack(str[start:end])",
            "self.flags = list(map(bool, self.flags))",
        ]
    );
    assert_eq!(
        rendered(g.field_serializer("pkg", "int16[4]", "self.xs", true).unwrap()),
        ["buff.write(_struct_4h.pack(*self.xs))"]
    );
}

#[test]
fn fixed_array_length_boundaries() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.field_serializer("pkg", "int64[0]", "self.xs", false).unwrap()),
        ["start = end", "end += 0", "self.xs = _struct_0q.unpack(str[start:end])"]
    );
    assert_eq!(
        rendered(g.field_serializer("pkg", "int64[1]", "self.xs", false).unwrap()),
        ["start = end", "end += 8", "self.xs = _struct_q.unpack(str[start:end])"]
    );
    assert_eq!(
        rendered(g.field_serializer("pkg", "int64[1]", "self.xs", true).unwrap()),
        ["buff.write(_struct_q.pack(*self.xs))"]
    );
    assert_eq!(
        rendered(g.field_serializer("pkg", "int32[4294967295]", "self.xs", true).unwrap()),
        ["buff.write(_struct_4294967295i.pack(*self.xs))"]
    );

    for serialize in [true, false] {
        let err = g
            .field_serializer("pkg", "int64[4611686018427387904]", "self.xs", serialize)
            .unwrap_err();
        assert!(matches!(err, MsgGenerationError::IllegalType { .. }), "{err}");
    }
}

#[test]
fn nested_field_uses_the_owning_package() {
    let ctx = geometry();
    let g = PyGenerator::new(&ctx);
    assert_eq!(
        rendered(g.field_serializer("geo", "Point", "self.p", false).unwrap()),
        [
            "if self.p is None:",
            "  self.p = geo.msg.Point()",
            "start = end",
            "end += 24",
            "(self.p.x, self.p.y, self.p.z,) = _struct_3d.unpack(str[start:end])",
        ]
    );
}

#[test]
fn every_array_deserializer_starts_a_read_or_a_list() {
    let ctx = geometry();
    let g = PyGenerator::new(&ctx);
    for t in ["string", "uint8[]", "uint8[3]", "int32[]", "int32[3]", "string[]", "time[]", "geo/Point[]"] {
        let lines = rendered(g.field_serializer("geo", t, "self.x", false).unwrap());
        assert_eq!(lines[0], "start = end", "{t}");
    }
}

#[test]
fn fixed_string_arrays_are_unsupported() {
    let ctx = MsgContext::create_default();
    let g = PyGenerator::new(&ctx);
    let err = g.field_serializer("pkg", "string[2]", "self.s", true).unwrap_err();
    assert!(matches!(err, MsgGenerationError::Unsupported { .. }));
}
