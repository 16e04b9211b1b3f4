use genpy_core::MsgGenerationError;
use genpy_generator::{
    StructFormat, WireOp, len_serializer_generator, python::render, string_serializer_generator,
};

fn lines(ops: &[WireOp]) -> String {
    render(ops).join("\n")
}

const LENGTH_READ: &str = "start = end
end += 4
(length,) = _struct_I.unpack(str[start:end])";

// ── length prefixes ──

#[test]
fn string_length_only_measures() {
    let ops = len_serializer_generator("foo", true, true);
    assert_eq!(lines(&ops), "length = len(foo)");
}

#[test]
fn array_length_is_written() {
    let ops = len_serializer_generator("foo", false, true);
    assert_eq!(lines(&ops), "length = len(foo)\nbuff.write(_struct_I.pack(length))");
}

#[test]
fn length_reads_are_identical_for_strings_and_arrays() {
    assert_eq!(lines(&len_serializer_generator("foo", true, false)), LENGTH_READ);
    assert_eq!(lines(&len_serializer_generator("foo", false, false)), LENGTH_READ);
}

// ── strings and byte arrays ──

#[test]
fn string_serializer() {
    let ops = string_serializer_generator("foo", "string", "var_name", true).unwrap();
    assert_eq!(
        lines(&ops),
        "length = len(var_name)
buff.write(struct.pack('<I%ss'%length, length, var_name.encode()))"
    );
}

#[test]
fn byte_array_serializer_branches_on_container_kind() {
    for t in ["uint8[]", "byte[]"] {
        let ops = string_serializer_generator("foo", t, "b_name", true).unwrap();
        assert!(ops.iter().any(|op| matches!(op, WireOp::BranchOnContainerKind { .. })));
        assert_eq!(
            lines(&ops),
            "length = len(b_name)
# - if encoded as a list instead, serialize as bytes instead of string
if type(b_name) in [list, tuple]:
  buff.write(struct.pack('<I%sB'%length, length, *b_name))
else:
  buff.write(struct.pack('<I%ss'%length, length, b_name))"
        );
    }
}

#[test]
fn fixed_byte_array_serializer_has_no_length() {
    let ops = string_serializer_generator("foo", "uint8[10]", "b_name", true).unwrap();
    assert_eq!(
        lines(&ops),
        "# - if encoded as a list instead, serialize as bytes instead of string
if type(b_name) in [list, tuple]:
  buff.write(_struct_10B.pack(*b_name))
else:
  buff.write(_struct_10s.pack(b_name))"
    );
}

#[test]
fn string_deserializer() {
    let expected = format!(
        "{LENGTH_READ}
start = end
end += length
var_name = str[start:end]"
    );
    for t in ["string", "uint8[]", "byte[]"] {
        let ops = string_serializer_generator("foo", t, "var_name", false).unwrap();
        assert_eq!(lines(&ops), expected, "{t}");
    }
}

#[test]
fn fixed_byte_array_deserializer() {
    let ops = string_serializer_generator("foo", "byte[20]", "b_name", false).unwrap();
    assert_eq!(lines(&ops), "start = end\nend += 20\nb_name = str[start:end]");
}

#[test]
fn other_types_are_not_strings() {
    for t in ["int32", "char[]", "string[]", "Foo"] {
        let err = string_serializer_generator("foo", t, "x", true).unwrap_err();
        assert!(matches!(err, MsgGenerationError::Unsupported { .. }), "{t}");
    }
}

// ── struct formats ──

#[test]
fn struct_format_runs_and_sizes() {
    let mut format = StructFormat::new();
    for code in ['i', 'i', 'i', 'B', 'd', 'd'] {
        format.push(code).unwrap();
    }
    assert_eq!(format.pattern(), "3iB2d");
    assert_eq!(format.size(), 12 + 1 + 16);

    assert_eq!(StructFormat::single('I').pattern(), "I");
    assert_eq!(StructFormat::single('I').size(), 4);
    assert_eq!(StructFormat::bytes(10).pattern(), "10s");
    assert_eq!(StructFormat::bytes(10).size(), 10);
    assert_eq!(StructFormat::repeated('h', 4).unwrap().size(), 8);
    assert!(StructFormat::new().is_empty());
}

#[test]
fn struct_format_length_boundaries() {
    let empty = StructFormat::repeated('q', 0).unwrap();
    assert_eq!(empty.pattern(), "0q");
    assert_eq!(empty.size(), 0);

    let one = StructFormat::repeated('q', 1).unwrap();
    assert_eq!(one.pattern(), "q");
    assert_eq!(one.size(), 8);

    let largest = StructFormat::repeated('q', usize::MAX / 8).unwrap();
    assert_eq!(largest.size(), usize::MAX / 8 * 8);

    assert_eq!(StructFormat::repeated('q', usize::MAX), None);
    assert_eq!(StructFormat::repeated('q', usize::MAX / 8 + 1), None);
}

#[test]
fn struct_format_refuses_overflowing_pushes() {
    let mut format = StructFormat::repeated('q', usize::MAX / 8).unwrap();
    let before = format.clone();
    assert_eq!(format.push('q'), None);
    assert_eq!(format.push_n('d', 2), None);
    assert_eq!(format, before);
}
