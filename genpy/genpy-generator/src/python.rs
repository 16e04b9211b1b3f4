//! Python backend: renders wire operations, default values and constructors as source.

use crate::{
    defaults::{Constructor, DefaultValue},
    wire::{Count, Payload, Unpack, WireOp},
};

/// Block indentation of emitted code.
pub const INDENT: &str = "  ";

/// Render operations as Python statements, one per line.
pub fn render(ops: &[WireOp]) -> Vec<String> {
    let mut out = Lines::default();
    out.ops(ops, 0);
    out.lines
}

pub fn render_constructor(constructor: &Constructor) -> String {
    match constructor {
        Constructor::Special(expr) => expr.clone(),
        Constructor::Message { package, name } => format!("{package}.msg.{name}()"),
    }
}

pub fn render_default(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Zero => "0".to_string(),
        DefaultValue::FloatZero => "0.".to_string(),
        DefaultValue::False => "False".to_string(),
        DefaultValue::EmptyString => "''".to_string(),
        DefaultValue::EmptyList => "[]".to_string(),
        DefaultValue::ZeroBytes(n) => format!("chr(0)*{n}"),
        DefaultValue::List(items) => {
            let items: Vec<String> = items.iter().map(render_default).collect();
            format!("[{}]", items.join(","))
        }
        DefaultValue::Constructor(constructor) => render_constructor(constructor),
    }
}

#[derive(Default)]
struct Lines {
    lines: Vec<String>,
}

impl Lines {
    fn line(&mut self, level: usize, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(level), text.as_ref()));
    }

    fn ops(&mut self, ops: &[WireOp], level: usize) {
        for op in ops {
            self.op(op, level);
        }
    }

    fn op(&mut self, op: &WireOp, level: usize) {
        match op {
            WireOp::Comment(text) => self.line(level, format!("# {text}")),
            WireOp::MeasureLength { var } => self.line(level, format!("length = len({var})")),
            WireOp::WriteFixed { format, args } => self.line(
                level,
                format!(
                    "buff.write(_struct_{}.pack({}))",
                    format.pattern(),
                    args.join(", ")
                ),
            ),
            WireOp::WriteLengthPrefixed { var, payload } => {
                let (code, arg) = match payload {
                    Payload::Utf8 => ('s', format!("{var}.encode()")),
                    Payload::Bytes => ('s', var.clone()),
                    Payload::ByteList => ('B', format!("*{var}")),
                };
                self.line(
                    level,
                    format!("buff.write(struct.pack('<I%s{code}'%length, length, {arg}))"),
                );
            }
            WireOp::WritePacked { var, code } => {
                self.line(level, format!("pattern = '<%s{code}'%length"));
                self.line(level, format!("buff.write(struct.pack(pattern, *{var}))"));
            }
            WireOp::ReadFixed { format, into } => {
                let target = match into {
                    Unpack::Fields(vars) => format!("({},)", vars.join(", ")),
                    Unpack::Whole(var) => var.clone(),
                };
                self.line(level, "start = end");
                self.line(level, format!("end += {}", format.size()));
                self.line(
                    level,
                    format!("{target} = _struct_{}.unpack(str[start:end])", format.pattern()),
                );
            }
            WireOp::ReadPacked { var, code } => {
                self.line(level, format!("pattern = '<%s{code}'%length"));
                self.line(level, "start = end");
                self.line(level, "s = struct.Struct(pattern)");
                self.line(level, "end += s.size");
                self.line(level, format!("{var} = s.unpack(str[start:end])"));
            }
            WireOp::ReadLengthPrefixed { var } => {
                self.line(level, "start = end");
                self.line(level, "end += length");
                self.line(level, format!("{var} = str[start:end]"));
            }
            WireOp::ReadBytes { var, len } => {
                self.line(level, "start = end");
                self.line(level, format!("end += {len}"));
                self.line(level, format!("{var} = str[start:end]"));
            }
            WireOp::BranchOnContainerKind {
                var,
                sequence,
                otherwise,
            } => {
                self.line(level, format!("if type({var}) in [list, tuple]:"));
                self.ops(sequence, level + 1);
                self.line(level, "else:");
                self.ops(otherwise, level + 1);
            }
            WireOp::Construct { var, constructor } => {
                self.line(level, format!("if {var} is None:"));
                self.line(
                    level + 1,
                    format!("{var} = {}", render_constructor(constructor)),
                );
            }
            WireOp::Normalize { expr } => self.line(level, expr),
            WireOp::CoerceBool { var, elementwise } => {
                if *elementwise {
                    self.line(level, format!("{var} = list(map(bool, {var}))"));
                } else {
                    self.line(level, format!("{var} = bool({var})"));
                }
            }
            WireOp::CheckLength { var, len } => {
                self.line(level, format!("if len({var}) != {len}:"));
                self.line(
                    level + 1,
                    format!(
                        "self._check_types(ValueError(\"Expecting %s items but found %s when writing '%s'\" % ({len}, len({var}), '{var}')))"
                    ),
                );
            }
            WireOp::ForEach { var, item, body } => {
                self.line(level, format!("for {item} in {var}:"));
                self.ops(body, level + 1);
            }
            WireOp::Collect {
                var,
                item,
                count,
                constructor,
                body,
            } => {
                let count = match count {
                    Count::Length => "length".to_string(),
                    Count::Fixed(n) => n.to_string(),
                };
                self.line(level, format!("{var} = []"));
                self.line(level, format!("for i in range(0, {count}):"));
                if let Some(constructor) = constructor {
                    self.line(
                        level + 1,
                        format!("{item} = {}", render_constructor(constructor)),
                    );
                }
                self.ops(body, level + 1);
                self.line(level + 1, format!("{var}.append({item})"));
            }
        }
    }
}
