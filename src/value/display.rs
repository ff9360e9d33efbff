use std::fmt::{self, Display, Formatter};

use super::{List, Node, Value};

const INDENT: usize = 4;

/// Indented dump of the tree, one tag per line:
///
/// ```text
/// Compound("Data") {
///     String("LevelName"): "world"
///     List("Pos") of Double [
///         Double: 1.5
///     ]
/// }
/// ```
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind(), self.name)?;
        write_value(f, &self.value, 0)
    }
}

fn write_value(f: &mut Formatter<'_>, value: &Value, indent: usize) -> fmt::Result {
    match value {
        Value::Compound(children) => {
            f.write_str(" {\n")?;
            for child in children {
                let inner = indent + INDENT;
                write!(f, "{:inner$}{}({:?})", "", child.kind(), child.name, inner = inner)?;
                write_value(f, &child.value, inner)?;
            }
            writeln!(f, "{:indent$}}}", "", indent = indent)
        }
        Value::List(list) => write_list(f, list, indent),
        Value::Byte(v) => writeln!(f, ": {}", v),
        Value::Short(v) => writeln!(f, ": {}", v),
        Value::Int(v) => writeln!(f, ": {}", v),
        Value::Long(v) => writeln!(f, ": {}", v),
        Value::Float(v) => writeln!(f, ": {}", v),
        Value::Double(v) => writeln!(f, ": {}", v),
        Value::String(v) => writeln!(f, ": {:?}", v),
        Value::ByteArray(v) => writeln!(f, ": {:?}", v),
        Value::IntArray(v) => writeln!(f, ": {:?}", v),
        Value::LongArray(v) => writeln!(f, ": {:?}", v),
    }
}

fn write_list(f: &mut Formatter<'_>, list: &List, indent: usize) -> fmt::Result {
    writeln!(f, " of {} [", list.element())?;
    for item in list {
        let inner = indent + INDENT;
        write!(f, "{:inner$}{}", "", item.tag(), inner = inner)?;
        write_value(f, item, inner)?;
    }
    writeln!(f, "{:indent$}]", "", indent = indent)
}
