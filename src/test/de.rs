use super::builder::Builder;
use crate::error::{ErrorKind, Result};
use crate::{decode, decode_with_opts, from_bytes, from_bytes_with_opts, DeOpts, Node, Tag, TextPolicy, Value};

#[test]
fn simple_byte() -> Result<()> {
    let payload = Builder::new().byte("abc", 123).build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.name(), "abc");
    assert_eq!(node.value(), &Value::Byte(123));
    Ok(())
}

#[test]
fn all_scalars_in_compound() -> Result<()> {
    let payload = Builder::new()
        .start_compound("object")
        .byte("b", -1)
        .short("s", 1234)
        .int("i", -50345)
        .long("l", i32::MAX as i64 + 1)
        .float("f", 1.23)
        .double("d", 1.23456)
        .string("str", "something")
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.kind(), Tag::Compound);
    assert_eq!(node.name(), "object");
    let values: Vec<_> = node.children().iter().map(|c| (c.name(), c.value().clone())).collect();
    assert_eq!(
        values,
        vec![
            ("b", Value::Byte(-1)),
            ("s", Value::Short(1234)),
            ("i", Value::Int(-50345)),
            ("l", Value::Long(i32::MAX as i64 + 1)),
            ("f", Value::Float(1.23)),
            ("d", Value::Double(1.23456)),
            ("str", Value::String("something".to_owned())),
        ]
    );
    Ok(())
}

#[test]
fn long_keeps_full_precision() -> Result<()> {
    let payload = Builder::new()
        .tag(Tag::Long)
        .name("max")
        .raw(&[0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff])
        .build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.value(), &Value::Long(i64::MAX));
    Ok(())
}

#[test]
fn long_beyond_double_precision() -> Result<()> {
    // 2^53 + 1 is the first integer a double cannot hold.
    let v = (1i64 << 53) + 1;
    let payload = Builder::new().long("l", v).build();

    assert_eq!(from_bytes(&payload)?.value().as_i64(), Some(v));
    Ok(())
}

#[test]
fn empty_compound() -> Result<()> {
    let payload = Builder::new().start_compound("").end_compound().build();

    let decoded = decode(&payload)?;

    assert_eq!(decoded.node, Node::compound("", vec![]));
    // tag, two bytes of name length, then the single End byte.
    assert_eq!(decoded.consumed, 4);
    assert_eq!(decoded.trailing, 0);
    Ok(())
}

#[test]
fn empty_list_keeps_element_tag() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("ints", Tag::Int, 0)
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;
    let list = node.get("ints").unwrap().value().as_list().unwrap();

    assert!(list.is_empty());
    assert_eq!(list.element(), Tag::Int);
    Ok(())
}

#[test]
fn negative_list_length_is_empty() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("l", Tag::Compound, -5)
        .int("after", 1)
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;
    let list = node.get("l").unwrap().value().as_list().unwrap();

    assert!(list.is_empty());
    assert_eq!(list.element(), Tag::Compound);
    assert_eq!(node.get("after").unwrap().value(), &Value::Int(1));
    Ok(())
}

#[test]
fn negative_array_length_is_empty() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::IntArray)
        .name("a")
        .length(-1)
        .tag(Tag::ByteArray)
        .name("b")
        .length(i32::MIN)
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.get("a").unwrap().value(), &Value::IntArray(vec![]));
    assert_eq!(node.get("b").unwrap().value(), &Value::ByteArray(vec![]));
    Ok(())
}

#[test]
fn list_of_end_when_empty() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("empty", Tag::End, 0)
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;
    let list = node.get("empty").unwrap().value().as_list().unwrap();

    assert_eq!(list.element(), Tag::End);
    assert!(list.is_empty());
    Ok(())
}

#[test]
fn list_of_end_with_elements_errors() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("", Tag::End, 1)
        .tag(Tag::End)
        .end_compound()
        .build();

    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EndInList);
}

#[test]
fn arrays() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .byte_array("bytes", &[1, -2, 3])
        .int_array("ints", &[1, i32::MIN, i32::MAX])
        .long_array("longs", &[i64::MIN, 0, i64::MAX])
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.get("bytes").unwrap().value(), &Value::ByteArray(vec![1, -2, 3]));
    assert_eq!(node.get("ints").unwrap().value(), &Value::IntArray(vec![1, i32::MIN, i32::MAX]));
    assert_eq!(node.get("longs").unwrap().value(), &Value::LongArray(vec![i64::MIN, 0, i64::MAX]));
    Ok(())
}

#[test]
fn nested_list_of_compounds() -> Result<()> {
    let payload = Builder::new()
        .start_compound("root")
        .start_list("items", Tag::Compound, 3)
        .string("id", "a")
        .end_compound()
        .string("id", "b")
        .end_compound()
        .string("id", "c")
        .end_compound()
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.children().len(), 1);
    let items = node.get("items").unwrap().value().as_list().unwrap();
    assert_eq!(items.element(), Tag::Compound);

    let ids: Vec<_> = items
        .iter()
        .map(|item| {
            let children = item.as_compound().unwrap();
            assert_eq!(children.len(), 1);
            children[0].value().as_str().unwrap().to_owned()
        })
        .collect();
    assert_eq!(ids, ["a", "b", "c"]);
    Ok(())
}

#[test]
fn list_of_lists() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("outer", Tag::List, 2)
        .list_header(Tag::Short, 2)
        .value(1i16)
        .value(2i16)
        .list_header(Tag::String, 1)
        .text_bytes(b"x")
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;
    let outer = node.get("outer").unwrap().value().as_list().unwrap();

    let first = outer.items()[0].as_list().unwrap();
    let second = outer.items()[1].as_list().unwrap();
    assert_eq!(first.items(), &[Value::Short(1), Value::Short(2)]);
    assert_eq!(second.element(), Tag::String);
    assert_eq!(second.items(), &[Value::String("x".to_owned())]);
    Ok(())
}

#[test]
fn duplicate_names_kept_in_order() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .int("a", 1)
        .int("b", 2)
        .int("a", 3)
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;

    let names: Vec<_> = node.children().iter().map(Node::name).collect();
    assert_eq!(names, ["a", "b", "a"]);
    assert_eq!(node.get("a").unwrap().value(), &Value::Int(1));
    let all: Vec<_> = node.get_all("a").map(|n| n.value().clone()).collect();
    assert_eq!(all, [Value::Int(1), Value::Int(3)]);
    Ok(())
}

#[test]
fn many_siblings_do_not_recurse() -> Result<()> {
    let count = 100_000;
    let mut builder = Builder::new()
        .start_compound("")
        .start_list("l", Tag::Compound, count);
    for _ in 0..count {
        builder = builder.byte("b", 1).end_compound();
    }
    let payload = builder.end_compound().build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.get("l").unwrap().value().as_list().unwrap().len(), count as usize);
    Ok(())
}

#[test]
fn trailing_bytes_are_reported() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .end_compound()
        .raw(&[1, 2, 3])
        .build();

    let decoded = decode(&payload)?;

    assert_eq!(decoded.consumed, 4);
    assert_eq!(decoded.trailing, 3);
    Ok(())
}

#[test]
fn unicode_names_and_strings() -> Result<()> {
    let payload = Builder::new()
        .start_compound("ünïcödé")
        .string("😈", "日本語")
        .end_compound()
        .build();

    let node = from_bytes(&payload)?;

    assert_eq!(node.name(), "ünïcödé");
    assert_eq!(node.get("😈").unwrap().value().as_str(), Some("日本語"));
    Ok(())
}

#[test]
fn empty_input_underruns() {
    let err = from_bytes(&[]).unwrap_err();
    assert!(err.is_underrun());
    assert_eq!(err.offset(), Some(0));
}

#[test]
fn truncated_string_underruns() {
    let payload = Builder::new()
        .tag(Tag::String)
        .name("s")
        .truncated_text(10, b"abc")
        .build();

    let err = from_bytes(&payload).unwrap_err();

    assert_eq!(
        err.kind(),
        &ErrorKind::BufferUnderrun {
            needed: 10,
            remaining: 3
        }
    );
    // tag, name length, name, string length.
    assert_eq!(err.offset(), Some(6));
}

#[test]
fn truncated_scalar_underruns() {
    let payload = Builder::new()
        .start_compound("")
        .int("i", 1)
        .build();

    for cut in 0..payload.len() {
        let err = from_bytes(&payload[..cut]).unwrap_err();
        assert!(err.is_underrun(), "cut at {}: {}", cut, err);
    }

    // No End tag for the compound.
    assert!(from_bytes(&payload).unwrap_err().is_underrun());
}

#[test]
fn huge_declared_length_fails_without_allocating() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::LongArray)
        .name("a")
        .length(i32::MAX)
        .value(1i64)
        .end_compound()
        .build();

    let err = from_bytes(&payload).unwrap_err();
    assert!(err.is_underrun());
}

#[test]
fn unknown_tag_reports_offset() {
    let payload = Builder::new()
        .start_compound("")
        .int("i", 1)
        .unknown_tag(13)
        .build();

    let err = from_bytes(&payload).unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::UnknownTag(13));
    // compound header is 3 bytes, the int tag 1 + 2 + 1 + 4.
    assert_eq!(err.offset(), Some(11));
}

#[test]
fn unknown_root_tag() {
    let err = from_bytes(&[13, 0, 0]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownTag(13));
    assert_eq!(err.offset(), Some(0));
}

#[test]
fn unknown_list_element_tag_even_when_empty() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::List)
        .name("l")
        .unknown_tag(200)
        .length(0)
        .end_compound()
        .build();

    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownTag(200));
}

#[test]
fn end_root_is_no_root() {
    let err = from_bytes(&[0]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NoRoot);
}

#[test]
fn invalid_utf8_is_rejected_by_default() {
    let payload = Builder::new()
        .start_compound("")
        .string_bytes("s", &[255, 255, 255])
        .end_compound()
        .build();

    let err = from_bytes(&payload).unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::MalformedText(vec![255, 255, 255]));
    assert_eq!(err.offset(), Some(7));
}

#[test]
fn invalid_utf8_lossy_carries_on() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .string_bytes("s", &[b'a', 255, b'b'])
        .int("after", 5)
        .end_compound()
        .build();

    let node = from_bytes_with_opts(&payload, DeOpts::new().text(TextPolicy::Lossy))?;

    assert_eq!(node.get("s").unwrap().value().as_str(), Some("a\u{FFFD}b"));
    assert_eq!(node.get("after").unwrap().value(), &Value::Int(5));
    Ok(())
}

fn nested_compounds(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new();
    for _ in 0..depth {
        builder = builder.start_compound("c");
    }
    for _ in 0..depth {
        builder = builder.end_compound();
    }
    builder.build()
}

#[test]
fn depth_within_limit() -> Result<()> {
    let payload = nested_compounds(8);

    let root = from_bytes_with_opts(&payload, DeOpts::new().max_depth(8))?;
    let mut node = &root;
    let mut depth = 1;
    while let Some(child) = node.get("c") {
        node = child;
        depth += 1;
    }
    assert_eq!(depth, 8);
    Ok(())
}

#[test]
fn depth_beyond_limit() {
    let payload = nested_compounds(9);

    let err = decode_with_opts(&payload, DeOpts::new().max_depth(8)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit(8));
}

fn nested_lists(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new().start_list("l", Tag::List, 1);
    for _ in 2..depth {
        builder = builder.list_header(Tag::List, 1);
    }
    builder.list_header(Tag::Byte, 0).build()
}

// The default depth limit is sized for this.
fn on_small_stack<F: FnOnce() + Send + 'static>(f: F) {
    std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn default_depth_limit_fits_small_stack() {
    on_small_stack(|| {
        let limit = DeOpts::default().max_depth;

        assert!(from_bytes(&nested_compounds(limit)).is_ok());
        assert!(from_bytes(&nested_lists(limit)).is_ok());

        for payload in [nested_compounds(limit + 1), nested_lists(limit + 1)] {
            let err = from_bytes(&payload).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DepthLimit(limit));
        }
    });
}

#[test]
fn very_deep_input_fails_cleanly() {
    on_small_stack(|| {
        let err = from_bytes(&nested_compounds(5000)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DepthLimit(128));

        let err = from_bytes(&nested_lists(5000)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DepthLimit(128));
    });
}

#[test]
fn nested_lists_count_towards_depth() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("l", Tag::List, 1)
        .list_header(Tag::List, 1)
        .list_header(Tag::Byte, 0)
        .end_compound()
        .build();

    assert!(from_bytes_with_opts(&payload, DeOpts::new().max_depth(4)).is_ok());
    let err = from_bytes_with_opts(&payload, DeOpts::new().max_depth(3)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit(3));
}

#[test]
fn max_seq_len() {
    let payload = Builder::new()
        .start_compound("")
        .int_array("a", &[1, 2, 3])
        .end_compound()
        .build();

    assert!(from_bytes_with_opts(&payload, DeOpts::new().max_seq_len(3)).is_ok());
    let err = from_bytes_with_opts(&payload, DeOpts::new().max_seq_len(2)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::SeqTooLong(3));
}
