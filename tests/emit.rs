use asm8::emit::{write_program, Format};
use asm8::{assemble, AsmConfig};
use pretty_assertions::assert_eq;

const SRC: &str = ".text\nldi A 0x1A\njmp %end\nend:\nhlt\n.data\nk = 0b101\n";

fn render(format: Format) -> Vec<u8> {
    let p = assemble(SRC, &AsmConfig::default()).unwrap();
    let mut out = Vec::new();
    write_program(&mut out, &p, format).unwrap();
    out
}

#[test]
fn hex_dump_line() {
    let out = String::from_utf8(render(Format::Hex)).unwrap();
    assert_eq!(out, "10 1a 18 04 05 05\n");
}

#[test]
fn empty_program_prints_empty_line() {
    let p = assemble(".text\n", &AsmConfig::default()).unwrap();
    let mut out = Vec::new();
    write_program(&mut out, &p, Format::Hex).unwrap();
    assert_eq!(out, b"\n");
}

#[test]
fn raw_bytes() {
    assert_eq!(render(Format::Bin), vec![0x10, 0x1A, 0x18, 0x04, 0x05, 0x05]);
}

#[test]
fn json_report() {
    let v: serde_json::Value = serde_json::from_slice(&render(Format::Json)).unwrap();
    assert_eq!(v["bytes"], serde_json::json!([16, 26, 24, 4, 5, 5]));
    assert_eq!(v["symbols"]["end"]["addr"], 4);
    assert_eq!(v["symbols"]["end"]["kind"], "label");
    assert_eq!(v["symbols"]["k"]["addr"], 5);
    assert_eq!(v["symbols"]["k"]["kind"], "data");
    assert_eq!(v["diagnostics"], serde_json::json!([]));
}
