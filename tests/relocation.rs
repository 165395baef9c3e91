use asm8::{assemble, AsmConfig, Diagnostic, SymbolKind};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
; counts down from a data value
.text
start:
    ldi A 0x05      ; 0
    jmp %skip       ; 2
    hlt             ; 4
skip:
    add A %counter  ; 5
    push B          ; 8
    hlt             ; 9
.data
counter = 3         ; 10
";

#[test]
fn forward_reference_resolves() {
    let p = assemble(PROGRAM, &AsmConfig::default()).unwrap();
    assert_eq!(
        p.bytes,
        vec![0x10, 0x05, 0x18, 0x05, 0x05, 0x40, 0x00, 0x0A, 0x21, 0x05, 0x03]
    );
    assert_eq!(p.symbols.addr("start"), Some(0));
    assert_eq!(p.symbols.addr("skip"), Some(5));
    assert_eq!(p.symbols.addr("counter"), Some(10));
    assert!(p.diagnostics.is_empty());
}

#[test]
fn assembly_is_deterministic() {
    let a = assemble(PROGRAM, &AsmConfig::default()).unwrap();
    let b = assemble(PROGRAM, &AsmConfig::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn data_follows_text_in_declaration_order() {
    let src = ".data\nx = 1\n.text\nnop\nnop\n.data\ny = 2\nz = 0x30\n";
    let p = assemble(src, &AsmConfig::default()).unwrap();
    assert_eq!(p.bytes, vec![0x00, 0x00, 0x01, 0x02, 0x30]);
    assert_eq!(p.symbols.addr("x"), Some(2));
    assert_eq!(p.symbols.addr("y"), Some(3));
    assert_eq!(p.symbols.addr("z"), Some(4));
}

#[test]
fn reordering_data_keeps_text_image() {
    let a = ".text\nadd A %x %y\n.data\nx = 1\ny = 2\n";
    let b = ".text\nadd A %x %y\n.data\ny = 2\nx = 1\n";
    let pa = assemble(a, &AsmConfig::default()).unwrap();
    let pb = assemble(b, &AsmConfig::default()).unwrap();
    assert_eq!(&pa.bytes[..2], &pb.bytes[..2]);
    assert_eq!(pa.bytes, vec![0x40, 0x00, 0x04, 0x05, 0x01, 0x02]);
    assert_eq!(pb.bytes, vec![0x40, 0x00, 0x05, 0x04, 0x02, 0x01]);
}

#[test]
fn undefined_symbol_becomes_zero_and_is_reported() {
    let src = ".text\njmp %nowhere\nhlt\n";
    let p = assemble(src, &AsmConfig::default()).unwrap();
    assert_eq!(p.bytes, vec![0x18, 0x00, 0x05]);
    assert_eq!(
        p.diagnostics,
        vec![Diagnostic::UndefinedSymbol {
            name: "nowhere".into(),
            addr: 1
        }]
    );
}

#[test]
fn label_shadows_data_symbol() {
    let src = ".text\nnop\nv:\njmp %v\n.data\nv = 7\n";
    let p = assemble(src, &AsmConfig::default()).unwrap();
    // data cell is still placed, but `v` names the label
    assert_eq!(p.bytes, vec![0x00, 0x18, 0x01, 0x07]);
    let v = p.symbols.get("v").unwrap();
    assert_eq!(v.addr, 1);
    assert_eq!(v.kind, SymbolKind::Label);
}

#[test]
fn redefinitions_overwrite() {
    let src = ".text\na:\nnop\na:\njmp %a\n.data\nd = 1\nd = 2\n";
    let p = assemble(src, &AsmConfig::default()).unwrap();
    assert_eq!(p.bytes, vec![0x00, 0x18, 0x01, 0x02]);
    assert_eq!(p.symbols.addr("d"), Some(3));
}

#[test]
fn data_accepts_negative_decimal() {
    let src = ".data\nm = -2\n.text\nnop\n";
    let p = assemble(src, &AsmConfig::default()).unwrap();
    assert_eq!(p.bytes, vec![0x00, 0xFE]);
}
