use anyhow::Result;
use bdnet2verilog::{translate_str, Error, Options};
use pretty_assertions::assert_eq;
use std::fs;

fn fixture(name: &str) -> Result<String> {
    Ok(fs::read_to_string(format!(
        "{}/tests/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    ))?)
}

fn no_power() -> Options {
    Options {
        implicit_power: false,
        ..Options::default()
    }
}

#[test]
fn inverter() -> Result<()> {
    let v = translate_str(&fixture("top.bdnet")?, &Options::default())?;
    assert_eq!(
        v,
        "module top ( VSS, VDD, in1, out1);\n\
         input VSS, VDD; input in1;\n\
         output out1;\n\
         \tinv1 u1 ( .VSS(VSS), .VDD(VDD), .A(in1), .Y(out1) );\n\
         endmodule\n"
    );
    Ok(())
}

#[test]
fn inverter_without_power_pins() -> Result<()> {
    let v = translate_str(&fixture("top.bdnet")?, &no_power())?;
    assert!(!v.contains("VSS") && !v.contains("VDD"));
    assert_eq!(
        v,
        "module top (in1, out1);\n\
         input in1;\n\
         output out1;\n\
         \tinv1 u1 ( .A(in1), .Y(out1) );\n\
         endmodule\n"
    );
    Ok(())
}

#[test]
fn quoted_buses() -> Result<()> {
    let v = translate_str(&fixture("adder2.bdnet")?, &Options::default())?;
    assert_eq!(
        v,
        "module adder2 ( VSS, VDD, a, b, cin, s, cout);\n\
         input VSS, VDD; input cin;\n\
         output cout;\n\
         input [1:0] a;\n\
         input [1:0] b;\n\
         output [1:0] s;\n\
         \tfa u1 ( .VSS(VSS), .VDD(VDD), .A(a[0]), .B(b[0]), .CI(cin), .S(s[0]), .CO(_n12) );\n\
         \tfa u2 ( .VSS(VSS), .VDD(VDD), .A(a[1]), .B(b[1]), .CI(_n12), .S(s[1]), .CO(cout) );\n\
         endmodule\n"
    );
    Ok(())
}

#[test]
fn instance_case() -> Result<()> {
    let src = "MODEL m\nINSTANCE INV1:\nA :  x\nENDMODEL\n";

    let v = translate_str(src, &no_power())?;
    assert!(v.contains("\tinv1 u1 ( .A(x) );\n"), "{}", v);

    let keep = Options {
        preserve_case: true,
        ..no_power()
    };
    let v = translate_str(src, &keep)?;
    assert!(v.contains("\tINV1 u1 ( .A(x) );\n"), "{}", v);
    Ok(())
}

#[test]
fn bus_range_is_the_largest_index() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               A<2> :  a2\n\
               A[0] :  a0\n\
               A<5> :  a5;\n\
               OUTPUT\n\
               Y :  y;\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(
        v,
        "module m (A, Y);\n\
         output Y;\n\
         input [5:0] A;\n\
         endmodule\n"
    );
    assert_eq!(v.matches("input [5:0] A;").count(), 1);
    Ok(())
}

#[test]
fn connections_use_declared_names() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               d :  nd;\n\
               OUTPUT\n\
               q<3>x :  nq;\n\
               INSTANCE dff:\n\
               D :  nd\n\
               Q :  nq\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert!(v.contains("\tdff u1 ( .D(d), .Q(q[3]) );\n"), "{}", v);
    assert!(v.contains("output [3:0] q;\n"), "{}", v);
    Ok(())
}

#[test]
fn internal_nets_are_sanitized() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               a :  na;\n\
               OUTPUT\n\
               y :  ny;\n\
               INSTANCE and2:\n\
               A :  7_foo\n\
               B :  n$1[2]\n\
               C :  \"12\";\n\
               Y :  ny\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert!(
        v.contains("\tand2 u1 ( .A(N_7_foo), .B(n_1_2_), .C(N_12), .Y(y) );\n"),
        "{}",
        v
    );
    Ok(())
}

#[test]
fn each_model_starts_fresh() -> Result<()> {
    let src = "MODEL one\n\
               INPUT\n\
               a<1> :  a1;\n\
               OUTPUT\n\
               y :  ny;\n\
               INSTANCE buf:\n\
               A :  a1\n\
               ENDMODEL\n\
               MODEL two\n\
               INPUT\n\
               b :  a1;\n\
               OUTPUT\n\
               z :  nz;\n\
               INSTANCE buf:\n\
               A :  a1\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(
        v,
        "module one (a, y);\n\
         output y;\n\
         input [1:0] a;\n\
         \tbuf u1 ( .A(a[1]) );\n\
         endmodule\n\
         module two (b, z);\n\
         input b;\n\
         output z;\n\
         \tbuf u1 ( .A(b) );\n\
         endmodule\n"
    );
    Ok(())
}

#[test]
fn header_closes_without_output_block() -> Result<()> {
    let src = "MODEL m\nINPUT\na :  na;\nINSTANCE t:\nA :  na\nENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(v, "module m (a);\ninput a;\n\tt u1 ( .A(a) );\nendmodule\n");
    Ok(())
}

#[test]
fn blank_line_ends_a_block() -> Result<()> {
    let src = "MODEL m\nINPUT\na :  na\nb :  nb\n\nOUTPUT\ny :  ny\n\nENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(
        v,
        "module m (a, b, y);\ninput a;\ninput b;\noutput y;\nendmodule\n"
    );
    Ok(())
}

#[test]
fn unreadable_lines() -> Result<()> {
    let src = "MODEL m\nINPUT\na :  na\nthis is junk\nb :  nb;\nOUTPUT\ny :  ny;\nENDMODEL\n";

    let v = translate_str(src, &no_power())?;
    assert!(v.starts_with("module m (a, b, y);\n"), "{}", v);

    let strict = Options {
        strict: true,
        ..no_power()
    };
    match translate_str(src, &strict) {
        Err(Error::UnmatchedRecord { line, text }) => {
            assert_eq!(line, 4);
            assert_eq!(text, "this is junk");
        }
        other => panic!("expected an unmatched record error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn broken_bus_index() {
    let src = "MODEL m\nINPUT\na<3 :  na;\n";
    match translate_str(src, &Options::default()) {
        Err(Error::UnmatchedBracket { line: 3, .. }) => {}
        other => panic!("expected an unmatched bracket error, got {:?}", other),
    }
}

#[test]
fn input_rename_is_seen_by_outputs() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               x :  n;\n\
               OUTPUT\n\
               y :  n;\n\
               INSTANCE buf:\n\
               A :  n\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert!(v.contains("\tbuf u1 ( .A(x) );\n"), "{}", v);

    // a bus bit found among the inputs is matched against outputs as `d[1]`
    let src = "MODEL m\n\
               INPUT\n\
               d<1>junk :  n;\n\
               OUTPUT\n\
               q :  d[1];\n\
               INSTANCE buf:\n\
               A :  n\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert!(v.contains("\tbuf u1 ( .A(q) );\n"), "{}", v);
    Ok(())
}

#[test]
fn cell_names_may_contain_keywords() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               a :  na;\n\
               OUTPUT\n\
               y :  ny;\n\
               INSTANCE \"INPUT_PAD\":physical\n\
               A :  na\n\
               Y :  ny\n\
               \n\
               INSTANCE OUTPUT_BUF:\n\
               A :  ny\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(
        v,
        "module m (a, y);\n\
         input a;\n\
         output y;\n\
         \tinput_pad u1 ( .A(a), .Y(y) );\n\
         \toutput_buf u2 ( .A(y) );\n\
         endmodule\n"
    );
    Ok(())
}

#[test]
fn quoted_port_names_with_colons() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               \"a:b\" :  na;\n\
               OUTPUT\n\
               y :  ny;\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(v, "module m (a:b, y);\ninput a:b;\noutput y;\nendmodule\n");
    Ok(())
}

#[test]
fn whitespace_lines_inside_blocks() -> Result<()> {
    let src = "MODEL m\nINPUT\na :  na\n   \n\t\nb :  nb;\nOUTPUT\ny :  ny;\nENDMODEL\n";
    let strict = Options {
        strict: true,
        ..no_power()
    };
    let v = translate_str(src, &strict)?;
    assert_eq!(
        v,
        "module m (a, b, y);\ninput a;\ninput b;\noutput y;\nendmodule\n"
    );
    Ok(())
}

#[test]
fn late_port_lists_only_remap() -> Result<()> {
    let src = "MODEL m\n\
               INPUT\n\
               a :  na;\n\
               OUTPUT\n\
               y :  ny;\n\
               INPUT\n\
               late :  nl;\n\
               INSTANCE t:\n\
               A :  nl\n\
               ENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(
        v,
        "module m (a, y);\n\
         input a;\n\
         output y;\n\
         \tt u1 ( .A(late) );\n\
         endmodule\n"
    );

    // before any MODEL nothing is written
    let v = translate_str("INPUT\na :  na;\n", &no_power())?;
    assert_eq!(v, "");
    Ok(())
}

#[test]
fn unnamed_instance_still_counts() -> Result<()> {
    let src = "MODEL m\nINSTANCE\nINSTANCE inv:\nA :  x\nENDMODEL\n";
    let v = translate_str(src, &no_power())?;
    assert_eq!(v, "module m ();\n\tinv u2 ( .A(x) );\nendmodule\n");
    Ok(())
}
