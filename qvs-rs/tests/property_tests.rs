use proptest::prelude::*;
use qvs::script::{normalize, segment, Interpreter, Step, Value};

/// A piece of a script line: a statement or a comment of any style.
fn fragment() -> impl Strategy<Value = String> {
    let name = "[a-z][a-z0-9_]{0,6}";
    prop_oneof![
        (prop_oneof![Just("LET"), Just("SET"), Just("let")], name, "[0-9]{1,6}")
            .prop_map(|(kw, n, v)| format!("{kw} {n} = {v};")),
        (name, "[a-z ]{0,12}").prop_map(|(n, s)| format!("SET {n} = '{s}';")),
        (name, "[a-z:/]{0,12}").prop_map(|(n, s)| format!("SET {n} = 'lib://{s}';")),
        "[a-z ]{0,12}".prop_map(|c| format!("// {c}")),
        "[a-z ;]{0,12}".prop_map(|c| format!("REM {c}")),
        "[a-z ;]{0,12}".prop_map(|c| format!("/* {c} */")),
        Just("/".to_owned()),
        Just("*".to_owned()),
    ]
}

/// One physical line: a few fragments, so that block comments, `REM` and
/// statements can share a line in any order.
fn line() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(fragment(), 1..4),
        prop_oneof![Just(""), Just(" "), Just("\t")],
    )
        .prop_map(|(parts, sep)| parts.join(sep))
}

fn script() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line(), 0..20)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(lines in script()) {
        let once = normalize(&lines.join("\n"));
        prop_assert_eq!(normalize(&once), once);
    }
}

proptest! {
    #[test]
    fn line_endings_do_not_matter(lines in script()) {
        let lf = normalize(&lines.join("\n"));
        prop_assert_eq!(&normalize(&lines.join("\r\n")), &lf);
        prop_assert_eq!(&normalize(&lines.join("\r")), &lf);
    }
}

proptest! {
    #[test]
    fn normalized_text_is_one_line(s in "\\PC*") {
        let out = normalize(&s);
        prop_assert!(!out.contains('\n'));
        prop_assert!(!out.contains('\r'));
        prop_assert!(!out.contains('\t'));
    }
}

proptest! {
    /// k terminators always give k statements.
    #[test]
    fn one_statement_per_terminator(s in "\\PC*") {
        prop_assert_eq!(segment(&s).len(), s.matches(';').count());
    }
}

proptest! {
    /// The loop halts after exactly one step per statement, whatever the
    /// statements contain.
    #[test]
    fn loop_halts_after_statement_count(s in "[a-zA-Z0-9 =;$()'.:]{0,80}") {
        let mut interp = Interpreter::new();
        let mut run = interp.start(&s);
        let expected = run.statements().len();
        let mut steps = 0;
        while run.step() != Step::Halted {
            steps += 1;
            prop_assert!(steps <= expected);
        }
        prop_assert_eq!(steps, expected);
    }
}

proptest! {
    /// Arbitrary input never panics and never yields more diagnostics than
    /// statements.
    #[test]
    fn interpreter_does_not_panic(s in "\\PC*") {
        let mut interp = Interpreter::new();
        let statements = segment(&normalize(&s)).len();
        let diags = interp.exec_script(&s);
        prop_assert!(diags.len() <= statements);
        prop_assert!(diags.windows(2).all(|w| w[0].index < w[1].index));
    }
}

proptest! {
    #[test]
    fn digit_assignment_is_integer(name in "[a-zA-Z][a-zA-Z0-9_.]{0,8}", n in 0i64..=i64::MAX) {
        let mut interp = Interpreter::new();
        let diags = interp.exec_script(&format!("LET {name} = {n};"));
        prop_assert!(diags.is_empty());
        prop_assert_eq!(interp.get_var(&name), Some(&Value::Int(n)));
    }
}

proptest! {
    /// Every garbage statement is reported once, at its own index; blank
    /// statements between them are not.
    #[test]
    fn one_diagnostic_per_unmatched_statement(blanks in prop::collection::vec(0usize..3, 1..10)) {
        let mut src = String::new();
        let mut expected = Vec::new();
        let mut index = 0;
        for b in &blanks {
            for _ in 0..*b {
                src.push_str(" ;");
                index += 1;
            }
            src.push_str("junk;");
            expected.push(index);
            index += 1;
        }
        let mut interp = Interpreter::new();
        let got: Vec<usize> = interp.exec_script(&src).into_iter().map(|d| d.index).collect();
        prop_assert_eq!(got, expected);
    }
}
