use crate::util::test_utils::{compile_ok, tree_tests};

tree_tests!(
    use compiler;

    fn test_addition() {
        let program = "type x = 1 + 2";
        let output_ok = "
            import { type Add } from \"tartak/math\";

            type x = (1 extends infer temp_1 extends number ? 2 extends infer temp_2 extends number ? (Add<temp_1, temp_2>) : never : never);
        ";
    }

    fn test_comparison_is_normalized() {
        let program = "type t = 1 < 2";
        let output_ok = "
            import { type Lt } from \"tartak/math\";

            type t = (1 extends infer temp_1 extends number ? 2 extends infer temp_2 extends number ? (Lt<temp_1, temp_2> extends 1 ? true : false) : never : never);
        ";
    }

    fn test_boolean_operators() {
        let program = "type t = !(1 == 2) || true";
        let output_ok = "
            import { type Booleans, type Call } from \"tartak/hot\";

            type t = (((1 extends infer temp_1 ? 2 extends infer temp_2 ? (Call<Booleans.Equals, temp_1, temp_2>) : never : never) extends infer temp_3 ? (Call<Booleans.Not<temp_3>>) : never) extends infer temp_4 ? true extends infer temp_5 ? (Call<Booleans.Or<temp_4, temp_5>>) : never : never);
        ";
    }

    fn test_unary_plus_is_numeric_identity() {
        let program = "type p = +1";
        let output_ok = "
            type p = (1 extends infer temp_1 extends number ? (temp_1) : never);
        ";
    }

    fn test_method_call() {
        let program = "type t = [2, 1, 3].sort()";
        let output_ok = "
            import { type Sort } from \"tartak/prelude\";

            type t = (Sort<[2, 1, 3]>);
        ";
    }

    fn test_unsupported_method() {
        let program = "type t = x.frobnicate()";
        let expected_errors = &["1:10: unsupported method `frobnicate`"];
    }

    fn test_items() {
        let program = r#"
            import { Foo } from "./foo"
            export type t = [3, 1, 2].take(2)
            type n = -1
            #[s] :{
              let x = 1
              x
            }
        "#;
        let output_ok = r#"
            import { type Negate } from "tartak/math";
            import { type Take } from "tartak/prelude";

            import { Foo } from "./foo";

            export type t = (Take<[3, 1, 2], 2>);

            type n = (1 extends infer temp_1 extends number ? (Negate<temp_1>) : never);

            // s
            namespace s {
              type x = 1;
              type temp_2 = x;
            }
        "#;
    }

    fn test_assertions() {
        let program = r#"
            #[checks] :{
              AssertEqual(1, 1)
              AssertEqual("hi", "hello")
            }
        "#;
        let output_ok = r#"
            import { type Booleans, type Call } from "tartak/hot";
            import { type Expect } from "tartak/prelude";

            // checks
            namespace checks {
              type temp_1 = Expect<Call<Booleans.Equals<1, 1>>>;
              type temp_2 = Expect<Call<Booleans.Equals<"hi", "hello">>>;
            }
        "#;
    }

    fn test_literals() {
        let program = r#"
            type o = { a: 1, b?: 'say "hi"', [k]: string }
            type m = { [K in keys as `get${K}`]?: K }
            type u = (1 | 2) & number
            type c = if a then o.a else o["b"]
        "#;
        let output_ok = r#"
            type o = {"a": 1, "b"?: "say \"hi\"", [k]: string};

            type m = {[K in keys as `get${K}`]?: K};

            type u = ((1 | 2) & number);

            type c = ((a) extends true ? (o)["a"] : (o)["b"]);
        "#;
    }

    fn test_function_definition() {
        let local_program = "type f(a) = a * 2";
        let output_ok = r#"
            import { type Fn, type PartialApply } from "hotscript";
            import { type Multiply } from "ts-arithmetic";

            interface lambda_temp_3 extends Fn {
              return: (this["arg1"] /** a */ extends infer temp_1 extends number ? 2 extends infer temp_2 extends number ? (Multiply<temp_1, temp_2>) : never : never);
            }

            type f = PartialApply<lambda_temp_3, [[]]>;
        "#;
    }

    fn test_local_prelude() {
        let local_program = "type t = [1].head()";
        let output_ok = r#"
            import { type Head } from "@/prelude";

            type t = (Head<[1]>);
        "#;
    }

    fn test_closure_captures_parameter() {
        let program = "type f(a) = (b) => a + b";
        let output_ok = r#"
            import { type Fn, type PartialApply } from "tartak/hot";
            import { type Add } from "tartak/math";

            interface lambda_temp_3 extends Fn {
              return: (this["arg0"][0] /** a */ extends infer temp_1 extends number ? this["arg1"] /** b */ extends infer temp_2 extends number ? (Add<temp_1, temp_2>) : never : never);
            }

            interface lambda_temp_4 extends Fn {
              return: PartialApply<lambda_temp_3, [[this["arg1"] /** a */]]>;
            }

            type f = PartialApply<lambda_temp_4, [[]]>;
        "#;
    }

    fn test_bounded_parameters_guard_body() {
        let program = "type f = (a: number, b) => a";
        let output_ok = r#"
            import { type Fn, type PartialApply } from "tartak/hot";

            interface lambda_temp_1 extends Fn {
              return: [this["arg1"], this["arg2"]] extends [number, unknown] ? this["arg1"] /** a */ : never;
            }

            type f = PartialApply<lambda_temp_1, [[]]>;
        "#;
    }

    fn test_static_arity() {
        let program = "
            type add(a, b) = a + b
            type inc = add(1)
            type three = add(1, 2)
        ";
        let output_ok = r#"
            import { type Fn, type PartialApply, type Apply } from "tartak/hot";
            import { type Add } from "tartak/math";

            interface lambda_temp_3 extends Fn {
              return: (this["arg1"] /** a */ extends infer temp_1 extends number ? this["arg2"] /** b */ extends infer temp_2 extends number ? (Add<temp_1, temp_2>) : never : never);
            }

            type add = PartialApply<lambda_temp_3, [[]]>;

            type inc = ((1) extends infer temp_4 extends (1) ? (PartialApply<add, [temp_4]>) : never);

            type three = ((1) extends infer temp_5 extends (1) ? ((2) extends infer temp_6 extends (2) ? (Apply<add, [temp_5, temp_6]>) : never) : never);
        "#;
    }

    fn test_unknown_arity() {
        let program = "type apply(f, x) = f(x)";
        let output_ok = r#"
            import { type Fn, type PartialApply, type Apply } from "tartak/hot";

            interface lambda_temp_2 extends Fn {
              return: ((this["arg2"] /** x */) extends infer temp_1 extends (this["arg2"] /** x */) ? ((Apply<this["arg1"] /** f */, [temp_1]>) extends never ? (PartialApply<this["arg1"] /** f */, [temp_1]>) : (Apply<this["arg1"] /** f */, [temp_1]>)) : never);
            }

            type apply = PartialApply<lambda_temp_2, [[]]>;
        "#;
    }

    fn test_block() {
        let program = "type t = :{ let a = 1; let b = a; [a, b] }";
        let output_ok = "
            type t = ((1) extends infer a extends (1) ? (((a) extends infer b extends (a) ? ([a, b]) : never)) : never);
        ";
    }

    fn test_block_statement_before_end() {
        let program = "type t = :{ 1; 2 }";
        let expected_errors = &["1:13: only `let` declarations may come before the end of a block"];
    }

    fn test_block_without_result() {
        let program = "type t = :{ let a = 1 }";
        let expected_errors = &["1:13: a block must end with an expression"];
    }

    fn test_assertion_outside_section() {
        let program = "type t = :{ AssertEqual(1, 1) }";
        let expected_errors = &["1:13: `AssertEqual` is only allowed in sections"];
    }

    fn test_assignment_unsupported() {
        let program = "type t = a = 1";
        let expected_errors = &["1:10: assignments can't be compiled"];
    }

    fn test_infer_outside_pattern() {
        let program = "type t = infer X";
        let expected_errors = &["1:10: `infer` is only allowed in match patterns"];
    }

    fn test_match_arms_in_order() {
        let program = r#"type t = match 1 { number -> "first", 1 -> "second" }"#;
        let output_ok = r#"
            import { type Match, type Call, type Fn, type PartialApply } from "tartak/hot";

            interface arm_temp_1 extends Fn {
              return: this["arg1"] extends number ? "first" : never;
            }

            interface arm_temp_2 extends Fn {
              return: this["arg1"] extends 1 ? "second" : never;
            }

            type t = Call<Match<[Match.With<number, PartialApply<arm_temp_1, [[]]>>, Match.With<1, PartialApply<arm_temp_2, [[]]>>]>, 1>;
        "#;
    }

    fn test_match_arm_captures_parameter() {
        let program = "type f(n) = match [1, n] { [infer A extends number, infer B] -> [A, B, n] }";
        let output_ok = r#"
            import { type Fn, type PartialApply, type Match, type Call } from "tartak/hot";

            interface arm_temp_1 extends Fn {
              return: this["arg1"] extends [infer A extends number, infer B] ? [A, B, this["arg0"][0] /** n */] : never;
            }

            interface lambda_temp_2 extends Fn {
              return: Call<Match<[Match.With<[number, any], PartialApply<arm_temp_1, [[this["arg1"] /** n */]]>>]>, [1, this["arg1"] /** n */]>;
            }

            type f = PartialApply<lambda_temp_2, [[]]>;
        "#;
    }

    fn test_lambda_captures_pattern_variable() {
        let program = "type f = match [1] { [infer A] -> () => A }";
        let output_ok = r#"
            import { type Match, type Call, type Fn, type PartialApply } from "tartak/hot";

            interface lambda_temp_1 extends Fn {
              return: this["arg0"][0] /** A */;
            }

            interface arm_temp_2 extends Fn {
              return: this["arg1"] extends [infer A] ? PartialApply<lambda_temp_1, [[A]]> : never;
            }

            type f = Call<Match<[Match.With<[any], PartialApply<arm_temp_2, [[]]>>]>, [1]>;
        "#;
    }

    fn test_nested_match_keeps_outer_bindings() {
        let program = "type f = match [1, 2] { [infer A, infer B] -> match A { 1 -> B } }";
        let output_ok = r#"
            import { type Match, type Call, type Fn, type PartialApply } from "tartak/hot";

            interface arm_temp_1 extends Fn {
              return: this["arg1"] extends 1 ? this["arg0"][1] /** B */ : never;
            }

            interface arm_temp_2 extends Fn {
              return: this["arg1"] extends [infer A, infer B] ? Call<Match<[Match.With<1, PartialApply<arm_temp_1, [[A, B]]>>]>, A> : never;
            }

            type f = Call<Match<[Match.With<[any, any], PartialApply<arm_temp_2, [[]]>>]>, [1, 2]>;
        "#;
    }

    fn test_too_many_pattern_variables() {
        let program = "type t = match 1 { [infer A, infer B, infer C, infer D, infer E] -> A }";
        let expected_errors = &["1:57: too many pattern variables in one match arm (at most 4)"];
    }
);

/// Numbers of every generated name that is declared, rather than referenced.
fn declared_ids(code: &str) -> Vec<u32> {
    let mut ids = Vec::new();
    for marker in [
        "infer temp_",
        "type temp_",
        "interface lambda_temp_",
        "interface arm_temp_",
    ] {
        for (start, _) in code.match_indices(marker) {
            let digits: String = code[start + marker.len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            ids.push(digits.parse().unwrap());
        }
    }
    ids
}

#[test]
fn test_fresh_ids_are_unique() {
    // Call arguments and `let` values are repeated in the output, so the
    // program avoids them to keep every declaration textually unique.
    let code = compile_ok(
        "
        type a = 1 + 2 * 3
        type f(x) = (y) => x - y < 4
        type g = match [1, 2] { [infer A, infer B] -> A + B, infer C -> !C }
        type h = -(1 ** 2) % 3
        #[checks] :{
          AssertEqual(a, 7)
          AssertEqual(g, 3)
          a + 1
        }
        ",
    );
    let mut ids = declared_ids(&code);
    assert!(!ids.is_empty());
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "duplicate generated names in:\n{code}");
}

#[test]
fn test_demos_compile() {
    for src in [
        include_str!("../../demos/routes.tartak"),
        include_str!("../../demos/big.tartak"),
    ] {
        let code = compile_ok(src);
        assert!(code.ends_with("}\n") || code.ends_with(";\n"));
        assert!(!code.contains("\n\n\n"));
    }
}

#[test]
fn test_only_referenced_symbols_are_imported() {
    let code = compile_ok("type t = 1 | 2");
    assert_eq!(code, "type t = (1 | 2);\n");
}

#[test]
fn test_line_breaks_are_escaped() {
    let code = compile_ok("type s = \"a\r\nb\"\r\ntype t = 'c\nd'\r\n");
    assert_eq!(code, "type s = \"a\\r\\nb\";\n\ntype t = \"c\\nd\";\n");
}

#[test]
fn test_numbers_are_emitted_as_written() {
    let code = compile_ok("type x = 18446744073709551616 + 007");
    assert!(code.contains("18446744073709551616 extends infer temp_1 extends number"));
    assert!(code.contains("007 extends infer temp_2 extends number"));
}
