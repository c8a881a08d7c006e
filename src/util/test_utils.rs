use crate::{
    codegen::{self, Target},
    parser,
    util::fmt::tree,
};

/// Each variant contains the input.
pub enum Test {
    ParserProgram(&'static str),
    ParserExpr(&'static str),
    CompilerProgram(&'static str),
    CompilerProgramLocal(&'static str),
}

pub enum Assertion {
    TreeOk(&'static str),
    ExpectedErrors(&'static [&'static str]),
}

/// Runs the test input through the pipeline, returning the formatted output
/// (a tree for parser tests, generated code for compiler tests) and errors.
#[track_caller]
pub fn run_pipeline(test: Test) -> (String, Vec<String>) {
    match test {
        Test::ParserProgram(input) => match parser::parse_program(input) {
            Ok(program) => (tree::print_program_string(&program), vec![]),
            Err(error) => (String::new(), vec![error.to_string()]),
        },
        Test::ParserExpr(input) => match parser::parse_expr(input) {
            Ok(expr) => (tree::print_expr_string(&expr), vec![]),
            Err(error) => (String::new(), vec![error.to_string()]),
        },
        Test::CompilerProgram(input) => compile(input, Target::Published),
        Test::CompilerProgramLocal(input) => compile(input, Target::Local),
    }
}

fn compile(input: &str, target: Target) -> (String, Vec<String>) {
    let program = match parser::parse_program(input) {
        Ok(program) => program,
        Err(error) => return (String::new(), vec![error.to_string()]),
    };
    match codegen::generate(target, &program) {
        Ok(code) => (code, vec![]),
        Err(error) => (String::new(), vec![error.to_string()]),
    }
}

#[track_caller]
pub fn run_assertion(
    assertion: Assertion,
    formatted_actual_tree: &str,
    formatted_actual_errors: &[String],
) {
    match assertion {
        Assertion::TreeOk(expected_tree) => {
            let expected_errors: &[&str] = &[];
            ::pretty_assertions::assert_eq!(formatted_actual_errors, expected_errors);
            ::pretty_assertions::assert_eq!(formatted_actual_tree.trim(), expected_tree.trim());
        }
        Assertion::ExpectedErrors(expected_errors) => {
            ::pretty_assertions::assert_eq!(formatted_actual_errors, expected_errors)
        }
    }
}

/// Compiles a program that is expected to succeed.
#[track_caller]
pub fn compile_ok(input: &str) -> String {
    let (code, errors) = compile(input, Target::Published);
    let expected_errors: &[String] = &[];
    ::pretty_assertions::assert_eq!(errors, expected_errors);
    code
}

macro_rules! tree_tests {
    (
        use $test_kind:ident;

        $(
            fn $test_name:ident() {
                let $source_kind:ident = $source:expr;
                $($assertions_tt:tt)*
            }
        )*
    ) => {
        $(
            #[test]
            fn $test_name() {
                let test: crate::util::test_utils::Test =
                    tree_tests!(@@get_test($test_kind, $source_kind), $source);
                let (formatted_actual_tree, formatted_actual_errors) =
                    crate::util::test_utils::run_pipeline(test);
                let ctx = (&formatted_actual_tree, &formatted_actual_errors);
                tree_tests!(@@expand_assertions, ctx, [$($assertions_tt)*]);
            }
        )*
    };

    (@@expand_assertions, $ctx:expr, []) => {};
    (@@expand_assertions, $ctx:expr, [
        let $assertion:ident = $assertion_expected:expr;
        $($rest_assertions_tt:tt)*
    ]) => {
        crate::util::test_utils::run_assertion(
            tree_tests!(@@assertion, $assertion, $assertion_expected),
            $ctx.0,
            $ctx.1,
        );
        tree_tests!(@@expand_assertions, $ctx, [$($rest_assertions_tt)*]);
    };

    (@@assertion, tree_ok, $expected:expr) => {
        crate::util::test_utils::Assertion::TreeOk(::indoc::indoc! { $expected })
    };
    (@@assertion, output_ok, $expected:expr) => {
        crate::util::test_utils::Assertion::TreeOk(::indoc::indoc! { $expected })
    };
    (@@assertion, expected_errors, $expected:expr) => {
        crate::util::test_utils::Assertion::ExpectedErrors($expected)
    };

    (@@get_test(parser, program), $source:expr) => {
        crate::util::test_utils::Test::ParserProgram($source)
    };
    (@@get_test(parser, expr), $source:expr) => {
        crate::util::test_utils::Test::ParserExpr($source)
    };
    (@@get_test(compiler, program), $source:expr) => {
        crate::util::test_utils::Test::CompilerProgram($source)
    };
    (@@get_test(compiler, local_program), $source:expr) => {
        crate::util::test_utils::Test::CompilerProgramLocal($source)
    };
}
pub(crate) use tree_tests;
