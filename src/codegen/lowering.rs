//! Operators and methods have no native counterpart in the type language
//! (beyond unions and intersections), so they lower to applications of
//! combinators exported by the external libraries.

use phf::phf_map;

use crate::{
    ast::{BinaryOperator, LogicalOperator, UnaryOperator},
    codegen::target_env::TargetEnv,
};

/// The external libraries generated code imports from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Library {
    Hot,
    Math,
    Prelude,
}

impl Library {
    pub const ALL: [Library; 3] = [Library::Hot, Library::Math, Library::Prelude];

    pub fn module<E: TargetEnv>(self) -> &'static str {
        match self {
            Library::Hot => E::HOT_MODULE,
            Library::Math => E::MATH_MODULE,
            Library::Prelude => E::PRELUDE_MODULE,
        }
    }
}

/// How a combinator is applied to its operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Application {
    /// `F<a, b>`
    Direct,
    /// `Call<F, a, b>`
    Deferred,
    /// `Call<F<a, b>>`
    Curried,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Combinator {
    pub library: Library,
    /// The symbol to import.
    pub import: &'static str,
    /// The path used at the application site, like `Booleans.And`.
    pub path: &'static str,
    pub application: Application,
    /// Every operand is bound with `extends <operand>` when set.
    pub operand: Option<&'static str>,
    /// The combinator yields a `1 | 0` bit, which must be turned into a
    /// boolean.
    pub yields_bit: bool,
}

impl Combinator {
    const fn arithmetic(symbol: &'static str) -> Combinator {
        Combinator {
            library: Library::Math,
            import: symbol,
            path: symbol,
            application: Application::Direct,
            operand: Some(NUMBER),
            yields_bit: false,
        }
    }

    const fn comparison(symbol: &'static str) -> Combinator {
        Combinator {
            yields_bit: true,
            ..Combinator::arithmetic(symbol)
        }
    }

    const fn booleans(path: &'static str, application: Application) -> Combinator {
        Combinator {
            library: Library::Hot,
            import: "Booleans",
            path,
            application,
            operand: None,
            yields_bit: false,
        }
    }
}

const NUMBER: &str = "number";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryLowering {
    /// A type operator the target understands, such as `|`.
    Native(&'static str),
    Combinator(Combinator),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryLowering {
    /// Asserts the operand is a number and yields it unchanged.
    NumericIdentity,
    Combinator(Combinator),
}

pub fn binary(op: BinaryOperator) -> BinaryLowering {
    use BinaryOperator::*;

    let combinator = match op {
        Union => return BinaryLowering::Native("|"),
        Intersection => return BinaryLowering::Native("&"),

        Add => Combinator::arithmetic("Add"),
        Sub => Combinator::arithmetic("Subtract"),
        Mul => Combinator::arithmetic("Multiply"),
        Div => Combinator::arithmetic("Divide"),
        Pow => Combinator::arithmetic("Pow"),
        Mod => Combinator::arithmetic("Mod"),

        Lt => Combinator::comparison("Lt"),
        Le => Combinator::comparison("LtOrEq"),
        Gt => Combinator::comparison("Gt"),
        Ge => Combinator::comparison("GtOrEq"),

        Eq => Combinator::booleans("Booleans.Equals", Application::Deferred),
        NotEq => Combinator {
            library: Library::Prelude,
            import: "NotEquals",
            path: "NotEquals",
            application: Application::Direct,
            operand: None,
            yields_bit: false,
        },
    };
    BinaryLowering::Combinator(combinator)
}

pub fn logical(op: LogicalOperator) -> Combinator {
    match op {
        LogicalOperator::And => Combinator::booleans("Booleans.And", Application::Curried),
        LogicalOperator::Or => Combinator::booleans("Booleans.Or", Application::Curried),
    }
}

pub fn unary(op: UnaryOperator) -> UnaryLowering {
    match op {
        UnaryOperator::Not => {
            UnaryLowering::Combinator(Combinator::booleans("Booleans.Not", Application::Curried))
        }
        UnaryOperator::Negate => UnaryLowering::Combinator(Combinator::arithmetic("Negate")),
        UnaryOperator::Plus => UnaryLowering::NumericIdentity,
    }
}

/// Method-call sugar: `xs.sort()` is `Sort<xs>`. Every method lives in the
/// prelude and takes the receiver as its first argument.
pub static METHODS: phf::Map<&'static str, &'static str> = phf_map! {
    // Tuples
    "sort" => "Sort",
    "sum" => "Sum",
    "head" => "Head",
    "tail" => "Tail",
    "last" => "Last",
    "at" => "At",
    "drop" => "Drop",
    "take" => "Take",
    "map" => "Map",
    "filter" => "Filter",
    "find" => "Find",
    "flatMap" => "FlatMap",
    "takeWhile" => "TakeWhile",
    "groupBy" => "GroupBy",
    "partition" => "Partition",
    "reduce" => "Reduce",
    "reduceRight" => "ReduceRight",
    "reverse" => "Reverse",
    "every" => "Every",
    "slice" => "Slice",
    "splitAt" => "SplitAt",
    "zip" => "Zip",
    "zipWith" => "ZipWith",
    "prepend" => "Prepend",
    "append" => "Append",
    "concat" => "Concat",
    "join" => "Join",
    "min" => "Min",
    "max" => "Max",
    "length" => "Length",
    "isEmpty" => "IsEmpty",
    "toUnion" => "ToUnion",
    "toIntersection" => "ToIntersection",
    "fromEntries" => "FromEntries",

    // Objects
    "mapValues" => "MapValues",

    // Strings
    "trim" => "Trim",
    "trimLeft" => "TrimLeft",
    "trimRight" => "TrimRight",
    "replace" => "Replace",
    "split" => "Split",
    "repeat" => "Repeat",
    "startsWith" => "StartsWith",
    "endsWith" => "EndsWith",
    "uppercase" => "Uppercase",
    "lowercase" => "Lowercase",
    "capitalize" => "Capitalize",
    "uncapitalize" => "Uncapitalize",
    "camelCase" => "CamelCase",
    "kebabCase" => "KebabCase",
    "snakeCase" => "SnakeCase",
    "toTuple" => "ToTuple",
    "toNumber" => "ToNumber",
    "toString" => "ToString",

    // Numbers
    "abs" => "Abs",
    "compare" => "Compare",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparisons_yield_bits() {
        for op in [
            BinaryOperator::Lt,
            BinaryOperator::Le,
            BinaryOperator::Gt,
            BinaryOperator::Ge,
        ] {
            let BinaryLowering::Combinator(combinator) = binary(op) else {
                panic!("{op:?} must lower to a combinator");
            };
            assert!(combinator.yields_bit, "{op:?}");
            assert_eq!(combinator.library, Library::Math);
        }
    }

    #[test]
    fn test_connectives_are_native() {
        assert_eq!(binary(BinaryOperator::Union), BinaryLowering::Native("|"));
        assert_eq!(
            binary(BinaryOperator::Intersection),
            BinaryLowering::Native("&")
        );
    }

    #[test]
    fn test_methods_are_capitalized_symbols() {
        for (method, symbol) in &METHODS {
            assert!(symbol.starts_with(char::is_uppercase), "{method} => {symbol}");
            assert!(symbol.eq_ignore_ascii_case(method), "{method} => {symbol}");
        }
    }
}
