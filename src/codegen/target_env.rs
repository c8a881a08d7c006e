pub trait TargetEnv {
    const NAME: &str;

    /// Generic higher-order utilities (`Fn`, `Apply`, `Match`, `Booleans`...).
    const HOT_MODULE: &str;
    /// Type-level arithmetic.
    const MATH_MODULE: &str;
    /// Tuple, string and object utilities, plus the assertion helper.
    const PRELUDE_MODULE: &str;
}

impl TargetEnv for Published {
    const NAME: &str = "published";

    const HOT_MODULE: &str = "tartak/hot";
    const MATH_MODULE: &str = "tartak/math";
    const PRELUDE_MODULE: &str = "tartak/prelude";
}

impl TargetEnv for Local {
    const NAME: &str = "local";

    const HOT_MODULE: &str = "hotscript";
    const MATH_MODULE: &str = "ts-arithmetic";
    const PRELUDE_MODULE: &str = "@/prelude";
}

pub struct Published;

pub struct Local;
