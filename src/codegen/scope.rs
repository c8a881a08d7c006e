use indexmap::IndexSet;

/// The names visible while compiling an expression.
///
/// Lifted declarations receive their captured environment as the tuple in
/// `this["arg0"]` and their own arguments as `this["arg1"]`, `this["arg2"]`
/// and so on, so a name's slot in `outer` or `params` is also its index in the
/// generated code. Slots are never shifted: a shadowed name leaves a hole.
#[derive(Clone, Debug, Default)]
pub struct Scope<'a> {
    /// Names bound by the expression being compiled (block `let`s, mapped type
    /// keys). They are emitted bare.
    inner: Vec<&'a str>,
    outer: Vec<Option<&'a str>>,
    params: Vec<Option<&'a str>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Index into the capture tuple.
    Outer(usize),
    /// Index into the arguments, not counting the capture tuple.
    Param(usize),
    Local,
    /// Not bound by any enclosing construct: a top-level definition, an
    /// imported symbol or a name the target provides.
    Global,
}

impl<'a> Scope<'a> {
    /// The scope of a lifted declaration's body.
    pub fn closure(captures: Vec<&'a str>, params: Vec<&'a str>) -> Scope<'a> {
        Scope {
            inner: Vec::new(),
            outer: captures.into_iter().map(Some).collect(),
            params: params.into_iter().map(Some).collect(),
        }
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        if let Some(i) = slot_of(&self.outer, name) {
            Resolution::Outer(i)
        } else if let Some(i) = slot_of(&self.params, name) {
            Resolution::Param(i)
        } else if self.inner.iter().any(|local| *local == name) {
            Resolution::Local
        } else {
            Resolution::Global
        }
    }

    /// Binds a local name, shadowing captured values and parameters.
    pub fn bind_local(&mut self, name: &'a str) {
        for slot in self.outer.iter_mut().chain(&mut self.params) {
            if *slot == Some(name) {
                *slot = None;
            }
        }
        self.inner.push(name);
    }

    /// The names a closure created here must capture: the active pattern
    /// variables followed by every name in scope, without duplicates and
    /// without the closure's own parameters.
    pub fn captures(&self, pattern_vars: &[&'a str], own_params: &[&'a str]) -> Vec<&'a str> {
        let names: IndexSet<&'a str> = pattern_vars
            .iter()
            .copied()
            .chain(self.inner.iter().copied())
            .chain(self.outer.iter().flatten().copied())
            .chain(self.params.iter().flatten().copied())
            .collect();
        names
            .into_iter()
            .filter(|name| !own_params.contains(name))
            .collect()
    }
}

fn slot_of(slots: &[Option<&str>], name: &str) -> Option<usize> {
    slots.iter().position(|slot| *slot == Some(name))
}
