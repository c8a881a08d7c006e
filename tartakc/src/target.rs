#[derive(Copy, Clone, Debug, PartialEq, Eq, clap_derive::ValueEnum)]
#[clap(rename_all = "snake_case")]
pub enum Target {
    Published,
    Local,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(tartak::Target::from(*self).name())
    }
}

impl From<Target> for tartak::Target {
    fn from(value: Target) -> Self {
        match value {
            Target::Published => tartak::Target::Published,
            Target::Local => tartak::Target::Local,
        }
    }
}

pub const DEFAULT_TARGET: Target = Target::Published;
