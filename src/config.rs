use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub parse: ParseOptions,
    #[command(flatten)]
    pub format: FormatOptions,
}

#[derive(Args, Debug, Clone)]
pub struct ParseOptions {
    /// Timeout used when a tap-hold timeout is not a non-negative integer
    #[arg(long, default_value_t = 200)]
    pub default_tap_hold_timeout: u32,

    /// Do not report key codes missing from the built-in table
    #[arg(long, default_value_t = false)]
    pub allow_unknown_codes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_tap_hold_timeout: 200,
            allow_unknown_codes: false,
        }
    }
}

impl ParseOptions {
    pub fn warn_unknown_codes(&self) -> bool {
        !self.allow_unknown_codes
    }
}

#[derive(Args, Debug, Clone)]
pub struct FormatOptions {
    /// Spaces before each line inside a form
    #[arg(long, default_value_t = 2)]
    pub indent: usize,

    /// Keys per line when no layout rows apply (0 keeps each form on one line)
    #[arg(long, default_value_t = 16)]
    pub wrap: usize,

    /// Do not pad cells into aligned columns
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Ignore the physical layout's rows when breaking lines
    #[arg(long, default_value_t = false)]
    pub ignore_rows: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            wrap: 16,
            compact: false,
            ignore_rows: false,
        }
    }
}
