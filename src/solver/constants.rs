// Defaults for the solver and its command line
pub const DEFAULT_UNARY_LIMIT: usize = 1;
pub const DEFAULT_MAX_TEMPLATES: usize = 250_000;
pub const DEFAULT_MAX_EQUATIONS: usize = 10_000_000;
