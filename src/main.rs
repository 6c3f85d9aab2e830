#[cfg(not(any(feature = "cli")))]
fn main() {}

#[cfg(feature = "cli")]
fn main() -> litesym::prelude::SmResult<()> {
    litesym::cli::init(&litesym::prelude::CFG)
}
